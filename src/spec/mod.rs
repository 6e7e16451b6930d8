//! # Spec Module
//!
//! Builds the [`ApiModel`] from an annotated Rust source description.
//!
//! ## Overview
//!
//! The source is parsed once with `syn`; two independent passes then walk the
//! same declarations:
//!
//! - the **schema extractor** collects `#[apivalidator("...")]` fields of every
//!   struct and compiles each annotation into a [`FieldSchema`]
//! - the **route extractor** collects methods whose doc comment carries an
//!   `apigen:api {...}` line and turns them into [`HandlerSchema`] entries
//!
//! [`build_model`] joins the two by params type name.
//!
//! Params records derive [`ApiParams`] (`apigen_macros`), which registers the
//! `apivalidator` attribute so the annotated source compiles, and keeps the
//! annotations available at runtime through [`ApiParams::field_schemas`].
//!
//! Problems with individual declarations become
//! [`Diagnostic`](crate::diagnostics::Diagnostic) values on the model; only an unreadable or unparseable file is fatal ([`SourceError`]).
//!
//! ```rust
//! use apigen::config::GeneratorConfig;
//! use apigen::spec::{build_model, parse_source};
//!
//! let source = parse_source("api.rs", r#"
//!     pub struct ProfileParams {
//!         #[apivalidator("required")]
//!         pub login: String,
//!     }
//!
//!     impl MyApi {
//!         /// apigen:api {"url": "/user/profile", "auth": false}
//!         pub fn profile(&self, ctx: &RequestContext, params: ProfileParams) -> Result<User, ApiError> {
//!             unimplemented!()
//!         }
//!     }
//! "#).unwrap();
//!
//! let model = build_model(&source, &GeneratorConfig::default());
//! let handler = model.routes.find("MyApi", "/user/profile").unwrap();
//! assert_eq!(model.fields_for(handler)[0].wire_key(), "login");
//! ```

mod build;
mod load;
mod params;
mod routes;
mod schema;
mod types;

pub use build::*;
pub use load::*;
pub use params::{ApiParams, ParamAnnotation};
pub use routes::extract_routes;
pub use schema::extract_schemas;
pub use types::*;
