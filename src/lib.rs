//! # apigen
//!
//! **apigen** compiles annotated Rust API declarations into request-dispatch
//! and validation code.
//!
//! ## Overview
//!
//! An API is an ordinary Rust type with handler methods. A doc-comment marker
//! gives each handler its route, and `#[apivalidator("...")]` attributes on
//! the fields of its params record say how each field is read and checked:
//!
//! ```rust,ignore
//! pub struct CreateParams {
//!     #[apivalidator("required,min=3")]
//!     pub login: String,
//!     #[apivalidator("enum=user|moderator|admin,default=user")]
//!     pub status: String,
//!     #[apivalidator("min=1,max=120")]
//!     pub age: u8,
//! }
//!
//! impl MyApi {
//!     /// apigen:api {"url": "/user/create", "auth": true, "method": "POST"}
//!     pub fn create(&self, ctx: &RequestContext, params: &CreateParams) -> Result<NewUser, ApiError> {
//!         // business logic only
//!     }
//! }
//! ```
//!
//! `apigen generate` turns that into a `serve_http` method per API type that
//! matches the path, checks credentials and method, fills the params record
//! from query and form values, validates every field and wraps the handler's
//! result in a JSON envelope.
//!
//! ## Architecture
//!
//! - **[`spec`]** - schema and route extraction into an [`ApiModel`]
//! - **[`validator`]** - annotation compiler and validator semantics
//! - **[`generator`]** - Askama-based emitter for the dispatch module
//! - **[`dispatcher`]** - in-memory interpreter of an [`ApiModel`]
//! - **[`server`]** - request view, response envelope and failure taxonomy
//! - **[`security`]** - shared-secret credential check
//! - **[`config`]** / **[`logging`]** - generator settings and tracing setup
//! - **[`cli`]** - the `apigen` binary
//!
//! `#[derive(ApiParams)]` (re-exported from `apigen_macros`) registers the
//! `apivalidator` attribute on params records.
//!
//! ### Code Generation Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant User
//!     participant CLI as CLI<br/>(apigen)
//!     participant Load as spec::load_source
//!     participant Schema as spec::extract_schemas
//!     participant Routes as spec::extract_routes
//!     participant Templates as generator::render_dispatch
//!     participant FS as File System
//!
//!     User->>CLI: apigen generate --source api.rs --output dispatch.rs
//!     CLI->>Load: parse source with syn
//!     Load-->>CLI: syn::File
//!     CLI->>Schema: annotated fields per struct
//!     Schema-->>CLI: SchemaTable
//!     CLI->>Routes: marked handler methods
//!     Routes-->>CLI: Vec<HandlerSchema>
//!     CLI->>Templates: ApiModel
//!     Templates-->>CLI: Rust source (syn-checked)
//!     CLI->>FS: write dispatch.rs, run rustfmt
//! ```
//!
//! ### Request Handling Flow
//!
//! ```mermaid
//! stateDiagram-v2
//!     [*] --> MatchRoute
//!     MatchRoute --> Auth: path found
//!     MatchRoute --> [*]: 404 unknown method
//!     Auth --> Method: auth false or secret matches
//!     Auth --> [*]: 403 unauthorized
//!     Method --> Params: method empty or equal
//!     Method --> [*]: 406 bad method
//!     Params --> Params: parse, coerce, default, validate next field
//!     Params --> [*]: 400 coercion or validation failure
//!     Params --> Invoke: all fields valid
//!     Invoke --> [*]: 200 envelope or domain/internal failure
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use apigen::{build_model, parse_source, Dispatcher, GeneratorConfig, HandlerRequest};
//! use http::Method;
//! use serde_json::json;
//!
//! let source = parse_source("api.rs", r#"
//!     pub struct ProfileParams {
//!         #[apivalidator("required")]
//!         pub login: String,
//!     }
//!     impl MyApi {
//!         /// apigen:api {"url": "/user/profile"}
//!         pub fn profile(&self, ctx: &RequestContext, p: ProfileParams) -> Result<User, ApiError> {
//!             unimplemented!()
//!         }
//!     }
//! "#).unwrap();
//! let model = build_model(&source, &GeneratorConfig::default());
//!
//! let mut dispatcher = Dispatcher::from_model(&model);
//! dispatcher
//!     .register("MyApi", "profile", |_ctx, params| {
//!         Ok(json!({ "login": params.str("login") }))
//!     })
//!     .unwrap();
//!
//! let req = HandlerRequest::from_target(Method::GET, "/user/profile?login=rvasily");
//! let res = dispatcher.dispatch("MyApi", &req);
//! assert_eq!(res.status.as_u16(), 200);
//! ```

pub mod cli;
pub mod config;
pub mod context;
pub mod diagnostics;
pub mod dispatcher;
pub mod generator;
pub mod logging;
pub mod security;
pub mod server;
pub mod spec;
pub mod validator;

pub use apigen_macros::ApiParams;
pub use config::GeneratorConfig;
pub use context::{RequestContext, RequestId};
pub use diagnostics::{Diagnostic, DiagnosticKind, Severity};
pub use dispatcher::{DispatchError, Dispatcher, ParamRecord};
pub use security::{CredentialCheck, SharedSecret};
pub use server::{ApiError, CallError, Failure, HandlerRequest, HandlerResponse};
pub use spec::{
    build_model, load_model, parse_source, ApiModel, ApiParams, FieldSchema, HandlerSchema,
    RouteConfig, SemanticType,
};
pub use validator::{FieldValue, ValidatorSpec};
