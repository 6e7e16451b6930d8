//! # Dispatcher Module
//!
//! Runtime side of the compiled model.
//!
//! ## Overview
//!
//! Two renderers share one set of request-handling steps ([`steps`]):
//!
//! - code emitted by the [`generator`](crate::generator) calls the step
//!   functions directly from a per-API `serve_http` method
//! - the in-memory [`Dispatcher`] interprets an [`ApiModel`](crate::spec::ApiModel)
//!   and calls registered closures
//!
//! Both produce identical statuses and envelopes for the same request.
//!
//! ## Handler Registration
//!
//! ```rust
//! use apigen::config::GeneratorConfig;
//! use apigen::dispatcher::Dispatcher;
//! use apigen::server::HandlerRequest;
//! use apigen::spec::{build_model, parse_source};
//! use http::Method;
//!
//! let source = parse_source("api.rs", r#"
//!     struct ProfileParams {
//!         #[apivalidator("required")]
//!         login: String,
//!     }
//!     impl MyApi {
//!         /// apigen:api {"url": "/user/profile"}
//!         fn profile(&self, ctx: &RequestContext, p: ProfileParams) -> Result<User, ApiError> {
//!             unimplemented!()
//!         }
//!     }
//! "#).unwrap();
//! let model = build_model(&source, &GeneratorConfig::default());
//!
//! let mut dispatcher = Dispatcher::from_model(&model);
//! dispatcher
//!     .register("MyApi", "profile", |_ctx, params| {
//!         Ok(serde_json::json!({ "login": params.str("login") }))
//!     })
//!     .unwrap();
//!
//! let req = HandlerRequest::from_target(Method::GET, "/user/profile");
//! let res = dispatcher.dispatch("MyApi", &req);
//! assert_eq!(res.status.as_u16(), 400);
//! assert_eq!(res.error_message(), "login must be not empty");
//! ```

mod core;
pub mod steps;

pub use self::core::{DispatchError, Dispatcher, HandlerFn, ParamRecord};
pub use steps::{
    check_credentials, check_method, check_route, int_param, read_field, respond, string_param,
};
