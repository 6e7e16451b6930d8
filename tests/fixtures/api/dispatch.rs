// @generated by apigen from mod.rs. Do not edit by hand.
//
// Mount this file as a child module of the module declaring the API types
// and their params records.
#![allow(unused_imports, clippy::field_reassign_with_default)]

use super::*;
use apigen::context::RequestContext;
use apigen::dispatcher::{check_credentials, check_method, int_param, respond, string_param};
use apigen::security::{CredentialCheck, SharedSecret};
use apigen::server::{Failure, HandlerRequest, HandlerResponse};
use apigen::spec::{FieldSchema, SemanticType};
use apigen::validator::ValidatorSpec;
use std::sync::LazyLock;

static SHARED_SECRET: LazyLock<SharedSecret> =
    LazyLock::new(|| SharedSecret::new("X-Auth", "100500"));

static MY_API_PROFILE_FIELDS: LazyLock<Vec<FieldSchema>> = LazyLock::new(|| {
    vec![
        FieldSchema::new("login", SemanticType::String)
            .with_rust_type("String")
            .with_validators(vec![ValidatorSpec::Required]),
    ]
});

static MY_API_CREATE_FIELDS: LazyLock<Vec<FieldSchema>> = LazyLock::new(|| {
    vec![
        FieldSchema::new("login", SemanticType::String)
            .with_rust_type("String")
            .with_validators(vec![ValidatorSpec::Required, ValidatorSpec::StringMin(10)]),
        FieldSchema::new("name", SemanticType::String)
            .with_rust_type("String")
            .renamed("full_name"),
        FieldSchema::new("status", SemanticType::String)
            .with_rust_type("String")
            .with_validators(vec![ValidatorSpec::Enum(vec![
                "user".to_string(),
                "moderator".to_string(),
                "admin".to_string()
            ])])
            .with_default("user"),
        FieldSchema::new("age", SemanticType::Int)
            .with_rust_type("u8")
            .with_validators(vec![ValidatorSpec::IntMin(0), ValidatorSpec::IntMax(128)]),
    ]
});

impl MyApi {
    /// Route a request, checking `auth` routes against the configured shared secret.
    pub fn serve_http(&self, req: &HandlerRequest) -> HandlerResponse {
        self.serve_http_with(req, &*SHARED_SECRET)
    }

    /// Route a request to its handler by exact path, checking `auth` routes
    /// with `credentials`.
    pub fn serve_http_with(
        &self,
        req: &HandlerRequest,
        credentials: &dyn CredentialCheck,
    ) -> HandlerResponse {
        match req.path() {
            "/user/profile" => {
                self.handle_profile(req)
            }
            "/user/create" => {
                if let Err(failure) = check_credentials(req, credentials) {
                    return failure.into();
                }
                if let Err(failure) = check_method(req, "POST") {
                    return failure.into();
                }
                self.handle_create(req)
            }
            _ => Failure::UnknownMethod.into(),
        }
    }

    fn handle_profile(&self, req: &HandlerRequest) -> HandlerResponse {
        let fields = &*MY_API_PROFILE_FIELDS;
        let mut params = ProfileParams::default();
        params.login = match string_param(req, &fields[0]) {
            Ok(value) => value,
            Err(failure) => return failure.into(),
        };
        let ctx = RequestContext::from_request(req);
        respond(self.profile(&ctx, params))
    }

    fn handle_create(&self, req: &HandlerRequest) -> HandlerResponse {
        let fields = &*MY_API_CREATE_FIELDS;
        let mut params = CreateParams::default();
        params.login = match string_param(req, &fields[0]) {
            Ok(value) => value,
            Err(failure) => return failure.into(),
        };
        params.name = match string_param(req, &fields[1]) {
            Ok(value) => value,
            Err(failure) => return failure.into(),
        };
        params.status = match string_param(req, &fields[2]) {
            Ok(value) => value,
            Err(failure) => return failure.into(),
        };
        params.age = match int_param(req, &fields[3]) {
            Ok(value) => value,
            Err(failure) => return failure.into(),
        };
        let ctx = RequestContext::from_request(req);
        respond(self.create(&ctx, &params))
    }
}

static OTHER_API_CREATE_FIELDS: LazyLock<Vec<FieldSchema>> = LazyLock::new(|| {
    vec![
        FieldSchema::new("username", SemanticType::String)
            .with_rust_type("String")
            .with_validators(vec![ValidatorSpec::Required, ValidatorSpec::StringMin(3)]),
        FieldSchema::new("name", SemanticType::String)
            .with_rust_type("String")
            .renamed("account_name"),
        FieldSchema::new("type", SemanticType::String)
            .with_rust_type("String")
            .with_validators(vec![ValidatorSpec::Enum(vec![
                "warrior".to_string(),
                "sorcerer".to_string(),
                "rouge".to_string()
            ])])
            .with_default("warrior"),
        FieldSchema::new("level", SemanticType::Int)
            .with_rust_type("i32")
            .with_validators(vec![ValidatorSpec::IntMin(1), ValidatorSpec::IntMax(50)]),
    ]
});

impl OtherApi {
    /// Route a request, checking `auth` routes against the configured shared secret.
    pub fn serve_http(&self, req: &HandlerRequest) -> HandlerResponse {
        self.serve_http_with(req, &*SHARED_SECRET)
    }

    /// Route a request to its handler by exact path, checking `auth` routes
    /// with `credentials`.
    pub fn serve_http_with(
        &self,
        req: &HandlerRequest,
        credentials: &dyn CredentialCheck,
    ) -> HandlerResponse {
        match req.path() {
            "/user/create" => {
                if let Err(failure) = check_credentials(req, credentials) {
                    return failure.into();
                }
                if let Err(failure) = check_method(req, "POST") {
                    return failure.into();
                }
                self.handle_create(req)
            }
            "/health" => {
                self.handle_health(req)
            }
            _ => Failure::UnknownMethod.into(),
        }
    }

    fn handle_create(&self, req: &HandlerRequest) -> HandlerResponse {
        let fields = &*OTHER_API_CREATE_FIELDS;
        let mut params = OtherCreateParams::default();
        params.username = match string_param(req, &fields[0]) {
            Ok(value) => value,
            Err(failure) => return failure.into(),
        };
        params.name = match string_param(req, &fields[1]) {
            Ok(value) => value,
            Err(failure) => return failure.into(),
        };
        params.r#type = match string_param(req, &fields[2]) {
            Ok(value) => value,
            Err(failure) => return failure.into(),
        };
        params.level = match int_param(req, &fields[3]) {
            Ok(value) => value,
            Err(failure) => return failure.into(),
        };
        let ctx = RequestContext::from_request(req);
        respond(self.create(&ctx, &params))
    }

    fn handle_health(&self, req: &HandlerRequest) -> HandlerResponse {
        let params = HealthParams::default();
        let ctx = RequestContext::from_request(req);
        respond(self.health(&ctx, params))
    }
}
