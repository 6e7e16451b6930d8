use askama::Template;
use std::collections::BTreeSet;

use super::naming::{sanitize_rust_identifier, string_literal, to_screaming_snake};
use crate::config::{AuthConfig, GeneratorConfig};
use crate::spec::{ApiModel, FieldSchema, HandlerSchema, SemanticType};
use crate::validator::ValidatorSpec;

/// Settings baked into emitted code.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Shown in the generated banner
    pub source_name: String,
    /// Crate path the runtime helpers are imported from
    pub runtime_crate: String,
    pub auth: AuthConfig,
}

impl RenderOptions {
    pub fn from_config(config: &GeneratorConfig, source_name: impl Into<String>) -> Self {
        RenderOptions {
            source_name: source_name.into(),
            runtime_crate: config.runtime_crate.clone(),
            auth: config.auth.clone(),
        }
    }
}

/// One params-record field assignment inside a `handle_*` method.
#[derive(Debug, Clone)]
pub struct FieldView {
    /// Field identifier, `r#`-escaped where needed
    pub ident: String,
    /// `string_param` or `int_param`
    pub reader: &'static str,
    /// `FieldSchema` constructor expression for the static table
    pub schema_expr: String,
}

#[derive(Debug, Clone)]
pub struct RouteView {
    pub url_lit: String,
    pub auth: bool,
    pub has_method: bool,
    pub method_lit: String,
    /// Generated per-route method, `handle_<handler>`
    pub handle_fn: String,
    pub handler_ident: String,
    pub params_type: String,
    /// `params` or `&params`
    pub params_arg: &'static str,
    pub static_name: String,
    pub fields: Vec<FieldView>,
}

#[derive(Debug, Clone)]
pub struct ApiView {
    pub type_name: String,
    pub routes: Vec<RouteView>,
}

/// Template data for the generated dispatch module
#[derive(Template)]
#[template(path = "dispatch.rs.txt", escape = "none")]
pub struct DispatchTemplateData {
    pub source_name: String,
    pub runtime: String,
    pub auth_header_lit: String,
    pub auth_token_lit: String,
    pub apis: Vec<ApiView>,
}

impl DispatchTemplateData {
    pub fn from_model(model: &ApiModel, options: &RenderOptions) -> Self {
        let mut statics = BTreeSet::new();
        let apis = model
            .routes
            .iter()
            .map(|(api, handlers)| ApiView {
                type_name: sanitize_rust_identifier(api),
                routes: handlers
                    .iter()
                    .map(|handler| {
                        let static_name = unique_static_name(handler, &mut statics);
                        route_view(handler, model.fields_for(handler), static_name)
                    })
                    .collect(),
            })
            .collect();
        DispatchTemplateData {
            source_name: options.source_name.clone(),
            runtime: options.runtime_crate.clone(),
            auth_header_lit: string_literal(&options.auth.header),
            auth_token_lit: string_literal(&options.auth.token),
            apis,
        }
    }
}

/// `{API}_{HANDLER}_FIELDS`, suffixed with a counter when another route
/// already took the name (`MyApi`+`create` and `My`+`api_create` collide).
fn unique_static_name(handler: &HandlerSchema, taken: &mut BTreeSet<String>) -> String {
    let base = to_screaming_snake(&[&handler.api_name, &handler.handler_name]);
    let mut name = format!("{base}_FIELDS");
    let mut n = 2;
    while !taken.insert(name.clone()) {
        name = format!("{base}_{n}_FIELDS");
        n += 1;
    }
    name
}

fn route_view(handler: &HandlerSchema, fields: &[FieldSchema], static_name: String) -> RouteView {
    RouteView {
        url_lit: string_literal(&handler.route.url),
        auth: handler.route.auth,
        has_method: !handler.route.method.is_empty(),
        method_lit: string_literal(&handler.route.method),
        handle_fn: format!("handle_{}", handler.handler_name),
        handler_ident: sanitize_rust_identifier(&handler.handler_name),
        params_type: sanitize_rust_identifier(&handler.schema_name),
        params_arg: if handler.params_by_ref {
            "&params"
        } else {
            "params"
        },
        static_name,
        fields: fields
            .iter()
            .map(|field| FieldView {
                ident: sanitize_rust_identifier(&field.name),
                reader: match field.semantic_type {
                    SemanticType::String => "string_param",
                    SemanticType::Int => "int_param",
                },
                schema_expr: field_schema_expr(field),
            })
            .collect(),
    }
}

/// Rust expression rebuilding `field` at runtime.
pub fn field_schema_expr(field: &FieldSchema) -> String {
    let semantic = match field.semantic_type {
        SemanticType::String => "SemanticType::String",
        SemanticType::Int => "SemanticType::Int",
    };
    let mut expr = format!(
        "FieldSchema::new({}, {semantic}).with_rust_type({})",
        string_literal(&field.name),
        string_literal(&field.rust_type)
    );
    if !field.validators.is_empty() {
        let validators: Vec<String> = field.validators.iter().map(validator_expr).collect();
        expr.push_str(&format!(".with_validators(vec![{}])", validators.join(", ")));
    }
    if let Some(rename) = &field.param_rename {
        expr.push_str(&format!(".renamed({})", string_literal(rename)));
    }
    if let Some(default) = &field.default_value {
        expr.push_str(&format!(".with_default({})", string_literal(default)));
    }
    expr
}

/// Rust expression for one compiled validator.
pub fn validator_expr(spec: &ValidatorSpec) -> String {
    match spec {
        ValidatorSpec::Required => "ValidatorSpec::Required".to_string(),
        ValidatorSpec::StringMin(n) => format!("ValidatorSpec::StringMin({n})"),
        ValidatorSpec::StringMax(n) => format!("ValidatorSpec::StringMax({n})"),
        ValidatorSpec::IntMin(n) => format!("ValidatorSpec::IntMin({n})"),
        ValidatorSpec::IntMax(n) => format!("ValidatorSpec::IntMax({n})"),
        ValidatorSpec::Enum(values) => {
            let values: Vec<String> = values
                .iter()
                .map(|v| format!("{}.to_string()", string_literal(v)))
                .collect();
            format!("ValidatorSpec::Enum(vec![{}])", values.join(", "))
        }
    }
}

/// Render the dispatch module for every API in `model`.
pub fn render_dispatch(model: &ApiModel, options: &RenderOptions) -> anyhow::Result<String> {
    let data = DispatchTemplateData::from_model(model, options);
    Ok(data.render()?)
}
