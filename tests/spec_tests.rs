#![allow(clippy::unwrap_used, clippy::expect_used)]

use apigen::config::GeneratorConfig;
use apigen::diagnostics::{DiagnosticKind, Severity};
use apigen::spec::{load_model, parse_source, SourceError};
use apigen::{build_model, SemanticType, ValidatorSpec};
use std::path::{Path, PathBuf};

fn fixture() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/api/mod.rs")
}

#[test]
fn test_fixture_route_table() {
    let model = load_model(&fixture(), &GeneratorConfig::default()).unwrap();

    assert_eq!(model.routes.apis().collect::<Vec<_>>(), vec!["MyApi", "OtherApi"]);
    let my_api: Vec<_> = model
        .routes
        .handlers("MyApi")
        .iter()
        .map(|h| (h.handler_name.as_str(), h.route.url.as_str()))
        .collect();
    assert_eq!(my_api, vec![("profile", "/user/profile"), ("create", "/user/create")]);

    let create = model.routes.find("MyApi", "/user/create").unwrap();
    assert!(create.route.auth);
    assert_eq!(create.route.method, "POST");
    assert_eq!(create.schema_name, "CreateParams");
    assert!(create.params_by_ref);

    let profile = model.routes.find("MyApi", "/user/profile").unwrap();
    assert!(!profile.route.auth);
    assert!(profile.route.method.is_empty());
    assert!(!profile.params_by_ref);

    // Same path in a different API is a separate route.
    assert!(model.routes.find("OtherApi", "/user/create").is_some());
    assert_eq!(model.routes.len(), 4);
}

#[test]
fn test_fixture_field_schemas() {
    let model = load_model(&fixture(), &GeneratorConfig::default()).unwrap();

    let fields = &model.schemas["CreateParams"];
    let keys: Vec<_> = fields.iter().map(|f| f.wire_key()).collect();
    assert_eq!(keys, vec!["login", "full_name", "status", "age"]);
    assert_eq!(
        fields[0].validators,
        vec![ValidatorSpec::Required, ValidatorSpec::StringMin(10)]
    );
    assert!(fields[1].validators.is_empty());
    assert_eq!(fields[2].default_value.as_deref(), Some("user"));
    assert_eq!(fields[3].semantic_type, SemanticType::Int);
    assert_eq!(fields[3].rust_type, "u8");

    let other = &model.schemas["OtherCreateParams"];
    assert_eq!(other[2].name, "type");
    assert_eq!(other[2].wire_key(), "type");
    assert_eq!(
        other[2].validators,
        vec![ValidatorSpec::Enum(vec![
            "warrior".into(),
            "sorcerer".into(),
            "rouge".into()
        ])]
    );
}

#[test]
fn test_fixture_diagnostics() {
    let model = load_model(&fixture(), &GeneratorConfig::default()).unwrap();
    assert!(!model.has_errors());
    assert_eq!(model.diagnostics.len(), 1);
    let diag = &model.diagnostics[0];
    assert_eq!(diag.severity, Severity::Info);
    assert_eq!(diag.location, "OtherApi::health");
    assert!(diag.message.contains("HealthParams"));
}

#[test]
fn test_missing_source_is_fatal() {
    let err = load_model(Path::new("does/not/exist.rs"), &GeneratorConfig::default()).unwrap_err();
    assert!(matches!(err, SourceError::Read { .. }));
    assert!(err.to_string().contains("does/not/exist.rs"));
}

#[test]
fn test_syntax_error_reports_position() {
    let err = parse_source("broken.rs", "struct Params {\n    login: String,\n    ??\n}\n").unwrap_err();
    match err {
        SourceError::Parse { path, line, .. } => {
            assert_eq!(path, PathBuf::from("broken.rs"));
            assert_eq!(line, 3);
        }
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[test]
fn test_custom_markers_from_config() {
    let config = GeneratorConfig::from_toml_str(
        r#"
        route_marker = "@route"
        validator_attribute = "check"
        "#,
    )
    .unwrap();
    let source = parse_source(
        "api.rs",
        r#"
        struct Params {
            #[check("required")]
            login: String,
            #[apivalidator("required")]
            ignored: String,
        }

        impl Api {
            /// @route {"url": "/a"}
            fn a(&self, ctx: &RequestContext, p: Params) -> Result<(), ApiError> { todo!() }
            /// apigen:api {"url": "/b"}
            fn b(&self, ctx: &RequestContext, p: Params) -> Result<(), ApiError> { todo!() }
        }
        "#,
    )
    .unwrap();
    let model = build_model(&source, &config);
    assert_eq!(model.routes.len(), 1);
    assert_eq!(model.routes.handlers("Api")[0].route.url, "/a");
    assert_eq!(model.schemas["Params"].len(), 1);
}

#[test]
fn test_bad_declarations_become_diagnostics() {
    let source = parse_source(
        "api.rs",
        r#"
        struct Params {
            #[apivalidator("required,min=abc,enum=")]
            login: String,
            #[apivalidator("enum=a|b")]
            level: i64,
            #[apivalidator("required")]
            score: f64,
        }

        impl Api {
            /// apigen:api {"url": "/a", "auth": "yes"}
            fn a(&self, ctx: &RequestContext, p: Params) -> Result<(), ApiError> { todo!() }
            /// apigen:api {"url": "/b"}
            fn b(&self, ctx: &RequestContext, p: Params) -> Result<(), ApiError> { todo!() }
        }
        "#,
    )
    .unwrap();
    let model = build_model(&source, &GeneratorConfig::default());

    // Generation still has something to work with.
    assert_eq!(model.routes.len(), 1);
    let fields = &model.schemas["Params"];
    assert_eq!(fields.len(), 2);
    assert_eq!(fields[0].validators, vec![ValidatorSpec::Required]);
    assert!(fields[1].validators.is_empty());

    let schema_warnings = model
        .diagnostics
        .iter()
        .filter(|d| d.kind == DiagnosticKind::Schema && d.severity == Severity::Warning)
        .count();
    assert_eq!(schema_warnings, 4);
    let route_errors: Vec<_> = model
        .diagnostics
        .iter()
        .filter(|d| d.kind == DiagnosticKind::RouteConfig)
        .collect();
    assert_eq!(route_errors.len(), 1);
    assert_eq!(route_errors[0].location, "Api::a");
    assert!(route_errors[0].is_error());
}
