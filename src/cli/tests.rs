//! Unit tests for CLI commands

use crate::cli::{render_route_table, Cli, Commands};
use crate::config::GeneratorConfig;
use crate::spec::{build_model, parse_source};
use clap::Parser;

#[test]
fn test_generate_command_with_flags() {
    let cli = Cli::try_parse_from([
        "apigen",
        "generate",
        "--source",
        "api.rs",
        "--output",
        "out/dispatch.rs",
        "--force",
        "--no-fmt",
    ])
    .unwrap();

    match cli.command {
        Commands::Generate {
            source,
            output,
            force,
            dry_run,
            no_fmt,
        } => {
            assert_eq!(source.to_string_lossy(), "api.rs");
            assert_eq!(output.to_string_lossy(), "out/dispatch.rs");
            assert!(force);
            assert!(!dry_run);
            assert!(no_fmt);
        }
        _ => panic!("Expected Generate command"),
    }
}

#[test]
fn test_generate_requires_output() {
    assert!(Cli::try_parse_from(["apigen", "generate", "--source", "api.rs"]).is_err());
}

#[test]
fn test_lint_command_with_flags() {
    let cli = Cli::try_parse_from([
        "apigen",
        "lint",
        "--source",
        "api.rs",
        "--fail-on-error",
        "--errors-only",
    ])
    .unwrap();

    match cli.command {
        Commands::Lint {
            source,
            fail_on_error,
            errors_only,
        } => {
            assert_eq!(source.to_string_lossy(), "api.rs");
            assert!(fail_on_error);
            assert!(errors_only);
        }
        _ => panic!("Expected Lint command"),
    }
}

#[test]
fn test_global_flags_after_subcommand() {
    let cli = Cli::try_parse_from([
        "apigen",
        "inspect",
        "-s",
        "api.rs",
        "--json",
        "-vv",
        "--config",
        "custom.toml",
    ])
    .unwrap();

    assert_eq!(cli.verbose, 2);
    assert_eq!(cli.config.unwrap().to_string_lossy(), "custom.toml");
    match cli.command {
        Commands::Inspect { json, .. } => assert!(json),
        _ => panic!("Expected Inspect command"),
    }
}

#[test]
fn test_render_route_table() {
    let source = parse_source(
        "api.rs",
        r#"
        pub struct CreateParams {
            #[apivalidator("required,min=3")]
            pub login: String,
            #[apivalidator("enum=user|admin,default=user")]
            pub role: String,
        }

        impl MyApi {
            /// apigen:api {"url": "/user/create", "auth": true, "method": "POST"}
            fn create(&self, ctx: &RequestContext, p: &CreateParams) -> Result<(), ApiError> {
                todo!()
            }
        }

        impl OtherApi {
            /// apigen:api {"url": "/ping"}
            fn ping(&self, ctx: &RequestContext, p: Empty) -> Result<(), ApiError> {
                todo!()
            }
        }
        "#,
    )
    .unwrap();
    let model = build_model(&source, &GeneratorConfig::default());
    let table = render_route_table(&model);

    let my_api = table.find("MyApi").unwrap();
    let other_api = table.find("OtherApi").unwrap();
    assert!(my_api < other_api);
    assert!(table.contains("POST   /user/create -> create(CreateParams) [auth]"));
    assert!(table.contains("login: string [Required, StringMin(3)]"));
    assert!(table.contains("role: string [Enum(user|admin)] default=user"));
    assert!(table.contains("ANY    /ping -> ping(Empty)"));
}

#[test]
fn test_render_empty_route_table() {
    let source = parse_source("api.rs", "struct Nothing;").unwrap();
    let model = build_model(&source, &GeneratorConfig::default());
    assert_eq!(render_route_table(&model), "no routes found\n");
}
