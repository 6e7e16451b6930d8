use crate::config::{resolve_config_path, GeneratorConfig};
use crate::diagnostics::print_diagnostics;
use crate::generator::{generate_from_source, GenerateOptions, WriteOutcome};
use crate::logging::{init_logging, LogConfig};
use crate::spec::{load_model, ApiModel};
use anyhow::Context;
use clap::{Parser, Subcommand};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

/// Command-line interface for apigen
///
/// Compiles annotated API declarations into request-dispatch code.
#[derive(Parser, Debug)]
#[command(name = "apigen")]
#[command(about = "Generate request dispatch and validation code from annotated Rust APIs", long_about = None)]
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Generator config file (default: apigen.toml beside the source file)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate the dispatch module for an annotated source file
    Generate {
        /// Annotated Rust source file
        #[arg(short, long)]
        source: PathBuf,

        /// Output file for the generated module
        #[arg(short, long)]
        output: PathBuf,

        /// Overwrite the output file if it exists
        #[arg(short, long, default_value_t = false)]
        force: bool,

        /// Print the generated code to stdout without writing files
        #[arg(long, default_value_t = false)]
        dry_run: bool,

        /// Do not run rustfmt on the generated file
        #[arg(long, default_value_t = false)]
        no_fmt: bool,
    },
    /// Report diagnostics for an annotated source file
    ///
    /// Checks route markers, handler signatures, validator annotations and
    /// the join between handlers and their params records.
    Lint {
        /// Annotated Rust source file
        #[arg(short, long)]
        source: PathBuf,

        /// Exit with error code if any errors are found
        #[arg(long, default_value_t = false)]
        fail_on_error: bool,

        /// Show only errors (hide warnings and info)
        #[arg(long, default_value_t = false)]
        errors_only: bool,
    },
    /// Print the route table and compiled validators
    Inspect {
        /// Annotated Rust source file
        #[arg(short, long)]
        source: PathBuf,

        /// Emit the model as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

impl Commands {
    fn source(&self) -> &Path {
        match self {
            Commands::Generate { source, .. }
            | Commands::Lint { source, .. }
            | Commands::Inspect { source, .. } => source,
        }
    }
}

/// Parse the process arguments and run the selected command.
pub fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();
    // A subscriber may already be installed when embedded; keep that one.
    let _ = init_logging(&LogConfig::from_env().with_verbosity(cli.verbose));
    run(&cli)
}

/// Run a parsed command line.
pub fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = load_config(cli)?;

    match &cli.command {
        Commands::Generate {
            source,
            output,
            force,
            dry_run,
            no_fmt,
        } => {
            let options = GenerateOptions {
                source: source.clone(),
                output: output.clone(),
                force: *force,
                dry_run: *dry_run,
                format: !*no_fmt,
            };
            let report = generate_from_source(&options, &config)?;
            match report.outcome {
                WriteOutcome::DryRun => print!("{}", report.code),
                WriteOutcome::Written => eprintln!(
                    "✅ Generated {} handler(s) into {}",
                    report.model.routes.len(),
                    output.display()
                ),
                WriteOutcome::SkippedExisting => eprintln!(
                    "⚠️  {} exists; pass --force to overwrite",
                    output.display()
                ),
            }
            Ok(())
        }
        Commands::Lint {
            source,
            fail_on_error,
            errors_only,
        } => {
            let model = load_model(source, &config)?;
            print_diagnostics(&model.diagnostics, *errors_only);
            if *fail_on_error && model.has_errors() {
                let errors = model.diagnostics.iter().filter(|d| d.is_error()).count();
                anyhow::bail!("lint found {errors} error(s) in {}", source.display());
            }
            Ok(())
        }
        Commands::Inspect { source, json } => {
            let model = load_model(source, &config)?;
            if *json {
                let text =
                    serde_json::to_string_pretty(&model).context("Failed to serialize model")?;
                println!("{text}");
            } else {
                print!("{}", render_route_table(&model));
            }
            Ok(())
        }
    }
}

fn load_config(cli: &Cli) -> anyhow::Result<GeneratorConfig> {
    let path = resolve_config_path(cli.config.as_deref(), cli.command.source())?;
    if let Some(path) = &path {
        tracing::debug!(config = %path.display(), "loading generator config");
    }
    let mut config = GeneratorConfig::load(path.as_deref())?;
    config.apply_env();
    if !config.derive_registers_attribute() {
        tracing::warn!(
            attribute = %config.validator_attribute,
            "#[derive(ApiParams)] only registers `apivalidator`; sources using this attribute cannot derive it"
        );
    }
    Ok(config)
}

/// Human-readable listing of every route and its field rules.
pub fn render_route_table(model: &ApiModel) -> String {
    let mut out = String::new();
    if model.routes.is_empty() {
        out.push_str("no routes found\n");
        return out;
    }
    for (api, handlers) in model.routes.iter() {
        let _ = writeln!(out, "{api}");
        for handler in handlers {
            let method = if handler.route.method.is_empty() {
                "ANY"
            } else {
                handler.route.method.as_str()
            };
            let auth = if handler.route.auth { " [auth]" } else { "" };
            let _ = writeln!(
                out,
                "  {method:<6} {} -> {}({}){auth}",
                handler.route.url, handler.handler_name, handler.schema_name
            );
            for field in model.fields_for(handler) {
                let rules: Vec<String> = field.validators.iter().map(ToString::to_string).collect();
                let _ = write!(
                    out,
                    "      {}: {}",
                    field.wire_key(),
                    field.semantic_type
                );
                if !rules.is_empty() {
                    let _ = write!(out, " [{}]", rules.join(", "));
                }
                if let Some(default) = &field.default_value {
                    let _ = write!(out, " default={default}");
                }
                out.push('\n');
            }
        }
    }
    out
}
