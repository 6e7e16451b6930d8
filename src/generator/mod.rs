//! # Generator Module
//!
//! Renders an [`ApiModel`](crate::spec::ApiModel) into a Rust dispatch module.
//!
//! ## Overview
//!
//! ```text
//! source.rs -> spec::load_model -> ApiModel -> templates::render_dispatch -> dispatch.rs
//! ```
//!
//! The emitted module contains, per API type:
//!
//! - a `serve_http_with(&self, &HandlerRequest, &dyn CredentialCheck)`
//!   method that switches on the exact request path, asks the credential
//!   check on `auth: true` routes and checks the request method when one is
//!   configured
//! - a `serve_http(&self, &HandlerRequest)` wrapper that passes the shared
//!   secret from the generator config
//! - one `handle_<handler>` method per route that reads every annotated
//!   field of the params record, calls the handler and wraps its result in
//!   the response envelope
//! - a `LazyLock<Vec<FieldSchema>>` table per route holding the compiled
//!   validators, built once on first use
//!
//! The module expects to be mounted as a child of the module declaring the
//! API types (`use super::*;`), and imports the runtime from
//! [`GeneratorConfig::runtime_crate`](crate::config::GeneratorConfig::runtime_crate).
//!
//! ## Usage
//!
//! ```bash
//! apigen generate --source src/api.rs --output src/api/dispatch.rs
//! ```
//!
//! ## Template
//!
//! Rendering uses the Askama template `templates/dispatch.rs.txt`. Output is
//! parsed with `syn` before it is written, and formatted with `rustfmt` when
//! available.

mod format;
mod naming;
mod output;
mod templates;

pub use format::format_file;
pub use naming::{sanitize_rust_identifier, to_screaming_snake};
pub use output::{write_output, WriteOutcome};
pub use templates::*;

use crate::config::GeneratorConfig;
use crate::spec::{load_model, ApiModel};
use anyhow::Context;
use std::path::{Path, PathBuf};

/// Inputs of one `generate` run.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    pub source: PathBuf,
    pub output: PathBuf,
    pub force: bool,
    /// Render only; never touch the output path
    pub dry_run: bool,
    /// Run `rustfmt` on the written file
    pub format: bool,
}

/// Result of a `generate` run.
#[derive(Debug)]
pub struct GenerateReport {
    pub model: ApiModel,
    pub code: String,
    pub outcome: WriteOutcome,
}

/// Render the model to source text and check that it parses.
pub fn render_checked(model: &ApiModel, options: &RenderOptions) -> anyhow::Result<String> {
    let code = render_dispatch(model, options)?;
    syn::parse_file(&code).context("generated code is not valid Rust")?;
    Ok(code)
}

/// Load `options.source`, render it, and write the result to `options.output`.
///
/// Diagnostics never fail the run; they are on the returned model. A
/// `rustfmt` failure is logged and the unformatted file is kept.
pub fn generate_from_source(
    options: &GenerateOptions,
    config: &GeneratorConfig,
) -> anyhow::Result<GenerateReport> {
    let model = load_model(&options.source, config)?;
    let render_options = RenderOptions::from_config(config, source_label(&options.source));
    let code = render_checked(&model, &render_options)?;

    let outcome = if options.dry_run {
        WriteOutcome::DryRun
    } else {
        write_output(&options.output, &code, options.force)?
    };

    if outcome == WriteOutcome::Written && options.format {
        if let Err(err) = format_file(&options.output) {
            tracing::warn!(error = %err, "rustfmt failed; keeping unformatted output");
        }
    }

    Ok(GenerateReport {
        model,
        code,
        outcome,
    })
}

fn source_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
