//! # CLI Module
//!
//! Command-line front end of the `apigen` binary.
//!
//! ## Commands
//!
//! ### `generate`
//!
//! Render the dispatch module for an annotated source file:
//!
//! ```bash
//! apigen generate --source src/api.rs --output src/api/dispatch.rs
//! ```
//!
//! Options:
//! - `--source <FILE>` - annotated Rust source (required)
//! - `--output <FILE>` - file to write (required)
//! - `--force` - overwrite an existing output file
//! - `--dry-run` - print the generated code to stdout instead of writing it
//! - `--no-fmt` - skip `rustfmt` on the written file
//!
//! ### `lint`
//!
//! Report extraction diagnostics without generating anything:
//!
//! ```bash
//! apigen lint --source src/api.rs --fail-on-error
//! ```
//!
//! ### `inspect`
//!
//! Print the route table and compiled validators:
//!
//! ```bash
//! apigen inspect --source src/api.rs --json
//! ```
//!
//! ## Global Options
//!
//! - `-v`, `-vv` - raise the log level to debug / trace
//! - `--config <FILE>` - generator config; defaults to `apigen.toml` beside the source

mod commands;

#[cfg(test)]
mod tests;

pub use commands::{render_route_table, run, run_cli, Cli, Commands};
