//! # Generator Configuration
//!
//! Settings that shape extraction and emission: the marker names recognized
//! in the source description, the crate path generated code imports its
//! runtime from, and the shared-secret credential.
//!
//! Resolution order, later layers winning:
//!
//! 1. built-in defaults
//! 2. a TOML file (`--config`, or `apigen.toml` beside the source file)
//! 3. environment variables
//! 4. CLI flags
//!
//! ```toml
//! route_marker = "apigen:api"
//! validator_attribute = "apivalidator"
//! runtime_crate = "apigen"
//!
//! [auth]
//! header = "X-Auth"
//! token = "100500"
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Field |
//! |---|---|
//! | `APIGEN_ROUTE_MARKER` | `route_marker` |
//! | `APIGEN_VALIDATOR_ATTRIBUTE` | `validator_attribute` |
//! | `APIGEN_RUNTIME_CRATE` | `runtime_crate` |
//! | `APIGEN_AUTH_HEADER` | `auth.header` |
//! | `APIGEN_AUTH_TOKEN` | `auth.token` |
//!
//! `#[derive(ApiParams)]` only registers the default `apivalidator`
//! attribute. Sources using another `validator_attribute` cannot derive it
//! and need their own way to make the attribute legal Rust.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

/// File name looked up beside the source file when no `--config` is given.
pub const CONFIG_FILE_NAME: &str = "apigen.toml";

pub const DEFAULT_ROUTE_MARKER: &str = "apigen:api";
pub const DEFAULT_VALIDATOR_ATTRIBUTE: &str = "apivalidator";
pub const DEFAULT_RUNTIME_CRATE: &str = "apigen";
pub const DEFAULT_AUTH_HEADER: &str = "X-Auth";
pub const DEFAULT_AUTH_TOKEN: &str = "100500";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Doc-comment prefix that marks a handler method
    pub route_marker: String,
    /// Attribute name carrying a field's annotation string. Only the
    /// default is registered by `#[derive(ApiParams)]`.
    pub validator_attribute: String,
    /// Crate path generated code imports its runtime helpers from
    pub runtime_crate: String,
    pub auth: AuthConfig,
}

/// Shared-secret credential checked on `auth: true` routes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub header: String,
    pub token: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            route_marker: DEFAULT_ROUTE_MARKER.to_string(),
            validator_attribute: DEFAULT_VALIDATOR_ATTRIBUTE.to_string(),
            runtime_crate: DEFAULT_RUNTIME_CRATE.to_string(),
            auth: AuthConfig::default(),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        AuthConfig {
            header: DEFAULT_AUTH_HEADER.to_string(),
            token: DEFAULT_AUTH_TOKEN.to_string(),
        }
    }
}

impl GeneratorConfig {
    /// Parse a TOML document. Missing keys keep their defaults.
    pub fn from_toml_str(contents: &str) -> anyhow::Result<Self> {
        toml::from_str(contents).context("Failed to parse generator config")
    }

    /// Load from `path`, or return the defaults when `path` is `None`.
    ///
    /// Environment overrides are not applied here; see [`GeneratorConfig::apply_env`].
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(GeneratorConfig::default());
        };
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read generator config: {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse generator config: {}", path.display()))
    }

    /// Whether `#[derive(ApiParams)]` registers the configured attribute.
    pub fn derive_registers_attribute(&self) -> bool {
        self.validator_attribute == DEFAULT_VALIDATOR_ATTRIBUTE
    }

    /// Override fields from `APIGEN_*` environment variables that are set and non-empty.
    pub fn apply_env(&mut self) {
        self.apply_overrides(|key| env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let fields: [(&str, &mut String); 5] = [
            ("APIGEN_ROUTE_MARKER", &mut self.route_marker),
            ("APIGEN_VALIDATOR_ATTRIBUTE", &mut self.validator_attribute),
            ("APIGEN_RUNTIME_CRATE", &mut self.runtime_crate),
            ("APIGEN_AUTH_HEADER", &mut self.auth.header),
            ("APIGEN_AUTH_TOKEN", &mut self.auth.token),
        ];
        for (key, field) in fields {
            if let Some(value) = lookup(key).filter(|v| !v.is_empty()) {
                tracing::debug!(key, "config override from environment");
                *field = value;
            }
        }
    }
}

/// Resolve the config file path
///
/// Priority:
/// 1. Explicitly provided path (via CLI), which must exist
/// 2. `apigen.toml` beside the source file
/// 3. None (defaults)
pub fn resolve_config_path(
    explicit_path: Option<&Path>,
    source_path: &Path,
) -> anyhow::Result<Option<PathBuf>> {
    if let Some(path) = explicit_path {
        anyhow::ensure!(path.exists(), "Config file not found: {}", path.display());
        return Ok(Some(path.to_path_buf()));
    }
    let candidate = source_path.parent().map(|dir| dir.join(CONFIG_FILE_NAME));
    Ok(candidate.filter(|p| p.exists()))
}
