//! # Diagnostics
//!
//! Non-fatal findings collected while building the API model from a source
//! description. A diagnostic never aborts the compiler; the affected field or
//! handler is skipped and the build continues.
//!
//! ```rust
//! use apigen::diagnostics::{Diagnostic, DiagnosticKind, Severity};
//!
//! let diag = Diagnostic::new(
//!     "CreateParams.tags",
//!     Severity::Warning,
//!     DiagnosticKind::Schema,
//!     "unsupported field type `Vec<String>`",
//! )
//! .with_suggestion("use `String` or an integer type");
//! assert!(!diag.is_error());
//! ```

use serde::Serialize;
use std::fmt;

/// Severity level for a diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// The declaration was rejected and is missing from the generated code
    Error,
    /// Part of a declaration was ignored
    Warning,
    /// Nothing was dropped, but the result may be surprising
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
        }
    }
}

/// Which extraction pass produced the diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// A record field or annotation token was skipped
    Schema,
    /// A handler's route marker or signature was rejected
    RouteConfig,
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticKind::Schema => write!(f, "schema"),
            DiagnosticKind::RouteConfig => write!(f, "route_config"),
        }
    }
}

/// A non-fatal finding about one declaration in the source description
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Where the issue occurred (e.g., `CreateParams.age`, `MyApi::create`)
    pub location: String,
    pub severity: Severity,
    pub kind: DiagnosticKind,
    /// Human-readable description of the problem
    pub message: String,
    /// Optional hint for fixing the declaration
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl Diagnostic {
    pub fn new(
        location: impl Into<String>,
        severity: Severity,
        kind: DiagnosticKind,
        message: impl Into<String>,
    ) -> Self {
        Diagnostic {
            location: location.into(),
            severity,
            kind,
            message: message.into(),
            suggestion: None,
        }
    }

    /// Add a suggestion for fixing the issue
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    /// Emit the diagnostic through `tracing` at a level matching its severity.
    pub fn log(&self) {
        match self.severity {
            Severity::Error | Severity::Warning => tracing::warn!(
                location = %self.location,
                kind = %self.kind,
                severity = %self.severity,
                "{}",
                self.message
            ),
            Severity::Info => tracing::info!(
                location = %self.location,
                kind = %self.kind,
                "{}",
                self.message
            ),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.severity, self.location, self.message)?;
        if let Some(suggestion) = &self.suggestion {
            write!(f, " (hint: {suggestion})")?;
        }
        Ok(())
    }
}

/// Log a diagnostic and append it to the collection.
pub(crate) fn record(diagnostics: &mut Vec<Diagnostic>, diagnostic: Diagnostic) {
    diagnostic.log();
    diagnostics.push(diagnostic);
}

/// Print diagnostics to stderr, grouped by severity (errors first).
pub fn print_diagnostics(diagnostics: &[Diagnostic], errors_only: bool) {
    let mut sorted: Vec<&Diagnostic> = diagnostics
        .iter()
        .filter(|d| !errors_only || d.is_error())
        .collect();
    sorted.sort_by_key(|d| d.severity);

    if sorted.is_empty() {
        eprintln!("✅ No issues found");
        return;
    }
    for diagnostic in &sorted {
        eprintln!("{diagnostic}");
    }
    let errors = sorted.iter().filter(|d| d.is_error()).count();
    eprintln!(
        "\n{} issue(s) found, {} error(s)",
        sorted.len(),
        errors
    );
}
