//! # Validator Module
//!
//! Compiled validation rules and their runtime checks.
//!
//! A field's annotation string (e.g. `required,min=3`) is compiled once by
//! [`compile_rules`] into an ordered list of [`ValidatorSpec`] values. At
//! request time each spec checks the coerced [`FieldValue`] and the first
//! failing spec decides the error message, so token order in the annotation
//! is the order in which failures surface.
//!
//! ```rust
//! use apigen::spec::SemanticType;
//! use apigen::validator::{compile_rules, FieldValue, ValidatorSpec};
//!
//! let (rules, warnings) = compile_rules("min=3,required", SemanticType::String);
//! assert!(warnings.is_empty());
//! assert_eq!(
//!     rules.validators,
//!     vec![ValidatorSpec::StringMin(3), ValidatorSpec::Required]
//! );
//!
//! let err = rules.validators[0]
//!     .validate("login", &FieldValue::Str("ab".into()))
//!     .unwrap_err();
//! assert_eq!(err.to_string(), "login len must be >= 3");
//! ```

mod rules;

pub use rules::{compile_rules, CompiledRules, RuleWarning};

use crate::server::Failure;
use serde::Serialize;
use std::fmt;

/// One compiled check. Each variant carries a payload typed for the values
/// it constrains, so no check ever needs to reinterpret its input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ValidatorSpec {
    /// The string value must be non-empty
    Required,
    /// Minimum string length in bytes (0 disables the check)
    StringMin(usize),
    /// Maximum string length in bytes (0 disables the check)
    StringMax(usize),
    IntMin(i64),
    IntMax(i64),
    /// Allowed values, in annotation order
    Enum(Vec<String>),
}

/// A wire value after coercion to the field's semantic type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Str(String),
    Int(i64),
}

impl FieldValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Str(s) => Some(s),
            FieldValue::Int(_) => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            FieldValue::Int(n) => Some(*n),
            FieldValue::Str(_) => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Str(s) => f.write_str(s),
            FieldValue::Int(n) => write!(f, "{n}"),
        }
    }
}

impl ValidatorSpec {
    /// Check `value`, naming the wire parameter `param` in the failure message.
    ///
    /// A length check never applies to an integer and an integer bound never
    /// applies to a string; the rule compiler only pairs specs with fields of
    /// the matching type. Coerced integers are never empty, so `Required`
    /// always passes for them.
    pub fn validate(&self, param: &str, value: &FieldValue) -> Result<(), Failure> {
        let message = match (self, value) {
            (ValidatorSpec::Required, FieldValue::Str(s)) if s.is_empty() => {
                format!("{param} must be not empty")
            }
            (ValidatorSpec::StringMin(min), FieldValue::Str(s)) if *min > 0 && s.len() < *min => {
                format!("{param} len must be >= {min}")
            }
            (ValidatorSpec::StringMax(max), FieldValue::Str(s)) if *max > 0 && s.len() > *max => {
                format!("{param} must be <= {max}")
            }
            (ValidatorSpec::IntMin(min), FieldValue::Int(n)) if n < min => {
                format!("{param} must be >= {min}")
            }
            (ValidatorSpec::IntMax(max), FieldValue::Int(n)) if n > max => {
                format!("{param} must be <= {max}")
            }
            (ValidatorSpec::Enum(allowed), value) if !enum_allows(allowed, value) => {
                format!("{param} must be one of [{}]", allowed.join(", "))
            }
            _ => return Ok(()),
        };
        Err(Failure::Validation(message))
    }
}

fn enum_allows(allowed: &[String], value: &FieldValue) -> bool {
    match value {
        FieldValue::Str(s) => allowed.iter().any(|a| a == s),
        FieldValue::Int(n) => {
            let text = n.to_string();
            allowed.iter().any(|a| *a == text)
        }
    }
}

impl fmt::Display for ValidatorSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidatorSpec::Required => write!(f, "Required"),
            ValidatorSpec::StringMin(n) => write!(f, "StringMin({n})"),
            ValidatorSpec::StringMax(n) => write!(f, "StringMax({n})"),
            ValidatorSpec::IntMin(n) => write!(f, "IntMin({n})"),
            ValidatorSpec::IntMax(n) => write!(f, "IntMax({n})"),
            ValidatorSpec::Enum(values) => write!(f, "Enum({})", values.join("|")),
        }
    }
}
