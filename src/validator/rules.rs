//! Annotation string compiler.
//!
//! Grammar (comma-separated tokens, closed vocabulary):
//!
//! ```text
//! annotation := token ("," token)*
//! token      := "required"
//!             | "min=" INT | "max=" INT
//!             | "enum=" VALUE ("|" VALUE)*
//!             | "default=" VALUE
//!             | "paramname=" NAME
//! ```
//!
//! Tokens are classified by their key (the text before the first `=`), so a
//! `default=` token is found wherever it sits in the string. Unknown tokens
//! are dropped without comment.

use crate::spec::SemanticType;
use crate::validator::ValidatorSpec;

/// Output of compiling one field's annotation string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompiledRules {
    /// Checks in annotation order
    pub validators: Vec<ValidatorSpec>,
    /// Explicit wire key; replaces the lower-cased field name when set
    pub param_rename: Option<String>,
    /// Value assigned when the wire value is empty; only kept alongside an enum
    pub default_value: Option<String>,
}

/// A recognized token that had to be dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleWarning {
    pub token: String,
    pub message: String,
}

impl RuleWarning {
    fn new(token: &str, message: impl Into<String>) -> Self {
        RuleWarning {
            token: token.to_string(),
            message: message.into(),
        }
    }
}

enum Token<'a> {
    Required,
    Min(&'a str),
    Max(&'a str),
    Enum(&'a str),
    Default(&'a str),
    ParamName(&'a str),
    Unknown,
}

fn classify(token: &str) -> Token<'_> {
    match token.split_once('=') {
        None if token == "required" => Token::Required,
        None => Token::Unknown,
        Some((key, value)) => {
            let value = value.trim();
            match key.trim() {
                "min" => Token::Min(value),
                "max" => Token::Max(value),
                "enum" => Token::Enum(value),
                "default" => Token::Default(value),
                "paramname" => Token::ParamName(value),
                _ => Token::Unknown,
            }
        }
    }
}

/// Compile an annotation string for a field of type `ty`.
///
/// Returns the compiled rules and a warning for every recognized token that
/// could not be used (unparseable limit, enum on an integer field, default
/// without an enum, ...). Warnings never stop compilation.
pub fn compile_rules(annotation: &str, ty: SemanticType) -> (CompiledRules, Vec<RuleWarning>) {
    let mut rules = CompiledRules::default();
    let mut warnings = Vec::new();
    let mut default_token = None;

    for token in annotation.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        match classify(token) {
            Token::Required => rules.validators.push(ValidatorSpec::Required),
            Token::Min(limit) => match limit_spec(limit, ty, true) {
                Ok(spec) => rules.validators.push(spec),
                Err(message) => warnings.push(RuleWarning::new(token, message)),
            },
            Token::Max(limit) => match limit_spec(limit, ty, false) {
                Ok(spec) => rules.validators.push(spec),
                Err(message) => warnings.push(RuleWarning::new(token, message)),
            },
            Token::Enum(values) => {
                if ty != SemanticType::String {
                    warnings.push(RuleWarning::new(
                        token,
                        format!("enum applies to string fields only, not {ty}"),
                    ));
                } else if values.is_empty() {
                    warnings.push(RuleWarning::new(token, "enum lists no values"));
                } else {
                    let allowed = values.split('|').map(str::to_string).collect();
                    rules.validators.push(ValidatorSpec::Enum(allowed));
                }
            }
            Token::Default(value) if value.is_empty() => {
                warnings.push(RuleWarning::new(token, "default has no value"));
            }
            Token::Default(value) => default_token = Some((token, value)),
            Token::ParamName(name) if name.is_empty() => {
                warnings.push(RuleWarning::new(token, "paramname has no value"));
            }
            Token::ParamName(name) => rules.param_rename = Some(name.to_string()),
            Token::Unknown => tracing::debug!(token, "ignoring unknown annotation token"),
        }
    }

    if let Some((token, value)) = default_token {
        let has_enum = rules
            .validators
            .iter()
            .any(|v| matches!(v, ValidatorSpec::Enum(_)));
        if has_enum {
            rules.default_value = Some(value.to_string());
        } else {
            warnings.push(RuleWarning::new(
                token,
                "default is only applied together with enum",
            ));
        }
    }

    (rules, warnings)
}

fn limit_spec(limit: &str, ty: SemanticType, is_min: bool) -> Result<ValidatorSpec, String> {
    match ty {
        SemanticType::String => {
            let len: usize = limit
                .parse()
                .map_err(|_| format!("length limit `{limit}` is not a non-negative integer"))?;
            Ok(if is_min {
                ValidatorSpec::StringMin(len)
            } else {
                ValidatorSpec::StringMax(len)
            })
        }
        SemanticType::Int => {
            let bound: i64 = limit
                .parse()
                .map_err(|_| format!("bound `{limit}` is not an integer"))?;
            Ok(if is_min {
                ValidatorSpec::IntMin(bound)
            } else {
                ValidatorSpec::IntMax(bound)
            })
        }
    }
}
