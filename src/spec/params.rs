use super::types::{FieldSchema, SemanticType};
use crate::validator::compile_rules;

/// One annotated field, as recorded by `#[derive(ApiParams)]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamAnnotation {
    /// Field identifier without any `r#` prefix
    pub field: &'static str,
    /// Declared type, as written
    pub rust_type: &'static str,
    pub annotation: &'static str,
}

/// A params record whose field annotations are known at compile time.
///
/// Implemented by `#[derive(ApiParams)]`, which also registers the
/// `apivalidator` field attribute.
pub trait ApiParams: Default {
    const ANNOTATIONS: &'static [ParamAnnotation];

    /// Compile the recorded annotations the same way the schema extractor
    /// does. Fields with unsupported types and empty annotations are left out.
    fn field_schemas() -> Vec<FieldSchema> {
        Self::ANNOTATIONS
            .iter()
            .filter(|a| !a.annotation.trim().is_empty())
            .filter_map(|a| {
                // `std::string::String` tokenizes as `std :: string :: String`
                let type_name = a.rust_type.rsplit("::").next().unwrap_or(a.rust_type).trim();
                let semantic_type = SemanticType::from_type_name(type_name)?;
                let (rules, warnings) = compile_rules(a.annotation, semantic_type);
                for warning in warnings {
                    tracing::debug!(field = a.field, token = %warning.token, "{}", warning.message);
                }
                Some(FieldSchema {
                    name: a.field.to_string(),
                    semantic_type,
                    rust_type: type_name.to_string(),
                    validators: rules.validators,
                    param_rename: rules.param_rename,
                    default_value: rules.default_value,
                })
            })
            .collect()
    }
}
