use crate::diagnostics::{Diagnostic, Severity};
use crate::validator::ValidatorSpec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Runtime type a field's wire value is coerced to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SemanticType {
    String,
    Int,
}

/// Rust integer primitives accepted as `Int` fields.
pub const INT_TYPE_NAMES: [&str; 12] = [
    "i8", "i16", "i32", "i64", "i128", "isize", "u8", "u16", "u32", "u64", "u128", "usize",
];

impl SemanticType {
    /// Map a declared type name to its semantic type, if supported.
    pub fn from_type_name(name: &str) -> Option<Self> {
        match name {
            "String" => Some(SemanticType::String),
            n if INT_TYPE_NAMES.contains(&n) => Some(SemanticType::Int),
            _ => None,
        }
    }
}

impl fmt::Display for SemanticType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SemanticType::String => write!(f, "string"),
            SemanticType::Int => write!(f, "int"),
        }
    }
}

/// Compiled validation schema for one annotated record field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldSchema {
    /// Field identifier as declared (without any `r#` prefix)
    pub name: String,
    pub semantic_type: SemanticType,
    /// Declared type name, e.g. `String` or `u32`
    pub rust_type: String,
    pub validators: Vec<ValidatorSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub param_rename: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
}

impl FieldSchema {
    pub fn new(name: impl Into<String>, semantic_type: SemanticType) -> Self {
        let rust_type = match semantic_type {
            SemanticType::String => "String",
            SemanticType::Int => "i64",
        };
        FieldSchema {
            name: name.into(),
            semantic_type,
            rust_type: rust_type.to_string(),
            validators: Vec::new(),
            param_rename: None,
            default_value: None,
        }
    }

    pub fn with_rust_type(mut self, rust_type: impl Into<String>) -> Self {
        self.rust_type = rust_type.into();
        self
    }

    pub fn with_validators(mut self, validators: Vec<ValidatorSpec>) -> Self {
        self.validators = validators;
        self
    }

    pub fn renamed(mut self, wire_key: impl Into<String>) -> Self {
        self.param_rename = Some(wire_key.into());
        self
    }

    pub fn with_default(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    /// Whether `value` fits the declared integer type. Unknown type names
    /// accept any `i64`.
    pub fn fits_declared_int(&self, value: i64) -> bool {
        let (min, max): (i128, i128) = match self.rust_type.as_str() {
            "i8" => (i8::MIN.into(), i8::MAX.into()),
            "i16" => (i16::MIN.into(), i16::MAX.into()),
            "i32" => (i32::MIN.into(), i32::MAX.into()),
            "isize" => (isize::MIN as i128, isize::MAX as i128),
            "u8" => (0, u8::MAX.into()),
            "u16" => (0, u16::MAX.into()),
            "u32" => (0, u32::MAX.into()),
            "usize" => (0, usize::MAX as i128),
            "u64" | "u128" => (0, i128::MAX),
            _ => return true,
        };
        (min..=max).contains(&i128::from(value))
    }

    /// Key the value is read from: the rename when present, otherwise the
    /// lower-cased field name.
    pub fn wire_key(&self) -> String {
        match &self.param_rename {
            Some(rename) => rename.clone(),
            None => self.name.to_lowercase(),
        }
    }
}

/// Routing options parsed from a handler's marker payload.
///
/// ```rust
/// use apigen::spec::RouteConfig;
///
/// let route: RouteConfig = serde_json::from_str(r#"{"url": "/user/profile"}"#).unwrap();
/// assert!(!route.auth);
/// assert!(route.method.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteConfig {
    pub url: String,
    #[serde(default)]
    pub auth: bool,
    /// Required request method; empty accepts any method
    #[serde(default)]
    pub method: String,
}

/// One routed handler method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HandlerSchema {
    /// Owning type name; generated dispatch methods attach to it
    pub api_name: String,
    /// Handler method name, as declared
    pub handler_name: String,
    /// Type name of the params record
    pub schema_name: String,
    /// The handler takes `&Params` rather than `Params`
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub params_by_ref: bool,
    pub route: RouteConfig,
}

impl HandlerSchema {
    /// `Api::handler`, used as a diagnostic and log location.
    pub fn location(&self) -> String {
        format!("{}::{}", self.api_name, self.handler_name)
    }
}

/// Handlers grouped by API name.
///
/// Groups iterate in lexicographic API-name order; handlers inside a group
/// keep declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RouteTable {
    apis: BTreeMap<String, Vec<HandlerSchema>>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, handler: HandlerSchema) {
        self.apis
            .entry(handler.api_name.clone())
            .or_default()
            .push(handler);
    }

    /// API names with at least one handler.
    pub fn apis(&self) -> impl Iterator<Item = &str> {
        self.apis.keys().map(String::as_str)
    }

    pub fn handlers(&self, api: &str) -> &[HandlerSchema] {
        self.apis.get(api).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[HandlerSchema])> {
        self.apis.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// First handler of `api` routed at `path`.
    pub fn find(&self, api: &str, path: &str) -> Option<&HandlerSchema> {
        self.handlers(api).iter().find(|h| h.route.url == path)
    }

    /// Total number of handlers across all APIs.
    pub fn len(&self) -> usize {
        self.apis.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.apis.is_empty()
    }
}

/// Record name to annotated fields in declaration order.
pub type SchemaTable = BTreeMap<String, Vec<FieldSchema>>;

/// Everything the renderers need: routes, field schemas, and the
/// diagnostics collected while building them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ApiModel {
    pub routes: RouteTable,
    pub schemas: SchemaTable,
    pub diagnostics: Vec<Diagnostic>,
}

impl ApiModel {
    /// Fields of the handler's params record; empty when the record has none.
    pub fn fields_for(&self, handler: &HandlerSchema) -> &[FieldSchema] {
        self.schemas
            .get(&handler.schema_name)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error)
    }
}
