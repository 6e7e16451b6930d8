use super::types::{FieldSchema, SchemaTable, SemanticType};
use crate::config::GeneratorConfig;
use crate::diagnostics::{record, Diagnostic, DiagnosticKind, Severity};
use crate::validator::compile_rules;
use quote::ToTokens;
use syn::ext::IdentExt;
use syn::{Attribute, Expr, ExprLit, Fields, Item, ItemStruct, Lit, LitStr, Meta, Type};

/// Collect the annotated fields of every struct in `file`.
///
/// Structs nested in inline `mod` blocks are included. Only structs with at
/// least one usable annotated field appear in the table.
pub fn extract_schemas(
    file: &syn::File,
    config: &GeneratorConfig,
    diagnostics: &mut Vec<Diagnostic>,
) -> SchemaTable {
    let mut table = SchemaTable::new();
    walk_items(&file.items, config, &mut table, diagnostics);
    table
}

fn walk_items(
    items: &[Item],
    config: &GeneratorConfig,
    table: &mut SchemaTable,
    diagnostics: &mut Vec<Diagnostic>,
) {
    for item in items {
        match item {
            Item::Struct(item_struct) => {
                let name = item_struct.ident.unraw().to_string();
                let fields = extract_struct(item_struct, &name, config, diagnostics);
                if fields.is_empty() {
                    continue;
                }
                if table.contains_key(&name) {
                    record(
                        diagnostics,
                        Diagnostic::new(
                            &name,
                            Severity::Warning,
                            DiagnosticKind::Schema,
                            "record declared more than once; the first declaration is used",
                        ),
                    );
                    continue;
                }
                tracing::debug!(record = %name, fields = fields.len(), "extracted schema");
                table.insert(name, fields);
            }
            Item::Mod(module) => {
                if let Some((_, nested)) = &module.content {
                    walk_items(nested, config, table, diagnostics);
                }
            }
            _ => {}
        }
    }
}

fn extract_struct(
    item: &ItemStruct,
    record_name: &str,
    config: &GeneratorConfig,
    diagnostics: &mut Vec<Diagnostic>,
) -> Vec<FieldSchema> {
    let Fields::Named(named) = &item.fields else {
        return Vec::new();
    };

    let mut fields = Vec::new();
    for field in &named.named {
        let Some(ident) = &field.ident else { continue };
        let field_name = ident.unraw().to_string();
        let location = format!("{record_name}.{field_name}");

        let Some(attr) = find_attribute(&field.attrs, &config.validator_attribute) else {
            continue;
        };
        let annotation = match annotation_text(attr) {
            Some(text) => text,
            None => {
                record(
                    diagnostics,
                    Diagnostic::new(
                        &location,
                        Severity::Warning,
                        DiagnosticKind::Schema,
                        format!("`{}` expects a single string literal", config.validator_attribute),
                    )
                    .with_suggestion(format!(
                        "write #[{}(\"required,min=3\")]",
                        config.validator_attribute
                    )),
                );
                continue;
            }
        };
        if annotation.trim().is_empty() {
            continue;
        }

        let Some((semantic_type, rust_type)) = semantic_type_of(&field.ty) else {
            record(
                diagnostics,
                Diagnostic::new(
                    &location,
                    Severity::Warning,
                    DiagnosticKind::Schema,
                    format!(
                        "unsupported field type `{}`; field is not parsed",
                        field.ty.to_token_stream()
                    ),
                )
                .with_suggestion("use `String` or an integer primitive"),
            );
            continue;
        };

        let (rules, warnings) = compile_rules(&annotation, semantic_type);
        for warning in warnings {
            record(
                diagnostics,
                Diagnostic::new(
                    &location,
                    Severity::Warning,
                    DiagnosticKind::Schema,
                    format!("`{}` ignored: {}", warning.token, warning.message),
                ),
            );
        }

        fields.push(FieldSchema {
            name: field_name,
            semantic_type,
            rust_type,
            validators: rules.validators,
            param_rename: rules.param_rename,
            default_value: rules.default_value,
        });
    }
    fields
}

fn find_attribute<'a>(attrs: &'a [Attribute], name: &str) -> Option<&'a Attribute> {
    attrs.iter().find(|attr| attr.path().is_ident(name))
}

/// Annotation string of `#[attr("...")]` or `#[attr = "..."]`.
fn annotation_text(attr: &Attribute) -> Option<String> {
    match &attr.meta {
        Meta::List(_) => attr.parse_args::<LitStr>().ok().map(|lit| lit.value()),
        Meta::NameValue(nv) => match &nv.value {
            Expr::Lit(ExprLit {
                lit: Lit::Str(lit), ..
            }) => Some(lit.value()),
            _ => None,
        },
        Meta::Path(_) => None,
    }
}

/// Semantic type and declared type name of a plain, non-generic path type.
fn semantic_type_of(ty: &Type) -> Option<(SemanticType, String)> {
    let Type::Path(type_path) = ty else {
        return None;
    };
    if type_path.qself.is_some() {
        return None;
    }
    let segment = type_path.path.segments.last()?;
    if !segment.arguments.is_none() {
        return None;
    }
    let name = segment.ident.to_string();
    SemanticType::from_type_name(&name).map(|semantic| (semantic, name))
}
