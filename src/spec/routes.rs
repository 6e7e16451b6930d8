use super::types::{HandlerSchema, RouteConfig};
use crate::config::GeneratorConfig;
use crate::diagnostics::{record, Diagnostic, DiagnosticKind, Severity};
use quote::ToTokens;
use syn::ext::IdentExt;
use syn::{Attribute, Expr, ExprLit, FnArg, ImplItem, ImplItemFn, Item, ItemImpl, Lit, Meta, Type};

/// Collect every handler method carrying the route marker, in declaration order.
///
/// Only inherent `impl` blocks are scanned; methods in trait impls are
/// ignored. A marked method that cannot be routed is reported as an
/// error-severity diagnostic and left out.
pub fn extract_routes(
    file: &syn::File,
    config: &GeneratorConfig,
    diagnostics: &mut Vec<Diagnostic>,
) -> Vec<HandlerSchema> {
    let mut handlers = Vec::new();
    walk_items(&file.items, config, &mut handlers, diagnostics);
    handlers
}

fn walk_items(
    items: &[Item],
    config: &GeneratorConfig,
    handlers: &mut Vec<HandlerSchema>,
    diagnostics: &mut Vec<Diagnostic>,
) {
    for item in items {
        match item {
            Item::Impl(item_impl) if item_impl.trait_.is_none() => {
                extract_impl(item_impl, config, handlers, diagnostics);
            }
            Item::Mod(module) => {
                if let Some((_, nested)) = &module.content {
                    walk_items(nested, config, handlers, diagnostics);
                }
            }
            _ => {}
        }
    }
}

fn extract_impl(
    item: &ItemImpl,
    config: &GeneratorConfig,
    handlers: &mut Vec<HandlerSchema>,
    diagnostics: &mut Vec<Diagnostic>,
) {
    let api_name = plain_type_name(&item.self_ty);

    for impl_item in &item.items {
        let ImplItem::Fn(method) = impl_item else {
            continue;
        };
        let Some(payload) = route_payload(&method.attrs, &config.route_marker) else {
            continue;
        };
        let handler_name = method.sig.ident.unraw().to_string();
        let location = match &api_name {
            Some(api) => format!("{api}::{handler_name}"),
            None => format!("{}::{handler_name}", item.self_ty.to_token_stream()),
        };

        let result = api_name
            .clone()
            .ok_or_else(|| "handlers must be declared on a plain named type".to_string())
            .and_then(|api| {
                if item.generics.params.is_empty() {
                    Ok(api)
                } else {
                    Err("handlers in generic impl blocks are not supported".to_string())
                }
            })
            .and_then(|api| {
                let route = parse_route(&payload)?;
                let (schema_name, params_by_ref) = params_type(method)?;
                Ok(HandlerSchema {
                    api_name: api,
                    handler_name: handler_name.clone(),
                    schema_name,
                    params_by_ref,
                    route,
                })
            });

        match result {
            Ok(handler) => {
                tracing::debug!(
                    handler = %handler.location(),
                    url = %handler.route.url,
                    schema = %handler.schema_name,
                    "extracted route"
                );
                handlers.push(handler);
            }
            Err(message) => record(
                diagnostics,
                Diagnostic::new(location, Severity::Error, DiagnosticKind::RouteConfig, message),
            ),
        }
    }
}

/// Text following the marker on the first doc line that starts with it.
fn route_payload(attrs: &[Attribute], marker: &str) -> Option<String> {
    attrs
        .iter()
        .filter_map(doc_text)
        .flat_map(|doc| {
            doc.lines()
                .map(|line| line.trim().to_string())
                .collect::<Vec<_>>()
        })
        .find_map(|line| line.strip_prefix(marker).map(|rest| rest.trim().to_string()))
}

fn doc_text(attr: &Attribute) -> Option<String> {
    if !attr.path().is_ident("doc") {
        return None;
    }
    match &attr.meta {
        Meta::NameValue(nv) => match &nv.value {
            Expr::Lit(ExprLit {
                lit: Lit::Str(lit), ..
            }) => Some(lit.value()),
            _ => None,
        },
        _ => None,
    }
}

fn parse_route(payload: &str) -> Result<RouteConfig, String> {
    let route: RouteConfig =
        serde_json::from_str(payload).map_err(|err| format!("malformed route config: {err}"))?;
    if route.url.is_empty() {
        return Err("route url must not be empty".to_string());
    }
    if !route.method.is_empty() && http::Method::from_bytes(route.method.as_bytes()).is_err() {
        return Err(format!("`{}` is not a valid request method", route.method));
    }
    Ok(route)
}

/// Type name of the params record (the second non-receiver parameter) and
/// whether it is taken by reference.
fn params_type(method: &ImplItemFn) -> Result<(String, bool), String> {
    let sig = &method.sig;
    if sig.asyncness.is_some() {
        return Err("async handlers are not supported".to_string());
    }
    if sig.receiver().is_none() {
        return Err("handler must take `&self`".to_string());
    }
    let params: Vec<&Type> = sig
        .inputs
        .iter()
        .filter_map(|arg| match arg {
            FnArg::Typed(pat) => Some(pat.ty.as_ref()),
            FnArg::Receiver(_) => None,
        })
        .collect();
    let Some(params_ty) = params.get(1) else {
        return Err("handler must take a context and a params record".to_string());
    };
    let by_ref = matches!(params_ty, Type::Reference(_));
    let name = plain_type_name(params_ty).ok_or_else(|| {
        format!(
            "params type `{}` is not a named record",
            params_ty.to_token_stream()
        )
    })?;
    Ok((name, by_ref))
}

/// Last path segment of a type, with references peeled.
fn plain_type_name(ty: &Type) -> Option<String> {
    match ty {
        Type::Reference(reference) => plain_type_name(&reference.elem),
        Type::Paren(paren) => plain_type_name(&paren.elem),
        Type::Path(type_path) if type_path.qself.is_none() => type_path
            .path
            .segments
            .last()
            .filter(|segment| segment.arguments.is_none())
            .map(|segment| segment.ident.unraw().to_string()),
        _ => None,
    }
}
