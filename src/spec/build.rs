use super::load::{load_source, SourceError, SourceFile};
use super::routes::extract_routes;
use super::schema::extract_schemas;
use super::types::{ApiModel, RouteTable};
use crate::config::GeneratorConfig;
use crate::diagnostics::{record, Diagnostic, DiagnosticKind, Severity};
use std::collections::HashSet;
use std::path::Path;

/// Run both extractors over `source` and join handlers to their schemas.
///
/// Never fails: every problem short of an unparseable source becomes a
/// diagnostic on the returned model.
pub fn build_model(source: &SourceFile, config: &GeneratorConfig) -> ApiModel {
    let mut diagnostics = Vec::new();
    let schemas = extract_schemas(&source.file, config, &mut diagnostics);
    let handlers = extract_routes(&source.file, config, &mut diagnostics);

    let mut routes = RouteTable::new();
    let mut seen: HashSet<(String, String)> = HashSet::new();
    for handler in handlers {
        if !seen.insert((handler.api_name.clone(), handler.route.url.clone())) {
            record(
                &mut diagnostics,
                Diagnostic::new(
                    handler.location(),
                    Severity::Error,
                    DiagnosticKind::RouteConfig,
                    format!(
                        "path `{}` is already routed in {}; this handler would be unreachable",
                        handler.route.url, handler.api_name
                    ),
                ),
            );
            continue;
        }
        if !schemas.contains_key(&handler.schema_name) {
            record(
                &mut diagnostics,
                Diagnostic::new(
                    handler.location(),
                    Severity::Info,
                    DiagnosticKind::Schema,
                    format!(
                        "`{}` has no annotated fields; the handler receives its default value",
                        handler.schema_name
                    ),
                ),
            );
        }
        routes.insert(handler);
    }

    tracing::info!(
        source = %source.path.display(),
        apis = routes.apis().count(),
        handlers = routes.len(),
        schemas = schemas.len(),
        diagnostics = diagnostics.len(),
        "built api model"
    );

    ApiModel {
        routes,
        schemas,
        diagnostics,
    }
}

/// Load a source file and build its model.
pub fn load_model(path: &Path, config: &GeneratorConfig) -> Result<ApiModel, SourceError> {
    let source = load_source(path)?;
    Ok(build_model(&source, config))
}
