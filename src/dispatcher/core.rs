use super::steps::{check_route, read_field, respond};
use crate::context::RequestContext;
use crate::security::{CredentialCheck, SharedSecret};
use crate::server::{CallError, Failure, HandlerRequest, HandlerResponse};
use crate::spec::{ApiModel, FieldSchema, HandlerSchema};
use crate::validator::FieldValue;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

/// A business call bound into the dispatch table.
pub type HandlerFn =
    Arc<dyn Fn(&RequestContext, ParamRecord) -> Result<Value, CallError> + Send + Sync>;

/// Parsed and validated parameters, keyed by declared field name, in
/// declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParamRecord {
    values: Vec<(String, FieldValue)>,
}

impl ParamRecord {
    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.values
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, value)| value)
    }

    pub fn str(&self, field: &str) -> Option<&str> {
        self.get(field).and_then(FieldValue::as_str)
    }

    pub fn int(&self, field: &str) -> Option<i64> {
        self.get(field).and_then(FieldValue::as_int)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// JSON object of field name to value.
    pub fn to_json(&self) -> Value {
        let map: Map<String, Value> = self
            .values
            .iter()
            .map(|(name, value)| {
                let json = match value {
                    FieldValue::Str(s) => Value::from(s.as_str()),
                    FieldValue::Int(n) => Value::from(*n),
                };
                (name.clone(), json)
            })
            .collect();
        Value::Object(map)
    }

    fn push(&mut self, name: &str, value: FieldValue) {
        self.values.push((name.to_string(), value));
    }
}

/// Registration failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    #[error("unknown api `{0}`")]
    UnknownApi(String),
    #[error("api `{api}` has no handler `{handler}`")]
    UnknownHandler { api: String, handler: String },
}

struct RouteEntry {
    handler: HandlerSchema,
    fields: Vec<FieldSchema>,
    call: Option<HandlerFn>,
}

/// In-memory dispatch table built from an [`ApiModel`].
///
/// Runs the same steps as generated `serve_http` code without a code
/// generation round-trip. Once handlers are registered the table is only
/// read, so a shared `&Dispatcher` serves concurrent requests.
pub struct Dispatcher {
    apis: BTreeMap<String, Vec<RouteEntry>>,
    credentials: Arc<dyn CredentialCheck>,
}

impl Dispatcher {
    /// Build the table. Credentials default to the `X-Auth` shared secret.
    pub fn from_model(model: &ApiModel) -> Self {
        let apis = model
            .routes
            .iter()
            .map(|(api, handlers)| {
                let entries = handlers
                    .iter()
                    .map(|handler| RouteEntry {
                        handler: handler.clone(),
                        fields: model.fields_for(handler).to_vec(),
                        call: None,
                    })
                    .collect();
                (api.to_string(), entries)
            })
            .collect();
        Dispatcher {
            apis,
            credentials: Arc::new(SharedSecret::default()),
        }
    }

    /// Replace the credential check used on `auth: true` routes.
    pub fn with_credentials(mut self, credentials: impl CredentialCheck + 'static) -> Self {
        self.credentials = Arc::new(credentials);
        self
    }

    /// Bind the business call for `api`'s handler method `handler`.
    pub fn register<F>(&mut self, api: &str, handler: &str, call: F) -> Result<(), DispatchError>
    where
        F: Fn(&RequestContext, ParamRecord) -> Result<Value, CallError> + Send + Sync + 'static,
    {
        let entries = self
            .apis
            .get_mut(api)
            .ok_or_else(|| DispatchError::UnknownApi(api.to_string()))?;
        let entry = entries
            .iter_mut()
            .find(|e| e.handler.handler_name == handler)
            .ok_or_else(|| DispatchError::UnknownHandler {
                api: api.to_string(),
                handler: handler.to_string(),
            })?;
        if entry.call.is_some() {
            warn!(api, handler, "replacing registered handler");
        }
        entry.call = Some(Arc::new(call));
        Ok(())
    }

    /// API names in the table.
    pub fn apis(&self) -> impl Iterator<Item = &str> {
        self.apis.keys().map(String::as_str)
    }

    /// Route paths of `api`, in declaration order.
    pub fn routes(&self, api: &str) -> Vec<&str> {
        self.apis
            .get(api)
            .map(|entries| entries.iter().map(|e| e.handler.route.url.as_str()).collect())
            .unwrap_or_default()
    }

    /// Handle one request for `api`. Every outcome is an envelope response.
    pub fn dispatch(&self, api: &str, req: &HandlerRequest) -> HandlerResponse {
        let ctx = RequestContext::from_request(req);
        let response = match self.run(api, req, &ctx) {
            Ok(response) => response,
            Err(failure) => HandlerResponse::failure(&failure),
        };
        debug!(
            request_id = %ctx.request_id,
            api,
            method = %req.method(),
            path = %req.path(),
            status = response.status.as_u16(),
            "dispatched"
        );
        response
    }

    fn run(
        &self,
        api: &str,
        req: &HandlerRequest,
        ctx: &RequestContext,
    ) -> Result<HandlerResponse, Failure> {
        let entry = self
            .apis
            .get(api)
            .and_then(|entries| entries.iter().find(|e| e.handler.route.url == req.path()))
            .ok_or(Failure::UnknownMethod)?;

        check_route(req, &entry.handler.route, self.credentials.as_ref())?;

        let mut params = ParamRecord::default();
        for field in &entry.fields {
            let value = read_field(req, field)?;
            params.push(&field.name, value);
        }

        let Some(call) = &entry.call else {
            warn!(handler = %entry.handler.location(), "no business call registered");
            return Err(Failure::Internal(format!(
                "handler {} is not registered",
                entry.handler.location()
            )));
        };
        Ok(respond(call(ctx, params)))
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("apis", &self.apis.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}
