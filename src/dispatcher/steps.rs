//! Request-handling steps shared by generated dispatch code and the
//! in-memory [`Dispatcher`](super::Dispatcher).
//!
//! Each step either passes or ends the request with a [`Failure`]:
//!
//! ```text
//! MATCH_ROUTE -> AUTH_CHECK -> METHOD_CHECK
//!   -> [PARSE_FIELD -> COERCE -> DEFAULT -> VALIDATE]* -> INVOKE -> RESPOND
//! ```

use crate::security::CredentialCheck;
use crate::server::{CallError, Failure, HandlerRequest, HandlerResponse};
use crate::spec::{FieldSchema, RouteConfig, SemanticType};
use crate::validator::FieldValue;
use serde::Serialize;

/// Reject the request unless its method equals `expected` exactly.
/// An empty `expected` accepts any method.
pub fn check_method(req: &HandlerRequest, expected: &str) -> Result<(), Failure> {
    if expected.is_empty() || req.method().as_str() == expected {
        Ok(())
    } else {
        Err(Failure::BadMethod)
    }
}

/// Reject the request unless `credentials` accepts it.
pub fn check_credentials(
    req: &HandlerRequest,
    credentials: &dyn CredentialCheck,
) -> Result<(), Failure> {
    if credentials.verify(req) {
        Ok(())
    } else {
        Err(Failure::Unauthorized)
    }
}

/// AUTH_CHECK then METHOD_CHECK for a matched route.
pub fn check_route(
    req: &HandlerRequest,
    route: &RouteConfig,
    credentials: &dyn CredentialCheck,
) -> Result<(), Failure> {
    if route.auth {
        check_credentials(req, credentials)?;
    }
    check_method(req, &route.method)
}

/// Read, coerce, default and validate one field.
///
/// A missing key reads as the empty string. The default value applies only
/// to an empty wire value and before any validator runs. An integer outside
/// the range of the field's declared type fails as `<p> must be int`, after
/// the validators.
pub fn read_field(req: &HandlerRequest, field: &FieldSchema) -> Result<FieldValue, Failure> {
    let key = field.wire_key();
    let raw = req.form_value(&key);

    let value = match field.semantic_type {
        SemanticType::String => match (&field.default_value, raw.is_empty()) {
            (Some(default), true) => FieldValue::Str(default.clone()),
            _ => FieldValue::Str(raw.to_string()),
        },
        SemanticType::Int => match raw.parse::<i64>() {
            Ok(n) => FieldValue::Int(n),
            Err(_) => return Err(Failure::Coercion { param: key }),
        },
    };

    for validator in &field.validators {
        validator.validate(&key, &value)?;
    }
    check_declared_width(&key, field, &value)?;
    Ok(value)
}

/// Integers that pass validation but do not fit the declared field type
/// are reported as a coercion failure.
fn check_declared_width(
    key: &str,
    field: &FieldSchema,
    value: &FieldValue,
) -> Result<(), Failure> {
    match value {
        FieldValue::Int(n) if !field.fits_declared_int(*n) => Err(Failure::Coercion {
            param: key.to_string(),
        }),
        _ => Ok(()),
    }
}

/// [`read_field`] for a `String` field.
pub fn string_param(req: &HandlerRequest, field: &FieldSchema) -> Result<String, Failure> {
    match read_field(req, field)? {
        FieldValue::Str(s) => Ok(s),
        FieldValue::Int(n) => Ok(n.to_string()),
    }
}

/// [`read_field`] for an integer field of any width.
pub fn int_param<T: TryFrom<i64>>(req: &HandlerRequest, field: &FieldSchema) -> Result<T, Failure> {
    let coercion = || Failure::Coercion {
        param: field.wire_key(),
    };
    match read_field(req, field)? {
        FieldValue::Int(n) => T::try_from(n).map_err(|_| coercion()),
        FieldValue::Str(_) => Err(coercion()),
    }
}

/// Turn a business call's result into the response envelope.
pub fn respond<T, E>(result: Result<T, E>) -> HandlerResponse
where
    T: Serialize,
    CallError: From<E>,
{
    match result {
        Ok(value) => HandlerResponse::success(&value),
        Err(err) => {
            let failure = Failure::from(CallError::from(err));
            if let Failure::Internal(message) = &failure {
                tracing::error!(error = %message, "business call failed");
            }
            HandlerResponse::failure(&failure)
        }
    }
}
