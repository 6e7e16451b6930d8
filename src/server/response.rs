use super::error::{CallError, Failure};
use http::StatusCode;
use serde::Serialize;
use serde_json::{json, Value};

/// Content type of every envelope body.
pub const ENVELOPE_CONTENT_TYPE: &str = "application/json";

/// Status and envelope body produced for one request.
///
/// The body always has the shape `{"error": string, "response"?: value}`:
/// failures carry only `error`, successes carry an empty `error` plus the
/// business call's result under `response`.
#[derive(Debug, Clone, PartialEq)]
pub struct HandlerResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl HandlerResponse {
    /// Envelope for a successful business call.
    ///
    /// A result that cannot be serialized is reported as an internal failure.
    pub fn success<T: Serialize>(result: &T) -> Self {
        match serde_json::to_value(result) {
            Ok(response) => HandlerResponse {
                status: StatusCode::OK,
                body: json!({ "error": "", "response": response }),
            },
            Err(err) => Failure::Internal(err.to_string()).into(),
        }
    }

    /// Envelope for a request that ended in `failure`.
    pub fn failure(failure: &Failure) -> Self {
        HandlerResponse {
            status: failure.status(),
            body: json!({ "error": failure.to_string() }),
        }
    }

    /// The envelope's `error` text (empty on success).
    pub fn error_message(&self) -> &str {
        self.body
            .get("error")
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    /// The envelope's `response` payload, present only on success.
    pub fn payload(&self) -> Option<&Value> {
        self.body.get("response")
    }

    /// Serialized body for the transport writer.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.body.to_string().into_bytes()
    }
}

impl From<Failure> for HandlerResponse {
    fn from(failure: Failure) -> Self {
        HandlerResponse::failure(&failure)
    }
}

impl From<CallError> for HandlerResponse {
    fn from(err: CallError) -> Self {
        HandlerResponse::failure(&Failure::from(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::ApiError;

    #[test]
    fn test_success_envelope() {
        let res = HandlerResponse::success(&json!({"id": 42, "login": "bob"}));
        assert_eq!(res.status, StatusCode::OK);
        assert_eq!(res.error_message(), "");
        assert_eq!(res.payload(), Some(&json!({"id": 42, "login": "bob"})));
    }

    #[test]
    fn test_failure_envelope_has_no_response_key() {
        let res = HandlerResponse::from(Failure::Unauthorized);
        assert_eq!(res.status, StatusCode::FORBIDDEN);
        assert_eq!(res.body, json!({"error": "unauthorized"}));
        assert!(res.payload().is_none());
    }

    #[test]
    fn test_domain_error_uses_its_status() {
        let res = HandlerResponse::from(CallError::from(ApiError::new(
            StatusCode::CONFLICT,
            "user exists",
        )));
        assert_eq!(res.status, StatusCode::CONFLICT);
        assert_eq!(res.to_bytes(), br#"{"error":"user exists"}"#.to_vec());
    }
}
