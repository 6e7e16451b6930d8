use http::StatusCode;
use thiserror::Error;

/// Structured error a business call returns to choose its own status.
///
/// This is the domain failure of the envelope contract: its status and
/// message are surfaced to the client verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        ApiError {
            status,
            message: message.into(),
        }
    }
}

/// Error side of a business call, as seen by the dispatch code.
///
/// Handlers may return any error type convertible into `CallError`.
/// `anyhow::Error` values that wrap an [`ApiError`] keep their status;
/// everything else becomes an internal failure with the error text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CallError {
    #[error(transparent)]
    Domain(ApiError),
    #[error("{0}")]
    Internal(String),
}

impl From<ApiError> for CallError {
    fn from(err: ApiError) -> Self {
        CallError::Domain(err)
    }
}

impl From<anyhow::Error> for CallError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast::<ApiError>() {
            Ok(api) => CallError::Domain(api),
            Err(other) => CallError::Internal(other.to_string()),
        }
    }
}

impl From<Box<dyn std::error::Error + Send + Sync>> for CallError {
    fn from(err: Box<dyn std::error::Error + Send + Sync>) -> Self {
        match err.downcast::<ApiError>() {
            Ok(api) => CallError::Domain(*api),
            Err(other) => CallError::Internal(other.to_string()),
        }
    }
}

impl From<String> for CallError {
    fn from(message: String) -> Self {
        CallError::Internal(message)
    }
}

impl From<&str> for CallError {
    fn from(message: &str) -> Self {
        CallError::Internal(message.to_string())
    }
}

/// Every way a request can end without a successful business call.
///
/// The `Display` text is exactly the `error` field of the response envelope.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Failure {
    #[error("unauthorized")]
    Unauthorized,
    #[error("bad method")]
    BadMethod,
    #[error("unknown method")]
    UnknownMethod,
    /// A wire value could not be converted to the field's type
    #[error("{param} must be int")]
    Coercion { param: String },
    /// A compiled validator rejected the value
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Domain(ApiError),
    #[error("{0}")]
    Internal(String),
}

impl Failure {
    pub fn status(&self) -> StatusCode {
        match self {
            Failure::Unauthorized => StatusCode::FORBIDDEN,
            Failure::BadMethod => StatusCode::NOT_ACCEPTABLE,
            Failure::UnknownMethod => StatusCode::NOT_FOUND,
            Failure::Coercion { .. } | Failure::Validation(_) => StatusCode::BAD_REQUEST,
            Failure::Domain(err) => err.status,
            Failure::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<CallError> for Failure {
    fn from(err: CallError) -> Self {
        match err {
            CallError::Domain(api) => Failure::Domain(api),
            CallError::Internal(message) => Failure::Internal(message),
        }
    }
}
