//! Request-scoped context handed to every business call.

use crate::server::HandlerRequest;
use http::Method;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Header a caller may use to propagate its own request id.
pub const REQUEST_ID_HEADER: &str = "X-Request-ID";

/// Strongly typed request identifier backed by ULID.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
pub struct RequestId(pub ulid::Ulid);

impl RequestId {
    pub fn new() -> Self {
        Self(ulid::Ulid::new())
    }

    /// Parse from a header value; if absent or invalid, generate a new one.
    pub fn from_header_or_new(header_value: Option<&str>) -> Self {
        header_value
            .and_then(|s| s.parse::<RequestId>().ok())
            .unwrap_or_default()
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for RequestId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RequestId {
    type Err = ulid::DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ulid::Ulid::from_string(s).map(RequestId)
    }
}

/// The first argument of every handler method.
///
/// Carries request identity only; parameters arrive through the typed params
/// record and credentials have already been checked by the time a handler runs.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub request_id: RequestId,
    pub method: Method,
    pub path: String,
}

impl RequestContext {
    pub fn from_request(req: &HandlerRequest) -> Self {
        RequestContext {
            request_id: RequestId::from_header_or_new(req.header(REQUEST_ID_HEADER)),
            method: req.method().clone(),
            path: req.path().to_string(),
        }
    }
}
