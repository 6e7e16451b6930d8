use http::Method;
use smallvec::SmallVec;
use std::sync::Arc;

/// Maximum number of form parameters before heap allocation.
pub const MAX_INLINE_PARAMS: usize = 8;

/// Maximum number of headers before heap allocation.
pub const MAX_INLINE_HEADERS: usize = 16;

/// Stack-allocated parameter storage for request handling.
///
/// Param names use `Arc<str>` because the same wire keys are looked up on
/// every request; values stay `String` as they are per-request data.
pub type ParamVec = SmallVec<[(Arc<str>, String); MAX_INLINE_PARAMS]>;

/// Stack-allocated header storage for request handling.
pub type HeaderVec = SmallVec<[(Arc<str>, String); MAX_INLINE_HEADERS]>;

/// Transport-neutral view of an inbound request.
///
/// The HTTP server adapter builds one of these per request and hands it to a
/// generated `serve_http` method or to the in-memory
/// [`Dispatcher`](crate::dispatcher::Dispatcher). Form parameters are kept in
/// two groups: pairs from a form-encoded body and pairs from the query string.
/// Body pairs take precedence over query pairs, and the first value of a
/// repeated key wins.
#[derive(Debug, Clone)]
pub struct HandlerRequest {
    method: Method,
    path: String,
    headers: HeaderVec,
    body_params: ParamVec,
    query_params: ParamVec,
}

impl HandlerRequest {
    /// Create a request for `path` with no headers or parameters.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        HandlerRequest {
            method,
            path: path.into(),
            headers: HeaderVec::new(),
            body_params: ParamVec::new(),
            query_params: ParamVec::new(),
        }
    }

    /// Create a request from a request target such as `/user/profile?login=bob`.
    ///
    /// Everything after the first `?` is decoded as a form-encoded query string.
    pub fn from_target(method: Method, target: &str) -> Self {
        match target.split_once('?') {
            Some((path, query)) => HandlerRequest::new(method, path).with_query(query),
            None => HandlerRequest::new(method, target),
        }
    }

    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.push((Arc::from(name), value.into()));
        self
    }

    /// Append pairs decoded from a form-encoded query string.
    pub fn with_query(mut self, query: &str) -> Self {
        self.query_params.extend(decode_form(query.as_bytes()));
        self
    }

    /// Append pairs decoded from an `application/x-www-form-urlencoded` body.
    pub fn with_form_body(mut self, body: &[u8]) -> Self {
        self.body_params.extend(decode_form(body));
        self
    }

    #[inline]
    pub fn method(&self) -> &Method {
        &self.method
    }

    #[inline]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Get a header by name (case-insensitive per RFC 7230)
    #[inline]
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Get a form parameter, or the empty string when the key is absent.
    ///
    /// Absent and empty parameters are indistinguishable on purpose: both are
    /// "empty" for the `required` check and for default-value assignment.
    #[must_use]
    pub fn form_value(&self, key: &str) -> &str {
        self.body_params
            .iter()
            .chain(self.query_params.iter())
            .find(|(k, _)| k.as_ref() == key)
            .map(|(_, v)| v.as_str())
            .unwrap_or("")
    }
}

fn decode_form(input: &[u8]) -> impl Iterator<Item = (Arc<str>, String)> + '_ {
    url::form_urlencoded::parse(input).map(|(k, v)| (Arc::from(k.as_ref()), v.into_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_target_splits_query() {
        let req = HandlerRequest::from_target(Method::GET, "/user/profile?login=bob&age=42");
        assert_eq!(req.path(), "/user/profile");
        assert_eq!(req.form_value("login"), "bob");
        assert_eq!(req.form_value("age"), "42");
        assert_eq!(req.form_value("missing"), "");
    }

    #[test]
    fn test_body_takes_precedence_over_query() {
        let req = HandlerRequest::from_target(Method::POST, "/user/create?login=query")
            .with_form_body(b"login=body");
        assert_eq!(req.form_value("login"), "body");
    }

    #[test]
    fn test_first_value_wins() {
        let req = HandlerRequest::from_target(Method::GET, "/x?a=1&a=2");
        assert_eq!(req.form_value("a"), "1");
    }

    #[test]
    fn test_form_values_are_percent_decoded() {
        let req = HandlerRequest::new(Method::POST, "/x").with_form_body(b"full_name=Ann+Lee%21");
        assert_eq!(req.form_value("full_name"), "Ann Lee!");
    }

    #[test]
    fn test_header_lookup_is_case_insensitive() {
        let req = HandlerRequest::new(Method::GET, "/").with_header("X-Auth", "100500");
        assert_eq!(req.header("x-auth"), Some("100500"));
        assert_eq!(req.header("authorization"), None);
    }
}
