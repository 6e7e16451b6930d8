//! # Security Module
//!
//! Credential checks for routes declared with `"auth": true`.
//!
//! The built-in check is a shared secret: the configured header must equal the
//! configured token byte for byte. A missing header counts as the empty string
//! and therefore never matches a non-empty token.
//!
//! Both renderers consult a [`CredentialCheck`] trait object, so a real
//! verifier can replace the shared secret without touching the dispatch steps.
//! The in-memory [`Dispatcher`](crate::dispatcher::Dispatcher) takes one via
//! `with_credentials`; generated code takes one per call in
//! `serve_http_with`:
//!
//! ```rust
//! use apigen::security::CredentialCheck;
//! use apigen::server::HandlerRequest;
//!
//! struct BearerCheck;
//!
//! impl CredentialCheck for BearerCheck {
//!     fn verify(&self, req: &HandlerRequest) -> bool {
//!         req.header("authorization")
//!             .map(|v| v.starts_with("Bearer "))
//!             .unwrap_or(false)
//!     }
//! }
//! ```
//!
//! Generated `serve_http` uses a [`SharedSecret`] built from the header and
//! token baked in at generation time.

use crate::config::AuthConfig;
use crate::server::HandlerRequest;

/// Decides whether a request on an authenticated route may proceed.
pub trait CredentialCheck: Send + Sync {
    fn verify(&self, req: &HandlerRequest) -> bool;
}

/// Fixed header/token pair compared by exact equality.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharedSecret {
    pub header: String,
    pub token: String,
}

impl SharedSecret {
    pub fn new(header: impl Into<String>, token: impl Into<String>) -> Self {
        SharedSecret {
            header: header.into(),
            token: token.into(),
        }
    }

    pub fn from_config(auth: &AuthConfig) -> Self {
        SharedSecret::new(&auth.header, &auth.token)
    }
}

impl Default for SharedSecret {
    fn default() -> Self {
        SharedSecret::from_config(&AuthConfig::default())
    }
}

impl CredentialCheck for SharedSecret {
    fn verify(&self, req: &HandlerRequest) -> bool {
        check_shared_secret(req, &self.header, &self.token)
    }
}

/// `true` when header `header` of `req` equals `token` exactly.
pub fn check_shared_secret(req: &HandlerRequest, header: &str, token: &str) -> bool {
    req.header(header).unwrap_or("") == token
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::Method;

    #[test]
    fn test_shared_secret_defaults() {
        let check = SharedSecret::default();
        let ok = HandlerRequest::new(Method::POST, "/").with_header("X-Auth", "100500");
        let wrong = HandlerRequest::new(Method::POST, "/").with_header("X-Auth", "100501");
        let missing = HandlerRequest::new(Method::POST, "/");
        assert!(check.verify(&ok));
        assert!(!check.verify(&wrong));
        assert!(!check.verify(&missing));
    }

    #[test]
    fn test_comparison_is_exact() {
        let req = HandlerRequest::new(Method::GET, "/").with_header("X-Auth", " 100500");
        assert!(!check_shared_secret(&req, "X-Auth", "100500"));
    }

    #[test]
    fn test_empty_token_accepts_missing_header() {
        let req = HandlerRequest::new(Method::GET, "/");
        assert!(check_shared_secret(&req, "X-Auth", ""));
    }
}
