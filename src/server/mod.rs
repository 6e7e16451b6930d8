//! # Server Module
//!
//! Wire-level types shared by generated dispatch code and the in-memory
//! [`Dispatcher`](crate::dispatcher::Dispatcher): the transport-neutral
//! request view, the response envelope and the failure taxonomy.
//!
//! The HTTP transport itself is not part of this crate. A server adapter
//! converts its native request into a [`HandlerRequest`], calls the dispatch
//! code, and writes [`HandlerResponse::status`] plus
//! [`HandlerResponse::to_bytes`] back with content type
//! [`ENVELOPE_CONTENT_TYPE`].
//!
//! | Outcome | Status | Body |
//! |---|---|---|
//! | credential mismatch | 403 | `{"error":"unauthorized"}` |
//! | method mismatch | 406 | `{"error":"bad method"}` |
//! | unknown path | 404 | `{"error":"unknown method"}` |
//! | coercion or validation failure | 400 | `{"error":"<message>"}` |
//! | domain failure | its own | `{"error":"<message>"}` |
//! | internal failure | 500 | `{"error":"<message>"}` |
//! | success | 200 | `{"error":"","response":<result>}` |

mod error;
mod request;
mod response;

pub use error::{ApiError, CallError, Failure};
pub use request::{HandlerRequest, HeaderVec, ParamVec, MAX_INLINE_HEADERS, MAX_INLINE_PARAMS};
pub use response::{HandlerResponse, ENVELOPE_CONTENT_TYPE};
