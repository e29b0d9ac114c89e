//! Core transport types.
//!
//! - [`Request`] - buffered HTTP request, the source of captured data
//! - [`Response`] - HTTP response with builder pattern
//! - [`Context`] - per-request state (status code, queued headers, temp files)
//! - [`Error`] - core error types
//!
//! # Example
//!
//! ```rust,ignore
//! use http_envelope::core::Context;
//! use http_envelope::response;
//!
//! let mut ctx = Context::default();
//! let envelope = response::success(&mut ctx, Some("saved"), None, None);
//! assert_eq!(ctx.status_code(), 200);
//! let res = envelope.into_response(&ctx);
//! ```

mod context;
mod error;
mod request;
mod response;

pub use context::{Context, HttpVersion, DEFAULT_STATUS_CODE};
pub use error::{Error, Result};
pub use request::Request;
pub use response::{Response, ResponseBuilder};
