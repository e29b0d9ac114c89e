//! http_envelope - request capture and uniform JSON response envelopes.
//!
//! Two halves share one per-request [`Context`](core::Context), which also
//! removes uploaded temp files when the request ends:
//!
//! - **Capture**: turn an incoming request into one ordered map. A JSON body
//!   wins; otherwise form fields, uploaded files, query parameters, server
//!   metadata and cookies are merged, later sources overriding earlier ones.
//! - **Envelope**: build `{code, status, message, data?}` responses and set
//!   the transport status code to match.
//!
//! Status codes, method verbs and semantic labels live in [`catalog`].
//!
//! # Example
//!
//! ```rust,ignore
//! use http_envelope::capture::{capture_request, ConnectionInfo};
//! use http_envelope::config::Config;
//! use http_envelope::core::{Context, Request};
//! use http_envelope::response;
//!
//! let config = Config::from_env()?;
//! let req = Request::collect(incoming).await?;
//! let mut ctx = Context::new();
//! let conn = ConnectionInfo::new(peer);
//! let data = capture_request(&mut ctx, &req, &conn, &config.capture).await;
//!
//! let envelope = response::success(&mut ctx, Some("received"), None, Some(data.into()));
//! let res: http::Response<bytes::Bytes> = envelope.into_response(&ctx).into();
//! ```

/// Package version from Cargo.toml
pub const PKG_VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod capture;
pub mod catalog;
pub mod config;
pub mod core;
pub mod json;
pub mod logging;
pub mod response;

// Re-exports for convenience
pub use capture::{
    capture, capture_request, header, AmbientCollections, BodySource, CapturedRequest,
};
pub use config::Config;
pub use response::{finish, Envelope};
