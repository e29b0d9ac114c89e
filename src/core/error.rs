//! Core error types.

use std::fmt;

/// Errors from reading request bodies and encoding output.
///
/// Capture and envelope building never fail. These cover the edges where
/// bytes are read or encoded.
#[derive(Debug)]
pub enum Error {
    /// Request could not be interpreted.
    InvalidRequest(String),

    /// Multipart body is malformed.
    Multipart(multer::Error),

    /// Reading the request body failed.
    Body(String),

    /// JSON encoding failed.
    Json(serde_json::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidRequest(msg) => write!(f, "invalid request: {}", msg),
            Error::Multipart(e) => write!(f, "malformed multipart body: {}", e),
            Error::Body(msg) => write!(f, "failed to read body: {}", msg),
            Error::Json(e) => write!(f, "JSON error: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Multipart(e) => Some(e),
            Error::Json(e) => Some(e),
            Error::InvalidRequest(_) | Error::Body(_) => None,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Json(e)
    }
}

impl From<multer::Error> for Error {
    fn from(e: multer::Error) -> Self {
        Error::Multipart(e)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
