//! Per-request context.
//!
//! The context owns the transport state an envelope writes to: the status
//! code of the in-flight response and any raw headers queued for it. One
//! context is created per request, so concurrent requests never share it.
//! Temp files registered on the context are removed when it is dropped.

use std::path::PathBuf;

use crate::capture::remove_temp_files;

/// HTTP version as static string (no allocation).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HttpVersion(&'static str);

impl HttpVersion {
    pub const HTTP_10: Self = Self("HTTP/1.0");
    pub const HTTP_11: Self = Self("HTTP/1.1");
    pub const HTTP_20: Self = Self("HTTP/2.0");
    pub const HTTP_30: Self = Self("HTTP/3.0");

    #[inline]
    pub const fn as_str(&self) -> &'static str {
        self.0
    }

    #[inline]
    pub fn from_http(version: http::Version) -> Self {
        match version {
            http::Version::HTTP_10 => Self::HTTP_10,
            http::Version::HTTP_2 => Self::HTTP_20,
            http::Version::HTTP_3 => Self::HTTP_30,
            _ => Self::HTTP_11,
        }
    }
}

/// Default transport status before any envelope is built.
pub const DEFAULT_STATUS_CODE: u16 = 200;

/// Request-scoped transport state.
#[derive(Debug)]
pub struct Context {
    status_code: u16,
    /// Raw response headers, in the order they were queued.
    response_headers: Vec<(String, String)>,
    /// Uploaded files to remove when the request ends.
    temp_files: Vec<PathBuf>,
}

impl Context {
    pub fn new() -> Self {
        Self {
            status_code: DEFAULT_STATUS_CODE,
            response_headers: Vec::with_capacity(4),
            temp_files: Vec::new(),
        }
    }

    /// Set the status code of the in-flight response.
    ///
    /// Any integer is accepted; it is forwarded verbatim.
    #[inline]
    pub fn set_status_code(&mut self, code: u16) {
        self.status_code = code;
    }

    #[inline]
    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    /// Queue a response header. A later header with the same name
    /// (case-insensitive) replaces the earlier one.
    pub fn set_response_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self
            .response_headers
            .iter_mut()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(&name))
        {
            Some(entry) => entry.1 = value,
            None => self.response_headers.push((name, value)),
        }
    }

    #[inline]
    pub fn response_headers(&self) -> &[(String, String)] {
        &self.response_headers
    }

    /// Register a temporary file for cleanup.
    pub fn register_temp_file(&mut self, path: PathBuf) {
        self.temp_files.push(path);
    }

    pub fn temp_files(&self) -> &[PathBuf] {
        &self.temp_files
    }

    /// Remove all registered temp files.
    pub fn cleanup(&mut self) {
        remove_temp_files(self.temp_files.drain(..));
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Context {
    fn drop(&mut self) {
        self.cleanup();
    }
}
