//! Test helpers and utilities

use bytes::Bytes;
use http::{Response, StatusCode};
use http_body_util::Full;
use http_envelope::capture::ConnectionInfo;
use http_envelope::config::CaptureConfig;
use http_envelope::core::Request;
use serde_json::Value;

/// Multipart boundary used by [`multipart_body`].
pub const BOUNDARY: &str = "----envelope-test";

/// Test request configuration
pub struct TestRequest {
    builder: http::request::Builder,
    body: Bytes,
}

#[allow(dead_code)]
impl TestRequest {
    pub fn get(uri: &str) -> Self {
        Self {
            builder: http::Request::builder().method("GET").uri(uri),
            body: Bytes::new(),
        }
    }

    pub fn post(uri: &str) -> Self {
        Self {
            builder: http::Request::builder().method("POST").uri(uri),
            body: Bytes::new(),
        }
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.builder = self.builder.header(name, value);
        self
    }

    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    pub fn json(self, body: &str) -> Self {
        self.header("content-type", "application/json")
            .body(body.to_string())
    }

    pub fn form(self, body: &str) -> Self {
        self.header("content-type", "application/x-www-form-urlencoded")
            .body(body.to_string())
    }

    pub fn multipart(self, parts: &[&str]) -> Self {
        let content_type = format!("multipart/form-data; boundary={}", BOUNDARY);
        self.header("content-type", &content_type)
            .body(multipart_body(parts))
    }

    /// Build a streaming request and buffer it through `Request::collect`.
    pub async fn collect(self) -> Request {
        let req = self
            .builder
            .body(Full::new(self.body))
            .expect("Failed to build request");
        Request::collect(req).await.expect("Failed to collect body")
    }
}

/// Join raw part sources (headers, blank line, content) into a multipart body.
pub fn multipart_body(parts: &[&str]) -> String {
    let mut out = String::new();
    for part in parts {
        out.push_str(&format!("--{}\r\n{}\r\n", BOUNDARY, part));
    }
    out.push_str(&format!("--{}--\r\n", BOUNDARY));
    out
}

/// Connection from a fixed client address.
pub fn client() -> ConnectionInfo {
    ConnectionInfo::new("10.0.0.7:40000".parse().expect("valid address"))
}

/// Capture config writing uploads into `dir`.
pub fn capture_config(dir: &tempfile::TempDir) -> CaptureConfig {
    CaptureConfig {
        upload_dir: dir.path().to_path_buf(),
        ..CaptureConfig::default()
    }
}

/// Assert response status
pub fn assert_status(response: &Response<Bytes>, expected: StatusCode) {
    assert_eq!(
        response.status(),
        expected,
        "Expected status {}, got {}",
        expected,
        response.status()
    );
}

/// Assert response header value
pub fn assert_header(response: &Response<Bytes>, name: &str, expected: &str) {
    let value = response
        .headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_else(|| panic!("Missing header: {}", name));
    assert_eq!(value, expected, "Header {} mismatch", name);
}

/// Parse the response body as JSON.
pub fn body_json(response: &Response<Bytes>) -> Value {
    serde_json::from_slice(response.body()).expect("Body is not JSON")
}
