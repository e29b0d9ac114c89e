//! Request capture.
//!
//! Normalizes everything a request carries into one ordered map. The body
//! and the ambient collections are an either/or:
//!
//! - a non-empty body that decodes as JSON *is* the result;
//! - otherwise the result is the last-write-wins union of the ambient
//!   collections, merged in the order form, files, query, server, cookies.
//!
//! Capture never fails. Malformed JSON is treated like an empty body.
//!
//! # Example
//!
//! ```rust,ignore
//! use http_envelope::capture::{capture, AmbientCollections};
//!
//! let ambient = AmbientCollections::new().query(&[("page".into(), "2".into())]);
//! let data = capture(b"".as_slice(), &ambient);
//! assert_eq!(data["page"], "2");
//! ```

mod multipart;
mod params;
mod parser;
mod server_vars;
mod uploads;

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use bytes::Bytes;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::config::CaptureConfig;
use crate::core::{Context, Request};

pub use multipart::{
    parse_multipart, MultipartForm, UPLOAD_ERR_CANT_WRITE, UPLOAD_ERR_NO_FILE, UPLOAD_ERR_OK,
    UPLOAD_ERR_SIZE,
};
pub use params::{files_to_map, insert_param, params_to_map, MAX_NESTING_DEPTH};
pub use parser::{form_decode, parse_cookies, parse_query_string, parse_urlencoded};
pub use server_vars::{header_var_name, server_vars, split_host};
pub use uploads::TempUploads;

pub(crate) use uploads::remove_temp_files;

/// Key-value pairs in arrival order.
pub type ParamList = Vec<(String, String)>;

/// Uploaded files grouped by form field name.
pub type FileList = Vec<(String, Vec<UploadedFile>)>;

/// The normalized request data returned by [`capture`].
pub type CapturedRequest = Map<String, Value>;

/// Key used when the body decodes to a bare scalar.
pub const SCALAR_KEY: &str = "scalar";

/// Metadata of a file received in a multipart form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadedFile {
    /// Original filename
    pub name: String,
    /// MIME type
    #[serde(rename = "type")]
    pub mime_type: String,
    /// Temporary file path on disk (empty when not stored)
    pub tmp_name: String,
    /// Upload error code (0 = success)
    pub error: u8,
    /// File size in bytes
    pub size: u64,
}

/// Transport facts that are not part of the HTTP message itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectionInfo {
    /// Remote client address
    pub remote_addr: SocketAddr,
    /// Whether the connection is TLS
    pub tls: bool,
}

impl ConnectionInfo {
    pub fn new(remote_addr: SocketAddr) -> Self {
        Self {
            remote_addr,
            tls: false,
        }
    }

    pub fn with_tls(mut self, tls: bool) -> Self {
        self.tls = tls;
        self
    }
}

impl Default for ConnectionInfo {
    fn default() -> Self {
        Self::new(SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 0))
    }
}

// =============================================================================
// Body source
// =============================================================================

/// Source of the raw request body.
///
/// Capture reads the body exactly once through this trait, so tests can
/// hand in plain bytes instead of a live request.
pub trait BodySource {
    fn raw_body(&self) -> &[u8];
}

impl BodySource for [u8] {
    fn raw_body(&self) -> &[u8] {
        self
    }
}

impl BodySource for Vec<u8> {
    fn raw_body(&self) -> &[u8] {
        self
    }
}

impl BodySource for Bytes {
    fn raw_body(&self) -> &[u8] {
        self
    }
}

impl BodySource for str {
    fn raw_body(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl BodySource for String {
    fn raw_body(&self) -> &[u8] {
        self.as_bytes()
    }
}

/// Multipart bodies are consumed by form parsing and read as empty.
impl BodySource for Request {
    fn raw_body(&self) -> &[u8] {
        if self.is_multipart() {
            &[]
        } else {
            self.body()
        }
    }
}

/// `None` is an absent body.
impl<T: BodySource> BodySource for Option<T> {
    fn raw_body(&self) -> &[u8] {
        self.as_ref().map(BodySource::raw_body).unwrap_or(&[])
    }
}

impl<T: BodySource + ?Sized> BodySource for &T {
    fn raw_body(&self) -> &[u8] {
        (**self).raw_body()
    }
}

// =============================================================================
// Ambient collections
// =============================================================================

/// The pre-parsed request collections merged when no JSON body is present.
#[derive(Debug, Default)]
pub struct AmbientCollections {
    pub form: Map<String, Value>,
    pub files: Map<String, Value>,
    pub query: Map<String, Value>,
    pub server: Map<String, Value>,
    pub cookies: Map<String, Value>,
    /// Temp files behind `files`, removed when the collections are dropped.
    pub uploads: TempUploads,
}

impl AmbientCollections {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set form fields (bracket keys nest).
    pub fn form(mut self, params: &[(String, String)]) -> Self {
        self.form = params_to_map(params);
        self
    }

    /// Set uploaded files.
    pub fn files(mut self, files: &FileList) -> Self {
        self.files = files_to_map(files);
        self
    }

    /// Set query fields (bracket keys nest).
    pub fn query(mut self, params: &[(String, String)]) -> Self {
        self.query = params_to_map(params);
        self
    }

    /// Set server metadata. Keys are taken verbatim.
    pub fn server(mut self, vars: &[(String, String)]) -> Self {
        self.server = vars
            .iter()
            .map(|(k, v)| (k.clone(), Value::String(v.clone())))
            .collect();
        self
    }

    /// Set cookies (bracket keys nest).
    pub fn cookies(mut self, params: &[(String, String)]) -> Self {
        self.cookies = params_to_map(params);
        self
    }

    /// Parse every collection from a buffered request.
    ///
    /// Malformed multipart input leaves form and files empty.
    pub async fn from_request(
        req: &Request,
        conn: &ConnectionInfo,
        config: &CaptureConfig,
    ) -> Self {
        let query = req.query().map(parse_query_string).unwrap_or_default();

        let multipart = if req.is_urlencoded() {
            MultipartForm {
                params: parse_urlencoded(req.body()),
                ..MultipartForm::default()
            }
        } else if req.is_multipart() {
            let content_type = req.content_type().unwrap_or_default();
            match parse_multipart(content_type, req.body().clone(), config).await {
                Ok(parsed) => parsed,
                Err(e) => {
                    tracing::warn!(error = %e, "ignoring malformed multipart body");
                    MultipartForm::default()
                }
            }
        } else {
            MultipartForm::default()
        };
        let MultipartForm {
            params: form,
            files,
            uploads,
        } = multipart;

        let cookies = if config.include_cookies {
            req.cookie().map(parse_cookies).unwrap_or_default()
        } else {
            Vec::new()
        };

        let server = server_vars(req, conn, config);

        tracing::debug!(
            form = form.len(),
            files = files.len(),
            query = query.len(),
            server = server.len(),
            cookies = cookies.len(),
            "parsed ambient collections"
        );

        let mut ambient = Self::new()
            .form(&form)
            .files(&files)
            .query(&query)
            .server(&server)
            .cookies(&cookies);
        ambient.uploads = uploads;
        ambient
    }

    /// Last-write-wins union in precedence order.
    ///
    /// A key overwritten by a later collection keeps its first position.
    pub fn merged(&self) -> CapturedRequest {
        let mut out = Map::new();
        for source in [
            &self.form,
            &self.files,
            &self.query,
            &self.server,
            &self.cookies,
        ] {
            for (key, value) in source {
                out.insert(key.clone(), value.clone());
            }
        }
        out
    }
}

// =============================================================================
// Capture
// =============================================================================

/// Decode a raw body into the captured map.
///
/// Returns `None` for an empty body, malformed JSON or a JSON `null`.
pub fn decode_body(raw: &[u8]) -> Option<CapturedRequest> {
    if raw.trim_ascii().is_empty() {
        return None;
    }

    let value: Value = match serde_json::from_slice(raw) {
        Ok(value) => value,
        Err(e) => {
            tracing::debug!(
                error = %e,
                body_len = raw.len(),
                "body is not JSON, using ambient data"
            );
            return None;
        }
    };

    match value {
        Value::Object(map) => Some(map),
        Value::Array(items) => Some(
            items
                .into_iter()
                .enumerate()
                .map(|(i, v)| (i.to_string(), v))
                .collect(),
        ),
        Value::Null => None,
        scalar => {
            let mut map = Map::new();
            map.insert(SCALAR_KEY.to_string(), scalar);
            Some(map)
        }
    }
}

/// Capture the request data.
pub fn capture<B>(body: &B, ambient: &AmbientCollections) -> CapturedRequest
where
    B: BodySource + ?Sized,
{
    decode_body(body.raw_body()).unwrap_or_else(|| ambient.merged())
}

/// Capture straight from a buffered request.
///
/// Ambient collections are only parsed (and uploads only stored) when the
/// body does not decode as JSON. Stored uploads are registered on `ctx` and
/// removed when it is dropped.
pub async fn capture_request(
    ctx: &mut Context,
    req: &Request,
    conn: &ConnectionInfo,
    config: &CaptureConfig,
) -> CapturedRequest {
    if let Some(decoded) = decode_body(req.raw_body()) {
        return decoded;
    }
    let ambient = AmbientCollections::from_request(req, conn, config).await;
    let data = ambient.merged();
    for path in ambient.uploads.into_paths() {
        ctx.register_temp_file(path);
    }
    data
}

/// Queue a raw response header for the in-flight response.
#[inline]
pub fn header(ctx: &mut Context, name: &str, value: &str) {
    ctx.set_response_header(name, value);
}
