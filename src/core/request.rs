//! Buffered HTTP request read by capture.

use bytes::Bytes;
use http::header::{self, HeaderName};
use http::{HeaderMap, Method, Uri};
use http_body_util::BodyExt;

use super::{Error, Result};

const MULTIPART_FORM: &str = "multipart/form-data";
const URLENCODED_FORM: &str = "application/x-www-form-urlencoded";

/// HTTP request whose body has been read into memory.
#[derive(Debug)]
pub struct Request {
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
    version: http::Version,
}

impl Request {
    /// Read a streaming body (e.g. `hyper::body::Incoming`) to the end.
    pub async fn collect<B>(req: http::Request<B>) -> Result<Self>
    where
        B: hyper::body::Body,
        B::Error: std::fmt::Display,
    {
        let (parts, body) = req.into_parts();
        let body = body
            .collect()
            .await
            .map_err(|e| Error::Body(e.to_string()))?
            .to_bytes();

        tracing::debug!(
            method = %parts.method,
            uri = %parts.uri,
            body_len = body.len(),
            "collected request body"
        );

        Ok(Self::from_parts(parts, body))
    }

    fn from_parts(parts: http::request::Parts, body: Bytes) -> Self {
        Self {
            method: parts.method,
            uri: parts.uri,
            headers: parts.headers,
            body,
            version: parts.version,
        }
    }

    #[inline]
    pub fn method(&self) -> &Method {
        &self.method
    }

    #[inline]
    pub fn uri(&self) -> &Uri {
        &self.uri
    }

    #[inline]
    pub fn query(&self) -> Option<&str> {
        self.uri.query()
    }

    #[inline]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    #[inline]
    pub fn body(&self) -> &Bytes {
        &self.body
    }

    #[inline]
    pub fn version(&self) -> http::Version {
        self.version
    }

    #[inline]
    fn header_str(&self, name: &HeaderName) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    #[inline]
    pub fn content_type(&self) -> Option<&str> {
        self.header_str(&header::CONTENT_TYPE)
    }

    #[inline]
    pub fn cookie(&self) -> Option<&str> {
        self.header_str(&header::COOKIE)
    }

    /// Host header, or the URI authority when absent (HTTP/2).
    #[inline]
    pub fn host(&self) -> Option<&str> {
        self.header_str(&header::HOST)
            .or_else(|| self.uri.authority().map(|a| a.as_str()))
    }

    pub fn is_multipart(&self) -> bool {
        self.content_type_is(MULTIPART_FORM)
    }

    pub fn is_urlencoded(&self) -> bool {
        self.content_type_is(URLENCODED_FORM)
    }

    /// Media type check, ignoring case and parameters.
    fn content_type_is(&self, media_type: &str) -> bool {
        self.content_type()
            .and_then(|ct| ct.trim_start().get(..media_type.len()))
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(media_type))
    }
}

impl<B> From<http::Request<B>> for Request
where
    B: Into<Bytes>,
{
    fn from(req: http::Request<B>) -> Self {
        let (parts, body) = req.into_parts();
        Self::from_parts(parts, body.into())
    }
}
