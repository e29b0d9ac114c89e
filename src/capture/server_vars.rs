//! CGI-style server metadata for the captured request.

use std::borrow::Cow;
use std::time::{SystemTime, UNIX_EPOCH};

use super::{ConnectionInfo, ParamList};
use crate::config::CaptureConfig;
use crate::core::{HttpVersion, Request};

// ============================================================================
// Server variable keys
// ============================================================================

mod keys {
    pub const REQUEST_TIME: &str = "REQUEST_TIME";
    pub const REQUEST_TIME_FLOAT: &str = "REQUEST_TIME_FLOAT";
    pub const REQUEST_METHOD: &str = "REQUEST_METHOD";
    pub const REQUEST_URI: &str = "REQUEST_URI";
    pub const QUERY_STRING: &str = "QUERY_STRING";
    pub const REMOTE_ADDR: &str = "REMOTE_ADDR";
    pub const REMOTE_PORT: &str = "REMOTE_PORT";
    pub const SERVER_NAME: &str = "SERVER_NAME";
    pub const SERVER_PORT: &str = "SERVER_PORT";
    pub const SERVER_ADDR: &str = "SERVER_ADDR";
    pub const SERVER_SOFTWARE: &str = "SERVER_SOFTWARE";
    pub const SERVER_PROTOCOL: &str = "SERVER_PROTOCOL";
    pub const GATEWAY_INTERFACE: &str = "GATEWAY_INTERFACE";
    pub const CONTENT_TYPE: &str = "CONTENT_TYPE";
    pub const CONTENT_LENGTH: &str = "CONTENT_LENGTH";
    pub const HTTPS: &str = "HTTPS";
}

mod values {
    pub const ADDR_0000: &str = "0.0.0.0";
    pub const GATEWAY_INTERFACE: &str = "CGI/1.1";
    pub const HTTPS_ON: &str = "on";
    pub const PORT_80: &str = "80";
    pub const PORT_443: &str = "443";
    pub const LOCALHOST: &str = "localhost";
}

/// Split a Host header into server name and port.
///
/// Falls back to `localhost` and the scheme's default port.
pub fn split_host(host: Option<&str>, tls: bool) -> (Cow<'_, str>, Cow<'_, str>) {
    let default_port = if tls { values::PORT_443 } else { values::PORT_80 };

    let host = match host {
        Some(h) if !h.is_empty() => h,
        _ => return (Cow::Borrowed(values::LOCALHOST), Cow::Borrowed(default_port)),
    };

    match host.rfind(':') {
        // IPv6 literal without port, e.g. "[::1]"
        Some(_) if host.starts_with('[') && !host.contains("]:") => {
            (Cow::Borrowed(host), Cow::Borrowed(default_port))
        }
        Some(pos) => (Cow::Borrowed(&host[..pos]), Cow::Borrowed(&host[pos + 1..])),
        None => (Cow::Borrowed(host), Cow::Borrowed(default_port)),
    }
}

/// `User-Agent` -> `HTTP_USER_AGENT`.
#[inline]
pub fn header_var_name(header: &str) -> String {
    let mut name = String::with_capacity(5 + header.len());
    name.push_str("HTTP_");
    for c in header.chars() {
        name.push(if c == '-' { '_' } else { c.to_ascii_uppercase() });
    }
    name
}

/// Build the server metadata collection for a request.
pub fn server_vars(req: &Request, conn: &ConnectionInfo, config: &CaptureConfig) -> ParamList {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    let query = req.query().unwrap_or("");
    let (server_name, server_port) = split_host(req.host(), conn.tls);

    let mut vars: ParamList = Vec::with_capacity(24 + req.headers().len());
    let mut push = |key: &str, value: String| vars.push((key.to_string(), value));

    push(keys::REQUEST_TIME, now.as_secs().to_string());
    push(keys::REQUEST_TIME_FLOAT, format!("{:.6}", now.as_secs_f64()));
    push(keys::REQUEST_METHOD, req.method().as_str().to_string());
    push(keys::REQUEST_URI, request_uri(req));
    push(keys::QUERY_STRING, query.to_string());
    push(keys::REMOTE_ADDR, conn.remote_addr.ip().to_string());
    push(keys::REMOTE_PORT, conn.remote_addr.port().to_string());
    push(keys::SERVER_NAME, server_name.into_owned());
    push(keys::SERVER_PORT, server_port.into_owned());
    push(keys::SERVER_ADDR, values::ADDR_0000.to_string());
    push(keys::SERVER_SOFTWARE, config.server_software.clone());
    push(
        keys::SERVER_PROTOCOL,
        HttpVersion::from_http(req.version()).as_str().to_string(),
    );
    push(keys::GATEWAY_INTERFACE, values::GATEWAY_INTERFACE.to_string());
    push(keys::CONTENT_TYPE, req.content_type().unwrap_or("").to_string());

    if !req.body().is_empty() {
        push(keys::CONTENT_LENGTH, req.body().len().to_string());
    }

    if conn.tls {
        push(keys::HTTPS, values::HTTPS_ON.to_string());
    }

    for (name, value) in req.headers() {
        if let Ok(value) = value.to_str() {
            push(&header_var_name(name.as_str()), value.to_string());
        }
    }

    vars
}

/// Path and query as sent by the client (no scheme or authority).
fn request_uri(req: &Request) -> String {
    req.uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| "/".to_string())
}
