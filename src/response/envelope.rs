//! The response envelope and its builders.

use http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::catalog::{http as codes, status};
use crate::core::{Context, Response};

/// Code used when a builder is given none.
pub const DEFAULT_CODE: u16 = codes::OK;

/// Code used by [`error`] when given none.
pub const DEFAULT_ERROR_CODE: u16 = codes::INTERNAL_SERVER_ERROR;

/// Uniform response record.
///
/// Serializes as `{"code", "status", "message", "data"?}`. `message` is
/// `null` when absent; `data` is left out entirely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub code: u16,
    pub status: String,
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl Envelope {
    /// Whether the envelope carries a semantic error label.
    #[inline]
    pub fn is_error(&self) -> bool {
        status::is_error(&self.status)
    }

    /// Convert into a transport response.
    ///
    /// The body is the JSON envelope. The status line carries `code`, or 500
    /// when `code` is not a valid HTTP status. Headers queued on `ctx` are
    /// appended after `Content-Type`.
    pub fn into_response(self, ctx: &Context) -> Response {
        let status = StatusCode::from_u16(self.code).unwrap_or_else(|_| {
            tracing::debug!(code = self.code, "envelope code is not a valid status, using 500");
            StatusCode::INTERNAL_SERVER_ERROR
        });

        let body = match serde_json::to_vec(&self) {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!(error = %e, "failed to encode envelope");
                return Response::empty(StatusCode::INTERNAL_SERVER_ERROR);
            }
        };

        let mut builder = Response::builder().status(status).json().body(body);
        for (name, value) in ctx.response_headers() {
            builder = builder.header(name, value);
        }
        builder.build()
    }
}

/// Whether a data value counts as absent.
///
/// `null`, `""`, `{}` and `[]` are empty. `false`, `0` and `"0"` are kept.
#[inline]
pub fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}

/// Build an envelope and set the transport status code on `ctx`.
///
/// `code` defaults to 200 and is not checked against the catalog.
pub fn build(
    ctx: &mut Context,
    status: &str,
    message: Option<&str>,
    code: Option<u16>,
    data: Option<Value>,
) -> Envelope {
    let code = code.unwrap_or(DEFAULT_CODE);
    ctx.set_status_code(code);

    Envelope {
        code,
        status: status.to_string(),
        message: message.map(str::to_string),
        data: data.filter(|value| !is_empty_value(value)),
    }
}

/// Alias of [`build`] for caller-defined labels.
#[inline]
pub fn custom(
    ctx: &mut Context,
    status: &str,
    message: Option<&str>,
    code: Option<u16>,
    data: Option<Value>,
) -> Envelope {
    build(ctx, status, message, code, data)
}

#[inline]
pub fn success(
    ctx: &mut Context,
    message: Option<&str>,
    code: Option<u16>,
    data: Option<Value>,
) -> Envelope {
    build(ctx, status::SUCCESS, message, code, data)
}

/// Error envelope. `code` defaults to 500.
#[inline]
pub fn error(
    ctx: &mut Context,
    message: Option<&str>,
    code: Option<u16>,
    data: Option<Value>,
) -> Envelope {
    build(
        ctx,
        status::ERROR,
        message,
        Some(code.unwrap_or(DEFAULT_ERROR_CODE)),
        data,
    )
}

#[inline]
pub fn warning(
    ctx: &mut Context,
    message: Option<&str>,
    code: Option<u16>,
    data: Option<Value>,
) -> Envelope {
    build(ctx, status::WARNING, message, code, data)
}

#[inline]
pub fn info(
    ctx: &mut Context,
    message: Option<&str>,
    code: Option<u16>,
    data: Option<Value>,
) -> Envelope {
    build(ctx, status::INFO, message, code, data)
}
