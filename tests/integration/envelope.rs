//! Envelope tests: builders, transport responses, rendering.

use bytes::Bytes;
use http::StatusCode;
use http_envelope::capture::{capture_request, header};
use http_envelope::catalog::{http as codes, status};
use http_envelope::config::CaptureConfig;
use http_envelope::core::Context;
use http_envelope::response::{self, errors, render, Envelope};
use serde_json::{json, Value};

use crate::helpers::*;

/// Echo captured data back inside a success envelope
#[tokio::test]
async fn test_echo_captured_data() {
    let req = TestRequest::post("/echo")
        .json(r#"{"package":"envelope"}"#)
        .collect()
        .await;
    let mut ctx = Context::new();
    let data = capture_request(&mut ctx, &req, &client(), &CaptureConfig::default()).await;

    header(&mut ctx, "X-Request-Id", "req-1");
    let envelope = response::success(
        &mut ctx,
        Some("received"),
        Some(codes::CREATED),
        Some(Value::Object(data)),
    );
    let res: http::Response<Bytes> = envelope.into_response(&ctx).into();

    assert_status(&res, StatusCode::CREATED);
    assert_header(&res, "content-type", "application/json");
    assert_header(&res, "x-request-id", "req-1");
    assert_eq!(
        body_json(&res),
        json!({
            "code": 201,
            "status": "success",
            "message": "received",
            "data": {"package": "envelope"}
        })
    );
}

/// Error envelope without a code is a 500
#[test]
fn test_error_without_code() {
    let mut ctx = Context::default();
    let envelope = response::error(&mut ctx, Some("boom"), None, Some(json!([])));

    assert_eq!(ctx.status_code(), 500);
    let res: http::Response<Bytes> = envelope.into_response(&ctx).into();
    assert_status(&res, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body_json(&res),
        json!({"code": 500, "status": "error", "message": "boom"})
    );
}

/// Each request gets its own status code
#[test]
fn test_contexts_are_isolated() {
    let mut first = Context::default();
    let mut second = Context::default();

    response::warning(&mut first, None, Some(codes::TOO_MANY_REQUESTS), None);
    response::info(&mut second, None, None, None);

    assert_eq!(first.status_code(), 429);
    assert_eq!(second.status_code(), 200);
}

/// Custom labels pass through untouched
#[test]
fn test_custom_label_and_catalog_errors() {
    let mut ctx = Context::default();
    let envelope = response::custom(
        &mut ctx,
        status::DATABASE_ERROR,
        Some("connection refused"),
        Some(codes::SERVICE_UNAVAILABLE),
        Some(json!({"retry": true})),
    );

    assert!(envelope.is_error());
    assert!(errors().contains(&envelope.status.as_str()));
    assert_eq!(errors().len(), 8);
    assert_eq!(codes::reason(envelope.code), Some("Service Unavailable"));
}

/// Rendered output parses back into the same envelope
#[test]
fn test_render_round_trip() {
    let mut ctx = Context::default();
    let envelope = response::success(&mut ctx, None, None, Some(json!({"n": 0})));

    let bytes = render(&envelope, true).unwrap();
    let parsed: Envelope = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(parsed, envelope);
    assert_eq!(http_envelope::json::decode("[1,2]"), Some(json!([1, 2])));
}
