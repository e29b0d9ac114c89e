//! Capture tests: JSON bodies, ambient merging, uploads.

use crate::helpers::*;
use http_envelope::capture::{
    capture, capture_request, AmbientCollections, MAX_NESTING_DEPTH, UPLOAD_ERR_OK,
    UPLOAD_ERR_SIZE,
};
use http_envelope::config::CaptureConfig;
use http_envelope::core::Context;
use serde_json::{json, Value};

/// JSON body replaces every ambient collection
#[tokio::test]
async fn test_json_body_is_the_result() {
    let req = TestRequest::post("/users?debug=1")
        .header("cookie", "sid=abc")
        .json(r#"{"name":"Sergio","roles":["admin"]}"#)
        .collect()
        .await;

    let mut ctx = Context::new();

    let data = capture_request(&mut ctx, &req, &client(), &CaptureConfig::default()).await;

    assert_eq!(
        Value::Object(data),
        json!({"name": "Sergio", "roles": ["admin"]})
    );
}

/// Query string and server metadata with no body
#[tokio::test]
async fn test_get_merges_query_and_server() {
    let req = TestRequest::get("/search?q=rust&page=3")
        .header("host", "api.test")
        .collect()
        .await;

    let mut ctx = Context::new();

    let data = capture_request(&mut ctx, &req, &client(), &CaptureConfig::default()).await;

    assert_eq!(data["q"], "rust");
    assert_eq!(data["page"], "3");
    assert_eq!(data["REQUEST_METHOD"], "GET");
    assert_eq!(data["REMOTE_ADDR"], "10.0.0.7");
    assert_eq!(data["SERVER_NAME"], "api.test");
    assert_eq!(data["QUERY_STRING"], "q=rust&page=3");
}

/// Form fields lose to query parameters, cookies win over everything
#[tokio::test]
async fn test_precedence_form_query_cookie() {
    let req = TestRequest::post("/?who=query&where=query")
        .header("cookie", "where=cookie")
        .form("who=form&what=form")
        .collect()
        .await;

    let mut ctx = Context::new();

    let data = capture_request(&mut ctx, &req, &client(), &CaptureConfig::default()).await;

    assert_eq!(data["what"], "form");
    assert_eq!(data["who"], "query");
    assert_eq!(data["where"], "cookie");
}

/// Malformed JSON falls back to the ambient collections
#[tokio::test]
async fn test_malformed_json_uses_ambient() {
    let req = TestRequest::post("/?fallback=yes")
        .json("{\"unterminated\": ")
        .collect()
        .await;

    let mut ctx = Context::new();

    let data = capture_request(&mut ctx, &req, &client(), &CaptureConfig::default()).await;

    assert_eq!(data["fallback"], "yes");
    assert!(data.get("unterminated").is_none());
}

/// Multipart fields and files land in the captured map
#[tokio::test]
async fn test_multipart_upload() {
    let dir = tempfile::tempdir().unwrap();
    let req = TestRequest::post("/upload")
        .multipart(&[
            "Content-Disposition: form-data; name=\"title\"\r\n\r\nReport",
            "Content-Disposition: form-data; name=\"attachment\"; filename=\"report.csv\"\r\nContent-Type: text/csv\r\n\r\na,b\n1,2",
        ])
        .collect()
        .await;

    let mut ctx = Context::new();

    let data = capture_request(&mut ctx, &req, &client(), &capture_config(&dir)).await;

    assert_eq!(data["title"], "Report");
    let file = &data["attachment"];
    assert_eq!(file["name"], "report.csv");
    assert_eq!(file["type"], "text/csv");
    assert_eq!(file["error"], UPLOAD_ERR_OK);
    assert_eq!(file["size"], 7);

    let keys: Vec<&str> = file
        .as_object()
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(keys, ["name", "type", "tmp_name", "error", "size"]);

    let tmp_name = file["tmp_name"].as_str().unwrap();
    assert!(tmp_name.starts_with(dir.path().to_str().unwrap()));
    assert_eq!(std::fs::read(tmp_name).unwrap(), b"a,b\n1,2");
}

/// Several files under one field use the column-wise shape
#[tokio::test]
async fn test_multipart_multiple_files() {
    let dir = tempfile::tempdir().unwrap();
    let req = TestRequest::post("/upload")
        .multipart(&[
            "Content-Disposition: form-data; name=\"photos[]\"; filename=\"a.jpg\"\r\nContent-Type: image/jpeg\r\n\r\nA",
            "Content-Disposition: form-data; name=\"photos[]\"; filename=\"b.jpg\"\r\nContent-Type: image/jpeg\r\n\r\nBB",
        ])
        .collect()
        .await;

    let mut ctx = Context::new();

    let data = capture_request(&mut ctx, &req, &client(), &capture_config(&dir)).await;

    assert_eq!(data["photos"]["name"], json!(["a.jpg", "b.jpg"]));
    assert_eq!(data["photos"]["size"], json!([1, 2]));
    assert_eq!(data["photos"]["error"], json!([0, 0]));
}

/// Capturing twice with no intervening change gives the same map
#[test]
fn test_capture_idempotent_from_request() {
    let req = tokio_test::block_on(
        TestRequest::get("/items?sort=asc")
            .header("cookie", "theme=dark")
            .collect(),
    );
    let ambient = tokio_test::block_on(AmbientCollections::from_request(
        &req,
        &client(),
        &CaptureConfig::default(),
    ));

    let first = capture(&req, &ambient);
    let second = capture(&req, &ambient);

    assert_eq!(first, second);
    assert_eq!(first["sort"], "asc");
    assert_eq!(first["theme"], "dark");
}

/// Uploaded temp files live as long as the request context
#[tokio::test]
async fn test_uploads_removed_when_context_drops() {
    let dir = tempfile::tempdir().unwrap();
    let req = TestRequest::post("/upload")
        .multipart(&[
            "Content-Disposition: form-data; name=\"a\"; filename=\"a.txt\"\r\n\r\nfirst",
            "Content-Disposition: form-data; name=\"b\"; filename=\"b.txt\"\r\n\r\nsecond",
        ])
        .collect()
        .await;

    let mut ctx = Context::new();
    let data = capture_request(&mut ctx, &req, &client(), &capture_config(&dir)).await;

    assert_eq!(ctx.temp_files().len(), 2);
    assert_eq!(std::fs::read(data["b"]["tmp_name"].as_str().unwrap()).unwrap(), b"second");

    drop(ctx);
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

/// A file over the size limit is reported, not stored
#[tokio::test]
async fn test_oversized_upload_reports_size_error() {
    let dir = tempfile::tempdir().unwrap();
    let config = CaptureConfig {
        max_upload_size: 8,
        ..capture_config(&dir)
    };
    let req = TestRequest::post("/upload")
        .multipart(&[
            "Content-Disposition: form-data; name=\"avatar\"; filename=\"big.png\"\r\nContent-Type: image/png\r\n\r\n0123456789abcdef",
        ])
        .collect()
        .await;

    let mut ctx = Context::new();
    let data = capture_request(&mut ctx, &req, &client(), &config).await;

    let file = &data["avatar"];
    assert_eq!(file["error"], UPLOAD_ERR_SIZE);
    assert_eq!(file["size"], 16);
    assert_eq!(file["tmp_name"], "");
    assert!(ctx.temp_files().is_empty());
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

/// `[]` after a numeric key appends past the highest index
#[tokio::test]
async fn test_append_after_numeric_form_key() {
    let req = TestRequest::post("/")
        .form("a[1]=x&a[]=y&a[k]=z&a[]=w")
        .collect()
        .await;

    let mut ctx = Context::new();
    let data = capture_request(&mut ctx, &req, &client(), &CaptureConfig::default()).await;

    assert_eq!(data["a"], json!({"1": "x", "2": "y", "k": "z", "3": "w"}));
}

/// Over-deep bracket keys are discarded without affecting other fields
#[tokio::test]
async fn test_deep_bracket_key_discarded() {
    let deep = format!("deep{}=1", "[x]".repeat(50_000));
    let limit = format!("limit{}=1", "[]".repeat(MAX_NESTING_DEPTH));
    let req = TestRequest::post("/")
        .form(&format!("{deep}&{limit}&kept=yes"))
        .collect()
        .await;

    let mut ctx = Context::new();
    let data = capture_request(&mut ctx, &req, &client(), &CaptureConfig::default()).await;

    assert!(data.get("deep").is_none());
    assert_eq!(data["kept"], "yes");

    let mut depth = 0;
    let mut cursor = &data["limit"];
    while let Some(items) = cursor.as_array() {
        cursor = &items[0];
        depth += 1;
    }
    assert_eq!(depth, MAX_NESTING_DEPTH);
    assert_eq!(*cursor, "1");
}
