mod common;

use common::TestApp;
use reqwest::StatusCode;
use serde_json::{json, Value};
use std::collections::HashSet;

#[tokio::test]
async fn startup_creates_the_document_directory() {
    let app = TestApp::spawn().await;

    assert!(app.directory.is_dir());
}

#[tokio::test]
async fn files_lists_json_documents() {
    let app = TestApp::spawn().await;
    app.write_document("a.json", r#"{"x":1}"#);
    app.write_document("b.json", r#"{"y":2}"#);
    app.write_document("readme.txt", "not a document");

    let response = app.get("/api/files").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.expect("Failed to parse JSON");
    let files: HashSet<String> = body["files"]
        .as_array()
        .expect("files should be an array")
        .iter()
        .map(|f| f.as_str().unwrap().to_string())
        .collect();
    assert_eq!(
        files,
        HashSet::from(["a.json".to_string(), "b.json".to_string()])
    );
}

#[tokio::test]
async fn files_on_empty_directory_is_an_empty_list() {
    let app = TestApp::spawn().await;

    let response = app.get("/api/files").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "files": [] }));
}

#[tokio::test]
async fn file_by_name_returns_document() {
    let app = TestApp::spawn().await;
    app.write_document("a.json", r#"{"x":1}"#);

    for path in ["/api/file/a", "/api/file/a.json"] {
        let response = app.get(path).await;
        assert_eq!(response.status(), StatusCode::OK, "GET {}", path);
        assert_eq!(
            response.headers()["content-type"],
            "application/json",
            "GET {}",
            path
        );

        let body: Value = response.json().await.unwrap();
        assert_eq!(body, json!({ "x": 1 }));
    }
}

#[tokio::test]
async fn unknown_file_is_not_found() {
    let app = TestApp::spawn().await;
    app.write_document("a.json", r#"{"x":1}"#);

    let response = app.get("/api/file/c").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "error": "File not found" }));
}

#[tokio::test]
async fn random_on_empty_directory_is_not_found() {
    let app = TestApp::spawn().await;

    let response = app.get("/api/random").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "error": "No JSON files found" }));
}

#[tokio::test]
async fn random_returns_one_of_the_documents() {
    let app = TestApp::spawn().await;
    app.write_document("a.json", r#"{"x":1}"#);
    app.write_document("b.json", r#"{"y":2}"#);
    let candidates = [json!({ "x": 1 }), json!({ "y": 2 })];

    for _ in 0..10 {
        let response = app.get("/api/random").await;
        assert_eq!(response.status(), StatusCode::OK);

        let body: Value = response.json().await.unwrap();
        assert!(candidates.contains(&body), "unexpected body: {}", body);
    }
}

#[tokio::test]
async fn malformed_file_is_served_as_error_body_with_ok_status() {
    let app = TestApp::spawn().await;
    app.write_document("bad.json", "{ this is not json");

    let response = app.get("/api/file/bad").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.unwrap();
    let message = body["error"].as_str().expect("error-shaped body");
    assert!(
        message.starts_with("Error reading file bad.json: "),
        "unexpected message: {}",
        message
    );
}

#[tokio::test]
async fn changes_on_disk_are_visible_without_restart() {
    let app = TestApp::spawn().await;

    let response = app.get("/api/file/late").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    app.write_document("late.json", r#"{"v":1}"#);
    let body: Value = app.get("/api/file/late").await.json().await.unwrap();
    assert_eq!(body, json!({ "v": 1 }));

    app.write_document("late.json", r#"{"v":2}"#);
    let body: Value = app.get("/api/file/late").await.json().await.unwrap();
    assert_eq!(body, json!({ "v": 2 }));
}

#[tokio::test]
async fn unmatched_route_is_not_found() {
    let app = TestApp::spawn().await;

    let response = app.get("/api/nope").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "error": "Not found" }));
}

#[tokio::test]
async fn health_check_works() {
    let app = TestApp::spawn().await;

    let response = app.get("/health").await;
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "json-service");
}

#[tokio::test]
async fn metrics_endpoint_returns_text() {
    let app = TestApp::spawn().await;

    let response = app.get("/metrics").await;
    assert!(response.status().is_success());

    let content_type = response
        .headers()
        .get("content-type")
        .expect("Missing content-type header")
        .to_str()
        .expect("Invalid content-type");
    assert!(content_type.starts_with("text/plain"));
}
