//! Tests for the HTTP admin surface
//!
//! These tests verify:
//! - Each route maps onto its store operation
//! - GET query strings and POST form bodies are both accepted
//! - Store failures map onto status codes and error codes
//! - Non-API paths fall through to the static directory

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use bucketview::config::Config;
use bucketview::network::Server;
use bucketview::protocol::{BucketList, EntryList, EntryView, ErrorResponse, StatusResponse};
use bucketview::Store;
use serde::de::DeserializeOwned;
use tempfile::TempDir;
use tower::ServiceExt;

// =============================================================================
// Helper Functions
// =============================================================================

fn setup_app() -> (TempDir, Arc<Store>, Router) {
    let temp_dir = TempDir::new().unwrap();
    let static_dir = temp_dir.path().join("html");
    std::fs::create_dir_all(&static_dir).unwrap();
    std::fs::write(static_dir.join("index.html"), "<h1>buckets</h1>").unwrap();

    let config = Config::builder()
        .db_path(temp_dir.path().join("http.db"))
        .static_dir(&static_dir)
        .build();
    let store = Arc::new(Store::open(&config).unwrap());
    let app = Server::new(config, Arc::clone(&store)).router();
    (temp_dir, store, app)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Vec<u8>) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

async fn post_form(app: &Router, uri: &str, form: &str) -> (StatusCode, Vec<u8>) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(form.to_string()))
        .unwrap();
    send(app, request).await
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = hyper::body::to_bytes(response.into_body()).await.unwrap();
    (status, body.to_vec())
}

fn parse<T: DeserializeOwned>(body: &[u8]) -> T {
    serde_json::from_slice(body).unwrap()
}

fn error_code(body: &[u8]) -> String {
    parse::<ErrorResponse>(body).error.code
}

// =============================================================================
// Bucket Route Tests
// =============================================================================

#[tokio::test]
async fn test_get_buckets_empty() {
    let (_temp, _store, app) = setup_app();

    let (status, body) = get(&app, "/getBuckets").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"[]");
}

#[tokio::test]
async fn test_set_bucket_via_post_form() {
    let (_temp, store, app) = setup_app();

    let (status, body) = post_form(&app, "/setBucket", "bucket=users").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(parse::<StatusResponse>(&body), StatusResponse::ok());
    assert_eq!(store.list_buckets().unwrap(), vec!["users"]);
}

#[tokio::test]
async fn test_set_bucket_via_query() {
    let (_temp, _store, app) = setup_app();

    let (status, _) = get(&app, "/setBucket?bucket=users").await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = get(&app, "/getBuckets").await;
    assert_eq!(parse::<BucketList>(&body).names, vec!["users"]);
}

#[tokio::test]
async fn test_set_bucket_conflict() {
    let (_temp, _store, app) = setup_app();
    post_form(&app, "/setBucket", "bucket=users").await;

    let (status, body) = post_form(&app, "/setBucket", "bucket=users").await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error_code(&body), "BUCKET_EXISTS");
}

#[tokio::test]
async fn test_set_bucket_empty_name() {
    let (_temp, _store, app) = setup_app();

    let (status, body) = post_form(&app, "/setBucket", "bucket=").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&body), "INVALID_NAME");
}

#[tokio::test]
async fn test_del_bucket() {
    let (_temp, store, app) = setup_app();
    store.create_bucket("users").unwrap();

    let (status, _) = post_form(&app, "/delBucket", "bucket=users").await;
    assert_eq!(status, StatusCode::OK);
    assert!(store.list_buckets().unwrap().is_empty());

    let (status, body) = post_form(&app, "/delBucket", "bucket=users").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error_code(&body), "BUCKET_NOT_FOUND");
}

// =============================================================================
// Entry Route Tests
// =============================================================================

#[tokio::test]
async fn test_set_and_get_entries() {
    let (_temp, store, app) = setup_app();
    store.create_bucket("users").unwrap();

    post_form(&app, "/setEntry", "bucket=users&key=2&value=bob").await;
    let (status, _) = post_form(&app, "/setEntry", "bucket=users&key=1&value=alice").await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = get(&app, "/getEntries?buck=users").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        parse::<EntryList>(&body).entries,
        vec![
            EntryView { key: "1".into(), value: "alice".into() },
            EntryView { key: "2".into(), value: "bob".into() },
        ]
    );
}

#[tokio::test]
async fn test_get_entries_json_shape() {
    let (_temp, store, app) = setup_app();
    store.create_bucket("b").unwrap();
    store.set_entry("b", b"key1", b"value1").unwrap();

    let (_, body) = get(&app, "/getEntries?bucket=b").await;

    assert_eq!(body, br#"[{"key":"key1","value":"value1"}]"#);
}

#[tokio::test]
async fn test_get_entries_missing_bucket() {
    let (_temp, _store, app) = setup_app();

    let (status, body) = get(&app, "/getEntries?buck=ghost").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error_code(&body), "BUCKET_NOT_FOUND");
}

#[tokio::test]
async fn test_set_entry_empty_key() {
    let (_temp, store, app) = setup_app();
    store.create_bucket("b").unwrap();

    let (status, body) = get(&app, "/setEntry?bucket=b&key=&value=x").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&body), "INVALID_KEY");
}

#[tokio::test]
async fn test_set_entry_missing_value_stores_empty() {
    let (_temp, store, app) = setup_app();
    store.create_bucket("b").unwrap();

    let (status, _) = post_form(&app, "/setEntry", "bucket=b&key=k").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(store.list_entries("b").unwrap()[0].value, Vec::<u8>::new());
}

#[tokio::test]
async fn test_set_entry_url_encoded_values() {
    let (_temp, store, app) = setup_app();
    store.create_bucket("b").unwrap();

    post_form(&app, "/setEntry", "bucket=b&key=a%20key&value=x%26y").await;

    let entries = store.list_entries("b").unwrap();
    assert_eq!(entries[0].key, b"a key".to_vec());
    assert_eq!(entries[0].value, b"x&y".to_vec());
}

#[tokio::test]
async fn test_del_entry() {
    let (_temp, store, app) = setup_app();
    store.create_bucket("b").unwrap();
    store.set_entry("b", b"k", b"v").unwrap();

    let (status, _) = post_form(&app, "/delEntry", "bucket=b&key=k").await;
    assert_eq!(status, StatusCode::OK);
    assert!(store.list_entries("b").unwrap().is_empty());

    // Absent key is still a success
    let (status, _) = post_form(&app, "/delEntry", "bucket=b&key=k").await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = post_form(&app, "/delEntry", "bucket=ghost&key=k").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_empty_bucket_name_is_not_found() {
    let (_temp, store, app) = setup_app();
    store.create_bucket("b").unwrap();

    let (status, body) = get(&app, "/getEntries?buck=").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error_code(&body), "BUCKET_NOT_FOUND");

    let (status, body) = post_form(&app, "/delBucket", "bucket=").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error_code(&body), "BUCKET_NOT_FOUND");

    let (status, _) = post_form(&app, "/setEntry", "bucket=&key=k&value=v").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = post_form(&app, "/delEntry", "bucket=&key=k").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    assert_eq!(store.list_buckets().unwrap(), vec!["b"]);
}

// =============================================================================
// Parameter Rejection Tests
// =============================================================================

#[tokio::test]
async fn test_get_entries_missing_param_uses_error_envelope() {
    let (_temp, _store, app) = setup_app();

    let (status, body) = get(&app, "/getEntries").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&body), "INVALID_REQUEST");
}

#[tokio::test]
async fn test_form_routes_missing_params_use_error_envelope() {
    let (_temp, _store, app) = setup_app();

    for (uri, form) in [
        ("/setBucket", ""),
        ("/delBucket", ""),
        ("/setEntry", "bucket=b"),
        ("/delEntry", "key=k"),
    ] {
        let (status, body) = post_form(&app, uri, form).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert_eq!(error_code(&body), "INVALID_REQUEST", "{}", uri);
    }
}

// =============================================================================
// Static Files and Lifecycle Tests
// =============================================================================

#[tokio::test]
async fn test_static_fallback() {
    let (_temp, _store, app) = setup_app();

    let (status, body) = get(&app, "/index.html").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"<h1>buckets</h1>");

    let (status, _) = get(&app, "/missing.js").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_exit_acknowledged() {
    let (_temp, _store, app) = setup_app();

    let (status, body) = post_form(&app, "/exit", "").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(parse::<StatusResponse>(&body), StatusResponse::ok());
}

#[tokio::test]
async fn test_server_stops_after_shutdown_signal() {
    let temp = TempDir::new().unwrap();
    let config = Config::builder()
        .db_path(temp.path().join("run.db"))
        .listen_addr("127.0.0.1:0")
        .build();
    let store = Arc::new(Store::open(&config).unwrap());
    let server = Server::new(config, store);

    // A pending notification is consumed as soon as the server starts waiting
    server.shutdown();
    let result = tokio::time::timeout(std::time::Duration::from_secs(5), server.run()).await;

    assert!(matches!(result, Ok(Ok(()))));
}

#[tokio::test]
async fn test_server_rejects_bad_listen_addr() {
    let temp = TempDir::new().unwrap();
    let config = Config::builder()
        .db_path(temp.path().join("bad.db"))
        .listen_addr("not-an-address")
        .build();
    let store = Arc::new(Store::open(&config).unwrap());

    let result = Server::new(config, store).run().await;

    assert!(matches!(result, Err(bucketview::StoreError::Config(_))));
}

#[tokio::test]
async fn test_server_reports_bind_failure_as_io() {
    let occupied = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = occupied.local_addr().unwrap();

    let temp = TempDir::new().unwrap();
    let config = Config::builder()
        .db_path(temp.path().join("busy.db"))
        .listen_addr(addr.to_string())
        .build();
    let store = Arc::new(Store::open(&config).unwrap());

    let result = Server::new(config, store).run().await;

    assert!(matches!(result, Err(bucketview::StoreError::Io(_))));
}
