//! Tests de middleware.

mod helpers;

use axum::http::StatusCode;
use helpers::test_app;
use uuid::Uuid;

// === Request ID ===

#[tokio::test]
async fn response_includes_request_id() {
    let response = test_app().client.get("/health").await;

    response.assert_header_exists("x-request-id");
}

#[tokio::test]
async fn generated_request_id_is_uuid_v4() {
    let response = test_app().client.get("/health").await;

    let id = response.header("x-request-id").unwrap();
    let parsed = Uuid::parse_str(id).unwrap();

    assert_eq!(parsed.get_version_num(), 4);
}

#[tokio::test]
async fn propagates_incoming_request_id() {
    let custom_id = "my-custom-request-id-12345";

    let response = test_app()
        .client
        .get_with_headers("/health", vec![("x-request-id", custom_id)])
        .await;

    response.assert_header("x-request-id", custom_id);
}

#[tokio::test]
async fn generates_different_ids_for_each_request() {
    let app = test_app();

    let first = app.client.get("/health").await;
    let second = app.client.get("/health").await;

    assert_ne!(
        first.header("x-request-id").unwrap(),
        second.header("x-request-id").unwrap()
    );
}

#[tokio::test]
async fn request_id_present_on_errors() {
    let app = test_app();

    let not_found = app
        .client
        .get(&format!("/api/v1/blog/{}", Uuid::new_v4()))
        .await;
    not_found.assert_status(StatusCode::NOT_FOUND);
    not_found.assert_header_exists("x-request-id");

    let fallback = app.client.get("/does/not/exist").await;
    fallback.assert_header_exists("x-request-id");
}
