//! Tests de `/`, `/docs` y del fallback.

mod helpers;

use axum::http::StatusCode;
use bitacora_server::settings::ApiSettings;
use helpers::{assert_error_body, test_app, test_app_with};
use serde_json::json;

#[tokio::test]
async fn root_lists_service_info() {
    let response = test_app().client.get("/").await;
    response.assert_status(StatusCode::OK);

    let body = response.json();
    assert_eq!(body["name"], "Bitacora Blog API");
    assert_eq!(body["version"], bitacora_server::version());
    assert_eq!(body["status"], "API is running");
    assert!(!body["features"].as_array().unwrap().is_empty());
    assert_eq!(
        body["endpoints"],
        json!({
            "docs": "/docs",
            "health": "/health",
            "api": "/api/v1",
            "blog": "/api/v1/blog",
        })
    );
}

#[tokio::test]
async fn docs_serves_openapi_document() {
    let response = test_app().client.get("/docs").await;
    response
        .assert_status(StatusCode::OK)
        .assert_content_type_contains("application/json");

    let doc = response.json();
    assert!(doc["openapi"].as_str().unwrap().starts_with("3."));
    assert_eq!(doc["info"]["title"], "Bitacora Blog API");
    assert_eq!(doc["servers"][0]["url"], "/api/v1");

    let paths = doc["paths"].as_object().unwrap();
    assert!(paths["/blog"]["get"].is_object());
    assert!(paths["/blog"]["post"].is_object());
    assert!(paths["/blog/{id}"]["get"].is_object());
    assert!(paths["/blog/{id}"]["put"].is_object());
    assert!(paths["/blog/{id}"]["delete"].is_object());
}

#[tokio::test]
async fn custom_api_layout_moves_routes() {
    let app = test_app_with(ApiSettings {
        prefix: "rest".into(),
        version: "v2".into(),
        docs_path: "openapi".into(),
    });

    app.client
        .get("/rest/v2/blog")
        .await
        .assert_status(StatusCode::OK);
    app.client
        .get("/api/v1/blog")
        .await
        .assert_status(StatusCode::NOT_FOUND);

    let doc = app.client.get("/openapi").await;
    doc.assert_status(StatusCode::OK);
    assert_eq!(doc.json()["servers"][0]["url"], "/rest/v2");
}

#[tokio::test]
async fn unknown_route_returns_json_404() {
    let response = test_app().client.get("/nope").await;

    response.assert_status(StatusCode::NOT_FOUND);
    let message = assert_error_body(&response.json(), "Not Found");
    assert_eq!(message, "Cannot GET /nope");
}

#[tokio::test]
async fn unsupported_method_is_rejected() {
    let response = test_app().client.delete("/api/v1/blog").await;

    response.assert_status(StatusCode::METHOD_NOT_ALLOWED);
}
