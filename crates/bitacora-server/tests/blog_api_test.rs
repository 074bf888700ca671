//! Tests HTTP de los endpoints del blog, con backends en memoria.

mod helpers;

use axum::http::StatusCode;
use helpers::{assert_error_body, assert_post_schema, test_app, timestamp};
use serde_json::{Value, json};
use uuid::Uuid;

const BLOG: &str = "/api/v1/blog";

async fn create(app: &helpers::TestApp, title: &str, description: &str) -> Value {
    let response = app
        .client
        .post_json(BLOG, &json!({ "title": title, "description": description }))
        .await;
    response.assert_status(StatusCode::CREATED);
    response.json()
}

fn post_uri(id: &str) -> String {
    format!("{BLOG}/{id}")
}

// === Create ===

#[tokio::test]
async fn create_returns_201_with_post() {
    let app = test_app();

    let post = create(&app, "Test Post", "This is a test post").await;

    assert_post_schema(&post);
    assert_eq!(post["title"], "Test Post");
    assert_eq!(post["description"], "This is a test post");
    assert_eq!(post["createdAt"], post["updatedAt"]);
    assert_eq!(app.store.len(), 1);
}

#[tokio::test]
async fn create_with_empty_title_returns_400() {
    let app = test_app();

    let response = app.client.post_json(BLOG, &json!({ "title": "" })).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body = response.json();
    let message = assert_error_body(&body, "Bad Request");
    assert!(message.contains("title should not be empty"), "{message}");

    let fields: Vec<&str> = body["details"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["field"].as_str().unwrap())
        .collect();
    assert!(fields.contains(&"title"));
    assert!(fields.contains(&"description"));
    assert!(app.store.is_empty());
}

#[tokio::test]
async fn create_with_wrong_types_returns_400() {
    let app = test_app();

    let response = app
        .client
        .post_json(BLOG, &json!({ "title": 42, "description": "x" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_error_body(&response.json(), "Bad Request");
}

#[tokio::test]
async fn create_with_unknown_field_returns_400() {
    let app = test_app();

    let response = app
        .client
        .post_json(
            BLOG,
            &json!({ "title": "a", "description": "b", "author": "me" }),
        )
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let message = assert_error_body(&response.json(), "Bad Request");
    assert!(message.contains("author"), "{message}");
}

#[tokio::test]
async fn create_with_malformed_json_returns_400() {
    let app = test_app();

    let response = app
        .client
        .post_raw(BLOG, "{\"title\": ", "application/json")
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    response.assert_content_type_contains("application/json");
}

#[tokio::test]
async fn create_without_json_content_type_returns_400() {
    let app = test_app();

    let response = app
        .client
        .post_raw(BLOG, r#"{"title":"a","description":"b"}"#, "text/plain")
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn create_over_body_limit_returns_json_413() {
    let app = test_app();
    let description = "x".repeat(helpers::app::TEST_MAX_BODY_BYTES + 1);

    let response = app
        .client
        .post_json(BLOG, &json!({ "title": "big", "description": description }))
        .await;

    response
        .assert_status(StatusCode::PAYLOAD_TOO_LARGE)
        .assert_content_type_contains("application/json");
    assert_error_body(&response.json(), "Payload Too Large");
    assert!(app.store.is_empty());
}

#[tokio::test]
async fn streamed_body_over_limit_returns_json_413() {
    let app = test_app();
    let body = format!(
        r#"{{"title":"big","description":"{}"}}"#,
        "x".repeat(helpers::app::TEST_MAX_BODY_BYTES)
    );

    let response = app.client.post_raw(BLOG, body, "application/json").await;

    response
        .assert_status(StatusCode::PAYLOAD_TOO_LARGE)
        .assert_content_type_contains("application/json");
    assert_error_body(&response.json(), "Payload Too Large");
}

#[tokio::test]
async fn update_over_body_limit_returns_json_413() {
    let app = test_app();
    let created = create(&app, "Small", "body").await;
    let id = created["id"].as_str().unwrap();
    let description = "y".repeat(helpers::app::TEST_MAX_BODY_BYTES + 1);

    let response = app
        .client
        .put_json(&post_uri(id), &json!({ "description": description }))
        .await;

    response.assert_status(StatusCode::PAYLOAD_TOO_LARGE);
    assert_error_body(&response.json(), "Payload Too Large");
    assert_eq!(app.client.get(&post_uri(id)).await.json()["description"], "body");
}

// === Read ===

#[tokio::test]
async fn get_returns_created_post() {
    let app = test_app();
    let created = create(&app, "Hello", "World").await;
    let id = created["id"].as_str().unwrap();

    let response = app.client.get(&post_uri(id)).await;

    response.assert_status(StatusCode::OK);
    assert_eq!(response.json(), created);
}

#[tokio::test]
async fn get_is_served_from_cache_after_first_read() {
    let app = test_app();
    let created = create(&app, "Cached", "Body").await;
    let id = created["id"].as_str().unwrap();

    app.client.get(&post_uri(id)).await.assert_status(StatusCode::OK);
    app.cache.sync().await;
    assert_eq!(app.cache.entry_count(), 1);

    let again = app.client.get(&post_uri(id)).await;
    again.assert_status(StatusCode::OK);
    assert_eq!(again.json(), created);
}

#[tokio::test]
async fn get_unknown_uuid_returns_404() {
    let app = test_app();
    let id = Uuid::new_v4().to_string();

    for _ in 0..2 {
        let response = app.client.get(&post_uri(&id)).await;
        response.assert_status(StatusCode::NOT_FOUND);

        let message = assert_error_body(&response.json(), "Not Found");
        assert_eq!(message, format!("Post with ID {id} not found"));
    }

    app.cache.sync().await;
    assert_eq!(app.cache.entry_count(), 0);
}

#[tokio::test]
async fn get_non_uuid_id_returns_404() {
    let app = test_app();

    let response = app.client.get(&post_uri("not-a-uuid")).await;

    response.assert_status(StatusCode::NOT_FOUND);
    let message = assert_error_body(&response.json(), "Not Found");
    assert_eq!(message, "Post with ID not-a-uuid not found");
}

// === List ===

#[tokio::test]
async fn list_empty_returns_empty_array() {
    let app = test_app();

    let response = app.client.get(BLOG).await;

    response.assert_status(StatusCode::OK);
    assert_eq!(response.json(), json!([]));
}

#[tokio::test]
async fn list_returns_newest_first_with_step() {
    let app = test_app();
    for i in 0..7 {
        create(&app, &format!("Post {i}"), "body").await;
    }

    let response = app.client.get(&format!("{BLOG}?page=1&step=5")).await;
    response.assert_status(StatusCode::OK);

    let posts = response.json();
    let posts = posts.as_array().unwrap();
    assert_eq!(posts.len(), 5);
    assert_eq!(posts[0]["title"], "Post 6");
    assert_eq!(posts[4]["title"], "Post 2");

    for pair in posts.windows(2) {
        assert!(timestamp(&pair[0], "createdAt") >= timestamp(&pair[1], "createdAt"));
    }
}

#[tokio::test]
async fn list_pages_do_not_overlap() {
    let app = test_app();
    for i in 0..7 {
        create(&app, &format!("Post {i}"), "body").await;
    }

    let first = app.client.get(&format!("{BLOG}?page=1&step=5")).await.json();
    let second = app.client.get(&format!("{BLOG}?page=2&step=5")).await.json();
    let third = app.client.get(&format!("{BLOG}?page=3&step=5")).await.json();

    let second = second.as_array().unwrap();
    assert_eq!(second.len(), 2);
    assert_eq!(second[1]["title"], "Post 0");
    for post in second {
        assert!(!first.as_array().unwrap().contains(post));
    }
    assert_eq!(third, json!([]));
}

#[tokio::test]
async fn list_defaults_to_ten_per_page() {
    let app = test_app();
    for i in 0..12 {
        create(&app, &format!("Post {i}"), "body").await;
    }

    let posts = app.client.get(BLOG).await.json();

    assert_eq!(posts.as_array().unwrap().len(), 10);
}

#[tokio::test]
async fn list_with_invalid_pagination_returns_400() {
    let app = test_app();

    for query in ["page=0", "step=0", "page=-1", "page=abc", "limit=5"] {
        let response = app.client.get(&format!("{BLOG}?{query}")).await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert_error_body(&response.json(), "Bad Request");
    }
}

#[tokio::test]
async fn create_invalidates_cached_listing() {
    let app = test_app();
    create(&app, "First", "body").await;

    let before = app.client.get(BLOG).await.json();
    assert_eq!(before.as_array().unwrap().len(), 1);

    create(&app, "Second", "body").await;

    let after = app.client.get(BLOG).await.json();
    let after = after.as_array().unwrap();
    assert_eq!(after.len(), 2);
    assert_eq!(after[0]["title"], "Second");
}

// === Update ===

#[tokio::test]
async fn update_changes_only_given_fields() {
    let app = test_app();
    let created = create(&app, "Original", "Keep me").await;
    let id = created["id"].as_str().unwrap();

    let response = app
        .client
        .put_json(&post_uri(id), &json!({ "title": "Changed" }))
        .await;
    response.assert_status(StatusCode::OK);

    let updated = response.json();
    assert_post_schema(&updated);
    assert_eq!(updated["id"], created["id"]);
    assert_eq!(updated["title"], "Changed");
    assert_eq!(updated["description"], "Keep me");
    assert_eq!(updated["createdAt"], created["createdAt"]);
    assert!(timestamp(&updated, "updatedAt") >= timestamp(&created, "updatedAt"));

    let fetched = app.client.get(&post_uri(id)).await.json();
    assert_eq!(fetched, updated);
}

#[tokio::test]
async fn update_evicts_cached_post() {
    let app = test_app();
    let created = create(&app, "Before", "body").await;
    let id = created["id"].as_str().unwrap();

    app.client.get(&post_uri(id)).await.assert_status(StatusCode::OK);
    app.client
        .put_json(&post_uri(id), &json!({ "description": "after" }))
        .await
        .assert_status(StatusCode::OK);

    let fetched = app.client.get(&post_uri(id)).await.json();
    assert_eq!(fetched["description"], "after");
}

#[tokio::test]
async fn update_unknown_post_returns_404() {
    let app = test_app();
    let id = Uuid::new_v4().to_string();

    let response = app
        .client
        .put_json(&post_uri(&id), &json!({ "title": "X" }))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
    let message = assert_error_body(&response.json(), "Not Found");
    assert_eq!(message, format!("Post with ID {id} not found"));
}

#[tokio::test]
async fn update_with_empty_title_returns_400() {
    let app = test_app();
    let created = create(&app, "Title", "body").await;
    let id = created["id"].as_str().unwrap();

    let response = app
        .client
        .put_json(&post_uri(id), &json!({ "title": "" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let fetched = app.client.get(&post_uri(id)).await.json();
    assert_eq!(fetched["title"], "Title");
}

#[tokio::test]
async fn update_with_empty_body_keeps_content() {
    let app = test_app();
    let created = create(&app, "Title", "body").await;
    let id = created["id"].as_str().unwrap();

    let response = app.client.put_json(&post_uri(id), &json!({})).await;

    response.assert_status(StatusCode::OK);
    let updated = response.json();
    assert_eq!(updated["title"], "Title");
    assert_eq!(updated["description"], "body");
}

// === Delete ===

#[tokio::test]
async fn delete_returns_200_with_empty_body() {
    let app = test_app();
    let created = create(&app, "Doomed", "body").await;
    let id = created["id"].as_str().unwrap();

    let response = app.client.delete(&post_uri(id)).await;

    response.assert_status(StatusCode::OK);
    assert!(response.body.is_empty());
    assert!(app.store.is_empty());
}

#[tokio::test]
async fn get_after_delete_returns_404() {
    let app = test_app();
    let created = create(&app, "Doomed", "body").await;
    let id = created["id"].as_str().unwrap();

    app.client.get(&post_uri(id)).await.assert_status(StatusCode::OK);
    app.client.delete(&post_uri(id)).await.assert_status(StatusCode::OK);

    app.client
        .get(&post_uri(id))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_unknown_post_returns_404() {
    let app = test_app();
    let id = Uuid::new_v4().to_string();

    let response = app.client.delete(&post_uri(&id)).await;

    response.assert_status(StatusCode::NOT_FOUND);
    assert_error_body(&response.json(), "Not Found");
}

// === Full scenario ===

#[tokio::test]
async fn crud_scenario() {
    let app = test_app();

    let created = create(&app, "Test Post", "This is a test post").await;
    let id = created["id"].as_str().unwrap().to_string();

    app.client
        .post_json(BLOG, &json!({ "title": "" }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    let page = app.client.get(&format!("{BLOG}?page=1&step=5")).await;
    page.assert_status(StatusCode::OK);
    let posts = page.json();
    assert!(posts.as_array().unwrap().len() <= 5);
    assert_eq!(posts[0]["id"], id.as_str());

    let missing = Uuid::new_v4().to_string();
    app.client
        .put_json(&post_uri(&missing), &json!({ "title": "X" }))
        .await
        .assert_status(StatusCode::NOT_FOUND);
    app.client
        .delete(&post_uri(&missing))
        .await
        .assert_status(StatusCode::NOT_FOUND);

    app.client.delete(&post_uri(&id)).await.assert_status(StatusCode::OK);
    app.client
        .get(&post_uri(&id))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}
