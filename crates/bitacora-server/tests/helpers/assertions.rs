//! Custom assertions para tests.

use serde_json::Value;
use time::{OffsetDateTime, format_description::well_known::Rfc3339};
use uuid::Uuid;

/// Verifica que el JSON tenga la forma publica de un post.
pub fn assert_post_schema(json: &Value) {
    let obj = json.as_object().expect("Post should be a JSON object");

    for field in ["id", "title", "description", "createdAt", "updatedAt"] {
        assert!(obj.contains_key(field), "Missing '{field}' field: {json}");
    }
    assert_eq!(obj.len(), 5, "Unexpected extra fields: {json}");

    let id = obj["id"].as_str().expect("'id' should be a string");
    assert!(Uuid::parse_str(id).is_ok(), "'id' is not a UUID: {id}");

    assert!(obj["title"].is_string(), "'title' should be a string");
    assert!(obj["description"].is_string(), "'description' should be a string");

    for field in ["createdAt", "updatedAt"] {
        let raw = obj[field].as_str().expect("timestamp should be a string");
        assert!(
            OffsetDateTime::parse(raw, &Rfc3339).is_ok(),
            "'{field}' is not RFC 3339: {raw}"
        );
    }
}

/// Verifica el body de error comun y devuelve el mensaje.
pub fn assert_error_body(json: &Value, error: &str) -> String {
    assert_eq!(json["error"], error, "Unexpected error body: {json}");
    json["message"]
        .as_str()
        .expect("'message' should be a string")
        .to_string()
}

/// Parsea un timestamp RFC 3339 de un post.
pub fn timestamp(json: &Value, field: &str) -> OffsetDateTime {
    let raw = json[field].as_str().expect("timestamp should be a string");
    OffsetDateTime::parse(raw, &Rfc3339).expect("RFC 3339 timestamp")
}
