use bitacora_core::Post;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::settings::{ApiSettings, Environment};

/// Post tal como se expone por HTTP.
///
/// Mismo formato JSON que el valor cacheado: campos en camelCase y
/// timestamps RFC 3339.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl From<Post> for PostResponse {
    fn from(post: Post) -> Self {
        Self {
            id: post.id.into(),
            title: post.title,
            description: post.description,
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

/// Respuesta de `GET /health`.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `ok` while the process serves requests
    pub status: String,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
    /// Seconds since the server started
    pub uptime: f64,
    pub environment: Environment,
}

impl HealthResponse {
    pub fn ok(uptime: f64, environment: Environment) -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: OffsetDateTime::now_utc(),
            uptime,
            environment,
        }
    }
}

/// Mapa de endpoints publicado en `GET /`.
#[derive(Debug, Serialize, Deserialize)]
pub struct Endpoints {
    pub docs: String,
    pub health: String,
    pub api: String,
    pub blog: String,
}

/// Respuesta de `GET /`: metadatos estaticos del servicio.
#[derive(Debug, Serialize, Deserialize)]
pub struct AppInfoResponse {
    pub name: String,
    pub version: String,
    pub description: String,
    pub status: String,
    pub features: Vec<String>,
    pub endpoints: Endpoints,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
}

const FEATURES: &[&str] = &[
    "CRUD operations for blog posts",
    "Pagination support",
    "Read-through caching",
    "PostgreSQL storage",
    "OpenAPI documentation",
    "Input validation",
    "Structured error responses",
];

impl AppInfoResponse {
    pub fn new(api: &ApiSettings) -> Self {
        Self {
            name: "Bitacora Blog API".to_string(),
            version: crate::version().to_string(),
            description: "A RESTful API for blog posts with a cache-aside layer".to_string(),
            status: "API is running".to_string(),
            features: FEATURES.iter().map(|f| f.to_string()).collect(),
            endpoints: Endpoints {
                docs: api.docs_route(),
                health: "/health".to_string(),
                api: api.base_path(),
                blog: api.blog_path(),
            },
            timestamp: OffsetDateTime::now_utc(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bitacora_core::{NewPost, PostId};
    use time::macros::datetime;

    #[test]
    fn test_post_response_matches_cached_shape() {
        let post = Post::create(
            PostId::generate(),
            NewPost::new("Title", "Body"),
            datetime!(2024-05-01 10:00 UTC),
        );

        let from_domain = serde_json::to_value(&post).unwrap();
        let from_response = serde_json::to_value(PostResponse::from(post)).unwrap();

        assert_eq!(from_domain, from_response);
    }

    #[test]
    fn test_health_serializes_environment_lowercase() {
        let json = serde_json::to_value(HealthResponse::ok(1.5, Environment::Test)).unwrap();

        assert_eq!(json["status"], "ok");
        assert_eq!(json["environment"], "test");
        assert_eq!(json["uptime"], 1.5);
    }

    #[test]
    fn test_app_info_endpoints_follow_settings() {
        let info = AppInfoResponse::new(&ApiSettings::default());

        assert_eq!(info.endpoints.docs, "/docs");
        assert_eq!(info.endpoints.api, "/api/v1");
        assert_eq!(info.endpoints.blog, "/api/v1/blog");
        assert!(!info.features.is_empty());
    }
}
