//! # Bitacora Server
//!
//! HTTP server for the Bitacora blog API.
//!
//! Requests flow through axum handlers into [`PostService`], which reads
//! through a [`CacheGateway`] (Redis or in-process Moka) before hitting the
//! [`PostStore`](bitacora_store::PostStore) (PostgreSQL or in-memory).
//!
//! ## Routes
//!
//! - `GET /` - service info and endpoint map
//! - `GET /health` - liveness
//! - `GET /docs` - OpenAPI document
//! - `GET|POST {base}/blog`, `GET|PUT|DELETE {base}/blog/{id}` - posts
//! - `GET /metrics` - Prometheus exposition (binary only)

pub mod cache;
pub mod docs;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod server;
pub mod service;
pub mod settings;
pub mod state;
pub mod telemetry;

pub use cache::{CacheGateway, CacheStore, MemoryCache, RedisCache};
pub use error::{AppError, ErrorResponse};
pub use server::{create_router, create_router_with_metrics, run_server};
pub use service::{PostService, PostServiceError};
pub use settings::{Environment, Settings};
pub use state::AppState;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
