use axum::{Json, extract::State};

use crate::handlers::response::HealthResponse;
use crate::state::AppState;

/// Liveness check. Does not touch the store or the cache.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse::ok(state.uptime_secs(), state.environment()))
}
