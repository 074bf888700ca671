use axum::{
    Json,
    extract::State,
    http::{Method, Uri},
};

use crate::error::AppError;
use crate::handlers::response::AppInfoResponse;
use crate::state::AppState;

/// Service metadata and endpoint map.
pub async fn app_info(State(state): State<AppState>) -> Json<AppInfoResponse> {
    Json(AppInfoResponse::new(state.api()))
}

/// Fallback para rutas inexistentes, con el mismo body de error que el resto.
pub async fn route_not_found(method: Method, uri: Uri) -> AppError {
    AppError::NotFound(format!("Cannot {} {}", method, uri.path()))
}
