use axum::{Json, extract::State};
use utoipa::openapi::OpenApi;

use crate::docs::api_doc;
use crate::state::AppState;

/// Documento OpenAPI 3 del API, con el base path configurado como server.
pub async fn openapi_document(State(state): State<AppState>) -> Json<OpenApi> {
    Json(api_doc(state.api()))
}
