use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use bitacora_core::PostId;

use crate::error::AppError;

/// Extractor para rutas `/blog/{id}`.
///
/// Un id que no es UUID no puede nombrar ningun post, asi que se responde 404
/// igual que para un UUID inexistente.
#[derive(Debug, Clone, Copy)]
pub struct PostIdPath(pub PostId);

impl<S> FromRequestParts<S> for PostIdPath
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state).await?;

        raw.parse::<PostId>()
            .map(Self)
            .map_err(|_| AppError::NotFound(format!("Post with ID {raw} not found")))
    }
}
