use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use bitacora_core::DomainError;
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::ToSchema;
use validator::ValidationErrors;

use crate::service::PostServiceError;

#[derive(Debug)]
pub enum AppError {
    /// Recurso no encontrado
    NotFound(String),

    /// Parametros o body invalidos
    BadRequest {
        message: String,
        details: Vec<FieldError>,
    },

    /// Body por encima del limite configurado
    PayloadTooLarge(String),

    /// Error interno; el detalle solo va al log
    Internal(String),
}

/// Error de validacion de un campo concreto.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Body JSON de todas las respuestas de error.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Reason phrase of the status code
    pub error: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<FieldError>,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
            details: Vec::new(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Self::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let reason = status.canonical_reason().unwrap_or("Error").to_string();

        let (message, details) = match self {
            AppError::NotFound(message) | AppError::PayloadTooLarge(message) => {
                (message, Vec::new())
            }
            AppError::BadRequest { message, details } => (message, details),
            AppError::Internal(detail) => {
                error!(error = %detail, "Request failed");
                ("Internal server error".to_string(), Vec::new())
            }
        };

        let body = Json(ErrorResponse {
            error: reason,
            message,
            details,
        });

        (status, body).into_response()
    }
}

impl From<PostServiceError> for AppError {
    fn from(err: PostServiceError) -> Self {
        match err {
            not_found @ PostServiceError::NotFound(_) => {
                AppError::NotFound(not_found.to_string())
            }
            PostServiceError::Storage(source) => AppError::Internal(source.to_string()),
        }
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation { field, message } => AppError::BadRequest {
                message: message.clone(),
                details: vec![FieldError { field, message }],
            },
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let mut details: Vec<FieldError> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |error| FieldError {
                    field: field.to_string(),
                    message: error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("{field} is invalid")),
                })
            })
            .collect();
        details.sort_by(|a, b| a.field.cmp(&b.field).then(a.message.cmp(&b.message)));

        let message = details
            .iter()
            .map(|d| d.message.as_str())
            .collect::<Vec<_>>()
            .join(", ");

        AppError::BadRequest { message, details }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            return AppError::PayloadTooLarge(rejection.body_text());
        }
        AppError::bad_request(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::bad_request(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::bad_request(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bitacora_core::PostId;
    use bitacora_store::StoreError;
    use validator::ValidationError;

    #[test]
    fn test_service_errors_map_to_status() {
        let not_found: AppError = PostServiceError::NotFound(PostId::generate()).into();
        assert_eq!(not_found.status(), StatusCode::NOT_FOUND);

        let storage: AppError =
            PostServiceError::Storage(StoreError::MissingAfterWrite(PostId::generate())).into();
        assert_eq!(storage.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_domain_validation_keeps_field() {
        let err: AppError = DomainError::validation("page", "page must not be less than 1").into();

        match err {
            AppError::BadRequest { details, .. } => {
                assert_eq!(details.len(), 1);
                assert_eq!(details[0].field, "page");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_validation_errors_are_sorted_details() {
        let mut errors = ValidationErrors::new();
        errors.add(
            "title",
            ValidationError::new("length").with_message("title should not be empty".into()),
        );
        errors.add("description", ValidationError::new("required"));

        match AppError::from(errors) {
            AppError::BadRequest { message, details } => {
                assert_eq!(details[0].field, "description");
                assert_eq!(details[0].message, "description is invalid");
                assert_eq!(details[1].message, "title should not be empty");
                assert_eq!(message, "description is invalid, title should not be empty");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_error_body_omits_empty_details() {
        let body = ErrorResponse {
            error: "Not Found".into(),
            message: "Post with ID x not found".into(),
            details: Vec::new(),
        };

        let json = serde_json::to_value(&body).unwrap();
        assert!(json.get("details").is_none());
    }
}
