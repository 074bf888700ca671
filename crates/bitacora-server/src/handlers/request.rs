//! Request DTOs of the blog endpoints.
//!
//! Unknown fields are rejected so typos surface as 400 instead of being
//! silently dropped.

use bitacora_core::{DomainError, NewPost, PageRequest, PostPatch};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Body of `POST /blog`.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct CreatePostRequest {
    /// Post title
    #[validate(
        required(message = "title must be a string"),
        length(min = 1, message = "title should not be empty")
    )]
    #[schema(value_type = String, min_length = 1, example = "My first post")]
    pub title: Option<String>,

    /// Post body
    #[validate(
        required(message = "description must be a string"),
        length(min = 1, message = "description should not be empty")
    )]
    #[schema(value_type = String, min_length = 1, example = "Hello, world")]
    pub description: Option<String>,
}

impl CreatePostRequest {
    /// Converts a validated request into the domain write model.
    pub fn into_new_post(self) -> NewPost {
        NewPost::new(
            self.title.unwrap_or_default(),
            self.description.unwrap_or_default(),
        )
    }
}

/// Body of `PUT /blog/{id}`. Omitted fields keep their current value.
///
/// Supplied fields must be non-empty, since a stored post never has an empty
/// title or description.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct UpdatePostRequest {
    #[validate(length(min = 1, message = "title should not be empty"))]
    #[schema(min_length = 1)]
    pub title: Option<String>,

    #[validate(length(min = 1, message = "description should not be empty"))]
    #[schema(min_length = 1)]
    pub description: Option<String>,
}

impl From<UpdatePostRequest> for PostPatch {
    fn from(request: UpdatePostRequest) -> Self {
        Self {
            title: request.title,
            description: request.description,
        }
    }
}

/// Query of `GET /blog`.
#[derive(Debug, Clone, Copy, Default, Deserialize, Validate, IntoParams)]
#[serde(deny_unknown_fields)]
#[into_params(parameter_in = Query)]
pub struct ListPostsQuery {
    /// Page number, starting at 1 (default 1)
    #[validate(range(min = 1, message = "page must not be less than 1"))]
    #[param(minimum = 1)]
    pub page: Option<u32>,

    /// Page size (default 10)
    #[validate(range(min = 1, message = "step must not be less than 1"))]
    #[param(minimum = 1)]
    pub step: Option<u32>,
}

impl ListPostsQuery {
    pub fn page_request(&self) -> Result<PageRequest, DomainError> {
        PageRequest::new(
            self.page.unwrap_or(PageRequest::DEFAULT_PAGE),
            self.step.unwrap_or(PageRequest::DEFAULT_STEP),
        )
    }
}
