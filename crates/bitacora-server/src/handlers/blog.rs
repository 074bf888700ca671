//! Blog post endpoints.

use axum::{Json, extract::State, http::StatusCode};
use tracing::instrument;

use crate::error::{AppError, ErrorResponse};
use crate::extractors::{PostIdPath, ValidatedJson, ValidatedQuery};
use crate::handlers::request::{CreatePostRequest, ListPostsQuery, UpdatePostRequest};
use crate::handlers::response::PostResponse;
use crate::state::AppState;

/// Creates a post.
#[utoipa::path(
    post,
    path = "/blog",
    tag = "blog",
    request_body = CreatePostRequest,
    responses(
        (status = 201, description = "Post created", body = PostResponse),
        (status = 400, description = "Invalid body", body = ErrorResponse)
    )
)]
#[instrument(skip_all)]
pub async fn create_post(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreatePostRequest>,
) -> Result<(StatusCode, Json<PostResponse>), AppError> {
    let post = state.service().create(request.into_new_post()).await?;
    Ok((StatusCode::CREATED, Json(post.into())))
}

/// Lists posts, newest first.
#[utoipa::path(
    get,
    path = "/blog",
    tag = "blog",
    params(ListPostsQuery),
    responses(
        (status = 200, description = "One page of posts", body = [PostResponse]),
        (status = 400, description = "Invalid pagination", body = ErrorResponse)
    )
)]
#[instrument(skip_all, fields(page = query.page, step = query.step))]
pub async fn list_posts(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<ListPostsQuery>,
) -> Result<Json<Vec<PostResponse>>, AppError> {
    let page = query.page_request()?;
    let posts = state.service().list(page).await?;
    Ok(Json(posts.into_iter().map(PostResponse::from).collect()))
}

/// Returns a single post.
#[utoipa::path(
    get,
    path = "/blog/{id}",
    tag = "blog",
    params(("id" = uuid::Uuid, Path, description = "Post identifier")),
    responses(
        (status = 200, description = "The post", body = PostResponse),
        (status = 404, description = "Post not found", body = ErrorResponse)
    )
)]
#[instrument(skip_all, fields(id = %id))]
pub async fn get_post(
    State(state): State<AppState>,
    PostIdPath(id): PostIdPath,
) -> Result<Json<PostResponse>, AppError> {
    let post = state.service().get(&id).await?;
    Ok(Json(post.into()))
}

/// Partially updates a post.
#[utoipa::path(
    put,
    path = "/blog/{id}",
    tag = "blog",
    params(("id" = uuid::Uuid, Path, description = "Post identifier")),
    request_body = UpdatePostRequest,
    responses(
        (status = 200, description = "Updated post", body = PostResponse),
        (status = 400, description = "Invalid body", body = ErrorResponse),
        (status = 404, description = "Post not found", body = ErrorResponse)
    )
)]
#[instrument(skip_all, fields(id = %id))]
pub async fn update_post(
    State(state): State<AppState>,
    PostIdPath(id): PostIdPath,
    ValidatedJson(request): ValidatedJson<UpdatePostRequest>,
) -> Result<Json<PostResponse>, AppError> {
    let post = state.service().update(&id, request.into()).await?;
    Ok(Json(post.into()))
}

/// Deletes a post. Responds 200 with an empty body.
#[utoipa::path(
    delete,
    path = "/blog/{id}",
    tag = "blog",
    params(("id" = uuid::Uuid, Path, description = "Post identifier")),
    responses(
        (status = 200, description = "Post deleted"),
        (status = 404, description = "Post not found", body = ErrorResponse)
    )
)]
#[instrument(skip_all, fields(id = %id))]
pub async fn delete_post(
    State(state): State<AppState>,
    PostIdPath(id): PostIdPath,
) -> Result<StatusCode, AppError> {
    state.service().remove(&id).await?;
    Ok(StatusCode::OK)
}
