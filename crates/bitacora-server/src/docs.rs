//! OpenAPI document of the blog API.

use utoipa::OpenApi;
use utoipa::openapi::{self, Server};

use crate::error::{ErrorResponse, FieldError};
use crate::handlers::blog;
use crate::handlers::request::{CreatePostRequest, UpdatePostRequest};
use crate::handlers::response::PostResponse;
use crate::settings::ApiSettings;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Bitacora Blog API",
        description = "CRUD API for blog posts with pagination and a read-through cache"
    ),
    paths(
        blog::create_post,
        blog::list_posts,
        blog::get_post,
        blog::update_post,
        blog::delete_post,
    ),
    components(schemas(
        PostResponse,
        CreatePostRequest,
        UpdatePostRequest,
        ErrorResponse,
        FieldError,
    )),
    tags((name = "blog", description = "Blog post management"))
)]
pub struct ApiDoc;

/// Builds the document with the configured base path as its only server.
///
/// Paths in the document are relative to that server (`/blog`, `/blog/{id}`).
pub fn api_doc(api: &ApiSettings) -> openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    doc.servers = Some(vec![Server::new(api.base_path())]);
    doc
}
