//! Post store trait definition.

use async_trait::async_trait;
use bitacora_core::{NewPost, PageRequest, Post, PostId, PostPatch};

use crate::error::StoreError;

/// The source of truth for blog posts.
///
/// This trait abstracts over storage backends so the post service can read
/// and write posts without knowing where they live. Implementations own no
/// caching logic.
///
/// # Implementors
///
/// - `PgPostStore` - PostgreSQL through a sqlx pool
/// - `MemoryPostStore` - in-process map, for local runs and tests
#[async_trait]
pub trait PostStore: Send + Sync {
    /// Persists a new post. The store assigns the identifier and timestamps.
    async fn create(&self, new_post: NewPost) -> Result<Post, StoreError>;

    /// Looks a post up by identifier.
    async fn find_by_id(&self, id: &PostId) -> Result<Option<Post>, StoreError>;

    /// Returns one page of posts ordered by creation time, newest first.
    ///
    /// Rows created at the same instant are ordered by identifier, descending,
    /// so pages are stable.
    async fn find_page(&self, page: &PageRequest) -> Result<Vec<Post>, StoreError>;

    /// Applies a partial update and returns the stored result.
    ///
    /// # Errors
    ///
    /// - `StoreError::MissingAfterWrite` if the post does not exist after the write
    async fn update(&self, id: &PostId, patch: PostPatch) -> Result<Post, StoreError>;

    /// Deletes a post. Deleting a missing post is not an error.
    async fn delete(&self, id: &PostId) -> Result<(), StoreError>;

    /// Returns the name of this store, for logging.
    fn name(&self) -> &str;
}
