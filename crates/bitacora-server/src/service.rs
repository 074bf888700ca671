//! Post access service: cache-aside reads, invalidating writes.

use std::sync::Arc;

use bitacora_core::{CacheKey, NewPost, PageRequest, Post, PostId, PostPatch};
use bitacora_store::{PostStore, StoreError};
use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::cache::{CacheGateway, CacheValue};

/// Errors surfaced by [`PostService`].
///
/// Cache failures never appear here; they are logged and absorbed.
#[derive(Debug, Error)]
pub enum PostServiceError {
    #[error("Post with ID {0} not found")]
    NotFound(PostId),

    #[error(transparent)]
    Storage(#[from] StoreError),
}

/// Blog post operations with a cache in front of the store.
///
/// Reads check the cache first and populate it on miss. Writes go to the store
/// and then invalidate: `create` clears the whole namespace, `update` and
/// `remove` delete only the single-post entry, so a listing page may stay stale
/// until its TTL runs out.
#[derive(Clone)]
pub struct PostService {
    store: Arc<dyn PostStore>,
    cache: CacheGateway,
}

impl PostService {
    pub fn new(store: Arc<dyn PostStore>, cache: CacheGateway) -> Self {
        Self { store, cache }
    }

    /// Persists a new post and clears the cache namespace.
    #[instrument(skip_all, fields(store = self.store.name()))]
    pub async fn create(&self, new_post: NewPost) -> Result<Post, PostServiceError> {
        let post = self.store.create(new_post).await?;

        if let Err(err) = self.cache.clear().await {
            warn!(error = %err, "Failed to clear cache after create");
        }

        debug!(id = %post.id, "Post created");
        Ok(post)
    }

    /// Returns one page of posts, newest first.
    #[instrument(skip(self), fields(page = page.page(), step = page.step()))]
    pub async fn list(&self, page: PageRequest) -> Result<Vec<Post>, PostServiceError> {
        let key = CacheKey::posts_page(&page);

        if let Some(posts) = self.cached::<Vec<Post>>(&key).await {
            return Ok(posts);
        }

        let posts = self.store.find_page(&page).await?;
        self.populate(&key, &posts).await;

        Ok(posts)
    }

    /// Returns a single post.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn get(&self, id: &PostId) -> Result<Post, PostServiceError> {
        let key = CacheKey::post(id);

        if let Some(post) = self.cached::<Post>(&key).await {
            return Ok(post);
        }

        let post = self
            .store
            .find_by_id(id)
            .await?
            .ok_or(PostServiceError::NotFound(*id))?;
        self.populate(&key, &post).await;

        Ok(post)
    }

    /// Applies a partial update to an existing post.
    #[instrument(skip(self, patch), fields(id = %id))]
    pub async fn update(&self, id: &PostId, patch: PostPatch) -> Result<Post, PostServiceError> {
        self.get(id).await?;

        let post = self.store.update(id, patch).await?;
        self.evict(&CacheKey::post(id)).await;

        Ok(post)
    }

    /// Deletes an existing post.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn remove(&self, id: &PostId) -> Result<(), PostServiceError> {
        self.get(id).await?;

        self.store.delete(id).await?;
        self.evict(&CacheKey::post(id)).await;

        Ok(())
    }

    /// Cache used by this service.
    pub fn cache(&self) -> &CacheGateway {
        &self.cache
    }

    async fn cached<T: CacheValue>(&self, key: &CacheKey) -> Option<T> {
        match self.cache.get::<T>(key).await {
            Ok(Some(value)) => {
                debug!(key = %key, "Cache hit");
                Some(value)
            }
            Ok(None) => {
                debug!(key = %key, "Cache miss");
                None
            }
            Err(err) => {
                warn!(key = %key, error = %err, "Cache read failed, falling back to store");
                None
            }
        }
    }

    async fn populate<T: CacheValue>(&self, key: &CacheKey, value: &T) {
        if let Err(err) = self.cache.set(key, value, None).await {
            warn!(key = %key, error = %err, "Failed to populate cache");
        }
    }

    async fn evict(&self, key: &CacheKey) {
        if let Err(err) = self.cache.delete(key).await {
            warn!(key = %key, error = %err, "Failed to evict cache entry");
        }
    }
}

impl std::fmt::Debug for PostService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostService")
            .field("store", &self.store.name())
            .field("cache", &self.cache)
            .finish()
    }
}
