//! In-process post store.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use bitacora_core::{NewPost, PageRequest, Post, PostId, PostPatch};
use parking_lot::RwLock;
use time::OffsetDateTime;
use tracing::{debug, instrument};

use crate::error::StoreError;
use crate::store::PostStore;

#[derive(Debug, Clone)]
struct Entry {
    seq: u64,
    post: Post,
}

/// Post store kept in a map behind a read/write lock.
///
/// Used for local runs without PostgreSQL and in tests. Each insert gets a
/// sequence number that breaks ties between posts created at the same
/// instant, so the listing order stays newest first.
#[derive(Debug, Default)]
pub struct MemoryPostStore {
    posts: RwLock<HashMap<PostId, Entry>>,
    next_seq: AtomicU64,
}

impl MemoryPostStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored posts.
    pub fn len(&self) -> usize {
        self.posts.read().len()
    }

    /// Returns true if no post is stored.
    pub fn is_empty(&self) -> bool {
        self.posts.read().is_empty()
    }
}

#[async_trait]
impl PostStore for MemoryPostStore {
    #[instrument(skip_all)]
    async fn create(&self, new_post: NewPost) -> Result<Post, StoreError> {
        let post = Post::create(PostId::generate(), new_post, OffsetDateTime::now_utc());
        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);

        self.posts.write().insert(
            post.id,
            Entry {
                seq,
                post: post.clone(),
            },
        );

        debug!(id = %post.id, "Post inserted");
        Ok(post)
    }

    async fn find_by_id(&self, id: &PostId) -> Result<Option<Post>, StoreError> {
        Ok(self.posts.read().get(id).map(|entry| entry.post.clone()))
    }

    #[instrument(skip(self), fields(page = page.page(), step = page.step()))]
    async fn find_page(&self, page: &PageRequest) -> Result<Vec<Post>, StoreError> {
        let posts = self.posts.read();

        let mut entries: Vec<&Entry> = posts.values().collect();
        entries.sort_by(|a, b| {
            b.post
                .created_at
                .cmp(&a.post.created_at)
                .then(b.seq.cmp(&a.seq))
        });

        let skip = usize::try_from(page.skip()).unwrap_or(usize::MAX);
        let limit = usize::try_from(page.limit()).unwrap_or(usize::MAX);

        Ok(entries
            .into_iter()
            .skip(skip)
            .take(limit)
            .map(|entry| entry.post.clone())
            .collect())
    }

    #[instrument(skip(self, patch), fields(id = %id))]
    async fn update(&self, id: &PostId, patch: PostPatch) -> Result<Post, StoreError> {
        let mut posts = self.posts.write();
        let entry = posts
            .get_mut(id)
            .ok_or(StoreError::MissingAfterWrite(*id))?;

        entry.post.apply(patch, OffsetDateTime::now_utc());
        Ok(entry.post.clone())
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn delete(&self, id: &PostId) -> Result<(), StoreError> {
        let removed = self.posts.write().remove(id).is_some();
        debug!(removed, "Post deleted");
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}
