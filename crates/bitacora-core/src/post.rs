//! Blog post entity and its write models.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::types::PostId;

/// A blog post as stored by the source of truth.
///
/// Serialized with camelCase field names and RFC 3339 timestamps; the same
/// shape is used for HTTP responses and cache entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Identifier, assigned at creation.
    pub id: PostId,
    /// Post title, never empty.
    pub title: String,
    /// Post body, never empty.
    pub description: String,
    /// Creation instant.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    /// Last modification instant, never earlier than `created_at`.
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl Post {
    /// Builds a freshly created post with both timestamps set to `now`.
    pub fn create(id: PostId, new_post: NewPost, now: OffsetDateTime) -> Self {
        Self {
            id,
            title: new_post.title,
            description: new_post.description,
            created_at: now,
            updated_at: now,
        }
    }

    /// Applies a partial update in place.
    ///
    /// Only supplied fields are replaced. `updated_at` is refreshed to `now`,
    /// clamped so it never goes below `created_at`.
    ///
    /// # Example
    ///
    /// ```
    /// use bitacora_core::{NewPost, Post, PostId, PostPatch};
    /// use time::OffsetDateTime;
    ///
    /// let now = OffsetDateTime::now_utc();
    /// let mut post = Post::create(PostId::generate(), NewPost::new("Title", "Body"), now);
    ///
    /// post.apply(PostPatch::default().with_title("New title"), now);
    /// assert_eq!(post.title, "New title");
    /// assert_eq!(post.description, "Body");
    /// ```
    pub fn apply(&mut self, patch: PostPatch, now: OffsetDateTime) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        self.updated_at = now.max(self.created_at);
    }
}

/// Fields required to create a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPost {
    pub title: String,
    pub description: String,
}

impl NewPost {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }
}

/// Partial update of a post. `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostPatch {
    pub title: Option<String>,
    pub description: Option<String>,
}

impl PostPatch {
    /// Sets the replacement title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the replacement description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Returns true when no field would change.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none()
    }
}
