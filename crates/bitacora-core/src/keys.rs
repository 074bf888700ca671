//! Cache key construction.

use std::fmt;

use crate::types::{PageRequest, PostId};

/// Tag for cached listing pages.
pub const POSTS_TAG: &str = "posts";
/// Tag for cached single posts.
pub const POST_TAG: &str = "post";

/// Deterministic cache key: a tag followed by ordered parameters, joined by `:`.
///
/// Identical logical requests always produce the same key. A key without
/// parameters renders as `tag:`.
///
/// # Examples
///
/// ```
/// use bitacora_core::{CacheKey, PageRequest};
///
/// let key = CacheKey::posts_page(&PageRequest::new(1, 10).unwrap());
/// assert_eq!(key.to_string(), "posts:1:10");
///
/// let custom = CacheKey::new("post", ["abc"]);
/// assert_eq!(custom.as_str(), "post:abc");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    /// Builds a key from a tag and ordered parameters.
    pub fn new<I, P>(tag: &str, params: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: fmt::Display,
    {
        let params: Vec<String> = params.into_iter().map(|p| p.to_string()).collect();
        Self(format!("{}:{}", tag, params.join(":")))
    }

    /// Key for one page of the post listing.
    pub fn posts_page(page: &PageRequest) -> Self {
        Self::new(POSTS_TAG, [page.page(), page.step()])
    }

    /// Key for a single post.
    pub fn post(id: &PostId) -> Self {
        Self::new(POST_TAG, [id])
    }

    /// Returns the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CacheKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
