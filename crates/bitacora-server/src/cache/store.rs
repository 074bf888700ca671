//! Raw cache store trait.

use std::time::Duration;

use async_trait::async_trait;

use super::error::CacheError;

/// A string-valued key/value store with per-entry expiry.
///
/// Keys passed in are logical (`post:…`, `posts:1:10`); implementations place
/// them inside their namespace. [`CacheStore::clear`] removes every key of the
/// namespace and nothing else.
///
/// # Implementors
///
/// - [`RedisCache`](super::RedisCache) - external Redis server
/// - [`MemoryCache`](super::MemoryCache) - in-process Moka cache
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Returns the raw value stored under `key`, if any.
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    /// Stores `value` under `key` for `ttl`, replacing any previous value.
    async fn set(&self, key: &str, value: String, ttl: Duration) -> Result<(), CacheError>;

    /// Removes `key`. Missing keys are not an error.
    async fn delete(&self, key: &str) -> Result<(), CacheError>;

    /// Removes every key in the namespace.
    async fn clear(&self) -> Result<(), CacheError>;

    /// Returns the name of this store, for logging.
    fn name(&self) -> &str;
}
