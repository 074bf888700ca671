//! Redis-backed cache store.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use tracing::{debug, info};

use super::error::CacheError;
use super::store::CacheStore;

/// Keys requested per `SCAN` round trip while clearing.
const SCAN_BATCH: usize = 250;

/// Cache store backed by a Redis server.
///
/// Every logical key is stored as `{namespace}:{key}`, so several services can
/// share one Redis database and [`clear`](CacheStore::clear) only touches this
/// one's keys. The underlying [`ConnectionManager`] reconnects on its own and
/// is cheap to clone per call.
#[derive(Clone)]
pub struct RedisCache {
    conn: ConnectionManager,
    namespace: String,
}

impl RedisCache {
    /// Connects to `url` (`redis://host:port[/db]`).
    pub async fn connect(url: &str, namespace: impl Into<String>) -> Result<Self, CacheError> {
        let client = redis::Client::open(url)?;
        let conn = ConnectionManager::new(client).await?;
        let namespace = namespace.into();

        info!(namespace = %namespace, "Redis cache connected");

        Ok(Self { conn, namespace })
    }

    fn namespaced(&self, key: &str) -> String {
        format!("{}:{}", self.namespace, key)
    }
}

#[async_trait]
impl CacheStore for RedisCache {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let mut conn = self.conn.clone();
        let value: Option<String> = redis::cmd("GET")
            .arg(self.namespaced(key))
            .query_async(&mut conn)
            .await?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: String, ttl: Duration) -> Result<(), CacheError> {
        let ttl_ms = u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX).max(1);

        let mut conn = self.conn.clone();
        let _: () = redis::cmd("SET")
            .arg(self.namespaced(key))
            .arg(value)
            .arg("PX")
            .arg(ttl_ms)
            .query_async(&mut conn)
            .await?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), CacheError> {
        let mut conn = self.conn.clone();
        let _: () = redis::cmd("DEL")
            .arg(self.namespaced(key))
            .query_async(&mut conn)
            .await?;
        Ok(())
    }

    async fn clear(&self) -> Result<(), CacheError> {
        let pattern = format!("{}:*", self.namespace);
        let mut conn = self.conn.clone();
        let mut cursor: u64 = 0;
        let mut removed = 0usize;

        loop {
            let (next, keys): (u64, Vec<String>) = redis::cmd("SCAN")
                .arg(cursor)
                .arg("MATCH")
                .arg(&pattern)
                .arg("COUNT")
                .arg(SCAN_BATCH)
                .query_async(&mut conn)
                .await?;

            if !keys.is_empty() {
                removed += keys.len();
                let _: () = redis::cmd("DEL").arg(&keys).query_async(&mut conn).await?;
            }

            if next == 0 {
                break;
            }
            cursor = next;
        }

        debug!(namespace = %self.namespace, removed, "Cache namespace cleared");
        Ok(())
    }

    fn name(&self) -> &str {
        "redis"
    }
}

impl fmt::Debug for RedisCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedisCache")
            .field("namespace", &self.namespace)
            .finish_non_exhaustive()
    }
}
