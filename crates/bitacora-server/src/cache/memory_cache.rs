//! In-process cache store using Moka.

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use moka::Expiry;
use moka::future::Cache;
use moka::notification::RemovalCause;

use super::error::CacheError;
use super::store::CacheStore;
use crate::metrics::CacheMetrics;

/// Valor almacenado junto con su TTL propio.
#[derive(Debug, Clone)]
struct Entry {
    value: Arc<str>,
    ttl: Duration,
}

/// Politica de expiracion por entrada: cada `set` fija su propio TTL.
struct PerEntryTtl;

impl Expiry<String, Entry> for PerEntryTtl {
    fn expire_after_create(
        &self,
        _key: &String,
        entry: &Entry,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(entry.ttl)
    }

    fn expire_after_update(
        &self,
        _key: &String,
        entry: &Entry,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(entry.ttl)
    }
}

/// Cache en memoria del proceso, usando Moka.
/// Thread-safe y async-friendly; el namespace es la propia instancia.
///
/// # Examples
///
/// ```no_run
/// use std::time::Duration;
/// use bitacora_server::cache::{CacheStore, MemoryCache};
///
/// # #[tokio::main]
/// # async fn main() {
/// let cache = MemoryCache::new(10_000);
/// cache.set("post:abc", "{}".to_string(), Duration::from_secs(60)).await.unwrap();
///
/// if let Some(raw) = cache.get("post:abc").await.unwrap() {
///     println!("Cache hit: {raw}");
/// }
/// # }
/// ```
#[derive(Clone)]
pub struct MemoryCache {
    inner: Cache<String, Entry>,
    metrics: CacheMetrics,
}

impl MemoryCache {
    /// Crea un cache acotado a `max_capacity` entradas.
    pub fn new(max_capacity: u64) -> Self {
        let metrics = CacheMetrics::new();

        // Listener para evictions
        let eviction_metrics = metrics.clone();
        let inner = Cache::builder()
            .max_capacity(max_capacity)
            .expire_after(PerEntryTtl)
            .eviction_listener(move |_key, _value, cause| {
                let reason = match cause {
                    RemovalCause::Expired => "ttl",
                    RemovalCause::Size => "capacity",
                    RemovalCause::Explicit => "manual",
                    RemovalCause::Replaced => "replaced",
                };
                eviction_metrics.record_eviction(reason);
            })
            .build();

        Self { inner, metrics }
    }

    /// Retorna el numero aproximado de entries en cache.
    pub fn entry_count(&self) -> u64 {
        self.inner.entry_count()
    }

    /// Ejecuta las tareas pendientes de Moka (expiraciones, conteos).
    pub async fn sync(&self) {
        self.inner.run_pending_tasks().await;
        self.metrics.update_entry_count(self.inner.entry_count());
    }
}

impl Default for MemoryCache {
    fn default() -> Self {
        Self::new(10_000)
    }
}

#[async_trait]
impl CacheStore for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        Ok(self
            .inner
            .get(key)
            .await
            .map(|entry| entry.value.to_string()))
    }

    async fn set(&self, key: &str, value: String, ttl: Duration) -> Result<(), CacheError> {
        let entry = Entry {
            value: Arc::from(value),
            ttl,
        };
        self.inner.insert(key.to_string(), entry).await;
        self.metrics.update_entry_count(self.inner.entry_count());
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.inner.invalidate(key).await;
        Ok(())
    }

    async fn clear(&self) -> Result<(), CacheError> {
        self.inner.invalidate_all();
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}

impl std::fmt::Debug for MemoryCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryCache")
            .field("entries", &self.inner.entry_count())
            .finish()
    }
}
