//! Typed cache gateway.

use std::sync::Arc;
use std::time::{Duration, Instant};

use bitacora_core::{CacheKey, Post};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::error::CacheError;
use super::store::CacheStore;
use crate::metrics::CacheMetrics;

/// A value that can live in the cache.
///
/// Values are stored as JSON. A *vacant* value (an empty listing page) is
/// never served from the cache; reading one counts as a miss.
pub trait CacheValue: Serialize + DeserializeOwned + Send + Sync {
    /// Returns true if this value carries no content.
    fn is_vacant(&self) -> bool {
        false
    }
}

impl CacheValue for Post {}

impl<T: CacheValue> CacheValue for Vec<T> {
    fn is_vacant(&self) -> bool {
        self.is_empty()
    }
}

/// Typed front of a [`CacheStore`].
///
/// Handles JSON encoding, the default TTL and cache metrics. It never retries
/// and never hides errors; deciding that a cache failure is harmless is the
/// caller's job.
#[derive(Clone)]
pub struct CacheGateway {
    store: Arc<dyn CacheStore>,
    default_ttl: Duration,
    metrics: CacheMetrics,
}

impl CacheGateway {
    /// Creates a gateway over `store`; entries default to `default_ttl`.
    pub fn new(store: Arc<dyn CacheStore>, default_ttl: Duration) -> Self {
        Self {
            store,
            default_ttl,
            metrics: CacheMetrics::new(),
        }
    }

    /// Looks up `key` and decodes it.
    ///
    /// Returns `Ok(None)` when the key is absent or the stored value is vacant.
    ///
    /// # Errors
    ///
    /// - `CacheError::Redis` if the store could not be read
    /// - `CacheError::Serialization` if the stored value does not decode as `T`
    pub async fn get<T: CacheValue>(&self, key: &CacheKey) -> Result<Option<T>, CacheError> {
        let start = Instant::now();

        let raw = self.store.get(key.as_str()).await.inspect_err(|_| {
            self.metrics.record_error("get");
        })?;
        self.metrics.record_operation_duration("get", start.elapsed());

        let Some(raw) = raw else {
            self.metrics.record_miss();
            return Ok(None);
        };

        let value: T = serde_json::from_str(&raw).inspect_err(|_| {
            self.metrics.record_error("decode");
        })?;

        if value.is_vacant() {
            debug!(key = %key, "Vacant cache value ignored");
            self.metrics.record_miss();
            return Ok(None);
        }

        self.metrics.record_hit();
        Ok(Some(value))
    }

    /// Encodes `value` and stores it under `key`.
    ///
    /// `ttl` overrides the default time-to-live for this entry only.
    pub async fn set<T: CacheValue>(
        &self,
        key: &CacheKey,
        value: &T,
        ttl: Option<Duration>,
    ) -> Result<(), CacheError> {
        let start = Instant::now();

        let raw = serde_json::to_string(value).inspect_err(|_| {
            self.metrics.record_error("encode");
        })?;

        self.store
            .set(key.as_str(), raw, ttl.unwrap_or(self.default_ttl))
            .await
            .inspect_err(|_| self.metrics.record_error("set"))?;

        self.metrics.record_operation_duration("set", start.elapsed());
        Ok(())
    }

    /// Removes `key`.
    pub async fn delete(&self, key: &CacheKey) -> Result<(), CacheError> {
        let start = Instant::now();

        self.store
            .delete(key.as_str())
            .await
            .inspect_err(|_| self.metrics.record_error("delete"))?;

        self.metrics
            .record_operation_duration("delete", start.elapsed());
        Ok(())
    }

    /// Removes every entry of the namespace.
    pub async fn clear(&self) -> Result<(), CacheError> {
        let start = Instant::now();

        self.store
            .clear()
            .await
            .inspect_err(|_| self.metrics.record_error("clear"))?;

        self.metrics
            .record_operation_duration("clear", start.elapsed());
        Ok(())
    }

    /// Retorna las metricas para acceso externo.
    pub fn metrics(&self) -> &CacheMetrics {
        &self.metrics
    }
}

impl std::fmt::Debug for CacheGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheGateway")
            .field("store", &self.store.name())
            .field("default_ttl", &self.default_ttl)
            .finish()
    }
}
