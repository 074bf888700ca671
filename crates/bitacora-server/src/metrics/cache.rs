//! Cache metrics recording.

use metrics::{counter, gauge, histogram};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Registra las metricas de cache.
pub fn register_cache_metrics() {
    metrics::describe_counter!("bitacora_cache_hits_total", "Total number of cache hits");
    metrics::describe_counter!(
        "bitacora_cache_misses_total",
        "Total number of cache misses"
    );
    metrics::describe_counter!(
        "bitacora_cache_errors_total",
        "Total number of failed cache operations, by operation"
    );
    metrics::describe_counter!(
        "bitacora_cache_evictions_total",
        "Total number of in-process cache evictions, by reason"
    );
    metrics::describe_gauge!(
        "bitacora_cache_hit_ratio",
        "Fraction of cache reads served from the cache since startup"
    );
    metrics::describe_gauge!(
        "bitacora_cache_entries",
        "Current number of entries in the in-process cache"
    );
    metrics::describe_histogram!(
        "bitacora_cache_operation_seconds",
        "Time spent on cache operations"
    );
}

/// Recorder de metricas de cache.
///
/// Mantiene hits y misses locales para publicar el gauge
/// `bitacora_cache_hit_ratio` sin depender del recorder.
#[derive(Debug, Clone, Default)]
pub struct CacheMetrics {
    hits: Arc<AtomicU64>,
    misses: Arc<AtomicU64>,
}

impl CacheMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
        counter!("bitacora_cache_hits_total").increment(1);
        self.publish_hit_ratio();
    }

    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
        counter!("bitacora_cache_misses_total").increment(1);
        self.publish_hit_ratio();
    }

    fn publish_hit_ratio(&self) {
        gauge!("bitacora_cache_hit_ratio").set(self.hit_rate());
    }

    /// Registra una operacion fallida (get, set, delete, clear)
    pub fn record_error(&self, operation: &'static str) {
        counter!("bitacora_cache_errors_total", "operation" => operation).increment(1);
    }

    /// Eviction del backend en memoria (ttl, capacity, manual, replaced)
    pub fn record_eviction(&self, reason: &'static str) {
        counter!("bitacora_cache_evictions_total", "reason" => reason).increment(1);
    }

    pub fn update_entry_count(&self, count: u64) {
        gauge!("bitacora_cache_entries").set(count as f64);
    }

    /// Latencia de un round-trip al backend
    pub fn record_operation_duration(&self, operation: &'static str, duration: Duration) {
        histogram!(
            "bitacora_cache_operation_seconds",
            "operation" => operation
        )
        .record(duration.as_secs_f64());
    }

    /// Fraccion de lecturas servidas desde cache; 0 sin trafico.
    pub fn hit_rate(&self) -> f64 {
        let hits = self.hits() as f64;
        let total = hits + self.misses() as f64;
        if total == 0.0 { 0.0 } else { hits / total }
    }

    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }
}
