//! Cache layer for the Bitacora server.
//!
//! Two levels:
//! - [`CacheStore`]: raw string-valued store (Redis or in-process Moka),
//!   namespaced, with per-entry TTL.
//! - [`CacheGateway`]: typed wrapper used by the post service. It owns JSON
//!   (de)serialization, the default TTL, the vacancy check and metrics.

pub mod error;
pub mod gateway;
pub mod memory_cache;
pub mod redis_cache;
pub mod store;

// Re-exports
pub use error::CacheError;
pub use gateway::{CacheGateway, CacheValue};
pub use memory_cache::MemoryCache;
pub use redis_cache::RedisCache;
pub use store::CacheStore;
