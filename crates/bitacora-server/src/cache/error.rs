//! Cache error types.

use thiserror::Error;

/// Error del sistema de cache
#[derive(Debug, Error)]
pub enum CacheError {
    /// La operacion contra Redis fallo (conexion, timeout, respuesta invalida).
    #[error("redis error: {0}")]
    Redis(#[from] redis::RedisError),

    /// El valor no pudo convertirse desde/hacia JSON.
    #[error("cache value serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}
