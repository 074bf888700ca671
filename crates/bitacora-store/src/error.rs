//! Error types for the storage gateway.

use bitacora_core::PostId;

/// Errors that can occur while talking to the post store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The database rejected or failed a query.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Applying migrations failed.
    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// The row disappeared between the write and the read-back.
    #[error("post {0} not found after write")]
    MissingAfterWrite(PostId),
}
