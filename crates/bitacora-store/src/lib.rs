//! # Bitacora Store
//!
//! Storage gateway for the Bitacora blog API.
//!
//! This crate owns the source of truth for blog posts. It knows nothing about
//! caching or HTTP; the server wraps a [`PostStore`] with its cache-aside layer.
//!
//! ## Backends
//!
//! - [`PgPostStore`] - PostgreSQL via a sqlx connection pool, with embedded migrations
//! - [`MemoryPostStore`] - in-process map for local runs and tests
//!
//! ## Example
//!
//! ```ignore
//! use bitacora_store::{PgConnectOptions, PgPostStore, PostStore};
//!
//! let options = PgConnectOptions::new()
//!     .host("localhost")
//!     .port(5432)
//!     .username("postgres")
//!     .database("blog");
//!
//! let store = PgPostStore::connect(options, 10).await?;
//! store.run_migrations().await?;
//!
//! let page = store.find_page(&PageRequest::default()).await?;
//! ```

pub mod error;
pub mod memory;
pub mod postgres;
pub mod store;

pub use error::StoreError;
pub use memory::MemoryPostStore;
pub use postgres::PgPostStore;
pub use store::PostStore;

pub use sqlx::postgres::PgConnectOptions;

// Re-export bitacora_core for consumers
pub use bitacora_core;
