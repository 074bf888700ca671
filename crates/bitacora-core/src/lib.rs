//! Bitacora Core - Domain types for the blog API
//!
//! This crate provides the foundational types shared by the storage gateway
//! and the HTTP server: posts, identifiers, pagination requests, cache keys
//! and the domain error hierarchy. It performs no I/O.

pub mod error;
pub mod keys;
pub mod post;
pub mod types;

pub use error::{DomainError, Result};
pub use keys::CacheKey;
pub use post::{NewPost, Post, PostPatch};
pub use types::{PageRequest, PostId};

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
