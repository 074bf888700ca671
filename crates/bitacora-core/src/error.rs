//! Error types for the Bitacora domain.
//!
//! Domain errors are raised while building domain values (pagination
//! requests, identifiers). A missing post is reported by the server's
//! service layer. Storage and cache failures live in their own crates; they are not
//! domain concerns.
//!
//! # Example
//!
//! ```
//! use bitacora_core::{DomainError, PageRequest, Result};
//!
//! fn first_page(step: u32) -> Result<PageRequest> {
//!     PageRequest::new(1, step)
//! }
//!
//! let err = first_page(0).unwrap_err();
//! assert!(err.is_validation_error());
//! ```

use thiserror::Error;

/// Main error type for domain operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// A value failed a domain invariant.
    #[error("Validation error for field '{field}': {message}")]
    Validation {
        /// Field that failed validation
        field: String,
        /// Description of the validation failure
        message: String,
    },
}

impl DomainError {
    /// Creates a Validation error.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Returns true if this is a validation error.
    pub fn is_validation_error(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    /// Returns the offending field.
    pub fn field(&self) -> &str {
        match self {
            Self::Validation { field, .. } => field,
        }
    }
}

/// Type alias for Results with DomainError.
pub type Result<T> = std::result::Result<T, DomainError>;
