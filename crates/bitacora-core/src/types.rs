//! Identifier and pagination types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::{DomainError, Result};

/// Post identifier.
///
/// Wraps a UUID v4. Identifiers are generated by the storage gateway when a
/// post is created and never change afterwards.
///
/// # Example
///
/// ```
/// use bitacora_core::PostId;
///
/// let id: PostId = "123e4567-e89b-12d3-a456-426614174000".parse().unwrap();
/// assert_eq!(id.to_string(), "123e4567-e89b-12d3-a456-426614174000");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostId(Uuid);

impl PostId {
    /// Generates a fresh random identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl From<Uuid> for PostId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<PostId> for Uuid {
    fn from(value: PostId) -> Self {
        value.0
    }
}

impl FromStr for PostId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|e| DomainError::validation("id", e.to_string()))
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A page of the post listing, newest first.
///
/// `page` is 1-based and `step` is the page size. Both are at least 1, which
/// the constructor enforces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageRequest {
    page: u32,
    step: u32,
}

impl PageRequest {
    /// Default page number.
    pub const DEFAULT_PAGE: u32 = 1;
    /// Default page size.
    pub const DEFAULT_STEP: u32 = 10;

    /// Creates a page request, rejecting zero values.
    ///
    /// # Example
    ///
    /// ```
    /// use bitacora_core::PageRequest;
    ///
    /// let page = PageRequest::new(3, 5).unwrap();
    /// assert_eq!(page.skip(), 10);
    /// assert_eq!(page.limit(), 5);
    /// assert!(PageRequest::new(0, 5).is_err());
    /// ```
    pub fn new(page: u32, step: u32) -> Result<Self> {
        if page == 0 {
            return Err(DomainError::validation("page", "page must not be less than 1"));
        }
        if step == 0 {
            return Err(DomainError::validation("step", "step must not be less than 1"));
        }
        Ok(Self { page, step })
    }

    /// Returns the 1-based page number.
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Returns the page size.
    pub fn step(&self) -> u32 {
        self.step
    }

    /// Number of rows to skip: `(page - 1) * step`.
    pub fn skip(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.step)
    }

    /// Maximum number of rows to return.
    pub fn limit(&self) -> u64 {
        u64::from(self.step)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: Self::DEFAULT_PAGE,
            step: Self::DEFAULT_STEP,
        }
    }
}
