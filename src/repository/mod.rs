//! Track repository boundary
//!
//! Persisted queues only hold [`TrackId`]s. A [`TrackRepository`] turns them
//! back into playable descriptors, tolerating identifiers that no longer
//! exist in the library.

mod memory;


pub use memory::MemoryRepository;

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{TrackDescriptor, TrackId};

/// Outcome of resolving a list of identifiers
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    /// Descriptors for identifiers that still exist, in request order
    pub resolved: Vec<TrackDescriptor>,
    /// Identifiers that could not be resolved
    pub missing: Vec<TrackId>,
}

impl Resolution {
    /// Check if every identifier resolved
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Library lookup consumed by restoration
#[async_trait]
pub trait TrackRepository: Send + Sync {
    /// Resolve `ids`, preserving their order
    ///
    /// # Errors
    ///
    /// Returns `Repository` if the library cannot be queried at all
    async fn resolve(&self, ids: &[TrackId]) -> Result<Resolution>;
}
