//! Durable storage for queue snapshots
//!
//! Two granularities are kept apart: a small [`SnapshotStore`] record that is
//! rewritten on every save, and a larger [`PlaylistStore`] holding the
//! ordered track identifiers, written only when the queue itself changed.

mod file;
mod memory;
#[cfg(feature = "sqlite")]
mod sqlite;

#[cfg(test)]
mod tests;

pub use file::{JsonPlaylistStore, JsonSnapshotStore};
pub use memory::MemoryStorage;
#[cfg(feature = "sqlite")]
pub use sqlite::SqlitePlaylistStore;

use async_trait::async_trait;

use crate::error::StorageError;
use crate::types::{PlaybackSnapshot, PlaylistEntry};

/// Small synchronous key-value record for mode flags and position
///
/// A `save` either fully replaces the stored record or leaves it untouched.
pub trait SnapshotStore: Send + Sync {
    /// Load the last saved record
    ///
    /// # Errors
    ///
    /// Returns error if the record exists but cannot be read
    fn load(&self) -> Result<Option<PlaybackSnapshot>, StorageError>;

    /// Replace the stored record
    ///
    /// # Errors
    ///
    /// Returns error if storage fails
    fn save(&self, snapshot: &PlaybackSnapshot) -> Result<(), StorageError>;
}

/// Ordered track-identifier rows
#[async_trait]
pub trait PlaylistStore: Send + Sync {
    /// Load all rows
    ///
    /// # Errors
    ///
    /// Returns error if storage fails
    async fn load(&self) -> Result<Vec<PlaylistEntry>, StorageError>;

    /// Replace all rows
    ///
    /// # Errors
    ///
    /// Returns error if storage fails
    async fn replace(&self, entries: Vec<PlaylistEntry>) -> Result<(), StorageError>;
}
