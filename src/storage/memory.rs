use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use super::{PlaylistStore, SnapshotStore};
use crate::error::StorageError;
use crate::types::{PlaybackSnapshot, PlaylistEntry};

/// In-memory storage (non-persistent)
///
/// Counts writes so callers can observe save coalescing.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    snapshot: Mutex<Option<PlaybackSnapshot>>,
    playlist: Mutex<Vec<PlaylistEntry>>,
    snapshot_writes: AtomicUsize,
    playlist_writes: AtomicUsize,
}

impl MemoryStorage {
    /// Create a new in-memory storage
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create storage pre-populated with a saved queue
    #[must_use]
    pub fn with_saved(snapshot: PlaybackSnapshot, playlist: Vec<PlaylistEntry>) -> Self {
        Self {
            snapshot: Mutex::new(Some(snapshot)),
            playlist: Mutex::new(playlist),
            ..Self::default()
        }
    }

    /// Number of completed snapshot writes
    #[must_use]
    pub fn snapshot_writes(&self) -> usize {
        self.snapshot_writes.load(Ordering::SeqCst)
    }

    /// Number of completed playlist writes
    #[must_use]
    pub fn playlist_writes(&self) -> usize {
        self.playlist_writes.load(Ordering::SeqCst)
    }

    /// Last saved snapshot
    #[must_use]
    pub fn snapshot(&self) -> Option<PlaybackSnapshot> {
        self.snapshot
            .lock()
            .map(|snapshot| snapshot.clone())
            .unwrap_or_default()
    }

    /// Current playlist rows
    #[must_use]
    pub fn playlist(&self) -> Vec<PlaylistEntry> {
        self.playlist
            .lock()
            .map(|rows| rows.clone())
            .unwrap_or_default()
    }
}

impl SnapshotStore for MemoryStorage {
    fn load(&self) -> Result<Option<PlaybackSnapshot>, StorageError> {
        let snapshot = self.snapshot.lock().map_err(|_| StorageError::NotAvailable)?;
        Ok(snapshot.clone())
    }

    fn save(&self, snapshot: &PlaybackSnapshot) -> Result<(), StorageError> {
        let mut stored = self.snapshot.lock().map_err(|_| StorageError::NotAvailable)?;
        *stored = Some(snapshot.clone());
        self.snapshot_writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[async_trait]
impl PlaylistStore for MemoryStorage {
    async fn load(&self) -> Result<Vec<PlaylistEntry>, StorageError> {
        let rows = self.playlist.lock().map_err(|_| StorageError::NotAvailable)?;
        Ok(rows.clone())
    }

    async fn replace(&self, entries: Vec<PlaylistEntry>) -> Result<(), StorageError> {
        let mut rows = self.playlist.lock().map_err(|_| StorageError::NotAvailable)?;
        *rows = entries;
        self.playlist_writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
