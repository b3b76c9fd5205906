//! Centralized queue status

use std::ops::RangeInclusive;

use tokio::sync::watch;

use crate::types::RepeatMode;

/// Observable summary of the queue
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueueStatus {
    /// Timeline length
    pub len: usize,
    /// Slot edit counter, bumped whenever slots are inserted, removed, moved
    /// or replaced
    pub revision: u64,
    /// Current slot
    pub current: Option<usize>,
    /// Slots queued to play next
    pub upcoming: Option<RangeInclusive<usize>>,
    /// Is shuffle enabled
    pub shuffle: bool,
    /// Repeat mode
    pub repeat: RepeatMode,
}

/// Status container with change notifications
pub struct StatusContainer {
    tx: watch::Sender<QueueStatus>,
}

impl StatusContainer {
    /// Create a new status container
    #[must_use]
    pub fn new() -> Self {
        let (tx, _) = watch::channel(QueueStatus::default());
        Self { tx }
    }

    /// Get current status
    #[must_use]
    pub fn get(&self) -> QueueStatus {
        self.tx.borrow().clone()
    }

    /// Subscribe to status changes
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<QueueStatus> {
        self.tx.subscribe()
    }

    /// Replace the status, notifying subscribers only if it changed
    pub fn set(&self, status: QueueStatus) {
        self.tx.send_if_modified(|current| {
            if *current == status {
                false
            } else {
                *current = status;
                true
            }
        });
    }
}

impl Default for StatusContainer {
    fn default() -> Self {
        Self::new()
    }
}
