//! Queue restoration
//!
//! [`RestorationCoordinator`] rebuilds the queue from durable storage once
//! per process, notifies everyone waiting on it, and debounces later saves.
//!
//! The lifecycle is a one-way state machine:
//!
//! ```text
//! Awaiting --(compare-and-set)--> Restoring --(always)--> Restored
//! ```
//!
//! Only the caller that wins the compare-and-set performs the load. Every
//! outcome, including storage failures and panicking collaborators, ends in
//! `Restored` so that no listener waits forever.

mod coordinator;
mod drift;
mod listeners;

#[cfg(test)]
mod tests;

pub use coordinator::RestorationCoordinator;
pub use drift::Drift;
pub use listeners::{CompletionListener, QueueListener};

/// Restoration lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum RestorationState {
    /// Nobody has asked for a restore yet
    Awaiting = 0,
    /// A restore is loading
    Restoring = 1,
    /// Terminal; the queue is whatever restoration (or its absence) left
    Restored = 2,
}

impl RestorationState {
    pub(crate) fn from_u8(value: u8) -> Self {
        match value {
            0 => Self::Awaiting,
            1 => Self::Restoring,
            _ => Self::Restored,
        }
    }
}

/// Result of a [`RestorationCoordinator::restore_state`] call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RestoreOutcome {
    /// The saved queue was loaded and applied
    Restored {
        /// Number of playable tracks restored
        track_count: usize,
        /// Set when the library no longer resolves every saved track
        drift: Option<Drift>,
    },
    /// The timeline was already populated; nothing was loaded
    Skipped {
        /// Number of tracks already on the timeline
        track_count: usize,
    },
    /// Loading failed; listeners received an empty queue
    Failed,
    /// Another call already owns (or finished) the restore
    ConcurrentRestoreIgnored,
}

impl RestoreOutcome {
    /// Check if this call performed the restore
    #[must_use]
    pub fn is_owner(&self) -> bool {
        !matches!(self, Self::ConcurrentRestoreIgnored)
    }
}
