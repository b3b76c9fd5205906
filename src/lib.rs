//! # playqueue
//!
//! Queue consistency engine for media players.
//!
//! ## Features
//!
//! - Incremental shuffle orders that survive inserts, removals and moves
//! - "Play next" ranges kept contiguous behind the current track
//! - Single-flight queue restoration with drift re-anchoring
//! - Debounced persistence to JSON files or `SQLite`
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use playqueue::prelude::*;
//! use playqueue::repository::MemoryRepository;
//! use playqueue::testing::{MemoryEngine, create_test_tracks};
//!
//! # async fn example() -> playqueue::Result<()> {
//! let controller = Arc::new(QueueController::new(
//!     MemoryEngine::new(),
//!     QueueConfig::default(),
//! )?);
//! let library = Arc::new(MemoryRepository::with_tracks(create_test_tracks(&["a", "b", "c"])));
//! let storage = Arc::new(MemoryStorage::new());
//! let coordinator = Arc::new(RestorationCoordinator::with_storage(
//!     controller.clone(),
//!     library,
//!     storage,
//! ));
//!
//! // Restore whatever was saved last time
//! coordinator
//!     .restore_state(|queue| println!("restored {} tracks", queue.tracks.len()))
//!     .await;
//!
//! controller.append(create_test_tracks(&["a", "b"])).await?;
//! controller.play_next(create_test_tracks(&["c"])).await?;
//!
//! coordinator.save_state(true);
//! coordinator.flush().await;
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! - **Sequencing**: [`shuffle`] and [`upcoming`] are pure data structures
//! - **Composition**: [`QueueController`] owns the engine on a dedicated
//!   playback thread and keeps both structures in step with it
//! - **Persistence**: [`RestorationCoordinator`] loads and saves through
//!   [`storage`] and [`repository`]

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

// Public modules
/// Error types
pub mod error;
/// Queue status and events
pub mod state;
/// Core types
pub mod types;

/// Testing utilities
pub mod testing;

pub mod controller;
pub mod engine;
pub mod repository;
pub mod restore;
pub mod shuffle;
pub mod storage;
pub mod upcoming;

// Re-exports
pub use controller::QueueController;
pub use engine::{PlaybackEngine, PlaybackThread, Timeline};
pub use error::{QueueError, Result, StorageError};
pub use repository::{Resolution, TrackRepository};
pub use restore::{Drift, RestorationCoordinator, RestorationState, RestoreOutcome};
pub use shuffle::{LinearOrder, ShuffleOrder, ShuffleSeed, ShuffleSnapshot, ShuffleStrategy};
pub use state::{QueueEvent, QueueStatus};
pub use types::{
    PlaybackSnapshot, PlaylistEntry, QueueConfig, RepeatMode, RestoredQueue, TrackDescriptor,
    TrackId,
};
pub use upcoming::{SlotTag, UpcomingRange};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude for common imports
///
/// Convenient re-exports
pub mod prelude {
    pub use crate::storage::{MemoryStorage, PlaylistStore, SnapshotStore};
    pub use crate::{
        PlaybackEngine, QueueConfig, QueueController, QueueError, RepeatMode,
        RestorationCoordinator, RestoreOutcome, ShuffleOrder, ShuffleSeed, Timeline,
        TrackDescriptor, TrackId, TrackRepository,
    };
}
