//! Reference collaborators for tests and prototyping

pub mod memory_engine;
#[cfg(test)]
/// Unit tests for the reference engine.
pub mod tests;

pub use memory_engine::MemoryEngine;

use crate::types::TrackDescriptor;

/// Helper to create a `TrackDescriptor` for testing.
#[must_use]
pub fn create_test_track(id: &str) -> TrackDescriptor {
    TrackDescriptor::new(id, format!("file:///music/{id}.flac"), format!("Track {id}"))
}

/// Helper to create one test track per identifier.
#[must_use]
pub fn create_test_tracks(ids: &[&str]) -> Vec<TrackDescriptor> {
    ids.iter().map(|id| create_test_track(id)).collect()
}
