//! Playback engine boundary
//!
//! The engine itself (decoding, rendering, transport) is external. This
//! module defines the capabilities the queue layer needs from it and the
//! dedicated thread every engine-visible mutation is confined to.

mod thread;

#[cfg(test)]
mod tests;

pub use thread::PlaybackThread;

use crate::shuffle::ShuffleStrategy;
use crate::types::{RepeatMode, TrackDescriptor, TrackId};

/// Ordered list of track slots with a current position
pub trait Timeline {
    /// Number of slots
    fn len(&self) -> usize;

    /// Check if the timeline has no slots
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Track at `index`
    fn track(&self, index: usize) -> Option<&TrackDescriptor>;

    /// Slot currently playing (or paused on)
    fn current_index(&self) -> Option<usize>;

    /// Identifiers of every slot, in timeline order
    fn track_ids(&self) -> Vec<TrackId> {
        (0..self.len())
            .filter_map(|index| self.track(index))
            .map(|track| track.id.clone())
            .collect()
    }
}

/// Capabilities consumed from the external playback engine
///
/// Implementations follow the usual player rules for the current slot:
/// inserting or removing before it shifts it, removing it promotes the slot
/// that slides into its place, and the first insertion into an empty
/// timeline makes slot 0 current.
pub trait PlaybackEngine: Timeline + Send + 'static {
    /// Position in the current track (milliseconds)
    fn position_ms(&self) -> u64;

    /// Active repeat mode
    fn repeat_mode(&self) -> RepeatMode;

    /// Change repeat mode
    fn set_repeat_mode(&mut self, mode: RepeatMode);

    /// Check if shuffle traversal is active
    fn shuffle_enabled(&self) -> bool;

    /// Toggle shuffle traversal
    fn set_shuffle_enabled(&mut self, enabled: bool);

    /// Install (or remove) the order used while shuffle is enabled
    fn set_shuffle_order(&mut self, order: Option<Box<dyn ShuffleStrategy>>);

    /// Replace the whole timeline
    fn set_tracks(&mut self, tracks: Vec<TrackDescriptor>, start_index: usize, position_ms: u64);

    /// Insert tracks so the first lands at `at`
    fn insert_tracks(&mut self, at: usize, tracks: Vec<TrackDescriptor>);

    /// Remove the slots `from..to_exclusive`
    fn remove_tracks(&mut self, from: usize, to_exclusive: usize);

    /// Move the slot at `from` so it ends up at `to`
    fn move_track(&mut self, from: usize, to: usize);

    /// Jump to `index` at `position_ms`
    fn seek(&mut self, index: usize, position_ms: u64);
}
