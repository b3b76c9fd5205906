//! In-memory playback engine

use crate::engine::{PlaybackEngine, Timeline};
use crate::shuffle::ShuffleStrategy;
use crate::types::{RepeatMode, TrackDescriptor};

/// Playback engine keeping only the timeline and transport flags
///
/// Follows the current-slot rules documented on [`PlaybackEngine`]; no
/// audio is rendered.
#[derive(Default)]
pub struct MemoryEngine {
    tracks: Vec<TrackDescriptor>,
    current: Option<usize>,
    position_ms: u64,
    repeat: RepeatMode,
    shuffle: bool,
    order: Option<Box<dyn ShuffleStrategy>>,
}

impl MemoryEngine {
    /// Create an empty engine
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine already holding `tracks`, positioned at `current`
    #[must_use]
    pub fn with_tracks(tracks: Vec<TrackDescriptor>, current: usize) -> Self {
        let mut engine = Self::new();
        engine.set_tracks(tracks, current, 0);
        engine
    }

    /// All tracks in timeline order
    #[must_use]
    pub fn tracks(&self) -> &[TrackDescriptor] {
        &self.tracks
    }

    /// Installed shuffle order
    #[must_use]
    pub fn shuffle_order(&self) -> Option<&dyn ShuffleStrategy> {
        self.order.as_deref()
    }

    /// Simulate playback progress
    pub fn set_position_ms(&mut self, position_ms: u64) {
        self.position_ms = position_ms;
    }
}

impl Timeline for MemoryEngine {
    fn len(&self) -> usize {
        self.tracks.len()
    }

    fn track(&self, index: usize) -> Option<&TrackDescriptor> {
        self.tracks.get(index)
    }

    fn current_index(&self) -> Option<usize> {
        self.current
    }
}

impl PlaybackEngine for MemoryEngine {
    fn position_ms(&self) -> u64 {
        self.position_ms
    }

    fn repeat_mode(&self) -> RepeatMode {
        self.repeat
    }

    fn set_repeat_mode(&mut self, mode: RepeatMode) {
        self.repeat = mode;
    }

    fn shuffle_enabled(&self) -> bool {
        self.shuffle
    }

    fn set_shuffle_enabled(&mut self, enabled: bool) {
        self.shuffle = enabled;
    }

    fn set_shuffle_order(&mut self, order: Option<Box<dyn ShuffleStrategy>>) {
        self.order = order;
    }

    fn set_tracks(&mut self, tracks: Vec<TrackDescriptor>, start_index: usize, position_ms: u64) {
        self.current = tracks.len().checked_sub(1).map(|last| start_index.min(last));
        self.position_ms = if self.current.is_some() { position_ms } else { 0 };
        self.tracks = tracks;
    }

    fn insert_tracks(&mut self, at: usize, tracks: Vec<TrackDescriptor>) {
        let at = at.min(self.tracks.len());
        let count = tracks.len();
        self.tracks.splice(at..at, tracks);

        self.current = match self.current {
            Some(current) if at <= current => Some(current + count),
            None if !self.tracks.is_empty() => Some(0),
            other => other,
        };
    }

    fn remove_tracks(&mut self, from: usize, to_exclusive: usize) {
        let to = to_exclusive.min(self.tracks.len());
        let from = from.min(to);
        let removed = to - from;
        self.tracks.drain(from..to);

        let len = self.tracks.len();
        self.current = self.current.and_then(|current| {
            if current < from {
                Some(current)
            } else if current >= to {
                Some(current - removed)
            } else {
                self.position_ms = 0;
                len.checked_sub(1).map(|last| from.min(last))
            }
        });
    }

    fn move_track(&mut self, from: usize, to: usize) {
        if from >= self.tracks.len() || to >= self.tracks.len() || from == to {
            return;
        }
        let track = self.tracks.remove(from);
        self.tracks.insert(to, track);

        if let Some(current) = self.current {
            self.current = Some(if current == from {
                to
            } else if from < current && to >= current {
                current - 1
            } else if from > current && to <= current {
                current + 1
            } else {
                current
            });
        }
    }

    fn seek(&mut self, index: usize, position_ms: u64) {
        if index < self.tracks.len() {
            self.current = Some(index);
            self.position_ms = position_ms;
        }
    }
}
