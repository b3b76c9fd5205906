use serde::{Deserialize, Serialize};

use super::track::{TrackDescriptor, TrackId};
use crate::shuffle::ShuffleSnapshot;

/// Repeat mode for queue playback
///
/// Persisted as an integer: 0 off, 1 one, 2 all.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "i32", try_from = "i32")]
pub enum RepeatMode {
    /// No repeat
    #[default]
    Off,
    /// Repeat current track
    One,
    /// Repeat entire queue
    All,
}

impl From<RepeatMode> for i32 {
    fn from(mode: RepeatMode) -> Self {
        match mode {
            RepeatMode::Off => 0,
            RepeatMode::One => 1,
            RepeatMode::All => 2,
        }
    }
}

impl TryFrom<i32> for RepeatMode {
    type Error = String;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Off),
            1 => Ok(Self::One),
            2 => Ok(Self::All),
            other => Err(format!("unknown repeat mode {other}")),
        }
    }
}

/// Small, frequently written record of the playback position and mode flags
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaybackSnapshot {
    /// Repeat mode at save time
    pub repeat_mode: RepeatMode,

    /// Whether shuffle was enabled
    pub shuffle_enabled: bool,

    /// Index of the current slot in the timeline
    pub last_index: usize,

    /// Position in the current track (milliseconds)
    pub position_ms: u64,

    /// Shuffle order, present only while shuffle is enabled
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shuffle: Option<ShuffleSnapshot>,
}

/// One row of the persisted ordered track list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistEntry {
    /// Track identifier
    pub id: TrackId,

    /// Position in the queue
    pub order: u32,
}

impl PlaylistEntry {
    /// Number an ordered list of identifiers
    #[must_use]
    pub fn from_ids(ids: Vec<TrackId>) -> Vec<Self> {
        ids.into_iter()
            .zip(0u32..)
            .map(|(id, order)| Self { id, order })
            .collect()
    }

    /// Recover the identifier order, sorting rows by `order`
    #[must_use]
    pub fn into_ids(mut entries: Vec<Self>) -> Vec<TrackId> {
        entries.sort_by_key(|entry| entry.order);
        entries.into_iter().map(|entry| entry.id).collect()
    }
}

/// Queue delivered to restoration listeners
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RestoredQueue {
    /// Resolved, playable tracks in queue order
    pub tracks: Vec<TrackDescriptor>,

    /// Slot to start playback from
    pub start_index: usize,

    /// Position within the start slot (milliseconds)
    pub position_ms: u64,
}

impl RestoredQueue {
    /// Check if nothing was restored
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}
