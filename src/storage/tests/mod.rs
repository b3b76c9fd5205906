
use crate::shuffle::{ShuffleOrder, ShuffleSeed};
use crate::types::{PlaybackSnapshot, PlaylistEntry, RepeatMode, TrackId};

fn sample_snapshot() -> PlaybackSnapshot {
    PlaybackSnapshot {
        repeat_mode: RepeatMode::One,
        shuffle_enabled: true,
        last_index: 2,
        position_ms: 42_000,
        shuffle: Some(ShuffleOrder::build(4, ShuffleSeed::new(9)).to_snapshot(true)),
    }
}

fn sample_playlist() -> Vec<PlaylistEntry> {
    PlaylistEntry::from_ids(vec![
        TrackId::new("t1"),
        TrackId::new("t2"),
        TrackId::new("t3"),
    ])
}
