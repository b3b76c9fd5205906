use crate::repository::Resolution;
use crate::types::{PlaybackSnapshot, TrackId};

/// Mismatch between a saved queue and the tracks that still resolve
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Drift {
    /// Number of identifiers saved
    pub saved: usize,
    /// Number of tracks resolved
    pub resolved: usize,
    /// Identifiers that no longer resolve
    pub missing: Vec<TrackId>,
    /// Whether the saved current track was found again
    pub reanchored: bool,
}

/// Where playback resumes in a restored queue
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Anchor {
    pub(crate) start_index: usize,
    pub(crate) position_ms: u64,
    pub(crate) drift: Option<Drift>,
}

/// Pick the start slot for `resolution` given the saved ids and snapshot
///
/// Without drift the saved index is kept. With drift the saved current
/// track is looked up by identifier; if it is gone playback restarts at
/// the first slot.
pub(crate) fn anchor(
    saved: &[TrackId],
    snapshot: &PlaybackSnapshot,
    resolution: &Resolution,
) -> Anchor {
    let resolved = resolution.resolved.len();
    let last = resolved.saturating_sub(1);

    if resolved == saved.len() {
        return Anchor {
            start_index: snapshot.last_index.min(last),
            position_ms: snapshot.position_ms,
            drift: None,
        };
    }

    let found = saved.get(snapshot.last_index).and_then(|current| {
        resolution
            .resolved
            .iter()
            .position(|track| &track.id == current)
    });

    let drift = Drift {
        saved: saved.len(),
        resolved,
        missing: resolution.missing.clone(),
        reanchored: found.is_some(),
    };

    match found {
        Some(index) => Anchor {
            start_index: index.min(last),
            position_ms: snapshot.position_ms,
            drift: Some(drift),
        },
        None => Anchor {
            start_index: 0,
            position_ms: 0,
            drift: Some(drift),
        },
    }
}
