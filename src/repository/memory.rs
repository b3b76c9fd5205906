use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use super::{Resolution, TrackRepository};
use crate::error::Result;
use crate::types::{TrackDescriptor, TrackId};

/// Repository backed by a map of known tracks
#[derive(Debug, Default)]
pub struct MemoryRepository {
    tracks: HashMap<TrackId, TrackDescriptor>,
    latency: Option<Duration>,
    calls: AtomicUsize,
}

impl MemoryRepository {
    /// Create an empty repository
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository knowing `tracks`
    #[must_use]
    pub fn with_tracks(tracks: impl IntoIterator<Item = TrackDescriptor>) -> Self {
        Self {
            tracks: tracks
                .into_iter()
                .map(|track| (track.id.clone(), track))
                .collect(),
            ..Self::default()
        }
    }

    /// Delay every lookup, simulating a slow library scan
    #[must_use]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Add or replace a track
    pub fn insert(&mut self, track: TrackDescriptor) {
        self.tracks.insert(track.id.clone(), track);
    }

    /// Forget a track
    pub fn remove(&mut self, id: &TrackId) -> Option<TrackDescriptor> {
        self.tracks.remove(id)
    }

    /// Number of `resolve` calls served
    #[must_use]
    pub fn resolve_calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TrackRepository for MemoryRepository {
    async fn resolve(&self, ids: &[TrackId]) -> Result<Resolution> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        let mut resolution = Resolution::default();
        for id in ids {
            match self.tracks.get(id) {
                Some(track) => resolution.resolved.push(track.clone()),
                None => resolution.missing.push(id.clone()),
            }
        }
        Ok(resolution)
    }
}
