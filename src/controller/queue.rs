use crate::engine::PlaybackEngine;
use crate::error::{QueueError, Result};
use crate::shuffle::{LinearOrder, ShuffleOrder, ShuffleSeed, ShuffleSnapshot, ShuffleStrategy};
use crate::state::QueueStatus;
use crate::types::{PlaybackSnapshot, RepeatMode, RestoredQueue, TrackDescriptor, TrackId};
use crate::upcoming::UpcomingRange;

/// Queue state confined to the playback thread
///
/// Every edit is applied to the range tracker and the engine in the same
/// job, followed by a fresh shuffle order, so no other job ever observes
/// them out of step.
pub(crate) struct QueueCore<E> {
    engine: E,
    upcoming: UpcomingRange,
    shuffle: Option<ShuffleOrder>,
    revision: u64,
}

impl<E: PlaybackEngine> QueueCore<E> {
    pub(crate) fn new(engine: E, sequential_queueing: bool) -> Self {
        let mut upcoming = UpcomingRange::new(sequential_queueing);
        upcoming.reset(engine.len(), engine.current_index());

        let shuffle = engine.shuffle_enabled().then(|| {
            let order = ShuffleOrder::build(engine.len(), ShuffleSeed::random());
            rotate_or_keep(order, engine.current_index())
        });

        let mut core = Self {
            engine,
            upcoming,
            shuffle,
            revision: 0,
        };
        core.install_order();
        core
    }

    pub(crate) fn engine(&self) -> &E {
        &self.engine
    }

    pub(crate) fn upcoming(&self) -> &UpcomingRange {
        &self.upcoming
    }

    pub(crate) fn shuffle(&self) -> Option<&ShuffleOrder> {
        self.shuffle.as_ref()
    }

    pub(crate) fn status(&self) -> QueueStatus {
        QueueStatus {
            len: self.engine.len(),
            revision: self.revision,
            current: self.engine.current_index(),
            upcoming: self.upcoming.upcoming_range(),
            shuffle: self.engine.shuffle_enabled(),
            repeat: self.engine.repeat_mode(),
        }
    }

    // ===== Timeline edits =====

    pub(crate) fn insert(&mut self, at: usize, tracks: Vec<TrackDescriptor>) -> Result<bool> {
        let len = self.engine.len();
        if at > len {
            return Err(QueueError::IndexOutOfRange { index: at, len });
        }
        let count = tracks.len();
        if count == 0 {
            return Ok(false);
        }

        let tagged = self.upcoming.on_insert(at, count)?;
        self.engine.insert_tracks(at, tracks);
        self.revision += 1;
        self.shuffle = self.shuffle.take().map(|order| order.with_insertion(at, count));
        self.install_order();
        self.sync_current()?;
        Ok(tagged)
    }

    pub(crate) fn remove(&mut self, from: usize, to_exclusive: usize) -> Result<()> {
        self.upcoming.on_remove(from, to_exclusive)?;
        self.engine.remove_tracks(from, to_exclusive);
        if from < to_exclusive {
            self.revision += 1;
        }
        self.shuffle = self
            .shuffle
            .take()
            .map(|order| order.with_removal(from, to_exclusive));
        self.install_order();
        self.sync_current()
    }

    pub(crate) fn move_track(&mut self, from: usize, to: usize) -> Result<()> {
        self.upcoming.on_move(from, to)?;
        if from == to {
            return Ok(());
        }
        self.engine.move_track(from, to);
        self.revision += 1;
        self.shuffle = self
            .shuffle
            .take()
            .map(|order| order.with_move(from, from + 1, to));
        self.install_order();
        self.sync_current()
    }

    pub(crate) fn clear(&mut self) {
        let len = self.engine.len();
        if len > 0 {
            self.engine.remove_tracks(0, len);
            self.revision += 1;
        }
        self.upcoming.reset(0, None);
        self.shuffle = self.shuffle.take().map(|order| order.clear());
        self.install_order();
    }

    pub(crate) fn replace(
        &mut self,
        tracks: Vec<TrackDescriptor>,
        start_index: usize,
        position_ms: u64,
    ) {
        let len = tracks.len();
        self.engine.set_tracks(tracks, start_index, position_ms);
        self.revision += 1;
        self.upcoming.reset(len, self.engine.current_index());
        self.shuffle = self.shuffle.take().map(|order| {
            rotate_or_keep(
                ShuffleOrder::build(len, order.seed().advance()),
                self.engine.current_index(),
            )
        });
        self.install_order();
    }

    // ===== Modes =====

    pub(crate) fn set_shuffle_enabled(&mut self, enabled: bool, seed: ShuffleSeed) {
        if enabled == self.engine.shuffle_enabled() && enabled == self.shuffle.is_some() {
            return;
        }
        self.shuffle = enabled.then(|| {
            rotate_or_keep(
                ShuffleOrder::build(self.engine.len(), seed),
                self.engine.current_index(),
            )
        });
        self.install_order();
        self.engine.set_shuffle_enabled(enabled);
        tracing::debug!("Shuffle {}", if enabled { "enabled" } else { "disabled" });
    }

    pub(crate) fn install_shuffle_order(&mut self, order: ShuffleOrder) -> Result<()> {
        let len = self.engine.len();
        if order.len() != len {
            return Err(QueueError::invalid_argument(
                "order",
                format!("covers {} slots, timeline has {len}", order.len()),
            ));
        }
        self.shuffle = Some(order);
        self.install_order();
        self.engine.set_shuffle_enabled(true);
        Ok(())
    }

    pub(crate) fn set_repeat_mode(&mut self, mode: RepeatMode) {
        self.engine.set_repeat_mode(mode);
    }

    // ===== Position =====

    pub(crate) fn seek(&mut self, index: usize, position_ms: u64) -> Result<()> {
        let len = self.engine.len();
        if index >= len {
            return Err(QueueError::IndexOutOfRange { index, len });
        }
        self.engine.seek(index, position_ms);
        self.sync_current()
    }

    pub(crate) fn advance(&mut self) -> Result<Option<usize>> {
        let Some(current) = self.engine.current_index() else {
            return Ok(None);
        };

        let next = if self.upcoming.upcoming_len() > 0 {
            Some(current + 1)
        } else {
            let order = self.active_order();
            order.next(current).or_else(|| match self.engine.repeat_mode() {
                RepeatMode::Off => None,
                RepeatMode::One => Some(current),
                RepeatMode::All => order.first(),
            })
        };

        if let Some(index) = next {
            self.seek(index, 0)?;
        }
        Ok(next)
    }

    pub(crate) fn previous(&mut self) -> Result<Option<usize>> {
        let Some(current) = self.engine.current_index() else {
            return Ok(None);
        };

        let order = self.active_order();
        let previous = order.previous(current).or_else(|| match self.engine.repeat_mode() {
            RepeatMode::All => order.last(),
            RepeatMode::Off | RepeatMode::One => None,
        });

        if let Some(index) = previous {
            self.seek(index, 0)?;
        }
        Ok(previous)
    }

    pub(crate) fn on_position_discontinuity(&mut self) -> Result<()> {
        self.upcoming.on_position_discontinuity(self.engine.current_index())
    }

    // ===== Persistence =====

    pub(crate) fn capture(
        &self,
        include_playlist: bool,
        persist_shuffle_order: bool,
    ) -> (PlaybackSnapshot, Option<Vec<TrackId>>) {
        let shuffle_enabled = self.engine.shuffle_enabled();
        let snapshot = PlaybackSnapshot {
            repeat_mode: self.engine.repeat_mode(),
            shuffle_enabled,
            last_index: self.engine.current_index().unwrap_or(0),
            position_ms: self.engine.position_ms(),
            shuffle: self
                .shuffle
                .as_ref()
                .filter(|_| shuffle_enabled)
                .map(|order| order.to_snapshot(persist_shuffle_order)),
        };
        let ids = include_playlist.then(|| self.engine.track_ids());
        (snapshot, ids)
    }

    /// Current queue as delivered to restoration listeners
    pub(crate) fn current_queue(&self) -> RestoredQueue {
        RestoredQueue {
            tracks: (0..self.engine.len())
                .filter_map(|index| self.engine.track(index).cloned())
                .collect(),
            start_index: self.engine.current_index().unwrap_or(0),
            position_ms: self.engine.position_ms(),
        }
    }

    pub(crate) fn apply_restored(
        &mut self,
        restored: &RestoredQueue,
        repeat_mode: RepeatMode,
        shuffle_enabled: bool,
        shuffle: Option<&ShuffleSnapshot>,
    ) {
        let len = restored.tracks.len();
        self.engine.set_tracks(
            restored.tracks.clone(),
            restored.start_index,
            restored.position_ms,
        );
        self.revision += 1;
        self.upcoming.reset(len, self.engine.current_index());
        self.engine.set_repeat_mode(repeat_mode);

        self.shuffle = shuffle_enabled.then(|| {
            let start = self.engine.current_index();
            shuffle
                .map(|snapshot| restore_order(snapshot, len, start))
                .unwrap_or_else(|| {
                    rotate_or_keep(ShuffleOrder::build(len, ShuffleSeed::random()), start)
                })
        });
        self.install_order();
        self.engine.set_shuffle_enabled(shuffle_enabled);
    }

    fn active_order(&self) -> Box<dyn ShuffleStrategy> {
        match (&self.shuffle, self.engine.shuffle_enabled()) {
            (Some(order), true) => Box::new(order.clone()),
            _ => Box::new(LinearOrder::new(self.engine.len())),
        }
    }

    fn install_order(&mut self) {
        let order = self
            .shuffle
            .clone()
            .map(|order| Box::new(order) as Box<dyn ShuffleStrategy>);
        self.engine.set_shuffle_order(order);
    }

    fn sync_current(&mut self) -> Result<()> {
        let current = self.engine.current_index();
        if current != self.upcoming.current() {
            self.upcoming.on_position_discontinuity(current)?;
        }
        Ok(())
    }
}

fn rotate_or_keep(order: ShuffleOrder, first: Option<usize>) -> ShuffleOrder {
    match first {
        Some(first) => order.rotate_to_first(first).unwrap_or(order),
        None => order,
    }
}

fn restore_order(snapshot: &ShuffleSnapshot, len: usize, start: Option<usize>) -> ShuffleOrder {
    let stored = snapshot
        .permutation
        .as_ref()
        .filter(|permutation| permutation.len() == len)
        .map(|_| snapshot.clone())
        .unwrap_or_else(|| ShuffleSnapshot {
            permutation: None,
            seed: snapshot.seed,
        });

    match ShuffleOrder::from_snapshot(&stored, Some(len), start) {
        Ok(order) => order,
        Err(e) => {
            tracing::warn!("Discarding stored shuffle order: {}", e);
            rotate_or_keep(ShuffleOrder::build(len, ShuffleSeed::random()), start)
        }
    }
}
