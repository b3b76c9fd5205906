//! Queue controller
//!
//! [`QueueController`] is the single entry point for queue edits. It owns the
//! playback engine through a [`PlaybackThread`] and keeps the upcoming range
//! and shuffle order in step with every timeline change.

mod queue;

#[cfg(test)]
mod tests;

use std::ops::RangeInclusive;

use tokio::sync::watch;

use self::queue::QueueCore;
use crate::engine::{PlaybackEngine, PlaybackThread};
use crate::error::Result;
use crate::shuffle::{ShuffleOrder, ShuffleSeed, ShuffleSnapshot};
use crate::state::{EventBus, QueueEvent, QueueStatus, StatusContainer};
use crate::types::{
    PlaybackSnapshot, QueueConfig, RepeatMode, RestoredQueue, TrackDescriptor, TrackId,
};

/// Composes the playback engine, upcoming range and shuffle order
///
/// All methods marshal onto the playback thread; they may be called from any
/// task.
pub struct QueueController<E> {
    thread: PlaybackThread<QueueCore<E>>,
    status: StatusContainer,
    events: EventBus,
    config: QueueConfig,
}

impl<E: PlaybackEngine> QueueController<E> {
    /// Take ownership of `engine` and move it onto the playback thread
    ///
    /// # Errors
    ///
    /// Returns `EngineUnavailable` if the playback thread cannot be spawned
    pub fn new(engine: E, config: QueueConfig) -> Result<Self> {
        let core = QueueCore::new(engine, config.sequential_queueing);
        let status = StatusContainer::new();
        status.set(core.status());

        let thread = PlaybackThread::spawn(&config.playback_thread_name, core)?;
        tracing::debug!("Queue controller started on '{}'", config.playback_thread_name);

        Ok(Self {
            thread,
            status,
            events: EventBus::new(config.event_capacity),
            config,
        })
    }

    /// Active configuration
    #[must_use]
    pub fn config(&self) -> &QueueConfig {
        &self.config
    }

    /// Last published status
    #[must_use]
    pub fn status(&self) -> QueueStatus {
        self.status.get()
    }

    /// Subscribe to status changes
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<QueueStatus> {
        self.status.subscribe()
    }

    /// Queue event bus
    #[must_use]
    pub fn events(&self) -> &EventBus {
        &self.events
    }

    /// Check if the caller runs on the playback thread
    #[must_use]
    pub fn is_playback_thread(&self) -> bool {
        self.thread.is_current()
    }

    // ===== Queries =====

    /// Timeline length
    ///
    /// # Errors
    ///
    /// Returns `EngineUnavailable` if the playback thread has stopped
    pub async fn len(&self) -> Result<usize> {
        self.read(|core| core.engine().len()).await
    }

    /// Check if the timeline is empty
    ///
    /// # Errors
    ///
    /// Returns `EngineUnavailable` if the playback thread has stopped
    pub async fn is_empty(&self) -> Result<bool> {
        self.read(|core| core.engine().is_empty()).await
    }

    /// Current slot
    ///
    /// # Errors
    ///
    /// Returns `EngineUnavailable` if the playback thread has stopped
    pub async fn current_index(&self) -> Result<Option<usize>> {
        self.read(|core| core.engine().current_index()).await
    }

    /// Every track, in timeline order
    ///
    /// # Errors
    ///
    /// Returns `EngineUnavailable` if the playback thread has stopped
    pub async fn tracks(&self) -> Result<Vec<TrackDescriptor>> {
        self.read(|core| core.current_queue().tracks).await
    }

    /// Identifiers of every slot, in timeline order
    ///
    /// # Errors
    ///
    /// Returns `EngineUnavailable` if the playback thread has stopped
    pub async fn track_ids(&self) -> Result<Vec<TrackId>> {
        self.read(|core| core.engine().track_ids()).await
    }

    /// Check if `slot` is queued to play next
    ///
    /// # Errors
    ///
    /// Returns `EngineUnavailable` if the playback thread has stopped
    pub async fn is_upcoming(&self, slot: usize) -> Result<bool> {
        self.read(move |core| core.upcoming().is_upcoming(slot)).await
    }

    /// Slots queued to play next
    ///
    /// # Errors
    ///
    /// Returns `EngineUnavailable` if the playback thread has stopped
    pub async fn upcoming_range(&self) -> Result<Option<RangeInclusive<usize>>> {
        self.read(|core| core.upcoming().upcoming_range()).await
    }

    /// Installed shuffle order, `None` while shuffle is off
    ///
    /// # Errors
    ///
    /// Returns `EngineUnavailable` if the playback thread has stopped
    pub async fn shuffle_order(&self) -> Result<Option<ShuffleOrder>> {
        self.read(|core| core.shuffle().cloned()).await
    }

    /// Run `f` against the engine on the playback thread
    ///
    /// # Errors
    ///
    /// Returns `EngineUnavailable` if the playback thread has stopped
    pub async fn with_engine<R, F>(&self, f: F) -> Result<R>
    where
        F: FnOnce(&E) -> R + Send + 'static,
        R: Send + 'static,
    {
        self.read(move |core| f(core.engine())).await
    }

    // ===== Timeline edits =====

    /// Insert `tracks` so the first lands at `at`
    ///
    /// Returns whether the new slots joined the upcoming range.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` if `at` is past the end
    pub async fn insert(&self, at: usize, tracks: Vec<TrackDescriptor>) -> Result<bool> {
        tracing::debug!("Inserting {} tracks at {}", tracks.len(), at);
        self.apply(move |core| core.insert(at, tracks)).await
    }

    /// Insert `tracks` right after the current slot
    ///
    /// # Errors
    ///
    /// Returns `EngineUnavailable` if the playback thread has stopped
    pub async fn play_next(&self, tracks: Vec<TrackDescriptor>) -> Result<bool> {
        self.apply(move |core| {
            let engine = core.engine();
            let at = engine.current_index().map_or(engine.len(), |c| c + 1);
            core.insert(at, tracks)
        })
        .await
    }

    /// Append `tracks` to the end of the timeline
    ///
    /// The new slots extend the upcoming range when it already reaches the
    /// end.
    ///
    /// # Errors
    ///
    /// Returns `EngineUnavailable` if the playback thread has stopped
    pub async fn append(&self, tracks: Vec<TrackDescriptor>) -> Result<bool> {
        self.apply(move |core| {
            let at = core.engine().len();
            core.insert(at, tracks)
        })
        .await
    }

    /// Remove the slots `from..to_exclusive`
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` for a reversed range and `IndexOutOfRange`
    /// if it extends past the end
    pub async fn remove(&self, from: usize, to_exclusive: usize) -> Result<()> {
        tracing::debug!("Removing slots {}..{}", from, to_exclusive);
        self.apply(move |core| core.remove(from, to_exclusive)).await
    }

    /// Remove a single slot
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` if `index` is past the end
    pub async fn remove_at(&self, index: usize) -> Result<()> {
        self.remove(index, index + 1).await
    }

    /// Move the slot at `from` so it ends up at `to`
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` if either index is outside the timeline
    pub async fn move_track(&self, from: usize, to: usize) -> Result<()> {
        self.apply(move |core| core.move_track(from, to)).await
    }

    /// Remove every slot
    ///
    /// # Errors
    ///
    /// Returns `EngineUnavailable` if the playback thread has stopped
    pub async fn clear(&self) -> Result<()> {
        self.apply(|core| {
            core.clear();
            Ok(())
        })
        .await
    }

    /// Replace the whole timeline
    ///
    /// # Errors
    ///
    /// Returns `EngineUnavailable` if the playback thread has stopped
    pub async fn replace_queue(
        &self,
        tracks: Vec<TrackDescriptor>,
        start_index: usize,
        position_ms: u64,
    ) -> Result<()> {
        self.apply(move |core| {
            core.replace(tracks, start_index, position_ms);
            Ok(())
        })
        .await
    }

    // ===== Modes =====

    /// Toggle shuffle; enabling builds a fresh order led by the current slot
    ///
    /// # Errors
    ///
    /// Returns `EngineUnavailable` if the playback thread has stopped
    pub async fn set_shuffle_enabled(&self, enabled: bool) -> Result<()> {
        self.set_shuffle_enabled_with_seed(enabled, ShuffleSeed::random()).await
    }

    /// Toggle shuffle with a caller-chosen seed
    ///
    /// # Errors
    ///
    /// Returns `EngineUnavailable` if the playback thread has stopped
    pub async fn set_shuffle_enabled_with_seed(
        &self,
        enabled: bool,
        seed: ShuffleSeed,
    ) -> Result<()> {
        self.apply(move |core| {
            core.set_shuffle_enabled(enabled, seed);
            Ok(())
        })
        .await
    }

    /// Install `order` on the engine and enable shuffle
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `order` does not cover the timeline
    pub async fn install_shuffle_order(&self, order: ShuffleOrder) -> Result<()> {
        self.apply(move |core| core.install_shuffle_order(order)).await
    }

    /// Change repeat mode
    ///
    /// # Errors
    ///
    /// Returns `EngineUnavailable` if the playback thread has stopped
    pub async fn set_repeat_mode(&self, mode: RepeatMode) -> Result<()> {
        self.apply(move |core| {
            core.set_repeat_mode(mode);
            Ok(())
        })
        .await
    }

    // ===== Position =====

    /// Jump to `index` at `position_ms`
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` if `index` is past the end
    pub async fn seek_to(&self, index: usize, position_ms: u64) -> Result<()> {
        self.apply(move |core| core.seek(index, position_ms)).await
    }

    /// Move to the next slot
    ///
    /// The upcoming range plays first, then the active order. Returns the new
    /// current slot, or `None` at the end of a non-repeating queue.
    ///
    /// # Errors
    ///
    /// Returns `EngineUnavailable` if the playback thread has stopped
    pub async fn advance(&self) -> Result<Option<usize>> {
        self.apply(QueueCore::advance).await
    }

    /// Move to the previous slot of the active order
    ///
    /// # Errors
    ///
    /// Returns `EngineUnavailable` if the playback thread has stopped
    pub async fn previous(&self) -> Result<Option<usize>> {
        self.apply(QueueCore::previous).await
    }

    /// Realign after the engine moved on its own (auto-advance, remote seek)
    ///
    /// # Errors
    ///
    /// Returns `EngineUnavailable` if the playback thread has stopped
    pub async fn on_position_discontinuity(&self) -> Result<()> {
        self.apply(QueueCore::on_position_discontinuity).await
    }

    // ===== Persistence =====

    /// Read the state worth persisting
    ///
    /// # Errors
    ///
    /// Returns `EngineUnavailable` if the playback thread has stopped
    pub async fn capture(
        &self,
        include_playlist: bool,
    ) -> Result<(PlaybackSnapshot, Option<Vec<TrackId>>)> {
        let persist_order = self.config.persist_shuffle_order;
        self.read(move |core| core.capture(include_playlist, persist_order)).await
    }

    pub(crate) async fn current_queue(&self) -> Result<RestoredQueue> {
        self.read(QueueCore::current_queue).await
    }

    pub(crate) async fn apply_restored(
        &self,
        restored: RestoredQueue,
        repeat_mode: RepeatMode,
        shuffle_enabled: bool,
        shuffle: Option<ShuffleSnapshot>,
    ) -> Result<()> {
        self.apply(move |core| {
            core.apply_restored(&restored, repeat_mode, shuffle_enabled, shuffle.as_ref());
            Ok(())
        })
        .await
    }

    /// Stop the playback thread after pending jobs finish
    pub fn shutdown(self) {
        self.thread.shutdown();
    }

    async fn read<R, F>(&self, f: F) -> Result<R>
    where
        F: FnOnce(&QueueCore<E>) -> R + Send + 'static,
        R: Send + 'static,
    {
        self.thread.run(move |core| f(core)).await
    }

    async fn apply<R, F>(&self, op: F) -> Result<R>
    where
        F: FnOnce(&mut QueueCore<E>) -> Result<R> + Send + 'static,
        R: Send + 'static,
    {
        let (result, before, after) = self
            .thread
            .run(move |core| {
                let before = core.status();
                let result = op(core);
                (result, before, core.status())
            })
            .await?;

        for event in QueueEvent::diff(&before, &after) {
            self.events.emit(event);
        }
        self.status.set(after);
        result
    }
}
