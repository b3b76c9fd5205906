use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use futures::FutureExt;
use tokio::runtime::Handle;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use super::drift;
use super::listeners::{self, Listeners};
use super::{RestorationState, RestoreOutcome};
use crate::controller::QueueController;
use crate::engine::PlaybackEngine;
use crate::error::Result;
use crate::repository::{Resolution, TrackRepository};
use crate::state::QueueEvent;
use crate::storage::{PlaylistStore, SnapshotStore};
use crate::types::{PlaylistEntry, RestoredQueue};

/// Debounced save waiting for its delay to elapse
struct PendingSave {
    handle: JoinHandle<()>,
    save_playlist: bool,
}

/// Restores the queue once and persists it afterwards
///
/// The restoration state is the only value read without the lock. Listener
/// registration and the final drain-and-transition share one mutex, so a
/// listener is either delivered to or still registered, never both.
pub struct RestorationCoordinator<E> {
    controller: Arc<QueueController<E>>,
    repository: Arc<dyn TrackRepository>,
    snapshots: Arc<dyn SnapshotStore>,
    playlists: Arc<dyn PlaylistStore>,
    state: AtomicU8,
    listeners: Mutex<Listeners>,
    pending_save: Mutex<Option<PendingSave>>,
}

impl<E: PlaybackEngine> RestorationCoordinator<E> {
    /// Create a coordinator in the `Awaiting` state
    pub fn new(
        controller: Arc<QueueController<E>>,
        repository: Arc<dyn TrackRepository>,
        snapshots: Arc<dyn SnapshotStore>,
        playlists: Arc<dyn PlaylistStore>,
    ) -> Self {
        Self {
            controller,
            repository,
            snapshots,
            playlists,
            state: AtomicU8::new(RestorationState::Awaiting as u8),
            listeners: Mutex::new(Listeners::default()),
            pending_save: Mutex::new(None),
        }
    }

    /// Create a coordinator whose snapshot and playlist share one backend
    pub fn with_storage<S>(
        controller: Arc<QueueController<E>>,
        repository: Arc<dyn TrackRepository>,
        storage: Arc<S>,
    ) -> Self
    where
        S: SnapshotStore + PlaylistStore + 'static,
    {
        let snapshots: Arc<dyn SnapshotStore> = storage.clone();
        Self::new(controller, repository, snapshots, storage)
    }

    /// Controller this coordinator restores into
    #[must_use]
    pub fn controller(&self) -> &Arc<QueueController<E>> {
        &self.controller
    }

    /// Current lifecycle state, without locking
    #[must_use]
    pub fn state(&self) -> RestorationState {
        RestorationState::from_u8(self.state.load(Ordering::SeqCst))
    }

    /// Check if restoration reached its terminal state
    #[must_use]
    pub fn is_restored(&self) -> bool {
        self.state() == RestorationState::Restored
    }

    /// Number of listeners still waiting
    #[must_use]
    pub fn pending_listeners(&self) -> usize {
        self.lock_listeners().len()
    }

    /// Restore the saved queue, once
    ///
    /// The caller that wins the `Awaiting -> Restoring` transition loads the
    /// snapshot, resolves its tracks and applies them, unless the timeline is
    /// already populated. `on_complete` then receives the queue, followed by
    /// every registered listener. A losing caller's `on_complete` is queued
    /// with the other listeners while restoration is still running and
    /// dropped once it has finished.
    ///
    /// Storage and repository failures are logged; the state always ends in
    /// `Restored` and listeners receive an empty queue.
    pub async fn restore_state<F>(&self, on_complete: F) -> RestoreOutcome
    where
        F: FnOnce(&RestoredQueue) + Send + 'static,
    {
        if self
            .state
            .compare_exchange(
                RestorationState::Awaiting as u8,
                RestorationState::Restoring as u8,
                Ordering::SeqCst,
                Ordering::SeqCst,
            )
            .is_err()
        {
            let mut listeners = self.lock_listeners();
            if self.is_restored() {
                tracing::debug!("Restore already finished; ignoring request");
            } else {
                tracing::debug!("Restore in progress; waiting for it");
                listeners.add_queue(Box::new(on_complete));
            }
            return RestoreOutcome::ConcurrentRestoreIgnored;
        }

        tracing::info!("Restoring queue");
        let (queue, outcome) = match AssertUnwindSafe(self.load()).catch_unwind().await {
            Ok(Ok(loaded)) => loaded,
            Ok(Err(e)) => {
                tracing::warn!("Queue restore failed: {}", e);
                (RestoredQueue::default(), RestoreOutcome::Failed)
            }
            Err(_) => {
                tracing::error!("Queue restore panicked");
                (RestoredQueue::default(), RestoreOutcome::Failed)
            }
        };

        let pending = {
            let mut listeners = self.lock_listeners();
            self.state.store(RestorationState::Restored as u8, Ordering::SeqCst);
            listeners.take()
        };

        listeners::invoke(|| on_complete(&queue));
        pending.deliver(&queue);

        tracing::info!("Queue restored with {} tracks", queue.tracks.len());
        self.controller.events().emit(QueueEvent::Restored {
            track_count: queue.tracks.len(),
        });
        outcome
    }

    /// Call `listener` once restoration has finished
    ///
    /// Runs it before returning if that already happened.
    pub fn wait_for_completion<F>(&self, listener: F)
    where
        F: FnOnce() + Send + 'static,
    {
        {
            let mut listeners = self.lock_listeners();
            if !self.is_restored() {
                listeners.add_completion(Box::new(listener));
                return;
            }
        }
        listeners::invoke(listener);
    }

    /// Receive the restored queue
    ///
    /// Has no effect once restoration has finished; late subscribers read
    /// the controller instead.
    pub fn wait_for_queue<F>(&self, listener: F)
    where
        F: FnOnce(&RestoredQueue) + Send + 'static,
    {
        let mut listeners = self.lock_listeners();
        if self.is_restored() {
            tracing::trace!("Restore already finished; queue listener dropped");
        } else {
            listeners.add_queue(Box::new(listener));
        }
    }

    /// Wait until restoration has finished
    pub async fn restored(&self) {
        let (tx, rx) = oneshot::channel();
        self.wait_for_completion(move || {
            let _ = tx.send(());
        });
        let _ = rx.await;
    }

    /// Schedule a debounced save
    ///
    /// Each call replaces the pending save, so a burst produces a single
    /// write of the state at the time the delay elapses. The playlist is
    /// written if any call in the burst asked for it. Ignored while a
    /// restore is loading.
    pub fn save_state(self: &Arc<Self>, save_playlist: bool) {
        if self.state() == RestorationState::Restoring {
            tracing::debug!("Restore in progress; save skipped");
            return;
        }
        let Ok(runtime) = Handle::try_current() else {
            tracing::warn!("No async runtime available; save skipped");
            return;
        };

        let mut pending = self.lock_pending();
        let save_playlist = match pending.take() {
            Some(previous) if !previous.handle.is_finished() => {
                previous.handle.abort();
                tracing::trace!("Superseding pending save");
                save_playlist || previous.save_playlist
            }
            _ => save_playlist,
        };

        let coordinator = Arc::clone(self);
        let delay = self.controller.config().save_debounce;
        let handle = runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            coordinator.persist(save_playlist).await;
        });
        *pending = Some(PendingSave {
            handle,
            save_playlist,
        });
    }

    /// Write the pending save now instead of after its delay
    pub async fn flush(&self) {
        let Some(pending) = self.lock_pending().take() else {
            return;
        };
        if pending.handle.is_finished() {
            return;
        }

        pending.handle.abort();
        if let Err(e) = pending.handle.await {
            if e.is_cancelled() {
                self.persist(pending.save_playlist).await;
            }
        }
    }

    async fn load(&self) -> Result<(RestoredQueue, RestoreOutcome)> {
        if !self.controller.is_empty().await? {
            let queue = self.controller.current_queue().await?;
            tracing::info!(
                "Timeline already holds {} tracks; restore skipped",
                queue.tracks.len()
            );
            let track_count = queue.tracks.len();
            return Ok((queue, RestoreOutcome::Skipped { track_count }));
        }

        let snapshot = self.snapshots.load()?.unwrap_or_default();
        let saved = PlaylistEntry::into_ids(self.playlists.load().await?);
        let resolution = if saved.is_empty() {
            Resolution::default()
        } else {
            self.repository.resolve(&saved).await?
        };

        let anchor = drift::anchor(&saved, &snapshot, &resolution);
        if let Some(drift) = &anchor.drift {
            tracing::info!(
                "Saved queue drifted: {} of {} tracks resolved, {} at index {}",
                drift.resolved,
                drift.saved,
                if drift.reanchored {
                    "resuming"
                } else {
                    "restarting"
                },
                anchor.start_index
            );
        }

        let queue = RestoredQueue {
            tracks: resolution.resolved,
            start_index: anchor.start_index,
            position_ms: anchor.position_ms,
        };
        self.controller
            .apply_restored(
                queue.clone(),
                snapshot.repeat_mode,
                snapshot.shuffle_enabled,
                snapshot.shuffle,
            )
            .await?;

        let track_count = queue.tracks.len();
        Ok((
            queue,
            RestoreOutcome::Restored {
                track_count,
                drift: anchor.drift,
            },
        ))
    }

    async fn persist(&self, save_playlist: bool) {
        if self.state() == RestorationState::Restoring {
            tracing::debug!("Restore in progress; save skipped");
            return;
        }

        let (snapshot, ids) = match self.controller.capture(save_playlist).await {
            Ok(captured) => captured,
            Err(e) => {
                tracing::warn!("Failed to capture queue state: {}", e);
                return;
            }
        };

        if let Err(e) = self.snapshots.save(&snapshot) {
            tracing::warn!("Failed to save playback snapshot: {}", e);
            return;
        }

        if let Some(ids) = ids {
            let count = ids.len();
            if let Err(e) = self.playlists.replace(PlaylistEntry::from_ids(ids)).await {
                tracing::warn!("Failed to save playlist: {}", e);
                return;
            }
            tracing::debug!("Saved playlist with {} tracks", count);
        }
        tracing::debug!(
            "Saved playback snapshot at index {}",
            snapshot.last_index
        );
    }

    fn lock_listeners(&self) -> MutexGuard<'_, Listeners> {
        self.listeners.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_pending(&self) -> MutexGuard<'_, Option<PendingSave>> {
        self.pending_save.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
