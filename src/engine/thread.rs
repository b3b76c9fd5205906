use std::panic::AssertUnwindSafe;
use std::thread::{self, JoinHandle, ThreadId};

use tokio::sync::{mpsc, oneshot};

use crate::error::{QueueError, Result};

type Job<S> = Box<dyn FnOnce(&mut S) + Send>;

/// Single-threaded executor owning playback state
///
/// The state never leaves the thread; callers submit closures and await
/// their results. Jobs run strictly in submission order.
pub struct PlaybackThread<S> {
    jobs: mpsc::UnboundedSender<Job<S>>,
    thread: JoinHandle<()>,
}

impl<S: Send + 'static> PlaybackThread<S> {
    /// Move `state` onto a new named thread
    ///
    /// # Errors
    ///
    /// Returns `EngineUnavailable` if the OS refuses to spawn the thread
    pub fn spawn(name: &str, state: S) -> Result<Self> {
        let (jobs, mut rx) = mpsc::unbounded_channel::<Job<S>>();

        let thread = thread::Builder::new()
            .name(name.to_string())
            .spawn(move || {
                let mut state = state;
                while let Some(job) = rx.blocking_recv() {
                    if std::panic::catch_unwind(AssertUnwindSafe(|| job(&mut state))).is_err() {
                        tracing::error!("Playback job panicked; result dropped");
                    }
                }
                tracing::debug!("Playback thread exiting");
            })
            .map_err(|e| {
                tracing::error!("Failed to spawn playback thread: {}", e);
                QueueError::EngineUnavailable
            })?;

        Ok(Self { jobs, thread })
    }

    /// Run `f` on the playback thread and wait for its result
    ///
    /// # Errors
    ///
    /// Returns `EngineUnavailable` if the thread has stopped or `f` panicked
    pub async fn run<R, F>(&self, f: F) -> Result<R>
    where
        F: FnOnce(&mut S) -> R + Send + 'static,
        R: Send + 'static,
    {
        let (tx, rx) = oneshot::channel();
        self.jobs
            .send(Box::new(move |state: &mut S| {
                let _ = tx.send(f(state));
            }))
            .map_err(|_| QueueError::EngineUnavailable)?;

        rx.await.map_err(|_| QueueError::EngineUnavailable)
    }

    /// Identifier of the playback thread
    #[must_use]
    pub fn thread_id(&self) -> ThreadId {
        self.thread.thread().id()
    }

    /// Check if the caller is running on the playback thread
    #[must_use]
    pub fn is_current(&self) -> bool {
        thread::current().id() == self.thread_id()
    }

    /// Stop accepting jobs and wait for queued ones to finish
    pub fn shutdown(self) {
        drop(self.jobs);
        if self.thread.join().is_err() {
            tracing::warn!("Playback thread terminated abnormally");
        }
    }
}
