use std::panic::{self, AssertUnwindSafe};

use crate::types::RestoredQueue;

/// Notified once restoration reaches its terminal state
pub type CompletionListener = Box<dyn FnOnce() + Send>;

/// Receives the queue produced by restoration
pub type QueueListener = Box<dyn FnOnce(&RestoredQueue) + Send>;

/// Both listener sets, guarded together by the coordinator's lock
#[derive(Default)]
pub(crate) struct Listeners {
    queue: Vec<QueueListener>,
    completion: Vec<CompletionListener>,
}

impl Listeners {
    pub(crate) fn add_queue(&mut self, listener: QueueListener) {
        self.queue.push(listener);
    }

    pub(crate) fn add_completion(&mut self, listener: CompletionListener) {
        self.completion.push(listener);
    }

    pub(crate) fn len(&self) -> usize {
        self.queue.len() + self.completion.len()
    }

    /// Move every registered listener out, leaving both sets empty
    pub(crate) fn take(&mut self) -> Self {
        std::mem::take(self)
    }

    /// Deliver `queue` to data listeners, then signal completion listeners
    pub(crate) fn deliver(self, queue: &RestoredQueue) {
        for listener in self.queue {
            invoke(|| listener(queue));
        }
        for listener in self.completion {
            invoke(listener);
        }
    }
}

/// Run a listener, containing any panic
pub(crate) fn invoke<F: FnOnce()>(listener: F) {
    if panic::catch_unwind(AssertUnwindSafe(listener)).is_err() {
        tracing::error!("Restoration listener panicked");
    }
}
