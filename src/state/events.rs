//! Event bus for queue events

use std::ops::RangeInclusive;

use tokio::sync::broadcast;

use super::container::QueueStatus;
use crate::types::RepeatMode;

/// Queue events
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueueEvent {
    // Timeline events
    /// Slots were inserted, removed, moved or replaced
    TimelineChanged {
        /// New timeline length
        len: usize,
    },
    /// Current slot changed
    CurrentChanged {
        /// New current slot
        index: Option<usize>,
    },
    /// Upcoming run changed
    UpcomingChanged {
        /// Slots now queued to play next
        range: Option<RangeInclusive<usize>>,
    },

    // Mode events
    /// Shuffle toggled
    ShuffleChanged {
        /// New shuffle state
        enabled: bool,
    },
    /// Repeat mode changed
    RepeatChanged {
        /// New repeat mode
        mode: RepeatMode,
    },

    // Restoration events
    /// Restoration reached its terminal state
    Restored {
        /// Tracks on the timeline once restoration settled (0 on failure)
        track_count: usize,
    },
}

impl QueueEvent {
    /// Events describing the difference between two statuses
    #[must_use]
    pub fn diff(old: &QueueStatus, new: &QueueStatus) -> Vec<Self> {
        let mut events = Vec::new();
        if old.len != new.len || old.revision != new.revision {
            events.push(Self::TimelineChanged { len: new.len });
        }
        if old.current != new.current {
            events.push(Self::CurrentChanged { index: new.current });
        }
        if old.upcoming != new.upcoming {
            events.push(Self::UpcomingChanged {
                range: new.upcoming.clone(),
            });
        }
        if old.shuffle != new.shuffle {
            events.push(Self::ShuffleChanged {
                enabled: new.shuffle,
            });
        }
        if old.repeat != new.repeat {
            events.push(Self::RepeatChanged { mode: new.repeat });
        }
        events
    }
}

/// Event bus for distributing events
pub struct EventBus {
    /// Broadcast sender
    tx: broadcast::Sender<QueueEvent>,
}

impl EventBus {
    /// Create a new event bus
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    /// Subscribe to events
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<QueueEvent> {
        self.tx.subscribe()
    }

    /// Emit an event
    pub fn emit(&self, event: QueueEvent) {
        // Ignore error if no receivers
        let _ = self.tx.send(event);
    }

    /// Get subscriber count
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(64)
    }
}

/// Event filter for selective subscription
pub struct EventFilter {
    rx: broadcast::Receiver<QueueEvent>,
    filter: Box<dyn Fn(&QueueEvent) -> bool + Send>,
}

impl EventFilter {
    /// Create a filtered event receiver
    pub fn new<F>(bus: &EventBus, filter: F) -> Self
    where
        F: Fn(&QueueEvent) -> bool + Send + 'static,
    {
        Self {
            rx: bus.subscribe(),
            filter: Box::new(filter),
        }
    }

    /// Receive next matching event
    pub async fn recv(&mut self) -> Option<QueueEvent> {
        loop {
            match self.rx.recv().await {
                Ok(event) if (self.filter)(&event) => return Some(event),
                Ok(_) | Err(broadcast::error::RecvError::Lagged(_)) => {}
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }

    /// Filter for restoration completion only
    #[must_use]
    pub fn restoration(bus: &EventBus) -> Self {
        Self::new(bus, |e| matches!(e, QueueEvent::Restored { .. }))
    }

    /// Filter for timeline and position events
    #[must_use]
    pub fn timeline_events(bus: &EventBus) -> Self {
        Self::new(bus, |e| {
            matches!(
                e,
                QueueEvent::TimelineChanged { .. }
                    | QueueEvent::CurrentChanged { .. }
                    | QueueEvent::UpcomingChanged { .. }
            )
        })
    }
}
