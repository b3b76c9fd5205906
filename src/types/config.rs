use std::time::Duration;

/// Configuration for queue controller and restoration behavior
#[derive(Debug, Clone)]
pub struct QueueConfig {
    /// Delay used to coalesce bursts of save requests (default: 500ms)
    pub save_debounce: Duration,

    /// Tag "play next" insertions as an upcoming range (default: true)
    pub sequential_queueing: bool,

    /// Persist the explicit shuffle permutation instead of only its seed (default: true)
    pub persist_shuffle_order: bool,

    /// Name of the dedicated playback thread (default: "playback")
    pub playback_thread_name: String,

    /// Capacity of the queue event channel (default: 64)
    pub event_capacity: usize,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            save_debounce: Duration::from_millis(500),
            sequential_queueing: true,
            persist_shuffle_order: true,
            playback_thread_name: "playback".to_string(),
            event_capacity: 64,
        }
    }
}

impl QueueConfig {
    /// Create a new config builder
    #[must_use]
    pub fn builder() -> QueueConfigBuilder {
        QueueConfigBuilder::default()
    }
}

/// Builder for `QueueConfig`
#[derive(Debug, Clone, Default)]
pub struct QueueConfigBuilder {
    config: QueueConfig,
}

impl QueueConfigBuilder {
    /// Set save debounce delay
    #[must_use]
    pub fn save_debounce(mut self, delay: Duration) -> Self {
        self.config.save_debounce = delay;
        self
    }

    /// Enable or disable upcoming-range tagging
    #[must_use]
    pub fn sequential_queueing(mut self, enable: bool) -> Self {
        self.config.sequential_queueing = enable;
        self
    }

    /// Persist the full shuffle permutation
    #[must_use]
    pub fn persist_shuffle_order(mut self, enable: bool) -> Self {
        self.config.persist_shuffle_order = enable;
        self
    }

    /// Set the playback thread name
    #[must_use]
    pub fn playback_thread_name(mut self, name: impl Into<String>) -> Self {
        self.config.playback_thread_name = name.into();
        self
    }

    /// Set the event channel capacity (minimum 1)
    #[must_use]
    pub fn event_capacity(mut self, capacity: usize) -> Self {
        self.config.event_capacity = capacity.max(1);
        self
    }

    /// Build the configuration
    #[must_use]
    pub fn build(self) -> QueueConfig {
        self.config
    }
}
