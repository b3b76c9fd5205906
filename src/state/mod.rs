//! Queue status and events

mod container;
mod events;
#[cfg(test)]
mod tests;

pub use container::{QueueStatus, StatusContainer};
pub use events::{EventBus, EventFilter, QueueEvent};
