//! Core types module

mod config;
mod state;
mod track;

#[cfg(test)]
mod tests;

pub use config::{QueueConfig, QueueConfigBuilder};
pub use state::{PlaybackSnapshot, PlaylistEntry, RepeatMode, RestoredQueue};
pub use track::{TrackDescriptor, TrackId};
