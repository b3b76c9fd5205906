//! Shuffle sequencing
//!
//! [`ShuffleOrder`] is an immutable traversal permutation over timeline slots.
//! Every edit returns a fresh order so an installed order is never observed
//! half-updated.

mod order;
mod seed;
mod strategy;


pub use order::{ShuffleOrder, ShuffleSnapshot};
pub use seed::{SEED_VERSION, ShuffleSeed};
pub use strategy::{LinearOrder, ShuffleStrategy};
