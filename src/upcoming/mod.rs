//! Upcoming ("play next") range tracking
//!
//! Explicitly queued items form one contiguous run of slots directly after
//! the current slot. [`UpcomingRange`] keeps a tag per timeline slot and
//! mirrors every timeline edit so the run stays contiguous and starts right
//! after the current slot.

mod range;


pub use range::{SlotTag, UpcomingRange};
