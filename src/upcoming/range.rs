use std::ops::RangeInclusive;

use crate::error::{QueueError, Result};

/// Per-slot annotation owned by [`UpcomingRange`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SlotTag {
    /// Governed by sequential or shuffle order
    #[default]
    Ordinary,
    /// Explicitly queued to play next
    Upcoming {
        /// Timeline index at which the slot was tagged
        original_index: usize,
    },
}

impl SlotTag {
    /// Check if the slot is part of the upcoming run
    #[must_use]
    pub fn is_upcoming(&self) -> bool {
        matches!(self, Self::Upcoming { .. })
    }

    /// Index recorded when the slot was tagged
    #[must_use]
    pub fn original_index(&self) -> Option<usize> {
        match self {
            Self::Ordinary => None,
            Self::Upcoming { original_index } => Some(*original_index),
        }
    }
}

/// Side table tracking the upcoming run over a timeline
///
/// Callers report every timeline edit in the order it is applied to the
/// engine. When disabled, edits are still mirrored but nothing gets tagged.
#[derive(Debug, Clone, Default)]
pub struct UpcomingRange {
    enabled: bool,
    tags: Vec<SlotTag>,
    current: Option<usize>,
}

impl UpcomingRange {
    /// Create a tracker for an empty timeline
    #[must_use]
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            tags: Vec::new(),
            current: None,
        }
    }

    /// Start tracking a freshly loaded timeline with nothing tagged
    pub fn reset(&mut self, len: usize, current: Option<usize>) {
        self.tags = vec![SlotTag::Ordinary; len];
        self.current = current.filter(|&c| c < len);
    }

    /// Enable or disable tagging; disabling drops the current run
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.clear();
        }
    }

    /// Check if tagging is active
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Tracked timeline length
    #[must_use]
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// Check if the tracked timeline is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Current slot as last reported
    #[must_use]
    pub fn current(&self) -> Option<usize> {
        self.current
    }

    /// Check if `slot` is queued to play next
    #[must_use]
    pub fn is_upcoming(&self, slot: usize) -> bool {
        self.tags.get(slot).is_some_and(SlotTag::is_upcoming)
    }

    /// Tag of `slot`
    #[must_use]
    pub fn tag(&self, slot: usize) -> Option<SlotTag> {
        self.tags.get(slot).copied()
    }

    /// Number of slots in the upcoming run
    #[must_use]
    pub fn upcoming_len(&self) -> usize {
        self.current.map_or(0, |c| {
            self.tags[c + 1..]
                .iter()
                .take_while(|tag| tag.is_upcoming())
                .count()
        })
    }

    /// Slots of the upcoming run, `None` when nothing is queued
    #[must_use]
    pub fn upcoming_range(&self) -> Option<RangeInclusive<usize>> {
        let current = self.current?;
        match self.upcoming_len() {
            0 => None,
            run => Some(current + 1..=current + run),
        }
    }

    /// Mirror the insertion of `count` slots at `at`
    ///
    /// New slots are tagged when they land on the slot right after the
    /// current one, strictly inside the run, or extend a run that reaches the
    /// end of the timeline. Returns whether they were tagged.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` if `at > len()`
    pub fn on_insert(&mut self, at: usize, count: usize) -> Result<bool> {
        let len = self.tags.len();
        if at > len {
            return Err(QueueError::IndexOutOfRange { index: at, len });
        }
        if count == 0 {
            return Ok(false);
        }

        let tagged = self.enabled
            && match (self.current, self.upcoming_range()) {
                (_, Some(run)) => {
                    at >= *run.start() && (at <= *run.end() || (at == len && *run.end() + 1 == len))
                }
                (Some(current), None) => at == current + 1,
                (None, None) => false,
            };

        self.tags.splice(
            at..at,
            (at..at + count).map(|original_index| {
                if tagged {
                    SlotTag::Upcoming { original_index }
                } else {
                    SlotTag::Ordinary
                }
            }),
        );
        if let Some(current) = self.current.filter(|&c| at <= c) {
            self.current = Some(current + count);
        }

        debug_assert!(self.is_consistent());
        Ok(tagged)
    }

    /// Mirror the removal of `from..to_exclusive`
    ///
    /// If the current slot is removed, the slot that slides into `from`
    /// becomes current (clamped to the new end).
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` for a reversed range and `IndexOutOfRange`
    /// if it extends past the end
    pub fn on_remove(&mut self, from: usize, to_exclusive: usize) -> Result<()> {
        let len = self.tags.len();
        if from > to_exclusive {
            return Err(QueueError::invalid_argument(
                "range",
                format!("{from}..{to_exclusive} is reversed"),
            ));
        }
        if to_exclusive > len {
            return Err(QueueError::IndexOutOfRange {
                index: to_exclusive,
                len,
            });
        }

        let removed = to_exclusive - from;
        self.tags.drain(from..to_exclusive);
        let new_len = self.tags.len();
        self.current = self.current.and_then(|c| {
            if c < from {
                Some(c)
            } else if c >= to_exclusive {
                Some(c - removed)
            } else if new_len == 0 {
                None
            } else {
                Some(from.min(new_len - 1))
            }
        });

        self.normalize();
        Ok(())
    }

    /// Mirror moving the slot at `from` so it ends up at `to`
    ///
    /// Moving the current slot realigns the run behind its new position,
    /// discarding it when the current slot jumps past it or backwards. A
    /// moved slot joins the run when dropped inside it and leaves it when
    /// dropped outside.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` if either index is outside the timeline
    pub fn on_move(&mut self, from: usize, to: usize) -> Result<()> {
        let len = self.tags.len();
        if from >= len || to >= len {
            return Err(QueueError::IndexOutOfRange {
                index: from.max(to),
                len,
            });
        }
        if from == to {
            return Ok(());
        }

        let tag = self.tags.remove(from);

        if self.current == Some(from) {
            self.tags.insert(to, tag);
            self.current = Some(to);
            self.normalize();
            return Ok(());
        }

        if let Some(current) = self.current.filter(|&c| from < c) {
            self.current = Some(current - 1);
        }
        self.normalize();

        let run = self.upcoming_len();
        let joins_run = self.enabled
            && self.current.is_some_and(|c| {
                to > c
                    && ((run > 0 && to <= c + run) || (tag.is_upcoming() && to == c + run + 1))
            });
        let tag = match (joins_run, tag) {
            (false, _) => SlotTag::Ordinary,
            (true, SlotTag::Ordinary) => SlotTag::Upcoming { original_index: to },
            (true, upcoming) => upcoming,
        };

        self.tags.insert(to, tag);
        if let Some(current) = self.current.filter(|&c| to <= c) {
            self.current = Some(current + 1);
        }

        debug_assert!(self.is_consistent());
        Ok(())
    }

    /// Realign after the current slot changed (auto-advance, skip, seek)
    ///
    /// Landing inside the run drops the slots now at or behind the current
    /// one; passing the end of the run or moving backwards clears it.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` if `current` is outside the timeline
    pub fn on_position_discontinuity(&mut self, current: Option<usize>) -> Result<()> {
        if let Some(index) = current.filter(|&c| c >= self.tags.len()) {
            return Err(QueueError::IndexOutOfRange {
                index,
                len: self.tags.len(),
            });
        }
        self.current = current;
        self.normalize();
        Ok(())
    }

    /// Untag every slot in one pass
    pub fn clear(&mut self) {
        self.tags.fill(SlotTag::Ordinary);
    }

    /// Check the run is contiguous and starts right after the current slot
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        let Some(current) = self.current else {
            return self.tags.iter().all(|tag| !tag.is_upcoming());
        };
        if current >= self.tags.len() {
            return false;
        }
        let run = self.upcoming_len();
        self.tags[..=current].iter().all(|tag| !tag.is_upcoming())
            && self.tags[current + 1 + run..]
                .iter()
                .all(|tag| !tag.is_upcoming())
    }

    fn normalize(&mut self) {
        let Some(current) = self.current else {
            self.clear();
            return;
        };
        for tag in &mut self.tags[..=current] {
            *tag = SlotTag::Ordinary;
        }
        let run = self.upcoming_len();
        for tag in &mut self.tags[current + 1 + run..] {
            *tag = SlotTag::Ordinary;
        }
    }
}
