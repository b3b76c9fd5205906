use std::sync::Arc;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::seed::ShuffleSeed;
use super::strategy::ShuffleStrategy;
use crate::error::{QueueError, Result};

/// Persisted form of a [`ShuffleOrder`]
///
/// Without a permutation the order is rebuilt from `seed`, which needs the
/// timeline length and the slot to rotate to the front.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShuffleSnapshot {
    /// Explicit permutation, verbatim
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permutation: Option<Vec<usize>>,
    /// Seed for a rebuild
    pub seed: ShuffleSeed,
}

/// Traversal permutation over timeline slots
///
/// `permutation[p]` is the slot played at shuffle position `p` and
/// `inverse[slot]` is its position. Edits return a new order; the backing
/// arrays are shared between clones and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShuffleOrder {
    permutation: Arc<[usize]>,
    inverse: Arc<[usize]>,
    seed: ShuffleSeed,
}

impl ShuffleOrder {
    /// Order over zero slots
    #[must_use]
    pub fn empty(seed: ShuffleSeed) -> Self {
        Self::from_parts(Vec::new(), seed)
    }

    /// Fisher-Yates shuffle of `0..length`, deterministic for a given seed
    #[must_use]
    pub fn build(length: usize, seed: ShuffleSeed) -> Self {
        let mut permutation: Vec<usize> = (0..length).collect();
        let mut rng = seed.rng();
        for i in (1..length).rev() {
            let j = rng.gen_range(0..=i);
            permutation.swap(i, j);
        }
        Self::from_parts(permutation, seed)
    }

    /// Adopt an explicit permutation
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `permutation` is not a bijection over
    /// `0..permutation.len()`
    pub fn from_permutation(permutation: Vec<usize>, seed: ShuffleSeed) -> Result<Self> {
        let len = permutation.len();
        let mut seen = vec![false; len];
        for &slot in &permutation {
            match seen.get_mut(slot) {
                Some(flag) if !*flag => *flag = true,
                Some(_) => {
                    return Err(QueueError::invalid_argument(
                        "permutation",
                        format!("slot {slot} appears more than once"),
                    ));
                }
                None => {
                    return Err(QueueError::invalid_argument(
                        "permutation",
                        format!("slot {slot} out of range for length {len}"),
                    ));
                }
            }
        }
        Ok(Self::from_parts(permutation, seed))
    }

    fn from_parts(permutation: Vec<usize>, seed: ShuffleSeed) -> Self {
        let mut inverse = vec![0; permutation.len()];
        for (position, &slot) in permutation.iter().enumerate() {
            inverse[slot] = position;
        }
        Self {
            permutation: permutation.into(),
            inverse: inverse.into(),
            seed,
        }
    }

    /// Rotate so that `first_index` is played first, keeping the cyclic order
    /// of every other slot
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `first_index >= len()`
    pub fn rotate_to_first(&self, first_index: usize) -> Result<Self> {
        let Some(&position) = self.inverse.get(first_index) else {
            return Err(QueueError::invalid_argument(
                "first_index",
                format!("{first_index} out of range for length {}", self.len()),
            ));
        };

        let mut permutation = Vec::with_capacity(self.len());
        permutation.extend_from_slice(&self.permutation[position..]);
        permutation.extend_from_slice(&self.permutation[..position]);
        Ok(Self::from_parts(permutation, self.seed))
    }

    /// Order after `count` slots were inserted into the timeline at `at`
    ///
    /// Slots at or after `at` are renumbered by `count`. The new slots are
    /// played right after the slot that previously sat at `at`, or last when
    /// `at` is past the end.
    #[must_use]
    pub fn with_insertion(&self, at: usize, count: usize) -> Self {
        if count == 0 {
            return self.clone();
        }

        let at = at.min(self.len());
        let pivot = self.inverse.get(at).copied();
        let mut permutation = Vec::with_capacity(self.len() + count);

        for (position, &slot) in self.permutation.iter().enumerate() {
            permutation.push(if slot >= at { slot + count } else { slot });
            if pivot == Some(position) {
                permutation.extend(at..at + count);
            }
        }
        if pivot.is_none() {
            permutation.extend(at..at + count);
        }

        Self::from_parts(permutation, self.seed)
    }

    /// Order after the slots `from..to_exclusive` were removed
    ///
    /// The range is clamped to the current length.
    #[must_use]
    pub fn with_removal(&self, from: usize, to_exclusive: usize) -> Self {
        let to = to_exclusive.min(self.len());
        let from = from.min(to);
        let removed = to - from;
        if removed == 0 {
            return self.clone();
        }

        let permutation = self
            .permutation
            .iter()
            .filter(|&&slot| slot < from || slot >= to)
            .map(|&slot| if slot >= to { slot - removed } else { slot })
            .collect();

        Self::from_parts(permutation, self.seed)
    }

    /// Order after `from..to_exclusive` moved so that it starts at `destination`
    ///
    /// `destination` is an index into the timeline with the range already
    /// taken out.
    #[must_use]
    pub fn with_move(&self, from: usize, to_exclusive: usize, destination: usize) -> Self {
        let to = to_exclusive.min(self.len());
        let from = from.min(to);
        self.with_removal(from, to).with_insertion(destination, to - from)
    }

    /// Order over zero slots, keeping the seed
    #[must_use]
    pub fn clear(&self) -> Self {
        Self::empty(self.seed)
    }

    /// Number of slots
    #[must_use]
    pub fn len(&self) -> usize {
        self.permutation.len()
    }

    /// Check if the order covers no slots
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.permutation.is_empty()
    }

    /// Slots in play order
    #[must_use]
    pub fn permutation(&self) -> &[usize] {
        &self.permutation
    }

    /// Shuffle position of `slot`
    #[must_use]
    pub fn position_of(&self, slot: usize) -> Option<usize> {
        self.inverse.get(slot).copied()
    }

    /// Seed this order was built from
    #[must_use]
    pub fn seed(&self) -> ShuffleSeed {
        self.seed
    }

    /// Serialize, advancing the stored seed so a rebuild yields a new shuffle
    #[must_use]
    pub fn to_snapshot(&self, include_permutation: bool) -> ShuffleSnapshot {
        ShuffleSnapshot {
            permutation: include_permutation.then(|| self.permutation.to_vec()),
            seed: self.seed.advance(),
        }
    }

    /// Restore from a snapshot
    ///
    /// A stored permutation is used verbatim. Otherwise the order is rebuilt
    /// with [`build`](Self::build) and rotated to `first_index`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if the seed version is unknown, the stored
    /// permutation is malformed or disagrees with `length`, or a rebuild is
    /// needed and `length` or `first_index` is missing or out of range
    pub fn from_snapshot(
        snapshot: &ShuffleSnapshot,
        length: Option<usize>,
        first_index: Option<usize>,
    ) -> Result<Self> {
        if !snapshot.seed.is_supported() {
            return Err(QueueError::invalid_argument(
                "seed",
                format!("unsupported seed version {}", snapshot.seed.version),
            ));
        }

        if let Some(permutation) = &snapshot.permutation {
            if let Some(length) = length.filter(|&len| len != permutation.len()) {
                return Err(QueueError::invalid_argument(
                    "length",
                    format!(
                        "stored permutation covers {} slots, expected {length}",
                        permutation.len()
                    ),
                ));
            }
            return Self::from_permutation(permutation.clone(), snapshot.seed);
        }

        let length = length.ok_or_else(|| {
            QueueError::invalid_argument("length", "required to rebuild from seed")
        })?;
        if length == 0 {
            return Ok(Self::empty(snapshot.seed));
        }
        let first_index = first_index.ok_or_else(|| {
            QueueError::invalid_argument("first_index", "required to rebuild from seed")
        })?;

        Self::build(length, snapshot.seed).rotate_to_first(first_index)
    }
}

impl ShuffleStrategy for ShuffleOrder {
    fn len(&self) -> usize {
        self.permutation.len()
    }

    fn next(&self, index: usize) -> Option<usize> {
        let position = *self.inverse.get(index)?;
        self.permutation.get(position + 1).copied()
    }

    fn previous(&self, index: usize) -> Option<usize> {
        let position = *self.inverse.get(index)?;
        position.checked_sub(1).map(|previous| self.permutation[previous])
    }

    fn first(&self) -> Option<usize> {
        self.permutation.first().copied()
    }

    fn last(&self) -> Option<usize> {
        self.permutation.last().copied()
    }
}
