use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use serde::{Deserialize, Serialize};

/// Current layout version of [`ShuffleSeed`]
pub const SEED_VERSION: u8 = 1;

/// Persistable generator state for shuffle orders
///
/// Version 1 seeds the `rand` 0.8 [`StdRng`] from `state`. A future `rand`
/// release that changes `StdRng` needs a new version number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShuffleSeed {
    /// Generator layout version
    pub version: u8,
    /// Raw generator state
    pub state: u64,
}

impl ShuffleSeed {
    /// Create a version 1 seed
    #[must_use]
    pub fn new(state: u64) -> Self {
        Self {
            version: SEED_VERSION,
            state,
        }
    }

    /// Draw a fresh seed from the thread-local generator
    #[must_use]
    pub fn random() -> Self {
        Self::new(rand::random())
    }

    /// Check if this build understands the seed layout
    #[must_use]
    pub fn is_supported(&self) -> bool {
        self.version == SEED_VERSION
    }

    /// Generator positioned at this seed
    #[must_use]
    pub fn rng(&self) -> StdRng {
        StdRng::seed_from_u64(self.state)
    }

    /// Seed for the next rebuild, taken from the generator's next output
    #[must_use]
    pub fn advance(&self) -> Self {
        Self::new(self.rng().next_u64())
    }
}
