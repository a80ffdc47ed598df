//! Seeded random source shared by every stage of one generation run

use std::time::{SystemTime, UNIX_EPOCH};

use rand::{Rng, SeedableRng, rngs::StdRng};
use xxhash_rust::xxh3::xxh3_64;

/// Where the seed text of a run comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeedSource {
    /// A caller-supplied seed string
    Text(String),
    /// The current wall clock, rendered as nanoseconds since the Unix epoch
    Clock,
}

impl SeedSource {
    /// Seed text for this source
    ///
    /// A clock source yields a different string on every call, so resolve
    /// once and keep the text if the run must be reproduced later.
    pub fn resolve(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Clock => SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map_or(0, |elapsed| elapsed.as_nanos())
                .to_string(),
        }
    }
}

impl From<Option<String>> for SeedSource {
    fn from(seed: Option<String>) -> Self {
        seed.map_or(Self::Clock, Self::Text)
    }
}

/// Deterministic sequence of draws keyed by a seed
///
/// Identical seeds give identical sequences. The source is owned by exactly
/// one generation run and is passed explicitly to each stage that draws.
#[derive(Debug, Clone)]
pub struct RandomSource {
    rng: StdRng,
    seed: u64,
}

impl RandomSource {
    /// Create a source from a numeric seed
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create a source from seed text, hashed to a numeric seed
    pub fn from_text(text: &str) -> Self {
        Self::from_seed(hash_seed_text(text))
    }

    /// The numeric seed this source was created from
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform integer in `[0, upper)`
    ///
    /// An empty range yields 0 without consuming a draw.
    pub fn below(&mut self, upper: usize) -> usize {
        if upper == 0 {
            return 0;
        }
        self.rng.random_range(0..upper)
    }

    /// Uniform index into a collection of `len` items, or `None` when empty
    pub fn pick_index(&mut self, len: usize) -> Option<usize> {
        (len > 0).then(|| self.below(len))
    }
}

/// Hash seed text to the numeric seed of a [`RandomSource`]
pub fn hash_seed_text(text: &str) -> u64 {
    xxh3_64(text.as_bytes())
}
