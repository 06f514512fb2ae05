//! Identifier generation
//!
//! This module provides the [`IdGenerator`] that mints candidate identifiers
//! for new objects. Production code draws from OS entropy, while tests and
//! reproducible tooling seed the generator so that the same sequence of
//! constructions always yields the same identifiers.
//!
//! The generator only proposes candidates; uniqueness is enforced by
//! [`ObjectCollection::allocate`](crate::collection::ObjectCollection::allocate),
//! which rejects every candidate it has already issued.
//!
//! # Example
//!
//! ```
//! use pbxgraph::alloc::IdGenerator;
//!
//! let mut a = IdGenerator::seeded(7);
//! let mut b = IdGenerator::seeded(7);
//! assert_eq!(a.next_candidate(), b.next_candidate());
//! ```

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::constants::ID_LENGTH;
use crate::object::ObjectId;

/// How the identifiers of newly constructed objects are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum IdStrategy {
    /// Seeded from OS entropy.
    #[default]
    Random,
    /// Deterministic sequence derived from `seed`.
    Seeded {
        /// Seed of the sequence
        seed: u64,
    },
}

/// Source of candidate identifiers.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    rng: StdRng,
    strategy: IdStrategy,
}

impl IdGenerator {
    /// Generator seeded from OS entropy.
    pub fn random() -> Self {
        Self {
            rng: StdRng::from_entropy(),
            strategy: IdStrategy::Random,
        }
    }

    /// Generator producing a reproducible sequence.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            strategy: IdStrategy::Seeded { seed },
        }
    }

    /// Builds the generator selected by `strategy`.
    pub fn from_strategy(strategy: IdStrategy) -> Self {
        match strategy {
            IdStrategy::Random => Self::random(),
            IdStrategy::Seeded { seed } => Self::seeded(seed),
        }
    }

    /// The strategy this generator was built with.
    pub fn strategy(&self) -> IdStrategy {
        self.strategy
    }

    /// Draws the next candidate: 24 uppercase hexadecimal characters.
    pub fn next_candidate(&mut self) -> ObjectId {
        let mut bytes = [0u8; ID_LENGTH / 2];
        self.rng.fill_bytes(&mut bytes);
        ObjectId::new(hex::encode_upper(bytes))
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::random()
    }
}
