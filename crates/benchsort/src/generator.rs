//! Value generation for synthetic datasets.
//!
//! The dataset writer only sees [`Row`]s, so any [`ValueGenerator`] can be
//! plugged in without touching the codec.

use benchsort_formats::{Datum, Row, RowShape};
use rand::prelude::*;
use rand::rngs::StdRng;

/// Source of row contents.
pub trait ValueGenerator {
    /// Produce one key or value scalar.
    fn next_datum(&mut self) -> Datum;

    /// Produce one row handle.
    fn next_handle(&mut self) -> i64;

    /// Produce a full row: keys first, then values, then the handle.
    fn next_row(&mut self, shape: RowShape) -> Row {
        let key = (0..shape.key_size).map(|_| self.next_datum()).collect();
        let val = (0..shape.val_size).map(|_| self.next_datum()).collect();
        let handle = self.next_handle();
        Row::new(key, val, handle)
    }
}

/// Uniformly random non-negative 63-bit integers from a seedable RNG.
#[derive(Debug)]
pub struct RandomGenerator {
    rng: StdRng,
    seed: u64,
}

impl RandomGenerator {
    /// Create a generator whose output is fully determined by `seed`.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create a generator with a random seed.
    ///
    /// The chosen seed is available from [`RandomGenerator::seed`] so a run
    /// can be reproduced.
    pub fn from_random_seed() -> Self {
        Self::from_seed(rand::random::<u64>())
    }

    /// Seed this generator was created with.
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    fn next_non_negative(&mut self) -> i64 {
        (self.rng.next_u64() >> 1) as i64
    }
}

impl ValueGenerator for RandomGenerator {
    fn next_datum(&mut self) -> Datum {
        Datum::Int(self.next_non_negative())
    }

    fn next_handle(&mut self) -> i64 {
        self.next_non_negative()
    }
}

/// Counts up from a starting value; every scalar and handle is the next integer.
#[derive(Debug, Clone, Default)]
pub struct SequentialGenerator {
    next: i64,
}

impl SequentialGenerator {
    /// Start counting at `start`.
    pub const fn starting_at(start: i64) -> Self {
        Self { next: start }
    }

    fn bump(&mut self) -> i64 {
        let value = self.next;
        self.next = self.next.wrapping_add(1);
        value
    }
}

impl ValueGenerator for SequentialGenerator {
    fn next_datum(&mut self) -> Datum {
        Datum::Int(self.bump())
    }

    fn next_handle(&mut self) -> i64 {
        self.bump()
    }
}
