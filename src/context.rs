//! The single seeded random source threaded through every component.

use rand::prelude::*;
use uuid::{Builder, Uuid};

pub struct GenContext {
    rng: StdRng,
}

impl GenContext {
    pub fn new(seed: u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed) }
    }

    /// True with probability `p`. Values outside [0, 1] saturate.
    pub fn chance(&mut self, p: f64) -> bool {
        self.rng.random::<f64>() < p
    }

    /// Uniform draw in `[lo, hi)`; returns `lo` when the range is empty.
    pub fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        if hi <= lo {
            return lo;
        }
        self.rng.random_range(lo..hi)
    }

    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        items.choose(&mut self.rng)
    }

    pub fn index(&mut self, len: usize) -> usize {
        self.rng.random_range(0..len)
    }

    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.rng);
    }

    /// A v4-layout UUID built from the seeded stream, so ids are reproducible.
    pub fn uuid(&mut self) -> Uuid {
        let bytes: [u8; 16] = self.rng.random();
        Builder::from_random_bytes(bytes).into_uuid()
    }
}
