//! Injectable randomness.

use rand::{Rng, SeedableRng, rngs::SmallRng};

use crate::theme::Direction;

/// Source of uniform draws in `[0, 1)`.
///
/// Every random decision in the aquarium goes through this trait so a
/// fixed source can stand in for the generator under test.
pub trait RandomSource {
    /// Next uniform value in `[0, 1)`.
    fn next_f64(&mut self) -> f64;

    /// Uniform value in `[min, max)`. Degenerates to `min` when the range is empty.
    fn range(&mut self, min: f64, max: f64) -> f64 {
        self.next_f64() * (max - min) + min
    }

    /// Random facing, mirrored for draws at or below one half.
    fn direction(&mut self) -> Direction {
        if self.next_f64() > 0.5 {
            Direction::Forward
        } else {
            Direction::Mirrored
        }
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_f64(&mut self) -> f64 {
        (**self).next_f64()
    }
}

/// Generator-backed source, seeded or drawn from OS entropy.
#[derive(Debug, Clone)]
pub struct SeededRandom {
    rng: SmallRng,
}

impl SeededRandom {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: SmallRng::from_os_rng(),
        }
    }
}

impl RandomSource for SeededRandom {
    fn next_f64(&mut self) -> f64 {
        self.rng.random::<f64>()
    }
}

/// Source that always returns the same value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantRandom(pub f64);

impl RandomSource for ConstantRandom {
    fn next_f64(&mut self) -> f64 {
        self.0
    }
}
