//! Bounded-uniform offset source for the random walk.

use rand::{Rng, SeedableRng, rngs::StdRng};

/// Source of zero-centered uniform offsets.
///
/// The simulator draws one offset per scalar per read. Keeping the source
/// behind a trait lets tests script exact walks and assert post-clamp
/// values.
pub trait NoiseSource: Send {
    /// Returns a sample uniformly distributed in `[-half_range, +half_range]`.
    fn offset(&mut self, half_range: f64) -> f64;
}

/// Production source backed by a seeded [`StdRng`].
#[derive(Debug, Clone)]
pub struct UniformNoise {
    rng: StdRng,
}

impl UniformNoise {
    /// Creates a source with a fixed seed for reproducible walks.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl NoiseSource for UniformNoise {
    fn offset(&mut self, half_range: f64) -> f64 {
        if half_range <= 0.0 {
            return 0.0;
        }
        (self.rng.random::<f64>() - 0.5) * 2.0 * half_range
    }
}
