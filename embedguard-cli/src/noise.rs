//! Seeded Gaussian sampling for building and perturbing demo artifacts.

use embedguard_core::Vector;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal, NormalError};

/// A stream of normal-distributed samples.
#[derive(Debug)]
pub struct GaussianNoise {
    rng: StdRng,
}

impl GaussianNoise {
    /// Reproducible stream for `seed`.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed) }
    }

    /// Stream seeded from the operating system.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self { rng: StdRng::from_entropy() }
    }

    /// A vector of `dim` samples from N(`mean`, `std`²).
    ///
    /// # Errors
    /// Returns [`NormalError`] if `std` is negative or NaN.
    #[allow(clippy::cast_possible_truncation)]
    pub fn vector(&mut self, dim: usize, mean: f64, std: f64) -> Result<Vector, NormalError> {
        let normal = Normal::new(mean, std)?;
        Ok((0..dim).map(|_| normal.sample(&mut self.rng) as f32).collect::<Vec<_>>().into())
    }

    /// Adds N(0, `std`²) noise to every component in place.
    ///
    /// # Errors
    /// Returns [`NormalError`] if `std` is negative or NaN.
    #[allow(clippy::cast_possible_truncation)]
    pub fn perturb(&mut self, components: &mut [f32], std: f64) -> Result<(), NormalError> {
        let normal = Normal::new(0.0, std)?;
        for component in components {
            *component += normal.sample(&mut self.rng) as f32;
        }
        Ok(())
    }
}
