//! Pseudo-random number generator wrapper for the simulation engines.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, StandardNormal};

/// Seeded random number generator for Monte Carlo simulation.
///
/// Wraps a [`StdRng`] seeded from a `u64` and offers scalar and
/// zero-allocation batch generation of uniform and standard normal
/// variates. The same seed always reproduces the same draw sequence,
/// which makes bump-and-revalue runs and regression tests exact.
///
/// # Examples
///
/// ```rust
/// use mco_engine::rng::EngineRng;
///
/// let mut rng = EngineRng::from_seed(42);
///
/// // Single value generation
/// let u: f64 = rng.gen_uniform();
/// let n: f64 = rng.gen_normal();
///
/// // Batch generation (zero allocation)
/// let mut buffer = vec![0.0; 100];
/// rng.fill_normal(&mut buffer);
/// ```
pub struct EngineRng {
    /// The underlying PRNG instance.
    inner: StdRng,
    /// The seed used for initialisation (stored for reproducibility tracking).
    seed: u64,
}

impl EngineRng {
    /// Creates a new RNG instance initialised with the given seed.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use mco_engine::rng::EngineRng;
    ///
    /// let mut rng1 = EngineRng::from_seed(12345);
    /// let mut rng2 = EngineRng::from_seed(12345);
    ///
    /// // Same seed produces identical sequences
    /// assert_eq!(rng1.gen_uniform(), rng2.gen_uniform());
    /// ```
    #[inline]
    pub fn from_seed(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    /// Returns the seed used for initialisation.
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Generates a single uniform random value in [0, 1).
    #[inline]
    pub fn gen_uniform(&mut self) -> f64 {
        self.inner.gen()
    }

    /// Generates a single standard normal variate (mean 0, std 1).
    ///
    /// Uses the Ziggurat algorithm via [`rand_distr::StandardNormal`].
    #[inline]
    pub fn gen_normal(&mut self) -> f64 {
        StandardNormal.sample(&mut self.inner)
    }

    /// Fills the buffer with uniform random values in [0, 1).
    ///
    /// Zero-allocation operation; the buffer must be pre-allocated by
    /// the caller. Empty buffers are a no-op.
    #[inline]
    pub fn fill_uniform(&mut self, buffer: &mut [f64]) {
        for value in buffer.iter_mut() {
            *value = self.inner.gen();
        }
    }

    /// Fills the buffer with standard normal variates.
    ///
    /// Zero-allocation operation; the buffer must be pre-allocated by
    /// the caller. Empty buffers are a no-op.
    #[inline]
    pub fn fill_normal(&mut self, buffer: &mut [f64]) {
        for value in buffer.iter_mut() {
            *value = StandardNormal.sample(&mut self.inner);
        }
    }

    /// Shuffles a slice in place using this generator's stream.
    ///
    /// Consumes draws from the shared stream, so shuffle order is
    /// reproducible under the same seed.
    #[inline]
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        slice.shuffle(&mut self.inner);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_reproduces_sequence() {
        let mut rng1 = EngineRng::from_seed(42);
        let mut rng2 = EngineRng::from_seed(42);

        let mut buf1 = vec![0.0; 64];
        let mut buf2 = vec![0.0; 64];
        rng1.fill_normal(&mut buf1);
        rng2.fill_normal(&mut buf2);
        assert_eq!(buf1, buf2);
    }

    #[test]
    fn test_different_seeds_diverge() {
        let mut rng1 = EngineRng::from_seed(1);
        let mut rng2 = EngineRng::from_seed(2);
        assert_ne!(rng1.gen_normal(), rng2.gen_normal());
    }

    #[test]
    fn test_uniform_range() {
        let mut rng = EngineRng::from_seed(7);
        for _ in 0..1000 {
            let u = rng.gen_uniform();
            assert!((0.0..1.0).contains(&u));
        }
    }

    #[test]
    fn test_normal_sample_moments() {
        let mut rng = EngineRng::from_seed(99);
        let mut buffer = vec![0.0; 100_000];
        rng.fill_normal(&mut buffer);

        let n = buffer.len() as f64;
        let mean = buffer.iter().sum::<f64>() / n;
        let variance = buffer.iter().map(|z| (z - mean).powi(2)).sum::<f64>() / n;

        assert!(mean.abs() < 0.02, "sample mean {} too far from 0", mean);
        assert!(
            (variance - 1.0).abs() < 0.03,
            "sample variance {} too far from 1",
            variance
        );
    }

    #[test]
    fn test_shuffle_is_permutation() {
        let mut rng = EngineRng::from_seed(5);
        let mut values: Vec<usize> = (0..100).collect();
        rng.shuffle(&mut values);

        let mut sorted = values.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..100).collect::<Vec<_>>());
    }
}
