//! Stratified sampling of standard normal variates.
//!
//! Partitions the unit interval into as many equal strata as the
//! buffer has slots, draws one uniform inside each stratum and maps
//! it through the inverse normal CDF. Stratum order is shuffled so
//! that position in the buffer carries no information about the
//! stratum a draw came from.
//!
//! # Caveat
//!
//! When the engine consumes one buffer per path, each *step* of the
//! path is stratified independently. That stratifies the terminal
//! distribution only for single-step payoffs; for multi-step paths
//! the joint distribution is not stratified and the variance
//! behaviour is unreliable. Kept because the flag applies uniformly
//! to every instrument; prefer antithetic or control variates for
//! path-dependent payoffs.

use mco_models::analytical::inverse_norm_cdf;

use super::prng::EngineRng;

/// Fills the buffer with stratified standard normal variates.
///
/// Uses `buffer.len()` equal-probability strata, one draw per
/// stratum, in shuffled stratum order. Draws consume the generator's
/// stream (uniforms plus the shuffle), so results are reproducible
/// under a fixed seed.
///
/// # Examples
///
/// ```rust
/// use mco_engine::rng::{fill_stratified_normals, EngineRng};
///
/// let mut rng = EngineRng::from_seed(42);
/// let mut buffer = vec![0.0; 1000];
/// fill_stratified_normals(&mut rng, &mut buffer);
///
/// // One draw per stratum pins the sample mean near zero
/// let mean: f64 = buffer.iter().sum::<f64>() / buffer.len() as f64;
/// assert!(mean.abs() < 0.01);
/// ```
pub fn fill_stratified_normals(rng: &mut EngineRng, buffer: &mut [f64]) {
    let n = buffer.len();
    if n == 0 {
        return;
    }
    let width = 1.0 / n as f64;

    // One uniform inside each stratum: u_i in [i/n, (i+1)/n)
    for (i, slot) in buffer.iter_mut().enumerate() {
        *slot = (i as f64 + rng.gen_uniform()) * width;
    }

    // Shuffling the probabilities shuffles the stratum order
    rng.shuffle(buffer);

    for slot in buffer.iter_mut() {
        *slot = inverse_norm_cdf(*slot);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_buffer_is_noop() {
        let mut rng = EngineRng::from_seed(1);
        let mut buffer: Vec<f64> = vec![];
        fill_stratified_normals(&mut rng, &mut buffer);
    }

    #[test]
    fn test_stratified_mean_tighter_than_iid() {
        // With one draw per stratum the sample mean variance collapses
        // compared with iid sampling at the same size.
        let n = 4096;
        let runs = 20;

        let mut strat_means = Vec::with_capacity(runs);
        let mut iid_means = Vec::with_capacity(runs);

        for seed in 0..runs as u64 {
            let mut buffer = vec![0.0; n];

            let mut rng = EngineRng::from_seed(seed);
            fill_stratified_normals(&mut rng, &mut buffer);
            strat_means.push(buffer.iter().sum::<f64>() / n as f64);

            let mut rng = EngineRng::from_seed(seed);
            rng.fill_normal(&mut buffer);
            iid_means.push(buffer.iter().sum::<f64>() / n as f64);
        }

        let spread = |means: &[f64]| {
            let m = means.iter().sum::<f64>() / means.len() as f64;
            means.iter().map(|x| (x - m).powi(2)).sum::<f64>() / means.len() as f64
        };

        assert!(
            spread(&strat_means) < spread(&iid_means),
            "stratified sample means should be tighter"
        );
    }

    #[test]
    fn test_outputs_are_finite_and_spread() {
        let mut rng = EngineRng::from_seed(3);
        let mut buffer = vec![0.0; 1000];
        fill_stratified_normals(&mut rng, &mut buffer);

        assert!(buffer.iter().all(|z| z.is_finite()));
        // With 1000 strata both tails must be represented
        assert!(buffer.iter().any(|&z| z > 2.0));
        assert!(buffer.iter().any(|&z| z < -2.0));
    }

    #[test]
    fn test_reproducible_under_seed() {
        let mut a = vec![0.0; 256];
        let mut b = vec![0.0; 256];

        let mut rng = EngineRng::from_seed(11);
        fill_stratified_normals(&mut rng, &mut a);
        let mut rng = EngineRng::from_seed(11);
        fill_stratified_normals(&mut rng, &mut b);

        assert_eq!(a, b);
    }
}
