//! Geometric Brownian motion path generation.
//!
//! Uses the exact log-step scheme: the log-price increment over `dt`
//! is `(r - sigma^2/2) dt + sigma sqrt(dt) Z`, so the discretisation
//! is exact in distribution at every grid point regardless of step
//! count.

/// Fills `path` with one GBM trajectory driven by `normals`.
///
/// `path[0]` is the spot; `path[i + 1]` advances `path[i]` by one
/// exact log-step. `path.len()` must be `normals.len() + 1`.
#[inline]
pub fn simulate_gbm_path(
    spot: f64,
    rate: f64,
    volatility: f64,
    maturity: f64,
    normals: &[f64],
    path: &mut [f64],
) {
    simulate_gbm_path_shifted(spot, rate, volatility, maturity, 0.0, normals, path);
}

/// GBM trajectory under a shifted Brownian motion.
///
/// Each raw draw `z` is used as `z + shift * sqrt(dt)`, which tilts
/// the Brownian motion by `shift * t`. The estimator stays unbiased
/// when every payoff on the path is weighted by
/// [`likelihood_weight`] computed from the *raw* draws.
#[inline]
pub fn simulate_gbm_path_shifted(
    spot: f64,
    rate: f64,
    volatility: f64,
    maturity: f64,
    brownian_shift: f64,
    normals: &[f64],
    path: &mut [f64],
) {
    debug_assert_eq!(path.len(), normals.len() + 1);

    let n_steps = normals.len();
    if n_steps == 0 {
        if let Some(first) = path.first_mut() {
            *first = spot;
        }
        return;
    }

    let dt = maturity / n_steps as f64;
    let sqrt_dt = dt.sqrt();
    // Precompute per-step drift and diffusion scale
    let drift_dt = (rate - 0.5 * volatility * volatility) * dt;
    let vol_sqrt_dt = volatility * sqrt_dt;
    let shift_sqrt_dt = brownian_shift * sqrt_dt;

    path[0] = spot;
    let mut price = spot;
    for (i, &z) in normals.iter().enumerate() {
        price *= (drift_dt + vol_sqrt_dt * (z + shift_sqrt_dt)).exp();
        path[i + 1] = price;
    }
}

/// Likelihood-ratio weight for a drift-shifted path.
///
/// For a path built from raw draws `z_i` with Brownian shift `theta`,
/// the importance-sampling weight is
/// `exp(-theta * W_T - theta^2 * T / 2)` where
/// `W_T = sum(z_i) * sqrt(dt)` is the unshifted terminal Brownian
/// value. A zero shift weighs every path at exactly one.
#[inline]
pub fn likelihood_weight(brownian_shift: f64, maturity: f64, normals: &[f64]) -> f64 {
    if brownian_shift == 0.0 || normals.is_empty() {
        return 1.0;
    }
    let sqrt_dt = (maturity / normals.len() as f64).sqrt();
    let w_t = normals.iter().sum::<f64>() * sqrt_dt;
    (-brownian_shift * w_t - 0.5 * brownian_shift * brownian_shift * maturity).exp()
}
