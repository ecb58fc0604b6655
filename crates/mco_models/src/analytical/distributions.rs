//! Standard normal distribution functions.
//!
//! Provides the CDF, PDF and inverse CDF of the standard normal
//! distribution. The CDF and PDF are generic over `T: Float`; the
//! inverse CDF is `f64`-only since its sole consumer is the stratified
//! sampler.

use num_traits::Float;

/// 1 / sqrt(2 * pi)
const FRAC_1_SQRT_2PI: f64 = 0.398_942_280_401_432_7;

/// Complementary error function via the Abramowitz and Stegun
/// approximation (formula 7.1.26), maximum error 1.5e-7.
#[inline]
fn erfc_approx<T: Float>(x: T) -> T {
    let one = T::one();
    let abs_x = x.abs();

    let a1 = T::from(0.254829592).unwrap();
    let a2 = T::from(-0.284496736).unwrap();
    let a3 = T::from(1.421413741).unwrap();
    let a4 = T::from(-1.453152027).unwrap();
    let a5 = T::from(1.061405429).unwrap();
    let p = T::from(0.3275911).unwrap();

    let t = one / (one + p * abs_x);
    let poly = a1 + t * (a2 + t * (a3 + t * (a4 + t * a5)));
    let erfc_abs = t * poly * (-abs_x * abs_x).exp();

    // erfc(-x) = 2 - erfc(x)
    if x < T::zero() {
        T::from(2.0).unwrap() - erfc_abs
    } else {
        erfc_abs
    }
}

/// Standard normal cumulative distribution function.
///
/// Computes `P(X <= x)` for `X ~ N(0, 1)` as `0.5 * erfc(-x / sqrt(2))`.
/// Accurate to about 1e-7 for all finite inputs.
///
/// # Examples
/// ```
/// use mco_models::analytical::norm_cdf;
///
/// assert!((norm_cdf(0.0_f64) - 0.5).abs() < 1e-7);
/// assert!(norm_cdf(-3.0_f64) < 0.01);
/// ```
#[inline]
pub fn norm_cdf<T: Float>(x: T) -> T {
    let sqrt_2 = T::from(std::f64::consts::SQRT_2).unwrap();
    let half = T::from(0.5).unwrap();
    half * erfc_approx(-x / sqrt_2)
}

/// Standard normal probability density function.
///
/// `phi(x) = exp(-x^2 / 2) / sqrt(2 pi)`.
#[inline]
pub fn norm_pdf<T: Float>(x: T) -> T {
    let coeff = T::from(FRAC_1_SQRT_2PI).unwrap();
    let half = T::from(0.5).unwrap();
    coeff * (-half * x * x).exp()
}

/// Inverse of the standard normal CDF.
///
/// Acklam's rational approximation with a central region and two
/// tails, absolute error below 1.15e-9 across the open unit interval.
/// Inputs are clamped to `(1e-12, 1 - 1e-12)` so stratum endpoints can
/// never produce an infinity.
///
/// # Examples
/// ```
/// use mco_models::analytical::{inverse_norm_cdf, norm_cdf};
///
/// assert!(inverse_norm_cdf(0.5).abs() < 1e-9);
/// let z = inverse_norm_cdf(0.975);
/// assert!((z - 1.959964).abs() < 1e-4);
/// assert!((norm_cdf(inverse_norm_cdf(0.25)) - 0.25).abs() < 1e-6);
/// ```
pub fn inverse_norm_cdf(p: f64) -> f64 {
    // Coefficients for the central rational approximation.
    const A: [f64; 6] = [
        -3.969683028665376e+01,
        2.209460984245205e+02,
        -2.759285104469687e+02,
        1.383577518672690e+02,
        -3.066479806614716e+01,
        2.506628277459239e+00,
    ];
    const B: [f64; 5] = [
        -5.447609879822406e+01,
        1.615858368580409e+02,
        -1.556989798598866e+02,
        6.680131188771972e+01,
        -1.328068155288572e+01,
    ];
    // Coefficients for the tail approximations.
    const C: [f64; 6] = [
        -7.784894002430293e-03,
        -3.223964580411365e-01,
        -2.400758277161838e+00,
        -2.549732539343734e+00,
        4.374664141464968e+00,
        2.938163982698783e+00,
    ];
    const D: [f64; 4] = [
        7.784695709041462e-03,
        3.224671290700398e-01,
        2.445134137142996e+00,
        3.754408661907416e+00,
    ];

    const P_LOW: f64 = 0.02425;
    const P_HIGH: f64 = 1.0 - P_LOW;

    let p = p.clamp(1e-12, 1.0 - 1e-12);

    if p < P_LOW {
        // Lower tail
        let q = (-2.0 * p.ln()).sqrt();
        (((((C[0] * q + C[1]) * q + C[2]) * q + C[3]) * q + C[4]) * q + C[5])
            / ((((D[0] * q + D[1]) * q + D[2]) * q + D[3]) * q + 1.0)
    } else if p <= P_HIGH {
        // Central region
        let q = p - 0.5;
        let r = q * q;
        (((((A[0] * r + A[1]) * r + A[2]) * r + A[3]) * r + A[4]) * r + A[5]) * q
            / (((((B[0] * r + B[1]) * r + B[2]) * r + B[3]) * r + B[4]) * r + 1.0)
    } else {
        // Upper tail, by symmetry
        let q = (-2.0 * (1.0 - p).ln()).sqrt();
        -(((((C[0] * q + C[1]) * q + C[2]) * q + C[3]) * q + C[4]) * q + C[5])
            / ((((D[0] * q + D[1]) * q + D[2]) * q + D[3]) * q + 1.0)
    }
}
