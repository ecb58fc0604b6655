//! Black-Scholes closed forms for European options.
//!
//! **Call**: C = S·N(d1) - K·e^(-rT)·N(d2)
//! **Put**:  P = K·e^(-rT)·N(-d2) - S·N(-d1)
//!
//! with d1 = (ln(S/K) + (r + σ²/2)T) / (σ√T) and d2 = d1 - σ√T.
//!
//! The zero-volatility and zero-maturity limits are handled explicitly
//! so the deterministic degenerate cases used by the Monte Carlo test
//! suites stay exact instead of dividing by zero.

use num_traits::Float;

use super::distributions::norm_cdf;

/// The (d1, d2) pair of the Black-Scholes formula.
///
/// Callers must ensure `volatility > 0` and `maturity > 0`.
#[inline]
fn d1_d2<T: Float>(spot: T, strike: T, rate: T, volatility: T, maturity: T) -> (T, T) {
    let half = T::from(0.5).unwrap();
    let vol_sqrt_t = volatility * maturity.sqrt();
    let d1 = ((spot / strike).ln() + (rate + half * volatility * volatility) * maturity)
        / vol_sqrt_t;
    (d1, d1 - vol_sqrt_t)
}

/// Black-Scholes price of a European call.
///
/// Degenerate limits: at `maturity <= 0` the intrinsic value, at
/// `volatility <= 0` the discounted forward intrinsic
/// `max(S - K·e^(-rT), 0)`.
///
/// # Examples
/// ```
/// use mco_models::analytical::call_price;
///
/// // Hull's textbook example: S=100, K=100, r=5%, sigma=20%, T=1
/// let price = call_price(100.0_f64, 100.0, 0.05, 0.2, 1.0);
/// assert!((price - 10.4506).abs() < 1e-3);
/// ```
pub fn call_price<T: Float>(spot: T, strike: T, rate: T, volatility: T, maturity: T) -> T {
    let zero = T::zero();
    if maturity <= zero {
        return (spot - strike).max(zero);
    }
    if volatility <= zero {
        let discounted_strike = strike * (-rate * maturity).exp();
        return (spot - discounted_strike).max(zero);
    }
    let (d1, d2) = d1_d2(spot, strike, rate, volatility, maturity);
    spot * norm_cdf(d1) - strike * (-rate * maturity).exp() * norm_cdf(d2)
}

/// Black-Scholes price of a European put.
///
/// Degenerate limits mirror [`call_price`]: intrinsic at zero maturity,
/// `max(K·e^(-rT) - S, 0)` at zero volatility.
///
/// # Examples
/// ```
/// use mco_models::analytical::{call_price, put_price};
///
/// // Put-call parity: C - P = S - K*exp(-rT)
/// let call = call_price(100.0_f64, 100.0, 0.05, 0.2, 1.0);
/// let put = put_price(100.0_f64, 100.0, 0.05, 0.2, 1.0);
/// let forward = 100.0 - 100.0 * (-0.05_f64).exp();
/// assert!((call - put - forward).abs() < 1e-6);
/// ```
pub fn put_price<T: Float>(spot: T, strike: T, rate: T, volatility: T, maturity: T) -> T {
    let zero = T::zero();
    if maturity <= zero {
        return (strike - spot).max(zero);
    }
    if volatility <= zero {
        let discounted_strike = strike * (-rate * maturity).exp();
        return (discounted_strike - spot).max(zero);
    }
    let (d1, d2) = d1_d2(spot, strike, rate, volatility, maturity);
    strike * (-rate * maturity).exp() * norm_cdf(-d2) - spot * norm_cdf(-d1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn test_atm_reference_values() {
        // S=100, K=100, r=5%, sigma=20%, T=1
        assert_relative_eq!(
            call_price(100.0_f64, 100.0, 0.05, 0.2, 1.0),
            10.4506,
            epsilon = 1e-3
        );
        assert_relative_eq!(
            put_price(100.0_f64, 100.0, 0.05, 0.2, 1.0),
            5.5735,
            epsilon = 1e-3
        );
    }

    #[test]
    fn test_moneyness_ordering() {
        let itm = call_price(100.0_f64, 80.0, 0.05, 0.2, 1.0);
        let atm = call_price(100.0_f64, 100.0, 0.05, 0.2, 1.0);
        let otm = call_price(100.0_f64, 120.0, 0.05, 0.2, 1.0);
        assert!(itm > atm);
        assert!(atm > otm);
    }

    #[test]
    fn test_zero_volatility_limit() {
        let call = call_price(100.0_f64, 90.0, 0.05, 0.0, 1.0);
        let expected = 100.0 - 90.0 * (-0.05_f64).exp();
        assert_relative_eq!(call, expected, epsilon = 1e-12);

        // OTM under zero volatility is worthless
        assert_eq!(call_price(100.0_f64, 120.0, 0.05, 0.0, 1.0), 0.0);
        assert_eq!(put_price(100.0_f64, 90.0, 0.05, 0.0, 1.0), 0.0);
    }

    #[test]
    fn test_zero_maturity_is_intrinsic() {
        assert_eq!(call_price(110.0_f64, 100.0, 0.05, 0.2, 0.0), 10.0);
        assert_eq!(put_price(90.0_f64, 100.0, 0.05, 0.2, 0.0), 10.0);
    }

    proptest! {
        #[test]
        fn prop_put_call_parity(
            spot in 50.0_f64..200.0,
            strike in 50.0_f64..200.0,
            rate in 0.0_f64..0.1,
            vol in 0.05_f64..0.6,
            maturity in 0.1_f64..3.0,
        ) {
            let call = call_price(spot, strike, rate, vol, maturity);
            let put = put_price(spot, strike, rate, vol, maturity);
            let forward = spot - strike * (-rate * maturity).exp();
            // Parity holds to the accuracy of the erfc approximation.
            prop_assert!((call - put - forward).abs() < 1e-4 * spot.max(strike));
        }

        #[test]
        fn prop_prices_within_no_arbitrage_bounds(
            spot in 50.0_f64..200.0,
            strike in 50.0_f64..200.0,
            vol in 0.05_f64..0.6,
        ) {
            let call = call_price(spot, strike, 0.05, vol, 1.0);
            prop_assert!(call >= -1e-9);
            prop_assert!(call <= spot + 1e-9);
        }
    }
}
