//! Common contract terms shared by every option type.

use super::error::InstrumentError;
use super::kind::OptionKind;

/// Economic terms common to all option contracts.
///
/// Bundles the payoff direction with the market and contract inputs
/// every pricer needs: spot, strike, risk-free rate, volatility and
/// maturity. Validation happens once here; instrument constructors
/// add only their own checks on top.
///
/// Zero volatility is allowed. It describes a deterministic forward
/// and the engines price it exactly, which the test suites rely on.
///
/// # Examples
/// ```
/// use mco_models::instruments::{OptionKind, OptionTerms};
///
/// let terms = OptionTerms::new(OptionKind::Call, 100.0, 100.0, 0.05, 0.2, 1.0).unwrap();
/// assert_eq!(terms.strike(), 100.0);
///
/// // Negative volatility is rejected
/// assert!(OptionTerms::new(OptionKind::Call, 100.0, 100.0, 0.05, -0.2, 1.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OptionTerms {
    kind: OptionKind,
    spot: f64,
    strike: f64,
    rate: f64,
    volatility: f64,
    maturity: f64,
}

impl OptionTerms {
    /// Creates validated contract terms.
    ///
    /// # Errors
    /// - [`InstrumentError::InvalidSpot`] if spot is non-positive or non-finite
    /// - [`InstrumentError::InvalidStrike`] if strike is non-positive or non-finite
    /// - [`InstrumentError::InvalidRate`] if the rate is non-finite
    /// - [`InstrumentError::InvalidVolatility`] if volatility is negative or non-finite
    /// - [`InstrumentError::InvalidMaturity`] if maturity is non-positive or non-finite
    pub fn new(
        kind: OptionKind,
        spot: f64,
        strike: f64,
        rate: f64,
        volatility: f64,
        maturity: f64,
    ) -> Result<Self, InstrumentError> {
        if !spot.is_finite() || spot <= 0.0 {
            return Err(InstrumentError::InvalidSpot { spot });
        }
        if !strike.is_finite() || strike <= 0.0 {
            return Err(InstrumentError::InvalidStrike { strike });
        }
        if !rate.is_finite() {
            return Err(InstrumentError::InvalidRate { rate });
        }
        if !volatility.is_finite() || volatility < 0.0 {
            return Err(InstrumentError::InvalidVolatility { volatility });
        }
        if !maturity.is_finite() || maturity <= 0.0 {
            return Err(InstrumentError::InvalidMaturity { maturity });
        }

        Ok(Self {
            kind,
            spot,
            strike,
            rate,
            volatility,
            maturity,
        })
    }

    /// Returns the payoff direction.
    #[inline]
    pub fn kind(&self) -> OptionKind {
        self.kind
    }

    /// Returns the spot price.
    #[inline]
    pub fn spot(&self) -> f64 {
        self.spot
    }

    /// Returns the strike price.
    #[inline]
    pub fn strike(&self) -> f64 {
        self.strike
    }

    /// Returns the annualised risk-free rate.
    #[inline]
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Returns the annualised volatility.
    #[inline]
    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    /// Returns the maturity in years.
    #[inline]
    pub fn maturity(&self) -> f64 {
        self.maturity
    }

    /// Intrinsic payoff of these terms at a given price.
    #[inline]
    pub fn intrinsic(&self, price: f64) -> f64 {
        self.kind.intrinsic(price, self.strike)
    }

    /// Discount factor from maturity back to valuation.
    #[inline]
    pub fn discount_factor(&self) -> f64 {
        (-self.rate * self.maturity).exp()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn atm() -> OptionTerms {
        OptionTerms::new(OptionKind::Call, 100.0, 100.0, 0.05, 0.2, 1.0).unwrap()
    }

    #[test]
    fn test_accessors() {
        let terms = atm();
        assert_eq!(terms.kind(), OptionKind::Call);
        assert_eq!(terms.spot(), 100.0);
        assert_eq!(terms.volatility(), 0.2);
        assert_eq!(terms.maturity(), 1.0);
    }

    #[test]
    fn test_validation_rejects_bad_inputs() {
        assert!(OptionTerms::new(OptionKind::Call, 0.0, 100.0, 0.05, 0.2, 1.0).is_err());
        assert!(OptionTerms::new(OptionKind::Call, -5.0, 100.0, 0.05, 0.2, 1.0).is_err());
        assert!(OptionTerms::new(OptionKind::Call, 100.0, 0.0, 0.05, 0.2, 1.0).is_err());
        assert!(OptionTerms::new(OptionKind::Call, 100.0, 100.0, f64::NAN, 0.2, 1.0).is_err());
        assert!(OptionTerms::new(OptionKind::Call, 100.0, 100.0, 0.05, -0.1, 1.0).is_err());
        assert!(OptionTerms::new(OptionKind::Call, 100.0, 100.0, 0.05, 0.2, 0.0).is_err());
        assert!(
            OptionTerms::new(OptionKind::Call, 100.0, 100.0, 0.05, 0.2, f64::INFINITY).is_err()
        );
    }

    #[test]
    fn test_zero_volatility_is_valid() {
        let terms = OptionTerms::new(OptionKind::Put, 100.0, 100.0, 0.05, 0.0, 1.0).unwrap();
        assert_eq!(terms.volatility(), 0.0);
    }

    #[test]
    fn test_discount_factor() {
        let terms = atm();
        assert_relative_eq!(terms.discount_factor(), (-0.05_f64).exp(), epsilon = 1e-12);
    }
}
