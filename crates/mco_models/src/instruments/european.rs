//! European option definition.

use super::error::InstrumentError;
use super::kind::OptionKind;
use super::terms::OptionTerms;

/// European option exercisable only at maturity.
///
/// The payoff depends on the terminal price alone, so this is the
/// natural control instrument for variance reduction and the
/// reference point for the closed-form checks.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EuropeanOption {
    terms: OptionTerms,
}

impl EuropeanOption {
    /// Creates a European option from validated terms.
    pub fn new(terms: OptionTerms) -> Self {
        Self { terms }
    }

    /// Convenience constructor validating the raw inputs.
    pub fn from_raw(
        kind: OptionKind,
        spot: f64,
        strike: f64,
        rate: f64,
        volatility: f64,
        maturity: f64,
    ) -> Result<Self, InstrumentError> {
        Ok(Self::new(OptionTerms::new(
            kind, spot, strike, rate, volatility, maturity,
        )?))
    }

    /// Returns the contract terms.
    #[inline]
    pub fn terms(&self) -> &OptionTerms {
        &self.terms
    }

    /// Payoff at maturity for a terminal price.
    #[inline]
    pub fn payoff(&self, terminal: f64) -> f64 {
        self.terms.intrinsic(terminal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payoff_uses_terminal_price() {
        let call = EuropeanOption::from_raw(OptionKind::Call, 100.0, 100.0, 0.05, 0.2, 1.0)
            .unwrap();
        assert_eq!(call.payoff(115.0), 15.0);
        assert_eq!(call.payoff(90.0), 0.0);

        let put =
            EuropeanOption::from_raw(OptionKind::Put, 100.0, 100.0, 0.05, 0.2, 1.0).unwrap();
        assert_eq!(put.payoff(85.0), 15.0);
    }
}
