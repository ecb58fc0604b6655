//! Lookback option definition.

use super::kind::OptionKind;
use super::terms::OptionTerms;

/// Strike convention of a lookback option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LookbackStrike {
    /// Payoff against the contractual strike: `max(S_max - K, 0)` for
    /// calls, `max(K - S_min, 0)` for puts.
    Fixed,
    /// Payoff against the realised extremum: `S_T - S_min` for calls,
    /// `S_max - S_T` for puts. Never negative.
    Floating,
}

/// Lookback option on the running extremum of the path.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LookbackOption {
    terms: OptionTerms,
    strike_style: LookbackStrike,
}

impl LookbackOption {
    /// Creates a lookback option. For the floating-strike style the
    /// strike in `terms` is ignored by the payoff.
    pub fn new(terms: OptionTerms, strike_style: LookbackStrike) -> Self {
        Self { terms, strike_style }
    }

    /// Returns the contract terms.
    #[inline]
    pub fn terms(&self) -> &OptionTerms {
        &self.terms
    }

    /// Returns the strike convention.
    #[inline]
    pub fn strike_style(&self) -> LookbackStrike {
        self.strike_style
    }

    /// Payoff from the path extrema and terminal price.
    #[inline]
    pub fn payoff(&self, path_max: f64, path_min: f64, terminal: f64) -> f64 {
        match (self.strike_style, self.terms.kind()) {
            (LookbackStrike::Fixed, OptionKind::Call) => {
                (path_max - self.terms.strike()).max(0.0)
            }
            (LookbackStrike::Fixed, OptionKind::Put) => {
                (self.terms.strike() - path_min).max(0.0)
            }
            (LookbackStrike::Floating, OptionKind::Call) => terminal - path_min,
            (LookbackStrike::Floating, OptionKind::Put) => path_max - terminal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn terms(kind: OptionKind) -> OptionTerms {
        OptionTerms::new(kind, 100.0, 100.0, 0.05, 0.2, 1.0).unwrap()
    }

    #[test]
    fn test_fixed_strike_payoffs() {
        let call = LookbackOption::new(terms(OptionKind::Call), LookbackStrike::Fixed);
        assert_eq!(call.payoff(130.0, 90.0, 110.0), 30.0);

        let put = LookbackOption::new(terms(OptionKind::Put), LookbackStrike::Fixed);
        assert_eq!(put.payoff(130.0, 90.0, 110.0), 10.0);
    }

    #[test]
    fn test_floating_strike_payoffs() {
        let call = LookbackOption::new(terms(OptionKind::Call), LookbackStrike::Floating);
        assert_eq!(call.payoff(130.0, 90.0, 110.0), 20.0);

        let put = LookbackOption::new(terms(OptionKind::Put), LookbackStrike::Floating);
        assert_eq!(put.payoff(130.0, 90.0, 110.0), 20.0);
    }

    #[test]
    fn test_floating_payoff_never_negative() {
        // Extrema bound the terminal price, so both styles are >= 0.
        let call = LookbackOption::new(terms(OptionKind::Call), LookbackStrike::Floating);
        assert_eq!(call.payoff(110.0, 110.0, 110.0), 0.0);
    }
}
