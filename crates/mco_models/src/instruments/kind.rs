//! Call/put payoff direction.

/// Payoff direction of an option contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OptionKind {
    /// Right to buy at the strike.
    Call,
    /// Right to sell at the strike.
    Put,
}

impl OptionKind {
    /// Intrinsic payoff against a strike.
    ///
    /// `max(S - K, 0)` for calls, `max(K - S, 0)` for puts. Used on the
    /// terminal price for European payoffs and on path features
    /// (averages, extrema) for the exotic contracts.
    ///
    /// # Examples
    /// ```
    /// use mco_models::instruments::OptionKind;
    ///
    /// assert_eq!(OptionKind::Call.intrinsic(110.0, 100.0), 10.0);
    /// assert_eq!(OptionKind::Put.intrinsic(110.0, 100.0), 0.0);
    /// ```
    #[inline]
    pub fn intrinsic(self, spot: f64, strike: f64) -> f64 {
        match self {
            OptionKind::Call => (spot - strike).max(0.0),
            OptionKind::Put => (strike - spot).max(0.0),
        }
    }
}
