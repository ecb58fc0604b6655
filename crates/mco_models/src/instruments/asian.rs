//! Arithmetic-average Asian option definition.

use super::error::InstrumentError;
use super::kind::OptionKind;
use super::terms::OptionTerms;

/// Arithmetic-average Asian option.
///
/// The payoff replaces the terminal price with the arithmetic average
/// of the price observed at `num_observations` evenly spaced dates.
/// Observation dates are mapped onto simulation steps by the engine at
/// a fixed whole-step stride, so when the step count is not a multiple
/// of the observation count the final observation lands short of the
/// last step.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AsianOption {
    terms: OptionTerms,
    num_observations: usize,
}

impl AsianOption {
    /// Creates an Asian option.
    ///
    /// # Errors
    /// [`InstrumentError::InvalidObservationCount`] if `num_observations`
    /// is zero.
    pub fn new(terms: OptionTerms, num_observations: usize) -> Result<Self, InstrumentError> {
        if num_observations == 0 {
            return Err(InstrumentError::InvalidObservationCount {
                count: num_observations,
            });
        }
        Ok(Self {
            terms,
            num_observations,
        })
    }

    /// Returns the contract terms.
    #[inline]
    pub fn terms(&self) -> &OptionTerms {
        &self.terms
    }

    /// Returns the number of averaging observations.
    #[inline]
    pub fn num_observations(&self) -> usize {
        self.num_observations
    }

    /// Payoff for a realised arithmetic average.
    #[inline]
    pub fn payoff(&self, average: f64) -> f64 {
        self.terms.intrinsic(average)
    }

    /// Intrinsic payoff of the average `K`-vs-mean, given the kind.
    #[inline]
    pub fn kind(&self) -> OptionKind {
        self.terms.kind()
    }
}
