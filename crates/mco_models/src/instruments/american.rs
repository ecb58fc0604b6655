//! American option definition.

use super::error::InstrumentError;
use super::kind::OptionKind;
use super::terms::OptionTerms;

/// Default number of exercise dates for the Longstaff-Schwartz pricer.
pub const DEFAULT_EXERCISE_DATES: usize = 50;

/// American option exercisable at any point up to maturity.
///
/// Continuous exercise is approximated on a discrete grid of
/// `num_exercise_dates` evenly spaced dates. The simulation grid for
/// the regression pricer is derived from this count, not from the
/// context step count.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AmericanOption {
    terms: OptionTerms,
    num_exercise_dates: usize,
}

impl AmericanOption {
    /// Creates an American option with an explicit exercise-date count.
    ///
    /// # Errors
    /// [`InstrumentError::InvalidExerciseSchedule`] if `num_exercise_dates`
    /// is zero.
    pub fn new(terms: OptionTerms, num_exercise_dates: usize) -> Result<Self, InstrumentError> {
        if num_exercise_dates == 0 {
            return Err(InstrumentError::InvalidExerciseSchedule {
                detail: "at least one exercise date is required".to_string(),
            });
        }
        Ok(Self {
            terms,
            num_exercise_dates,
        })
    }

    /// Creates an American option with [`DEFAULT_EXERCISE_DATES`] dates.
    pub fn with_default_dates(terms: OptionTerms) -> Self {
        Self {
            terms,
            num_exercise_dates: DEFAULT_EXERCISE_DATES,
        }
    }

    /// Returns the contract terms.
    #[inline]
    pub fn terms(&self) -> &OptionTerms {
        &self.terms
    }

    /// Returns the payoff direction.
    #[inline]
    pub fn kind(&self) -> OptionKind {
        self.terms.kind()
    }

    /// Returns the number of discrete exercise dates.
    #[inline]
    pub fn num_exercise_dates(&self) -> usize {
        self.num_exercise_dates
    }
}
