//! Bermudan option definition.

use super::error::InstrumentError;
use super::kind::OptionKind;
use super::terms::OptionTerms;

/// Bermudan option exercisable on an explicit date schedule.
///
/// Dates are expressed in year fractions from valuation. An empty
/// schedule is legal and degrades the contract to a European option,
/// which the regression pricer handles as a plain discounted
/// expectation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BermudanOption {
    terms: OptionTerms,
    exercise_dates: Vec<f64>,
}

impl BermudanOption {
    /// Creates a Bermudan option.
    ///
    /// # Errors
    /// [`InstrumentError::InvalidExerciseSchedule`] if any date is
    /// outside `(0, maturity]` or the schedule is not strictly
    /// increasing.
    pub fn new(terms: OptionTerms, exercise_dates: Vec<f64>) -> Result<Self, InstrumentError> {
        for window in exercise_dates.windows(2) {
            if window[1] <= window[0] {
                return Err(InstrumentError::InvalidExerciseSchedule {
                    detail: "dates must be strictly increasing".to_string(),
                });
            }
        }
        if let Some(&first) = exercise_dates.first() {
            if !first.is_finite() || first <= 0.0 {
                return Err(InstrumentError::InvalidExerciseSchedule {
                    detail: format!("date {} is not strictly positive", first),
                });
            }
        }
        if let Some(&last) = exercise_dates.last() {
            if !last.is_finite() || last > terms.maturity() {
                return Err(InstrumentError::InvalidExerciseSchedule {
                    detail: format!("date {} exceeds maturity {}", last, terms.maturity()),
                });
            }
        }
        Ok(Self {
            terms,
            exercise_dates,
        })
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

    /// Returns the exercise schedule in year fractions.
    #[inline]
    pub fn exercise_dates(&self) -> &[f64] {
        &self.exercise_dates
    }
}
