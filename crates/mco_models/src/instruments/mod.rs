//! Option contract definitions.
//!
//! # Architecture
//!
//! Uses enum dispatch (NOT trait objects): the pricing engine matches
//! on the closed [`Instrument`] set, so adding a contract type is a
//! compile-time event and the dispatch cost is a jump table.
//!
//! Every constructor validates. A contract that exists is priceable;
//! the simulation loops never re-check parameters.
//!
//! # Contract Types
//!
//! - [`EuropeanOption`]: terminal-price payoff
//! - [`AsianOption`]: arithmetic-average payoff
//! - [`AmericanOption`]: early exercise on an evenly spaced date grid
//! - [`BermudanOption`]: early exercise on an explicit date schedule
//! - [`BarrierOption`]: knock-in/knock-out with optional rebate
//! - [`LookbackOption`]: payoff on the running extremum

mod american;
mod asian;
mod barrier;
mod bermudan;
mod error;
mod european;
mod kind;
mod lookback;
mod terms;

pub use american::{AmericanOption, DEFAULT_EXERCISE_DATES};
pub use asian::AsianOption;
pub use barrier::{BarrierDirection, BarrierOption, KnockType};
pub use bermudan::BermudanOption;
pub use error::InstrumentError;
pub use european::EuropeanOption;
pub use kind::OptionKind;
pub use lookback::{LookbackOption, LookbackStrike};
pub use terms::OptionTerms;

/// Closed set of priceable contracts.
///
/// # Examples
/// ```
/// use mco_models::instruments::{
///     EuropeanOption, Instrument, OptionKind, OptionTerms,
/// };
///
/// let terms = OptionTerms::new(OptionKind::Call, 100.0, 100.0, 0.05, 0.2, 1.0).unwrap();
/// let instrument = Instrument::European(EuropeanOption::new(terms));
/// assert_eq!(instrument.terms().strike(), 100.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Instrument {
    /// European option.
    European(EuropeanOption),
    /// Arithmetic-average Asian option.
    Asian(AsianOption),
    /// American option on an evenly spaced exercise grid.
    American(AmericanOption),
    /// Bermudan option on an explicit exercise schedule.
    Bermudan(BermudanOption),
    /// Knock-in/knock-out barrier option.
    Barrier(BarrierOption),
    /// Fixed or floating strike lookback option.
    Lookback(LookbackOption),
}

impl Instrument {
    /// Returns the common contract terms.
    #[inline]
    pub fn terms(&self) -> &OptionTerms {
        match self {
            Instrument::European(o) => o.terms(),
            Instrument::Asian(o) => o.terms(),
            Instrument::American(o) => o.terms(),
            Instrument::Bermudan(o) => o.terms(),
            Instrument::Barrier(o) => o.terms(),
            Instrument::Lookback(o) => o.terms(),
        }
    }

    /// Returns the payoff direction.
    #[inline]
    pub fn kind(&self) -> OptionKind {
        self.terms().kind()
    }
}
