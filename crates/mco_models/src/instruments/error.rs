//! Error types for instrument construction.

use thiserror::Error;

/// Instrument validation errors.
///
/// Returned by the validating constructors in this module. A contract
/// that constructs successfully carries only finite, in-range
/// parameters, so downstream pricing code never revalidates.
///
/// # Examples
/// ```
/// use mco_models::instruments::InstrumentError;
///
/// let err = InstrumentError::InvalidVolatility { volatility: -0.2 };
/// assert!(format!("{}", err).contains("volatility"));
/// ```
#[derive(Debug, Clone, Error, PartialEq)]
pub enum InstrumentError {
    /// Invalid spot price (non-positive or non-finite).
    #[error("Invalid spot price: S = {spot}")]
    InvalidSpot {
        /// The invalid spot price value
        spot: f64,
    },

    /// Invalid strike price (non-positive or non-finite).
    #[error("Invalid strike price: K = {strike}")]
    InvalidStrike {
        /// The invalid strike price value
        strike: f64,
    },

    /// Invalid risk-free rate (non-finite).
    #[error("Invalid risk-free rate: r = {rate}")]
    InvalidRate {
        /// The invalid rate value
        rate: f64,
    },

    /// Invalid volatility (negative or non-finite).
    #[error("Invalid volatility: σ = {volatility}")]
    InvalidVolatility {
        /// The invalid volatility value
        volatility: f64,
    },

    /// Invalid maturity (non-positive or non-finite).
    #[error("Invalid maturity: T = {maturity}")]
    InvalidMaturity {
        /// The invalid maturity value
        maturity: f64,
    },

    /// Invalid averaging observation count (zero).
    #[error("Invalid observation count: {count}")]
    InvalidObservationCount {
        /// The invalid observation count
        count: usize,
    },

    /// Invalid barrier level (non-positive or non-finite).
    #[error("Invalid barrier level: B = {level}")]
    InvalidBarrier {
        /// The invalid barrier level
        level: f64,
    },

    /// Invalid rebate amount (negative or non-finite).
    #[error("Invalid rebate: {rebate}")]
    InvalidRebate {
        /// The invalid rebate value
        rebate: f64,
    },

    /// Invalid exercise schedule (unordered, out of range, or empty
    /// where a non-empty schedule is required).
    #[error("Invalid exercise schedule: {detail}")]
    InvalidExerciseSchedule {
        /// Description of the schedule problem
        detail: String,
    },
}
