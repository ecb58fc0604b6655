//! Error types for the pricing engines.
//!
//! This module defines structured error types for configuration
//! validation and for the top-level pricing entry points.

use std::fmt;

use mco_models::instruments::InstrumentError;
use thiserror::Error;

/// Configuration error for the simulation context.
///
/// These errors surface from [`crate::context::SimulationContext::validate`]
/// when a pricing call starts with out-of-range settings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// Path count outside valid range [1, 10_000_000].
    InvalidPathCount(usize),
    /// Step count outside valid range [1, 10_000].
    InvalidStepCount(usize),
    /// Binomial step count outside valid range [1, 100_000].
    InvalidBinomialStepCount(usize),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPathCount(count) => {
                write!(
                    f,
                    "Invalid path count {}: must be in range [1, 10_000_000]",
                    count
                )
            }
            Self::InvalidStepCount(count) => {
                write!(
                    f,
                    "Invalid step count {}: must be in range [1, 10_000]",
                    count
                )
            }
            Self::InvalidBinomialStepCount(count) => {
                write!(
                    f,
                    "Invalid binomial step count {}: must be in range [1, 100_000]",
                    count
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Numerical failure inside the binomial lattice.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum LatticeError {
    /// A tree with no time steps was requested.
    #[error("Binomial tree requires at least one step")]
    InvalidStepCount,

    /// Risk-neutral probability fell outside [0, 1]. The step size is
    /// too coarse for the rate/volatility combination.
    #[error("Risk-neutral probability {probability} outside [0, 1]; refine the step count")]
    InvalidProbability {
        /// The out-of-range probability
        probability: f64,
    },
}

/// Top-level pricing error.
///
/// Everything a pricing entry point can fail with: bad contract
/// parameters, bad engine configuration, a lattice breakdown, or a
/// declared-but-unbuilt feature. The flat boundary API maps all of
/// these to the `-1.0` sentinel.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PricingError {
    /// Engine configuration rejected.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Contract parameters rejected.
    #[error("Instrument error: {0}")]
    Instrument(#[from] InstrumentError),

    /// Lattice construction failed.
    #[error("Lattice error: {0}")]
    Lattice(#[from] LatticeError),

    /// Feature declared in the interface but not implemented.
    #[error("Not implemented: {0}")]
    NotImplemented(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::InvalidPathCount(0);
        assert!(err.to_string().contains("Invalid path count 0"));

        let err = ConfigError::InvalidStepCount(20_000);
        assert!(err.to_string().contains("Invalid step count 20000"));

        let err = ConfigError::InvalidBinomialStepCount(0);
        assert!(err.to_string().contains("binomial step count 0"));
    }

    #[test]
    fn test_pricing_error_from_conversions() {
        let err: PricingError = ConfigError::InvalidPathCount(0).into();
        assert!(matches!(err, PricingError::Config(_)));

        let err: PricingError = InstrumentError::InvalidSpot { spot: -1.0 }.into();
        assert!(matches!(err, PricingError::Instrument(_)));

        let err: PricingError = LatticeError::InvalidProbability { probability: 1.2 }.into();
        assert!(err.to_string().contains("outside [0, 1]"));
    }
}
