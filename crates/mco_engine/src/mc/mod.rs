//! Monte Carlo path simulation and pricing.

mod engine;
mod paths;
mod workspace;

pub use engine::{PricingResult, SimulationEngine};
pub use paths::{likelihood_weight, simulate_gbm_path, simulate_gbm_path_shifted};
pub use workspace::PathScratch;
