//! Path-simulation pricing engine.
//!
//! Prices every contract whose value is a discounted expectation over
//! simulated paths: European, Asian, barrier and lookback payoffs.
//! Early-exercise contracts are delegated to the regression pricer in
//! [`crate::lsm`].
//!
//! All four variance-reduction techniques compose here:
//! - antithetic variates: each drawn path is followed by its mirror,
//!   so the path budget is spent in negated pairs
//! - control variates: the terminal European payoff on the same draws
//!   is priced alongside and its known Black-Scholes value corrects
//!   the estimate with a unit coefficient
//! - importance sampling: paths are simulated under a Brownian drift
//!   shift and reweighted by the likelihood ratio
//! - stratified sampling: per-step draws come from shuffled equal
//!   strata instead of iid sampling

use mco_models::analytical::{call_price, put_price};
use mco_models::instruments::{Instrument, OptionKind, OptionTerms};

use crate::context::{ModelKind, SimulationContext};
use crate::error::PricingError;
use crate::lsm::{price_bermudan, LsmPricer};
use crate::mc::paths::{likelihood_weight, simulate_gbm_path_shifted};
use crate::mc::workspace::PathScratch;
use crate::rng::fill_stratified_normals;

/// A Monte Carlo price with its sampling uncertainty.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PricingResult {
    /// Discounted price estimate.
    pub price: f64,
    /// Standard error of the estimate.
    pub std_error: f64,
    /// Number of payoff evaluations that entered the average.
    pub n_paths: usize,
}

/// Monte Carlo pricing engine bound to one context.
///
/// Holds the per-path scratch buffers so consecutive pricing calls on
/// the same engine reuse one allocation.
///
/// # Examples
///
/// ```rust
/// use mco_engine::context::SimulationContext;
/// use mco_engine::mc::SimulationEngine;
/// use mco_models::instruments::{
///     EuropeanOption, Instrument, OptionKind, OptionTerms,
/// };
///
/// let terms = OptionTerms::new(OptionKind::Call, 100.0, 100.0, 0.05, 0.2, 1.0).unwrap();
/// let instrument = Instrument::European(EuropeanOption::new(terms));
///
/// let mut ctx = SimulationContext::with_seed(42);
/// ctx.set_num_paths(20_000);
/// let mut engine = SimulationEngine::new(&mut ctx).unwrap();
/// let result = engine.price(&instrument).unwrap();
/// assert!(result.price > 0.0);
/// ```
pub struct SimulationEngine<'a> {
    ctx: &'a mut SimulationContext,
    scratch: PathScratch,
}

impl<'a> SimulationEngine<'a> {
    /// Binds an engine to a context, validating the configuration.
    pub fn new(ctx: &'a mut SimulationContext) -> Result<Self, PricingError> {
        ctx.validate()?;
        let num_steps = ctx.num_steps();
        Ok(Self {
            ctx,
            scratch: PathScratch::new(num_steps),
        })
    }

    /// Prices any instrument in the closed set.
    ///
    /// Path-dependent European-style contracts run on this engine's
    /// simulation loop; American and Bermudan contracts are routed to
    /// the Longstaff-Schwartz pricer on the same context.
    ///
    /// # Errors
    /// - [`PricingError::NotImplemented`] under SABR dynamics
    /// - [`PricingError::Config`] if the context was reconfigured into
    ///   an invalid state since construction
    pub fn price(&mut self, instrument: &Instrument) -> Result<PricingResult, PricingError> {
        self.ctx.validate()?;
        if self.ctx.model() == ModelKind::Sabr {
            return Err(PricingError::NotImplemented("SABR path generation"));
        }

        match instrument {
            Instrument::European(o) => {
                Ok(self.run(o.terms(), move |path| o.payoff(path[path.len() - 1])))
            }
            Instrument::Asian(o) => {
                let num_obs = o.num_observations();
                // Observations sit every `stride` steps; the final one
                // is clamped onto the last step.
                let stride = (self.ctx.num_steps() / num_obs).max(1);
                Ok(self.run(o.terms(), move |path| {
                    let last = path.len() - 1;
                    let mut sum = 0.0;
                    for j in 1..=num_obs {
                        sum += path[(j * stride).min(last)];
                    }
                    o.payoff(sum / num_obs as f64)
                }))
            }
            Instrument::Barrier(o) => Ok(self.run(o.terms(), move |path| {
                let breached = path.iter().any(|&price| o.is_breached(price));
                o.payoff(path[path.len() - 1], breached)
            })),
            Instrument::Lookback(o) => Ok(self.run(o.terms(), move |path| {
                let mut path_max = f64::NEG_INFINITY;
                let mut path_min = f64::INFINITY;
                for &price in path {
                    path_max = path_max.max(price);
                    path_min = path_min.min(price);
                }
                o.payoff(path_max, path_min, path[path.len() - 1])
            })),
            Instrument::American(o) => {
                let mut pricer = LsmPricer::new(o, self.ctx)?;
                let price = pricer.price(self.ctx);
                Ok(PricingResult {
                    price,
                    std_error: pricer.std_error(),
                    n_paths: self.ctx.num_paths(),
                })
            }
            Instrument::Bermudan(o) => price_bermudan(self.ctx, o),
        }
    }

    /// Core simulation loop shared by every European-style payoff.
    fn run<F>(&mut self, terms: &OptionTerms, payoff: F) -> PricingResult
    where
        F: Fn(&[f64]) -> f64,
    {
        let ctx = &mut *self.ctx;
        let scratch = &mut self.scratch;

        let spot = terms.spot();
        let rate = terms.rate();
        let volatility = terms.volatility();
        let maturity = terms.maturity();
        let strike = terms.strike();
        let kind = terms.kind();

        let n_paths = ctx.num_paths();
        let n_steps = ctx.num_steps();
        let antithetic = ctx.antithetic();
        let stratified = ctx.stratified_sampling();
        let use_control = ctx.control_variates();
        let shift = if ctx.importance_sampling() {
            ctx.drift_shift()
        } else {
            0.0
        };

        scratch.ensure_capacity(n_steps);

        // Antithetic pairs double up, so halve the driving loop.
        let effective_paths = if antithetic {
            (n_paths / 2).max(1)
        } else {
            n_paths
        };

        let mut sum = 0.0;
        let mut sum_sq = 0.0;
        let mut control_sum = 0.0;
        let mut total = 0_usize;

        let mut accumulate = |scratch: &mut PathScratch| {
            let (normals, path_buf) = scratch.split();
            let normals = &normals[..n_steps];
            let path = &mut path_buf[..=n_steps];

            simulate_gbm_path_shifted(spot, rate, volatility, maturity, shift, normals, path);
            let weight = likelihood_weight(shift, maturity, normals);

            let weighted = weight * payoff(path);
            sum += weighted;
            sum_sq += weighted * weighted;
            control_sum += weight * kind.intrinsic(path[n_steps], strike);
            total += 1;
        };

        for _ in 0..effective_paths {
            {
                let normals = &mut scratch.normals_mut()[..n_steps];
                if stratified {
                    fill_stratified_normals(ctx.rng_mut(), normals);
                } else {
                    ctx.rng_mut().fill_normal(normals);
                }
            }
            accumulate(scratch);

            if antithetic {
                scratch.negate_normals();
                accumulate(scratch);
            }
        }

        let n = total as f64;
        let discount = (-rate * maturity).exp();
        let mean = sum / n;
        let mut price = discount * mean;
        let variance = (sum_sq / n - mean * mean).max(0.0);
        let std_error = discount * (variance / n).sqrt();

        if use_control {
            // Corrected estimate with a unit control coefficient:
            // price - (MC control - analytic control)
            let analytic = match kind {
                OptionKind::Call => call_price(spot, strike, rate, volatility, maturity),
                OptionKind::Put => put_price(spot, strike, rate, volatility, maturity),
            };
            let mc_control = discount * (control_sum / n);
            price -= mc_control - analytic;
        }

        PricingResult {
            price,
            std_error,
            n_paths: total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use mco_models::instruments::EuropeanOption;

    fn european_call() -> Instrument {
        let terms = OptionTerms::new(OptionKind::Call, 100.0, 100.0, 0.05, 0.2, 1.0).unwrap();
        Instrument::European(EuropeanOption::new(terms))
    }

    fn small_ctx(seed: u64) -> SimulationContext {
        let mut ctx = SimulationContext::with_seed(seed);
        ctx.set_num_paths(10_000);
        ctx.set_num_steps(16);
        ctx
    }

    #[test]
    fn test_sabr_reports_not_implemented() {
        let mut ctx = small_ctx(42);
        ctx.set_model(ModelKind::Sabr);
        let mut engine = SimulationEngine::new(&mut ctx).unwrap();
        let err = engine.price(&european_call()).unwrap_err();
        assert!(matches!(err, PricingError::NotImplemented(_)));
    }

    #[test]
    fn test_same_seed_same_price() {
        let instrument = european_call();

        let mut ctx = small_ctx(7);
        let first = SimulationEngine::new(&mut ctx)
            .unwrap()
            .price(&instrument)
            .unwrap();

        let mut ctx = small_ctx(7);
        let second = SimulationEngine::new(&mut ctx)
            .unwrap()
            .price(&instrument)
            .unwrap();

        assert_eq!(first.price, second.price);
        assert_eq!(first.std_error, second.std_error);
    }

    #[test]
    fn test_control_variate_exact_for_european() {
        // The control is the payoff itself, so the corrected estimate
        // collapses onto the analytic value.
        let mut ctx = small_ctx(42);
        ctx.set_control_variates(true);
        let mut engine = SimulationEngine::new(&mut ctx).unwrap();
        let result = engine.price(&european_call()).unwrap();

        let analytic = call_price(100.0, 100.0, 0.05, 0.2, 1.0);
        assert_relative_eq!(result.price, analytic, epsilon = 1e-9);
    }

    #[test]
    fn test_antithetic_doubles_payoff_count() {
        let instrument = european_call();

        let mut ctx = small_ctx(1);
        ctx.set_antithetic(false);
        let plain = SimulationEngine::new(&mut ctx)
            .unwrap()
            .price(&instrument)
            .unwrap();
        assert_eq!(plain.n_paths, 10_000);

        let mut ctx = small_ctx(1);
        ctx.set_antithetic(true);
        let paired = SimulationEngine::new(&mut ctx)
            .unwrap()
            .price(&instrument)
            .unwrap();
        assert_eq!(paired.n_paths, 10_000);
    }
}
