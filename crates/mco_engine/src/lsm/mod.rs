//! Longstaff-Schwartz regression pricing for early-exercise options.
//!
//! The pricer runs in two phases:
//!
//! 1. **Forward**: simulate the whole path ensemble on the exercise
//!    grid and keep it in one flat buffer.
//! 2. **Backward**: from maturity towards valuation, estimate the
//!    continuation value at each exercise date by regressing realised
//!    discounted cash flows on a cubic polynomial of the stock price,
//!    restricted to in-the-money paths, and exercise wherever the
//!    intrinsic value beats the fit.
//!
//! Thin in-the-money sets (fewer than [`BASIS_SIZE`] paths) fall back
//! to a deep-in-the-money rule: exercise when the intrinsic value
//! exceeds 20% of the strike.
//!
//! Of the variance-reduction flags only antithetic pairing applies
//! here; the exercise-boundary estimate does not compose with
//! reweighted or stratified draws.

mod regression;

pub use regression::{ContinuationFit, BASIS_SIZE};

use mco_models::instruments::{AmericanOption, BermudanOption, OptionTerms};
use tracing::debug;

use crate::context::{ModelKind, SimulationContext};
use crate::error::PricingError;
use crate::mc::{simulate_gbm_path, PricingResult};

/// Intrinsic-over-strike fraction for the thin-regression fallback.
const DEEP_ITM_FRACTION: f64 = 0.2;

/// Simulates `num_paths` GBM paths into a flat `paths` buffer with
/// layout `paths[path * (num_steps + 1) + step]`.
///
/// With `antithetic` set, path `i + num_paths / 2` reuses the draws of
/// path `i` negated; an odd trailing path gets fresh draws.
fn generate_gbm_ensemble(
    ctx: &mut SimulationContext,
    terms: &OptionTerms,
    num_paths: usize,
    num_steps: usize,
    antithetic: bool,
    paths: &mut [f64],
) {
    debug_assert_eq!(paths.len(), num_paths * (num_steps + 1));
    let stride = num_steps + 1;
    let mut normals = vec![0.0; num_steps];

    let simulate_into = |paths: &mut [f64], path_idx: usize, normals: &[f64]| {
        let chunk = &mut paths[path_idx * stride..(path_idx + 1) * stride];
        simulate_gbm_path(
            terms.spot(),
            terms.rate(),
            terms.volatility(),
            terms.maturity(),
            normals,
            chunk,
        );
    };

    if antithetic {
        let half = num_paths / 2;
        for i in 0..half {
            ctx.rng_mut().fill_normal(&mut normals);
            simulate_into(paths, i, &normals);
            for z in normals.iter_mut() {
                *z = -*z;
            }
            simulate_into(paths, i + half, &normals);
        }
        if num_paths % 2 == 1 {
            ctx.rng_mut().fill_normal(&mut normals);
            simulate_into(paths, num_paths - 1, &normals);
        }
    } else {
        for i in 0..num_paths {
            ctx.rng_mut().fill_normal(&mut normals);
            simulate_into(paths, i, &normals);
        }
    }
}

/// Longstaff-Schwarz pricer for American options.
///
/// Owns the path ensemble and the regression arenas, so one pricer
/// allocates once no matter how many exercise dates it sweeps.
///
/// # Examples
///
/// ```rust
/// use mco_engine::context::SimulationContext;
/// use mco_engine::lsm::LsmPricer;
/// use mco_models::instruments::{
///     AmericanOption, OptionKind, OptionTerms,
/// };
///
/// let terms = OptionTerms::new(OptionKind::Put, 100.0, 100.0, 0.05, 0.2, 1.0).unwrap();
/// let option = AmericanOption::new(terms, 25).unwrap();
///
/// let mut ctx = SimulationContext::with_seed(42);
/// ctx.set_num_paths(20_000);
/// let mut pricer = LsmPricer::new(&option, &ctx).unwrap();
/// let price = pricer.price(&mut ctx);
/// assert!(price > 0.0);
/// ```
pub struct LsmPricer {
    terms: OptionTerms,
    num_paths: usize,
    /// Exercise dates plus one step to maturity.
    total_steps: usize,
    dt: f64,
    antithetic: bool,
    /// Flat ensemble, `paths[path * (total_steps + 1) + step]`.
    paths: Vec<f64>,
    cash_flows: Vec<f64>,
    exercise_steps: Vec<usize>,
    // Regression arenas reused across exercise dates
    itm_prices: Vec<f64>,
    itm_values: Vec<f64>,
    itm_paths: Vec<usize>,
}

impl LsmPricer {
    /// Allocates a pricer for one American option on one context.
    ///
    /// # Errors
    /// - [`PricingError::Config`] if the context settings are out of range
    /// - [`PricingError::NotImplemented`] under SABR dynamics
    pub fn new(option: &AmericanOption, ctx: &SimulationContext) -> Result<Self, PricingError> {
        ctx.validate()?;
        if ctx.model() == ModelKind::Sabr {
            return Err(PricingError::NotImplemented("SABR path generation"));
        }

        let num_paths = ctx.num_paths();
        let total_steps = option.num_exercise_dates() + 1;
        let dt = option.terms().maturity() / total_steps as f64;

        Ok(Self {
            terms: *option.terms(),
            num_paths,
            total_steps,
            dt,
            antithetic: ctx.antithetic(),
            paths: vec![0.0; num_paths * (total_steps + 1)],
            cash_flows: vec![0.0; num_paths],
            exercise_steps: vec![total_steps; num_paths],
            itm_prices: Vec::new(),
            itm_values: Vec::new(),
            itm_paths: Vec::new(),
        })
    }

    /// Runs the forward and backward phases and returns the price.
    ///
    /// Consumes draws from the context's stream; reseed or reset the
    /// context for a bit-identical replay.
    pub fn price(&mut self, ctx: &mut SimulationContext) -> f64 {
        generate_gbm_ensemble(
            ctx,
            &self.terms,
            self.num_paths,
            self.total_steps,
            self.antithetic,
            &mut self.paths,
        );
        self.backward_induction();
        self.cash_flows.iter().sum::<f64>() / self.num_paths as f64
    }

    fn backward_induction(&mut self) {
        let stride = self.total_steps + 1;
        let step_discount = (-self.terms.rate() * self.dt).exp();
        let strike = self.terms.strike();

        // Cash flows start as the terminal payoff.
        for path in 0..self.num_paths {
            let terminal = self.paths[path * stride + self.total_steps];
            self.cash_flows[path] = self.terms.intrinsic(terminal);
            self.exercise_steps[path] = self.total_steps;
        }

        for step in (1..self.total_steps).rev() {
            // Pull every cash flow back one step before comparing.
            for cash_flow in self.cash_flows.iter_mut() {
                *cash_flow *= step_discount;
            }

            self.itm_prices.clear();
            self.itm_values.clear();
            self.itm_paths.clear();
            for path in 0..self.num_paths {
                let price = self.paths[path * stride + step];
                if self.terms.intrinsic(price) > 0.0 {
                    self.itm_prices.push(price);
                    self.itm_values.push(self.cash_flows[path]);
                    self.itm_paths.push(path);
                }
            }

            if self.itm_prices.len() >= BASIS_SIZE {
                let fit = ContinuationFit::fit(&self.itm_prices, &self.itm_values);
                for (i, &path) in self.itm_paths.iter().enumerate() {
                    let price = self.itm_prices[i];
                    let exercise = self.terms.intrinsic(price);
                    if exercise > fit.value(price) {
                        self.cash_flows[path] = exercise;
                        self.exercise_steps[path] = step;
                    }
                }
            } else {
                debug!(
                    step,
                    itm = self.itm_prices.len(),
                    "thin in-the-money set, deep exercise rule"
                );
                for path in 0..self.num_paths {
                    let price = self.paths[path * stride + step];
                    let intrinsic = self.terms.intrinsic(price);
                    if intrinsic > DEEP_ITM_FRACTION * strike {
                        self.cash_flows[path] = intrinsic;
                        self.exercise_steps[path] = step;
                    }
                }
            }
        }

        // Remaining discount from the first exercise date to valuation.
        for cash_flow in self.cash_flows.iter_mut() {
            *cash_flow *= step_discount;
        }
    }

    /// Average exercise time across paths, in years.
    ///
    /// Paths never exercised count at maturity.
    pub fn average_exercise_time(&self) -> f64 {
        let sum: f64 = self
            .exercise_steps
            .iter()
            .map(|&step| step as f64 * self.dt)
            .sum();
        sum / self.num_paths as f64
    }

    /// Percentage of paths exercised strictly before maturity.
    pub fn early_exercise_percentage(&self) -> f64 {
        let early = self
            .exercise_steps
            .iter()
            .filter(|&&step| step < self.total_steps)
            .count();
        100.0 * early as f64 / self.num_paths as f64
    }

    /// Standard error of the discounted cash-flow average.
    pub fn std_error(&self) -> f64 {
        let n = self.num_paths as f64;
        let mean = self.cash_flows.iter().sum::<f64>() / n;
        let variance = self
            .cash_flows
            .iter()
            .map(|cf| (cf - mean).powi(2))
            .sum::<f64>()
            / n;
        (variance / n).sqrt()
    }
}

/// Prices an American option in one call.
pub fn price_american(
    ctx: &mut SimulationContext,
    option: &AmericanOption,
) -> Result<f64, PricingError> {
    let mut pricer = LsmPricer::new(option, ctx)?;
    Ok(pricer.price(ctx))
}

/// Prices a Bermudan option by regression over its date schedule.
///
/// Paths run on the context step grid and each schedule date is
/// mapped to its step index. The backward sweep tracks both the value
/// and the time of each path's cash flow, so discounting between
/// unevenly spaced dates stays exact. An empty schedule degrades to a
/// plain European expectation.
pub fn price_bermudan(
    ctx: &mut SimulationContext,
    option: &BermudanOption,
) -> Result<PricingResult, PricingError> {
    ctx.validate()?;
    if ctx.model() == ModelKind::Sabr {
        return Err(PricingError::NotImplemented("SABR path generation"));
    }

    let terms = *option.terms();
    let num_paths = ctx.num_paths();
    let num_steps = ctx.num_steps();
    let stride = num_steps + 1;
    let rate = terms.rate();
    let maturity = terms.maturity();
    let strike = terms.strike();

    let mut paths = vec![0.0; num_paths * stride];
    generate_gbm_ensemble(ctx, &terms, num_paths, num_steps, ctx.antithetic(), &mut paths);

    // Cash flow value and its time, per path.
    let mut cash_flows: Vec<f64> = (0..num_paths)
        .map(|path| terms.intrinsic(paths[path * stride + num_steps]))
        .collect();
    let mut cash_times = vec![maturity; num_paths];

    let dates = option.exercise_dates();
    let date_steps: Vec<usize> = dates
        .iter()
        .map(|&date| ((date / maturity) * num_steps as f64) as usize)
        .collect();

    let mut itm_prices = Vec::new();
    let mut itm_values = Vec::new();
    let mut itm_paths = Vec::new();

    for (t, &step) in date_steps.iter().enumerate().rev() {
        let date = dates[t];

        itm_prices.clear();
        itm_values.clear();
        itm_paths.clear();
        for path in 0..num_paths {
            let price = paths[path * stride + step];
            if terms.intrinsic(price) > 0.0 {
                itm_prices.push(price);
                itm_values.push(cash_flows[path] * (-rate * (cash_times[path] - date)).exp());
                itm_paths.push(path);
            }
        }

        if itm_prices.len() >= BASIS_SIZE {
            let fit = ContinuationFit::fit(&itm_prices, &itm_values);
            for (i, &path) in itm_paths.iter().enumerate() {
                let price = itm_prices[i];
                let exercise = terms.intrinsic(price);
                if exercise > fit.value(price) {
                    cash_flows[path] = exercise;
                    cash_times[path] = date;
                }
            }
        } else {
            debug!(
                date,
                itm = itm_prices.len(),
                "thin in-the-money set, deep exercise rule"
            );
            for path in 0..num_paths {
                let price = paths[path * stride + step];
                let intrinsic = terms.intrinsic(price);
                if intrinsic > DEEP_ITM_FRACTION * strike {
                    cash_flows[path] = intrinsic;
                    cash_times[path] = date;
                }
            }
        }
    }

    // Discount each cash flow from its own time.
    let n = num_paths as f64;
    let mut sum = 0.0;
    let mut sum_sq = 0.0;
    for (cash_flow, time) in cash_flows.iter().zip(&cash_times) {
        let value = cash_flow * (-rate * time).exp();
        sum += value;
        sum_sq += value * value;
    }
    let mean = sum / n;
    let variance = (sum_sq / n - mean * mean).max(0.0);

    Ok(PricingResult {
        price: mean,
        std_error: (variance / n).sqrt(),
        n_paths: num_paths,
    })
}
