//! Flat pricing façade.
//!
//! Every function here takes primitive arguments plus a mutable
//! [`SimulationContext`] and returns a plain `f64`. Invalid inputs,
//! configuration errors and unimplemented paths all collapse to the
//! [`NOT_IMPLEMENTED`] sentinel `-1.0`; legitimate option prices are
//! never negative, so the sentinel is unambiguous. Callers who want
//! the structured error or the standard error of an estimate should
//! use [`SimulationEngine`](crate::mc::SimulationEngine) directly.

use mco_models::instruments::{
    AmericanOption, AsianOption, BarrierDirection, BarrierOption, BermudanOption,
    EuropeanOption, Instrument, KnockType, LookbackOption, LookbackStrike, OptionKind,
    OptionTerms,
};
use tracing::debug;

use crate::context::SimulationContext;
use crate::error::PricingError;
use crate::lattice;
use crate::mc::SimulationEngine;

/// Sentinel returned for invalid input or unimplemented pricers.
pub const NOT_IMPLEMENTED: f64 = -1.0;

fn run_mc(ctx: &mut SimulationContext, instrument: Instrument) -> f64 {
    let result =
        SimulationEngine::new(ctx).and_then(|mut engine| engine.price(&instrument));
    match result {
        Ok(result) => result.price,
        Err(error) => {
            debug!(%error, "pricing failed, returning sentinel");
            NOT_IMPLEMENTED
        }
    }
}

fn mc_price(
    ctx: &mut SimulationContext,
    build: impl FnOnce() -> Result<Instrument, PricingError>,
) -> f64 {
    match build() {
        Ok(instrument) => run_mc(ctx, instrument),
        Err(error) => {
            debug!(%error, "invalid contract, returning sentinel");
            NOT_IMPLEMENTED
        }
    }
}

fn terms(
    kind: OptionKind,
    spot: f64,
    strike: f64,
    rate: f64,
    volatility: f64,
    maturity: f64,
) -> Result<OptionTerms, PricingError> {
    Ok(OptionTerms::new(kind, spot, strike, rate, volatility, maturity)?)
}

/// Prices a European call by Monte Carlo simulation.
pub fn european_call(
    ctx: &mut SimulationContext,
    spot: f64,
    strike: f64,
    rate: f64,
    volatility: f64,
    maturity: f64,
) -> f64 {
    mc_price(ctx, || {
        let terms = terms(OptionKind::Call, spot, strike, rate, volatility, maturity)?;
        Ok(Instrument::European(EuropeanOption::new(terms)))
    })
}

/// Prices a European put by Monte Carlo simulation.
pub fn european_put(
    ctx: &mut SimulationContext,
    spot: f64,
    strike: f64,
    rate: f64,
    volatility: f64,
    maturity: f64,
) -> f64 {
    mc_price(ctx, || {
        let terms = terms(OptionKind::Put, spot, strike, rate, volatility, maturity)?;
        Ok(Instrument::European(EuropeanOption::new(terms)))
    })
}

/// Prices an arithmetic-average Asian call.
///
/// The average is taken over `num_observations` equally spaced
/// observations along each simulated path.
pub fn asian_arithmetic_call(
    ctx: &mut SimulationContext,
    spot: f64,
    strike: f64,
    rate: f64,
    volatility: f64,
    maturity: f64,
    num_observations: usize,
) -> f64 {
    mc_price(ctx, || {
        let terms = terms(OptionKind::Call, spot, strike, rate, volatility, maturity)?;
        Ok(Instrument::Asian(AsianOption::new(terms, num_observations)?))
    })
}

/// Prices an arithmetic-average Asian put.
pub fn asian_arithmetic_put(
    ctx: &mut SimulationContext,
    spot: f64,
    strike: f64,
    rate: f64,
    volatility: f64,
    maturity: f64,
    num_observations: usize,
) -> f64 {
    mc_price(ctx, || {
        let terms = terms(OptionKind::Put, spot, strike, rate, volatility, maturity)?;
        Ok(Instrument::Asian(AsianOption::new(terms, num_observations)?))
    })
}

/// Prices an American call by Longstaff-Schwartz regression over an
/// explicit number of exercise dates.
pub fn american_call_with_dates(
    ctx: &mut SimulationContext,
    spot: f64,
    strike: f64,
    rate: f64,
    volatility: f64,
    maturity: f64,
    num_exercise_dates: usize,
) -> f64 {
    mc_price(ctx, || {
        let terms = terms(OptionKind::Call, spot, strike, rate, volatility, maturity)?;
        Ok(Instrument::American(AmericanOption::new(
            terms,
            num_exercise_dates,
        )?))
    })
}

/// Prices an American put by Longstaff-Schwartz regression over an
/// explicit number of exercise dates.
pub fn american_put_with_dates(
    ctx: &mut SimulationContext,
    spot: f64,
    strike: f64,
    rate: f64,
    volatility: f64,
    maturity: f64,
    num_exercise_dates: usize,
) -> f64 {
    mc_price(ctx, || {
        let terms = terms(OptionKind::Put, spot, strike, rate, volatility, maturity)?;
        Ok(Instrument::American(AmericanOption::new(
            terms,
            num_exercise_dates,
        )?))
    })
}

/// Prices an American call with the default exercise schedule of
/// [`mco_models::instruments::DEFAULT_EXERCISE_DATES`] dates.
pub fn american_call(
    ctx: &mut SimulationContext,
    spot: f64,
    strike: f64,
    rate: f64,
    volatility: f64,
    maturity: f64,
) -> f64 {
    mc_price(ctx, || {
        let terms = terms(OptionKind::Call, spot, strike, rate, volatility, maturity)?;
        Ok(Instrument::American(AmericanOption::with_default_dates(terms)))
    })
}

/// Prices an American put with the default exercise schedule of
/// [`mco_models::instruments::DEFAULT_EXERCISE_DATES`] dates.
pub fn american_put(
    ctx: &mut SimulationContext,
    spot: f64,
    strike: f64,
    rate: f64,
    volatility: f64,
    maturity: f64,
) -> f64 {
    mc_price(ctx, || {
        let terms = terms(OptionKind::Put, spot, strike, rate, volatility, maturity)?;
        Ok(Instrument::American(AmericanOption::with_default_dates(terms)))
    })
}

/// Prices a Bermudan option over an explicit schedule of exercise
/// dates, in years, strictly increasing and within the maturity.
///
/// An empty schedule prices the European equivalent.
pub fn bermudan(
    ctx: &mut SimulationContext,
    kind: OptionKind,
    spot: f64,
    strike: f64,
    rate: f64,
    volatility: f64,
    maturity: f64,
    exercise_dates: &[f64],
) -> f64 {
    mc_price(ctx, || {
        let terms = terms(kind, spot, strike, rate, volatility, maturity)?;
        Ok(Instrument::Bermudan(BermudanOption::new(
            terms,
            exercise_dates.to_vec(),
        )?))
    })
}

/// Prices a single-barrier option with continuous monitoring on the
/// simulation grid. The rebate is paid whenever the vanilla payoff is
/// forfeited.
#[allow(clippy::too_many_arguments)]
pub fn barrier(
    ctx: &mut SimulationContext,
    kind: OptionKind,
    spot: f64,
    strike: f64,
    rate: f64,
    volatility: f64,
    maturity: f64,
    level: f64,
    direction: BarrierDirection,
    knock: KnockType,
    rebate: f64,
) -> f64 {
    mc_price(ctx, || {
        let terms = terms(kind, spot, strike, rate, volatility, maturity)?;
        Ok(Instrument::Barrier(BarrierOption::new(
            terms, level, direction, knock, rebate,
        )?))
    })
}

/// Prices a lookback option, fixed or floating strike.
pub fn lookback(
    ctx: &mut SimulationContext,
    kind: OptionKind,
    spot: f64,
    strike: f64,
    rate: f64,
    volatility: f64,
    maturity: f64,
    strike_style: LookbackStrike,
) -> f64 {
    mc_price(ctx, || {
        let terms = terms(kind, spot, strike, rate, volatility, maturity)?;
        Ok(Instrument::Lookback(LookbackOption::new(terms, strike_style)))
    })
}

fn binomial_price(
    ctx: &SimulationContext,
    kind: OptionKind,
    spot: f64,
    strike: f64,
    rate: f64,
    volatility: f64,
    maturity: f64,
    num_steps: usize,
    early_exercise: bool,
) -> f64 {
    let result = (|| -> Result<f64, PricingError> {
        ctx.validate()?;
        let terms = OptionTerms::new(kind, spot, strike, rate, volatility, maturity)?;
        let price = if early_exercise {
            lattice::price_american_binomial(&terms, num_steps)?
        } else {
            lattice::price_european_binomial(&terms, num_steps)?
        };
        Ok(price)
    })();
    match result {
        Ok(price) => price,
        Err(error) => {
            debug!(%error, "binomial pricing failed, returning sentinel");
            NOT_IMPLEMENTED
        }
    }
}

/// Prices a European option on a binomial tree with the context's
/// configured step count.
pub fn european_binomial(
    ctx: &SimulationContext,
    kind: OptionKind,
    spot: f64,
    strike: f64,
    rate: f64,
    volatility: f64,
    maturity: f64,
) -> f64 {
    let steps = ctx.binomial_steps();
    binomial_price(ctx, kind, spot, strike, rate, volatility, maturity, steps, false)
}

/// Prices an American option on a binomial tree with the context's
/// configured step count.
pub fn american_binomial(
    ctx: &SimulationContext,
    kind: OptionKind,
    spot: f64,
    strike: f64,
    rate: f64,
    volatility: f64,
    maturity: f64,
) -> f64 {
    let steps = ctx.binomial_steps();
    binomial_price(ctx, kind, spot, strike, rate, volatility, maturity, steps, true)
}

/// Prices a European option on a binomial tree with an explicit step
/// count, ignoring the context's configured value.
#[allow(clippy::too_many_arguments)]
pub fn european_binomial_with_steps(
    ctx: &SimulationContext,
    kind: OptionKind,
    spot: f64,
    strike: f64,
    rate: f64,
    volatility: f64,
    maturity: f64,
    num_steps: usize,
) -> f64 {
    binomial_price(ctx, kind, spot, strike, rate, volatility, maturity, num_steps, false)
}

/// Prices an American option on a binomial tree with an explicit step
/// count, ignoring the context's configured value.
#[allow(clippy::too_many_arguments)]
pub fn american_binomial_with_steps(
    ctx: &SimulationContext,
    kind: OptionKind,
    spot: f64,
    strike: f64,
    rate: f64,
    volatility: f64,
    maturity: f64,
    num_steps: usize,
) -> f64 {
    binomial_price(ctx, kind, spot, strike, rate, volatility, maturity, num_steps, true)
}

/// Finite-difference pricer. Declared in the interface but not
/// implemented; always returns [`NOT_IMPLEMENTED`].
pub fn finite_difference(
    _ctx: &SimulationContext,
    _kind: OptionKind,
    _spot: f64,
    _strike: f64,
    _rate: f64,
    _volatility: f64,
    _maturity: f64,
) -> f64 {
    NOT_IMPLEMENTED
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::ModelKind;

    fn small_ctx() -> SimulationContext {
        let mut ctx = SimulationContext::with_seed(42);
        ctx.set_num_paths(5_000);
        ctx.set_num_steps(50);
        ctx
    }

    #[test]
    fn test_valid_inputs_price_positive() {
        let mut ctx = small_ctx();
        let price = european_call(&mut ctx, 100.0, 100.0, 0.05, 0.2, 1.0);
        assert!(price > 0.0);
    }

    #[test]
    fn test_invalid_spot_returns_sentinel() {
        let mut ctx = small_ctx();
        assert_eq!(
            european_call(&mut ctx, -100.0, 100.0, 0.05, 0.2, 1.0),
            NOT_IMPLEMENTED
        );
        assert_eq!(
            european_put(&mut ctx, f64::NAN, 100.0, 0.05, 0.2, 1.0),
            NOT_IMPLEMENTED
        );
    }

    #[test]
    fn test_invalid_config_returns_sentinel() {
        let mut ctx = small_ctx();
        ctx.set_num_paths(0);
        assert_eq!(
            european_call(&mut ctx, 100.0, 100.0, 0.05, 0.2, 1.0),
            NOT_IMPLEMENTED
        );
    }

    #[test]
    fn test_sabr_model_returns_sentinel() {
        let mut ctx = small_ctx();
        ctx.set_model(ModelKind::Sabr);
        assert_eq!(
            european_call(&mut ctx, 100.0, 100.0, 0.05, 0.2, 1.0),
            NOT_IMPLEMENTED
        );
        assert_eq!(
            american_put(&mut ctx, 100.0, 100.0, 0.05, 0.2, 1.0),
            NOT_IMPLEMENTED
        );
        // Lattice pricing ignores the stochastic model entirely
        assert!(european_binomial(&ctx, OptionKind::Call, 100.0, 100.0, 0.05, 0.2, 1.0) > 0.0);
    }

    #[test]
    fn test_zero_observations_asian_returns_sentinel() {
        let mut ctx = small_ctx();
        assert_eq!(
            asian_arithmetic_call(&mut ctx, 100.0, 100.0, 0.05, 0.2, 1.0, 0),
            NOT_IMPLEMENTED
        );
    }

    #[test]
    fn test_unsorted_bermudan_schedule_returns_sentinel() {
        let mut ctx = small_ctx();
        assert_eq!(
            bermudan(
                &mut ctx,
                OptionKind::Put,
                100.0,
                100.0,
                0.05,
                0.2,
                1.0,
                &[0.5, 0.25]
            ),
            NOT_IMPLEMENTED
        );
    }

    #[test]
    fn test_finite_difference_is_stubbed() {
        let ctx = small_ctx();
        assert_eq!(
            finite_difference(&ctx, OptionKind::Call, 100.0, 100.0, 0.05, 0.2, 1.0),
            NOT_IMPLEMENTED
        );
    }

    #[test]
    fn test_binomial_step_override() {
        let ctx = small_ctx();
        let coarse =
            european_binomial_with_steps(&ctx, OptionKind::Call, 100.0, 100.0, 0.05, 0.2, 1.0, 10);
        let fine =
            european_binomial_with_steps(&ctx, OptionKind::Call, 100.0, 100.0, 0.05, 0.2, 1.0, 2_000);
        assert!(coarse > 0.0 && fine > 0.0);
        assert_ne!(coarse, fine);
    }
}
