//! Simulation context owning configuration and the random stream.

use crate::error::ConfigError;
use crate::rng::EngineRng;

/// Maximum allowed Monte Carlo path count.
pub const MAX_PATHS: usize = 10_000_000;

/// Maximum allowed simulation step count.
pub const MAX_STEPS: usize = 10_000;

/// Maximum allowed binomial lattice step count.
pub const MAX_BINOMIAL_STEPS: usize = 100_000;

/// Price dynamics selected for path generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ModelKind {
    /// Geometric Brownian motion with the exact log-step scheme.
    Gbm,
    /// Stochastic alpha-beta-rho dynamics. Selectable and configurable
    /// but not yet priceable; every engine reports it unimplemented.
    Sabr,
}

/// SABR model parameters.
///
/// Stored on the context so configuration round-trips, but inert until
/// SABR path generation lands.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SabrParams {
    /// Initial volatility level.
    pub alpha: f64,
    /// CEV exponent (0 = normal, 1 = lognormal).
    pub beta: f64,
    /// Correlation between the forward and its volatility.
    pub rho: f64,
    /// Volatility of volatility.
    pub nu: f64,
}

impl Default for SabrParams {
    fn default() -> Self {
        Self {
            alpha: 0.2,
            beta: 0.5,
            rho: 0.0,
            nu: 0.3,
        }
    }
}

/// Mutable pricing session state.
///
/// Owns the seeded random stream plus every knob the engines read:
/// path and step counts, variance-reduction flags, binomial step
/// count and model selection. One context serves one sequence of
/// pricing calls; concurrent callers each build their own. Not
/// thread-safe by design, and deliberately so: a shared random
/// stream would destroy reproducibility.
///
/// Successive pricing calls on one context consume the stream, so
/// two identical calls return different estimates. Call
/// [`SimulationContext::set_seed`] or [`SimulationContext::reset_rng`]
/// between calls for bit-identical replays.
///
/// # Examples
///
/// ```rust
/// use mco_engine::context::SimulationContext;
///
/// let mut ctx = SimulationContext::new();
/// ctx.set_seed(42);
/// ctx.set_num_paths(50_000);
/// ctx.set_antithetic(true);
/// assert!(ctx.validate().is_ok());
/// ```
pub struct SimulationContext {
    seed: u64,
    num_paths: usize,
    num_steps: usize,
    binomial_steps: usize,
    antithetic: bool,
    control_variates: bool,
    stratified_sampling: bool,
    importance_sampling: bool,
    drift_shift: f64,
    model: ModelKind,
    sabr: SabrParams,
    rng: EngineRng,
}

impl Default for SimulationContext {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulationContext {
    /// Creates a context with the standard defaults: seed 12345,
    /// 100 000 paths, 252 steps, 200 binomial steps, antithetic
    /// variates on, every other variance-reduction flag off, GBM
    /// dynamics.
    pub fn new() -> Self {
        let seed = 12345;
        Self {
            seed,
            num_paths: 100_000,
            num_steps: 252,
            binomial_steps: 200,
            antithetic: true,
            control_variates: false,
            stratified_sampling: false,
            importance_sampling: false,
            drift_shift: 0.0,
            model: ModelKind::Gbm,
            sabr: SabrParams::default(),
            rng: EngineRng::from_seed(seed),
        }
    }

    /// Creates a context with defaults and an explicit seed.
    pub fn with_seed(seed: u64) -> Self {
        let mut ctx = Self::new();
        ctx.set_seed(seed);
        ctx
    }

    /// Checks every count against its engine bound.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.num_paths == 0 || self.num_paths > MAX_PATHS {
            return Err(ConfigError::InvalidPathCount(self.num_paths));
        }
        if self.num_steps == 0 || self.num_steps > MAX_STEPS {
            return Err(ConfigError::InvalidStepCount(self.num_steps));
        }
        if self.binomial_steps == 0 || self.binomial_steps > MAX_BINOMIAL_STEPS {
            return Err(ConfigError::InvalidBinomialStepCount(self.binomial_steps));
        }
        Ok(())
    }

    /// Reseeds the random stream. The next pricing call replays from
    /// the start of the new stream.
    pub fn set_seed(&mut self, seed: u64) {
        self.seed = seed;
        self.rng = EngineRng::from_seed(seed);
    }

    /// Rewinds the random stream to the start of the current seed.
    pub fn reset_rng(&mut self) {
        self.rng = EngineRng::from_seed(self.seed);
    }

    /// Returns the current seed.
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Sets the Monte Carlo path count.
    pub fn set_num_paths(&mut self, num_paths: usize) {
        self.num_paths = num_paths;
    }

    /// Returns the Monte Carlo path count.
    #[inline]
    pub fn num_paths(&self) -> usize {
        self.num_paths
    }

    /// Sets the per-path step count.
    pub fn set_num_steps(&mut self, num_steps: usize) {
        self.num_steps = num_steps;
    }

    /// Returns the per-path step count.
    #[inline]
    pub fn num_steps(&self) -> usize {
        self.num_steps
    }

    /// Sets the binomial lattice step count.
    pub fn set_binomial_steps(&mut self, steps: usize) {
        self.binomial_steps = steps;
    }

    /// Returns the binomial lattice step count.
    #[inline]
    pub fn binomial_steps(&self) -> usize {
        self.binomial_steps
    }

    /// Enables or disables antithetic variates.
    pub fn set_antithetic(&mut self, enabled: bool) {
        self.antithetic = enabled;
    }

    /// Whether antithetic variates are enabled.
    #[inline]
    pub fn antithetic(&self) -> bool {
        self.antithetic
    }

    /// Enables or disables the Black-Scholes control variate.
    pub fn set_control_variates(&mut self, enabled: bool) {
        self.control_variates = enabled;
    }

    /// Whether the control variate is enabled.
    #[inline]
    pub fn control_variates(&self) -> bool {
        self.control_variates
    }

    /// Enables or disables stratified sampling.
    pub fn set_stratified_sampling(&mut self, enabled: bool) {
        self.stratified_sampling = enabled;
    }

    /// Whether stratified sampling is enabled.
    #[inline]
    pub fn stratified_sampling(&self) -> bool {
        self.stratified_sampling
    }

    /// Enables or disables importance sampling with the given
    /// Brownian drift shift. The shift is retained even when the flag
    /// is off so it can be toggled without re-specifying.
    pub fn set_importance_sampling(&mut self, enabled: bool, drift_shift: f64) {
        self.importance_sampling = enabled;
        self.drift_shift = drift_shift;
    }

    /// Whether importance sampling is enabled.
    #[inline]
    pub fn importance_sampling(&self) -> bool {
        self.importance_sampling
    }

    /// Returns the importance-sampling drift shift.
    #[inline]
    pub fn drift_shift(&self) -> f64 {
        self.drift_shift
    }

    /// Selects the price dynamics.
    pub fn set_model(&mut self, model: ModelKind) {
        self.model = model;
    }

    /// Returns the selected price dynamics.
    #[inline]
    pub fn model(&self) -> ModelKind {
        self.model
    }

    /// Sets the SABR parameters.
    pub fn set_sabr_params(&mut self, params: SabrParams) {
        self.sabr = params;
    }

    /// Returns the SABR parameters.
    #[inline]
    pub fn sabr_params(&self) -> SabrParams {
        self.sabr
    }

    /// Mutable access to the owned random stream.
    #[inline]
    pub fn rng_mut(&mut self) -> &mut EngineRng {
        &mut self.rng
    }
}
