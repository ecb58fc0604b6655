//! Cox-Ross-Rubinstein binomial lattice.

use mco_models::instruments::OptionTerms;

use crate::error::LatticeError;

/// Recombining binomial tree under CRR parameterisation.
///
/// Up and down factors are `u = exp(sigma * sqrt(dt))` and `d = 1/u`,
/// with risk-neutral up probability `p = (exp(r * dt) - d) / (u - d)`.
/// Backward induction rolls two layer buffers, so memory stays linear
/// in the step count regardless of tree depth.
///
/// # Examples
///
/// ```rust
/// use mco_engine::lattice::BinomialTree;
/// use mco_models::instruments::{OptionKind, OptionTerms};
///
/// let terms = OptionTerms::new(OptionKind::Put, 100.0, 100.0, 0.05, 0.2, 1.0).unwrap();
/// let mut tree = BinomialTree::new(&terms, 500).unwrap();
/// let american = tree.price_american();
/// let european = tree.price_european();
/// assert!(american >= european);
/// ```
pub struct BinomialTree {
    terms: OptionTerms,
    num_steps: usize,
    up: f64,
    down: f64,
    up_probability: f64,
    step_discount: f64,
    // Two layers, swapped as induction walks back
    values: Vec<f64>,
    values_prev: Vec<f64>,
}

impl BinomialTree {
    /// Builds a tree for the given terms and step count.
    ///
    /// Zero steps, or parameters that push the risk-neutral
    /// probability outside `[0, 1]`, are rejected.
    pub fn new(terms: &OptionTerms, num_steps: usize) -> Result<Self, LatticeError> {
        if num_steps == 0 {
            return Err(LatticeError::InvalidStepCount);
        }

        let dt = terms.maturity() / num_steps as f64;
        let up = (terms.volatility() * dt.sqrt()).exp();
        let down = 1.0 / up;
        let growth = (terms.rate() * dt).exp();

        // At zero volatility u == d and the CRR ratio is undefined;
        // the price methods take the deterministic branch instead, so
        // the probability is never read.
        let up_probability = if up == down {
            1.0
        } else {
            (growth - down) / (up - down)
        };
        if !(0.0..=1.0).contains(&up_probability) {
            return Err(LatticeError::InvalidProbability {
                probability: up_probability,
            });
        }

        Ok(Self {
            terms: *terms,
            num_steps,
            up,
            down,
            up_probability,
            step_discount: (-terms.rate() * dt).exp(),
            values: vec![0.0; num_steps + 1],
            values_prev: vec![0.0; num_steps + 1],
        })
    }

    /// Stock price at node `(step, up_moves)`.
    ///
    /// # Panics
    /// Debug builds panic if the node lies outside the tree.
    pub fn stock_price(&self, step: usize, up_moves: usize) -> f64 {
        debug_assert!(step <= self.num_steps);
        debug_assert!(up_moves <= step);
        let down_moves = step - up_moves;
        self.terms.spot() * self.up.powi(up_moves as i32) * self.down.powi(down_moves as i32)
    }

    /// Number of time steps in the tree.
    pub fn num_steps(&self) -> usize {
        self.num_steps
    }

    fn backward_induction(&mut self, allow_early_exercise: bool) -> f64 {
        for up_moves in 0..=self.num_steps {
            let stock = self.stock_price(self.num_steps, up_moves);
            self.values[up_moves] = self.terms.intrinsic(stock);
        }

        for step in (0..self.num_steps).rev() {
            std::mem::swap(&mut self.values, &mut self.values_prev);

            for up_moves in 0..=step {
                let continuation = self.step_discount
                    * (self.up_probability * self.values_prev[up_moves + 1]
                        + (1.0 - self.up_probability) * self.values_prev[up_moves]);

                self.values[up_moves] = if allow_early_exercise {
                    let exercise = self.terms.intrinsic(self.stock_price(step, up_moves));
                    continuation.max(exercise)
                } else {
                    continuation
                };
            }
        }

        self.values[0]
    }

    /// Discounted intrinsic along the deterministic forward
    /// trajectory `S(t) = S * exp(r * t)`.
    ///
    /// With nothing random left, the European value is the discounted
    /// terminal intrinsic; the American value is the best discounted
    /// intrinsic over the step grid.
    fn price_deterministic(&self, allow_early_exercise: bool) -> f64 {
        let dt = self.terms.maturity() / self.num_steps as f64;
        let rate = self.terms.rate();
        let spot = self.terms.spot();

        let value_at = |step: usize| {
            let t = step as f64 * dt;
            (-rate * t).exp() * self.terms.intrinsic(spot * (rate * t).exp())
        };

        if allow_early_exercise {
            (0..=self.num_steps)
                .map(value_at)
                .fold(0.0, f64::max)
        } else {
            value_at(self.num_steps)
        }
    }

    /// Prices the terms as a European option.
    pub fn price_european(&mut self) -> f64 {
        if self.terms.volatility() == 0.0 {
            return self.price_deterministic(false);
        }
        self.backward_induction(false)
    }

    /// Prices the terms as an American option, checking early exercise
    /// at every node.
    pub fn price_american(&mut self) -> f64 {
        if self.terms.volatility() == 0.0 {
            return self.price_deterministic(true);
        }
        self.backward_induction(true)
    }
}

/// Prices a European option on a fresh tree.
pub fn price_european_binomial(
    terms: &OptionTerms,
    num_steps: usize,
) -> Result<f64, LatticeError> {
    Ok(BinomialTree::new(terms, num_steps)?.price_european())
}

/// Prices an American option on a fresh tree.
pub fn price_american_binomial(
    terms: &OptionTerms,
    num_steps: usize,
) -> Result<f64, LatticeError> {
    Ok(BinomialTree::new(terms, num_steps)?.price_american())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use mco_models::analytical::{call_price, put_price};
    use mco_models::instruments::OptionKind;

    fn terms(kind: OptionKind) -> OptionTerms {
        OptionTerms::new(kind, 100.0, 100.0, 0.05, 0.2, 1.0).unwrap()
    }

    #[test]
    fn test_european_call_converges_to_analytic() {
        let price = price_european_binomial(&terms(OptionKind::Call), 1_000).unwrap();
        let analytic = call_price(100.0, 100.0, 0.05, 0.2, 1.0);
        assert_relative_eq!(price, analytic, epsilon = 0.01);
    }

    #[test]
    fn test_european_put_converges_to_analytic() {
        let price = price_european_binomial(&terms(OptionKind::Put), 1_000).unwrap();
        let analytic = put_price(100.0, 100.0, 0.05, 0.2, 1.0);
        assert_relative_eq!(price, analytic, epsilon = 0.01);
    }

    #[test]
    fn test_american_put_exceeds_european_put() {
        let mut tree = BinomialTree::new(&terms(OptionKind::Put), 500).unwrap();
        let american = tree.price_american();
        let european = tree.price_european();
        assert!(american > european);
    }

    #[test]
    fn test_american_call_equals_european_without_dividends() {
        let mut tree = BinomialTree::new(&terms(OptionKind::Call), 500).unwrap();
        assert_relative_eq!(
            tree.price_american(),
            tree.price_european(),
            epsilon = 1e-10
        );
    }

    #[test]
    fn test_zero_steps_rejected() {
        assert_eq!(
            BinomialTree::new(&terms(OptionKind::Call), 0).err(),
            Some(LatticeError::InvalidStepCount)
        );
    }

    #[test]
    fn test_extreme_rate_rejects_probability() {
        let terms = OptionTerms::new(OptionKind::Call, 100.0, 100.0, 5.0, 0.01, 1.0).unwrap();
        match BinomialTree::new(&terms, 10) {
            Err(LatticeError::InvalidProbability { probability }) => assert!(probability > 1.0),
            other => panic!("expected probability error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_zero_volatility_prices_deterministic_forward() {
        let terms = OptionTerms::new(OptionKind::Call, 100.0, 100.0, 0.05, 0.0, 1.0).unwrap();
        let price = price_european_binomial(&terms, 100).unwrap();
        // Forward grows at r, payoff discounted back
        let expected = 100.0 - 100.0 * (-0.05f64).exp();
        assert!(expected > 4.877 && expected < 4.878);
        assert_relative_eq!(price, expected, epsilon = 1e-9);
    }

    #[test]
    fn test_zero_volatility_american_call_waits_until_maturity() {
        let terms = OptionTerms::new(OptionKind::Call, 100.0, 100.0, 0.05, 0.0, 1.0).unwrap();
        let american = price_american_binomial(&terms, 100).unwrap();
        let european = price_european_binomial(&terms, 100).unwrap();
        // Discounted intrinsic of the growing forward peaks at maturity
        assert_relative_eq!(american, european, epsilon = 1e-12);
    }

    #[test]
    fn test_zero_volatility_american_put_exercises_immediately() {
        let terms = OptionTerms::new(OptionKind::Put, 90.0, 100.0, 0.05, 0.0, 1.0).unwrap();
        let american = price_american_binomial(&terms, 100).unwrap();
        // The forward only grows, so holding the put just erodes value
        assert_relative_eq!(american, 10.0, epsilon = 1e-12);

        let european = price_european_binomial(&terms, 100).unwrap();
        let expected = 100.0 * (-0.05f64).exp() - 90.0;
        assert_relative_eq!(european, expected, epsilon = 1e-9);
        assert!(american > european);
    }

    #[test]
    fn test_stock_price_recombines() {
        let tree = BinomialTree::new(&terms(OptionKind::Call), 10).unwrap();
        // An up then down move lands back on spot
        assert_relative_eq!(tree.stock_price(2, 1), 100.0, epsilon = 1e-10);
        assert_relative_eq!(tree.stock_price(0, 0), 100.0, epsilon = 1e-12);
    }
}
