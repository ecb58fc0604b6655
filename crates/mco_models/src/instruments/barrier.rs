//! Barrier option definition.

use super::error::InstrumentError;
use super::kind::OptionKind;
use super::terms::OptionTerms;

/// Side of the spot on which the barrier sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BarrierDirection {
    /// Barrier above the initial spot; breached when the price rises
    /// to or through the level.
    Up,
    /// Barrier below the initial spot; breached when the price falls
    /// to or through the level.
    Down,
}

/// Effect of a barrier breach on the contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum KnockType {
    /// The option comes alive only if the barrier is breached.
    In,
    /// The option dies if the barrier is breached.
    Out,
}

/// Single-barrier knock-in/knock-out option.
///
/// Breach detection is discrete: the engine inspects the simulated
/// price at every step, including the initial spot, using an inclusive
/// comparison (`>=` for up barriers, `<=` for down barriers). The
/// rebate is paid whenever the vanilla payoff branch does not apply:
/// on breach for knock-outs, on no breach for knock-ins.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BarrierOption {
    terms: OptionTerms,
    level: f64,
    direction: BarrierDirection,
    knock: KnockType,
    rebate: f64,
}

impl BarrierOption {
    /// Creates a barrier option.
    ///
    /// # Errors
    /// - [`InstrumentError::InvalidBarrier`] if the level is
    ///   non-positive or non-finite
    /// - [`InstrumentError::InvalidRebate`] if the rebate is negative
    ///   or non-finite
    pub fn new(
        terms: OptionTerms,
        level: f64,
        direction: BarrierDirection,
        knock: KnockType,
        rebate: f64,
    ) -> Result<Self, InstrumentError> {
        if !level.is_finite() || level <= 0.0 {
            return Err(InstrumentError::InvalidBarrier { level });
        }
        if !rebate.is_finite() || rebate < 0.0 {
            return Err(InstrumentError::InvalidRebate { rebate });
        }
        Ok(Self {
            terms,
            level,
            direction,
            knock,
            rebate,
        })
    }

    /// Returns the contract terms.
    #[inline]
    pub fn terms(&self) -> &OptionTerms {
        &self.terms
    }

    /// Returns the barrier level.
    #[inline]
    pub fn level(&self) -> f64 {
        self.level
    }

    /// Returns the barrier direction.
    #[inline]
    pub fn direction(&self) -> BarrierDirection {
        self.direction
    }

    /// Returns the knock type.
    #[inline]
    pub fn knock(&self) -> KnockType {
        self.knock
    }

    /// Returns the rebate paid on the non-vanilla branch.
    #[inline]
    pub fn rebate(&self) -> f64 {
        self.rebate
    }

    /// Whether a single observed price breaches the barrier.
    #[inline]
    pub fn is_breached(&self, price: f64) -> bool {
        match self.direction {
            BarrierDirection::Up => price >= self.level,
            BarrierDirection::Down => price <= self.level,
        }
    }

    /// Payoff given the terminal price and whether the path breached.
    #[inline]
    pub fn payoff(&self, terminal: f64, breached: bool) -> f64 {
        let vanilla_pays = match self.knock {
            KnockType::Out => !breached,
            KnockType::In => breached,
        };
        if vanilla_pays {
            self.terms.intrinsic(terminal)
        } else {
            self.rebate
        }
    }

    /// Returns the payoff direction.
    #[inline]
    pub fn kind(&self) -> OptionKind {
        self.terms.kind()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn terms() -> OptionTerms {
        OptionTerms::new(OptionKind::Call, 100.0, 100.0, 0.05, 0.2, 1.0).unwrap()
    }

    fn up_and_out(rebate: f64) -> BarrierOption {
        BarrierOption::new(terms(), 120.0, BarrierDirection::Up, KnockType::Out, rebate).unwrap()
    }

    #[test]
    fn test_breach_comparison_is_inclusive() {
        let opt = up_and_out(0.0);
        assert!(opt.is_breached(120.0));
        assert!(opt.is_breached(125.0));
        assert!(!opt.is_breached(119.99));

        let down = BarrierOption::new(terms(), 80.0, BarrierDirection::Down, KnockType::In, 0.0)
            .unwrap();
        assert!(down.is_breached(80.0));
        assert!(!down.is_breached(80.01));
    }

    #[test]
    fn test_knock_out_pays_rebate_on_breach() {
        let opt = up_and_out(2.5);
        assert_eq!(opt.payoff(110.0, false), 10.0);
        assert_eq!(opt.payoff(110.0, true), 2.5);
    }

    #[test]
    fn test_knock_in_pays_rebate_without_breach() {
        let opt = BarrierOption::new(terms(), 120.0, BarrierDirection::Up, KnockType::In, 1.0)
            .unwrap();
        assert_eq!(opt.payoff(110.0, true), 10.0);
        assert_eq!(opt.payoff(110.0, false), 1.0);
    }

    #[test]
    fn test_invalid_inputs_rejected() {
        assert!(
            BarrierOption::new(terms(), 0.0, BarrierDirection::Up, KnockType::Out, 0.0).is_err()
        );
        assert!(
            BarrierOption::new(terms(), 120.0, BarrierDirection::Up, KnockType::Out, -1.0)
                .is_err()
        );
    }
}
