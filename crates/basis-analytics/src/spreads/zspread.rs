//! Z-spread (zero-volatility spread) calculator.
//!
//! The Z-spread is the constant spread that, added to every zero rate, makes
//! the discounted cash flows equal the market price:
//!
//! ```text
//! price = Σ CF_k · exp(-(r(t_k) + z) · t_k)
//! ```

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use basis_curves::traits::DiscountCurve;
use basis_math::solvers::{brent, SolverConfig};

use super::BPS;
use crate::bond::BondSpec;
use crate::yields::YieldSolver;

/// Brent search settings for the Z-spread.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZSpreadConfig {
    /// Lower end of the search bracket (decimal).
    pub lower: f64,
    /// Upper end of the search bracket (decimal).
    pub upper: f64,
    /// Spread tolerance (decimal).
    pub tolerance: f64,
    /// Iteration budget.
    pub max_iterations: u32,
}

impl Default for ZSpreadConfig {
    fn default() -> Self {
        Self {
            lower: -0.10,
            upper: 0.20,
            tolerance: 1e-6,
            max_iterations: 100,
        }
    }
}

/// How a Z-spread was obtained.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SpreadQuality {
    /// Brent converged inside the bracket.
    Solved {
        /// Solver iterations used.
        iterations: u32,
    },
    /// Brent failed; the spread is yield minus the risk-free rate at maturity.
    Approximated {
        /// Why the solve failed.
        reason: String,
    },
}

/// A Z-spread with its provenance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZSpreadResult {
    /// Spread as a decimal.
    pub spread: f64,
    /// Whether the spread was solved or approximated.
    pub quality: SpreadQuality,
}

impl ZSpreadResult {
    /// Spread in basis points.
    pub fn bps(&self) -> f64 {
        self.spread * BPS
    }

    /// True when the yield-based fallback was used.
    pub fn is_approximated(&self) -> bool {
        matches!(self.quality, SpreadQuality::Approximated { .. })
    }
}

/// Z-spread calculator over a risk-free zero curve.
pub struct ZSpreadCalculator<'a> {
    rates: &'a dyn DiscountCurve,
    config: ZSpreadConfig,
    yield_solver: YieldSolver,
}

impl std::fmt::Debug for ZSpreadCalculator<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ZSpreadCalculator")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<'a> ZSpreadCalculator<'a> {
    /// Creates a calculator with the default bracket [-10%, 20%].
    #[must_use]
    pub fn new(rates: &'a dyn DiscountCurve) -> Self {
        Self {
            rates,
            config: ZSpreadConfig::default(),
            yield_solver: YieldSolver::default(),
        }
    }

    /// Replaces the Brent settings.
    #[must_use]
    pub fn with_config(mut self, config: ZSpreadConfig) -> Self {
        self.config = config;
        self
    }

    /// Replaces the yield solver used by the fallback.
    #[must_use]
    pub fn with_yield_solver(mut self, yield_solver: YieldSolver) -> Self {
        self.yield_solver = yield_solver;
        self
    }

    /// Price of the bond's payments with `spread` added to every zero rate.
    pub fn price_with_spread(&self, bond: &BondSpec, spread: f64) -> f64 {
        bond.cash_flows()
            .into_iter()
            .map(|(t, cf)| cf * (-(self.rates.rate(t) + spread) * t).exp())
            .sum()
    }

    /// Solves for the Z-spread that reprices `bond` at `target_price`.
    ///
    /// Never fails: when the bracket does not contain a root or Brent runs
    /// out of iterations, the result is `ytm(target) - r(maturity)` marked
    /// [`SpreadQuality::Approximated`].
    pub fn calculate(&self, bond: &BondSpec, target_price: f64) -> ZSpreadResult {
        let objective = |z: f64| self.price_with_spread(bond, z) - target_price;
        let solver = SolverConfig::new(self.config.tolerance, self.config.max_iterations);

        match brent(objective, self.config.lower, self.config.upper, &solver) {
            Ok(result) => {
                debug!("z-spread {:.2} bps in {} iterations", result.root * BPS, result.iterations);
                ZSpreadResult {
                    spread: result.root,
                    quality: SpreadQuality::Solved {
                        iterations: result.iterations,
                    },
                }
            }
            Err(err) => {
                let ytm = self.yield_solver.solve(bond, target_price);
                let spread = ytm.yield_value - self.rates.rate(bond.maturity());
                warn!(
                    "z-spread solve failed ({err}); approximating with ytm spread {:.2} bps",
                    spread * BPS
                );
                ZSpreadResult {
                    spread,
                    quality: SpreadQuality::Approximated {
                        reason: err.to_string(),
                    },
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use basis_curves::rate_curve::RateCurve;

    fn bond() -> BondSpec {
        BondSpec::new(0.052, 7.0, 2, 100.0, 0.4).unwrap()
    }

    fn flat(rate: f64) -> RateCurve {
        RateCurve::new([(1.0, rate)]).unwrap()
    }

    #[test]
    fn test_solved_spread_reprices() {
        let rates = flat(0.0425);
        let calc = ZSpreadCalculator::new(&rates);
        let result = calc.calculate(&bond(), 94.50);

        assert!(matches!(result.quality, SpreadQuality::Solved { .. }));
        assert!(result.bps() > 100.0 && result.bps() < 250.0, "{}", result.bps());
        // Brent stops on bracket width; a 1e-6 spread error moves price ~6e-4.
        assert_relative_eq!(calc.price_with_spread(&bond(), result.spread), 94.50, epsilon = 1e-3);
    }

    #[test]
    fn test_zero_spread_price_is_riskless_price() {
        let rates = flat(0.0425);
        let calc = ZSpreadCalculator::new(&rates);
        let riskless: f64 = bond()
            .cash_flows()
            .iter()
            .map(|(t, cf)| cf * (-0.0425 * t).exp())
            .sum();
        assert_relative_eq!(calc.price_with_spread(&bond(), 0.0), riskless, epsilon = 1e-10);
    }

    #[test]
    fn test_price_decreases_with_spread() {
        let rates = flat(0.0425);
        let calc = ZSpreadCalculator::new(&rates);
        let b = bond();
        assert!(calc.price_with_spread(&b, 0.01) < calc.price_with_spread(&b, 0.0));
        assert!(calc.price_with_spread(&b, -0.01) > calc.price_with_spread(&b, 0.0));
    }

    #[test]
    fn test_out_of_bracket_falls_back_to_yield_spread() {
        let rates = flat(0.0425);
        let calc = ZSpreadCalculator::new(&rates);
        let b = bond();
        let result = calc.calculate(&b, 20.0);

        assert!(result.is_approximated());
        let ytm = YieldSolver::new().solve(&b, 20.0).yield_value;
        assert_relative_eq!(result.spread, ytm - 0.0425, epsilon = 1e-12);
    }

    #[test]
    fn test_custom_bracket() {
        let rates = flat(0.0425);
        let narrow = ZSpreadConfig {
            lower: 0.0,
            upper: 0.001,
            ..ZSpreadConfig::default()
        };
        let result = ZSpreadCalculator::new(&rates)
            .with_config(narrow)
            .calculate(&bond(), 94.50);
        assert!(result.is_approximated());
    }
}
