//! Yield-to-maturity.
//!
//! The yield is the rate `y` that solves
//!
//! ```text
//! price = Σ CF_k / (1 + y/f)^(t_k · f)
//! ```
//!
//! with Newton-Raphson from the coupon rate. A failed solve does not abort
//! the analysis: the last iterate is returned with `converged = false`.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use basis_math::solvers::{newton_raphson_numerical, FiniteDifference, SolverConfig};
use basis_math::MathError;

use crate::bond::BondSpec;

/// Outcome of a yield solve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YieldResult {
    /// Yield to maturity, periodically compounded at the bond's frequency.
    pub yield_value: f64,
    /// Newton iterations used.
    pub iterations: u32,
    /// Price error at `yield_value`.
    pub residual: f64,
    /// False when the solver stopped without meeting the tolerance.
    pub converged: bool,
}

/// Newton solver for yield-to-maturity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct YieldSolver {
    /// Required |price(y) - price|.
    pub tolerance: f64,
    /// Iteration budget.
    pub max_iterations: u32,
    /// Forward-difference bump for the derivative.
    pub bump: f64,
    /// Smallest |dP/dy| the solver will divide by.
    pub derivative_floor: f64,
}

impl Default for YieldSolver {
    fn default() -> Self {
        Self {
            tolerance: 1e-6,
            max_iterations: 100,
            bump: 1e-6,
            derivative_floor: 1e-10,
        }
    }
}

impl YieldSolver {
    /// Creates a solver with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the price tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the iteration budget.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Price of the bond's payments at yield `y`.
    pub fn price_at_yield(bond: &BondSpec, y: f64) -> f64 {
        let f = bond.frequency_f64();
        let base = 1.0 + y / f;
        bond.cash_flows()
            .into_iter()
            .map(|(t, cf)| cf / base.powf(t * f))
            .sum()
    }

    /// Solves for the yield that reprices `bond` at `price`.
    pub fn solve(&self, bond: &BondSpec, price: f64) -> YieldResult {
        let objective = |y: f64| Self::price_at_yield(bond, y) - price;
        let config = SolverConfig::new(self.tolerance, self.max_iterations)
            .with_derivative_floor(self.derivative_floor);
        let guess = bond.coupon_rate();

        match newton_raphson_numerical(&objective, guess, FiniteDifference::Forward(self.bump), &config)
        {
            Ok(result) => {
                debug!("ytm {:.6} at price {price} in {} iterations", result.root, result.iterations);
                YieldResult {
                    yield_value: result.root,
                    iterations: result.iterations,
                    residual: result.residual,
                    converged: true,
                }
            }
            Err(err) => {
                let last = err.last_estimate().unwrap_or(guess);
                let iterations = match &err {
                    MathError::ConvergenceFailed { iterations, .. } => *iterations,
                    _ => 0,
                };
                warn!("ytm solve at price {price} did not converge ({err}); using {last:.6}");
                YieldResult {
                    yield_value: last,
                    iterations,
                    residual: objective(last),
                    converged: false,
                }
            }
        }
    }
}
