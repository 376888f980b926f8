//! One-dimensional root finders used by the curve and spread solvers.
//!
//! - [`newton_raphson_numerical`]: Newton with a [`FiniteDifference`] derivative
//! - [`brent`]: bracketed, guaranteed convergence when the bracket is valid
//!
//! Newton is used where a good starting point exists (hazard nodes, yields);
//! Brent where only a bracket is known (z-spread).
//!
//! # Example
//!
//! ```rust
//! use basis_math::solvers::{brent, SolverConfig};
//!
//! // Flat 4% curve, 5y annual 5% bond trading at 97: find the spread.
//! let price = |z: f64| {
//!     (1..=5).map(|t| {
//!         let t = f64::from(t);
//!         let cf = if t == 5.0 { 105.0 } else { 5.0 };
//!         cf * (-(0.04 + z) * t).exp()
//!     }).sum::<f64>()
//! };
//!
//! let result = brent(|z| price(z) - 97.0, -0.05, 0.20, &SolverConfig::default()).unwrap();
//! assert!(result.root > 0.0);
//! ```

mod brent;
mod newton;

pub use brent::brent;
pub use newton::newton_raphson_numerical;

/// Tolerance used when none is configured.
pub const DEFAULT_TOLERANCE: f64 = 1e-10;

/// Iteration cap used when none is configured.
pub const DEFAULT_MAX_ITERATIONS: u32 = 100;

/// Smallest derivative magnitude a Newton step will divide by.
pub const DEFAULT_DERIVATIVE_FLOOR: f64 = 1e-15;

/// Stopping rules shared by all solvers.
///
/// `tolerance` is a residual tolerance for Newton (|f(x)| below it stops the
/// iteration) and an abscissa tolerance for Brent (bracket width).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig {
    /// Residual (Newton) or bracket-width (Brent) tolerance.
    pub tolerance: f64,
    /// Iteration cap.
    pub max_iterations: u32,
    /// Newton aborts when |f'(x)| falls below this value.
    pub derivative_floor: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            derivative_floor: DEFAULT_DERIVATIVE_FLOOR,
        }
    }
}

impl SolverConfig {
    /// Tolerance and cap, default derivative floor.
    #[must_use]
    pub fn new(tolerance: f64, max_iterations: u32) -> Self {
        Self {
            tolerance,
            max_iterations,
            ..Self::default()
        }
    }

    /// Replaces the tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Replaces the iteration cap.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Sets the derivative floor used by Newton.
    #[must_use]
    pub fn with_derivative_floor(mut self, floor: f64) -> Self {
        self.derivative_floor = floor;
        self
    }
}

/// A converged root.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverResult {
    /// Abscissa of the root.
    pub root: f64,
    /// Iterations taken.
    pub iterations: u32,
    /// f(root).
    pub residual: f64,
}

/// Finite-difference scheme used to approximate a derivative.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FiniteDifference {
    /// `(f(x + h) - f(x)) / h`
    Forward(f64),
    /// `(f(x + h) - f(x - h)) / 2h`
    Central(f64),
}

impl Default for FiniteDifference {
    fn default() -> Self {
        Self::Central(1e-8)
    }
}

impl FiniteDifference {
    /// Estimates f'(x). `fx` is f(x), reused by the forward scheme.
    pub fn derivative<F>(&self, f: &F, x: f64, fx: f64) -> f64
    where
        F: Fn(f64) -> f64,
    {
        match *self {
            Self::Forward(h) => (f(x + h) - fx) / h,
            Self::Central(h) => (f(x + h) - f(x - h)) / (2.0 * h),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_solver_config() {
        let config = SolverConfig::default()
            .with_tolerance(1e-8)
            .with_max_iterations(50)
            .with_derivative_floor(1e-10);

        assert_relative_eq!(config.tolerance, 1e-8);
        assert_eq!(config.max_iterations, 50);
        assert_relative_eq!(config.derivative_floor, 1e-10);
    }

    #[test]
    fn test_finite_differences() {
        let f = |x: f64| x * x * x;
        let x = 2.0;

        let forward = FiniteDifference::Forward(1e-6).derivative(&f, x, f(x));
        let central = FiniteDifference::Central(1e-6).derivative(&f, x, f(x));

        assert_relative_eq!(forward, 12.0, epsilon = 1e-4);
        assert_relative_eq!(central, 12.0, epsilon = 1e-8);
        assert!((central - 12.0).abs() < (forward - 12.0).abs());
    }

    /// Price of an annual-pay bond under a flat continuously compounded rate.
    fn bond_price(rate: f64, coupon: f64, years: u32) -> f64 {
        (1..=years)
            .map(|k| {
                let t = f64::from(k);
                let cf = if k == years { coupon + 100.0 } else { coupon };
                cf * (-rate * t).exp()
            })
            .sum()
    }

    #[test]
    fn test_newton_and_brent_agree_on_bond_yield() {
        let target = 98.0;
        let f = |y: f64| bond_price(y, 6.0, 7) - target;
        let config = SolverConfig::default();

        let newton = newton_raphson_numerical(f, 0.06, FiniteDifference::default(), &config).unwrap();
        let bracketed = brent(f, 0.0, 0.20, &config).unwrap();

        assert_relative_eq!(newton.root, bracketed.root, epsilon = 1e-8);
    }
}
