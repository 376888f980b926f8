//! Error types for numerical routines.

use thiserror::Error;

/// A specialized Result type for numerical routines.
pub type MathResult<T> = Result<T, MathError>;

/// Errors raised by solvers and interpolators.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    /// Iteration budget exhausted before the residual met the tolerance.
    #[error("Convergence failed after {iterations} iterations (residual: {residual:.2e}, last estimate: {last_estimate})")]
    ConvergenceFailed {
        /// Number of iterations attempted.
        iterations: u32,
        /// Absolute residual at the last estimate.
        residual: f64,
        /// The last iterate the solver reached.
        last_estimate: f64,
    },

    /// The bracket endpoints do not straddle a root.
    #[error("Invalid bracket: f({a}) = {fa:.2e} and f({b}) = {fb:.2e} have same sign")]
    InvalidBracket {
        /// Lower bound of bracket.
        a: f64,
        /// Upper bound of bracket.
        b: f64,
        /// Function value at a.
        fa: f64,
        /// Function value at b.
        fb: f64,
    },

    /// Derivative too small to take a Newton step.
    #[error("Derivative {value:.2e} below threshold at x = {at}")]
    DivisionByZero {
        /// The near-zero derivative.
        value: f64,
        /// Point at which it was evaluated.
        at: f64,
    },

    /// Insufficient data points for operation.
    #[error("Insufficient data: need at least {required}, got {actual}")]
    InsufficientData {
        /// Minimum required points.
        required: usize,
        /// Actual number of points.
        actual: usize,
    },

    /// Invalid input parameter.
    #[error("Invalid input: {reason}")]
    InvalidInput {
        /// Description of the invalid input.
        reason: String,
    },
}

impl MathError {
    /// Creates a convergence failed error.
    #[must_use]
    pub fn convergence_failed(iterations: u32, residual: f64, last_estimate: f64) -> Self {
        Self::ConvergenceFailed {
            iterations,
            residual,
            last_estimate,
        }
    }

    /// Creates an invalid input error.
    #[must_use]
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    /// Creates an insufficient data error.
    #[must_use]
    pub fn insufficient_data(required: usize, actual: usize) -> Self {
        Self::InsufficientData { required, actual }
    }

    /// The last point an iterative solver reached before giving up, if any.
    ///
    /// Callers that prefer an approximate answer over an error use this to
    /// recover the final iterate.
    #[must_use]
    pub fn last_estimate(&self) -> Option<f64> {
        match self {
            Self::ConvergenceFailed { last_estimate, .. } => Some(*last_estimate),
            Self::DivisionByZero { at, .. } => Some(*at),
            _ => None,
        }
    }
}
