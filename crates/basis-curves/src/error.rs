//! Error types for curve operations.

use thiserror::Error;

/// A specialized Result type for curve operations.
pub type CurveResult<T> = Result<T, CurveError>;

/// Error types for curve operations.
///
/// Construction problems (bad tenors, non-positive spreads, recovery outside
/// [0, 1]) are validation failures; [`CurveError::Domain`] is raised by
/// queries whose arguments make no sense for any curve.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CurveError {
    /// Not enough data points.
    #[error("Insufficient points: need at least {required}, got {got}")]
    InsufficientPoints {
        /// Minimum required points.
        required: usize,
        /// Actual number of points provided.
        got: usize,
    },

    /// The same tenor appears twice.
    #[error("Duplicate tenor {tenor:.4}")]
    DuplicateTenor {
        /// The repeated tenor.
        tenor: f64,
    },

    /// Tenors are not strictly increasing.
    #[error("Non-monotonic tenors at index {index}: {prev:.4} >= {current:.4}")]
    NonMonotonicTenors {
        /// Index where monotonicity violation occurred.
        index: usize,
        /// Previous tenor value.
        prev: f64,
        /// Current tenor value.
        current: f64,
    },

    /// A default-swap spread is zero, negative or not finite.
    #[error("Invalid spread at tenor {tenor:.4}: {spread} bps (must be > 0)")]
    InvalidSpread {
        /// Tenor of the offending quote.
        tenor: f64,
        /// The quoted spread in basis points.
        spread: f64,
    },

    /// Recovery rate outside [0, 1].
    #[error("Recovery rate must be in [0, 1], got {value}")]
    InvalidRecovery {
        /// The rejected recovery rate.
        value: f64,
    },

    /// Query over an empty or reversed interval.
    #[error("Domain error: requires t2 > t1, got t1 = {t1}, t2 = {t2}")]
    Domain {
        /// Interval start.
        t1: f64,
        /// Interval end.
        t2: f64,
    },

    /// Invalid value (NaN, Inf, or out of bounds).
    #[error("Invalid value: {reason}")]
    InvalidValue {
        /// Description of why value is invalid.
        reason: String,
    },

    /// Mathematical error.
    #[error("Math error: {reason}")]
    MathError {
        /// Description of the mathematical error.
        reason: String,
    },
}

impl CurveError {
    /// Creates an insufficient points error.
    #[must_use]
    pub fn insufficient_points(required: usize, got: usize) -> Self {
        Self::InsufficientPoints { required, got }
    }

    /// Creates a non-monotonic tenors error.
    #[must_use]
    pub fn non_monotonic_tenors(index: usize, prev: f64, current: f64) -> Self {
        Self::NonMonotonicTenors {
            index,
            prev,
            current,
        }
    }

    /// Creates a domain error for the interval (t1, t2).
    #[must_use]
    pub fn domain(t1: f64, t2: f64) -> Self {
        Self::Domain { t1, t2 }
    }

    /// Creates an invalid value error.
    #[must_use]
    pub fn invalid_value(reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            reason: reason.into(),
        }
    }

    /// Creates a math error.
    #[must_use]
    pub fn math_error(reason: impl Into<String>) -> Self {
        Self::MathError {
            reason: reason.into(),
        }
    }

    /// True for errors caused by invalid construction inputs.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        !matches!(self, Self::Domain { .. } | Self::MathError { .. })
    }
}

impl From<basis_math::MathError> for CurveError {
    fn from(err: basis_math::MathError) -> Self {
        Self::math_error(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CurveError::domain(5.0, 3.0);
        let msg = err.to_string();
        assert!(msg.contains("t2 > t1"));
        assert!(!err.is_validation());
    }

    #[test]
    fn test_recovery_is_validation() {
        let err = CurveError::InvalidRecovery { value: 1.5 };
        assert!(err.is_validation());
        assert!(err.to_string().contains("1.5"));
    }

    #[test]
    fn test_non_monotonic_tenors() {
        let err = CurveError::non_monotonic_tenors(3, 2.0, 1.5);
        let msg = format!("{}", err);
        assert!(msg.contains("Non-monotonic"));
        assert!(msg.contains("index 3"));
    }

    #[test]
    fn test_from_math_error() {
        let err: CurveError = basis_math::MathError::insufficient_data(2, 1).into();
        assert!(matches!(err, CurveError::MathError { .. }));
    }
}
