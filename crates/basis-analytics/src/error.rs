//! Error types for the analytics layer.
//!
//! Curve and solver errors are folded into string variants so callers only
//! match on one enum. Curve construction failures stay classified as
//! validation errors.

use thiserror::Error;

use basis_curves::CurveError;
use basis_math::MathError;

/// Error type for all analytics operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AnalyticsError {
    /// Invalid inputs: bond terms, recovery, curves, shocked spreads.
    #[error("validation failed: {0}")]
    Validation(String),

    /// A required snapshot field is missing or malformed.
    #[error("invalid snapshot: {0}")]
    InvalidSnapshot(String),

    /// A forced reference tenor is not quoted on the default-swap curve.
    #[error("reference tenor {tenor}y is not quoted on the CDS curve (available: {available:?})")]
    UnknownReferenceTenor {
        /// Requested tenor.
        tenor: f64,
        /// Quoted tenors.
        available: Vec<f64>,
    },

    /// A query outside the domain of a curve.
    #[error("domain error: {0}")]
    Domain(String),

    /// Curve error.
    #[error("curve error: {0}")]
    CurveError(String),

    /// Math/solver error.
    #[error("math error: {0}")]
    MathError(String),
}

/// Result type alias for analytics operations.
pub type AnalyticsResult<T> = Result<T, AnalyticsError>;

impl AnalyticsError {
    /// Creates a validation error.
    #[must_use]
    pub fn validation(reason: impl Into<String>) -> Self {
        Self::Validation(reason.into())
    }

    /// Creates an invalid snapshot error.
    #[must_use]
    pub fn invalid_snapshot(reason: impl Into<String>) -> Self {
        Self::InvalidSnapshot(reason.into())
    }

    /// True for errors caused by bad inputs rather than numerical trouble.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::Validation(_) | Self::InvalidSnapshot(_) | Self::UnknownReferenceTenor { .. }
        )
    }
}

impl From<CurveError> for AnalyticsError {
    fn from(err: CurveError) -> Self {
        match err {
            CurveError::Domain { .. } => Self::Domain(err.to_string()),
            CurveError::MathError { .. } => Self::CurveError(err.to_string()),
            _ => Self::Validation(err.to_string()),
        }
    }
}

impl From<MathError> for AnalyticsError {
    fn from(err: MathError) -> Self {
        Self::MathError(err.to_string())
    }
}

impl From<serde_json::Error> for AnalyticsError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidSnapshot(err.to_string())
    }
}
