//! Flat (constant) extrapolation.

use super::Extrapolator;

/// Flat extrapolation: the boundary value applies everywhere beyond it.
///
/// # Example
///
/// ```rust
/// use basis_math::extrapolation::{Extrapolator, FlatExtrapolator};
///
/// let rate = FlatExtrapolator.extrapolate(40.0, 30.0, 0.045, 0.001);
/// assert_eq!(rate, 0.045);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct FlatExtrapolator;

impl Extrapolator for FlatExtrapolator {
    fn extrapolate(&self, _t: f64, _boundary_t: f64, boundary_value: f64, _slope: f64) -> f64 {
        boundary_value
    }

    fn name(&self) -> &'static str {
        "Flat"
    }
}
