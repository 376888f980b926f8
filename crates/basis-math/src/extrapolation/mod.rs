//! Extrapolation methods for term structures.
//!
//! - [`FlatExtrapolator`]: holds the boundary value
//! - [`LinearExtrapolator`]: continues the boundary slope
//!
//! Both work on either side of the knot range; the caller passes the
//! boundary it is extending from.

mod flat;
mod linear;

pub use flat::FlatExtrapolator;
pub use linear::LinearExtrapolator;

/// Trait for extrapolation methods.
pub trait Extrapolator: Send + Sync + std::fmt::Debug {
    /// Extrapolates to `t` from a boundary knot.
    ///
    /// # Arguments
    ///
    /// * `t` - Target abscissa
    /// * `boundary_t` - Abscissa of the nearest knot
    /// * `boundary_value` - Value at that knot
    /// * `boundary_slope` - Derivative at that knot
    fn extrapolate(&self, t: f64, boundary_t: f64, boundary_value: f64, boundary_slope: f64)
        -> f64;

    /// Returns the name of the extrapolation method.
    fn name(&self) -> &'static str;
}
