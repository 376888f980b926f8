//! Interpolation methods for term-structure construction.
//!
//! - [`LinearInterpolator`]: straight lines between knots
//! - [`LogLinearInterpolator`]: linear in `ln(y)`, keeps values positive
//! - [`CubicSpline`]: natural cubic spline, C2 smooth
//!
//! Interpolators only answer questions about the knot range. Outside
//! `[min_x, max_x]` they continue their boundary segment; what a curve does
//! out there is decided by an [`Extrapolator`](crate::extrapolation::Extrapolator).

mod cubic_spline;
mod linear;
mod log_linear;

pub use cubic_spline::CubicSpline;
pub use linear::LinearInterpolator;
pub use log_linear::LogLinearInterpolator;

use crate::error::{MathError, MathResult};

/// Trait for interpolation methods.
pub trait Interpolator: Send + Sync + std::fmt::Debug {
    /// Returns the interpolated value at x.
    fn interpolate(&self, x: f64) -> f64;

    /// Returns the first derivative at x.
    fn derivative(&self, x: f64) -> f64;

    /// Returns the minimum x value in the data.
    fn min_x(&self) -> f64;

    /// Returns the maximum x value in the data.
    fn max_x(&self) -> f64;

    /// Short name of the method.
    fn name(&self) -> &'static str;

    /// Checks if x is within the interpolation range.
    fn in_range(&self, x: f64) -> bool {
        x >= self.min_x() && x <= self.max_x()
    }
}

/// Validated knot vectors shared by the interpolators.
#[derive(Debug, Clone)]
pub(crate) struct Knots {
    pub(crate) xs: Vec<f64>,
    pub(crate) ys: Vec<f64>,
}

impl Knots {
    pub(crate) fn new(xs: Vec<f64>, ys: Vec<f64>, min_points: usize) -> MathResult<Self> {
        if xs.len() < min_points {
            return Err(MathError::insufficient_data(min_points, xs.len()));
        }
        if xs.len() != ys.len() {
            return Err(MathError::invalid_input(format!(
                "xs and ys must have same length: {} vs {}",
                xs.len(),
                ys.len()
            )));
        }
        if let Some(bad) = xs.iter().chain(ys.iter()).find(|v| !v.is_finite()) {
            return Err(MathError::invalid_input(format!(
                "non-finite knot value {bad}"
            )));
        }
        if xs.windows(2).any(|w| w[1] <= w[0]) {
            return Err(MathError::invalid_input(
                "x values must be strictly increasing",
            ));
        }

        Ok(Self { xs, ys })
    }

    /// Index i of the segment [xs[i], xs[i+1]] used for x, clamped to the
    /// first and last segments.
    pub(crate) fn segment(&self, x: f64) -> usize {
        let upper = self.xs.partition_point(|&k| k <= x);
        upper.saturating_sub(1).min(self.xs.len() - 2)
    }

    pub(crate) fn first_x(&self) -> f64 {
        self.xs[0]
    }

    pub(crate) fn last_x(&self) -> f64 {
        self.xs[self.xs.len() - 1]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn test_segment_lookup() {
        let knots = Knots::new(vec![1.0, 2.0, 4.0, 8.0], vec![0.0; 4], 2).unwrap();

        assert_eq!(knots.segment(0.5), 0);
        assert_eq!(knots.segment(1.0), 0);
        assert_eq!(knots.segment(2.0), 1);
        assert_eq!(knots.segment(3.9), 1);
        assert_eq!(knots.segment(8.0), 2);
        assert_eq!(knots.segment(100.0), 2);
    }

    #[test]
    fn test_knot_validation() {
        assert!(Knots::new(vec![1.0], vec![1.0], 2).is_err());
        assert!(Knots::new(vec![1.0, 2.0], vec![1.0], 2).is_err());
        assert!(Knots::new(vec![2.0, 1.0], vec![1.0, 1.0], 2).is_err());
        assert!(Knots::new(vec![1.0, 1.0], vec![1.0, 1.0], 2).is_err());
        assert!(Knots::new(vec![1.0, 2.0], vec![f64::NAN, 1.0], 2).is_err());
    }

    #[test]
    fn test_all_interpolators_through_points() {
        let times = vec![0.5, 1.0, 2.0, 3.0, 5.0];
        let rates = vec![0.02, 0.025, 0.03, 0.035, 0.04];

        let linear = LinearInterpolator::new(times.clone(), rates.clone()).unwrap();
        let log_linear = LogLinearInterpolator::new(times.clone(), rates.clone()).unwrap();
        let spline = CubicSpline::new(times.clone(), rates.clone()).unwrap();

        let methods: [&dyn Interpolator; 3] = [&linear, &log_linear, &spline];
        for method in methods {
            for (t, r) in times.iter().zip(rates.iter()) {
                assert_relative_eq!(method.interpolate(*t), *r, epsilon = 1e-12);
            }
            assert_relative_eq!(method.min_x(), 0.5);
            assert_relative_eq!(method.max_x(), 5.0);
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn prop_linear_stays_between_neighbours(
            y0 in -0.05f64..0.10,
            y1 in -0.05f64..0.10,
            frac in 0.0f64..=1.0,
        ) {
            let interp = LinearInterpolator::new(vec![1.0, 3.0], vec![y0, y1]).unwrap();
            let value = interp.interpolate(1.0 + 2.0 * frac);

            prop_assert!(value >= y0.min(y1) - 1e-15);
            prop_assert!(value <= y0.max(y1) + 1e-15);
        }
    }
}
