//! Linear interpolation.

use crate::error::MathResult;
use crate::interpolation::{Interpolator, Knots};

/// Linear interpolation between data points.
///
/// # Example
///
/// ```rust
/// use basis_math::interpolation::{Interpolator, LinearInterpolator};
///
/// let interp = LinearInterpolator::new(vec![1.0, 2.0], vec![0.048, 0.046]).unwrap();
/// assert!((interp.interpolate(1.5) - 0.047).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct LinearInterpolator {
    knots: Knots,
}

impl LinearInterpolator {
    /// Creates a new linear interpolator.
    ///
    /// # Errors
    ///
    /// Returns an error if there are fewer than 2 points, lengths differ,
    /// values are not finite, or `xs` is not strictly increasing.
    pub fn new(xs: Vec<f64>, ys: Vec<f64>) -> MathResult<Self> {
        Ok(Self {
            knots: Knots::new(xs, ys, 2)?,
        })
    }

    fn slope(&self, i: usize) -> f64 {
        let Knots { xs, ys } = &self.knots;
        (ys[i + 1] - ys[i]) / (xs[i + 1] - xs[i])
    }
}

impl Interpolator for LinearInterpolator {
    fn interpolate(&self, x: f64) -> f64 {
        let i = self.knots.segment(x);
        self.knots.ys[i] + self.slope(i) * (x - self.knots.xs[i])
    }

    fn derivative(&self, x: f64) -> f64 {
        self.slope(self.knots.segment(x))
    }

    fn min_x(&self) -> f64 {
        self.knots.first_x()
    }

    fn max_x(&self) -> f64 {
        self.knots.last_x()
    }

    fn name(&self) -> &'static str {
        "Linear"
    }
}
