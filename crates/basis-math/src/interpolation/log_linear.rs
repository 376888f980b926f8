//! Log-linear interpolation.

use crate::error::{MathError, MathResult};
use crate::interpolation::{Interpolator, Knots};

/// Interpolates `ln(y)` linearly and exponentiates.
///
/// Values stay strictly positive. Applied to discount factors this gives
/// piecewise constant forward rates; applied to rates it gives a
/// geometric blend between knots.
#[derive(Debug, Clone)]
pub struct LogLinearInterpolator {
    /// Knots on the log scale.
    log_knots: Knots,
}

impl LogLinearInterpolator {
    /// Creates a new log-linear interpolator.
    ///
    /// # Errors
    ///
    /// Returns an error under the same conditions as
    /// [`LinearInterpolator::new`](super::LinearInterpolator::new), or if any
    /// y value is not strictly positive.
    pub fn new(xs: Vec<f64>, ys: Vec<f64>) -> MathResult<Self> {
        if let Some((i, y)) = ys.iter().enumerate().find(|(_, y)| **y <= 0.0) {
            return Err(MathError::invalid_input(format!(
                "y[{i}] = {y} is not positive; log-linear requires positive values"
            )));
        }
        let log_ys = ys.iter().map(|y| y.ln()).collect();

        Ok(Self {
            log_knots: Knots::new(xs, log_ys, 2)?,
        })
    }

    fn log_slope(&self, i: usize) -> f64 {
        let Knots { xs, ys } = &self.log_knots;
        (ys[i + 1] - ys[i]) / (xs[i + 1] - xs[i])
    }
}

impl Interpolator for LogLinearInterpolator {
    fn interpolate(&self, x: f64) -> f64 {
        let i = self.log_knots.segment(x);
        (self.log_knots.ys[i] + self.log_slope(i) * (x - self.log_knots.xs[i])).exp()
    }

    fn derivative(&self, x: f64) -> f64 {
        // d/dx exp(g(x)) = exp(g(x)) * g'(x)
        self.interpolate(x) * self.log_slope(self.log_knots.segment(x))
    }

    fn min_x(&self) -> f64 {
        self.log_knots.first_x()
    }

    fn max_x(&self) -> f64 {
        self.log_knots.last_x()
    }

    fn name(&self) -> &'static str {
        "Log-Linear"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_geometric_midpoint() {
        let interp = LogLinearInterpolator::new(vec![0.0, 2.0], vec![1.0, 0.81]).unwrap();

        assert_relative_eq!(interp.interpolate(1.0), 0.9, epsilon = 1e-12);
    }

    #[test]
    fn test_constant_forward_on_discount_factors() {
        let rate: f64 = 0.04;
        let times = vec![1.0, 2.0, 5.0];
        let dfs = times.iter().map(|t: &f64| (-rate * t).exp()).collect();
        let interp = LogLinearInterpolator::new(times, dfs).unwrap();

        // -d ln(DF)/dt is the instantaneous forward rate
        let fwd = -interp.derivative(3.0) / interp.interpolate(3.0);
        assert_relative_eq!(fwd, rate, epsilon = 1e-12);
    }

    #[test]
    fn test_rejects_non_positive() {
        let err = LogLinearInterpolator::new(vec![1.0, 2.0], vec![0.5, 0.0]).unwrap_err();
        assert!(err.to_string().contains("not positive"));
    }
}
