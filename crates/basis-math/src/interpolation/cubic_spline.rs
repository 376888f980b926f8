//! Natural cubic spline interpolation.

use crate::error::MathResult;
use crate::interpolation::{Interpolator, Knots};

/// Natural cubic spline interpolation.
///
/// Piecewise cubic polynomials with continuous first and second
/// derivatives; the second derivative is zero at both end knots.
///
/// # Example
///
/// ```rust
/// use basis_math::interpolation::{CubicSpline, Interpolator};
///
/// let spline = CubicSpline::new(vec![1.0, 2.0, 5.0, 10.0], vec![0.048, 0.046, 0.044, 0.0425]).unwrap();
/// let r = spline.interpolate(3.0);
/// assert!(r < 0.046 && r > 0.044);
/// ```
#[derive(Debug, Clone)]
pub struct CubicSpline {
    knots: Knots,
    /// Second derivatives at each knot.
    curvature: Vec<f64>,
}

impl CubicSpline {
    /// Creates a natural cubic spline.
    ///
    /// # Errors
    ///
    /// Returns an error if there are fewer than 3 points, lengths differ,
    /// values are not finite, or `xs` is not strictly increasing.
    pub fn new(xs: Vec<f64>, ys: Vec<f64>) -> MathResult<Self> {
        let knots = Knots::new(xs, ys, 3)?;
        let curvature = natural_second_derivatives(&knots.xs, &knots.ys);
        Ok(Self { knots, curvature })
    }

    /// Local coordinates of x within segment i: (h, a, b) with a + b = 1.
    fn local(&self, i: usize, x: f64) -> (f64, f64, f64) {
        let h = self.knots.xs[i + 1] - self.knots.xs[i];
        let a = (self.knots.xs[i + 1] - x) / h;
        let b = (x - self.knots.xs[i]) / h;
        (h, a, b)
    }
}

/// Solves the tridiagonal system for a natural spline.
fn natural_second_derivatives(xs: &[f64], ys: &[f64]) -> Vec<f64> {
    let n = xs.len();
    let mut y2 = vec![0.0; n];
    let mut u = vec![0.0; n];

    for i in 1..n - 1 {
        let sig = (xs[i] - xs[i - 1]) / (xs[i + 1] - xs[i - 1]);
        let p = sig * y2[i - 1] + 2.0;
        y2[i] = (sig - 1.0) / p;
        let dy = (ys[i + 1] - ys[i]) / (xs[i + 1] - xs[i]) - (ys[i] - ys[i - 1]) / (xs[i] - xs[i - 1]);
        u[i] = (6.0 * dy / (xs[i + 1] - xs[i - 1]) - sig * u[i - 1]) / p;
    }

    y2[n - 1] = 0.0;
    for k in (0..n - 1).rev() {
        y2[k] = y2[k] * y2[k + 1] + u[k];
    }
    y2
}

impl Interpolator for CubicSpline {
    fn interpolate(&self, x: f64) -> f64 {
        let i = self.knots.segment(x);
        let (h, a, b) = self.local(i, x);
        let (y0, y1) = (self.knots.ys[i], self.knots.ys[i + 1]);
        let (c0, c1) = (self.curvature[i], self.curvature[i + 1]);

        a * y0 + b * y1 + ((a * a * a - a) * c0 + (b * b * b - b) * c1) * h * h / 6.0
    }

    fn derivative(&self, x: f64) -> f64 {
        let i = self.knots.segment(x);
        let (h, a, b) = self.local(i, x);
        let (y0, y1) = (self.knots.ys[i], self.knots.ys[i + 1]);
        let (c0, c1) = (self.curvature[i], self.curvature[i + 1]);

        (y1 - y0) / h - (3.0 * a * a - 1.0) / 6.0 * h * c0 + (3.0 * b * b - 1.0) / 6.0 * h * c1
    }

    fn min_x(&self) -> f64 {
        self.knots.first_x()
    }

    fn max_x(&self) -> f64 {
        self.knots.last_x()
    }

    fn name(&self) -> &'static str {
        "Cubic Spline"
    }
}
