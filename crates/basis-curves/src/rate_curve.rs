//! Risk-free zero-rate curve.

use std::sync::Arc;

use basis_math::extrapolation::Extrapolator;
use basis_math::interpolation::Interpolator;

use crate::error::CurveResult;
use crate::interpolation::{ExtrapolationMethod, InterpolationMethod};
use crate::points::sorted_points;
use crate::traits::DiscountCurve;

/// A tenor → continuously-compounded zero-rate curve.
///
/// Between knots the configured [`InterpolationMethod`] applies; before the
/// first and after the last knot the [`ExtrapolationMethod`] does. A curve
/// with a single knot is flat at that rate.
///
/// # Example
///
/// ```rust
/// use basis_curves::prelude::*;
///
/// let curve = RateCurve::new([(1.0, 0.048), (2.0, 0.046)]).unwrap();
/// assert!((curve.rate(1.5) - 0.047).abs() < 1e-12);
/// assert_eq!(curve.rate(30.0), 0.046);
/// ```
#[derive(Clone, Debug)]
pub struct RateCurve {
    tenors: Vec<f64>,
    rates: Vec<f64>,
    interpolation: InterpolationMethod,
    extrapolation: ExtrapolationMethod,
    interpolator: Option<Arc<dyn Interpolator>>,
    extrapolator: Arc<dyn Extrapolator>,
}

impl RateCurve {
    /// Creates a curve with linear interpolation and flat extrapolation.
    pub fn new<I>(points: I) -> CurveResult<Self>
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        Self::with_methods(points, InterpolationMethod::Linear, ExtrapolationMethod::Flat)
    }

    /// Creates a curve with explicit interpolation and extrapolation policies.
    ///
    /// Points may arrive in any order. Tenors must be positive and distinct
    /// and rates finite; log-linear interpolation also needs positive rates.
    pub fn with_methods<I>(
        points: I,
        interpolation: InterpolationMethod,
        extrapolation: ExtrapolationMethod,
    ) -> CurveResult<Self>
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        let (tenors, rates) = sorted_points(points, "rate")?;
        let interpolator = if tenors.len() > 1 {
            Some(interpolation.build(tenors.clone(), rates.clone())?)
        } else {
            None
        };

        Ok(Self {
            tenors,
            rates,
            interpolation,
            extrapolation,
            interpolator,
            extrapolator: extrapolation.build(),
        })
    }

    /// Knot tenors in ascending order.
    pub fn tenors(&self) -> &[f64] {
        &self.tenors
    }

    /// Knot rates, aligned with [`tenors`](Self::tenors).
    pub fn rates(&self) -> &[f64] {
        &self.rates
    }

    /// Iterates over `(tenor, rate)` knots.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.tenors.iter().copied().zip(self.rates.iter().copied())
    }

    /// Interpolation policy.
    pub fn interpolation(&self) -> InterpolationMethod {
        self.interpolation
    }

    /// Extrapolation policy.
    pub fn extrapolation(&self) -> ExtrapolationMethod {
        self.extrapolation
    }

    /// Zero rate at `t`.
    pub fn rate(&self, t: f64) -> f64 {
        let Some(interpolator) = &self.interpolator else {
            return self.rates[0];
        };

        let last = self.tenors.len() - 1;
        let (first_t, last_t) = (self.tenors[0], self.tenors[last]);
        if t < first_t {
            self.extrapolator
                .extrapolate(t, first_t, self.rates[0], interpolator.derivative(first_t))
        } else if t > last_t {
            self.extrapolator
                .extrapolate(t, last_t, self.rates[last], interpolator.derivative(last_t))
        } else {
            interpolator.interpolate(t)
        }
    }
}

impl DiscountCurve for RateCurve {
    fn rate(&self, t: f64) -> f64 {
        RateCurve::rate(self, t)
    }
}
