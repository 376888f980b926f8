//! Interpolation and extrapolation policies for rate curves.
//!
//! The policies are plain enums so they can be read from configuration files;
//! [`InterpolationMethod::build`] and [`ExtrapolationMethod::build`] turn them
//! into the trait objects from `basis-math`.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use basis_math::extrapolation::{Extrapolator, FlatExtrapolator, LinearExtrapolator};
use basis_math::interpolation::{
    CubicSpline, Interpolator, LinearInterpolator, LogLinearInterpolator,
};

use crate::error::{CurveError, CurveResult};

/// How a rate curve fills the gaps between its knots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterpolationMethod {
    /// Straight lines between knots.
    #[default]
    Linear,
    /// Linear in the logarithm of the rate. Requires positive rates.
    LogLinear,
    /// Natural cubic spline.
    CubicSpline,
}

impl InterpolationMethod {
    /// Builds an interpolator over the given knots.
    ///
    /// A cubic spline through two knots is the straight line between them,
    /// so two-point curves get a linear interpolator.
    pub fn build(self, xs: Vec<f64>, ys: Vec<f64>) -> CurveResult<Arc<dyn Interpolator>> {
        let interpolator: Arc<dyn Interpolator> = match self {
            Self::Linear => Arc::new(LinearInterpolator::new(xs, ys)?),
            Self::LogLinear => Arc::new(LogLinearInterpolator::new(xs, ys)?),
            Self::CubicSpline if xs.len() < 3 => Arc::new(LinearInterpolator::new(xs, ys)?),
            Self::CubicSpline => Arc::new(CubicSpline::new(xs, ys)?),
        };
        Ok(interpolator)
    }
}

impl fmt::Display for InterpolationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Linear => "linear",
            Self::LogLinear => "log_linear",
            Self::CubicSpline => "cubic_spline",
        };
        f.write_str(name)
    }
}

impl FromStr for InterpolationMethod {
    type Err = CurveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "linear" => Ok(Self::Linear),
            "log_linear" | "loglinear" => Ok(Self::LogLinear),
            "cubic_spline" | "cubic" | "spline" => Ok(Self::CubicSpline),
            other => Err(CurveError::invalid_value(format!(
                "unknown interpolation method '{other}'"
            ))),
        }
    }
}

/// What a rate curve returns outside its quoted tenors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtrapolationMethod {
    /// Hold the boundary rate.
    #[default]
    Flat,
    /// Continue the boundary slope.
    Linear,
}

impl ExtrapolationMethod {
    /// Builds the extrapolator for this policy.
    pub fn build(self) -> Arc<dyn Extrapolator> {
        match self {
            Self::Flat => Arc::new(FlatExtrapolator),
            Self::Linear => Arc::new(LinearExtrapolator),
        }
    }
}

impl fmt::Display for ExtrapolationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flat => f.write_str("flat"),
            Self::Linear => f.write_str("linear"),
        }
    }
}

impl FromStr for ExtrapolationMethod {
    type Err = CurveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "flat" => Ok(Self::Flat),
            "linear" => Ok(Self::Linear),
            other => Err(CurveError::invalid_value(format!(
                "unknown extrapolation method '{other}'"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trips_display() {
        for method in [
            InterpolationMethod::Linear,
            InterpolationMethod::LogLinear,
            InterpolationMethod::CubicSpline,
        ] {
            assert_eq!(method.to_string().parse::<InterpolationMethod>().unwrap(), method);
        }
        assert_eq!("FLAT".parse::<ExtrapolationMethod>().unwrap(), ExtrapolationMethod::Flat);
        assert!("quadratic".parse::<InterpolationMethod>().is_err());
    }

    #[test]
    fn test_spline_with_two_knots_is_linear() {
        let interp = InterpolationMethod::CubicSpline
            .build(vec![1.0, 2.0], vec![0.04, 0.05])
            .unwrap();
        assert_eq!(interp.name(), "Linear");
        assert!((interp.interpolate(1.5) - 0.045).abs() < 1e-15);
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&InterpolationMethod::LogLinear).unwrap();
        assert_eq!(json, "\"log_linear\"");
        let method: ExtrapolationMethod = serde_json::from_str("\"linear\"").unwrap();
        assert_eq!(method, ExtrapolationMethod::Linear);
    }
}
