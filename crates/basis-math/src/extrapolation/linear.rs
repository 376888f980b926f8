//! Linear extrapolation.

use super::Extrapolator;

/// Continues the boundary slope: `y = y_b + slope * (t - t_b)`.
///
/// Can go negative for long horizons on downward-sloping curves.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinearExtrapolator;

impl Extrapolator for LinearExtrapolator {
    fn extrapolate(&self, t: f64, boundary_t: f64, boundary_value: f64, boundary_slope: f64) -> f64 {
        boundary_value + boundary_slope * (t - boundary_t)
    }

    fn name(&self) -> &'static str {
        "Linear"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_right_side() {
        let value = LinearExtrapolator.extrapolate(15.0, 10.0, 0.05, 0.001);
        assert_relative_eq!(value, 0.055, epsilon = 1e-12);
    }

    #[test]
    fn test_left_side() {
        let value = LinearExtrapolator.extrapolate(0.0, 0.25, 0.0495, -0.002);
        assert_relative_eq!(value, 0.05, epsilon = 1e-12);
    }
}
