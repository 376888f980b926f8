//! Curve traits.
//!
//! Pricing code is written against these traits rather than concrete curves,
//! so a hazard curve under calibration and a finished one look the same to
//! the leg valuation.

use crate::error::{CurveError, CurveResult};
use crate::hazard::MAX_HAZARD;

/// A continuously-compounded zero-rate curve.
pub trait DiscountCurve: Send + Sync {
    /// Zero rate at time `t` (years).
    fn rate(&self, t: f64) -> f64;

    /// Discount factor `exp(-r(t) * t)`.
    fn discount_factor(&self, t: f64) -> f64 {
        (-self.rate(t) * t).exp()
    }
}

/// A survival-probability term structure.
pub trait SurvivalCurve: Send + Sync {
    /// Probability of no default before `t`. Equals 1 for `t <= 0`.
    fn survival(&self, t: f64) -> f64;

    /// Probability of default before `t`, `1 - S(t)`.
    fn default_probability(&self, t: f64) -> f64 {
        1.0 - self.survival(t)
    }

    /// Average hazard rate over `(t1, t2]`: `ln(S(t1) / S(t2)) / (t2 - t1)`.
    ///
    /// Returns [`MAX_HAZARD`] once survival at `t2` has reached zero.
    fn forward_hazard(&self, t1: f64, t2: f64) -> CurveResult<f64> {
        if !(t2 > t1) {
            return Err(CurveError::domain(t1, t2));
        }
        let s1 = self.survival(t1);
        let s2 = self.survival(t2);
        if s2 <= 0.0 {
            return Ok(MAX_HAZARD);
        }
        Ok((s1 / s2).ln() / (t2 - t1))
    }

    /// Probability of default in `(t1, t2]` given survival to `t1`.
    fn conditional_default_probability(&self, t1: f64, t2: f64) -> CurveResult<f64> {
        if !(t2 > t1) {
            return Err(CurveError::domain(t1, t2));
        }
        let s1 = self.survival(t1);
        if s1 <= 0.0 {
            return Ok(1.0);
        }
        Ok(1.0 - self.survival(t2) / s1)
    }
}
