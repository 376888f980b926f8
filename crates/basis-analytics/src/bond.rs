//! Fixed-coupon bullet bond terms.

use serde::{Deserialize, Serialize};

use crate::error::{AnalyticsError, AnalyticsResult};

/// Terms of a fixed-coupon bullet bond with a recovery assumption.
///
/// Times are measured in years from valuation; coupons fall on `k / frequency`
/// for `k = 1..=ceil(maturity · frequency)`, so a stub maturity rounds the
/// last coupon date up.
///
/// # Example
///
/// ```rust
/// use basis_analytics::bond::BondSpec;
///
/// let bond = BondSpec::new(0.052, 7.0, 2, 100.0, 0.40).unwrap();
/// assert_eq!(bond.payment_count(), 14);
/// assert!((bond.coupon_amount() - 2.6).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BondSpec {
    coupon_rate: f64,
    maturity: f64,
    frequency: u32,
    face_value: f64,
    recovery_rate: f64,
}

impl BondSpec {
    /// Creates validated bond terms.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::Validation`] if the coupon is negative or not
    /// finite, maturity or face is not positive, frequency is zero, or the
    /// recovery rate is outside [0, 1].
    pub fn new(
        coupon_rate: f64,
        maturity: f64,
        frequency: u32,
        face_value: f64,
        recovery_rate: f64,
    ) -> AnalyticsResult<Self> {
        if !coupon_rate.is_finite() || coupon_rate < 0.0 {
            return Err(AnalyticsError::validation(format!(
                "coupon rate must be finite and non-negative, got {coupon_rate}"
            )));
        }
        if !maturity.is_finite() || maturity <= 0.0 {
            return Err(AnalyticsError::validation(format!(
                "maturity must be positive, got {maturity}"
            )));
        }
        if frequency == 0 {
            return Err(AnalyticsError::validation("payment frequency must be at least 1"));
        }
        if !face_value.is_finite() || face_value <= 0.0 {
            return Err(AnalyticsError::validation(format!(
                "face value must be positive, got {face_value}"
            )));
        }
        if !(0.0..=1.0).contains(&recovery_rate) {
            return Err(AnalyticsError::validation(format!(
                "recovery rate must be in [0, 1], got {recovery_rate}"
            )));
        }

        Ok(Self {
            coupon_rate,
            maturity,
            frequency,
            face_value,
            recovery_rate,
        })
    }

    /// Annual coupon rate as a decimal.
    pub fn coupon_rate(&self) -> f64 {
        self.coupon_rate
    }

    /// Years to maturity.
    pub fn maturity(&self) -> f64 {
        self.maturity
    }

    /// Coupons per year.
    pub fn frequency(&self) -> u32 {
        self.frequency
    }

    /// Coupons per year as `f64`.
    pub fn frequency_f64(&self) -> f64 {
        f64::from(self.frequency)
    }

    /// Face (redemption) value.
    pub fn face_value(&self) -> f64 {
        self.face_value
    }

    /// Assumed recovery as a fraction of face.
    pub fn recovery_rate(&self) -> f64 {
        self.recovery_rate
    }

    /// Coupon paid each period, `coupon_rate / frequency · face`.
    pub fn coupon_amount(&self) -> f64 {
        self.coupon_rate / self.frequency_f64() * self.face_value
    }

    /// Number of coupon dates.
    pub fn payment_count(&self) -> u32 {
        ((self.maturity * self.frequency_f64() - 1e-9).ceil() as u32).max(1)
    }

    /// Coupon dates in years.
    pub fn payment_times(&self) -> Vec<f64> {
        let f = self.frequency_f64();
        (1..=self.payment_count()).map(|k| f64::from(k) / f).collect()
    }

    /// `(time, amount)` for every payment; the last one includes face.
    pub fn cash_flows(&self) -> Vec<(f64, f64)> {
        let coupon = self.coupon_amount();
        let n = self.payment_count();
        let f = self.frequency_f64();
        (1..=n)
            .map(|k| {
                let amount = if k == n { coupon + self.face_value } else { coupon };
                (f64::from(k) / f, amount)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_semiannual_schedule() {
        let bond = BondSpec::new(0.052, 7.0, 2, 100.0, 0.4).unwrap();
        let flows = bond.cash_flows();
        assert_eq!(flows.len(), 14);
        assert_eq!(flows[0].0, 0.5);
        assert_eq!(flows[13].0, 7.0);
        assert_relative_eq!(flows[0].1, 2.6, epsilon = 1e-12);
        assert_relative_eq!(flows[13].1, 102.6, epsilon = 1e-12);
    }

    #[test]
    fn test_stub_maturity_rounds_up() {
        let bond = BondSpec::new(0.05, 2.3, 2, 100.0, 0.4).unwrap();
        assert_eq!(bond.payment_count(), 5);
        assert_eq!(*bond.payment_times().last().unwrap(), 2.5);
    }

    #[test]
    fn test_short_bond_has_one_payment() {
        let bond = BondSpec::new(0.05, 0.1, 1, 100.0, 0.4).unwrap();
        assert_eq!(bond.payment_times(), vec![1.0]);
        assert_relative_eq!(bond.cash_flows()[0].1, 105.0, epsilon = 1e-12);
    }

    #[test]
    fn test_zero_coupon() {
        let bond = BondSpec::new(0.0, 3.0, 1, 100.0, 0.4).unwrap();
        let flows = bond.cash_flows();
        assert_eq!(flows.iter().filter(|(_, cf)| *cf > 0.0).count(), 1);
    }

    #[test]
    fn test_validation() {
        assert!(BondSpec::new(-0.01, 7.0, 2, 100.0, 0.4).is_err());
        assert!(BondSpec::new(0.05, 0.0, 2, 100.0, 0.4).is_err());
        assert!(BondSpec::new(0.05, 7.0, 0, 100.0, 0.4).is_err());
        assert!(BondSpec::new(0.05, 7.0, 2, 0.0, 0.4).is_err());
        assert!(BondSpec::new(0.05, 7.0, 2, 100.0, 1.01).is_err());
        assert!(BondSpec::new(0.05, 7.0, 2, 100.0, 1.0).is_ok());
    }
}
