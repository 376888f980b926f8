//! Credit-risky cash-flow valuation.
//!
//! Each payment is discounted on the risk-free curve and weighted by the
//! probability the issuer survives to pay it:
//!
//! ```text
//! PV_k = CF_k · exp(-r(t_k) · t_k) · S(t_k)
//! ```

use serde::{Deserialize, Serialize};

use basis_curves::traits::{DiscountCurve, SurvivalCurve};

use crate::bond::BondSpec;

/// One valued payment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CashFlowRecord {
    /// Payment number, starting at 1.
    pub period: u32,
    /// Payment time in years.
    pub time: f64,
    /// Coupon part of the payment.
    pub coupon: f64,
    /// Redemption part of the payment.
    pub principal: f64,
    /// Total payment.
    pub payment: f64,
    /// Risk-free zero rate at `time`.
    pub risk_free_rate: f64,
    /// Risk-free discount factor at `time`.
    pub discount_factor: f64,
    /// Survival probability to `time`.
    pub survival_probability: f64,
    /// Default probability to `time`.
    pub default_probability: f64,
    /// `payment · discount_factor · survival_probability`.
    pub present_value: f64,
}

/// Valued payments plus their total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashFlowSchedule {
    records: Vec<CashFlowRecord>,
    total_pv: f64,
}

impl CashFlowSchedule {
    /// Payments in time order.
    pub fn records(&self) -> &[CashFlowRecord] {
        &self.records
    }

    /// Sum of present values.
    pub fn total_pv(&self) -> f64 {
        self.total_pv
    }

    /// Number of payments.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when there are no payments.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Values a bond's payments on a risk-free curve and a survival curve.
pub struct CashFlowValuer<'a> {
    bond: &'a BondSpec,
    rates: &'a dyn DiscountCurve,
    survival: &'a dyn SurvivalCurve,
}

impl std::fmt::Debug for CashFlowValuer<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CashFlowValuer")
            .field("bond", &self.bond)
            .finish_non_exhaustive()
    }
}

impl<'a> CashFlowValuer<'a> {
    /// Creates a valuer.
    pub fn new(
        bond: &'a BondSpec,
        rates: &'a dyn DiscountCurve,
        survival: &'a dyn SurvivalCurve,
    ) -> Self {
        Self {
            bond,
            rates,
            survival,
        }
    }

    /// Full schedule with one record per payment date.
    pub fn value(&self) -> CashFlowSchedule {
        let coupon = self.bond.coupon_amount();
        let n = self.bond.payment_count();
        let f = self.bond.frequency_f64();

        let records: Vec<CashFlowRecord> = (1..=n)
            .map(|period| {
                let time = f64::from(period) / f;
                let principal = if period == n { self.bond.face_value() } else { 0.0 };
                let payment = coupon + principal;
                let risk_free_rate = self.rates.rate(time);
                let discount_factor = self.rates.discount_factor(time);
                let survival_probability = self.survival.survival(time);

                CashFlowRecord {
                    period,
                    time,
                    coupon,
                    principal,
                    payment,
                    risk_free_rate,
                    discount_factor,
                    survival_probability,
                    default_probability: 1.0 - survival_probability,
                    present_value: payment * discount_factor * survival_probability,
                }
            })
            .collect();

        let total_pv = records.iter().map(|r| r.present_value).sum();
        CashFlowSchedule { records, total_pv }
    }

    /// Credit-risky price: the sum of survival-weighted present values.
    pub fn synthetic_price(&self) -> f64 {
        self.value().total_pv()
    }

    /// Price of the same payments with no default risk.
    pub fn riskless_price(&self) -> f64 {
        self.bond
            .cash_flows()
            .into_iter()
            .map(|(t, cf)| cf * self.rates.discount_factor(t))
            .sum()
    }
}
