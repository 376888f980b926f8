//! Duration, DV01 and convexity from a valued cash-flow schedule.
//!
//! The weights are the credit-risky present values of the schedule, so the
//! metrics describe the bond as priced on the survival curve.
//!
//! # Example
//!
//! ```rust
//! use basis_analytics::risk::{dv01_from_duration, modified_from_macaulay};
//!
//! let modified = modified_from_macaulay(6.0, 0.06, 2);
//! assert!((modified - 6.0 / 1.03).abs() < 1e-12);
//! assert!((dv01_from_duration(modified, 95.0) - modified * 95.0 / 10_000.0).abs() < 1e-12);
//! ```

use serde::{Deserialize, Serialize};

use crate::bond::BondSpec;
use crate::cashflows::CashFlowSchedule;
use crate::yields::YieldSolver;

/// Risk measures at one price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskMetrics {
    /// Price the metrics were evaluated at.
    pub price: f64,
    /// Yield to maturity at `price`.
    pub yield_to_maturity: f64,
    /// PV-weighted average time to payment, in years.
    pub macaulay_duration: f64,
    /// Macaulay duration over `1 + y/f`.
    pub modified_duration: f64,
    /// Price change for a 1 bp yield move.
    pub dv01: f64,
    /// Second-order price sensitivity.
    pub convexity: f64,
}

/// Macaulay duration: `Σ t·PV / Σ PV`, or 0 when `Σ PV <= 0`.
#[must_use]
pub fn macaulay_duration(schedule: &CashFlowSchedule) -> f64 {
    let total: f64 = schedule.records().iter().map(|r| r.present_value).sum();
    if total <= 0.0 {
        return 0.0;
    }
    schedule
        .records()
        .iter()
        .map(|r| r.time * r.present_value)
        .sum::<f64>()
        / total
}

/// Modified duration from Macaulay duration.
#[must_use]
pub fn modified_from_macaulay(macaulay: f64, ytm: f64, frequency: u32) -> f64 {
    macaulay / (1.0 + ytm / f64::from(frequency))
}

/// DV01 from modified duration and price.
#[must_use]
pub fn dv01_from_duration(modified_duration: f64, price: f64) -> f64 {
    modified_duration * price / 10_000.0
}

/// Convexity: `Σ t(t + 1/f)·PV / (price · f²)`, or 0 when `price <= 0`.
#[must_use]
pub fn convexity(schedule: &CashFlowSchedule, price: f64, frequency: u32) -> f64 {
    if price <= 0.0 {
        return 0.0;
    }
    let f = f64::from(frequency);
    let weighted: f64 = schedule
        .records()
        .iter()
        .map(|r| r.time * (r.time + 1.0 / f) * r.present_value)
        .sum();
    weighted / (price * f * f)
}

/// Computes [`RiskMetrics`] for a bond and its valued schedule.
#[derive(Debug, Clone, Copy)]
pub struct RiskCalculator<'a> {
    bond: &'a BondSpec,
    schedule: &'a CashFlowSchedule,
    yield_solver: YieldSolver,
}

impl<'a> RiskCalculator<'a> {
    /// Creates a calculator.
    #[must_use]
    pub fn new(bond: &'a BondSpec, schedule: &'a CashFlowSchedule) -> Self {
        Self {
            bond,
            schedule,
            yield_solver: YieldSolver::default(),
        }
    }

    /// Replaces the yield solver.
    #[must_use]
    pub fn with_yield_solver(mut self, yield_solver: YieldSolver) -> Self {
        self.yield_solver = yield_solver;
        self
    }

    /// Metrics with the yield solved at `price`.
    pub fn metrics_at(&self, price: f64) -> RiskMetrics {
        let ytm = self.yield_solver.solve(self.bond, price).yield_value;
        let macaulay = macaulay_duration(self.schedule);
        let modified = modified_from_macaulay(macaulay, ytm, self.bond.frequency());

        RiskMetrics {
            price,
            yield_to_maturity: ytm,
            macaulay_duration: macaulay,
            modified_duration: modified,
            dv01: dv01_from_duration(modified, price),
            convexity: convexity(self.schedule, price, self.bond.frequency()),
        }
    }

    /// Metrics at the schedule's own (synthetic) price.
    pub fn metrics(&self) -> RiskMetrics {
        self.metrics_at(self.schedule.total_pv())
    }
}
