//! Default-swap leg valuation on a quarterly grid.

use crate::hazard::{cumulative_hazard, HazardNode};
use crate::traits::{DiscountCurve, SurvivalCurve};

/// Present values of a default swap's two legs per unit notional.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LegValues {
    /// Spread payments while the name survives.
    pub premium: f64,
    /// Loss-given-default payments.
    pub protection: f64,
}

impl LegValues {
    /// `premium - protection`. Zero at the par hazard rate.
    pub fn residual(&self) -> f64 {
        self.premium - self.protection
    }
}

/// Number of grid points `k·step` needed to reach `tenor`.
pub(crate) fn grid_points(tenor: f64, step: f64) -> usize {
    ((tenor / step - 1e-9).ceil() as usize).max(1)
}

/// Values both legs of a default swap maturing at `tenor`.
///
/// On the grid `t_k = k·step`, `k = 1..=n`:
///
/// ```text
/// premium    = Σ spread · step · S(t_k) · D(t_k)
/// protection = Σ (1 - R) · (S(t_{k-1}) - S(t_k)) · D(t_k)
/// ```
///
/// `spread` is a decimal (0.011 for 110 bps).
pub fn value_legs<S, D>(
    survival: &S,
    rates: &D,
    spread: f64,
    recovery_rate: f64,
    tenor: f64,
    step: f64,
) -> LegValues
where
    S: SurvivalCurve + ?Sized,
    D: DiscountCurve + ?Sized,
{
    let loss = 1.0 - recovery_rate;
    let mut premium = 0.0;
    let mut protection = 0.0;
    let mut prev_survival = 1.0;

    for k in 1..=grid_points(tenor, step) {
        let t = k as f64 * step;
        let s = survival.survival(t);
        let df = rates.discount_factor(t);
        premium += spread * step * s * df;
        protection += loss * (prev_survival - s) * df;
        prev_survival = s;
    }

    LegValues {
        premium,
        protection,
    }
}

/// A hazard curve under calibration: the finalized nodes plus one trial
/// segment ending at `tenor`, extended flat beyond it.
///
/// Evaluating a trial never touches the finalized nodes, so the objective
/// can be called any number of times at any hazard value.
#[derive(Debug, Clone, Copy)]
pub(crate) struct TrialCurve<'a> {
    finalized: &'a [HazardNode],
    tenor: f64,
    hazard_rate: f64,
}

impl<'a> TrialCurve<'a> {
    pub(crate) fn new(finalized: &'a [HazardNode], tenor: f64, hazard_rate: f64) -> Self {
        Self {
            finalized,
            tenor,
            hazard_rate,
        }
    }
}

impl SurvivalCurve for TrialCurve<'_> {
    fn survival(&self, t: f64) -> f64 {
        if t <= 0.0 {
            return 1.0;
        }
        let segments = self
            .finalized
            .iter()
            .map(|n| (n.tenor, n.hazard_rate))
            .chain(std::iter::once((self.tenor, self.hazard_rate)));
        (-cumulative_hazard(segments, t)).exp()
    }
}
