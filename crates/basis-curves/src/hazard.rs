//! Piecewise-constant hazard-rate curve.
//!
//! The hazard rate of node `i` applies on `(tenor[i-1], tenor[i]]`, with the
//! first node starting at zero. Beyond the last tenor the last rate is
//! extended flat, so survival keeps decaying at the terminal intensity.
//!
//! ```text
//! S(t) = exp(-∫₀ᵗ λ(u) du)
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{CurveError, CurveResult};
use crate::traits::SurvivalCurve;

/// Lower clip applied to calibrated hazard rates.
pub const MIN_HAZARD: f64 = 1e-6;

/// Upper clip applied to calibrated hazard rates.
pub const MAX_HAZARD: f64 = 1.0;

/// How a hazard node was obtained.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CalibrationQuality {
    /// Closed form `s / (1 - R)`, used for the first node.
    CreditTriangle,
    /// Root-solved so premium and protection legs balance.
    Converged {
        /// Solver iterations used.
        iterations: u32,
        /// Final |premium - protection|.
        residual: f64,
    },
    /// The solver failed and the credit-triangle estimate was used instead.
    Fallback {
        /// Why the solver failed.
        reason: String,
    },
    /// Provided directly by the caller.
    Supplied,
}

impl CalibrationQuality {
    /// True when the node did not come out of a successful calibration.
    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }
}

impl fmt::Display for CalibrationQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CreditTriangle => write!(f, "credit triangle"),
            Self::Converged { iterations, .. } => write!(f, "converged ({iterations} iter)"),
            Self::Fallback { .. } => write!(f, "fallback"),
            Self::Supplied => write!(f, "supplied"),
        }
    }
}

/// One calibrated segment of a hazard curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HazardNode {
    /// Segment end, in years.
    pub tenor: f64,
    /// Constant default intensity on the segment.
    pub hazard_rate: f64,
    /// How the rate was obtained.
    pub quality: CalibrationQuality,
    /// True when the raw estimate fell outside [`MIN_HAZARD`, `MAX_HAZARD`].
    pub clipped: bool,
}

/// One row of a [`CurveSummary`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SummaryPoint {
    /// Node tenor.
    pub tenor: f64,
    /// Hazard rate on the segment ending at `tenor`.
    pub hazard_rate: f64,
    /// Survival probability to `tenor`.
    pub survival: f64,
    /// Cumulative default probability to `tenor`.
    pub default_probability: f64,
    /// Default probability over the segment ending at `tenor`, given
    /// survival to its start.
    pub period_default_probability: f64,
}

/// Tenor-by-tenor view of a hazard curve with aggregate statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurveSummary {
    /// One row per node.
    pub points: Vec<SummaryPoint>,
    /// Smallest hazard rate.
    pub min_hazard: f64,
    /// Largest hazard rate.
    pub max_hazard: f64,
    /// Unweighted mean of the node hazard rates.
    pub mean_hazard: f64,
    /// Nodes that fell back to the credit triangle.
    pub degraded_nodes: usize,
    /// Nodes whose raw estimate was clipped.
    pub clipped_nodes: usize,
}

impl CurveSummary {
    /// Survival probability at the longest tenor.
    pub fn terminal_survival(&self) -> f64 {
        self.points.last().map_or(1.0, |p| p.survival)
    }
}

/// Piecewise-constant hazard-rate term structure.
///
/// # Example
///
/// ```rust
/// use basis_curves::prelude::*;
///
/// let curve = HazardCurve::from_rates(&[(1.0, 0.02), (5.0, 0.03)], 0.4).unwrap();
/// let expected = (-(0.02 + 0.03 * 2.0_f64)).exp();
/// assert!((curve.survival(3.0) - expected).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HazardCurve {
    nodes: Vec<HazardNode>,
    recovery_rate: f64,
}

impl HazardCurve {
    /// Creates a curve from nodes.
    ///
    /// Tenors must be positive and strictly increasing, rates finite and
    /// non-negative, and the recovery rate in [0, 1].
    pub fn new(nodes: Vec<HazardNode>, recovery_rate: f64) -> CurveResult<Self> {
        if nodes.is_empty() {
            return Err(CurveError::insufficient_points(1, 0));
        }
        if !(0.0..=1.0).contains(&recovery_rate) {
            return Err(CurveError::InvalidRecovery {
                value: recovery_rate,
            });
        }

        let mut prev = 0.0;
        for (i, node) in nodes.iter().enumerate() {
            if !node.tenor.is_finite() || node.tenor <= prev {
                return Err(CurveError::non_monotonic_tenors(i, prev, node.tenor));
            }
            if !node.hazard_rate.is_finite() || node.hazard_rate < 0.0 {
                return Err(CurveError::invalid_value(format!(
                    "hazard rate at tenor {} must be finite and non-negative, got {}",
                    node.tenor, node.hazard_rate
                )));
            }
            prev = node.tenor;
        }

        Ok(Self::from_calibrated(nodes, recovery_rate))
    }

    /// Creates a curve from `(tenor, hazard_rate)` pairs.
    pub fn from_rates(points: &[(f64, f64)], recovery_rate: f64) -> CurveResult<Self> {
        let nodes = points
            .iter()
            .map(|&(tenor, hazard_rate)| HazardNode {
                tenor,
                hazard_rate,
                quality: CalibrationQuality::Supplied,
                clipped: false,
            })
            .collect();
        Self::new(nodes, recovery_rate)
    }

    pub(crate) fn from_calibrated(nodes: Vec<HazardNode>, recovery_rate: f64) -> Self {
        Self {
            nodes,
            recovery_rate,
        }
    }

    /// Calibrated nodes in tenor order.
    pub fn nodes(&self) -> &[HazardNode] {
        &self.nodes
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false; a hazard curve has at least one node.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Node tenors.
    pub fn tenors(&self) -> Vec<f64> {
        self.nodes.iter().map(|n| n.tenor).collect()
    }

    /// Node hazard rates.
    pub fn hazard_rates(&self) -> Vec<f64> {
        self.nodes.iter().map(|n| n.hazard_rate).collect()
    }

    /// Recovery rate used during calibration.
    pub fn recovery_rate(&self) -> f64 {
        self.recovery_rate
    }

    /// Instantaneous hazard rate at `t`.
    pub fn hazard_rate(&self, t: f64) -> f64 {
        self.nodes
            .iter()
            .find(|n| t <= n.tenor)
            .or_else(|| self.nodes.last())
            .map_or(0.0, |n| n.hazard_rate)
    }

    /// True if any node fell back to the credit triangle.
    pub fn is_degraded(&self) -> bool {
        self.nodes.iter().any(|n| n.quality.is_degraded())
    }

    /// Tenors of nodes that fell back to the credit triangle.
    pub fn degraded_tenors(&self) -> Vec<f64> {
        self.nodes
            .iter()
            .filter(|n| n.quality.is_degraded())
            .map(|n| n.tenor)
            .collect()
    }

    /// Credit-triangle spread implied at `t`, `λ(t)·(1 - R)` in basis points.
    pub fn implied_spread_bps(&self, t: f64) -> f64 {
        self.hazard_rate(t) * (1.0 - self.recovery_rate) * 10_000.0
    }

    /// Summary statistics.
    pub fn summary(&self) -> CurveSummary {
        let mut start = 0.0;
        let points: Vec<SummaryPoint> = self
            .nodes
            .iter()
            .map(|n| {
                // Node tenors are strictly increasing from a positive first tenor.
                let period_default_probability = self
                    .conditional_default_probability(start, n.tenor)
                    .unwrap_or(0.0);
                start = n.tenor;
                SummaryPoint {
                    tenor: n.tenor,
                    hazard_rate: n.hazard_rate,
                    survival: self.survival(n.tenor),
                    default_probability: self.default_probability(n.tenor),
                    period_default_probability,
                }
            })
            .collect();
        let (min_hazard, max_hazard) = points
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
                (lo.min(p.hazard_rate), hi.max(p.hazard_rate))
            });
        let mean_hazard = points.iter().map(|p| p.hazard_rate).sum::<f64>() / points.len() as f64;

        CurveSummary {
            points,
            min_hazard,
            max_hazard,
            mean_hazard,
            degraded_nodes: self.nodes.iter().filter(|n| n.quality.is_degraded()).count(),
            clipped_nodes: self.nodes.iter().filter(|n| n.clipped).count(),
        }
    }
}

impl SurvivalCurve for HazardCurve {
    fn survival(&self, t: f64) -> f64 {
        if t <= 0.0 {
            return 1.0;
        }
        let segments = self.nodes.iter().map(|n| (n.tenor, n.hazard_rate));
        (-cumulative_hazard(segments, t)).exp()
    }
}

/// Integrated hazard `∫₀ᵗ λ(u) du` over piecewise-constant segments.
///
/// `segments` yields `(tenor, hazard_rate)` in ascending tenor order. Past
/// the last tenor the last rate continues.
pub(crate) fn cumulative_hazard<I>(segments: I, t: f64) -> f64
where
    I: IntoIterator<Item = (f64, f64)>,
{
    if t <= 0.0 {
        return 0.0;
    }

    let mut integral = 0.0;
    let mut prev_tenor = 0.0;
    let mut last_rate = 0.0;
    for (tenor, rate) in segments {
        if t <= tenor {
            return integral + rate * (t - prev_tenor);
        }
        integral += rate * (tenor - prev_tenor);
        prev_tenor = tenor;
        last_rate = rate;
    }
    integral + last_rate * (t - prev_tenor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    fn curve() -> HazardCurve {
        HazardCurve::from_rates(&[(1.0, 0.0133), (3.0, 0.0200), (5.0, 0.0270)], 0.4).unwrap()
    }

    #[test]
    fn test_survival_at_zero_is_one() {
        let c = curve();
        assert_eq!(c.survival(0.0), 1.0);
        assert_eq!(c.survival(-1.0), 1.0);
        assert_eq!(c.default_probability(0.0), 0.0);
    }

    #[test]
    fn test_survival_piecewise() {
        let c = curve();
        assert_relative_eq!(c.survival(1.0), (-0.0133f64).exp(), epsilon = 1e-15);
        let at_four = (-(0.0133 + 0.0200 * 2.0 + 0.0270 * 1.0f64)).exp();
        assert_relative_eq!(c.survival(4.0), at_four, epsilon = 1e-15);
    }

    #[test]
    fn test_flat_beyond_last_tenor() {
        let c = curve();
        let ratio = c.survival(8.0) / c.survival(5.0);
        assert_relative_eq!(ratio, (-0.0270f64 * 3.0).exp(), epsilon = 1e-12);
        assert_eq!(c.hazard_rate(20.0), 0.0270);
    }

    #[test]
    fn test_hazard_rate_lookup_uses_closed_segment_end() {
        let c = curve();
        assert_eq!(c.hazard_rate(1.0), 0.0133);
        assert_eq!(c.hazard_rate(1.0001), 0.0200);
        assert_eq!(c.hazard_rate(0.2), 0.0133);
    }

    #[test]
    fn test_forward_hazard_recovers_segment_rate() {
        let c = curve();
        assert_relative_eq!(c.forward_hazard(1.0, 3.0).unwrap(), 0.0200, epsilon = 1e-12);
        assert!(matches!(
            c.forward_hazard(5.0, 3.0),
            Err(CurveError::Domain { .. })
        ));
    }

    #[test]
    fn test_forward_hazard_when_survival_exhausted() {
        let c = HazardCurve::from_rates(&[(1.0, 800.0)], 0.4).unwrap();
        assert_eq!(c.survival(2.0), 0.0);
        assert_eq!(c.forward_hazard(1.0, 2.0).unwrap(), MAX_HAZARD);
    }

    #[test]
    fn test_validation() {
        assert!(HazardCurve::from_rates(&[], 0.4).is_err());
        assert!(HazardCurve::from_rates(&[(1.0, 0.02)], 1.2).is_err());
        assert!(HazardCurve::from_rates(&[(2.0, 0.02), (1.0, 0.02)], 0.4).is_err());
        assert!(HazardCurve::from_rates(&[(1.0, -0.02)], 0.4).is_err());
        assert!(HazardCurve::from_rates(&[(0.0, 0.02)], 0.4).is_err());
    }

    #[test]
    fn test_summary() {
        let c = curve();
        let s = c.summary();
        assert_eq!(s.points.len(), 3);
        assert_eq!(s.min_hazard, 0.0133);
        assert_eq!(s.max_hazard, 0.0270);
        assert_eq!(s.points[2].tenor, 5.0);
        assert_eq!(s.degraded_nodes, 0);
        assert_eq!(s.terminal_survival(), c.survival(5.0));
        for p in &s.points {
            assert_relative_eq!(p.survival + p.default_probability, 1.0, epsilon = 1e-15);
        }

        // First segment starts at 0, so it matches the cumulative probability.
        assert_relative_eq!(s.points[0].period_default_probability, s.points[0].default_probability);
        // (1, 3] at 2%: 1 - exp(-0.04).
        assert_relative_eq!(
            s.points[1].period_default_probability,
            1.0 - (-0.04_f64).exp(),
            epsilon = 1e-12
        );
        let chained: f64 = s.points.iter().map(|p| 1.0 - p.period_default_probability).product();
        assert_relative_eq!(chained, s.terminal_survival(), epsilon = 1e-12);
    }

    #[test]
    fn test_degraded_reporting() {
        let mut nodes = curve().nodes().to_vec();
        nodes[1].quality = CalibrationQuality::Fallback {
            reason: "zero derivative".into(),
        };
        let c = HazardCurve::new(nodes, 0.4).unwrap();
        assert!(c.is_degraded());
        assert_eq!(c.degraded_tenors(), vec![3.0]);
        assert_eq!(c.summary().degraded_nodes, 1);
    }

    #[test]
    fn test_implied_spread() {
        let c = curve();
        assert_relative_eq!(c.implied_spread_bps(0.5), 79.8, epsilon = 1e-9);
    }

    #[test]
    fn test_serde_round_trip() {
        let c = curve();
        let json = serde_json::to_string(&c).unwrap();
        let back: HazardCurve = serde_json::from_str(&json).unwrap();
        assert_eq!(back, c);
    }

    fn hazard_points() -> impl Strategy<Value = Vec<(f64, f64)>> {
        prop::collection::vec((0.1f64..3.0, 0.0f64..0.5), 1..8).prop_map(|steps| {
            let mut tenor = 0.0;
            steps
                .into_iter()
                .map(|(dt, rate)| {
                    tenor += dt;
                    (tenor, rate)
                })
                .collect()
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn prop_survival_is_monotone_and_bounded(
            points in hazard_points(),
            t1 in 0.0f64..30.0,
            dt in 0.0f64..10.0,
        ) {
            let c = HazardCurve::from_rates(&points, 0.4).unwrap();
            let s1 = c.survival(t1);
            let s2 = c.survival(t1 + dt);
            prop_assert!((0.0..=1.0).contains(&s1));
            prop_assert!(s2 <= s1);
            prop_assert!((s1 + c.default_probability(t1) - 1.0).abs() < 1e-15);
        }

        #[test]
        fn prop_forward_hazard_reproduces_survival(
            points in hazard_points(),
            t1 in 0.0f64..20.0,
            dt in 0.01f64..10.0,
        ) {
            let c = HazardCurve::from_rates(&points, 0.4).unwrap();
            let t2 = t1 + dt;
            let fwd = c.forward_hazard(t1, t2).unwrap();
            let implied = c.survival(t1) * (-fwd * dt).exp();
            prop_assert!((implied - c.survival(t2)).abs() < 1e-12);
        }
    }
}
