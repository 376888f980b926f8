//! Numerical settings for an analysis run.

use serde::{Deserialize, Serialize};

use basis_curves::bootstrap::BootstrapConfig;
use basis_curves::interpolation::{ExtrapolationMethod, InterpolationMethod};

use crate::basis::{SignalThresholds, DEFAULT_SHOCKS_BPS};
use crate::spreads::ZSpreadConfig;
use crate::yields::YieldSolver;

/// Everything an analysis run can be tuned with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisSettings {
    /// Hazard bootstrap settings.
    pub bootstrap: BootstrapConfig,
    /// Yield-to-maturity solver.
    pub yield_solver: YieldSolver,
    /// Z-spread search.
    pub z_spread: ZSpreadConfig,
    /// Basis signal thresholds.
    pub thresholds: SignalThresholds,
    /// Parallel shocks for stress testing, in bps.
    pub stress_shocks_bps: Vec<f64>,
    /// Risk-free curve interpolation.
    pub interpolation: InterpolationMethod,
    /// Risk-free curve extrapolation.
    pub extrapolation: ExtrapolationMethod,
    /// Forces the reference CDS tenor instead of the closest to maturity.
    pub reference_tenor: Option<f64>,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            bootstrap: BootstrapConfig::default(),
            yield_solver: YieldSolver::default(),
            z_spread: ZSpreadConfig::default(),
            thresholds: SignalThresholds::default(),
            stress_shocks_bps: DEFAULT_SHOCKS_BPS.to_vec(),
            interpolation: InterpolationMethod::default(),
            extrapolation: ExtrapolationMethod::default(),
            reference_tenor: None,
        }
    }
}
