//! Sequential hazard-rate bootstrapping from default-swap spreads.
//!
//! Nodes are calibrated in ascending tenor order. The first node uses the
//! credit triangle `λ = s / (1 - R)`. Every later node is solved with Newton
//! so the swap's premium and protection legs balance, holding all earlier
//! nodes fixed. A failed solve falls back to the credit triangle and the
//! node is marked [`CalibrationQuality::Fallback`].
//!
//! # Example
//!
//! ```rust
//! use basis_curves::prelude::*;
//!
//! let treasury = RateCurve::new([(1.0, 0.048), (5.0, 0.044)]).unwrap();
//! let cds = SpreadCurve::new([(1.0, 80.0), (5.0, 140.0)]).unwrap();
//!
//! let curve = HazardBootstrapper::new(&treasury, 0.4)
//!     .unwrap()
//!     .bootstrap(&cds)
//!     .unwrap();
//!
//! assert_eq!(curve.nodes()[0].quality, CalibrationQuality::CreditTriangle);
//! assert!(matches!(curve.nodes()[1].quality, CalibrationQuality::Converged { .. }));
//! ```

mod legs;

pub use legs::{value_legs, LegValues};

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use basis_math::solvers::{newton_raphson_numerical, FiniteDifference, SolverConfig};

use crate::error::{CurveError, CurveResult};
use crate::hazard::{CalibrationQuality, HazardCurve, HazardNode, MAX_HAZARD, MIN_HAZARD};
use crate::spread_curve::{SpreadCurve, BPS};
use crate::traits::DiscountCurve;
use legs::TrialCurve;

/// Bootstrap settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BootstrapConfig {
    /// Premium and protection grid spacing in years.
    pub step: f64,
    /// Newton iteration budget per node.
    pub max_iterations: u32,
    /// Required |premium - protection| per unit notional.
    pub tolerance: f64,
    /// Lower clip for calibrated hazard rates.
    pub min_hazard: f64,
    /// Upper clip for calibrated hazard rates.
    pub max_hazard: f64,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            step: 0.25,
            max_iterations: 1000,
            tolerance: 1e-6,
            min_hazard: MIN_HAZARD,
            max_hazard: MAX_HAZARD,
        }
    }
}

impl BootstrapConfig {
    /// Sets the grid spacing.
    #[must_use]
    pub fn with_step(mut self, step: f64) -> Self {
        self.step = step;
        self
    }

    /// Sets the Newton iteration budget.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Sets the residual tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the hazard clip range.
    #[must_use]
    pub fn with_hazard_bounds(mut self, min_hazard: f64, max_hazard: f64) -> Self {
        self.min_hazard = min_hazard;
        self.max_hazard = max_hazard;
        self
    }

    /// Checks the settings are usable.
    pub fn validate(&self) -> CurveResult<()> {
        if !(self.step > 0.0) {
            return Err(CurveError::invalid_value(format!(
                "bootstrap step must be positive, got {}",
                self.step
            )));
        }
        if !(self.tolerance > 0.0) {
            return Err(CurveError::invalid_value(format!(
                "bootstrap tolerance must be positive, got {}",
                self.tolerance
            )));
        }
        if self.max_iterations == 0 {
            return Err(CurveError::invalid_value("bootstrap needs at least one iteration"));
        }
        if !(0.0 <= self.min_hazard && self.min_hazard < self.max_hazard) {
            return Err(CurveError::invalid_value(format!(
                "hazard bounds must satisfy 0 <= min < max, got [{}, {}]",
                self.min_hazard, self.max_hazard
            )));
        }
        Ok(())
    }
}

/// Calibrates a [`HazardCurve`] to a [`SpreadCurve`].
pub struct HazardBootstrapper<'a> {
    rates: &'a dyn DiscountCurve,
    recovery_rate: f64,
    config: BootstrapConfig,
}

impl std::fmt::Debug for HazardBootstrapper<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HazardBootstrapper")
            .field("recovery_rate", &self.recovery_rate)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<'a> HazardBootstrapper<'a> {
    /// Creates a bootstrapper discounting on `rates` with the default config.
    pub fn new(rates: &'a dyn DiscountCurve, recovery_rate: f64) -> CurveResult<Self> {
        if !(0.0..=1.0).contains(&recovery_rate) {
            return Err(CurveError::InvalidRecovery {
                value: recovery_rate,
            });
        }
        Ok(Self {
            rates,
            recovery_rate,
            config: BootstrapConfig::default(),
        })
    }

    /// Replaces the bootstrap settings.
    pub fn with_config(mut self, config: BootstrapConfig) -> CurveResult<Self> {
        config.validate()?;
        self.config = config;
        Ok(self)
    }

    /// Settings in use.
    pub fn config(&self) -> &BootstrapConfig {
        &self.config
    }

    /// Bootstraps one node per quoted tenor.
    ///
    /// Every node's hazard rate ends up inside the configured clip range.
    /// Solver failures never abort the run; they degrade the node instead.
    pub fn bootstrap(&self, spreads: &SpreadCurve) -> CurveResult<HazardCurve> {
        let loss = 1.0 - self.recovery_rate;
        let mut nodes: Vec<HazardNode> = Vec::with_capacity(spreads.len());

        for (tenor, spread_bps) in spreads.points() {
            let spread = spread_bps / BPS;
            let triangle = spread / loss;

            let (raw, quality) = match nodes.last() {
                None => (triangle, CalibrationQuality::CreditTriangle),
                Some(prev) => self.solve_node(&nodes, tenor, spread, prev.hazard_rate, triangle),
            };

            let hazard_rate = raw.clamp(self.config.min_hazard, self.config.max_hazard);
            let clipped = hazard_rate != raw;
            if clipped {
                debug!("tenor {tenor}y: hazard {raw:.6e} clipped to {hazard_rate:.6e}");
            }
            debug!("tenor {tenor}y: spread {spread_bps} bps -> hazard {hazard_rate:.6} ({quality})");

            nodes.push(HazardNode {
                tenor,
                hazard_rate,
                quality,
                clipped,
            });
        }

        let curve = HazardCurve::from_calibrated(nodes, self.recovery_rate);
        let degraded = curve.degraded_tenors();
        if degraded.is_empty() {
            info!("bootstrapped {} hazard nodes", curve.len());
        } else {
            warn!(
                "bootstrapped {} hazard nodes, {} degraded at tenors {:?}",
                curve.len(),
                degraded.len(),
                degraded
            );
        }
        Ok(curve)
    }

    fn solve_node(
        &self,
        finalized: &[HazardNode],
        tenor: f64,
        spread: f64,
        guess: f64,
        triangle: f64,
    ) -> (f64, CalibrationQuality) {
        let objective = |hazard_rate: f64| {
            let trial = TrialCurve::new(finalized, tenor, hazard_rate);
            value_legs(
                &trial,
                self.rates,
                spread,
                self.recovery_rate,
                tenor,
                self.config.step,
            )
            .residual()
        };
        let solver = SolverConfig::new(self.config.tolerance, self.config.max_iterations);

        match newton_raphson_numerical(objective, guess, FiniteDifference::default(), &solver) {
            Ok(result) if result.root.is_finite() => (
                result.root,
                CalibrationQuality::Converged {
                    iterations: result.iterations,
                    residual: result.residual.abs(),
                },
            ),
            Ok(result) => {
                warn!("tenor {tenor}y: solver returned {}, using credit triangle", result.root);
                (
                    triangle,
                    CalibrationQuality::Fallback {
                        reason: format!("non-finite root {}", result.root),
                    },
                )
            }
            Err(err) => {
                warn!("tenor {tenor}y: {err}, using credit triangle");
                (
                    triangle,
                    CalibrationQuality::Fallback {
                        reason: err.to_string(),
                    },
                )
            }
        }
    }
}
