//! Engine configuration file.
//!
//! Every section and field has a default, so an empty file is a valid
//! configuration:
//!
//! ```toml
//! [bootstrap]
//! step = 0.25
//! max_iterations = 1000
//!
//! [signals]
//! strong_bps = 20.0
//! reference_tenor = 5.0
//!
//! [stress]
//! shocks_bps = [-50.0, 0.0, 50.0]
//!
//! [curve]
//! interpolation = "log_linear"
//!
//! [logging]
//! level = "debug"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use basis_analytics::basis::{SignalThresholds, DEFAULT_SHOCKS_BPS};
use basis_analytics::settings::AnalysisSettings;
use basis_analytics::spreads::ZSpreadConfig;
use basis_analytics::yields::YieldSolver;
use basis_curves::bootstrap::BootstrapConfig;
use basis_curves::interpolation::{ExtrapolationMethod, InterpolationMethod};

use crate::error::{ConfigError, ConfigResult, Validate, ValidationError};

const LOG_LEVELS: [&str; 6] = ["off", "error", "warn", "info", "debug", "trace"];

// =============================================================================
// SECTIONS
// =============================================================================

/// `[signals]`: basis signal classification.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignalsConfig {
    /// |basis| beyond this many bps is a strong signal.
    pub strong_bps: f64,
    /// Forces the reference CDS tenor.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_tenor: Option<f64>,
}

impl Default for SignalsConfig {
    fn default() -> Self {
        Self {
            strong_bps: SignalThresholds::default().strong_bps,
            reference_tenor: None,
        }
    }
}

/// `[stress]`: parallel CDS shocks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StressConfig {
    /// Shocks in bps, applied in order.
    pub shocks_bps: Vec<f64>,
}

impl Default for StressConfig {
    fn default() -> Self {
        Self {
            shocks_bps: DEFAULT_SHOCKS_BPS.to_vec(),
        }
    }
}

/// `[curve]`: risk-free curve policies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurveConfig {
    /// Interpolation between quoted tenors.
    pub interpolation: InterpolationMethod,
    /// Extrapolation beyond them.
    pub extrapolation: ExtrapolationMethod,
}

/// `[logging]`: default log filter for the binary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// One of `off`, `error`, `warn`, `info`, `debug`, `trace`.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

// =============================================================================
// ANALYSIS CONFIGURATION
// =============================================================================

/// Complete engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Hazard bootstrap.
    pub bootstrap: BootstrapConfig,
    /// Yield-to-maturity solver.
    pub yield_solver: YieldSolver,
    /// Z-spread search.
    pub z_spread: ZSpreadConfig,
    /// Signal thresholds and reference tenor.
    pub signals: SignalsConfig,
    /// Stress shocks.
    pub stress: StressConfig,
    /// Risk-free curve policies.
    pub curve: CurveConfig,
    /// Log level.
    pub logging: LoggingConfig,
}

impl AnalysisConfig {
    /// Parses TOML without validating it.
    pub fn parse(content: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Parses TOML and validates the result.
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        let config = Self::parse(content)?;
        config.validate_or_error()?;
        Ok(config)
    }

    /// Loads and validates a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Renders the configuration as TOML.
    pub fn to_toml_string(&self) -> ConfigResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Converts into engine settings.
    pub fn settings(&self) -> AnalysisSettings {
        AnalysisSettings {
            bootstrap: self.bootstrap,
            yield_solver: self.yield_solver,
            z_spread: self.z_spread,
            thresholds: SignalThresholds {
                strong_bps: self.signals.strong_bps,
            },
            stress_shocks_bps: self.stress.shocks_bps.clone(),
            interpolation: self.curve.interpolation,
            extrapolation: self.curve.extrapolation,
            reference_tenor: self.signals.reference_tenor,
        }
    }
}

impl Validate for AnalysisConfig {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if let Err(err) = self.bootstrap.validate() {
            errors.push(ValidationError::with_rule(
                "bootstrap",
                err.to_string(),
                "valid_bootstrap",
            ));
        }

        let ys = &self.yield_solver;
        if !(ys.tolerance > 0.0 && ys.tolerance <= 1e-2) {
            errors.push(ValidationError::with_rule(
                "yield_solver.tolerance",
                format!("Tolerance {} must be in (0, 1e-2]", ys.tolerance),
                "valid_tolerance",
            ));
        }
        if ys.max_iterations == 0 || ys.max_iterations > 10_000 {
            errors.push(ValidationError::with_rule(
                "yield_solver.max_iterations",
                "Max iterations must be between 1 and 10000",
                "valid_iterations",
            ));
        }
        if !(ys.bump > 0.0) {
            errors.push(ValidationError::new("yield_solver.bump", "Bump must be positive"));
        }

        let z = &self.z_spread;
        if !(z.lower < z.upper) {
            errors.push(ValidationError::with_rule(
                "z_spread",
                format!("Bracket [{}, {}] is empty", z.lower, z.upper),
                "valid_bracket",
            ));
        }
        if !(z.tolerance > 0.0) {
            errors.push(ValidationError::with_rule(
                "z_spread.tolerance",
                "Tolerance must be positive",
                "valid_tolerance",
            ));
        }
        if z.max_iterations == 0 {
            errors.push(ValidationError::with_rule(
                "z_spread.max_iterations",
                "Max iterations must be at least 1",
                "valid_iterations",
            ));
        }

        if !(self.signals.strong_bps >= 0.0 && self.signals.strong_bps.is_finite()) {
            errors.push(ValidationError::new(
                "signals.strong_bps",
                "Threshold must be a non-negative number",
            ));
        }
        if let Some(tenor) = self.signals.reference_tenor {
            if !(tenor > 0.0 && tenor.is_finite()) {
                errors.push(ValidationError::new(
                    "signals.reference_tenor",
                    format!("Reference tenor {tenor} must be positive"),
                ));
            }
        }

        if self.stress.shocks_bps.is_empty() {
            errors.push(ValidationError::with_rule(
                "stress.shocks_bps",
                "At least one shock is required",
                "non_empty",
            ));
        }
        if self.stress.shocks_bps.iter().any(|s| !s.is_finite()) {
            errors.push(ValidationError::new("stress.shocks_bps", "Shocks must be finite"));
        }

        if !LOG_LEVELS.contains(&self.logging.level.to_ascii_lowercase().as_str()) {
            errors.push(ValidationError::with_rule(
                "logging.level",
                format!("Unknown level '{}'", self.logging.level),
                "known_level",
            ));
        }

        errors
    }
}
