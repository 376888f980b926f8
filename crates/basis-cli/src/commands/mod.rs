//! CLI command implementations.

pub mod analyze;
pub mod config;
pub mod curve;
pub mod price;
pub mod snapshot;
pub mod stress;

pub use analyze::AnalyzeArgs;
pub use config::ConfigArgs;
pub use curve::CurveArgs;
pub use price::PriceArgs;
pub use snapshot::SnapshotArgs;
pub use stress::StressArgs;

use std::path::Path;

use anyhow::Result;
use tracing::info;

use basis_analytics::pipeline::CreditAnalysis;
use basis_analytics::settings::AnalysisSettings;
use basis_analytics::snapshot::MarketSnapshot;
use basis_config::AnalysisConfig;

use crate::cli::OutputFormat;
use crate::error::{CliError, CliResult};
use crate::output::print_warning;

/// Shared state handed to every command.
pub struct Context {
    /// Configuration as loaded.
    pub config: AnalysisConfig,
    /// Engine settings derived from `config`.
    pub settings: AnalysisSettings,
    /// Output format.
    pub format: OutputFormat,
    /// Suppress headers and warnings.
    pub quiet: bool,
}

impl Context {
    /// Prints a warning unless `--quiet`.
    pub fn warn(&self, message: &str) {
        if !self.quiet {
            print_warning(message);
        }
    }
}

/// Reads a snapshot file, or returns the demo snapshot when no path is given.
pub fn load_snapshot(path: Option<&Path>) -> Result<MarketSnapshot> {
    match path {
        Some(path) => {
            let json = std::fs::read_to_string(path).map_err(|source| CliError::SnapshotRead {
                path: path.to_path_buf(),
                source,
            })?;
            info!("loaded snapshot from {}", path.display());
            Ok(MarketSnapshot::from_json(&json)?)
        }
        None => {
            info!("no snapshot given, using the demo snapshot");
            Ok(MarketSnapshot::demo())
        }
    }
}

/// Loads a snapshot and prepares the analysis.
pub fn prepare(path: Option<&Path>, settings: AnalysisSettings) -> Result<CreditAnalysis> {
    let snapshot = load_snapshot(path)?;
    Ok(CreditAnalysis::new(snapshot, settings)?)
}

/// Validates a price value.
pub fn validate_price(price: f64) -> CliResult<f64> {
    if !(price > 0.0 && price.is_finite()) {
        return Err(CliError::InvalidPrice(price));
    }
    Ok(price)
}

/// Validates a tenor in years.
pub fn validate_tenor(tenor: f64) -> CliResult<f64> {
    if !(tenor > 0.0 && tenor.is_finite()) {
        return Err(CliError::InvalidTenor(tenor));
    }
    Ok(tenor)
}
