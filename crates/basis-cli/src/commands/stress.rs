//! Stress command implementation.
//!
//! Shifts the whole CDS curve to the reference spread plus each shock and
//! re-runs the basis analysis.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use basis_analytics::basis::StressResult;

use crate::cli::OutputFormat;
use crate::commands::{prepare, Context};
use crate::error::CliError;
use crate::output::{print_header, print_json_value, print_output};

/// Arguments for the stress command.
#[derive(Args, Debug)]
pub struct StressArgs {
    /// Snapshot JSON file. Defaults to the built-in demo snapshot.
    #[arg(short, long)]
    pub snapshot: Option<PathBuf>,

    /// Comma-separated shocks in bps, e.g. --shocks=-50,0,50
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    pub shocks: Option<Vec<f64>>,
}

/// One scenario as displayed.
#[derive(Debug, Clone, Serialize, Tabled)]
struct ScenarioRow {
    #[tabled(rename = "Shock (bps)")]
    shock_bps: f64,
    #[tabled(rename = "CDS (bps)")]
    cds_spread_bps: f64,
    #[tabled(rename = "Z-Spread (bps)", display_with = "two_places")]
    z_spread_bps: f64,
    #[tabled(rename = "Basis (bps)", display_with = "two_places")]
    basis_bps: f64,
    #[tabled(rename = "Signal")]
    signal: String,
    #[tabled(rename = "Synthetic Price", display_with = "price_or_na")]
    synthetic_price: Option<f64>,
}

fn two_places(value: &f64) -> String {
    format!("{value:.2}")
}

fn price_or_na(value: &Option<f64>) -> String {
    match value {
        Some(price) => format!("{price:.4}"),
        None => "n/a".to_string(),
    }
}

impl From<StressResult> for ScenarioRow {
    fn from(result: StressResult) -> Self {
        Self {
            shock_bps: result.shock_bps,
            cds_spread_bps: result.cds_spread_bps,
            z_spread_bps: result.z_spread_bps,
            basis_bps: result.basis_bps,
            signal: result.signal.label().to_string(),
            synthetic_price: result.synthetic_price,
        }
    }
}

/// Execute the stress command.
pub fn execute(args: StressArgs, ctx: &Context) -> Result<()> {
    let shocks = args
        .shocks
        .unwrap_or_else(|| ctx.settings.stress_shocks_bps.clone());
    if shocks.is_empty() {
        return Err(CliError::NoShocks.into());
    }

    let analysis = prepare(args.snapshot.as_deref(), ctx.settings.clone())?;
    let results = analysis.stress(&shocks)?;
    for r in results.iter().filter(|r| !r.is_repriced()) {
        ctx.warn(&format!(
            "Shock {:+} bps leaves a non-positive CDS spread; scenario not repriced",
            r.shock_bps
        ));
    }

    match ctx.format {
        OutputFormat::Json => {
            print_json_value(&results)?;
        }
        OutputFormat::Minimal => {
            for r in &results {
                println!("{} {:.2} {:?}", r.shock_bps, r.basis_bps, r.signal);
            }
        }
        OutputFormat::Table | OutputFormat::Csv => {
            if ctx.format == OutputFormat::Table && !ctx.quiet {
                print_header("CDS Stress Test");
            }
            let rows: Vec<ScenarioRow> = results.into_iter().map(ScenarioRow::from).collect();
            print_output(&rows, ctx.format)?;
        }
    }

    Ok(())
}
