//! Curve command implementation.
//!
//! Bootstraps the hazard curve and shows survival at each node.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use basis_curves::hazard::{CurveSummary, HazardCurve};

use crate::cli::OutputFormat;
use crate::commands::{prepare, Context};
use crate::output::{print_header, print_json_value, print_output, KeyValue};

/// Arguments for the curve command.
#[derive(Args, Debug)]
pub struct CurveArgs {
    /// Snapshot JSON file. Defaults to the built-in demo snapshot.
    #[arg(short, long)]
    pub snapshot: Option<PathBuf>,
}

/// One hazard node as displayed.
#[derive(Debug, Clone, Serialize, Tabled)]
struct NodeRow {
    #[tabled(rename = "Tenor")]
    tenor: f64,
    #[tabled(rename = "CDS (bps)")]
    cds_bps: f64,
    #[tabled(rename = "Implied (bps)", display_with = "two_places")]
    implied_bps: f64,
    #[tabled(rename = "Hazard Rate", display_with = "percent")]
    hazard_rate: f64,
    #[tabled(rename = "Survival", display_with = "probability")]
    survival: f64,
    #[tabled(rename = "Default Prob", display_with = "percent")]
    default_probability: f64,
    #[tabled(rename = "Period Default", display_with = "percent")]
    period_default_probability: f64,
    #[tabled(rename = "Calibration")]
    quality: String,
    #[tabled(rename = "Clipped")]
    clipped: bool,
}

fn percent(value: &f64) -> String {
    format!("{:.4}%", value * 100.0)
}

fn two_places(value: &f64) -> String {
    format!("{value:.2}")
}

fn probability(value: &f64) -> String {
    format!("{value:.6}")
}

#[derive(Serialize)]
struct CurveOutput<'a> {
    recovery_rate: f64,
    nodes: &'a [NodeRow],
    summary: &'a CurveSummary,
}

/// Execute the curve command.
pub fn execute(args: CurveArgs, ctx: &Context) -> Result<()> {
    let analysis = prepare(args.snapshot.as_deref(), ctx.settings.clone())?;
    let curve = analysis.hazard_curve()?;
    let summary = curve.summary();

    let degraded = curve.degraded_tenors();
    if !degraded.is_empty() {
        ctx.warn(&format!(
            "Hazard calibration fell back to the credit triangle at tenors {degraded:?}"
        ));
    }

    let rows = node_rows(&curve, &summary, |tenor| analysis.spreads().spread_bps(tenor));

    match ctx.format {
        OutputFormat::Table => {
            if !ctx.quiet {
                print_header("Hazard Rate Curve");
            }
            print_output(&rows, ctx.format)?;

            let stats = vec![
                KeyValue::from_f64("Recovery Rate", curve.recovery_rate(), 2),
                KeyValue::from_percent("Min Hazard", summary.min_hazard),
                KeyValue::from_percent("Max Hazard", summary.max_hazard),
                KeyValue::from_percent("Mean Hazard", summary.mean_hazard),
                KeyValue::from_f64("Terminal Survival", summary.terminal_survival(), 6),
                KeyValue::new("Degraded Nodes", summary.degraded_nodes.to_string()),
                KeyValue::new("Clipped Nodes", summary.clipped_nodes.to_string()),
            ];
            if !ctx.quiet {
                print_header("Summary");
            }
            print_output(&stats, ctx.format)?;
        }
        OutputFormat::Json => {
            print_json_value(&CurveOutput {
                recovery_rate: curve.recovery_rate(),
                nodes: &rows,
                summary: &summary,
            })?;
        }
        OutputFormat::Csv => {
            print_output(&rows, ctx.format)?;
        }
        OutputFormat::Minimal => {
            let rates: Vec<String> = curve.hazard_rates().iter().map(|h| format!("{h:.6}")).collect();
            println!("{}", rates.join(" "));
        }
    }

    Ok(())
}

/// One row per node. `implied_bps` is the credit-triangle spread of the
/// node's hazard rate, which matches the quote exactly at the first node.
fn node_rows(
    curve: &HazardCurve,
    summary: &CurveSummary,
    cds: impl Fn(f64) -> Option<f64>,
) -> Vec<NodeRow> {
    curve
        .nodes()
        .iter()
        .zip(&summary.points)
        .map(|(node, point)| NodeRow {
            tenor: node.tenor,
            cds_bps: cds(node.tenor).unwrap_or(f64::NAN),
            implied_bps: curve.implied_spread_bps(node.tenor),
            hazard_rate: node.hazard_rate,
            survival: point.survival,
            default_probability: point.default_probability,
            period_default_probability: point.period_default_probability,
            quality: node.quality.to_string(),
            clipped: node.clipped,
        })
        .collect()
}
