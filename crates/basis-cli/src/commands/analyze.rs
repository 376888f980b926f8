//! Analyze command implementation.
//!
//! Runs the whole pipeline and prints the report rows.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use tabled::Tabled;

use basis_analytics::cashflows::CashFlowSchedule;
use basis_analytics::pipeline::AnalysisReport;
use basis_analytics::spreads::SpreadQuality;

use crate::cli::OutputFormat;
use crate::commands::{prepare, validate_tenor, Context};
use crate::output::{
    print_header, print_output, print_success, render_table, write_csv_file, ReportLine,
};

/// Arguments for the analyze command.
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Snapshot JSON file. Defaults to the built-in demo snapshot.
    #[arg(short, long)]
    pub snapshot: Option<PathBuf>,

    /// Compare against this CDS tenor instead of the closest to maturity
    #[arg(short, long)]
    pub reference_tenor: Option<f64>,

    /// Show the cash-flow schedule
    #[arg(long)]
    pub cashflows: bool,

    /// Also write the report rows to this CSV file
    #[arg(long)]
    pub report: Option<PathBuf>,
}

/// Execute the analyze command.
pub fn execute(args: AnalyzeArgs, ctx: &Context) -> Result<()> {
    let mut settings = ctx.settings.clone();
    if let Some(tenor) = args.reference_tenor {
        settings.reference_tenor = Some(validate_tenor(tenor)?);
    }

    let report = prepare(args.snapshot.as_deref(), settings)?.report()?;
    warn_on_degradation(&report, ctx);

    let rows: Vec<ReportLine> = report.rows().into_iter().map(ReportLine::from).collect();

    match ctx.format {
        OutputFormat::Table => {
            if !ctx.quiet {
                let title = report
                    .metadata
                    .as_ref()
                    .and_then(|m| m.description.clone())
                    .unwrap_or_else(|| "Credit Basis Analysis".to_string());
                print_header(&title);
            }
            print_output(&rows, ctx.format)?;

            if args.cashflows {
                print_cashflows(&report.cash_flows, ctx.quiet)?;
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Csv => {
            print_output(&rows, ctx.format)?;
        }
        OutputFormat::Minimal => {
            println!("{:.2} {:?}", report.basis.basis_bps, report.basis.signal);
        }
    }

    if let Some(path) = &args.report {
        write_csv_file(path, &rows)?;
        if !ctx.quiet && ctx.format == OutputFormat::Table {
            print_success(&format!("Report written to {}", path.display()));
        }
    }

    Ok(())
}

fn warn_on_degradation(report: &AnalysisReport, ctx: &Context) {
    let degraded = report.hazard_curve.degraded_tenors();
    if !degraded.is_empty() {
        ctx.warn(&format!(
            "Hazard calibration fell back to the credit triangle at tenors {degraded:?}"
        ));
    }
    if matches!(report.basis.z_spread_quality, SpreadQuality::Approximated { .. }) {
        ctx.warn("Z-spread did not converge; using yield minus risk-free rate");
    }
    if !report.yield_result.converged {
        ctx.warn("Yield to maturity did not converge; showing the last iterate");
    }
}

/// Prints the cash-flow schedule.
pub fn print_cashflows(schedule: &CashFlowSchedule, quiet: bool) -> Result<()> {
    #[derive(Tabled)]
    struct CashflowRow {
        #[tabled(rename = "Period")]
        period: u32,
        #[tabled(rename = "Time")]
        time: String,
        #[tabled(rename = "Payment")]
        payment: String,
        #[tabled(rename = "Risk-Free")]
        rate: String,
        #[tabled(rename = "DF")]
        discount_factor: String,
        #[tabled(rename = "Survival")]
        survival: String,
        #[tabled(rename = "PV")]
        present_value: String,
    }

    let rows: Vec<CashflowRow> = schedule
        .records()
        .iter()
        .map(|r| CashflowRow {
            period: r.period,
            time: format!("{:.2}", r.time),
            payment: format!("{:.4}", r.payment),
            rate: format!("{:.3}%", r.risk_free_rate * 100.0),
            discount_factor: format!("{:.6}", r.discount_factor),
            survival: format!("{:.6}", r.survival_probability),
            present_value: format!("{:.4}", r.present_value),
        })
        .collect();

    if !quiet {
        print_header("Cash Flow Schedule");
    }
    println!("{}", render_table(&rows));
    println!("Total PV: {:.4}", schedule.total_pv());
    Ok(())
}
