//! Price command implementation.
//!
//! Synthetic price, yield and risk metrics for the snapshot bond.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use basis_analytics::cashflows::CashFlowSchedule;
use basis_analytics::risk::RiskMetrics;
use basis_analytics::yields::YieldResult;

use crate::cli::OutputFormat;
use crate::commands::analyze::print_cashflows;
use crate::commands::{prepare, validate_price, Context};
use crate::output::{print_csv, print_header, print_json_value, print_output, KeyValue};

/// Arguments for the price command.
#[derive(Args, Debug)]
pub struct PriceArgs {
    /// Snapshot JSON file. Defaults to the built-in demo snapshot.
    #[arg(short, long)]
    pub snapshot: Option<PathBuf>,

    /// Market price to evaluate yield and risk at, instead of the quoted one
    #[arg(short, long)]
    pub price: Option<f64>,

    /// Hide the cash-flow schedule
    #[arg(long)]
    pub no_cashflows: bool,
}

#[derive(Serialize)]
struct PriceOutput<'a> {
    market_price: f64,
    synthetic_price: f64,
    riskless_price: f64,
    price_difference: f64,
    yield_result: &'a YieldResult,
    risk: &'a RiskMetrics,
    cash_flows: &'a CashFlowSchedule,
}

/// Execute the price command.
pub fn execute(args: PriceArgs, ctx: &Context) -> Result<()> {
    let mut analysis = prepare(args.snapshot.as_deref(), ctx.settings.clone())?;
    if let Some(price) = args.price {
        analysis = analysis.with_market_price(validate_price(price)?)?;
    }
    let report = analysis.report()?;

    if !report.yield_result.converged {
        ctx.warn("Yield to maturity did not converge; showing the last iterate");
    }

    let risk = &report.risk;
    let results = vec![
        KeyValue::from_f64("Market Price", report.market_price, 4),
        KeyValue::from_f64("Synthetic Price", report.synthetic_price, 4),
        KeyValue::from_f64("Riskless Price", report.riskless_price, 4),
        KeyValue::from_f64("Price Difference", report.market_price - report.synthetic_price, 4),
        KeyValue::new("Valuation", report.valuation.label()),
        KeyValue::from_percent("Yield to Maturity", report.yield_result.yield_value),
        KeyValue::from_bps("Credit Spread", report.credit_spread_bps),
        KeyValue::from_f64("Macaulay Duration", risk.macaulay_duration, 4),
        KeyValue::from_f64("Modified Duration", risk.modified_duration, 4),
        KeyValue::from_f64("DV01", risk.dv01, 6),
        KeyValue::from_f64("Convexity", risk.convexity, 4),
    ];

    match ctx.format {
        OutputFormat::Table => {
            if !ctx.quiet {
                print_header("Bond Valuation");
            }
            print_output(&results, ctx.format)?;
            if !args.no_cashflows {
                print_cashflows(&report.cash_flows, ctx.quiet)?;
            }
        }
        OutputFormat::Json => {
            print_json_value(&PriceOutput {
                market_price: report.market_price,
                synthetic_price: report.synthetic_price,
                riskless_price: report.riskless_price,
                price_difference: report.market_price - report.synthetic_price,
                yield_result: &report.yield_result,
                risk,
                cash_flows: &report.cash_flows,
            })?;
        }
        OutputFormat::Csv => {
            print_csv(report.cash_flows.records())?;
        }
        OutputFormat::Minimal => {
            println!("{:.6}", report.synthetic_price);
        }
    }

    Ok(())
}
