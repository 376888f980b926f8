//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::commands::{AnalyzeArgs, ConfigArgs, CurveArgs, PriceArgs, SnapshotArgs, StressArgs};

/// Basis - hazard curves, synthetic bond prices and CDS-bond basis signals
#[derive(Parser)]
#[command(name = "basis")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log solver progress to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Engine configuration file (TOML)
    #[arg(short, long, env = "BASIS_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Run the full analysis: curve, valuation, risk, spreads and basis
    Analyze(AnalyzeArgs),

    /// Bootstrap and display the hazard curve
    Curve(CurveArgs),

    /// Synthetic price, yield and risk metrics
    Price(PriceArgs),

    /// Basis under parallel CDS shocks
    Stress(StressArgs),

    /// Write the built-in demo snapshot
    Snapshot(SnapshotArgs),

    /// Show or validate the engine configuration
    Config(ConfigArgs),
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
    /// Minimal output (just the headline value)
    Minimal,
}
