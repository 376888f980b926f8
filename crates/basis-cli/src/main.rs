//! Basis CLI - credit curves and CDS-bond basis from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Full analysis of the built-in demo snapshot
//! basis analyze
//!
//! # Analyze a snapshot file against the 5y CDS
//! basis analyze --snapshot intc.json --reference-tenor 5
//!
//! # Hazard curve only
//! basis curve --snapshot intc.json
//!
//! # Stress the CDS curve
//! basis stress --shocks=-50,0,50,100
//!
//! # Write the demo snapshot as a template
//! basis snapshot --output intc.json
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use basis_config::AnalysisConfig;

mod cli;
mod commands;
mod error;
mod output;

use cli::{Cli, Commands};
use commands::Context as CommandContext;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => AnalysisConfig::from_file(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => AnalysisConfig::default(),
    };

    init_logging(&cli, &config);
    debug!("basis v{}", env!("CARGO_PKG_VERSION"));

    let ctx = CommandContext {
        settings: config.settings(),
        config,
        format: cli.format,
        quiet: cli.quiet,
    };

    match cli.command {
        Commands::Analyze(args) => commands::analyze::execute(args, &ctx)?,
        Commands::Curve(args) => commands::curve::execute(args, &ctx)?,
        Commands::Price(args) => commands::price::execute(args, &ctx)?,
        Commands::Stress(args) => commands::stress::execute(args, &ctx)?,
        Commands::Snapshot(args) => commands::snapshot::execute(args, &ctx)?,
        Commands::Config(args) => commands::config::execute(args, &ctx)?,
    }

    Ok(())
}

/// `RUST_LOG` wins; otherwise `--verbose`, `--quiet`, then the config level.
fn init_logging(cli: &Cli, config: &AnalysisConfig) {
    let fallback = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        config.logging.level.as_str()
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
