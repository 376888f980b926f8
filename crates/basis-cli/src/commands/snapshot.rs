//! Snapshot command implementation.
//!
//! Writes the built-in demo snapshot as a starting point for real data.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use basis_analytics::snapshot::MarketSnapshot;

use crate::commands::Context;
use crate::output::print_success;

/// Arguments for the snapshot command.
#[derive(Args, Debug)]
pub struct SnapshotArgs {
    /// Write to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Execute the snapshot command.
pub fn execute(args: SnapshotArgs, ctx: &Context) -> Result<()> {
    let json = MarketSnapshot::demo().to_json_pretty()?;

    match args.output {
        Some(path) => {
            std::fs::write(&path, format!("{json}\n"))?;
            if !ctx.quiet {
                print_success(&format!("Demo snapshot written to {}", path.display()));
            }
        }
        None => println!("{json}"),
    }

    Ok(())
}
