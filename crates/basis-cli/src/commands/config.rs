//! Config command implementation.
//!
//! Prints the configuration in effect or validates a configuration file.

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Args;

use basis_config::{AnalysisConfig, Validate};

use crate::cli::OutputFormat;
use crate::commands::Context;
use crate::error::CliError;
use crate::output::{print_error, print_json_value, print_success};

/// Arguments for the config command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Validate this TOML file instead of printing the configuration
    #[arg(long, value_name = "FILE")]
    pub validate: Option<PathBuf>,
}

/// Execute the config command.
pub fn execute(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.validate {
        Some(path) => validate_file(&path, ctx),
        None => {
            match ctx.format {
                OutputFormat::Json => print_json_value(&ctx.config)?,
                _ => print!("{}", ctx.config.to_toml_string()?),
            }
            Ok(())
        }
    }
}

fn validate_file(path: &Path, ctx: &Context) -> Result<()> {
    let content = std::fs::read_to_string(path).map_err(CliError::Io)?;
    let config = AnalysisConfig::parse(&content)?;

    let errors = config.validate();
    if errors.is_empty() {
        if !ctx.quiet {
            print_success(&format!("{} is valid", path.display()));
        }
        return Ok(());
    }

    for err in &errors {
        print_error(&err.to_string());
    }
    Err(CliError::InvalidConfig(errors.len()).into())
}
