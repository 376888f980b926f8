//! CLI error types.

use std::path::PathBuf;

use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Snapshot file could not be read.
    #[error("Cannot read snapshot {path}: {source}")]
    SnapshotRead {
        /// Snapshot path.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Invalid price.
    #[error("Invalid price: {0}. Must be positive.")]
    InvalidPrice(f64),

    /// Invalid reference tenor.
    #[error("Invalid reference tenor: {0}. Must be a positive number of years.")]
    InvalidTenor(f64),

    /// No stress shocks to run.
    #[error("No stress shocks given")]
    NoShocks,

    /// Configuration file failed validation.
    #[error("Configuration has {0} error(s)")]
    InvalidConfig(usize),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
