//! Basis Configuration Layer
//!
//! This crate loads the engine configuration of the credit basis engine from
//! TOML. It covers bootstrap and solver settings, signal thresholds, stress
//! shocks, risk-free curve policies and the default log level.
//!
//! # Features
//!
//! - **Defaults everywhere**: every field is optional, an empty file is valid
//! - **Validation**: [`Validate`] collects every violation with its field path
//! - **Engine bridge**: [`AnalysisConfig::settings`] produces the analytics
//!   crate's `AnalysisSettings`
//!
//! # Example
//!
//! ```rust
//! use basis_config::{AnalysisConfig, Validate};
//!
//! let config = AnalysisConfig::from_toml_str(
//!     r#"
//!     [stress]
//!     shocks_bps = [-25.0, 25.0]
//!     "#,
//! )
//! .unwrap();
//!
//! assert!(config.is_valid());
//! assert_eq!(config.settings().stress_shocks_bps, vec![-25.0, 25.0]);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

mod analysis;
mod error;

pub use analysis::{AnalysisConfig, CurveConfig, LoggingConfig, SignalsConfig, StressConfig};
pub use error::{ConfigError, ConfigResult, Validate, ValidationError};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::analysis::AnalysisConfig;
    pub use crate::error::{ConfigError, ConfigResult, Validate};
}
