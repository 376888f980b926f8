//! # Basis Analytics
//!
//! Credit-risky bond valuation and CDS-bond basis analysis.
//!
//! This crate provides:
//! - **Cash Flows**: survival-weighted bond schedules ([`cashflows`])
//! - **Yields**: yield-to-maturity by Newton iteration ([`yields`])
//! - **Spreads**: Z-spread, asset-swap spread, credit spread ([`spreads`])
//! - **Risk**: Macaulay/modified duration, DV01, convexity ([`risk`])
//! - **Basis**: CDS minus Z-spread, trade signals, stress tests ([`basis`])
//! - **Pipeline**: one call from a [`MarketSnapshot`](snapshot::MarketSnapshot)
//!   to an [`AnalysisReport`](pipeline::AnalysisReport)
//!
//! ## Architecture
//!
//! Curves and the hazard bootstrap live in `basis-curves`; this crate only
//! consumes them through the `DiscountCurve` and `SurvivalCurve` traits.
//!
//! ## Usage
//!
//! ```rust
//! use basis_analytics::prelude::*;
//!
//! let report = CreditAnalysis::run(&MarketSnapshot::demo(), &AnalysisSettings::default()).unwrap();
//! assert!(report.synthetic_price < report.riskless_price);
//! println!("basis: {:.1} bps ({})", report.basis.basis_bps, report.basis.signal);
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::float_cmp)]

pub mod error;

pub use error::{AnalyticsError, AnalyticsResult};

pub mod basis;
pub mod bond;
pub mod cashflows;
pub mod pipeline;
pub mod risk;
pub mod settings;
pub mod snapshot;
pub mod spreads;
pub mod yields;

/// Prelude module for convenient imports.
///
/// ```rust
/// use basis_analytics::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{AnalyticsError, AnalyticsResult};

    pub use crate::basis::{
        AnalysisResult, BasisAnalyzer, BasisSignal, ScenarioQuality, SignalThresholds,
        StressResult, DEFAULT_SHOCKS_BPS,
    };
    pub use crate::bond::BondSpec;
    pub use crate::cashflows::{CashFlowRecord, CashFlowSchedule, CashFlowValuer};
    pub use crate::pipeline::{AnalysisReport, CreditAnalysis, ReportRow, ValuationSignal};
    pub use crate::risk::{RiskCalculator, RiskMetrics};
    pub use crate::settings::AnalysisSettings;
    pub use crate::snapshot::{BondQuote, MarketSnapshot, SnapshotMetadata};
    pub use crate::spreads::{
        asset_swap_spread_bps, credit_spread_bps, SpreadQuality, ZSpreadCalculator,
        ZSpreadConfig, ZSpreadResult,
    };
    pub use crate::yields::{YieldResult, YieldSolver};
}
