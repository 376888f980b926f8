//! # Basis Curves
//!
//! Term structures for credit basis analysis.
//!
//! This crate provides:
//!
//! - **Rate curves**: [`RateCurve`](rate_curve::RateCurve), a tenor→zero-rate
//!   mapping with pluggable interpolation and extrapolation
//! - **Spread curves**: [`SpreadCurve`](spread_curve::SpreadCurve), default-swap
//!   spreads in basis points by tenor
//! - **Hazard curves**: [`HazardCurve`](hazard::HazardCurve), piecewise-constant
//!   default intensity with per-node calibration status
//! - **Bootstrap**: [`HazardBootstrapper`](bootstrap::HazardBootstrapper), which
//!   calibrates a hazard curve node by node so each default swap's premium and
//!   protection legs balance
//!
//! ## Quick Start
//!
//! ```rust
//! use basis_curves::prelude::*;
//!
//! let treasury = RateCurve::new([(1.0, 0.048), (5.0, 0.044), (10.0, 0.0425)]).unwrap();
//! let cds = SpreadCurve::new([(1.0, 80.0), (3.0, 110.0), (5.0, 140.0)]).unwrap();
//!
//! let hazard = HazardBootstrapper::new(&treasury, 0.40)
//!     .unwrap()
//!     .bootstrap(&cds)
//!     .unwrap();
//!
//! assert!(hazard.survival(5.0) < hazard.survival(1.0));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::float_cmp)]

pub mod bootstrap;
pub mod error;
pub mod hazard;
pub mod interpolation;
pub mod rate_curve;
pub mod spread_curve;
pub mod traits;

mod points;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::bootstrap::{value_legs, BootstrapConfig, HazardBootstrapper, LegValues};
    pub use crate::error::{CurveError, CurveResult};
    pub use crate::hazard::{
        CalibrationQuality, CurveSummary, HazardCurve, HazardNode, SummaryPoint, MAX_HAZARD,
        MIN_HAZARD,
    };
    pub use crate::interpolation::{ExtrapolationMethod, InterpolationMethod};
    pub use crate::rate_curve::RateCurve;
    pub use crate::spread_curve::SpreadCurve;
    pub use crate::traits::{DiscountCurve, SurvivalCurve};
}

pub use error::{CurveError, CurveResult};
