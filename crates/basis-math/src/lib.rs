//! # Basis Math
//!
//! Numerical building blocks for the credit basis engine.
//!
//! This crate provides:
//!
//! - **Solvers**: Newton-Raphson (finite-difference derivative)
//!   and Brent's bracketed method
//! - **Interpolation**: Linear, log-linear and natural cubic spline
//!   interpolators behind the [`Interpolator`](interpolation::Interpolator) trait
//! - **Extrapolation**: Flat and linear extension beyond the last knot behind
//!   the [`Extrapolator`](extrapolation::Extrapolator) trait
//!
//! Everything here works on plain `f64` and has no knowledge of curves or
//! bonds; the curve crate chooses which policy to plug in.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::similar_names)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::float_cmp)]

pub mod error;
pub mod extrapolation;
pub mod interpolation;
pub mod solvers;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{MathError, MathResult};
    pub use crate::extrapolation::{Extrapolator, FlatExtrapolator, LinearExtrapolator};
    pub use crate::interpolation::{
        CubicSpline, Interpolator, LinearInterpolator, LogLinearInterpolator,
    };
    pub use crate::solvers::{
        brent, newton_raphson_numerical, FiniteDifference, SolverConfig, SolverResult,
    };
}

pub use error::{MathError, MathResult};
