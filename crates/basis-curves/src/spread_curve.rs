//! Default-swap spread curve.

use serde::Serialize;

use crate::error::{CurveError, CurveResult};
use crate::points::sorted_points;

/// Basis points per unit of spread.
pub const BPS: f64 = 10_000.0;

/// Default-swap par spreads in basis points, keyed by tenor in years.
///
/// Tenors are kept in ascending order and every spread is strictly positive.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpreadCurve {
    tenors: Vec<f64>,
    spreads_bps: Vec<f64>,
}

impl SpreadCurve {
    /// Creates a spread curve from `(tenor, spread_bps)` pairs in any order.
    pub fn new<I>(points: I) -> CurveResult<Self>
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        let (tenors, spreads_bps) = sorted_points(points, "spread")?;
        if let Some((&tenor, &spread)) = tenors
            .iter()
            .zip(spreads_bps.iter())
            .find(|(_, spread)| **spread <= 0.0)
        {
            return Err(CurveError::InvalidSpread { tenor, spread });
        }
        Ok(Self {
            tenors,
            spreads_bps,
        })
    }

    /// Number of quoted tenors.
    pub fn len(&self) -> usize {
        self.tenors.len()
    }

    /// Always false; a spread curve has at least one quote.
    pub fn is_empty(&self) -> bool {
        self.tenors.is_empty()
    }

    /// Quoted tenors in ascending order.
    pub fn tenors(&self) -> &[f64] {
        &self.tenors
    }

    /// Quoted spreads in basis points, aligned with [`tenors`](Self::tenors).
    pub fn spreads_bps(&self) -> &[f64] {
        &self.spreads_bps
    }

    /// Iterates over `(tenor, spread_bps)` quotes in ascending tenor order.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.tenors.iter().copied().zip(self.spreads_bps.iter().copied())
    }

    /// The longest quoted tenor.
    pub fn max_tenor(&self) -> f64 {
        self.tenors[self.tenors.len() - 1]
    }

    /// Spread quoted at exactly `tenor`, if any.
    pub fn spread_bps(&self, tenor: f64) -> Option<f64> {
        self.points().find(|(t, _)| *t == tenor).map(|(_, s)| s)
    }

    /// The quote whose tenor is closest to `maturity`.
    ///
    /// On a tie the shorter tenor wins.
    pub fn closest(&self, maturity: f64) -> (f64, f64) {
        let mut best = (self.tenors[0], self.spreads_bps[0]);
        for (tenor, spread) in self.points().skip(1) {
            if (tenor - maturity).abs() < (best.0 - maturity).abs() {
                best = (tenor, spread);
            }
        }
        best
    }

    /// A curve on the same tenors with every spread set to `level_bps`.
    pub fn with_uniform_spread(&self, level_bps: f64) -> CurveResult<Self> {
        Self::new(self.tenors.iter().map(|&t| (t, level_bps)))
    }
}
