//! Par asset-swap spread.

use super::BPS;
use crate::bond::BondSpec;
use crate::error::{AnalyticsError, AnalyticsResult};

/// Asset-swap spread in basis points.
///
/// The upfront `(face - price)` is spread over the bond's life using its
/// modified duration, then the coupon's excess over the risk-free rate is
/// added:
///
/// ```text
/// ASW = ((face - price) / D_mod / face + coupon - r(T)) · 10⁴
/// ```
///
/// # Errors
///
/// Returns [`AnalyticsError::Validation`] if `modified_duration` is not
/// positive.
pub fn asset_swap_spread_bps(
    bond: &BondSpec,
    price: f64,
    modified_duration: f64,
    risk_free_rate: f64,
) -> AnalyticsResult<f64> {
    if !(modified_duration > 0.0) {
        return Err(AnalyticsError::validation(format!(
            "asset swap spread needs a positive modified duration, got {modified_duration}"
        )));
    }
    let face = bond.face_value();
    let upfront = (face - price) / modified_duration / face;
    Ok((upfront + bond.coupon_rate() - risk_free_rate) * BPS)
}
