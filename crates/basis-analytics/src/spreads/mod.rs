//! Bond spread measures over the risk-free curve.
//!
//! - [`ZSpreadCalculator`]: constant continuously-compounded spread over the
//!   zero curve that reprices the bond
//! - [`asset_swap_spread_bps`]: par asset-swap approximation
//! - [`credit_spread_bps`]: yield minus risk-free rate at maturity

mod asw;
mod zspread;

pub use asw::asset_swap_spread_bps;
pub use zspread::{SpreadQuality, ZSpreadCalculator, ZSpreadConfig, ZSpreadResult};

/// Basis points per unit of rate.
pub const BPS: f64 = 10_000.0;

/// Yield spread over the risk-free rate, in basis points.
#[must_use]
pub fn credit_spread_bps(yield_value: f64, risk_free_rate: f64) -> f64 {
    (yield_value - risk_free_rate) * BPS
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_credit_spread() {
        assert_relative_eq!(credit_spread_bps(0.0625, 0.0434), 191.0, epsilon = 1e-9);
        assert!(credit_spread_bps(0.04, 0.05) < 0.0);
    }
}
