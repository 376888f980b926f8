//! CDS-bond basis analysis.
//!
//! The basis is the default-swap spread at the reference tenor minus the
//! bond's Z-spread:
//!
//! - **Negative basis**: the bond pays more spread than protection costs.
//!   Long bond, buy protection.
//! - **Positive basis**: the bond pays less than protection costs. Short
//!   bond, sell protection.

use std::fmt;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use basis_curves::bootstrap::{BootstrapConfig, HazardBootstrapper};
use basis_curves::hazard::HazardCurve;
use basis_curves::spread_curve::SpreadCurve;
use basis_curves::traits::DiscountCurve;

use crate::bond::BondSpec;
use crate::cashflows::CashFlowValuer;
use crate::error::{AnalyticsError, AnalyticsResult};
use crate::risk::RiskCalculator;
use crate::settings::AnalysisSettings;
use crate::spreads::{asset_swap_spread_bps, SpreadQuality, ZSpreadCalculator, ZSpreadResult};

/// Default parallel shocks for [`BasisAnalyzer::stress_test`], in bps.
pub const DEFAULT_SHOCKS_BPS: [f64; 6] = [-50.0, -25.0, 0.0, 25.0, 50.0, 100.0];

/// Basis size that separates strong from moderate signals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignalThresholds {
    /// |basis| beyond this many bps is a strong signal.
    pub strong_bps: f64,
}

impl Default for SignalThresholds {
    fn default() -> Self {
        Self { strong_bps: 20.0 }
    }
}

/// Trade signal derived from the basis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BasisSignal {
    /// Basis below `-strong_bps`.
    StrongNegative,
    /// Basis in `[-strong_bps, 0)`.
    ModerateNegative,
    /// Basis exactly zero.
    Neutral,
    /// Basis in `(0, strong_bps]`.
    ModeratePositive,
    /// Basis above `strong_bps`.
    StrongPositive,
}

impl BasisSignal {
    /// Classifies a basis in bps.
    pub fn classify(basis_bps: f64, thresholds: &SignalThresholds) -> Self {
        let strong = thresholds.strong_bps;
        if basis_bps < -strong {
            Self::StrongNegative
        } else if basis_bps < 0.0 {
            Self::ModerateNegative
        } else if basis_bps > strong {
            Self::StrongPositive
        } else if basis_bps > 0.0 {
            Self::ModeratePositive
        } else {
            Self::Neutral
        }
    }

    /// Short trade description.
    pub fn label(self) -> &'static str {
        match self {
            Self::StrongNegative => "Strong Negative Basis: Long Bond / Buy CDS Protection",
            Self::ModerateNegative => "Negative Basis: Long Bond / Buy CDS (Moderate)",
            Self::Neutral => "Neutral Basis: No Clear Trade",
            Self::ModeratePositive => "Positive Basis: Short Bond / Sell CDS (Moderate)",
            Self::StrongPositive => "Strong Positive Basis: Short Bond / Sell CDS Protection",
        }
    }

    /// Why the trade makes sense.
    pub fn rationale(self) -> &'static str {
        match self {
            Self::StrongNegative => "Bond is cheap relative to CDS. Potential arbitrage.",
            Self::ModerateNegative => "Bond slightly cheap vs CDS.",
            Self::Neutral => "Bond and CDS are fairly priced relative to each other.",
            Self::ModeratePositive => "Bond slightly rich vs CDS.",
            Self::StrongPositive => "Bond is rich relative to CDS. Potential arbitrage.",
        }
    }

    /// True for negative-basis signals.
    pub fn is_negative(self) -> bool {
        matches!(self, Self::StrongNegative | Self::ModerateNegative)
    }
}

impl fmt::Display for BasisSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Result of a basis analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Bond Z-spread in bps.
    pub z_spread_bps: f64,
    /// Whether the Z-spread was solved or approximated.
    pub z_spread_quality: SpreadQuality,
    /// CDS spread at the reference tenor in bps.
    pub cds_spread_bps: f64,
    /// CDS tenor the bond was compared against.
    pub reference_tenor: f64,
    /// `cds_spread_bps - z_spread_bps`.
    pub basis_bps: f64,
    /// Trade signal.
    pub signal: BasisSignal,
    /// Trade rationale.
    pub rationale: String,
    /// Par asset-swap spread in bps.
    pub asset_swap_spread_bps: f64,
    /// Quoted bond price.
    pub market_price: f64,
    /// Price implied by the hazard curve.
    pub synthetic_price: f64,
    /// `market_price - synthetic_price`.
    pub price_difference: f64,
    /// Years to maturity.
    pub bond_maturity: f64,
}

/// Whether a stress scenario could be repriced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioQuality {
    /// The shocked curve was bootstrapped and the bond repriced on it.
    Repriced,
    /// The shocked spread is not positive. No hazard curve exists for it, so
    /// only the basis and signal are reported.
    NonPositiveSpread,
}

/// One stress scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StressResult {
    /// Shock applied to the base reference spread, in bps.
    pub shock_bps: f64,
    /// Uniform CDS spread of the scenario, in bps.
    pub cds_spread_bps: f64,
    /// Bond Z-spread in bps (unaffected by CDS shocks).
    pub z_spread_bps: f64,
    /// Scenario basis in bps.
    pub basis_bps: f64,
    /// Scenario trade signal.
    pub signal: BasisSignal,
    /// Synthetic price on the re-bootstrapped hazard curve.
    pub synthetic_price: Option<f64>,
    /// Whether the scenario was repriced.
    pub quality: ScenarioQuality,
}

impl StressResult {
    /// True if the scenario carries a synthetic price.
    pub fn is_repriced(&self) -> bool {
        self.quality == ScenarioQuality::Repriced
    }
}

/// Compares a bond against its issuer's default-swap curve.
///
/// The hazard curve is bootstrapped once on construction. The spread curve
/// is owned and never modified; stress scenarios work on shocked copies.
pub struct BasisAnalyzer<'a> {
    bond: BondSpec,
    market_price: f64,
    rates: &'a dyn DiscountCurve,
    spreads: SpreadCurve,
    hazard: HazardCurve,
    settings: AnalysisSettings,
}

impl fmt::Debug for BasisAnalyzer<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BasisAnalyzer")
            .field("bond", &self.bond)
            .field("market_price", &self.market_price)
            .field("spreads", &self.spreads)
            .finish_non_exhaustive()
    }
}

impl<'a> BasisAnalyzer<'a> {
    /// Creates an analyzer with default settings.
    pub fn new(
        bond: BondSpec,
        market_price: f64,
        rates: &'a dyn DiscountCurve,
        spreads: SpreadCurve,
    ) -> AnalyticsResult<Self> {
        Self::with_settings(bond, market_price, rates, spreads, AnalysisSettings::default())
    }

    /// Creates an analyzer and bootstraps its hazard curve.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::Validation`] for a non-positive price or an
    /// invalid bootstrap configuration.
    pub fn with_settings(
        bond: BondSpec,
        market_price: f64,
        rates: &'a dyn DiscountCurve,
        spreads: SpreadCurve,
        settings: AnalysisSettings,
    ) -> AnalyticsResult<Self> {
        if !market_price.is_finite() || market_price <= 0.0 {
            return Err(AnalyticsError::validation(format!(
                "market price must be positive, got {market_price}"
            )));
        }
        let hazard = bootstrap(rates, &bond, &spreads, settings.bootstrap)?;
        Ok(Self {
            bond,
            market_price,
            rates,
            spreads,
            hazard,
            settings,
        })
    }

    /// The bond under analysis.
    pub fn bond(&self) -> &BondSpec {
        &self.bond
    }

    /// Quoted bond price.
    pub fn market_price(&self) -> f64 {
        self.market_price
    }

    /// The default-swap curve as supplied.
    pub fn spreads(&self) -> &SpreadCurve {
        &self.spreads
    }

    /// The bootstrapped hazard curve.
    pub fn hazard_curve(&self) -> &HazardCurve {
        &self.hazard
    }

    /// Z-spread of the bond at its market price.
    pub fn z_spread(&self) -> ZSpreadResult {
        ZSpreadCalculator::new(self.rates)
            .with_config(self.settings.z_spread)
            .with_yield_solver(self.settings.yield_solver)
            .calculate(&self.bond, self.market_price)
    }

    /// Analysis against the CDS tenor closest to maturity.
    pub fn analyze(&self) -> AnalyticsResult<AnalysisResult> {
        self.analyze_with_reference(self.settings.reference_tenor)
    }

    /// Analysis against a chosen CDS tenor, or the closest to maturity.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::UnknownReferenceTenor`] if `reference` is not
    /// quoted on the curve.
    pub fn analyze_with_reference(&self, reference: Option<f64>) -> AnalyticsResult<AnalysisResult> {
        let (reference_tenor, cds_spread_bps) = self.reference_quote(reference)?;

        let z = self.z_spread();
        let z_spread_bps = z.bps();
        let basis_bps = cds_spread_bps - z_spread_bps;
        let signal = BasisSignal::classify(basis_bps, &self.settings.thresholds);

        let schedule = CashFlowValuer::new(&self.bond, self.rates, &self.hazard).value();
        let synthetic_price = schedule.total_pv();
        let risk = RiskCalculator::new(&self.bond, &schedule)
            .with_yield_solver(self.settings.yield_solver)
            .metrics_at(self.market_price);
        let asset_swap_spread_bps = asset_swap_spread_bps(
            &self.bond,
            self.market_price,
            risk.modified_duration,
            self.rates.rate(self.bond.maturity()),
        )?;

        info!("basis {basis_bps:.2} bps against {reference_tenor}y CDS ({signal})");

        Ok(AnalysisResult {
            z_spread_bps,
            z_spread_quality: z.quality,
            cds_spread_bps,
            reference_tenor,
            basis_bps,
            signal,
            rationale: signal.rationale().to_string(),
            asset_swap_spread_bps,
            market_price: self.market_price,
            synthetic_price,
            price_difference: self.market_price - synthetic_price,
            bond_maturity: self.bond.maturity(),
        })
    }

    /// Re-runs the analysis with every CDS tenor set to the base reference
    /// spread plus each shock.
    ///
    /// Each scenario re-bootstraps the hazard curve from its shocked copy, so
    /// the synthetic price moves with the shock. The bond's Z-spread does not
    /// depend on CDS quotes and is the same in every scenario.
    ///
    /// A shock that takes the spread to zero or below still yields a row with
    /// its basis and signal, marked [`ScenarioQuality::NonPositiveSpread`] and
    /// without a synthetic price.
    ///
    /// # Errors
    ///
    /// Fails only on an unknown configured reference tenor or a bootstrap
    /// error on a positive shocked curve.
    pub fn stress_test(&self, shocks_bps: &[f64]) -> AnalyticsResult<Vec<StressResult>> {
        let (_, base_bps) = self.reference_quote(self.settings.reference_tenor)?;
        let z_spread_bps = self.z_spread().bps();

        shocks_bps
            .iter()
            .map(|&shock_bps| {
                let level = base_bps + shock_bps;
                let basis_bps = level - z_spread_bps;

                let (synthetic_price, quality) = if level > 0.0 {
                    let shocked = self.spreads.with_uniform_spread(level)?;
                    let hazard = bootstrap(self.rates, &self.bond, &shocked, self.settings.bootstrap)?;
                    let price = CashFlowValuer::new(&self.bond, self.rates, &hazard).synthetic_price();
                    (Some(price), ScenarioQuality::Repriced)
                } else {
                    warn!("stress {shock_bps:+} bps takes the {base_bps} bps reference spread to {level} bps; not repriced");
                    (None, ScenarioQuality::NonPositiveSpread)
                };
                debug!("stress {shock_bps:+} bps: cds {level} bps, basis {basis_bps:.2} bps");

                Ok(StressResult {
                    shock_bps,
                    cds_spread_bps: level,
                    z_spread_bps,
                    basis_bps,
                    signal: BasisSignal::classify(basis_bps, &self.settings.thresholds),
                    synthetic_price,
                    quality,
                })
            })
            .collect()
    }

    /// Stress test with the configured shocks.
    pub fn stress_test_default(&self) -> AnalyticsResult<Vec<StressResult>> {
        self.stress_test(&self.settings.stress_shocks_bps)
    }

    fn reference_quote(&self, reference: Option<f64>) -> AnalyticsResult<(f64, f64)> {
        match reference {
            None => Ok(self.spreads.closest(self.bond.maturity())),
            Some(tenor) => self
                .spreads
                .spread_bps(tenor)
                .map(|bps| (tenor, bps))
                .ok_or_else(|| AnalyticsError::UnknownReferenceTenor {
                    tenor,
                    available: self.spreads.tenors().to_vec(),
                }),
        }
    }
}

fn bootstrap(
    rates: &dyn DiscountCurve,
    bond: &BondSpec,
    spreads: &SpreadCurve,
    config: BootstrapConfig,
) -> AnalyticsResult<HazardCurve> {
    let curve = HazardBootstrapper::new(rates, bond.recovery_rate())?
        .with_config(config)?
        .bootstrap(spreads)?;
    Ok(curve)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use basis_curves::rate_curve::RateCurve;

    fn treasury() -> RateCurve {
        RateCurve::new([
            (0.25, 0.0495),
            (0.5, 0.0490),
            (1.0, 0.0480),
            (2.0, 0.0460),
            (5.0, 0.0440),
            (10.0, 0.0425),
            (30.0, 0.0450),
        ])
        .unwrap()
    }

    fn cds() -> SpreadCurve {
        SpreadCurve::new([
            (1.0, 80.0),
            (3.0, 110.0),
            (5.0, 140.0),
            (7.0, 160.0),
            (10.0, 180.0),
        ])
        .unwrap()
    }

    fn bond() -> BondSpec {
        BondSpec::new(0.052, 7.0, 2, 100.0, 0.4).unwrap()
    }

    #[test]
    fn test_classify_boundaries() {
        let t = SignalThresholds::default();
        assert_eq!(BasisSignal::classify(-25.0, &t), BasisSignal::StrongNegative);
        assert_eq!(BasisSignal::classify(-20.0, &t), BasisSignal::ModerateNegative);
        assert_eq!(BasisSignal::classify(-0.01, &t), BasisSignal::ModerateNegative);
        assert_eq!(BasisSignal::classify(0.0, &t), BasisSignal::Neutral);
        assert_eq!(BasisSignal::classify(20.0, &t), BasisSignal::ModeratePositive);
        assert_eq!(BasisSignal::classify(20.5, &t), BasisSignal::StrongPositive);

        let wide = SignalThresholds { strong_bps: 50.0 };
        assert_eq!(BasisSignal::classify(-25.0, &wide), BasisSignal::ModerateNegative);
    }

    #[test]
    fn test_signal_text() {
        assert!(BasisSignal::StrongNegative.label().contains("Long Bond"));
        assert!(BasisSignal::ModeratePositive.rationale().contains("rich"));
        assert!(BasisSignal::ModerateNegative.is_negative());
        assert_eq!(BasisSignal::Neutral.to_string(), BasisSignal::Neutral.label());
    }

    #[test]
    fn test_analyze_uses_closest_tenor() {
        let rates = treasury();
        let analyzer = BasisAnalyzer::new(bond(), 94.50, &rates, cds()).unwrap();
        let result = analyzer.analyze().unwrap();

        assert_eq!(result.reference_tenor, 7.0);
        assert_eq!(result.cds_spread_bps, 160.0);
        assert_relative_eq!(result.basis_bps, result.cds_spread_bps - result.z_spread_bps);
        assert_eq!(result.signal, BasisSignal::classify(result.basis_bps, &SignalThresholds::default()));
        assert_eq!(result.rationale, result.signal.rationale());
        assert_relative_eq!(result.price_difference, 94.50 - result.synthetic_price);
        assert_eq!(result.bond_maturity, 7.0);
        assert!(matches!(result.z_spread_quality, SpreadQuality::Solved { .. }));
    }

    #[test]
    fn test_forced_reference_tenor() {
        let rates = treasury();
        let analyzer = BasisAnalyzer::new(bond(), 94.50, &rates, cds()).unwrap();
        let at_five = analyzer.analyze_with_reference(Some(5.0)).unwrap();
        assert_eq!(at_five.reference_tenor, 5.0);
        assert_eq!(at_five.cds_spread_bps, 140.0);

        let err = analyzer.analyze_with_reference(Some(4.0)).unwrap_err();
        assert!(matches!(err, AnalyticsError::UnknownReferenceTenor { .. }));
        assert!(err.is_validation());
    }

    #[test]
    fn test_stress_leaves_curve_untouched() {
        let rates = treasury();
        let analyzer = BasisAnalyzer::new(bond(), 94.50, &rates, cds()).unwrap();
        let before = analyzer.spreads().clone();
        let base = analyzer.analyze().unwrap();

        let results = analyzer.stress_test(&DEFAULT_SHOCKS_BPS).unwrap();
        assert_eq!(results.len(), 6);
        assert_eq!(analyzer.spreads(), &before);
        assert_eq!(analyzer.analyze().unwrap(), base);

        for r in &results {
            assert_eq!(r.cds_spread_bps, 160.0 + r.shock_bps);
            assert_relative_eq!(r.z_spread_bps, base.z_spread_bps);
            assert_relative_eq!(r.basis_bps, r.cds_spread_bps - r.z_spread_bps);
        }
        assert!(results.iter().all(StressResult::is_repriced));
        let prices: Vec<f64> = results.iter().filter_map(|r| r.synthetic_price).collect();
        assert!(prices.windows(2).all(|w| w[1] < w[0]), "{prices:?}");
    }

    #[test]
    fn test_stress_flags_non_positive_spread() {
        let rates = treasury();
        let analyzer = BasisAnalyzer::new(bond(), 94.50, &rates, cds()).unwrap();
        let results = analyzer.stress_test(&[0.0, -160.0, -200.0]).unwrap();

        assert_eq!(results.len(), 3);
        assert!(results[0].is_repriced());
        for r in &results[1..] {
            assert_eq!(r.quality, ScenarioQuality::NonPositiveSpread);
            assert_eq!(r.synthetic_price, None);
            assert_relative_eq!(r.basis_bps, r.cds_spread_bps - r.z_spread_bps);
        }
        assert_eq!(results[2].signal, BasisSignal::StrongNegative);
        assert_eq!(analyzer.spreads(), &cds());
    }

    #[test]
    fn test_stress_on_tight_name_keeps_every_scenario() {
        let rates = treasury();
        let tight = SpreadCurve::new([(1.0, 20.0), (5.0, 35.0), (7.0, 40.0), (10.0, 45.0)]).unwrap();
        let analyzer = BasisAnalyzer::new(bond(), 94.50, &rates, tight).unwrap();

        let results = analyzer.stress_test(&DEFAULT_SHOCKS_BPS).unwrap();
        assert_eq!(results.len(), DEFAULT_SHOCKS_BPS.len());

        let flagged: Vec<f64> = results
            .iter()
            .filter(|r| !r.is_repriced())
            .map(|r| r.shock_bps)
            .collect();
        assert_eq!(flagged, [-50.0]);
        assert_eq!(results[0].cds_spread_bps, -10.0);

        let prices: Vec<f64> = results.iter().filter_map(|r| r.synthetic_price).collect();
        assert_eq!(prices.len(), 5);
        assert!(prices.windows(2).all(|w| w[1] < w[0]), "{prices:?}");
    }

    #[test]
    fn test_rejects_bad_price() {
        let rates = treasury();
        assert!(BasisAnalyzer::new(bond(), 0.0, &rates, cds()).is_err());
        assert!(BasisAnalyzer::new(bond(), f64::NAN, &rates, cds()).is_err());
    }
}
