//! End-to-end analysis of one market snapshot.
//!
//! [`CreditAnalysis`] owns the curves built from a snapshot and runs every
//! stage in order: bootstrap, cash-flow valuation, risk at the market price,
//! yield and credit spread, then the basis analysis. The output is an
//! [`AnalysisReport`], which also renders itself as flat table rows.

use std::fmt;

use chrono::{DateTime, Utc};
use log::info;
use serde::{Deserialize, Serialize};

use basis_curves::hazard::{CurveSummary, HazardCurve};
use basis_curves::rate_curve::RateCurve;
use basis_curves::spread_curve::SpreadCurve;

use crate::basis::{AnalysisResult, BasisAnalyzer, StressResult};
use crate::bond::BondSpec;
use crate::cashflows::{CashFlowSchedule, CashFlowValuer};
use crate::error::{AnalyticsError, AnalyticsResult};
use crate::risk::{RiskCalculator, RiskMetrics};
use crate::settings::AnalysisSettings;
use crate::snapshot::{MarketSnapshot, SnapshotMetadata};
use crate::spreads::credit_spread_bps;
use crate::yields::YieldResult;

/// Whether the bond trades below or above its synthetic price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValuationSignal {
    /// Market price below synthetic price.
    Cheap,
    /// Market price at or above synthetic price.
    Rich,
}

impl ValuationSignal {
    /// Classifies `market - synthetic`.
    pub fn from_price_difference(difference: f64) -> Self {
        if difference < 0.0 {
            Self::Cheap
        } else {
            Self::Rich
        }
    }

    /// Display label with the implied action.
    pub fn label(self) -> &'static str {
        match self {
            Self::Cheap => "CHEAP (Buy)",
            Self::Rich => "RICH (Sell)",
        }
    }
}

impl fmt::Display for ValuationSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One line of the tabular report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRow {
    /// Section the metric belongs to.
    pub category: String,
    /// Metric name.
    pub metric: String,
    /// Formatted value.
    pub value: String,
    /// Unit of `value`, empty for labels.
    pub unit: String,
}

impl ReportRow {
    fn new(category: &str, metric: impl Into<String>, value: impl Into<String>, unit: &str) -> Self {
        Self {
            category: category.to_string(),
            metric: metric.into(),
            value: value.into(),
            unit: unit.to_string(),
        }
    }
}

/// Everything one run produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// When the report was produced.
    pub generated_at: DateTime<Utc>,
    /// Snapshot provenance, if any.
    pub metadata: Option<SnapshotMetadata>,
    /// Bond terms.
    pub bond: BondSpec,
    /// Quoted price.
    pub market_price: f64,
    /// Bootstrapped hazard curve.
    pub hazard_curve: HazardCurve,
    /// Tenor-by-tenor survival view of the hazard curve.
    pub curve_summary: CurveSummary,
    /// Survival-weighted cash-flow schedule.
    pub cash_flows: CashFlowSchedule,
    /// Sum of survival-weighted present values.
    pub synthetic_price: f64,
    /// Price with no default risk.
    pub riskless_price: f64,
    /// Risk at the market price.
    pub risk: RiskMetrics,
    /// Yield to maturity at the market price.
    pub yield_result: YieldResult,
    /// Risk-free zero rate at maturity.
    pub risk_free_at_maturity: f64,
    /// Yield over the risk-free rate, in bps.
    pub credit_spread_bps: f64,
    /// Cheap/rich call from market vs synthetic price.
    pub valuation: ValuationSignal,
    /// Basis analysis.
    pub basis: AnalysisResult,
}

impl AnalysisReport {
    /// Flat rows grouped by Market Data, Credit Spreads, Basis Analysis, Risk
    /// and Trading.
    pub fn rows(&self) -> Vec<ReportRow> {
        const MARKET: &str = "Market Data";
        const SPREADS: &str = "Credit Spreads";
        const BASIS: &str = "Basis Analysis";
        const RISK: &str = "Risk";
        const TRADING: &str = "Trading";

        let b = &self.basis;
        vec![
            ReportRow::new(MARKET, "Bond Price", format!("{:.2}", self.market_price), "USD"),
            ReportRow::new(
                MARKET,
                format!("{}Y CDS Spread", b.reference_tenor),
                format!("{:.1}", b.cds_spread_bps),
                "bps",
            ),
            ReportRow::new(
                MARKET,
                "Risk-Free Rate",
                format!("{:.3}", self.risk_free_at_maturity * 100.0),
                "%",
            ),
            ReportRow::new(
                SPREADS,
                "Yield to Maturity",
                format!("{:.3}", self.yield_result.yield_value * 100.0),
                "%",
            ),
            ReportRow::new(SPREADS, "Credit Spread", format!("{:.1}", self.credit_spread_bps), "bps"),
            ReportRow::new(SPREADS, "Z-Spread", format!("{:.1}", b.z_spread_bps), "bps"),
            ReportRow::new(
                SPREADS,
                "Asset Swap Spread",
                format!("{:.1}", b.asset_swap_spread_bps),
                "bps",
            ),
            ReportRow::new(BASIS, "CDS-Bond Basis", format!("{:.1}", b.basis_bps), "bps"),
            ReportRow::new(BASIS, "Synthetic Price", format!("{:.2}", self.synthetic_price), "USD"),
            ReportRow::new(BASIS, "Price Difference", format!("{:.2}", b.price_difference), "points"),
            ReportRow::new(BASIS, "Valuation", self.valuation.label(), ""),
            ReportRow::new(
                RISK,
                "Macaulay Duration",
                format!("{:.3}", self.risk.macaulay_duration),
                "years",
            ),
            ReportRow::new(
                RISK,
                "Modified Duration",
                format!("{:.3}", self.risk.modified_duration),
                "years",
            ),
            ReportRow::new(RISK, "DV01", format!("{:.4}", self.risk.dv01), "USD"),
            ReportRow::new(RISK, "Convexity", format!("{:.3}", self.risk.convexity), ""),
            ReportRow::new(TRADING, "Signal", b.signal.label(), ""),
            ReportRow::new(TRADING, "Rationale", b.rationale.clone(), ""),
        ]
    }
}

/// A validated snapshot with its curves built, ready to analyze.
#[derive(Debug, Clone)]
pub struct CreditAnalysis {
    snapshot: MarketSnapshot,
    settings: AnalysisSettings,
    bond: BondSpec,
    market_price: f64,
    rates: RateCurve,
    spreads: SpreadCurve,
}

impl CreditAnalysis {
    /// Validates `snapshot` and builds its curves.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::Validation`] for any invalid number in the
    /// snapshot.
    pub fn new(snapshot: MarketSnapshot, settings: AnalysisSettings) -> AnalyticsResult<Self> {
        snapshot.validate()?;
        let bond = snapshot.bond.spec()?;
        let rates = snapshot.treasury(settings.interpolation, settings.extrapolation)?;
        let spreads = snapshot.cds()?;
        Ok(Self {
            market_price: snapshot.bond.price,
            snapshot,
            settings,
            bond,
            rates,
            spreads,
        })
    }

    /// One-shot run of the full pipeline.
    pub fn run(snapshot: &MarketSnapshot, settings: &AnalysisSettings) -> AnalyticsResult<AnalysisReport> {
        Self::new(snapshot.clone(), settings.clone())?.report()
    }

    /// Replaces the market price, e.g. to value a hypothetical quote.
    pub fn with_market_price(mut self, price: f64) -> AnalyticsResult<Self> {
        if !price.is_finite() || price <= 0.0 {
            return Err(AnalyticsError::validation(format!(
                "market price must be positive, got {price}"
            )));
        }
        self.market_price = price;
        Ok(self)
    }

    /// The input snapshot.
    pub fn snapshot(&self) -> &MarketSnapshot {
        &self.snapshot
    }

    /// Settings in effect.
    pub fn settings(&self) -> &AnalysisSettings {
        &self.settings
    }

    /// Bond terms.
    pub fn bond(&self) -> &BondSpec {
        &self.bond
    }

    /// Price the analysis runs at.
    pub fn market_price(&self) -> f64 {
        self.market_price
    }

    /// Risk-free curve.
    pub fn rates(&self) -> &RateCurve {
        &self.rates
    }

    /// Default-swap spread curve.
    pub fn spreads(&self) -> &SpreadCurve {
        &self.spreads
    }

    /// A basis analyzer over this run's curves.
    pub fn analyzer(&self) -> AnalyticsResult<BasisAnalyzer<'_>> {
        BasisAnalyzer::with_settings(
            self.bond,
            self.market_price,
            &self.rates,
            self.spreads.clone(),
            self.settings.clone(),
        )
    }

    /// Bootstraps the hazard curve alone.
    pub fn hazard_curve(&self) -> AnalyticsResult<HazardCurve> {
        Ok(self.analyzer()?.hazard_curve().clone())
    }

    /// Runs every stage and assembles the report.
    pub fn report(&self) -> AnalyticsResult<AnalysisReport> {
        let analyzer = self.analyzer()?;
        let hazard = analyzer.hazard_curve();

        let valuer = CashFlowValuer::new(&self.bond, &self.rates, hazard);
        let cash_flows = valuer.value();
        let synthetic_price = cash_flows.total_pv();
        let riskless_price = valuer.riskless_price();

        let risk = RiskCalculator::new(&self.bond, &cash_flows)
            .with_yield_solver(self.settings.yield_solver)
            .metrics_at(self.market_price);
        let yield_result = self.settings.yield_solver.solve(&self.bond, self.market_price);
        let risk_free_at_maturity = self.rates.rate(self.bond.maturity());
        let credit_spread_bps = credit_spread_bps(yield_result.yield_value, risk_free_at_maturity);

        let basis = analyzer.analyze()?;
        let valuation = ValuationSignal::from_price_difference(basis.price_difference);

        info!(
            "{}: synthetic {synthetic_price:.4} vs market {:.4} ({valuation})",
            self.snapshot.ticker().unwrap_or("bond"),
            self.market_price
        );

        Ok(AnalysisReport {
            generated_at: Utc::now(),
            metadata: self.snapshot.metadata.clone(),
            bond: self.bond,
            market_price: self.market_price,
            curve_summary: hazard.summary(),
            hazard_curve: hazard.clone(),
            cash_flows,
            synthetic_price,
            riskless_price,
            risk,
            yield_result,
            risk_free_at_maturity,
            credit_spread_bps,
            valuation,
            basis,
        })
    }

    /// Stress test with explicit shocks in bps.
    pub fn stress(&self, shocks_bps: &[f64]) -> AnalyticsResult<Vec<StressResult>> {
        self.analyzer()?.stress_test(shocks_bps)
    }

    /// Stress test with the configured shocks.
    pub fn stress_default(&self) -> AnalyticsResult<Vec<StressResult>> {
        self.analyzer()?.stress_test_default()
    }
}
