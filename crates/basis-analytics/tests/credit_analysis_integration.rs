//! Integration test: snapshot in, report out.
//!
//! Reference scenario: 5.2% 7y semiannual bond at 94.50, 40% recovery,
//! CDS 1/3/5/7/10y = 80/110/140/160/180 bps. Run once on the demo treasury
//! curve and once on a flat 4.25% curve.

use approx::assert_relative_eq;
use proptest::prelude::*;

use basis_analytics::prelude::*;
use basis_curves::prelude::*;

fn flat_snapshot() -> MarketSnapshot {
    let mut snapshot = MarketSnapshot::demo();
    snapshot.treasury_curve = vec![(1.0, 0.0425), (30.0, 0.0425)];
    snapshot.metadata = None;
    snapshot
}

fn run(snapshot: &MarketSnapshot) -> AnalysisReport {
    CreditAnalysis::run(snapshot, &AnalysisSettings::default()).unwrap()
}

#[test]
fn test_flat_treasury_end_to_end() {
    let report = run(&flat_snapshot());
    let hazard = &report.hazard_curve;

    assert_relative_eq!(hazard.hazard_rate(1.0), 0.008 / 0.6, epsilon = 1e-6);
    assert!(hazard.survival(7.0) < hazard.survival(5.0));
    assert!(hazard.survival(5.0) < hazard.survival(1.0));
    assert!(report.synthetic_price < report.riskless_price);
    assert!(!hazard.is_degraded());

    let basis = &report.basis;
    assert_eq!(basis.reference_tenor, 7.0);
    assert!(basis.z_spread_bps > 175.0 && basis.z_spread_bps < 190.0, "{}", basis.z_spread_bps);
    assert_eq!(basis.signal, BasisSignal::StrongNegative);
    assert!(basis.signal.is_negative());
}

#[test]
fn test_demo_snapshot_signals() {
    let report = run(&MarketSnapshot::demo());
    let basis = &report.basis;

    assert!(basis.basis_bps < 0.0 && basis.basis_bps > -20.0, "{}", basis.basis_bps);
    assert_eq!(basis.signal, BasisSignal::ModerateNegative);
    assert!(basis.synthetic_price < 94.50);
    assert_eq!(report.valuation, ValuationSignal::Rich);
    assert!(report.yield_result.yield_value > 0.061 && report.yield_result.yield_value < 0.0625);
    assert!(report.credit_spread_bps > 150.0);
}

#[test]
fn test_identical_snapshots_give_identical_results() {
    let a = run(&MarketSnapshot::demo());
    let b = run(&MarketSnapshot::demo());

    assert_eq!(a.hazard_curve, b.hazard_curve);
    assert_eq!(a.cash_flows, b.cash_flows);
    assert_eq!(a.basis, b.basis);
    assert_eq!(a.risk, b.risk);
    assert_eq!(a.rows(), b.rows());
}

#[test]
fn test_snapshot_json_feeds_pipeline() {
    let json = MarketSnapshot::demo().to_json_pretty().unwrap();
    let parsed = MarketSnapshot::from_json(&json).unwrap();
    assert_eq!(run(&parsed).basis, run(&MarketSnapshot::demo()).basis);
}

#[test]
fn test_stress_through_pipeline() {
    let analysis = CreditAnalysis::new(MarketSnapshot::demo(), AnalysisSettings::default()).unwrap();
    let before = analysis.spreads().clone();

    let results = analysis.stress_default().unwrap();
    assert_eq!(results.len(), DEFAULT_SHOCKS_BPS.len());
    assert_eq!(analysis.spreads(), &before);

    let base = results.iter().find(|r| r.shock_bps == 0.0).unwrap();
    let report = analysis.report().unwrap();
    assert_relative_eq!(base.basis_bps, report.basis.basis_bps);

    // +100 bps turns the moderate negative basis positive.
    let wide = results.iter().find(|r| r.shock_bps == 100.0).unwrap();
    assert_eq!(wide.signal, BasisSignal::StrongPositive);
}

#[test]
fn test_configured_reference_and_thresholds() {
    let settings = AnalysisSettings {
        reference_tenor: Some(10.0),
        thresholds: SignalThresholds { strong_bps: 5.0 },
        ..AnalysisSettings::default()
    };
    let report = CreditAnalysis::run(&MarketSnapshot::demo(), &settings).unwrap();
    assert_eq!(report.basis.cds_spread_bps, 180.0);
    assert_eq!(report.basis.signal, BasisSignal::classify(report.basis.basis_bps, &settings.thresholds));

    let missing = AnalysisSettings {
        reference_tenor: Some(2.0),
        ..AnalysisSettings::default()
    };
    let err = CreditAnalysis::run(&MarketSnapshot::demo(), &missing).unwrap_err();
    assert!(matches!(err, AnalyticsError::UnknownReferenceTenor { .. }));
}

proptest! {
    #[test]
    fn prop_z_spread_reprices(price in 80.0f64..110.0) {
        let rates = RateCurve::new([(1.0, 0.0425)]).unwrap();
        let bond = BondSpec::new(0.052, 7.0, 2, 100.0, 0.4).unwrap();
        let calc = ZSpreadCalculator::new(&rates);
        let result = calc.calculate(&bond, price);

        prop_assert!(!result.is_approximated());
        prop_assert!((calc.price_with_spread(&bond, result.spread) - price).abs() < 1e-3);
    }

    #[test]
    fn prop_synthetic_below_riskless(spread in 20.0f64..800.0, recovery in 0.0f64..0.9) {
        let rates = RateCurve::new([(1.0, 0.0425)]).unwrap();
        let hazard = HazardCurve::from_rates(&[(10.0, spread / 1e4 / (1.0 - recovery))], recovery).unwrap();
        let bond = BondSpec::new(0.05, 5.0, 2, 100.0, recovery).unwrap();
        let valuer = CashFlowValuer::new(&bond, &rates, &hazard);

        let schedule = valuer.value();
        prop_assert!(schedule.total_pv() < valuer.riskless_price());
        for r in schedule.records() {
            prop_assert!((r.survival_probability + r.default_probability - 1.0).abs() < 1e-12);
        }
    }
}
