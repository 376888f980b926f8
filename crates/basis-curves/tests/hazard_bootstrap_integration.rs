//! Integration test: bootstrap a hazard curve from a default-swap term
//! structure and check the survival curve it implies.
//!
//! Market data (5y-ish investment-grade issuer, 40% recovery):
//!
//! | Tenor | CDS (bps) | Treasury zero |
//! |-------|-----------|---------------|
//! | 3M    |           | 4.95%         |
//! | 6M    |           | 4.90%         |
//! | 1Y    | 80        | 4.80%         |
//! | 2Y    |           | 4.60%         |
//! | 3Y    | 110       |               |
//! | 5Y    | 140       | 4.40%         |
//! | 7Y    | 160       |               |
//! | 10Y   | 180       | 4.25%         |
//! | 30Y   |           | 4.50%         |

use approx::assert_relative_eq;

use basis_curves::prelude::*;

const RECOVERY: f64 = 0.40;

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

fn bootstrap() -> HazardCurve {
    let rates = treasury();
    HazardBootstrapper::new(&rates, RECOVERY)
        .unwrap()
        .bootstrap(&cds())
        .unwrap()
}

#[test]
fn test_full_term_structure_calibrates() {
    let curve = bootstrap();

    assert_eq!(curve.tenors(), vec![1.0, 3.0, 5.0, 7.0, 10.0]);
    assert_eq!(curve.recovery_rate(), RECOVERY);
    assert!(!curve.is_degraded());
    assert_relative_eq!(curve.nodes()[0].hazard_rate, 0.013333, epsilon = 1e-6);

    // Average hazard up to each tenor sits near the credit triangle.
    for (tenor, bps) in cds().points() {
        let average = -curve.survival(tenor).ln() / tenor;
        let triangle = bps / 10_000.0 / (1.0 - RECOVERY);
        assert_relative_eq!(average, triangle, max_relative = 0.08);
    }
}

#[test]
fn test_survival_shape() {
    let curve = bootstrap();

    assert_eq!(curve.survival(0.0), 1.0);
    let s7 = curve.survival(7.0);
    assert!(s7 > 0.80 && s7 < 0.85, "7y survival {s7}");

    let grid: Vec<f64> = (0..=60).map(|k| f64::from(k) * 0.25).collect();
    for pair in grid.windows(2) {
        let (s0, s1) = (curve.survival(pair[0]), curve.survival(pair[1]));
        assert!(s1 < s0, "survival must decrease on ({}, {}]", pair[0], pair[1]);
        assert_relative_eq!(curve.survival(pair[1]) + curve.default_probability(pair[1]), 1.0);
    }
}

#[test]
fn test_forward_hazard_matches_nodes() {
    let curve = bootstrap();
    let nodes = curve.nodes();
    for pair in nodes.windows(2) {
        let fwd = curve.forward_hazard(pair[0].tenor, pair[1].tenor).unwrap();
        assert_relative_eq!(fwd, pair[1].hazard_rate, epsilon = 1e-12);
    }
    assert!(curve.forward_hazard(5.0, 3.0).is_err());
}

#[test]
fn test_reference_tenor_reprices_after_calibration() {
    let rates = treasury();
    let curve = bootstrap();
    let legs = value_legs(&curve, &rates, 0.016, RECOVERY, 7.0, 0.25);
    assert!(legs.residual().abs() < 1e-6, "{legs:?}");
}

#[test]
fn test_uniform_shock_reuses_tenors() {
    let rates = treasury();
    let bootstrapper = HazardBootstrapper::new(&rates, RECOVERY).unwrap();
    let base = cds();
    let shocked = base.with_uniform_spread(185.0).unwrap();

    let curve = bootstrapper.bootstrap(&shocked).unwrap();
    assert_eq!(curve.tenors(), base.tenors().to_vec());
    assert!(curve.survival(7.0) < bootstrap().survival(7.0));
    assert_eq!(base, cds());
}
