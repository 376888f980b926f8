//! Benchmarks for the analysis pipeline and its pricing stages.
//!
//! Run with: cargo bench -p basis-analytics

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};

use basis_analytics::prelude::*;
use basis_curves::prelude::*;

fn bench_pipeline(c: &mut Criterion) {
    let snapshot = MarketSnapshot::demo();
    let settings = AnalysisSettings::default();
    let analysis = CreditAnalysis::new(snapshot.clone(), settings.clone()).unwrap();

    let mut group = c.benchmark_group("pipeline");

    group.bench_function("full_report", |b| {
        b.iter(|| CreditAnalysis::run(black_box(&snapshot), &settings).unwrap())
    });

    group.bench_function("stress_default_shocks", |b| {
        b.iter(|| analysis.stress(black_box(&DEFAULT_SHOCKS_BPS)).unwrap())
    });

    group.finish();
}

fn bench_pricing(c: &mut Criterion) {
    let rates = RateCurve::new([(1.0, 0.048), (5.0, 0.044), (10.0, 0.0425)]).unwrap();
    let hazard = HazardCurve::from_rates(&[(1.0, 0.0133), (5.0, 0.025), (10.0, 0.031)], 0.4).unwrap();
    let bond = BondSpec::new(0.052, 7.0, 2, 100.0, 0.4).unwrap();

    let mut group = c.benchmark_group("pricing");

    group.bench_function("cash_flow_schedule", |b| {
        b.iter(|| CashFlowValuer::new(black_box(&bond), &rates, &hazard).value())
    });

    group.bench_function("yield_to_maturity", |b| {
        let solver = YieldSolver::new();
        b.iter(|| solver.solve(&bond, black_box(94.5)))
    });

    group.bench_function("z_spread", |b| {
        let calc = ZSpreadCalculator::new(&rates);
        b.iter(|| calc.calculate(&bond, black_box(94.5)))
    });

    group.finish();
}

criterion_group!(analytics, bench_pipeline, bench_pricing);
criterion_main!(analytics);
