//! Benchmarks for mco_engine.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use mco_engine::api;
use mco_engine::context::SimulationContext;
use mco_engine::lattice::price_american_binomial;
use mco_models::instruments::{OptionKind, OptionTerms};

fn bench_ctx(paths: usize) -> SimulationContext {
    let mut ctx = SimulationContext::with_seed(42);
    ctx.set_num_paths(paths);
    ctx.set_num_steps(252);
    ctx
}

fn benchmark_european_mc(c: &mut Criterion) {
    let mut group = c.benchmark_group("european_mc");
    for paths in [10_000usize, 100_000] {
        group.bench_with_input(BenchmarkId::from_parameter(paths), &paths, |b, &paths| {
            let mut ctx = bench_ctx(paths);
            b.iter(|| {
                api::european_call(
                    black_box(&mut ctx),
                    black_box(100.0),
                    100.0,
                    0.05,
                    0.2,
                    1.0,
                )
            })
        });
    }
    group.finish();
}

fn benchmark_variance_reduction(c: &mut Criterion) {
    let mut group = c.benchmark_group("variance_reduction");

    group.bench_function("plain", |b| {
        let mut ctx = bench_ctx(50_000);
        ctx.set_antithetic(false);
        b.iter(|| api::european_call(black_box(&mut ctx), 100.0, 100.0, 0.05, 0.2, 1.0))
    });
    group.bench_function("antithetic_control_variate", |b| {
        let mut ctx = bench_ctx(50_000);
        ctx.set_control_variates(true);
        b.iter(|| api::european_call(black_box(&mut ctx), 100.0, 100.0, 0.05, 0.2, 1.0))
    });

    group.finish();
}

fn benchmark_american_lsm(c: &mut Criterion) {
    c.bench_function("american_put_lsm_50_dates", |b| {
        let mut ctx = bench_ctx(20_000);
        b.iter(|| api::american_put(black_box(&mut ctx), 100.0, 100.0, 0.05, 0.2, 1.0))
    });
}

fn benchmark_binomial(c: &mut Criterion) {
    let terms = OptionTerms::new(OptionKind::Put, 100.0, 100.0, 0.05, 0.2, 1.0).unwrap();
    c.bench_function("american_put_binomial_1000", |b| {
        b.iter(|| price_american_binomial(black_box(&terms), 1_000))
    });
}

criterion_group!(
    benches,
    benchmark_european_mc,
    benchmark_variance_reduction,
    benchmark_american_lsm,
    benchmark_binomial
);
criterion_main!(benches);
