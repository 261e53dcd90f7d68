//! Criterion benchmarks for option_core numerical kernels.
//!
//! Measures the normal CDF, Brent root finding and adaptive quadrature,
//! the building blocks of every engine.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use option_core::math::distributions::norm_cdf;
use option_core::math::quadrature::AdaptiveQuadrature;
use option_core::math::solvers::{BrentSolver, SolverConfig};

/// Benchmark the normal CDF across the body and tails.
fn bench_norm_cdf(c: &mut Criterion) {
    let mut group = c.benchmark_group("norm_cdf");

    for x in [-8.0, -1.0, 0.0, 2.5] {
        group.bench_with_input(BenchmarkId::from_parameter(x), &x, |b, &x| {
            b.iter(|| norm_cdf(black_box(x)));
        });
    }

    group.finish();
}

/// Benchmark Brent on a smooth transcendental equation.
fn bench_brent(c: &mut Criterion) {
    let solver = BrentSolver::new(SolverConfig::<f64>::default());
    c.bench_function("brent_exp_root", |b| {
        b.iter(|| {
            solver
                .find_root(|x| x.exp() - black_box(3.0), 0.0, 5.0)
                .unwrap()
        });
    });
}

/// Benchmark quadrature on a Gaussian tail over the half line.
fn bench_quadrature(c: &mut Criterion) {
    let quad = AdaptiveQuadrature::with_defaults();
    c.bench_function("gk15_semi_infinite_gaussian", |b| {
        b.iter(|| {
            quad.integrate_semi_infinite(|x| (-0.5 * x * x).exp(), black_box(0.0))
                .unwrap()
        });
    });
}

criterion_group!(benches, bench_norm_cdf, bench_brent, bench_quadrature);
criterion_main!(benches);
