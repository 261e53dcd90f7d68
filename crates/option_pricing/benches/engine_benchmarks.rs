//! Criterion benchmarks for Monte Carlo pricing and hedging.
//!
//! Benchmarks cover:
//! - RNG performance (single draws and batch fills)
//! - Price estimate with varying path counts
//! - Delta-hedge simulation with varying rebalancing grids

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use option_core::types::{ContractParameters, OptionType};
use option_pricing::mc::{MonteCarloConfig, MonteCarloHedgeEngine};
use option_pricing::rng::PricerRng;

fn engine(parallel: bool) -> MonteCarloHedgeEngine {
    let contract = ContractParameters::builder()
        .spot(100.0)
        .strike(100.0)
        .rate(0.05)
        .maturity(1.0)
        .volatility(0.2)
        .option_type(OptionType::Call)
        .build()
        .unwrap();
    let config = MonteCarloConfig::builder()
        .seed(42)
        .parallel(parallel)
        .build()
        .unwrap();
    MonteCarloHedgeEngine::new(&contract, config).unwrap()
}

/// Benchmark RNG generation (foundation for MC simulations).
fn bench_rng_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("rng_generation");

    for n_samples in [1_000, 100_000] {
        group.bench_with_input(
            BenchmarkId::new("normal_batch", n_samples),
            &n_samples,
            |b, &n| {
                let mut rng = PricerRng::from_seed(42);
                let mut buffer = vec![0.0; n];
                b.iter(|| {
                    rng.fill_normal(&mut buffer);
                    black_box(buffer.iter().sum::<f64>())
                });
            },
        );
    }

    group.finish();
}

/// Benchmark the terminal-draw price estimate.
fn bench_price_estimate(c: &mut Criterion) {
    let mut group = c.benchmark_group("price_estimate");
    group.sample_size(30);

    for parallel in [false, true] {
        let engine = engine(parallel);
        let label = if parallel { "parallel" } else { "sequential" };
        for n_paths in [10_000, 100_000] {
            group.bench_with_input(BenchmarkId::new(label, n_paths), &n_paths, |b, &n| {
                b.iter(|| engine.price_estimate(black_box(n), false).unwrap());
            });
        }
    }

    group.finish();
}

/// Benchmark the delta-hedge simulation.
fn bench_hedge_pnl(c: &mut Criterion) {
    let mut group = c.benchmark_group("hedge_pnl");
    group.sample_size(10);
    let engine = engine(true);

    for n_steps in [12, 52, 252] {
        group.bench_with_input(BenchmarkId::new("steps", n_steps), &n_steps, |b, &m| {
            b.iter(|| engine.hedge_pnl(0.08, 10_000, black_box(m), false).unwrap());
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_rng_generation,
    bench_price_estimate,
    bench_hedge_pnl
);
criterion_main!(benches);
