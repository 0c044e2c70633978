//! Criterion benchmarks for rule evaluation.
//!
//! Benchmarks:
//! 1. Static allocation rules over a synthetic random walk
//! 2. Regression rules (signal + regression + sizing pipeline)
//! 3. Building the standard registries

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use allocrules_core::params::{params, Params};
use allocrules_core::registry::Registries;
use allocrules_core::synthetic::random_walk;
use chrono::NaiveDate;
use polars::prelude::DataFrame;

fn market(rows: usize) -> DataFrame {
    random_walk(rows, 42, NaiveDate::from_ymd_opt(2020, 1, 2).unwrap()).unwrap()
}

fn bench_allocation_rules(c: &mut Criterion) {
    let registries = Registries::standard().unwrap();
    let mut group = c.benchmark_group("allocation_rules");
    for rows in [1_000usize, 10_000] {
        let base = market(rows);
        for (name, overrides) in [
            ("fifty_fifty", Params::new()),
            ("high_low_difference", params(&[("scale", 2.0)])),
            ("sma_crossover_strategy", params(&[("fast", 10.0), ("slow", 50.0)])),
        ] {
            let rule = registries.get(name).unwrap();
            group.bench_with_input(BenchmarkId::new(name, rows), &base, |b, base| {
                b.iter(|| {
                    let mut df = base.clone();
                    rule.invoke(&mut df, black_box(&overrides)).unwrap();
                    df
                })
            });
        }
    }
    group.finish();
}

fn bench_regression_rules(c: &mut Criterion) {
    let registries = Registries::standard().unwrap();
    let base = market(5_000);
    let mut group = c.benchmark_group("regression_rules");
    for descriptor in registries.regression.iter() {
        group.bench_function(&descriptor.name, |b| {
            b.iter(|| {
                let mut df = base.clone();
                descriptor.invoke(&mut df, &Params::new()).unwrap();
                df
            })
        });
    }
    group.finish();
}

fn bench_registry_build(c: &mut Criterion) {
    c.bench_function("registries_standard", |b| {
        b.iter(|| black_box(Registries::standard().unwrap()))
    });
}

criterion_group!(
    benches,
    bench_allocation_rules,
    bench_regression_rules,
    bench_registry_build
);
criterion_main!(benches);
