//! # Registry Benchmarks
//!
//! Performance benchmarks for featuregate-core lookups.
//!
//! Run with: `cargo bench -p featuregate-core`

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use featuregate_core::{DeprecationValidator, FlagRegistry};
use std::hint::black_box;

/// Build a registry with N enabled, N disabled and N disallowed names.
fn create_registry(size: usize) -> FlagRegistry {
    let enabled: Vec<String> = (0..size)
        .map(|i| format!("envoy.reloadable_features.on_{i}"))
        .collect();
    let disabled: Vec<String> = (0..size)
        .map(|i| format!("envoy.reloadable_features.off_{i}"))
        .collect();
    let disallowed: Vec<String> = (0..size)
        .map(|i| format!("envoy.deprecated_features.f{i}.proto:field"))
        .collect();
    FlagRegistry::from_lists(&enabled, &disabled, &disallowed).expect("build")
}

// =============================================================================
// BENCHMARKS
// =============================================================================

fn bench_construction(c: &mut Criterion) {
    let mut group = c.benchmark_group("construction");

    group.bench_function("catalog", |b| {
        b.iter(|| black_box(FlagRegistry::new().expect("catalog")));
    });

    for size in [100, 1000, 10000].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            b.iter(|| black_box(create_registry(size)));
        });
    }

    group.finish();
}

fn bench_is_enabled(c: &mut Criterion) {
    let mut group = c.benchmark_group("is_enabled");

    for size in [100, 1000, 10000].iter() {
        let registry = create_registry(*size);
        let hit = format!("envoy.reloadable_features.on_{}", size / 2);

        group.bench_with_input(BenchmarkId::new("hit", size), size, |b, _| {
            b.iter(|| black_box(registry.is_enabled(black_box(&hit))));
        });
        group.bench_with_input(BenchmarkId::new("miss", size), size, |b, _| {
            b.iter(|| black_box(registry.is_enabled(black_box("envoy.reloadable_features.zzz"))));
        });
    }

    group.finish();
}

fn bench_deprecation_check(c: &mut Criterion) {
    let validator = DeprecationValidator::new(FlagRegistry::new().expect("catalog"));

    c.bench_function("check_field_warn", |b| {
        b.iter(|| black_box(validator.check_field("cluster.proto", black_box("hosts"))));
    });
    c.bench_function("check_field_accept", |b| {
        b.iter(|| black_box(validator.check_field("cluster.proto", black_box("name"))));
    });
}

criterion_group!(
    benches,
    bench_construction,
    bench_is_enabled,
    bench_deprecation_check,
);

criterion_main!(benches);
