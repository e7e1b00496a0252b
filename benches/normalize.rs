//! Benchmarks for name normalization and session cache lookups.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use taxalign::domain::models::AlignedName;
use taxalign::services::{normalize, SessionCache};

const NAMES: [&str; 4] = [
    "Quercus alba",
    "  quercus ALBA var. alba ",
    "Carex x stipata subsp. stipata (Muhl.)",
    "Crépis capillaris f. glandulosa",
];

fn bench_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize");
    for name in NAMES {
        group.bench_with_input(BenchmarkId::from_parameter(name.trim()), name, |b, name| {
            b.iter(|| normalize(black_box(name)));
        });
    }
    group.finish();
}

fn bench_cache_lookup(c: &mut Criterion) {
    let mut cache = SessionCache::new();
    for i in 0..10_000 {
        cache.put(
            format!("genus{i} species"),
            AlignedName {
                name: format!("Genus{i} species"),
                authorship: "L.".to_string(),
                family: "Fagaceae".to_string(),
            },
        );
    }

    c.bench_function("cache_hit_after_normalize", |b| {
        b.iter(|| cache.get(&normalize(black_box("Genus5000  SPECIES."))));
    });
    c.bench_function("cache_miss_after_normalize", |b| {
        b.iter(|| cache.get(&normalize(black_box("Quercus alba"))));
    });
}

criterion_group!(benches, bench_normalize, bench_cache_lookup);
criterion_main!(benches);
