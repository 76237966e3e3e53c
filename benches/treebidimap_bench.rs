//! Benchmark for the bidirectional maps.
//!
//! Compares TreeBidiMap and HashBidiMap against a pair of standard maps
//! maintained by hand.

use bidimaps::maps::{HashBidiMap, TreeBidiMap};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::collections::BTreeMap;
use std::hint::black_box;

/// A forward and inverse `BTreeMap` kept in step.
#[derive(Default)]
struct BTreePair {
    forward: BTreeMap<u32, u32>,
    inverse: BTreeMap<u32, u32>,
}

impl BTreePair {
    fn put(&mut self, key: u32, value: u32) {
        if let Some(stale) = self.forward.remove(&key) {
            self.inverse.remove(&stale);
        }
        if let Some(stale) = self.inverse.remove(&value) {
            self.forward.remove(&stale);
        }
        self.forward.insert(key, value);
        self.inverse.insert(value, key);
    }
}

fn scrambled(index: u32) -> u32 {
    index.wrapping_mul(2_654_435_761)
}

// =============================================================================
// put Benchmark
// =============================================================================

fn benchmark_put(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("bidi_put");

    for size in [100_u32, 1000, 10000] {
        group.bench_with_input(BenchmarkId::new("TreeBidiMap", size), &size, |bencher, &size| {
            bencher.iter(|| {
                let mut map = TreeBidiMap::new();
                for index in 0..size {
                    map.put(black_box(index), black_box(scrambled(index)));
                }
                black_box(map)
            });
        });

        group.bench_with_input(BenchmarkId::new("HashBidiMap", size), &size, |bencher, &size| {
            bencher.iter(|| {
                let mut map = HashBidiMap::new();
                for index in 0..size {
                    map.put(black_box(index), black_box(scrambled(index)));
                }
                black_box(map)
            });
        });

        group.bench_with_input(BenchmarkId::new("BTreeMap pair", size), &size, |bencher, &size| {
            bencher.iter(|| {
                let mut pair = BTreePair::default();
                for index in 0..size {
                    pair.put(black_box(index), black_box(scrambled(index)));
                }
                black_box(pair.forward.len())
            });
        });
    }

    group.finish();
}

// =============================================================================
// Eviction Benchmark
// =============================================================================

fn benchmark_evicting_put(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("bidi_evicting_put");

    for size in [100_u32, 1000, 10000] {
        let tree: TreeBidiMap<u32, u32> = (0..size).map(|index| (index, index)).collect();

        // Every put reuses an existing key and an existing value.
        group.bench_with_input(BenchmarkId::new("TreeBidiMap", size), &size, |bencher, &size| {
            bencher.iter_batched(
                || tree.clone(),
                |mut map| {
                    for index in 0..size {
                        map.put(index, (index + 1) % size);
                    }
                    map
                },
                criterion::BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

// =============================================================================
// Lookup Benchmark
// =============================================================================

fn benchmark_lookup(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("bidi_lookup");

    for size in [100_u32, 1000, 10000] {
        let tree: TreeBidiMap<u32, u32> = (0..size).map(|index| (index, scrambled(index))).collect();
        let hash: HashBidiMap<u32, u32> = (0..size).map(|index| (index, scrambled(index))).collect();

        group.bench_with_input(BenchmarkId::new("TreeBidiMap/get", size), &size, |bencher, &size| {
            bencher.iter(|| {
                let mut hits = 0_u32;
                for key in 0..size {
                    hits += u32::from(tree.get(&black_box(key)).is_some());
                }
                black_box(hits)
            });
        });

        group.bench_with_input(BenchmarkId::new("TreeBidiMap/get_key", size), &size, |bencher, &size| {
            bencher.iter(|| {
                let mut hits = 0_u32;
                for index in 0..size {
                    hits += u32::from(tree.get_key(&black_box(scrambled(index))).is_some());
                }
                black_box(hits)
            });
        });

        group.bench_with_input(BenchmarkId::new("HashBidiMap/get_key", size), &size, |bencher, &size| {
            bencher.iter(|| {
                let mut hits = 0_u32;
                for index in 0..size {
                    hits += u32::from(hash.get_key(&black_box(scrambled(index))).is_some());
                }
                black_box(hits)
            });
        });
    }

    group.finish();
}

// =============================================================================
// Cursor Benchmark
// =============================================================================

fn benchmark_cursor(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("bidi_cursor");

    for size in [100_u32, 1000, 10000] {
        let tree: TreeBidiMap<u32, u32> = (0..size).map(|index| (index, scrambled(index))).collect();

        group.bench_with_input(BenchmarkId::new("forward", size), &size, |bencher, _| {
            bencher.iter(|| {
                let mut cursor = tree.cursor();
                let mut count = 0_u32;
                while cursor.move_next() {
                    count += 1;
                }
                black_box(count)
            });
        });

        group.bench_with_input(BenchmarkId::new("backward", size), &size, |bencher, _| {
            bencher.iter(|| {
                let mut cursor = tree.cursor();
                cursor.end();
                let mut count = 0_u32;
                while cursor.move_prev() {
                    count += 1;
                }
                black_box(count)
            });
        });
    }

    group.finish();
}

// =============================================================================
// Criterion Group and Main
// =============================================================================

criterion_group!(
    benches,
    benchmark_put,
    benchmark_evicting_put,
    benchmark_lookup,
    benchmark_cursor
);

criterion_main!(benches);
