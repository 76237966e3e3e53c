//! Benchmark for JSON encoding and decoding of the maps.
//!
//! Compares the crate's maps against standard library collections for serde
//! operations.

use bidimaps::json::{JsonDeserializer, JsonSerializer};
use bidimaps::maps::{LinkedHashMap, TreeBidiMap, TreeMap};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::collections::BTreeMap;
use std::hint::black_box;

// =============================================================================
// Encode Benchmark
// =============================================================================

fn benchmark_encode(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("json_encode");

    for size in [100, 1000, 10000] {
        let tree_map: TreeMap<String, i32> = (0..size).map(|index| (index.to_string(), index)).collect();
        let bidi_map: TreeBidiMap<String, i32> = (0..size).map(|index| (index.to_string(), index)).collect();
        let standard_map: BTreeMap<String, i32> = (0..size).map(|index| (index.to_string(), index)).collect();

        group.bench_with_input(BenchmarkId::new("TreeMap", size), &size, |bencher, _| {
            bencher.iter(|| black_box(tree_map.to_json().unwrap()));
        });

        group.bench_with_input(BenchmarkId::new("TreeBidiMap", size), &size, |bencher, _| {
            bencher.iter(|| black_box(bidi_map.to_json().unwrap()));
        });

        group.bench_with_input(BenchmarkId::new("BTreeMap", size), &size, |bencher, _| {
            bencher.iter(|| black_box(serde_json::to_string(&standard_map).unwrap()));
        });
    }

    group.finish();
}

// =============================================================================
// Decode Benchmark
// =============================================================================

fn benchmark_decode(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("json_decode");

    for size in [100, 1000, 10000] {
        let standard_map: BTreeMap<String, i32> = (0..size).map(|index| (index.to_string(), index)).collect();
        let json = serde_json::to_string(&standard_map).unwrap();

        group.bench_with_input(BenchmarkId::new("TreeMap", size), &json, |bencher, json| {
            bencher.iter(|| {
                let mut map: TreeMap<String, i32> = TreeMap::new();
                map.from_json(json).unwrap();
                black_box(map)
            });
        });

        group.bench_with_input(BenchmarkId::new("TreeBidiMap", size), &json, |bencher, json| {
            bencher.iter(|| {
                let mut map: TreeBidiMap<String, i32> = TreeBidiMap::new();
                map.from_json(json).unwrap();
                black_box(map)
            });
        });

        group.bench_with_input(BenchmarkId::new("LinkedHashMap", size), &json, |bencher, json| {
            bencher.iter(|| {
                let mut map: LinkedHashMap<String, i32> = LinkedHashMap::new();
                map.from_json(json).unwrap();
                black_box(map)
            });
        });

        group.bench_with_input(BenchmarkId::new("BTreeMap", size), &json, |bencher, json| {
            bencher.iter(|| {
                let map: BTreeMap<String, i32> = serde_json::from_str(json).unwrap();
                black_box(map)
            });
        });
    }

    group.finish();
}

// =============================================================================
// Criterion Group and Main
// =============================================================================

criterion_group!(benches, benchmark_encode, benchmark_decode);

criterion_main!(benches);
