//! Criterion benchmarks comparing placement policies on each profile.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use fitsim_arena::{AllocatorConfig, ArenaAllocator};
use fitsim_bench::{large_object_profile, mixed_size_profile, small_object_profile, Profile};
use fitsim_core::Algorithm;
use fitsim_test_utils::replay;

fn bench_profile(c: &mut Criterion, profile: &Profile) {
    let mut group = c.benchmark_group(profile.name);
    for algorithm in Algorithm::ALL {
        group.bench_with_input(
            BenchmarkId::from_parameter(algorithm),
            &algorithm,
            |b, &algorithm| {
                b.iter(|| {
                    let mut alloc = ArenaAllocator::init(AllocatorConfig::new(
                        profile.arena_size,
                        algorithm,
                    ))
                    .unwrap();
                    let report = replay(&mut alloc, &profile.workload);
                    black_box(report.allocated);
                });
            },
        );
    }
    group.finish();
}

fn bench_small_object(c: &mut Criterion) {
    bench_profile(c, &small_object_profile(42));
}

fn bench_mixed_size(c: &mut Criterion) {
    bench_profile(c, &mixed_size_profile(42));
}

fn bench_large_object(c: &mut Criterion) {
    bench_profile(c, &large_object_profile(42));
}

/// Allocate-then-free on a fragmented arena: measures the search alone.
fn bench_search_fragmented(c: &mut Criterion) {
    let mut group = c.benchmark_group("search_fragmented");
    for algorithm in Algorithm::ALL {
        let mut alloc = ArenaAllocator::init(AllocatorConfig::new(64 * 1024, algorithm)).unwrap();
        let offsets: Vec<_> = (0..1024).map(|_| alloc.allocate(32).unwrap()).collect();
        for offset in offsets.iter().step_by(2) {
            alloc.free(*offset);
        }

        group.bench_function(BenchmarkId::from_parameter(algorithm), |b| {
            b.iter(|| {
                let offset = alloc.allocate(black_box(24)).unwrap();
                alloc.free(offset);
            });
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_small_object,
    bench_mixed_size,
    bench_large_object,
    bench_search_fragmented
);
criterion_main!(benches);
