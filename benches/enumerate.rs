//! Benchmarks for run detection and move enumeration.
//!
//! Enumeration runs one detection pass per adjacent pair on a scratch
//! clone, so its cost tracks board area times detection cost.
//!
//! Run with: cargo bench --bench enumerate

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use gem_match::{find_runs, BoardConfig, CascadeResolver, Grid, MoveEnumerator, MoveScope};
use std::hint::black_box;

fn settled(width: usize, height: usize) -> Grid {
    let config = BoardConfig::default().with_size(width, height);
    let mut resolver = CascadeResolver::from_config(&config);
    let mut grid = resolver.fill(width, height);
    resolver
        .resolve(&mut grid)
        .expect("default gem count settles");
    grid
}

// =============================================================================
// Detection
// =============================================================================

fn bench_detect(c: &mut Criterion) {
    let mut group = c.benchmark_group("detect");

    for (w, h) in [(9, 4), (12, 8)] {
        group.throughput(Throughput::Elements((w * h) as u64));
        let grid = settled(w, h);
        group.bench_with_input(BenchmarkId::new("find_runs", format!("{w}x{h}")), &grid, |b, grid| {
            b.iter(|| black_box(find_runs(grid)))
        });
    }

    group.finish();
}

// =============================================================================
// Enumeration
// =============================================================================

fn bench_enumerate(c: &mut Criterion) {
    let mut group = c.benchmark_group("enumerate");

    for (w, h) in [(9, 4), (12, 8)] {
        group.throughput(Throughput::Elements((w * h) as u64));
        let grid = settled(w, h);

        for scope in [MoveScope::Interior, MoveScope::Full] {
            let mut enumerator = MoveEnumerator::new(scope);
            group.bench_with_input(
                BenchmarkId::new(format!("{scope:?}"), format!("{w}x{h}")),
                &grid,
                |b, grid| b.iter(|| black_box(enumerator.enumerate(grid).map(<[_]>::len))),
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_detect, bench_enumerate);
criterion_main!(benches);
