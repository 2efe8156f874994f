//! Criterion micro-benchmarks for lattice reads, writes and queries.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use growlat_bench::{checkerboard, idla_cluster, scatter_sites};
use growlat_core::Rect;
use growlat_lattice::GrowingLattice;

/// Benchmark: 10K writes along a row-major sweep (hint always hits).
fn bench_set_sweep_10k(c: &mut Criterion) {
    c.bench_function("set_sweep_10k", |b| {
        b.iter(|| {
            let mut l: GrowingLattice<u8, 30> = GrowingLattice::new(0, 1).unwrap();
            for x in 0..100i64 {
                for y in 0..100i64 {
                    l.set(2, x, y);
                }
            }
            black_box(l.non_empty_count());
        });
    });
}

/// Benchmark: 10K writes scattered over a 2001x2001 window (hint mostly misses).
fn bench_set_scattered_10k(c: &mut Criterion) {
    let sites = scatter_sites(10_000, 1_000, 42);

    c.bench_function("set_scattered_10k", |b| {
        b.iter(|| {
            let mut l: GrowingLattice<u8, 30> = GrowingLattice::new(0, 1).unwrap();
            for &(x, y) in &sites {
                l.set(2, x, y);
            }
            black_box(l.memory());
        });
    });
}

/// Benchmark: 10K reads scattered inside an IDLA blob.
fn bench_get_scattered_10k(c: &mut Criterion) {
    let l = idla_cluster::<10>(20_000, 7);
    let sites = scatter_sites(10_000, 90, 3);

    c.bench_function("get_scattered_10k", |b| {
        b.iter(|| {
            let mut full = 0u32;
            for &(x, y) in &sites {
                full += u32::from(l.get(x, y));
            }
            black_box(full);
        });
    });
}

/// Benchmark: grow an IDLA cluster of 5K particles.
fn bench_idla_5k(c: &mut Criterion) {
    c.bench_function("idla_5k", |b| {
        b.iter(|| {
            let l = idla_cluster::<10>(5_000, 11);
            black_box(l.full_count());
        });
    });
}

/// Benchmark: improved enclosing rectangles at 1K sites in a full blob.
fn bench_improved_rect_1k(c: &mut Criterion) {
    let l = idla_cluster::<5>(40_000, 5);
    let sites = scatter_sites(1_000, 80, 13);

    c.bench_function("improved_rect_1k", |b| {
        b.iter(|| {
            for &(x, y) in &sites {
                black_box(l.improved_enclosing_rect_full(x, y));
            }
        });
    });
}

/// Benchmark: deep copy of an uncompressible 201x201 checkerboard.
fn bench_clone_checkerboard(c: &mut Criterion) {
    let l = checkerboard::<10>(Rect::new(-100, 100, -100, 100));

    c.bench_function("clone_checkerboard_201", |b| {
        b.iter(|| black_box(l.clone()));
    });
}

criterion_group!(
    benches,
    bench_set_sweep_10k,
    bench_set_scattered_10k,
    bench_get_scattered_10k,
    bench_idla_5k,
    bench_improved_rect_1k,
    bench_clone_checkerboard
);
criterion_main!(benches);
