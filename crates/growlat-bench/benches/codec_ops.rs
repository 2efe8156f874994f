//! Criterion micro-benchmarks for lattice save/load.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use growlat_bench::{checkerboard, idla_cluster};
use growlat_codec::decode_header;
use growlat_core::Rect;
use growlat_lattice::GrowingLattice;

/// Benchmark: save a 20K-particle IDLA blob to memory.
fn bench_save_idla_20k(c: &mut Criterion) {
    let l = idla_cluster::<10>(20_000, 1);
    let mut buf = Vec::new();
    l.save_to(&mut buf).unwrap();
    let capacity = buf.len();

    c.bench_function("save_idla_20k", |b| {
        b.iter(|| {
            let mut out = Vec::with_capacity(capacity);
            l.save_to(&mut out).unwrap();
            black_box(out);
        });
    });
}

/// Benchmark: load a 20K-particle IDLA blob from memory.
fn bench_load_idla_20k(c: &mut Criterion) {
    let l = idla_cluster::<10>(20_000, 1);
    let mut buf = Vec::new();
    l.save_to(&mut buf).unwrap();

    c.bench_function("load_idla_20k", |b| {
        let mut target: GrowingLattice<u8, 10> = GrowingLattice::new(0, 1).unwrap();
        b.iter(|| {
            target.load_from(buf.as_slice()).unwrap();
            black_box(target.non_empty_count());
        });
    });
}

/// Benchmark: load an uncompressible 201x201 checkerboard.
fn bench_load_checkerboard(c: &mut Criterion) {
    let l = checkerboard::<10>(Rect::new(-100, 100, -100, 100));
    let mut buf = Vec::new();
    l.save_to(&mut buf).unwrap();

    c.bench_function("load_checkerboard_201", |b| {
        let mut target: GrowingLattice<u8, 10> = GrowingLattice::new(0, 1).unwrap();
        b.iter(|| {
            target.load_from(buf.as_slice()).unwrap();
            black_box(target.memory());
        });
    });
}

/// Benchmark: decode only the header.
fn bench_decode_header(c: &mut Criterion) {
    let l = idla_cluster::<10>(1_000, 1);
    let mut buf = Vec::new();
    l.save_to(&mut buf).unwrap();

    c.bench_function("decode_header", |b| {
        b.iter(|| black_box(decode_header(&mut buf.as_slice()).unwrap()));
    });
}

criterion_group!(
    benches,
    bench_save_idla_20k,
    bench_load_idla_20k,
    bench_load_checkerboard,
    bench_decode_header
);
criterion_main!(benches);
