//! Benchmarks for vedit-core geometry conversions.
//!
//! Run with: cargo bench -p vedit-core

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use vedit_core::{format_timecode, TimelineGeometry};

fn bench_conversions(c: &mut Criterion) {
    let geo = TimelineGeometry::main(2000.0, 1.5, 600.0);

    c.bench_function("time_to_pixel", |bencher| {
        bencher.iter(|| black_box(geo).time_to_pixel(black_box(123.456)));
    });

    c.bench_function("pixel_to_time", |bencher| {
        bencher.iter(|| black_box(geo).pixel_to_time(black_box(1234.5)));
    });
}

fn bench_ruler(c: &mut Criterion) {
    let geo = TimelineGeometry::main(2000.0, 3.0, 3600.0);

    c.bench_function("ruler_marks_1hr", |bencher| {
        bencher.iter(|| black_box(geo).ruler_marks());
    });
}

fn bench_timecode(c: &mut Criterion) {
    c.bench_function("format_timecode", |bencher| {
        bencher.iter(|| format_timecode(black_box(3723.5)));
    });
}

criterion_group!(benches, bench_conversions, bench_ruler, bench_timecode);
criterion_main!(benches);
