use criterion::{Criterion, black_box, criterion_group, criterion_main};
use qr_resample::models::BinaryGrid;
use qr_resample::resample::{VoteRule, resample, sample_stride};
use qr_resample::utils::raster::{decode_raster, render_grid};
use qr_resample::utils::text::{parse_grid, serialize_grid};

fn capture(size: usize) -> BinaryGrid {
    BinaryGrid::from_fn(size, size, |r, c| ((r / 7) * 3 + (c / 7) * 5) % 4 < 2)
        .expect("non-empty capture")
}

fn bench_resample_small(c: &mut Criterion) {
    let grid = capture(203);
    c.bench_function("resample_203_to_29_majority", |b| {
        b.iter(|| resample(black_box(&grid), black_box(29), 0, VoteRule::Majority))
    });
}

fn bench_resample_large(c: &mut Criterion) {
    let grid = capture(1200);
    c.bench_function("resample_1200_to_177_threshold", |b| {
        b.iter(|| resample(black_box(&grid), black_box(177), 9, VoteRule::Above(0.3)))
    });
}

fn bench_sample_stride(c: &mut Criterion) {
    let grid = capture(600);
    c.bench_function("sample_stride_600_by_3", |b| {
        b.iter(|| sample_stride(black_box(&grid), 3, 1, 1))
    });
}

fn bench_text_round_trip(c: &mut Criterion) {
    let text = serialize_grid(&capture(400));
    c.bench_function("parse_grid_400x400", |b| {
        b.iter(|| parse_grid(black_box(&text)))
    });
}

fn bench_raster_decode(c: &mut Criterion) {
    let img = render_grid(&capture(160), 8).expect("render");
    c.bench_function("decode_raster_1280x1280", |b| {
        b.iter(|| decode_raster(black_box(&img), 128))
    });
}

criterion_group!(
    benches,
    bench_resample_small,
    bench_resample_large,
    bench_sample_stride,
    bench_text_round_trip,
    bench_raster_decode
);
criterion_main!(benches);
