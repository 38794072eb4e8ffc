//! Normalization and CSV export benchmarks

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use simpleplot::{export_to_writer, normalize, render_spec, Axes, LineSeries, PlotSpec};

/// Line plot with `series` series of `points` points each
fn create_line_spec(series: usize, points: usize) -> PlotSpec {
    let mut rng_state: u64 = 42;
    let mut rand_f64 = || {
        rng_state = rng_state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1);
        (rng_state >> 33) as f64 / (u32::MAX as f64)
    };

    PlotSpec::line(
        (0..series)
            .map(|s| {
                let x: Vec<f64> = (0..points).map(|i| i as f64).collect();
                let y: Vec<f64> = (0..points).map(|_| rand_f64()).collect();
                LineSeries::new(x, y)
                    .with_label(format!("series {}", s))
                    .with_y_error(0.1)
            })
            .collect(),
    )
}

fn bench_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("Normalize");

    for points in [100, 1_000, 10_000] {
        let spec = create_line_spec(4, points);
        group.bench_with_input(BenchmarkId::new("line2d", points), &spec, |b, spec| {
            b.iter(|| black_box(normalize(&spec.data)))
        });
    }

    group.finish();
}

fn bench_export(c: &mut Criterion) {
    let mut group = c.benchmark_group("Export");

    for points in [100, 1_000, 10_000] {
        let spec = create_line_spec(4, points);
        group.bench_with_input(BenchmarkId::new("csv", points), &spec, |b, spec| {
            b.iter(|| {
                let mut out = Vec::with_capacity(points * 64);
                export_to_writer(spec, &mut out).unwrap();
                black_box(out)
            })
        });
    }

    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("Render");

    for points in [100, 10_000] {
        let spec = create_line_spec(4, points);
        group.bench_with_input(BenchmarkId::new("axes", points), &spec, |b, spec| {
            b.iter(|| black_box(render_spec(spec, Axes::new_2d()).unwrap()))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_normalize, bench_export, bench_render);
criterion_main!(benches);
