use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use picomon::{DeviceId, MemorySource, Pipeline, PlotMode, PlotRequest};
use picomon_core::{AveragingFactor, ReductionParameters, Series};
use picomon_reduce::downsample;
use picomon_stability::{AllanDeviation, LinearRegression, SeriesStatistic};
use rand::prelude::*;

/// Random-walk phase with a linear drift
fn generate_phase(size: usize, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut x = 0.0;
    (0..size)
        .map(|i| {
            x += rng.gen_range(-1.0e-12..1.0e-12);
            x + 5.0e-13 * i as f64
        })
        .collect()
}

fn bench_statistics(c: &mut Criterion) {
    let mut group = c.benchmark_group("statistics");
    for &size in &[1_000usize, 5_000, 50_000] {
        let phase = Series::phase(1.0, generate_phase(size, 42));
        group.bench_with_input(BenchmarkId::new("regression", size), &phase, |b, phase| {
            b.iter(|| LinearRegression.compute(black_box(phase)))
        });
        group.bench_with_input(BenchmarkId::new("allan", size), &phase, |b, phase| {
            b.iter(|| AllanDeviation.compute(black_box(phase)))
        });
    }
    group.finish();
}

fn bench_downsample(c: &mut Criterion) {
    let raw = generate_phase(100_000, 7);
    let params = ReductionParameters::new(raw.len(), 5000, AveragingFactor::Auto, 1.0).unwrap();
    c.bench_function("downsample_100k_to_5k", |b| {
        b.iter(|| downsample(black_box(&raw), &params))
    });
}

fn bench_pipeline(c: &mut Criterion) {
    let device = DeviceId::from_code(110).unwrap();
    let mut group = c.benchmark_group("pipeline");
    for &size in &[5_000usize, 86_400] {
        let source =
            MemorySource::new().with_phase_run(&device, 57000.0, 1.0, generate_phase(size, 3));
        for mode in [PlotMode::Phase, PlotMode::Frequency] {
            let request = PlotRequest::new(device, 57000.0, 1.0, 0, mode);
            let pipeline = Pipeline::default();
            group.bench_with_input(
                BenchmarkId::new(format!("{mode:?}"), size),
                &request,
                |b, request| b.iter(|| pipeline.run(&source, black_box(request))),
            );
        }
    }
    group.finish();
}

criterion_group!(benches, bench_statistics, bench_downsample, bench_pipeline);
criterion_main!(benches);
