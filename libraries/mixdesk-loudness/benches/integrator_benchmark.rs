//! Performance benchmarks for loudness measurement
//!
//! Run with: cargo bench -p mixdesk-loudness --bench integrator_benchmark

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use mixdesk_core::{SampleBuffer, SampleRate};
use mixdesk_loudness::{apply, design, LoudnessMeter};
use std::f32::consts::PI;

/// Generate a planar test signal (1kHz sine wave)
fn generate_test_signal(sample_rate: u32, duration_secs: f32, channels: usize) -> SampleBuffer {
    let num_samples = (sample_rate as f32 * duration_secs) as usize;
    let frequency = 1000.0;
    let channel: Vec<f32> = (0..num_samples)
        .map(|i| 0.5 * (2.0 * PI * frequency * i as f32 / sample_rate as f32).sin())
        .collect();

    SampleBuffer::new(vec![channel; channels], SampleRate::new(sample_rate)).unwrap()
}

fn bench_channel_layouts(c: &mut Criterion) {
    let mut group = c.benchmark_group("integrated_loudness");
    let sample_rate = 48_000;
    let duration = 10.0;

    for channels in [1, 2, 6] {
        let buffer = generate_test_signal(sample_rate, duration, channels);
        group.throughput(Throughput::Elements((buffer.frames() * channels) as u64));

        group.bench_with_input(
            BenchmarkId::new("48k_10s", format!("{}ch", channels)),
            &buffer,
            |b, buffer| {
                let meter = LoudnessMeter::new(sample_rate);
                b.iter(|| black_box(meter.analyze(black_box(buffer))));
            },
        );
    }

    group.finish();
}

fn bench_sample_rates(c: &mut Criterion) {
    let mut group = c.benchmark_group("integrated_loudness_rates");

    for sample_rate in [44_100, 48_000, 96_000, 192_000] {
        let buffer = generate_test_signal(sample_rate, 5.0, 2);
        group.throughput(Throughput::Elements(buffer.frames() as u64));

        group.bench_with_input(
            BenchmarkId::from_parameter(sample_rate),
            &buffer,
            |b, buffer| {
                let meter = LoudnessMeter::new(sample_rate);
                b.iter(|| black_box(meter.analyze(black_box(buffer))));
            },
        );
    }

    group.finish();
}

fn bench_k_weighting(c: &mut Criterion) {
    let (pre_filter, high_pass) = design(48_000);
    let signal: Vec<f64> = (0..48_000).map(|i| (i as f64 * 0.13).sin()).collect();

    c.bench_function("k_weighting_1s_mono", |b| {
        b.iter(|| {
            let mut samples = signal.clone();
            apply(&mut samples, &pre_filter);
            apply(&mut samples, &high_pass);
            black_box(samples)
        });
    });
}

criterion_group!(
    benches,
    bench_channel_layouts,
    bench_sample_rates,
    bench_k_weighting
);
criterion_main!(benches);
