//! Benchmarks for the per-point sampling pass
//!
//! Measures:
//! - Serial sampling cost across lattice sizes
//! - Parallel speedup with auto-selected chunks
//! - Sensitivity to fixed chunk sizes on a large lattice
//! - Full animator steps through the run loop with output discarded

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};

use gridpulse_foundation::RngStream;
use gridpulse_runtime::executor::{ChunkConfig, RunOptions, run_animation, sample_lattice};
use gridpulse_runtime::lattice::{Lattice, POINT_PHASE_LABEL};
use gridpulse_runtime::sink::NullSink;
use gridpulse_runtime::{
    Animator, AnimatorSettings, Channel, LatticeSpec, NullHost, OscillatorConfig, ScaleSampler,
};

fn all_channels_active() -> AnimatorSettings {
    let mut settings = AnimatorSettings::default();
    for (i, channel) in Channel::ALL.iter().enumerate() {
        *settings.oscillators.get_mut(*channel) = OscillatorConfig::default()
            .with_intensity(0.5)
            .with_frequency(1.0 + i as f64)
            .with_speed(0.25);
    }
    settings
}

fn build_lattice(n: i32) -> Lattice {
    let mut rng = RngStream::derive(42, POINT_PHASE_LABEL);
    // Cube sides are always positive here
    match Lattice::generate(LatticeSpec::cube(n), &mut rng) {
        Ok(lattice) => lattice,
        Err(err) => panic!("benchmark lattice rejected: {err}"),
    }
}

/// Serial vs auto-parallel across lattice sizes
fn bench_lattice_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("lattice_sizes");
    let settings = all_channels_active();
    let phases = [0.1, 0.2, 0.3, 0.4, 0.5, 0.6];

    for n in [8, 16, 32, 64] {
        let lattice = build_lattice(n);
        let sampler = ScaleSampler::from_settings(*lattice.spec(), &phases, &settings);
        group.throughput(Throughput::Elements(lattice.len() as u64));

        group.bench_with_input(BenchmarkId::new("serial", n), &n, |b, _| {
            b.iter(|| {
                sample_lattice(black_box(&sampler), black_box(&lattice), &ChunkConfig::serial())
            })
        });

        let auto = ChunkConfig::auto(lattice.len());
        group.bench_with_input(BenchmarkId::new("auto", n), &n, |b, _| {
            b.iter(|| sample_lattice(black_box(&sampler), black_box(&lattice), &auto))
        });
    }

    group.finish();
}

/// Fixed chunk sizes on a 64^3 lattice
fn bench_chunk_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("chunk_sizes");
    let settings = all_channels_active();
    let phases = [0.0; Channel::COUNT];
    let lattice = build_lattice(64);
    let sampler = ScaleSampler::from_settings(*lattice.spec(), &phases, &settings);
    group.throughput(Throughput::Elements(lattice.len() as u64));

    for chunk_size in [64, 256, 1024, 4096] {
        let config = ChunkConfig {
            chunk_size,
            serial_threshold: 0,
        };
        group.bench_with_input(
            BenchmarkId::from_parameter(chunk_size),
            &chunk_size,
            |b, _| b.iter(|| sample_lattice(black_box(&sampler), black_box(&lattice), &config)),
        );
    }

    group.finish();
}

/// Ten animator steps on a 32^3 lattice, frames sent to a `NullSink`
fn bench_run_loop(c: &mut Criterion) {
    let mut group = c.benchmark_group("run_loop");
    let mut animator = Animator::new(all_channels_active(), NullHost, 42);
    if !animator.build(Some(()), LatticeSpec::cube(32)).is_built() {
        panic!("benchmark lattice rejected");
    }
    group.throughput(Throughput::Elements(10 * 32 * 32 * 32));

    group.bench_function("null_sink", |b| {
        b.iter(|| {
            let options = RunOptions {
                steps: 10,
                dt: 0.016,
                sink: Some(Box::new(NullSink)),
                ..RunOptions::default()
            };
            match run_animation(&mut animator, options) {
                Ok(report) => black_box(report),
                Err(err) => panic!("run failed: {err}"),
            }
        })
    });

    group.finish();
}

criterion_group!(benches, bench_lattice_sizes, bench_chunk_sizes, bench_run_loop);
criterion_main!(benches);
