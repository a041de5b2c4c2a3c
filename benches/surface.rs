//! Benchmarks for the per-frame surface evaluation
//!
//! Run with: cargo bench

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use glam::Vec3;
use ragingsea::ocean::{elevation, noise::cnoise, SurfaceMesh};
use ragingsea::params::{OceanParams, SnapshotConfig, SurfaceConfig};
use ragingsea::snapshot::render_snapshot;

/// Single noise sample, the innermost cost of the small-wave band
fn bench_noise(c: &mut Criterion) {
    let p = Vec3::new(1.37, -0.42, 0.8);
    c.bench_function("cnoise", |b| b.iter(|| cnoise(black_box(p))));
}

/// Full elevation per octave count
fn bench_elevation(c: &mut Criterion) {
    let mut group = c.benchmark_group("elevation");

    for iterations in [0u32, 2, 4, 5] {
        let params = OceanParams {
            small_wave_iterations: iterations,
            elapsed_time: 1.25,
            ..OceanParams::default()
        };
        group.bench_with_input(BenchmarkId::from_parameter(iterations), &params, |b, p| {
            b.iter(|| elevation(black_box(0.31), black_box(-0.57), p.elapsed_time, p))
        });
    }

    group.finish();
}

/// Displacing the whole mesh is what every frame pays before upload.
///
/// 512 subdivisions is the default window surface.
fn bench_displace(c: &mut Criterion) {
    let mut group = c.benchmark_group("displace");
    group.sample_size(20);

    for subdivisions in [128usize, 256, 512] {
        let mut mesh = SurfaceMesh::new(&SurfaceConfig {
            subdivisions,
            extent: 2.0,
        });
        let params = OceanParams {
            elapsed_time: 3.0,
            ..OceanParams::default()
        };

        group.throughput(Throughput::Elements(mesh.vertices.len() as u64));
        group.bench_function(BenchmarkId::from_parameter(subdivisions), |b| {
            b.iter(|| mesh.displace(black_box(&params)))
        });
    }

    group.finish();
}

fn bench_snapshot(c: &mut Criterion) {
    let mut group = c.benchmark_group("snapshot");
    group.sample_size(10);

    let config = SnapshotConfig {
        size: 256,
        ..SnapshotConfig::default()
    };
    group.bench_function("256", |b| {
        b.iter(|| render_snapshot(black_box(&OceanParams::default()), &config))
    });

    group.finish();
}

criterion_group!(benches, bench_noise, bench_elevation, bench_displace, bench_snapshot);
criterion_main!(benches);
