// Copyright 2025 the Scatterscope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{
    BatchSize, BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main,
};
use kurbo::{Point, Rect, Vec2};
use scatter_index::SpatialQuery;
use scatter_index::backends::{GridIndex, LinearScan};

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
}

/// Uniform scatter over a 1600x1200 canvas with radii in [2, 5).
fn gen_uniform(count: usize) -> Vec<(Point, f64)> {
    let mut rng = Rng::new(0x81FD_BEE7_94F0_AF1A);
    (0..count)
        .map(|_| {
            let p = Point::new(rng.next_f64() * 1600.0, rng.next_f64() * 1200.0);
            (p, 2.0 + rng.next_f64() * 3.0)
        })
        .collect()
}

/// Embedding-like clusters: dense blobs with empty space between them.
fn gen_clustered(n_clusters: usize, per_cluster: usize, spread: f64) -> Vec<(Point, f64)> {
    let mut rng = Rng::new(0xC1A5_7E55_9999_ABCD);
    let centers: Vec<Point> = (0..n_clusters)
        .map(|_| Point::new(rng.next_f64() * 1600.0, rng.next_f64() * 1200.0))
        .collect();
    let mut out = Vec::with_capacity(n_clusters * per_cluster);
    for c in centers {
        for _ in 0..per_cluster {
            let d = Vec2::new(rng.next_f64() - 0.5, rng.next_f64() - 0.5) * spread;
            out.push((c + d, 3.0));
        }
    }
    out
}

fn probes(count: usize) -> Vec<Point> {
    let mut rng = Rng::new(0x3C6E_F35F_4750_2932);
    (0..count)
        .map(|_| Point::new(rng.next_f64() * 1600.0, rng.next_f64() * 1200.0))
        .collect()
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("index/build");
    for n in [1_000_usize, 10_000, 100_000] {
        let pts = gen_uniform(n);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::new("grid", n), &pts, |b, pts| {
            b.iter_batched(
                || pts.clone(),
                |pts| black_box(GridIndex::build(pts, GridIndex::suggest_cell_size(3.5))),
                BatchSize::LargeInput,
            );
        });
        group.bench_with_input(BenchmarkId::new("linear", n), &pts, |b, pts| {
            b.iter_batched(
                || pts.clone(),
                |pts| black_box(LinearScan::build(pts)),
                BatchSize::LargeInput,
            );
        });
    }
    group.finish();
}

fn bench_hover(c: &mut Criterion) {
    let mut group = c.benchmark_group("index/nearest");
    let queries = probes(256);
    for n in [1_000_usize, 10_000, 100_000] {
        let pts = gen_clustered(40, n / 40, 120.0);
        let grid = GridIndex::build(pts.iter().copied(), GridIndex::suggest_cell_size(3.0));
        let flat = LinearScan::build(pts.iter().copied());
        group.throughput(Throughput::Elements(queries.len() as u64));
        group.bench_function(BenchmarkId::new("grid", n), |b| {
            b.iter(|| {
                for q in &queries {
                    black_box(grid.nearest(*q, 6.0));
                }
            });
        });
        group.bench_function(BenchmarkId::new("linear", n), |b| {
            b.iter(|| {
                for q in &queries {
                    black_box(flat.nearest(*q, 6.0));
                }
            });
        });
    }
    group.finish();
}

fn bench_marquee(c: &mut Criterion) {
    let mut group = c.benchmark_group("index/query_rect");
    let pts = gen_uniform(50_000);
    let grid = GridIndex::build(pts.iter().copied(), GridIndex::suggest_cell_size(3.5));
    let flat = LinearScan::build(pts.iter().copied());
    for side in [32.0_f64, 256.0, 1024.0] {
        let rect = Rect::new(300.0, 200.0, 300.0 + side, 200.0 + side);
        group.bench_with_input(BenchmarkId::new("grid", side as u32), &rect, |b, r| {
            b.iter(|| black_box(grid.query_rect(*r)));
        });
        group.bench_with_input(BenchmarkId::new("linear", side as u32), &rect, |b, r| {
            b.iter(|| black_box(flat.query_rect(*r)));
        });
    }
    group.finish();
}

fn bench_pan(c: &mut Criterion) {
    // A pan shifts the grid instead of rebuilding it.
    let mut group = c.benchmark_group("index/pan");
    let pts = gen_uniform(50_000);
    let grid = GridIndex::build(pts.iter().copied(), GridIndex::suggest_cell_size(3.5));
    group.bench_function("translate", |b| {
        b.iter_batched(
            || grid.clone(),
            |mut g| {
                g.translate(Vec2::new(3.0, -2.0));
                black_box(g.nearest(Point::new(400.0, 300.0), 6.0))
            },
            BatchSize::LargeInput,
        );
    });
    group.bench_function("rebuild", |b| {
        b.iter(|| {
            let g = GridIndex::build(
                pts.iter().map(|&(p, r)| (p + Vec2::new(3.0, -2.0), r)),
                GridIndex::suggest_cell_size(3.5),
            );
            black_box(g.nearest(Point::new(400.0, 300.0), 6.0))
        });
    });
    group.finish();
}

criterion_group!(benches, bench_build, bench_hover, bench_marquee, bench_pan);
criterion_main!(benches);
