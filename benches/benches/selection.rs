// Copyright 2025 the Scatterscope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{
    BatchSize, BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main,
};
use kurbo::Point;
use scatter_index::backends::GridIndex;
use scatter_selection::{SelectOp, SelectedSet, SelectionEngine, SelectionMode, SelectionShape};

fn scatter(n: usize) -> Vec<(Point, f64)> {
    // Golden-angle spiral: deterministic and evenly spread.
    (0..n)
        .map(|i| {
            let t = i as f64;
            let r = 4.0 * t.sqrt();
            let a = t * 2.399_963_229_728_653;
            (Point::new(600.0 + r * a.cos(), 450.0 + r * a.sin()), 3.0)
        })
        .collect()
}

/// A star-shaped lasso with `vertices` vertices around (600, 450).
fn lasso(vertices: usize) -> Vec<Point> {
    (0..vertices)
        .map(|i| {
            let a = i as f64 / vertices as f64 * std::f64::consts::TAU;
            let r = if i % 2 == 0 { 400.0 } else { 220.0 };
            Point::new(600.0 + r * a.cos(), 450.0 + r * a.sin())
        })
        .collect()
}

fn bench_lasso_commit(c: &mut Criterion) {
    let mut group = c.benchmark_group("selection/lasso_commit");
    for n in [1_000_usize, 10_000, 50_000] {
        let grid = GridIndex::build(scatter(n), GridIndex::suggest_cell_size(3.0));
        for vertices in [16_usize, 256] {
            let path = lasso(vertices);
            group.throughput(Throughput::Elements(n as u64));
            group.bench_with_input(
                BenchmarkId::new(format!("{vertices}v"), n),
                &path,
                |b, path| {
                    b.iter_batched(
                        || {
                            let mut e =
                                SelectionEngine::new(SelectionMode::Select, SelectionShape::Lasso);
                            e.pointer_down(1, path[0], SelectOp::Replace);
                            for p in &path[1..] {
                                e.pointer_move(1, *p);
                            }
                            e
                        },
                        |mut e| black_box(e.pointer_up(1, path[0], &grid)),
                        BatchSize::SmallInput,
                    );
                },
            );
        }
    }
    group.finish();
}

fn bench_replace_with(c: &mut Criterion) {
    let mut group = c.benchmark_group("selection/replace_with");
    for len in [128_usize, 2_048, 32_768] {
        // Reverse order exercises the sort.
        let keys: Vec<usize> = (0..len).rev().collect();
        group.throughput(Throughput::Elements(len as u64));
        group.bench_with_input(BenchmarkId::from_parameter(len), &keys, |b, keys| {
            b.iter_batched(
                SelectedSet::new,
                |mut sel| {
                    sel.replace_with(keys.iter().copied());
                    black_box(sel);
                },
                BatchSize::LargeInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_lasso_commit, bench_replace_with);
criterion_main!(benches);
