// Copyright 2025 the Scatterscope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::Point;
use scatter_chart::{ChartConfig, ChartEvent, DataPoint, ScatterChart, ZoomAxis};

fn chart(n: usize) -> ScatterChart<u32> {
    let mut chart = ScatterChart::new(ChartConfig::default(), 1600.0, 1200.0);
    let points: Vec<DataPoint<u32>> = (0..n as u32)
        .map(|i| {
            let t = f64::from(i);
            DataPoint::new((t * 0.618_033_988_7).fract(), (t * 0.414_213_562_3).fract(), i)
        })
        .collect();
    chart.set_points(points);
    chart
}

fn bench_hover_sweep(c: &mut Criterion) {
    let mut group = c.benchmark_group("chart/hover_sweep");
    for n in [1_000_usize, 20_000] {
        let mut chart = chart(n);
        group.throughput(Throughput::Elements(200));
        group.bench_function(BenchmarkId::from_parameter(n), |b| {
            b.iter(|| {
                for i in 0..200 {
                    let x = f64::from(i) * 7.0;
                    black_box(chart.handle_event(ChartEvent::PointerMove {
                        pointer: 1,
                        pos: Point::new(x, x * 0.6),
                    }));
                }
            });
        });
    }
    group.finish();
}

fn bench_zoom_then_draw(c: &mut Criterion) {
    let mut group = c.benchmark_group("chart/zoom_then_draw");
    for n in [1_000_usize, 20_000] {
        let mut chart = chart(n);
        group.bench_function(BenchmarkId::from_parameter(n), |b| {
            let mut sign = -1.0;
            b.iter(|| {
                sign = -sign;
                chart.handle_event(ChartEvent::Wheel {
                    pos: Point::new(800.0, 600.0),
                    delta_y: sign,
                    axis: ZoomAxis::Both,
                });
                chart.take_frame();
                black_box(chart.draw_list())
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_hover_sweep, bench_zoom_then_draw);
criterion_main!(benches);
