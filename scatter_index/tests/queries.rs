// Copyright 2025 the Scatterscope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Query behavior shared by every `scatter_index` backend.

use kurbo::{Point, Rect};
use scatter_index::SpatialQuery;
use scatter_index::backends::{GridIndex, LinearScan};

fn abc() -> [(Point, f64); 3] {
    [
        (Point::new(100.0, 100.0), 3.0),
        (Point::new(200.0, 200.0), 3.0),
        (Point::new(700.0, 500.0), 3.0),
    ]
}

fn check_backend(index: &impl SpatialQuery) {
    assert_eq!(index.sequence_len(), 3);
    assert_eq!(index.query_rect(Rect::new(50.0, 50.0, 250.0, 250.0)), [0, 1]);
    // Dragging "backwards" describes the same rectangle.
    assert_eq!(index.query_rect(Rect::new(250.0, 250.0, 50.0, 50.0)), [0, 1]);

    let lasso = [
        Point::new(80.0, 60.0),
        Point::new(260.0, 180.0),
        Point::new(210.0, 260.0),
        Point::new(60.0, 130.0),
    ];
    assert_eq!(index.query_polygon(&lasso), [0, 1]);
    assert!(index.query_polygon(&lasso[..2]).is_empty());

    assert_eq!(index.nearest(Point::new(101.0, 99.0), 0.0), Some(0));
    assert_eq!(index.nearest(Point::new(690.0, 500.0), 12.0), Some(2));
    assert_eq!(index.nearest(Point::new(400.0, 300.0), 12.0), None);
    assert_eq!(index.position(1), Some(Point::new(200.0, 200.0)));
    assert_eq!(index.position(3), None);
}

#[test]
fn linear_scan_answers_queries() {
    check_backend(&LinearScan::build(abc()));
}

#[test]
fn grid_answers_queries() {
    let grid = GridIndex::build(abc(), GridIndex::suggest_cell_size(3.0));
    check_backend(&grid);
    assert_eq!(grid.cell_count(), 3);
}

#[test]
fn lasso_keeps_sequence_order_regardless_of_cells() {
    // Later indices sit in earlier (upper-left) cells.
    let pts: Vec<(Point, f64)> = (0..20_u32)
        .map(|i| {
            let t = f64::from(19 - i);
            (Point::new(10.0 + t * 20.0, 10.0 + t * 15.0), 2.0)
        })
        .collect();
    let grid = GridIndex::build(pts.iter().copied(), 8.0);
    let everything = [
        Point::new(0.0, 0.0),
        Point::new(500.0, 0.0),
        Point::new(500.0, 400.0),
        Point::new(0.0, 400.0),
    ];
    let hits = grid.query_polygon(&everything);
    assert_eq!(hits, (0..20).collect::<Vec<_>>());
}
