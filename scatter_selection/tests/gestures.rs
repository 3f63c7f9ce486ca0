// Copyright 2025 the Scatterscope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end gestures against the grid index.

use kurbo::Point;
use scatter_index::backends::GridIndex;
use scatter_selection::{
    GestureOutcome, GesturePhase, SelectOp, SelectionEngine, SelectionMode, SelectionShape,
};

fn grid() -> GridIndex {
    GridIndex::build(
        [
            (Point::new(100.0, 100.0), 3.0),
            (Point::new(200.0, 200.0), 3.0),
            (Point::new(700.0, 500.0), 3.0),
            (Point::new(f64::NAN, 10.0), 3.0),
        ],
        GridIndex::suggest_cell_size(3.0),
    )
}

#[test]
fn lasso_around_two_points() {
    let index = grid();
    let mut engine = SelectionEngine::new(SelectionMode::Select, SelectionShape::Lasso);
    engine.pointer_down(3, Point::new(80.0, 60.0), SelectOp::Replace);
    for p in [
        Point::new(260.0, 180.0),
        Point::new(210.0, 260.0),
        Point::new(60.0, 130.0),
    ] {
        assert_eq!(engine.pointer_move(3, p), GestureOutcome::Updated);
    }
    assert_eq!(engine.active_outline().map(|o| o.len()), Some(4));
    let outcome = engine.pointer_up(3, Point::new(60.0, 130.0), &index);
    assert_eq!(outcome, GestureOutcome::Committed(vec![0, 1]));
}

#[test]
fn rectangle_outline_reports_four_corners() {
    let mut engine = SelectionEngine::new(SelectionMode::Select, SelectionShape::Rectangle);
    engine.pointer_down(1, Point::new(40.0, 30.0), SelectOp::Replace);
    engine.pointer_move(1, Point::new(10.0, 90.0));
    let outline = engine.active_outline().unwrap();
    assert_eq!(
        outline,
        vec![
            Point::new(10.0, 30.0),
            Point::new(40.0, 30.0),
            Point::new(40.0, 90.0),
            Point::new(10.0, 90.0),
        ]
    );
}

#[test]
fn click_on_empty_space_reports_none() {
    let index = grid();
    let mut engine = SelectionEngine::default();
    engine.pointer_down(1, Point::new(400.0, 300.0), SelectOp::Replace);
    assert_eq!(
        engine.pointer_up(1, Point::new(401.0, 300.0), &index),
        GestureOutcome::Clicked(None)
    );
    assert_eq!(engine.phase(), GesturePhase::Idle);
}

#[test]
fn custom_click_threshold() {
    let index = grid();
    let mut engine = SelectionEngine::new(SelectionMode::Select, SelectionShape::Rectangle)
        .with_click_threshold(20.0);
    engine.pointer_down(1, Point::new(98.0, 98.0), SelectOp::Replace);
    // Ten pixels is a drag by default, a click here.
    assert_eq!(
        engine.pointer_up(1, Point::new(108.0, 98.0), &index),
        GestureOutcome::Clicked(Some(0))
    );
}

#[test]
fn skipped_points_are_never_selected() {
    let index = grid();
    let mut engine = SelectionEngine::new(SelectionMode::Select, SelectionShape::Rectangle);
    engine.pointer_down(1, Point::new(-1e6, -1e6), SelectOp::Replace);
    let outcome = engine.pointer_up(1, Point::new(1e6, 1e6), &index);
    assert_eq!(outcome, GestureOutcome::Committed(vec![0, 1, 2]));
}

#[test]
fn reset_returns_to_idle_and_optionally_clears() {
    let index = grid();
    let mut engine = SelectionEngine::new(SelectionMode::Select, SelectionShape::Rectangle);
    engine.pointer_down(1, Point::new(50.0, 50.0), SelectOp::Replace);
    engine.pointer_up(1, Point::new(250.0, 250.0), &index);
    engine.pointer_down(1, Point::new(0.0, 0.0), SelectOp::Replace);

    engine.reset(false);
    assert_eq!(engine.phase(), GesturePhase::Idle);
    assert_eq!(engine.selected().indices(), &[0, 1]);

    engine.reset(true);
    assert!(engine.selected().is_empty());
}
