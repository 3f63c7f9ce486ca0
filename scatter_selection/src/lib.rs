// Copyright 2025 the Scatterscope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scatter Selection: marquee and lasso gestures over a screen-space point index.
//!
//! The [`SelectionEngine`] is a small state machine:
//!
//! ```text
//! Idle ──down──▶ Drawing ──up──▶ Committed / Clicked ──▶ Idle
//!                   │
//!                   └──leave / capture lost / cancel──▶ Cancelled ──▶ Idle
//! ```
//!
//! - In [`SelectionMode::Pan`] the engine never leaves `Idle`; pointer-down
//!   reports [`GestureOutcome::PanRequested`] so the caller can pan instead.
//! - A gesture whose pointer stays within the click threshold of its down
//!   position resolves to [`GestureOutcome::Clicked`] via a nearest-point
//!   query, and leaves the selection alone.
//! - Cancelled gestures never touch the selection.
//!
//! Membership is computed once, on release, through
//! [`scatter_index::SpatialQuery`].
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Point;
//! use scatter_index::backends::LinearScan;
//! use scatter_selection::{
//!     GestureOutcome, SelectOp, SelectionEngine, SelectionMode, SelectionShape,
//! };
//!
//! let index = LinearScan::build([
//!     (Point::new(100.0, 100.0), 3.0),
//!     (Point::new(200.0, 200.0), 3.0),
//!     (Point::new(700.0, 500.0), 3.0),
//! ]);
//!
//! let mut engine = SelectionEngine::new(SelectionMode::Select, SelectionShape::Rectangle);
//! engine.pointer_down(1, Point::new(50.0, 50.0), SelectOp::Replace);
//! engine.pointer_move(1, Point::new(180.0, 150.0));
//! let outcome = engine.pointer_up(1, Point::new(250.0, 250.0), &index);
//!
//! assert_eq!(outcome, GestureOutcome::Committed(vec![0, 1]));
//! assert!(engine.selected().contains(1));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod drag;
mod engine;
mod selected;

pub use drag::DragState;
pub use engine::{
    DEFAULT_CLICK_THRESHOLD, DEFAULT_HIT_RADIUS, GestureOutcome, GesturePhase, PointerId,
    SelectOp, SelectionEngine, SelectionMode, SelectionShape,
};
pub use selected::SelectedSet;
