// Copyright 2025 the Scatterscope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag tracking: per-move deltas, total offset, and the farthest excursion.
//!
//! ## Usage
//!
//! 1) Start tracking with [`DragState::start`] at the pointer-down position.
//! 2) On each move, call [`DragState::update`] to get the delta since the last update.
//! 3) Use [`DragState::max_travel`] to tell a click from a drag.
//! 4) End with [`DragState::end`] to reset state.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::Point;
//! use scatter_selection::DragState;
//!
//! let mut drag = DragState::default();
//! drag.start(Point::new(10.0, 20.0));
//!
//! let delta = drag.update(Point::new(13.0, 24.0)).unwrap();
//! assert_eq!((delta.x, delta.y), (3.0, 4.0));
//! assert_eq!(drag.max_travel(), 5.0);
//!
//! // Coming back to the start does not erase the excursion.
//! drag.update(Point::new(10.0, 20.0));
//! assert_eq!(drag.max_travel(), 5.0);
//! ```

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _; // for `sqrt`
use kurbo::{Point, Vec2};

/// Tracks a single pointer drag.
#[derive(Debug, Clone, Default, Copy)]
pub struct DragState {
    /// Start position of the drag.
    pub start_pos: Option<Point>,
    /// Last recorded pointer position during the drag.
    pub last_pos: Option<Point>,
    max_travel_sq: f64,
}

impl DragState {
    /// Starts tracking a new drag from `pos`.
    pub fn start(&mut self, pos: Point) {
        self.start_pos = Some(pos);
        self.last_pos = Some(pos);
        self.max_travel_sq = 0.0;
    }

    /// Records a new position, returning the delta since the last update.
    ///
    /// Returns `None` when no drag is active.
    pub fn update(&mut self, pos: Point) -> Option<Vec2> {
        let start = self.start_pos?;
        self.max_travel_sq = self.max_travel_sq.max((pos - start).hypot2());
        self.last_pos.replace(pos).map(|last| pos - last)
    }

    /// Total offset of `current_pos` from the drag start.
    pub fn total_offset(&self, current_pos: Point) -> Option<Vec2> {
        self.start_pos.map(|start| current_pos - start)
    }

    /// Largest distance from the start seen during this drag.
    #[must_use]
    pub fn max_travel(&self) -> f64 {
        self.max_travel_sq.sqrt()
    }

    /// Ends the drag and resets state.
    pub fn end(&mut self) {
        *self = Self::default();
    }

    /// Returns `true` while a drag is active.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.start_pos.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_drag_state_is_not_dragging() {
        let drag = DragState::default();
        assert!(!drag.is_dragging());
        assert_eq!(drag.max_travel(), 0.0);
    }

    #[test]
    fn update_returns_incremental_deltas() {
        let mut drag = DragState::default();
        drag.start(Point::new(0.0, 0.0));

        assert_eq!(drag.update(Point::new(5.0, 3.0)), Some(Vec2::new(5.0, 3.0)));
        assert_eq!(drag.update(Point::new(8.0, 7.0)), Some(Vec2::new(3.0, 4.0)));
        assert_eq!(
            drag.total_offset(Point::new(8.0, 7.0)),
            Some(Vec2::new(8.0, 7.0))
        );
    }

    #[test]
    fn update_returns_none_when_not_dragging() {
        let mut drag = DragState::default();
        assert_eq!(drag.update(Point::new(15.0, 25.0)), None);
        assert!(drag.last_pos.is_none());
        assert_eq!(drag.total_offset(Point::new(1.0, 1.0)), None);
    }

    #[test]
    fn max_travel_tracks_farthest_excursion() {
        let mut drag = DragState::default();
        drag.start(Point::new(100.0, 100.0));
        drag.update(Point::new(106.0, 108.0));
        drag.update(Point::new(101.0, 100.0));
        assert_eq!(drag.max_travel(), 10.0);
    }

    #[test]
    fn start_overwrites_previous_drag() {
        let mut drag = DragState::default();
        drag.start(Point::new(0.0, 0.0));
        drag.update(Point::new(30.0, 40.0));

        drag.start(Point::new(50.0, 60.0));
        assert_eq!(drag.max_travel(), 0.0);
        assert_eq!(
            drag.total_offset(Point::new(55.0, 65.0)),
            Some(Vec2::new(5.0, 5.0))
        );
    }

    #[test]
    fn end_resets_state() {
        let mut drag = DragState::default();
        drag.start(Point::new(10.0, 20.0));
        drag.update(Point::new(15.0, 25.0));
        drag.end();
        assert!(!drag.is_dragging());
        assert!(drag.last_pos.is_none());
    }
}
