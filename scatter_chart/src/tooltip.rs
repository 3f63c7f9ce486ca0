// Copyright 2025 the Scatterscope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hover tracking for tooltips.

use kurbo::Point;
use scatter_index::SpatialQuery;

/// Change in the hovered point after a hover update.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HoverChange {
    /// Nothing changed.
    Unchanged,
    /// The pointer moved onto a point from empty space.
    Enter(usize),
    /// The pointer moved off a point into empty space.
    Leave(usize),
    /// The pointer moved directly from one point to another.
    Moved {
        /// Previously hovered point.
        from: usize,
        /// Newly hovered point.
        to: usize,
    },
}

impl HoverChange {
    /// Returns `true` unless this is [`HoverChange::Unchanged`].
    #[must_use]
    pub fn is_change(self) -> bool {
        self != Self::Unchanged
    }
}

/// Remembers which point is under the pointer.
#[derive(Clone, Copy, Debug)]
pub struct HoverTracker {
    hovered: Option<usize>,
    radius: f64,
}

impl HoverTracker {
    /// Creates a tracker with the given pick slop in pixels.
    #[must_use]
    pub fn new(radius: f64) -> Self {
        Self {
            hovered: None,
            radius: if radius.is_finite() { radius.max(0.0) } else { 0.0 },
        }
    }

    /// The currently hovered index.
    #[must_use]
    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    /// Resolves the point under `pos` and records it.
    pub fn update(&mut self, index: &impl SpatialQuery, pos: Point) -> HoverChange {
        let next = index.nearest(pos, self.radius);
        self.set(next)
    }

    /// Forgets the hovered point.
    pub fn clear(&mut self) -> HoverChange {
        self.set(None)
    }

    fn set(&mut self, next: Option<usize>) -> HoverChange {
        let prev = core::mem::replace(&mut self.hovered, next);
        match (prev, next) {
            (None, Some(i)) => HoverChange::Enter(i),
            (Some(i), None) => HoverChange::Leave(i),
            (Some(from), Some(to)) if from != to => HoverChange::Moved { from, to },
            _ => HoverChange::Unchanged,
        }
    }
}

/// Where a tooltip for a marker at `center` with radius `radius` is anchored.
///
/// The anchor is the marker's upper-right extreme, so the tooltip never
/// covers the marker itself.
pub fn tooltip_anchor(center: Point, radius: f64) -> Point {
    Point::new(center.x + radius, center.y - radius)
}

#[cfg(test)]
mod tests {
    use scatter_index::backends::LinearScan;

    use super::*;

    #[test]
    fn transitions() {
        let index = LinearScan::build([
            (Point::new(10.0, 10.0), 2.0),
            (Point::new(30.0, 10.0), 2.0),
        ]);
        let mut hover = HoverTracker::new(4.0);
        assert_eq!(hover.update(&index, Point::new(0.0, 50.0)), HoverChange::Unchanged);
        assert_eq!(hover.update(&index, Point::new(11.0, 11.0)), HoverChange::Enter(0));
        assert_eq!(hover.update(&index, Point::new(9.0, 10.0)), HoverChange::Unchanged);
        assert_eq!(
            hover.update(&index, Point::new(28.0, 10.0)),
            HoverChange::Moved { from: 0, to: 1 }
        );
        assert_eq!(hover.hovered(), Some(1));
        assert_eq!(hover.clear(), HoverChange::Leave(1));
        assert!(!hover.clear().is_change());
    }

    #[test]
    fn anchor_clears_the_marker() {
        assert_eq!(tooltip_anchor(Point::new(100.0, 100.0), 3.0), Point::new(103.0, 97.0));
    }
}
