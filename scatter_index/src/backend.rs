// Copyright 2025 the Scatterscope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Query trait shared by the index backends.

use alloc::vec::Vec;

use kurbo::{Point, Rect};

use crate::polygon::{point_in_polygon, polygon_bounds};
use crate::types::IndexedPoint;

/// Spatial queries over an indexed point sequence.
///
/// Indices are positions in the sequence the index was built from. Backends
/// only need to provide [`SpatialQuery::get`], [`SpatialQuery::visit_rect`]
/// and [`SpatialQuery::nearest`]; the ordered query helpers are derived.
pub trait SpatialQuery {
    /// Length of the sequence the index was built from, skipped points included.
    fn sequence_len(&self) -> usize;

    /// Returns the entry for `index` at its current screen position, or
    /// `None` if it was skipped or is out of range.
    fn get(&self, index: usize) -> Option<IndexedPoint>;

    /// Visits every point whose position lies inside `rect` (inclusive).
    ///
    /// Visit order is backend-specific.
    fn visit_rect<F: FnMut(usize)>(&self, rect: Rect, f: F);

    /// Returns the point nearest to `pt` that is hit by it, if any.
    ///
    /// A point is hit when `pt` lies within `max(max_radius, radius)` of its
    /// center. Ties on distance resolve to the lower sequence index.
    fn nearest(&self, pt: Point, max_radius: f64) -> Option<usize>;

    /// Returns the screen position of `index`, if indexed.
    fn position(&self, index: usize) -> Option<Point> {
        self.get(index).map(|p| p.pos)
    }

    /// Returns the indices inside `rect` (inclusive), in sequence order.
    fn query_rect(&self, rect: Rect) -> Vec<usize> {
        let mut out = Vec::new();
        self.visit_rect(rect.abs(), |i| out.push(i));
        out.sort_unstable();
        out
    }

    /// Returns the indices inside the closed polygon `vertices`, in sequence order.
    ///
    /// The polygon's bounding box prunes candidates through
    /// [`SpatialQuery::visit_rect`]; survivors get the exact even-odd test.
    fn query_polygon(&self, vertices: &[Point]) -> Vec<usize> {
        if vertices.len() < 3 {
            return Vec::new();
        }
        let Some(bounds) = polygon_bounds(vertices) else {
            return Vec::new();
        };
        let mut out = Vec::new();
        self.visit_rect(bounds, |i| {
            if let Some(p) = self.get(i)
                && point_in_polygon(p.pos, vertices)
            {
                out.push(i);
            }
        });
        out.sort_unstable();
        out
    }
}
