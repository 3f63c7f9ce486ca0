// Copyright 2025 the Scatterscope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Closed-polygon helpers for lasso selection.

use kurbo::{Point, Rect};

/// Even-odd (ray casting) containment test against an implicitly closed polygon.
///
/// The last vertex connects back to the first. Fewer than three vertices
/// enclose nothing. Self-intersecting paths follow the even-odd rule, so a
/// figure-eight lasso selects both lobes and a doubly wound region is
/// excluded.
#[must_use]
pub fn point_in_polygon(pt: Point, vertices: &[Point]) -> bool {
    let n = vertices.len();
    if n < 3 || !pt.is_finite() {
        return false;
    }
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let a = vertices[i];
        let b = vertices[j];
        // The half-open comparison counts a vertex lying exactly on the ray
        // once, and skips horizontal edges.
        if (a.y > pt.y) != (b.y > pt.y) {
            let x_cross = (b.x - a.x) * (pt.y - a.y) / (b.y - a.y) + a.x;
            if pt.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Axis-aligned bounding box of a vertex list, ignoring non-finite vertices.
///
/// Returns `None` when no finite vertex is present.
#[must_use]
pub fn polygon_bounds(vertices: &[Point]) -> Option<Rect> {
    let mut finite = vertices.iter().copied().filter(|p| p.is_finite());
    let first = finite.next()?;
    Some(finite.fold(Rect::from_points(first, first), |r, p| r.union_pt(p)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> [Point; 4] {
        [
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
        ]
    }

    #[test]
    fn inside_and_outside_square() {
        let poly = square();
        assert!(point_in_polygon(Point::new(5.0, 5.0), &poly));
        assert!(!point_in_polygon(Point::new(15.0, 5.0), &poly));
        assert!(!point_in_polygon(Point::new(5.0, -0.5), &poly));
    }

    #[test]
    fn concave_notch_is_excluded() {
        // A "U" shape opening upwards.
        let poly = [
            Point::new(0.0, 0.0),
            Point::new(30.0, 0.0),
            Point::new(30.0, 30.0),
            Point::new(20.0, 30.0),
            Point::new(20.0, 10.0),
            Point::new(10.0, 10.0),
            Point::new(10.0, 30.0),
            Point::new(0.0, 30.0),
        ];
        assert!(point_in_polygon(Point::new(5.0, 20.0), &poly));
        assert!(point_in_polygon(Point::new(25.0, 20.0), &poly));
        assert!(!point_in_polygon(Point::new(15.0, 20.0), &poly));
        assert!(point_in_polygon(Point::new(15.0, 5.0), &poly));
    }

    #[test]
    fn figure_eight_uses_even_odd() {
        let bow_tie = [
            Point::new(0.0, 0.0),
            Point::new(20.0, 20.0),
            Point::new(20.0, 0.0),
            Point::new(0.0, 20.0),
        ];
        assert!(point_in_polygon(Point::new(3.0, 10.0), &bow_tie));
        assert!(point_in_polygon(Point::new(17.0, 10.0), &bow_tie));
        assert!(!point_in_polygon(Point::new(10.0, 3.0), &bow_tie));
    }

    #[test]
    fn degenerate_polygons_enclose_nothing() {
        assert!(!point_in_polygon(Point::ZERO, &[]));
        assert!(!point_in_polygon(
            Point::new(1.0, 0.0),
            &[Point::new(0.0, 0.0), Point::new(2.0, 0.0)]
        ));
        assert!(!point_in_polygon(Point::new(f64::NAN, 5.0), &square()));
    }

    #[test]
    fn bounds_skip_non_finite() {
        let verts = [
            Point::new(3.0, -1.0),
            Point::new(f64::NAN, 100.0),
            Point::new(-2.0, 4.0),
        ];
        assert_eq!(polygon_bounds(&verts), Some(Rect::new(-2.0, -1.0, 3.0, 4.0)));
        assert_eq!(polygon_bounds(&[]), None);
    }
}
