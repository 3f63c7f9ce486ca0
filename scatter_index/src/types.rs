// Copyright 2025 the Scatterscope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;

use kurbo::{Point, Rect};

/// A point stored in an index: screen position plus render radius.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IndexedPoint {
    /// Screen-space center.
    pub pos: Point,
    /// Render radius in pixels. Always finite and `>= 0`.
    pub radius: f64,
}

impl IndexedPoint {
    /// Validates an input pair, returning `None` for non-finite positions.
    ///
    /// Negative or non-finite radii are stored as zero.
    pub(crate) fn new(pos: Point, radius: f64) -> Option<Self> {
        if !pos.is_finite() {
            return None;
        }
        let radius = if radius.is_finite() { radius.max(0.0) } else { 0.0 };
        Some(Self { pos, radius })
    }

    /// Returns `true` if this point hits a probe at squared distance `d2`.
    ///
    /// A point is hit when the probe lies within `max(max_radius, radius)`
    /// of its center, so a marker is always clickable over its own area.
    pub(crate) fn hit_by(&self, d2: f64, max_radius: f64) -> bool {
        let reach = max_radius.max(self.radius);
        d2 <= reach * reach
    }
}

/// Inclusive containment on both axes.
///
/// `kurbo::Rect::contains` is half-open; selection bounds are inclusive so a
/// point exactly on a marquee edge is selected.
pub(crate) fn rect_contains(rect: &Rect, pos: Point) -> bool {
    pos.x >= rect.x0 && pos.x <= rect.x1 && pos.y >= rect.y0 && pos.y <= rect.y1
}

/// Validated entries by sequence index, plus bookkeeping shared by backends.
#[derive(Clone, Debug, Default)]
pub(crate) struct Entries {
    pub(crate) slots: Vec<Option<IndexedPoint>>,
    pub(crate) skipped: usize,
    pub(crate) max_radius: f64,
}

impl Entries {
    pub(crate) fn collect<I>(points: I) -> Self
    where
        I: IntoIterator<Item = (Point, f64)>,
    {
        let iter = points.into_iter();
        let (lower, _) = iter.size_hint();
        let mut out = Self {
            slots: Vec::with_capacity(lower),
            skipped: 0,
            max_radius: 0.0,
        };
        for (pos, radius) in iter {
            let slot = IndexedPoint::new(pos, radius);
            match slot {
                Some(p) => out.max_radius = out.max_radius.max(p.radius),
                None => out.skipped += 1,
            }
            out.slots.push(slot);
        }
        if out.skipped > 0 {
            log::warn!(
                "skipped {} of {} points with non-finite screen positions",
                out.skipped,
                out.slots.len()
            );
        }
        out
    }

    pub(crate) fn get(&self, index: usize) -> Option<&IndexedPoint> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    pub(crate) fn indexed(&self) -> usize {
        self.slots.len() - self.skipped
    }
}

/// Running best candidate for a nearest query.
///
/// Ordered by squared distance, then by sequence index.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct Nearest {
    best: Option<(f64, usize)>,
}

impl Nearest {
    pub(crate) fn offer(&mut self, d2: f64, index: usize) {
        match self.best {
            Some((best_d2, best_idx)) if d2 > best_d2 || (d2 == best_d2 && index >= best_idx) => {}
            _ => self.best = Some((d2, index)),
        }
    }

    pub(crate) fn finish(self) -> Option<usize> {
        self.best.map(|(_, index)| index)
    }
}
