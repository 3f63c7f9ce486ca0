// Copyright 2025 the Scatterscope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Flat vector backend with linear scans. Small and simple; good for tiny sets.

use core::fmt::Debug;

use kurbo::{Point, Rect};

use crate::backend::SpatialQuery;
use crate::types::{Entries, IndexedPoint, Nearest, rect_contains};

/// Flat vector backend with linear scans.
#[derive(Clone, Default)]
pub struct LinearScan {
    entries: Entries,
}

impl Debug for LinearScan {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LinearScan")
            .field("total_slots", &self.entries.slots.len())
            .field("indexed", &self.entries.indexed())
            .finish_non_exhaustive()
    }
}

impl LinearScan {
    /// Builds the index from `(screen position, radius)` pairs in sequence order.
    pub fn build<I>(points: I) -> Self
    where
        I: IntoIterator<Item = (Point, f64)>,
    {
        Self {
            entries: Entries::collect(points),
        }
    }

    /// Number of points skipped because of non-finite positions.
    #[must_use]
    pub fn skipped(&self) -> usize {
        self.entries.skipped
    }
}

impl SpatialQuery for LinearScan {
    fn sequence_len(&self) -> usize {
        self.entries.slots.len()
    }

    fn get(&self, index: usize) -> Option<IndexedPoint> {
        self.entries.get(index).copied()
    }

    fn visit_rect<F: FnMut(usize)>(&self, rect: Rect, mut f: F) {
        for (i, slot) in self.entries.slots.iter().enumerate() {
            if let Some(p) = slot
                && rect_contains(&rect, p.pos)
            {
                f(i);
            }
        }
    }

    fn nearest(&self, pt: Point, max_radius: f64) -> Option<usize> {
        if !pt.is_finite() {
            return None;
        }
        let mut best = Nearest::default();
        for (i, slot) in self.entries.slots.iter().enumerate() {
            if let Some(p) = slot {
                let d2 = (p.pos - pt).hypot2();
                if p.hit_by(d2, max_radius) {
                    best.offer(d2, i);
                }
            }
        }
        best.finish()
    }
}
