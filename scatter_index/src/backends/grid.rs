// Copyright 2025 the Scatterscope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Uniform grid backend keyed on screen-space cells.

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _; // for `floor`
use core::fmt::Debug;

use hashbrown::HashMap;
use kurbo::{Point, Rect, Vec2};
use smallvec::SmallVec;

use crate::backend::SpatialQuery;
use crate::types::{Entries, IndexedPoint, Nearest, rect_contains};

type CellKey = (i64, i64);
type Bucket = SmallVec<[u32; 8]>;

/// Smallest cell edge in pixels chosen by [`GridIndex::suggest_cell_size`].
const MIN_CELL_SIZE: f64 = 8.0;
/// Largest cell edge in pixels chosen by [`GridIndex::suggest_cell_size`].
const MAX_CELL_SIZE: f64 = 256.0;

/// Uniform grid over screen space.
///
/// Each indexed point lives in exactly one cell, the one containing its
/// center. Queries visit only the cells overlapping the query region; when
/// that span would exceed the number of occupied cells (huge rectangles,
/// far off-screen regions, unbounded radii) the occupied cells are walked
/// instead, so a query never costs more than a scan of the index.
///
/// Points that are off screen stay indexed, and a pan is applied with
/// [`GridIndex::translate`] instead of a rebuild: cells keep their
/// build-time coordinates and queries are shifted by the accumulated offset.
/// A zoom or a new point sequence needs a rebuild.
#[derive(Clone)]
pub struct GridIndex {
    cell_size: f64,
    offset: Vec2,
    entries: Entries,
    cells: HashMap<CellKey, Bucket>,
}

impl Debug for GridIndex {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("GridIndex")
            .field("cell_size", &self.cell_size)
            .field("offset", &self.offset)
            .field("indexed", &self.entries.indexed())
            .field("skipped", &self.entries.skipped)
            .field("cells", &self.cells.len())
            .finish_non_exhaustive()
    }
}

impl Default for GridIndex {
    fn default() -> Self {
        Self::build(core::iter::empty(), Self::suggest_cell_size(0.0))
    }
}

impl GridIndex {
    /// Suggests a cell edge for markers of the given average radius.
    ///
    /// Four radii per cell keeps hover queries to a 3x3 cell neighborhood
    /// for typical pick slop while bounding the number of cells.
    #[must_use]
    pub fn suggest_cell_size(avg_radius: f64) -> f64 {
        if avg_radius.is_finite() && avg_radius > 0.0 {
            (avg_radius * 4.0).clamp(MIN_CELL_SIZE, MAX_CELL_SIZE)
        } else {
            MIN_CELL_SIZE * 2.0
        }
    }

    /// Builds the grid from `(screen position, radius)` pairs in sequence order.
    ///
    /// Non-finite positions are skipped. A non-positive or non-finite
    /// `cell_size` falls back to [`GridIndex::suggest_cell_size`]`(0.0)`.
    pub fn build<I>(points: I, cell_size: f64) -> Self
    where
        I: IntoIterator<Item = (Point, f64)>,
    {
        let cell_size = if cell_size.is_finite() && cell_size > 0.0 {
            cell_size
        } else {
            Self::suggest_cell_size(0.0)
        };
        let entries = Entries::collect(points);
        let mut cells: HashMap<CellKey, Bucket> = HashMap::new();
        for (i, slot) in entries.slots.iter().enumerate() {
            let Some(p) = slot else { continue };
            // Sequences longer than u32::MAX are not a realistic workload;
            // anything beyond stays out of the grid rather than aliasing.
            let Ok(id) = u32::try_from(i) else { break };
            cells
                .entry(cell_key(p.pos, cell_size))
                .or_default()
                .push(id);
        }
        log::trace!(
            "built grid index: {} points in {} cells of {}px",
            entries.indexed(),
            cells.len(),
            cell_size
        );
        Self {
            cell_size,
            offset: Vec2::ZERO,
            entries,
            cells,
        }
    }

    /// Shifts every indexed position by `delta` without touching the cells.
    ///
    /// Non-finite deltas are ignored.
    pub fn translate(&mut self, delta: Vec2) {
        if delta.is_finite() {
            self.offset += delta;
        }
    }

    /// Total shift applied through [`GridIndex::translate`] since the build.
    #[must_use]
    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    /// Edge length of a grid cell in pixels.
    #[must_use]
    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// Number of occupied cells.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Number of points actually indexed.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.indexed()
    }

    /// Returns `true` if no point is indexed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of points skipped because of non-finite positions.
    #[must_use]
    pub fn skipped(&self) -> usize {
        self.entries.skipped
    }

    /// Visits each bucket that may hold points inside `rect`.
    fn visit_buckets<F: FnMut(&Bucket)>(&self, rect: Rect, mut f: F) {
        if self.cells.is_empty() {
            return;
        }
        match cell_span(rect, self.cell_size) {
            Some((min, max, count)) if count <= self.cells.len() as u64 => {
                for cy in min.1..=max.1 {
                    for cx in min.0..=max.0 {
                        if let Some(bucket) = self.cells.get(&(cx, cy)) {
                            f(bucket);
                        }
                    }
                }
            }
            _ => {
                for bucket in self.cells.values() {
                    f(bucket);
                }
            }
        }
    }
}

impl SpatialQuery for GridIndex {
    fn sequence_len(&self) -> usize {
        self.entries.slots.len()
    }

    fn get(&self, index: usize) -> Option<IndexedPoint> {
        self.entries.get(index).map(|p| IndexedPoint {
            pos: p.pos + self.offset,
            radius: p.radius,
        })
    }

    fn visit_rect<F: FnMut(usize)>(&self, rect: Rect, mut f: F) {
        if rect.x0.is_nan() || rect.y0.is_nan() || rect.x1.is_nan() || rect.y1.is_nan() {
            return;
        }
        let rect = rect.abs() - self.offset;
        self.visit_buckets(rect, |bucket| {
            for &id in bucket {
                let i = id as usize;
                if let Some(p) = self.entries.get(i)
                    && rect_contains(&rect, p.pos)
                {
                    f(i);
                }
            }
        });
    }

    fn nearest(&self, pt: Point, max_radius: f64) -> Option<usize> {
        if !pt.is_finite() {
            return None;
        }
        let pt = pt - self.offset;
        let max_radius = if max_radius.is_nan() { 0.0 } else { max_radius.max(0.0) };
        let reach = max_radius.max(self.entries.max_radius);
        let probe = Rect::new(pt.x - reach, pt.y - reach, pt.x + reach, pt.y + reach);
        let mut best = Nearest::default();
        self.visit_buckets(probe, |bucket| {
            for &id in bucket {
                let i = id as usize;
                if let Some(p) = self.entries.get(i) {
                    let d2 = (p.pos - pt).hypot2();
                    if p.hit_by(d2, max_radius) {
                        best.offer(d2, i);
                    }
                }
            }
        });
        best.finish()
    }
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "float to int casts saturate; extreme coordinates clamp to the outermost cells"
)]
fn cell_coord(v: f64, cell_size: f64) -> i64 {
    (v / cell_size).floor() as i64
}

fn cell_key(pos: Point, cell_size: f64) -> CellKey {
    (cell_coord(pos.x, cell_size), cell_coord(pos.y, cell_size))
}

/// Returns the inclusive cell range covering `rect` and its cell count.
///
/// Returns `None` when the count does not fit in a `u64`.
fn cell_span(rect: Rect, cell_size: f64) -> Option<(CellKey, CellKey, u64)> {
    let min = cell_key(Point::new(rect.x0, rect.y0), cell_size);
    let max = cell_key(Point::new(rect.x1, rect.y1), cell_size);
    let w = u64::try_from(max.0.checked_sub(min.0)?.checked_add(1)?).ok()?;
    let h = u64::try_from(max.1.checked_sub(min.1)?.checked_add(1)?).ok()?;
    Some((min, max, w.checked_mul(h)?))
}
