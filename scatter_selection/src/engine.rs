// Copyright 2025 the Scatterscope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec;
use alloc::vec::Vec;

use kurbo::{Point, Rect};
use scatter_index::SpatialQuery;

use crate::drag::DragState;
use crate::selected::SelectedSet;

/// Identifies a pointer (mouse, pen, or one touch contact).
pub type PointerId = u64;

/// Default movement, in pixels, below which a gesture is a click.
pub const DEFAULT_CLICK_THRESHOLD: f64 = 3.0;

/// Default pick slop, in pixels, used to resolve clicks.
pub const DEFAULT_HIT_RADIUS: f64 = 6.0;

/// Lasso vertices closer than this to the previous vertex are dropped.
const MIN_VERTEX_SPACING: f64 = 1.0;

/// What a primary-button drag does on the canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SelectionMode {
    /// Drags draw a selection shape.
    #[default]
    Select,
    /// Drags pan the view; the selection engine stays idle.
    Pan,
}

/// Shape drawn by a selection gesture.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SelectionShape {
    /// Axis-aligned marquee between the down position and the current position.
    Rectangle,
    /// Freeform closed path through every pointer position.
    #[default]
    Lasso,
}

/// How a committed gesture combines with the existing selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SelectOp {
    /// The gesture's contents become the selection.
    #[default]
    Replace,
    /// The gesture's contents are added to the selection.
    Extend,
}

/// Phase of the gesture state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum GesturePhase {
    /// No gesture in progress.
    #[default]
    Idle,
    /// A selection shape is being drawn by the given pointer.
    Drawing(PointerId),
}

/// Result of feeding one input into the [`SelectionEngine`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GestureOutcome {
    /// The input did not affect the engine.
    Ignored,
    /// Pointer-down in [`SelectionMode::Pan`]; the caller should start a pan.
    PanRequested,
    /// A selection gesture started.
    Started,
    /// The in-progress shape changed.
    Updated,
    /// A gesture finished; carries the resulting selection in sequence order.
    Committed(Vec<usize>),
    /// A gesture finished without significant movement; carries the point
    /// under the pointer, if any. The selection is unchanged.
    Clicked(Option<usize>),
    /// The in-progress gesture was discarded. The selection is unchanged.
    Cancelled,
}

#[derive(Clone, Debug)]
struct Gesture {
    pointer: PointerId,
    op: SelectOp,
    drag: DragState,
    /// Lasso: every accepted vertex. Rectangle: `[anchor, opposite corner]`.
    path: Vec<Point>,
}

/// Selection gesture state machine: `Idle → Drawing → (Committed | Cancelled) → Idle`.
///
/// The engine works purely in screen space and never touches rendering.
/// Membership is computed once, on commit, against a [`SpatialQuery`] built
/// from the current screen positions; moves only grow the active path.
#[derive(Clone, Debug)]
pub struct SelectionEngine {
    mode: SelectionMode,
    shape: SelectionShape,
    click_threshold: f64,
    hit_radius: f64,
    gesture: Option<Gesture>,
    selected: SelectedSet,
}

impl Default for SelectionEngine {
    fn default() -> Self {
        Self::new(SelectionMode::default(), SelectionShape::default())
    }
}

impl SelectionEngine {
    /// Creates an idle engine with an empty selection.
    #[must_use]
    pub fn new(mode: SelectionMode, shape: SelectionShape) -> Self {
        Self {
            mode,
            shape,
            click_threshold: DEFAULT_CLICK_THRESHOLD,
            hit_radius: DEFAULT_HIT_RADIUS,
            gesture: None,
            selected: SelectedSet::new(),
        }
    }

    /// Sets the click threshold; negative or non-finite values use the default.
    #[must_use]
    pub fn with_click_threshold(mut self, threshold: f64) -> Self {
        self.click_threshold = non_negative_or(threshold, DEFAULT_CLICK_THRESHOLD);
        self
    }

    /// Sets the pick slop for clicks; negative or non-finite values use the default.
    #[must_use]
    pub fn with_hit_radius(mut self, radius: f64) -> Self {
        self.hit_radius = non_negative_or(radius, DEFAULT_HIT_RADIUS);
        self
    }

    /// Returns the current mode.
    #[must_use]
    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    /// Switches mode. An in-progress gesture is cancelled first, since
    /// selecting and panning never run concurrently.
    ///
    /// Returns [`GestureOutcome::Cancelled`] if a gesture was discarded.
    pub fn set_mode(&mut self, mode: SelectionMode) -> GestureOutcome {
        if self.mode == mode {
            return GestureOutcome::Ignored;
        }
        let outcome = self.cancel();
        self.mode = mode;
        outcome
    }

    /// Returns the current shape.
    #[must_use]
    pub fn shape(&self) -> SelectionShape {
        self.shape
    }

    /// Switches shape, cancelling an in-progress gesture.
    pub fn set_shape(&mut self, shape: SelectionShape) -> GestureOutcome {
        if self.shape == shape {
            return GestureOutcome::Ignored;
        }
        let outcome = self.cancel();
        self.shape = shape;
        outcome
    }

    /// Returns the current phase.
    #[must_use]
    pub fn phase(&self) -> GesturePhase {
        match &self.gesture {
            Some(g) => GesturePhase::Drawing(g.pointer),
            None => GesturePhase::Idle,
        }
    }

    /// Returns `true` while a selection shape is being drawn.
    #[must_use]
    pub fn is_drawing(&self) -> bool {
        self.gesture.is_some()
    }

    /// Returns the selected indices.
    #[must_use]
    pub fn selected(&self) -> &SelectedSet {
        &self.selected
    }

    /// Replaces the selection from outside a gesture. Returns `true` if it changed.
    pub fn set_selected<I>(&mut self, indices: I) -> bool
    where
        I: IntoIterator<Item = usize>,
    {
        self.selected.replace_with(indices)
    }

    /// Clears the selection. Returns `true` if it changed.
    pub fn clear_selection(&mut self) -> bool {
        self.selected.clear()
    }

    /// Returns the in-progress shape as screen-space vertices.
    ///
    /// Rectangles are reported as their four corners; lassos as their
    /// vertex list (implicitly closed). `None` while idle.
    #[must_use]
    pub fn active_outline(&self) -> Option<Vec<Point>> {
        let g = self.gesture.as_ref()?;
        match self.shape {
            SelectionShape::Lasso => Some(g.path.clone()),
            SelectionShape::Rectangle => {
                let r = rect_of(&g.path)?;
                Some(vec![
                    Point::new(r.x0, r.y0),
                    Point::new(r.x1, r.y0),
                    Point::new(r.x1, r.y1),
                    Point::new(r.x0, r.y1),
                ])
            }
        }
    }

    /// Handles a primary pointer press at screen position `pos`.
    pub fn pointer_down(
        &mut self,
        pointer: PointerId,
        pos: Point,
        op: SelectOp,
    ) -> GestureOutcome {
        if self.gesture.is_some() || !pos.is_finite() {
            // A second contact while drawing does not restart or steal the gesture.
            return GestureOutcome::Ignored;
        }
        if self.mode == SelectionMode::Pan {
            return GestureOutcome::PanRequested;
        }
        let mut drag = DragState::default();
        drag.start(pos);
        let path = match self.shape {
            SelectionShape::Lasso => vec![pos],
            SelectionShape::Rectangle => vec![pos, pos],
        };
        self.gesture = Some(Gesture {
            pointer,
            op,
            drag,
            path,
        });
        log::debug!("selection gesture started by pointer {pointer} ({:?})", self.shape);
        GestureOutcome::Started
    }

    /// Handles pointer motion. Only the pointer that started the gesture counts.
    pub fn pointer_move(&mut self, pointer: PointerId, pos: Point) -> GestureOutcome {
        let shape = self.shape;
        let Some(g) = self.gesture.as_mut() else {
            return GestureOutcome::Ignored;
        };
        if g.pointer != pointer || !pos.is_finite() {
            return GestureOutcome::Ignored;
        }
        g.drag.update(pos);
        match shape {
            SelectionShape::Lasso => {
                let min_sq = MIN_VERTEX_SPACING * MIN_VERTEX_SPACING;
                let far_enough = g
                    .path
                    .last()
                    .is_none_or(|last| (pos - *last).hypot2() >= min_sq);
                if !far_enough {
                    return GestureOutcome::Ignored;
                }
                g.path.push(pos);
            }
            SelectionShape::Rectangle => {
                if let Some(corner) = g.path.get_mut(1) {
                    *corner = pos;
                }
            }
        }
        GestureOutcome::Updated
    }

    /// Handles pointer release and finalizes the gesture.
    ///
    /// Gestures whose pointer never strayed farther than the click threshold
    /// from the down position resolve as clicks through
    /// [`SpatialQuery::nearest`]. Otherwise the closed shape is resolved
    /// against `index` and the selection updated.
    pub fn pointer_up<S: SpatialQuery>(
        &mut self,
        pointer: PointerId,
        pos: Point,
        index: &S,
    ) -> GestureOutcome {
        match &self.gesture {
            Some(g) if g.pointer == pointer => {}
            _ => return GestureOutcome::Ignored,
        }
        if pos.is_finite() {
            self.pointer_move(pointer, pos);
        }
        let Some(g) = self.gesture.take() else {
            return GestureOutcome::Ignored;
        };

        if g.drag.max_travel() < self.click_threshold {
            let at = g.drag.start_pos.unwrap_or(pos);
            let hit = index.nearest(at, self.hit_radius);
            log::debug!("selection gesture resolved as click at {at:?}: {hit:?}");
            return GestureOutcome::Clicked(hit);
        }

        let found = match self.shape {
            SelectionShape::Lasso => index.query_polygon(&g.path),
            SelectionShape::Rectangle => match rect_of(&g.path) {
                Some(r) => index.query_rect(r),
                None => Vec::new(),
            },
        };
        match g.op {
            SelectOp::Replace => self.selected.replace_with(found),
            SelectOp::Extend => self.selected.extend_with(found),
        };
        log::debug!(
            "selection gesture committed: {} points selected (revision {})",
            self.selected.len(),
            self.selected.revision()
        );
        GestureOutcome::Committed(self.selected.indices().to_vec())
    }

    /// Discards any in-progress gesture without touching the selection.
    pub fn cancel(&mut self) -> GestureOutcome {
        if self.gesture.take().is_some() {
            log::debug!("selection gesture cancelled");
            GestureOutcome::Cancelled
        } else {
            GestureOutcome::Ignored
        }
    }

    /// The pointer left the canvas: cancels an in-progress gesture.
    pub fn pointer_left(&mut self) -> GestureOutcome {
        self.cancel()
    }

    /// Pointer capture was lost for `pointer`: cancels its gesture, if any.
    pub fn capture_lost(&mut self, pointer: PointerId) -> GestureOutcome {
        match &self.gesture {
            Some(g) if g.pointer == pointer => self.cancel(),
            _ => GestureOutcome::Ignored,
        }
    }

    /// External reset: returns to idle, optionally clearing the selection.
    pub fn reset(&mut self, clear_selection: bool) {
        self.gesture = None;
        if clear_selection {
            self.selected.clear();
        }
    }
}

fn rect_of(path: &[Point]) -> Option<Rect> {
    match path {
        [a, b, ..] => Some(Rect::from_points(*a, *b)),
        _ => None,
    }
}

fn non_negative_or(v: f64, fallback: f64) -> f64 {
    if v.is_finite() && v >= 0.0 { v } else { fallback }
}
