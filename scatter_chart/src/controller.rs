// Copyright 2025 the Scatterscope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Zoom/pan controller: turns wheel, pinch and drag input into viewport updates.

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _; // for `abs`, `powf`
use kurbo::{Point, Vec2};
use scatter_selection::{DragState, PointerId};
use scatter_view::Viewport;

use crate::config::DEFAULT_WHEEL_STEP;

/// Per-axis separations below this many pixels fall back to the
/// Euclidean ratio when deriving pinch factors.
const MIN_AXIS_SEPARATION: f64 = 8.0;

/// Which axes a wheel zoom affects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ZoomAxis {
    /// Both axes by the same factor.
    #[default]
    Both,
    /// Horizontal axis only.
    X,
    /// Vertical axis only.
    Y,
}

/// Translates gestures into [`Viewport`] zoom and pan requests.
///
/// The controller holds only gesture bookkeeping; the viewport stays the
/// single owner of scale and translation. Every method returns `true` if it
/// changed the viewport.
#[derive(Clone, Debug)]
pub struct ZoomPanController {
    wheel_step: f64,
    /// Up to two tracked contacts, in arrival order.
    contacts: [Option<(PointerId, Point)>; 2],
    pan_pointer: Option<PointerId>,
    drag: DragState,
}

impl Default for ZoomPanController {
    fn default() -> Self {
        Self::new(DEFAULT_WHEEL_STEP)
    }
}

impl ZoomPanController {
    /// Creates a controller with the given multiplicative wheel step.
    ///
    /// Steps that do not zoom (`<= 1` or non-finite) use the default.
    #[must_use]
    pub fn new(wheel_step: f64) -> Self {
        let wheel_step = if wheel_step.is_finite() && wheel_step > 1.0 {
            wheel_step
        } else {
            DEFAULT_WHEEL_STEP
        };
        Self {
            wheel_step,
            contacts: [None, None],
            pan_pointer: None,
            drag: DragState::default(),
        }
    }

    /// The multiplicative zoom per wheel notch.
    #[must_use]
    pub fn wheel_step(&self) -> f64 {
        self.wheel_step
    }

    /// Applies a wheel delta at `focal`.
    ///
    /// Negative deltas (scrolling up) zoom in. Each notch multiplies the
    /// scale by the wheel step; fractional deltas from trackpads scale by
    /// `step.powf(|delta|)`.
    pub fn wheel(
        &self,
        viewport: &mut Viewport,
        focal: Point,
        delta_y: f64,
        axis: ZoomAxis,
    ) -> bool {
        if !delta_y.is_finite() || delta_y == 0.0 {
            return false;
        }
        let factor = self.wheel_step.powf(-delta_y);
        let (fx, fy) = match axis {
            ZoomAxis::Both => (factor, factor),
            ZoomAxis::X => (factor, 1.0),
            ZoomAxis::Y => (1.0, factor),
        };
        self.zoom_axes(viewport, focal, fx, fy)
    }

    /// Zooms each axis by its own factor about `focal`.
    pub fn zoom_axes(&self, viewport: &mut Viewport, focal: Point, fx: f64, fy: f64) -> bool {
        let changed = viewport.apply_zoom(focal, fx, fy);
        if changed {
            let s = viewport.state();
            log::trace!(
                "zoom ({fx}, {fy}) at {focal:?} -> scale ({}, {})",
                s.scale_x,
                s.scale_y
            );
        }
        changed
    }

    /// Registers a contact. Returns `true` if two contacts are now tracked,
    /// which starts a pinch and ends any drag pan.
    pub fn contact_down(&mut self, pointer: PointerId, pos: Point) -> bool {
        if !pos.is_finite() || self.contact_slot(pointer).is_some() {
            return self.is_pinching();
        }
        if let Some(slot) = self.contacts.iter_mut().find(|c| c.is_none()) {
            *slot = Some((pointer, pos));
        }
        if self.is_pinching() {
            self.end_pan();
            log::debug!("pinch started");
        }
        self.is_pinching()
    }

    /// Forgets a contact. Ends the pinch if one was active.
    pub fn contact_up(&mut self, pointer: PointerId) {
        let was_pinching = self.is_pinching();
        if let Some(i) = self.contact_slot(pointer) {
            self.contacts[i] = None;
        }
        if was_pinching && !self.is_pinching() {
            log::debug!("pinch ended");
        }
        if self.pan_pointer == Some(pointer) {
            self.end_pan();
        }
    }

    /// Returns `true` while two contacts are tracked.
    #[must_use]
    pub fn is_pinching(&self) -> bool {
        self.contacts.iter().all(Option::is_some)
    }

    /// Returns `true` if `pointer` is a tracked contact.
    #[must_use]
    pub fn tracks(&self, pointer: PointerId) -> bool {
        self.contact_slot(pointer).is_some()
    }

    /// Updates a contact position, applying pinch zoom and midpoint pan.
    ///
    /// Outside a pinch this only records the position.
    pub fn contact_move(
        &mut self,
        viewport: &mut Viewport,
        pointer: PointerId,
        pos: Point,
    ) -> bool {
        let Some(i) = self.contact_slot(pointer) else {
            return false;
        };
        if !pos.is_finite() {
            return false;
        }
        let (Some((_, a)), Some((_, b))) = (self.contacts[0], self.contacts[1]) else {
            self.contacts[i] = Some((pointer, pos));
            return false;
        };
        self.contacts[i] = Some((pointer, pos));
        let (a2, b2) = if i == 0 { (pos, b) } else { (a, pos) };
        let (fx, fy) = pinch_factors(b - a, b2 - a2);
        let prev_mid = a.midpoint(b);
        let mid = a2.midpoint(b2);
        let panned = viewport.apply_pan(mid.x - prev_mid.x, mid.y - prev_mid.y);
        let zoomed = self.zoom_axes(viewport, mid, fx, fy);
        panned || zoomed
    }

    /// Starts a drag pan by `pointer` at `pos`.
    pub fn begin_pan(&mut self, pointer: PointerId, pos: Point) {
        if self.is_pinching() || !pos.is_finite() {
            return;
        }
        self.pan_pointer = Some(pointer);
        self.drag.start(pos);
        log::debug!("pan started by pointer {pointer}");
    }

    /// Continues a drag pan, translating the viewport by the pointer delta.
    pub fn pan_move(&mut self, viewport: &mut Viewport, pointer: PointerId, pos: Point) -> bool {
        if self.pan_pointer != Some(pointer) || !pos.is_finite() {
            return false;
        }
        match self.drag.update(pos) {
            Some(delta) => {
                let changed = viewport.apply_pan(delta.x, delta.y);
                if changed {
                    log::trace!("pan by {delta:?}");
                }
                changed
            }
            None => false,
        }
    }

    /// Ends the drag pan, if any.
    pub fn end_pan(&mut self) {
        if self.pan_pointer.take().is_some() {
            self.drag.end();
            log::debug!("pan ended");
        }
    }

    /// For the drag pan by `pointer`: where the content grabbed at the
    /// press now sits, and the farthest the pointer strayed from the press.
    #[must_use]
    pub fn pan_grab(&self, pointer: PointerId) -> Option<(Point, f64)> {
        if self.pan_pointer != Some(pointer) {
            return None;
        }
        Some((self.drag.last_pos?, self.drag.max_travel()))
    }

    /// Returns `true` while a drag pan is active.
    #[must_use]
    pub fn is_panning(&self) -> bool {
        self.pan_pointer.is_some()
    }

    /// Drops every tracked contact and any drag pan.
    pub fn reset(&mut self) {
        self.contacts = [None, None];
        self.end_pan();
    }

    fn contact_slot(&self, pointer: PointerId) -> Option<usize> {
        self.contacts
            .iter()
            .position(|c| matches!(c, Some((id, _)) if *id == pointer))
    }
}

/// Per-axis zoom factors from the previous and current contact separation.
fn pinch_factors(prev: Vec2, next: Vec2) -> (f64, f64) {
    let euclid = if prev.hypot() > 0.0 {
        next.hypot() / prev.hypot()
    } else {
        1.0
    };
    let axis = |p: f64, n: f64| {
        if p.abs() > MIN_AXIS_SEPARATION && n.abs() > MIN_AXIS_SEPARATION {
            n.abs() / p.abs()
        } else {
            euclid
        }
    };
    (axis(prev.x, next.x), axis(prev.y, next.y))
}
