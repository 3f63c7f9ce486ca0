// Copyright 2025 the Scatterscope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Minimap: a fixed-scale overview of the whole data extent.
//!
//! The minimap never stores scale or translation of the main view. Its
//! indicator is recomputed from the [`Viewport`] on every call, and its only
//! write path into the viewport is [`Viewport::center_on`].

use alloc::vec::Vec;

use kurbo::{Affine, Point, Rect, Size};
use scatter_selection::PointerId;
use scatter_view::Viewport;

use crate::config::{DEFAULT_MINIMAP_MARGIN, MiniMapConfig};

/// Blank border inside the minimap frame, in pixels.
const INSET: f64 = 4.0;

/// Overview projection plus the recentering affordance.
#[derive(Clone, Debug)]
pub struct MiniMap {
    config: MiniMapConfig,
    extent: Option<Rect>,
    /// Data space to minimap-local pixels (origin at the frame's top left).
    overview: Affine,
    frame: Rect,
    drag: Option<PointerId>,
}

impl MiniMap {
    /// Creates a minimap with no data extent and an empty frame.
    #[must_use]
    pub fn new(config: MiniMapConfig) -> Self {
        Self {
            config,
            extent: None,
            overview: Affine::IDENTITY,
            frame: Rect::ZERO,
            drag: None,
        }
    }

    /// Returns `true` if the minimap is configured to show and has data.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.config.show && self.extent.is_some() && self.frame.area() > 0.0
    }

    /// The overview's size in pixels.
    #[must_use]
    pub fn size(&self) -> Size {
        self.config.size
    }

    /// Sets the data extent the overview must show in full.
    ///
    /// The overview uses one scale for both axes, the largest that fits the
    /// extent inside the frame minus a small inset, and centers the extent.
    pub fn set_data_extent(&mut self, extent: Option<Rect>) {
        self.extent = extent.filter(Rect::is_finite).map(|r| r.abs());
        let Some(extent) = self.extent else {
            self.overview = Affine::IDENTITY;
            return;
        };
        let avail = Size::new(
            (self.config.size.width - 2.0 * INSET).max(1.0),
            (self.config.size.height - 2.0 * INSET).max(1.0),
        );
        let sx = (extent.width() > 0.0).then(|| avail.width / extent.width());
        let sy = (extent.height() > 0.0).then(|| avail.height / extent.height());
        let scale = match (sx, sy) {
            (Some(sx), Some(sy)) => sx.min(sy),
            (Some(s), None) | (None, Some(s)) => s,
            (None, None) => 1.0,
        };
        let c = extent.center();
        let local_center = Point::new(self.config.size.width / 2.0, self.config.size.height / 2.0);
        let offset = (local_center.x - c.x * scale, local_center.y - c.y * scale);
        self.overview = Affine::translate(offset) * Affine::scale(scale);
    }

    /// Places the minimap on a canvas of the given size and returns its frame.
    ///
    /// Without an explicit position the minimap sits in the bottom-right
    /// corner with a small margin.
    pub fn layout(&mut self, canvas_width: f64, canvas_height: f64) -> Rect {
        let (right, bottom) = self
            .config
            .position
            .map_or((DEFAULT_MINIMAP_MARGIN, DEFAULT_MINIMAP_MARGIN), |p| (p.right, p.bottom));
        let x1 = canvas_width - right;
        let y1 = canvas_height - bottom;
        let frame = Rect::new(
            x1 - self.config.size.width,
            y1 - self.config.size.height,
            x1,
            y1,
        );
        self.frame = if frame.is_finite() { frame } else { Rect::ZERO };
        self.frame
    }

    /// Frame from the last [`MiniMap::layout`].
    #[must_use]
    pub fn frame(&self) -> Rect {
        self.frame
    }

    /// Projects a data point to canvas pixels inside the minimap.
    #[must_use]
    pub fn project(&self, data: Point) -> Point {
        self.overview * data + self.frame.origin().to_vec2()
    }

    /// Maps canvas pixels inside the minimap back to data space.
    #[must_use]
    pub fn unproject(&self, screen: Point) -> Point {
        self.overview.inverse() * (screen - self.frame.origin().to_vec2())
    }

    /// The main viewport's visible region in canvas pixels, clipped to the frame.
    ///
    /// `None` when the minimap is not visible.
    #[must_use]
    pub fn indicator(&self, viewport: &Viewport) -> Option<Rect> {
        if !self.is_visible() {
            return None;
        }
        let visible = viewport.visible_data_rect();
        let a = self.project(Point::new(visible.x0, visible.y0));
        let b = self.project(Point::new(visible.x1, visible.y1));
        // Clamp corner-wise: a view entirely outside the extent collapses
        // onto the nearest frame edge instead of vanishing.
        let r = Rect::from_points(a, b);
        let f = self.frame;
        Some(Rect::new(
            r.x0.clamp(f.x0, f.x1),
            r.y0.clamp(f.y0, f.y1),
            r.x1.clamp(f.x0, f.x1),
            r.y1.clamp(f.y0, f.y1),
        ))
    }

    /// Returns `true` if `screen` lies on a visible minimap.
    #[must_use]
    pub fn contains(&self, screen: Point) -> bool {
        self.is_visible()
            && screen.x >= self.frame.x0
            && screen.x <= self.frame.x1
            && screen.y >= self.frame.y0
            && screen.y <= self.frame.y1
    }

    /// Recenters the main view on the data under `screen`. Scale is unchanged.
    ///
    /// Returns `false` (and does nothing) if `screen` is not on the minimap.
    pub fn recenter(&self, viewport: &mut Viewport, screen: Point) -> bool {
        if !self.contains(screen) {
            return false;
        }
        self.recenter_unchecked(viewport, screen);
        true
    }

    /// Starts a recentering drag if `screen` is on the minimap.
    pub fn begin_drag(
        &mut self,
        viewport: &mut Viewport,
        pointer: PointerId,
        screen: Point,
    ) -> bool {
        if self.drag.is_some() || !self.recenter(viewport, screen) {
            return false;
        }
        self.drag = Some(pointer);
        true
    }

    /// Continues a recentering drag; positions outside the frame are clamped to it.
    pub fn drag_move(&self, viewport: &mut Viewport, pointer: PointerId, screen: Point) -> bool {
        if self.drag != Some(pointer) || !screen.is_finite() || !self.is_visible() {
            return false;
        }
        let clamped = Point::new(
            screen.x.clamp(self.frame.x0, self.frame.x1),
            screen.y.clamp(self.frame.y0, self.frame.y1),
        );
        self.recenter_unchecked(viewport, clamped);
        true
    }

    /// Ends the drag started by `pointer`. Returns `true` if one was active.
    pub fn end_drag(&mut self, pointer: PointerId) -> bool {
        if self.drag == Some(pointer) {
            self.drag = None;
            true
        } else {
            false
        }
    }

    /// Abandons any drag regardless of pointer.
    pub fn cancel_drag(&mut self) {
        self.drag = None;
    }

    /// Returns `true` while a recentering drag is active.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Projects finite data points into the minimap, keeping their indices.
    pub fn overview_points<I>(&self, points: I) -> Vec<(usize, Point)>
    where
        I: IntoIterator<Item = Point>,
    {
        points
            .into_iter()
            .enumerate()
            .filter(|(_, p)| p.is_finite())
            .map(|(i, p)| (i, self.project(p)))
            .collect()
    }

    fn recenter_unchecked(&self, viewport: &mut Viewport, screen: Point) {
        let data = self.unproject(screen);
        viewport.center_on(data);
        log::debug!("minimap recentered main view on {data:?}");
    }
}
