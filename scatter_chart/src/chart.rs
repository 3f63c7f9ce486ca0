// Copyright 2025 the Scatterscope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::boxed::Box;
use alloc::format;
use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;

use kurbo::{Point, Vec2};
use scatter_index::SpatialQuery;
use scatter_index::backends::GridIndex;
use scatter_selection::{
    GestureOutcome, GesturePhase, PointerId, SelectOp, SelectionEngine, SelectionMode,
    SelectionShape,
};
use scatter_view::{FitMode, Viewport, ViewportState};

use crate::config::ChartConfig;
use crate::controller::{ZoomAxis, ZoomPanController};
use crate::frame::{Dirty, FrameScheduler};
use crate::minimap::MiniMap;
use crate::point::{DataPoint, data_extent, mean_radius};
use crate::render::{DrawList, RenderInput, TooltipPrimitive, compose};
use crate::tooltip::{HoverTracker, tooltip_anchor};

/// Input delivered by the host's event loop. Positions are canvas pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ChartEvent {
    /// Primary button or touch contact pressed.
    PointerDown {
        /// Pointer identity.
        pointer: PointerId,
        /// Canvas position.
        pos: Point,
        /// The extend modifier (e.g. shift) is held.
        extend: bool,
    },
    /// Pointer moved, pressed or not.
    PointerMove {
        /// Pointer identity.
        pointer: PointerId,
        /// Canvas position.
        pos: Point,
    },
    /// Primary button or touch contact released.
    PointerUp {
        /// Pointer identity.
        pointer: PointerId,
        /// Canvas position.
        pos: Point,
    },
    /// The pointer left the canvas.
    PointerLeave,
    /// Pointer capture was taken away (e.g. by a system gesture).
    CaptureLost {
        /// Pointer identity.
        pointer: PointerId,
    },
    /// Wheel or trackpad scroll.
    Wheel {
        /// Canvas position, used as the zoom focal point.
        pos: Point,
        /// Notches; negative zooms in.
        delta_y: f64,
        /// Axes to zoom.
        axis: ZoomAxis,
    },
    /// Explicit cancel (e.g. the Escape key).
    Cancel,
}

type SelectionCallback<T> = Box<dyn FnMut(&[&DataPoint<T>])>;
type ClickCallback<T> = Box<dyn FnMut(usize, &DataPoint<T>)>;
type TooltipFormatter<T> = Box<dyn Fn(&DataPoint<T>) -> String>;

/// An interactive scatter chart without a display surface.
///
/// The chart owns the point sequence, the view, the spatial index and all
/// gesture state. The host feeds it [`ChartEvent`]s, asks
/// [`ScatterChart::take_frame`] once per animation frame whether anything
/// changed, and draws [`ScatterChart::draw_list`] when it did.
pub struct ScatterChart<T> {
    config: ChartConfig,
    points: Arc<[DataPoint<T>]>,
    viewport: Viewport,
    index: GridIndex,
    /// Scale the index was built at; `None` forces a rebuild.
    index_scale: Option<(f64, f64)>,
    index_translate: Vec2,
    selection: SelectionEngine,
    controller: ZoomPanController,
    minimap: MiniMap,
    hover: HoverTracker,
    scheduler: FrameScheduler,
    on_selection_change: Option<SelectionCallback<T>>,
    on_point_clicked: Option<ClickCallback<T>>,
    tooltip_body: Option<TooltipFormatter<T>>,
}

impl<T> fmt::Debug for ScatterChart<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScatterChart")
            .field("config", &self.config)
            .field("points", &self.points.len())
            .field("viewport", &self.viewport)
            .field("index", &self.index)
            .field("selection", &self.selection)
            .field("controller", &self.controller)
            .field("minimap", &self.minimap)
            .field("hover", &self.hover)
            .field("scheduler", &self.scheduler)
            .finish_non_exhaustive()
    }
}

impl<T> ScatterChart<T> {
    /// Creates an empty chart on a canvas of the given size.
    ///
    /// The configuration is [sanitized](ChartConfig::sanitized) first.
    pub fn new(config: ChartConfig, width: f64, height: f64) -> Self {
        let config = config.sanitized();
        let mut viewport = Viewport::new(width, height);
        viewport.set_scale_limits(config.zoom_limits.0, config.zoom_limits.1);
        viewport.set_scale(config.zoom_scale.scale_x, config.zoom_scale.scale_y);
        let selection = SelectionEngine::new(config.selection_type, config.selection_shape)
            .with_click_threshold(config.click_threshold)
            .with_hit_radius(config.hover_radius);
        let mut minimap = MiniMap::new(config.mini_map);
        let size = viewport.size();
        minimap.layout(size.width, size.height);
        let mut scheduler = FrameScheduler::default();
        scheduler.mark(Dirty::all());
        Self {
            controller: ZoomPanController::new(config.wheel_step),
            hover: HoverTracker::new(config.hover_radius),
            points: Vec::new().into(),
            index: GridIndex::default(),
            index_scale: None,
            index_translate: Vec2::ZERO,
            viewport,
            selection,
            minimap,
            scheduler,
            config,
            on_selection_change: None,
            on_point_clicked: None,
            tooltip_body: None,
        }
    }

    /// The sanitized configuration in use.
    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    /// The main view.
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// The current point sequence.
    pub fn points(&self) -> &Arc<[DataPoint<T>]> {
        &self.points
    }

    /// The minimap.
    pub fn minimap(&self) -> &MiniMap {
        &self.minimap
    }

    /// Replaces the dataset.
    ///
    /// Clears the selection and hover, abandons in-progress gestures and
    /// zooms to fit the new data.
    pub fn set_points(&mut self, points: impl Into<Arc<[DataPoint<T>]>>) {
        self.points = points.into();
        self.selection.reset(true);
        self.controller.reset();
        self.minimap.cancel_drag();
        self.hover.clear();
        self.minimap.set_data_extent(data_extent(&self.points));
        self.index_scale = None;
        log::debug!("dataset replaced: {} points", self.points.len());
        self.fit_view();
        self.scheduler.mark(Dirty::all());
    }

    /// Resizes the canvas. Scale and translation are kept.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.viewport.set_size(width, height);
        let size = self.viewport.size();
        self.minimap.layout(size.width, size.height);
        self.scheduler.mark(Dirty::VIEWPORT);
    }

    /// Zooms to fit the data; without data, resets to the unit transform.
    pub fn reset_view(&mut self) {
        self.fit_view();
        self.scheduler.mark(Dirty::VIEWPORT);
    }

    /// Sets scale and translation directly (for example to restore a saved
    /// view). Scales are clamped; the canvas size in `state` is ignored.
    pub fn set_view(&mut self, state: ViewportState) {
        let size = self.viewport.size();
        self.viewport.set_state(ViewportState {
            width: size.width,
            height: size.height,
            ..state
        });
        self.scheduler.mark(Dirty::VIEWPORT);
    }

    /// Switches between selecting and panning. Cancels any gesture in flight.
    pub fn set_mode(&mut self, mode: SelectionMode) {
        self.config.selection_type = mode;
        self.controller.end_pan();
        if self.selection.set_mode(mode) == GestureOutcome::Cancelled {
            self.scheduler.mark(Dirty::OUTLINE);
        }
    }

    /// Switches between marquee and lasso. Cancels any gesture in flight.
    pub fn set_shape(&mut self, shape: SelectionShape) {
        self.config.selection_shape = shape;
        if self.selection.set_shape(shape) == GestureOutcome::Cancelled {
            self.scheduler.mark(Dirty::OUTLINE);
        }
    }

    /// Registers the callback fired once per completed selection gesture
    /// with the selected points in sequence order.
    pub fn on_selection_change(&mut self, f: impl FnMut(&[&DataPoint<T>]) + 'static) {
        self.on_selection_change = Some(Box::new(f));
    }

    /// Registers the callback fired when a click resolves to a point.
    pub fn on_point_clicked(&mut self, f: impl FnMut(usize, &DataPoint<T>) + 'static) {
        self.on_point_clicked = Some(Box::new(f));
    }

    /// Registers the tooltip formatter.
    pub fn set_tooltip_body(&mut self, f: impl Fn(&DataPoint<T>) -> String + 'static) {
        self.tooltip_body = Some(Box::new(f));
    }

    /// Feeds one input event and returns what it changed.
    ///
    /// The returned bits are also accumulated for [`ScatterChart::take_frame`].
    pub fn handle_event(&mut self, event: ChartEvent) -> Dirty {
        let dirty = match event {
            ChartEvent::PointerDown {
                pointer,
                pos,
                extend,
            } => self.pointer_down(pointer, pos, extend),
            ChartEvent::PointerMove { pointer, pos } => self.pointer_move(pointer, pos),
            ChartEvent::PointerUp { pointer, pos } => self.pointer_up(pointer, pos),
            ChartEvent::PointerLeave => {
                let mut d = self.cancel_gestures();
                d |= self.clear_hover();
                d
            }
            ChartEvent::CaptureLost { pointer } => {
                self.controller.contact_up(pointer);
                self.minimap.end_drag(pointer);
                match self.selection.capture_lost(pointer) {
                    GestureOutcome::Cancelled => Dirty::OUTLINE,
                    _ => Dirty::empty(),
                }
            }
            ChartEvent::Wheel {
                pos,
                delta_y,
                axis,
            } => self.wheel(pos, delta_y, axis),
            ChartEvent::Cancel => self.cancel_gestures(),
        };
        self.scheduler.mark(dirty);
        dirty
    }

    /// The hovered point, if any.
    pub fn hovered(&self) -> Option<(usize, &DataPoint<T>)> {
        let i = self.hover.hovered()?;
        self.points.get(i).map(|p| (i, p))
    }

    /// Selected indices in sequence order.
    pub fn selected_indices(&self) -> &[usize] {
        self.selection.selected().indices()
    }

    /// Selected points in sequence order.
    pub fn selected_points(&self) -> Vec<&DataPoint<T>> {
        self.selection
            .selected()
            .iter()
            .filter_map(|i| self.points.get(i))
            .collect()
    }

    /// Replaces the selection from outside. Out-of-range indices are dropped.
    ///
    /// Does not fire the selection callback.
    pub fn set_selected(&mut self, indices: impl IntoIterator<Item = usize>) {
        let len = self.points.len();
        let changed = self
            .selection
            .set_selected(indices.into_iter().filter(|&i| i < len));
        if changed {
            self.scheduler.mark(Dirty::SELECTION);
        }
    }

    /// Clears the selection. Does not fire the selection callback.
    pub fn clear_selection(&mut self) {
        if self.selection.clear_selection() {
            self.scheduler.mark(Dirty::SELECTION);
        }
    }

    /// The tooltip for the hovered point, formatted by the registered
    /// formatter (or as `(x, y)` without one).
    pub fn tooltip(&self) -> Option<TooltipPrimitive> {
        let (index, p) = self.hovered()?;
        let center = self.viewport.to_screen(p.position());
        let anchor = tooltip_anchor(center, p.radius_or(self.config.default_radius));
        let body = match &self.tooltip_body {
            Some(f) => f(p),
            None => format!("({}, {})", p.x, p.y),
        };
        Some(TooltipPrimitive {
            index,
            anchor,
            body,
        })
    }

    /// Draw instructions for the current state.
    pub fn draw_list(&self) -> DrawList {
        compose(RenderInput {
            viewport: &self.viewport,
            points: &self.points,
            selected: self.selection.selected(),
            hovered: self.hover.hovered(),
            outline: self.selection.active_outline(),
            minimap: Some(&self.minimap),
            axis_labels: &self.config.axis_labels,
            default_radius: self.config.default_radius,
            tooltip: self.tooltip(),
        })
    }

    /// Returns and resets everything that changed since the last frame.
    pub fn take_frame(&mut self) -> Dirty {
        self.scheduler.take_frame()
    }

    /// Returns `true` if a redraw is due.
    pub fn needs_frame(&self) -> bool {
        self.scheduler.needs_frame()
    }

    /// The spatial index over current screen positions.
    ///
    /// Rebuilt lazily after zooms and dataset changes; pans only shift it.
    pub fn index(&mut self) -> &GridIndex {
        self.refresh_index();
        &self.index
    }

    fn pointer_down(&mut self, pointer: PointerId, pos: Point, extend: bool) -> Dirty {
        if !pos.is_finite() {
            return Dirty::empty();
        }
        let busy = self.selection.is_drawing()
            || self.controller.is_panning()
            || self.controller.is_pinching();
        if !busy && self.minimap.begin_drag(&mut self.viewport, pointer, pos) {
            return Dirty::VIEWPORT | self.clear_hover();
        }
        if self.controller.contact_down(pointer, pos) {
            let mut d = self.clear_hover();
            if self.selection.cancel() == GestureOutcome::Cancelled {
                d |= Dirty::OUTLINE;
            }
            return d;
        }
        let op = if extend {
            SelectOp::Extend
        } else {
            SelectOp::Replace
        };
        match self.selection.pointer_down(pointer, pos, op) {
            GestureOutcome::PanRequested => {
                self.controller.begin_pan(pointer, pos);
                self.clear_hover()
            }
            GestureOutcome::Started => Dirty::OUTLINE | self.clear_hover(),
            _ => Dirty::empty(),
        }
    }

    fn pointer_move(&mut self, pointer: PointerId, pos: Point) -> Dirty {
        if self.minimap.drag_move(&mut self.viewport, pointer, pos) {
            return Dirty::VIEWPORT;
        }
        if self.controller.contact_move(&mut self.viewport, pointer, pos) {
            return Dirty::VIEWPORT;
        }
        if self.controller.is_pinching() {
            return Dirty::empty();
        }
        if self.controller.pan_move(&mut self.viewport, pointer, pos) {
            return Dirty::VIEWPORT;
        }
        if self.selection.is_drawing() {
            return match self.selection.pointer_move(pointer, pos) {
                GestureOutcome::Updated => Dirty::OUTLINE,
                _ => Dirty::empty(),
            };
        }
        if self.controller.is_panning() || self.minimap.is_dragging() {
            return Dirty::empty();
        }
        self.update_hover(pos)
    }

    fn pointer_up(&mut self, pointer: PointerId, pos: Point) -> Dirty {
        // A pan that never left the click threshold is a click on whatever
        // the pointer grabbed.
        let pan_click = self
            .controller
            .pan_grab(pointer)
            .filter(|&(_, travel)| travel < self.config.click_threshold)
            .map(|(at, _)| at);
        self.controller.contact_up(pointer);
        if let Some(at) = pan_click {
            self.refresh_index();
            let hit = self.index.nearest(at, self.config.hover_radius);
            log::debug!("pan gesture resolved as click at {at:?}: {hit:?}");
            self.fire_click(hit);
            return Dirty::empty();
        }
        if self.minimap.end_drag(pointer) {
            return Dirty::empty();
        }
        if self.selection.phase() != GesturePhase::Drawing(pointer) {
            return Dirty::empty();
        }
        self.refresh_index();
        match self.selection.pointer_up(pointer, pos, &self.index) {
            GestureOutcome::Committed(indices) => {
                if let Some(cb) = self.on_selection_change.as_mut() {
                    let picked: Vec<&DataPoint<T>> =
                        indices.iter().filter_map(|&i| self.points.get(i)).collect();
                    cb(&picked);
                }
                Dirty::SELECTION | Dirty::OUTLINE
            }
            GestureOutcome::Clicked(hit) => {
                self.fire_click(hit);
                Dirty::OUTLINE
            }
            _ => Dirty::empty(),
        }
    }

    fn fire_click(&mut self, hit: Option<usize>) {
        if let Some(i) = hit
            && let Some(p) = self.points.get(i)
            && let Some(cb) = self.on_point_clicked.as_mut()
        {
            cb(i, p);
        }
    }

    fn wheel(&mut self, pos: Point, delta_y: f64, axis: ZoomAxis) -> Dirty {
        // Zooming would invalidate a screen-space outline mid-gesture.
        if self.selection.is_drawing() || self.minimap.contains(pos) {
            return Dirty::empty();
        }
        if !self.controller.wheel(&mut self.viewport, pos, delta_y, axis) {
            return Dirty::empty();
        }
        let mut d = Dirty::VIEWPORT;
        if !self.controller.is_panning() && !self.controller.is_pinching() {
            d |= self.update_hover(pos);
        }
        d
    }

    fn cancel_gestures(&mut self) -> Dirty {
        self.controller.reset();
        self.minimap.cancel_drag();
        match self.selection.cancel() {
            GestureOutcome::Cancelled => Dirty::OUTLINE,
            _ => Dirty::empty(),
        }
    }

    fn update_hover(&mut self, pos: Point) -> Dirty {
        if !pos.is_finite() || self.minimap.contains(pos) {
            return self.clear_hover();
        }
        self.refresh_index();
        if self.hover.update(&self.index, pos).is_change() {
            Dirty::HOVER
        } else {
            Dirty::empty()
        }
    }

    fn clear_hover(&mut self) -> Dirty {
        if self.hover.clear().is_change() {
            Dirty::HOVER
        } else {
            Dirty::empty()
        }
    }

    /// Zooms to fit, then applies the configured initial zoom about the
    /// screen center.
    fn fit_view(&mut self) {
        let zoom = self.config.zoom_scale;
        match data_extent(&self.points) {
            Some(extent) => {
                self.viewport
                    .fit_data(extent, self.config.fit_padding, FitMode::Stretch);
                let center = self.viewport.screen_center();
                self.viewport
                    .apply_zoom(center, zoom.scale_x, zoom.scale_y);
                log::debug!("zoomed to fit {extent:?} at {zoom:?}");
            }
            None => {
                self.viewport.reset();
                self.viewport.set_scale(zoom.scale_x, zoom.scale_y);
                log::debug!("no finite points; view reset to initial scale");
            }
        }
    }

    fn refresh_index(&mut self) {
        let s = self.viewport.state();
        let translate = Vec2::new(s.translate_x, s.translate_y);
        if self.index_scale == Some((s.scale_x, s.scale_y)) {
            if translate != self.index_translate {
                self.index.translate(translate - self.index_translate);
                self.index_translate = translate;
            }
            return;
        }
        let default_radius = self.config.default_radius;
        let cell = GridIndex::suggest_cell_size(mean_radius(&self.points, default_radius));
        let viewport = &self.viewport;
        self.index = GridIndex::build(
            self.points
                .iter()
                .map(|p| (viewport.to_screen(p.position()), p.radius_or(default_radius))),
            cell,
        );
        self.index_scale = Some((s.scale_x, s.scale_y));
        self.index_translate = translate;
    }
}
