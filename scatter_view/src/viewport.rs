// Copyright 2025 the Scatterscope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _; // for `abs`
use kurbo::{Affine, Point, Rect, Size, Vec2};

use crate::modes::FitMode;

/// Default lower bound for the per-axis scale.
pub const DEFAULT_MIN_SCALE: f64 = 1e-3;

/// Default upper bound for the per-axis scale.
pub const DEFAULT_MAX_SCALE: f64 = 1e3;

/// Plain snapshot of the viewport transform.
///
/// A data point `(x, y)` lands on screen at
/// `(x * scale_x + translate_x, y * scale_y + translate_y)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportState {
    /// Horizontal scale in pixels per data unit. Always `> 0`.
    pub scale_x: f64,
    /// Vertical scale in pixels per data unit. Always `> 0`.
    pub scale_y: f64,
    /// Horizontal translation in pixels.
    pub translate_x: f64,
    /// Vertical translation in pixels.
    pub translate_y: f64,
    /// Width of the screen area in pixels.
    pub width: f64,
    /// Height of the screen area in pixels.
    pub height: f64,
}

impl Default for ViewportState {
    fn default() -> Self {
        Self {
            scale_x: 1.0,
            scale_y: 1.0,
            translate_x: 0.0,
            translate_y: 0.0,
            width: 0.0,
            height: 0.0,
        }
    }
}

/// Data-space to screen-space transform with independent axis scales.
///
/// `Viewport` is the only owner of the zoom/pan state of a chart. Every
/// mutation goes through a validating method, so the scale invariant
/// (`min_scale <= scale <= max_scale`, both axes) always holds, and
/// non-finite requests are ignored rather than poisoning the transform.
#[derive(Clone, Debug)]
pub struct Viewport {
    state: ViewportState,
    min_scale: f64,
    max_scale: f64,
    data_to_screen: Affine,
    screen_to_data: Affine,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

impl Viewport {
    /// Creates a viewport of the given pixel size with the unit transform.
    ///
    /// Non-finite or negative dimensions are stored as zero; such a viewport
    /// is [degenerate](Self::is_degenerate) but still converts coordinates.
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        let mut vp = Self {
            state: ViewportState {
                width: sanitize_extent(width),
                height: sanitize_extent(height),
                ..ViewportState::default()
            },
            min_scale: DEFAULT_MIN_SCALE,
            max_scale: DEFAULT_MAX_SCALE,
            data_to_screen: Affine::IDENTITY,
            screen_to_data: Affine::IDENTITY,
        };
        vp.rebuild_transforms();
        vp
    }

    /// Returns a copy of the current transform state.
    #[must_use]
    pub fn state(&self) -> ViewportState {
        self.state
    }

    /// Replaces the transform state.
    ///
    /// Scales are clamped into the configured range; non-finite fields keep
    /// their previous value.
    pub fn set_state(&mut self, state: ViewportState) {
        let prev = self.state;
        self.state = ViewportState {
            scale_x: self.clamp_scale(finite_or(state.scale_x, prev.scale_x)),
            scale_y: self.clamp_scale(finite_or(state.scale_y, prev.scale_y)),
            translate_x: finite_or(state.translate_x, prev.translate_x),
            translate_y: finite_or(state.translate_y, prev.translate_y),
            width: sanitize_extent(state.width),
            height: sanitize_extent(state.height),
        };
        self.rebuild_transforms();
    }

    /// Returns the screen size in pixels.
    #[must_use]
    pub fn size(&self) -> Size {
        Size::new(self.state.width, self.state.height)
    }

    /// Sets the screen size. Scale and translation are left untouched.
    pub fn set_size(&mut self, width: f64, height: f64) {
        self.state.width = sanitize_extent(width);
        self.state.height = sanitize_extent(height);
    }

    /// Returns `true` when the screen area has no extent on some axis.
    ///
    /// Nothing should be rendered or indexed for a degenerate viewport.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.state.width <= 0.0 || self.state.height <= 0.0
    }

    /// Returns the screen rectangle `(0, 0)..(width, height)`.
    #[must_use]
    pub fn screen_rect(&self) -> Rect {
        Rect::from_origin_size(Point::ZERO, self.size())
    }

    /// Returns the screen center.
    #[must_use]
    pub fn screen_center(&self) -> Point {
        self.screen_rect().center()
    }

    /// Returns the configured `(min_scale, max_scale)` range.
    #[must_use]
    pub fn scale_limits(&self) -> (f64, f64) {
        (self.min_scale, self.max_scale)
    }

    /// Sets the per-axis scale range.
    ///
    /// The range is normalized so that `min <= max`. Non-finite or
    /// non-positive bounds fall back to the defaults. The current scale is
    /// clamped into the new range, keeping the translation.
    pub fn set_scale_limits(&mut self, min_scale: f64, max_scale: f64) {
        let min_scale = positive_or(min_scale, DEFAULT_MIN_SCALE);
        let max_scale = positive_or(max_scale, DEFAULT_MAX_SCALE);
        let (min_scale, max_scale) = if min_scale <= max_scale {
            (min_scale, max_scale)
        } else {
            (max_scale, min_scale)
        };
        self.min_scale = min_scale;
        self.max_scale = max_scale;
        self.state.scale_x = self.clamp_scale(self.state.scale_x);
        self.state.scale_y = self.clamp_scale(self.state.scale_y);
        self.rebuild_transforms();
    }

    /// Sets both axis scales directly, clamped into the scale range.
    ///
    /// The translation is left untouched, so the data origin stays put on
    /// screen. Use [`Viewport::apply_zoom`] to zoom about another point.
    pub fn set_scale(&mut self, scale_x: f64, scale_y: f64) {
        self.state.scale_x = self.clamp_scale(finite_or(scale_x, self.state.scale_x));
        self.state.scale_y = self.clamp_scale(finite_or(scale_y, self.state.scale_y));
        self.rebuild_transforms();
    }

    /// Converts a data-space point to screen space.
    #[must_use]
    pub fn to_screen(&self, data: Point) -> Point {
        self.data_to_screen * data
    }

    /// Converts a screen-space point to data space.
    #[must_use]
    pub fn to_data(&self, screen: Point) -> Point {
        self.screen_to_data * screen
    }

    /// Returns the data-to-screen transform as an affine matrix.
    #[must_use]
    pub fn data_to_screen(&self) -> Affine {
        self.data_to_screen
    }

    /// Converts a data-space rectangle to screen space.
    #[must_use]
    pub fn data_to_screen_rect(&self, rect: Rect) -> Rect {
        // Scales are positive, so the mapping is monotonic on both axes and
        // the two corners are enough.
        Rect::from_points(
            self.to_screen(rect.origin()),
            self.to_screen(Point::new(rect.x1, rect.y1)),
        )
    }

    /// Converts a screen-space rectangle to data space.
    #[must_use]
    pub fn screen_to_data_rect(&self, rect: Rect) -> Rect {
        Rect::from_points(self.to_data(rect.origin()), self.to_data(Point::new(rect.x1, rect.y1)))
    }

    /// Returns the data-space rectangle currently visible on screen.
    #[must_use]
    pub fn visible_data_rect(&self) -> Rect {
        self.screen_to_data_rect(self.screen_rect())
    }

    /// Zooms each axis by its factor, keeping the data under `focal` fixed.
    ///
    /// Each resulting scale is clamped into the scale range; a factor that
    /// would overshoot a bound is reduced so the scale lands exactly on it.
    /// Non-finite or non-positive factors leave that axis unchanged.
    ///
    /// Returns `true` if the transform changed.
    pub fn apply_zoom(&mut self, focal: Point, factor_x: f64, factor_y: f64) -> bool {
        if !focal.is_finite() {
            return false;
        }
        let (scale_x, translate_x) =
            self.zoom_axis(self.state.scale_x, self.state.translate_x, focal.x, factor_x);
        let (scale_y, translate_y) =
            self.zoom_axis(self.state.scale_y, self.state.translate_y, focal.y, factor_y);
        let changed = scale_x != self.state.scale_x || scale_y != self.state.scale_y;
        if changed {
            self.state.scale_x = scale_x;
            self.state.scale_y = scale_y;
            self.state.translate_x = translate_x;
            self.state.translate_y = translate_y;
            self.rebuild_transforms();
        }
        changed
    }

    /// Translates the view by a screen-space delta.
    ///
    /// Returns `true` if the transform changed.
    pub fn apply_pan(&mut self, delta_x: f64, delta_y: f64) -> bool {
        let delta = Vec2::new(delta_x, delta_y);
        if !delta.is_finite() || delta == Vec2::ZERO {
            return false;
        }
        self.state.translate_x += delta.x;
        self.state.translate_y += delta.y;
        self.rebuild_transforms();
        true
    }

    /// Pans so that `data` lands on the screen center. Scale is unchanged.
    pub fn center_on(&mut self, data: Point) {
        if !data.is_finite() {
            return;
        }
        let center = self.screen_center();
        let current = self.to_screen(data);
        self.apply_pan(center.x - current.x, center.y - current.y);
    }

    /// Fits a data extent into the screen ("zoom to fit").
    ///
    /// `padding` is a fraction of the extent added on every side
    /// (`0.05` leaves 5% of slack). Degenerate inputs degrade gracefully:
    /// - a degenerate viewport resets to the unit transform;
    /// - an extent with zero size on an axis keeps unit scale on that axis
    ///   and centers the extent on screen;
    /// - a non-finite extent resets to the unit transform.
    pub fn fit_data(&mut self, extent: Rect, padding: f64, mode: FitMode) {
        let padding = if padding.is_finite() { padding.max(0.0) } else { 0.0 };
        if self.is_degenerate() || !extent.is_finite() {
            self.reset();
            return;
        }
        let extent = extent.abs();
        let pad = Vec2::new(extent.width() * padding, extent.height() * padding);
        let padded = extent.inflate(pad.x, pad.y);

        let fit_axis = |screen: f64, data: f64| {
            if data > 0.0 { screen / data } else { 1.0 }
        };
        let mut scale_x = fit_axis(self.state.width, padded.width());
        let mut scale_y = fit_axis(self.state.height, padded.height());
        if mode == FitMode::PreserveAspect {
            let uniform = match (padded.width() > 0.0, padded.height() > 0.0) {
                (true, true) => scale_x.min(scale_y),
                (true, false) => scale_x,
                (false, true) => scale_y,
                (false, false) => 1.0,
            };
            scale_x = uniform;
            scale_y = uniform;
        }
        self.state.scale_x = self.clamp_scale(scale_x);
        self.state.scale_y = self.clamp_scale(scale_y);

        let center = self.screen_center();
        let data_center = padded.center();
        self.state.translate_x = center.x - data_center.x * self.state.scale_x;
        self.state.translate_y = center.y - data_center.y * self.state.scale_y;
        self.rebuild_transforms();
    }

    /// Resets to unit scale and zero translation, keeping the screen size.
    pub fn reset(&mut self) {
        self.state = ViewportState {
            scale_x: self.clamp_scale(1.0),
            scale_y: self.clamp_scale(1.0),
            translate_x: 0.0,
            translate_y: 0.0,
            width: self.state.width,
            height: self.state.height,
        };
        self.rebuild_transforms();
    }

    /// Suggests a “nice” horizontal tick spacing in data units.
    ///
    /// The spacing is chosen from a 1‑2‑5 ladder so ticks land roughly
    /// 64 pixels apart, with `base` as a lower bound.
    #[must_use]
    pub fn suggest_tick_spacing_x(&self, base: f64) -> f64 {
        suggest_spacing(1.0 / self.state.scale_x, base)
    }

    /// Suggests a “nice” vertical tick spacing in data units.
    ///
    /// See [`Viewport::suggest_tick_spacing_x`].
    #[must_use]
    pub fn suggest_tick_spacing_y(&self, base: f64) -> f64 {
        suggest_spacing(1.0 / self.state.scale_y, base)
    }

    fn zoom_axis(&self, scale: f64, translate: f64, focal: f64, factor: f64) -> (f64, f64) {
        if !factor.is_finite() || factor <= 0.0 {
            return (scale, translate);
        }
        let new_scale = self.clamp_scale(scale * factor);
        if new_scale == scale {
            return (scale, translate);
        }
        // The effective factor may be smaller than requested when clamped.
        let effective = new_scale / scale;
        (new_scale, focal - (focal - translate) * effective)
    }

    fn clamp_scale(&self, scale: f64) -> f64 {
        if scale.is_finite() && scale > 0.0 {
            scale.clamp(self.min_scale, self.max_scale)
        } else {
            1.0_f64.clamp(self.min_scale, self.max_scale)
        }
    }

    fn rebuild_transforms(&mut self) {
        let s = &self.state;
        // Data → screen: scale per axis, then translate.
        self.data_to_screen = Affine::translate((s.translate_x, s.translate_y))
            * Affine::scale_non_uniform(s.scale_x, s.scale_y);
        self.screen_to_data = self.data_to_screen.inverse();
    }
}

fn suggest_spacing(units_per_px: f64, base: f64) -> f64 {
    let base = base.abs().max(f64::MIN_POSITIVE);
    let target_px = 64.0_f64;
    let mut desired = units_per_px.abs() * target_px;
    if !desired.is_finite() || desired < base {
        desired = base;
    }

    let mut unit = 1.0_f64;
    while unit > desired {
        unit /= 10.0;
    }
    while unit * 10.0 <= desired {
        unit *= 10.0;
    }

    loop {
        for m in [1.0_f64, 2.0, 5.0, 10.0] {
            let step = m * unit;
            if step >= desired {
                return step;
            }
        }
        unit *= 10.0;
    }
}

fn sanitize_extent(v: f64) -> f64 {
    if v.is_finite() && v > 0.0 { v } else { 0.0 }
}

fn finite_or(v: f64, fallback: f64) -> f64 {
    if v.is_finite() { v } else { fallback }
}

fn positive_or(v: f64, fallback: f64) -> f64 {
    if v.is_finite() && v > 0.0 { v } else { fallback }
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Rect};

    use super::{FitMode, Viewport, ViewportState};

    fn close(a: Point, b: Point) -> bool {
        (a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9
    }

    #[test]
    fn data_screen_roundtrip() {
        let mut vp = Viewport::new(800.0, 600.0);
        vp.apply_zoom(Point::new(13.0, 27.0), 3.5, 0.25);
        vp.apply_pan(-41.0, 17.5);

        for p in [
            Point::new(10.0, -5.0),
            Point::new(-1.0e4, 3.0e3),
            Point::new(0.125, 0.0),
        ] {
            assert!(close(vp.to_data(vp.to_screen(p)), p));
        }
    }

    #[test]
    fn zoom_keeps_focal_point_fixed() {
        let mut vp = Viewport::new(800.0, 600.0);
        let focal = Point::new(321.0, 97.0);
        let before = vp.to_data(focal);

        assert!(vp.apply_zoom(focal, 2.0, 0.5));
        assert!(close(vp.to_data(focal), before));
        assert_eq!(vp.state().scale_x, 2.0);
        assert_eq!(vp.state().scale_y, 0.5);
    }

    #[test]
    fn zoom_factor_is_reduced_to_land_on_bound() {
        let mut vp = Viewport::new(800.0, 600.0);
        vp.set_scale_limits(0.5, 4.0);
        let focal = Point::new(200.0, 150.0);
        let before = vp.to_data(focal);

        vp.apply_zoom(focal, 100.0, 1e-6);
        let state = vp.state();
        assert_eq!(state.scale_x, 4.0);
        assert_eq!(state.scale_y, 0.5);
        // The focal invariant survives clamping.
        assert!(close(vp.to_data(focal), before));

        // Already at the bound: no change.
        assert!(!vp.apply_zoom(focal, 2.0, 0.5));
    }

    #[test]
    fn invalid_zoom_factors_are_ignored() {
        let mut vp = Viewport::new(100.0, 100.0);
        let before = vp.state();
        assert!(!vp.apply_zoom(Point::new(5.0, 5.0), f64::NAN, 0.0));
        assert!(!vp.apply_zoom(Point::new(f64::INFINITY, 5.0), 2.0, 2.0));
        assert_eq!(vp.state(), before);
    }

    #[test]
    fn pans_are_additive() {
        let mut vp = Viewport::new(100.0, 100.0);
        let deltas = [(3.0, -2.0), (-10.5, 4.25), (0.0, 7.0), (100.0, 100.0)];
        for (dx, dy) in deltas {
            vp.apply_pan(dx, dy);
        }
        let state = vp.state();
        assert_eq!(state.translate_x, 92.5);
        assert_eq!(state.translate_y, 109.25);

        assert!(!vp.apply_pan(f64::NAN, 1.0));
        assert_eq!(vp.state(), state);
    }

    #[test]
    fn center_on_moves_point_to_screen_center() {
        let mut vp = Viewport::new(800.0, 600.0);
        vp.apply_zoom(Point::ZERO, 3.0, 1.5);
        let target = Point::new(-42.0, 17.0);
        let scale = (vp.state().scale_x, vp.state().scale_y);

        vp.center_on(target);
        assert!(close(vp.to_screen(target), Point::new(400.0, 300.0)));
        assert_eq!((vp.state().scale_x, vp.state().scale_y), scale);
    }

    #[test]
    fn fit_stretch_fills_viewport() {
        let mut vp = Viewport::new(200.0, 100.0);
        let extent = Rect::new(-50.0, 0.0, 50.0, 400.0);
        vp.fit_data(extent, 0.0, FitMode::Stretch);

        let visible = vp.visible_data_rect();
        assert!((visible.x0 - extent.x0).abs() < 1e-9);
        assert!((visible.x1 - extent.x1).abs() < 1e-9);
        assert!((visible.y0 - extent.y0).abs() < 1e-9);
        assert!((visible.y1 - extent.y1).abs() < 1e-9);
        assert_eq!(vp.state().scale_x, 2.0);
        assert_eq!(vp.state().scale_y, 0.25);
    }

    #[test]
    fn fit_preserve_aspect_contains_extent() {
        let mut vp = Viewport::new(200.0, 100.0);
        let extent = Rect::new(-50.0, -25.0, 50.0, 75.0);
        vp.fit_data(extent, 0.1, FitMode::PreserveAspect);

        let state = vp.state();
        assert_eq!(state.scale_x, state.scale_y);
        let visible = vp.visible_data_rect();
        assert!(visible.x0 <= extent.x0 && visible.x1 >= extent.x1);
        assert!(visible.y0 <= extent.y0 && visible.y1 >= extent.y1);
        assert!(close(vp.to_screen(extent.center()), Point::new(100.0, 50.0)));
    }

    #[test]
    fn fit_single_point_centers_it() {
        let mut vp = Viewport::new(200.0, 100.0);
        let p = Point::new(7.0, -3.0);
        vp.fit_data(Rect::from_points(p, p), 0.05, FitMode::Stretch);
        assert!(close(vp.to_screen(p), Point::new(100.0, 50.0)));
        assert_eq!(vp.state().scale_x, 1.0);
    }

    #[test]
    fn degenerate_viewport_resets_on_fit() {
        let mut vp = Viewport::new(0.0, -5.0);
        assert!(vp.is_degenerate());
        vp.apply_pan(10.0, 10.0);
        vp.fit_data(Rect::new(0.0, 0.0, 10.0, 10.0), 0.0, FitMode::Stretch);
        assert_eq!(vp.state(), ViewportState::default());
    }

    #[test]
    fn set_state_clamps_and_keeps_finite_fields() {
        let mut vp = Viewport::new(100.0, 100.0);
        vp.set_scale_limits(0.1, 10.0);
        vp.set_state(ViewportState {
            scale_x: 50.0,
            scale_y: f64::NAN,
            translate_x: f64::INFINITY,
            translate_y: 4.0,
            width: 320.0,
            height: 240.0,
        });
        let state = vp.state();
        assert_eq!(state.scale_x, 10.0);
        assert_eq!(state.scale_y, 1.0);
        assert_eq!(state.translate_x, 0.0);
        assert_eq!(state.translate_y, 4.0);
        assert_eq!((state.width, state.height), (320.0, 240.0));
    }

    #[test]
    fn inverted_scale_limits_are_normalized() {
        let mut vp = Viewport::new(100.0, 100.0);
        vp.set_scale_limits(8.0, 2.0);
        assert_eq!(vp.scale_limits(), (2.0, 8.0));
        assert_eq!(vp.state().scale_x, 2.0);

        vp.set_scale_limits(-1.0, f64::NAN);
        assert_eq!(
            vp.scale_limits(),
            (super::DEFAULT_MIN_SCALE, super::DEFAULT_MAX_SCALE)
        );
    }

    #[test]
    fn tick_spacing_follows_zoom() {
        let mut vp = Viewport::new(400.0, 300.0);
        let base = 0.01;
        let s0 = vp.suggest_tick_spacing_x(base);
        assert!(s0 >= base);
        assert_eq!(s0, 100.0);

        vp.set_scale(10.0, 0.1);
        assert!(vp.suggest_tick_spacing_x(base) <= s0);
        assert!(vp.suggest_tick_spacing_y(base) >= s0);
    }
}
