// Copyright 2025 the Scatterscope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Draw-list composition.
//!
//! [`compose`] is a pure function of the view, the selection and the point
//! sequence. It performs no drawing; hosts walk the resulting [`DrawList`]
//! with whatever 2D API they have.

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _; // for `ceil`
use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Point, Rect};
use peniko::Color;
use scatter_selection::SelectedSet;
use scatter_view::Viewport;

use crate::config::AxisLabels;
use crate::minimap::MiniMap;
use crate::point::DataPoint;

/// Extra radius, in pixels, for selected markers.
pub const SELECTED_RADIUS_BOOST: f64 = 1.0;
/// Opacity ceiling for unselected markers while a selection exists.
pub const DIMMED_OPACITY: f32 = 0.35;
/// Upper bound on ticks per axis.
const MAX_TICKS: usize = 64;

/// One marker to draw.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointPrimitive {
    /// Position in the caller's point sequence.
    pub index: usize,
    /// Screen-space center.
    pub center: Point,
    /// Radius in pixels, highlight included.
    pub radius: f64,
    /// Fill color.
    pub color: Color,
    /// Opacity in `[0, 1]`, highlight or dimming included.
    pub opacity: f32,
    /// The marker is selected.
    pub selected: bool,
    /// The marker is under the pointer.
    pub hovered: bool,
}

/// One axis tick.
#[derive(Clone, Debug, PartialEq)]
pub struct Tick {
    /// Data value at the tick.
    pub value: f64,
    /// Screen coordinate along the axis.
    pub screen: f64,
    /// Formatted value.
    pub label: String,
}

/// Ticks and titles for both axes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AxisPrimitives {
    /// Ticks along the horizontal axis, left to right.
    pub x_ticks: Vec<Tick>,
    /// Ticks along the vertical axis, in increasing data order.
    pub y_ticks: Vec<Tick>,
    /// Horizontal axis title.
    pub x_title: String,
    /// Vertical axis title.
    pub y_title: String,
}

/// A point in the overview.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OverviewPoint {
    /// Canvas-space center inside the minimap frame.
    pub center: Point,
    /// Fill color.
    pub color: Color,
}

/// Everything needed to draw the minimap.
#[derive(Clone, Debug, PartialEq)]
pub struct MiniMapPrimitives {
    /// Frame in canvas pixels.
    pub frame: Rect,
    /// Overview markers.
    pub points: Vec<OverviewPoint>,
    /// Main view indicator, clipped to the frame.
    pub indicator: Rect,
}

/// A tooltip to show.
#[derive(Clone, Debug, PartialEq)]
pub struct TooltipPrimitive {
    /// Hovered point.
    pub index: usize,
    /// Anchor in screen space.
    pub anchor: Point,
    /// Host-formatted content.
    pub body: String,
}

/// Draw instructions for one frame, back to front.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DrawList {
    /// Visible markers. Selected markers come after unselected ones.
    pub points: Vec<PointPrimitive>,
    /// Closed outline of the in-progress selection gesture.
    pub selection_outline: Option<Vec<Point>>,
    /// Axis ticks and titles.
    pub axes: Option<AxisPrimitives>,
    /// The overview.
    pub minimap: Option<MiniMapPrimitives>,
    /// Tooltip for the hovered point.
    pub tooltip: Option<TooltipPrimitive>,
}

impl DrawList {
    /// Returns `true` if there is nothing to draw.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
            && self.selection_outline.is_none()
            && self.axes.is_none()
            && self.minimap.is_none()
            && self.tooltip.is_none()
    }
}

/// State read by [`compose`].
#[derive(Debug)]
pub struct RenderInput<'a, T> {
    /// Main view.
    pub viewport: &'a Viewport,
    /// Point sequence.
    pub points: &'a [DataPoint<T>],
    /// Selected indices.
    pub selected: &'a SelectedSet,
    /// Hovered index.
    pub hovered: Option<usize>,
    /// In-progress selection outline.
    pub outline: Option<Vec<Point>>,
    /// Minimap, if any.
    pub minimap: Option<&'a MiniMap>,
    /// Axis titles.
    pub axis_labels: &'a AxisLabels,
    /// Radius for points without one.
    pub default_radius: f64,
    /// Tooltip, already formatted.
    pub tooltip: Option<TooltipPrimitive>,
}

/// Builds the draw list for one frame.
///
/// A degenerate viewport renders nothing.
pub fn compose<T>(input: RenderInput<'_, T>) -> DrawList {
    let vp = input.viewport;
    if vp.is_degenerate() {
        return DrawList::default();
    }
    let bounds = vp.screen_rect();
    let dim = !input.selected.is_empty();

    let mut points = Vec::new();
    for (index, p) in input.points.iter().enumerate() {
        if !p.is_finite() {
            continue;
        }
        let center = vp.to_screen(p.position());
        let selected = input.selected.contains(index);
        let base_radius = p.radius_or(input.default_radius);
        let radius = if selected {
            base_radius + SELECTED_RADIUS_BOOST
        } else {
            base_radius
        };
        // One radius of margin so markers straddling an edge do not pop.
        if !center.is_finite() || !inflated_contains(bounds, center, radius) {
            continue;
        }
        let base_opacity = p.effective_opacity();
        let opacity = if selected {
            1.0
        } else if dim {
            base_opacity.min(DIMMED_OPACITY)
        } else {
            base_opacity
        };
        points.push(PointPrimitive {
            index,
            center,
            radius,
            color: p.color,
            opacity,
            selected,
            hovered: input.hovered == Some(index),
        });
    }
    points.sort_by_key(|p| p.selected);

    let minimap = input
        .minimap
        .and_then(|mm| minimap_primitives(mm, vp, input.points));

    DrawList {
        points,
        selection_outline: input.outline.filter(|o| !o.is_empty()),
        axes: Some(axes(vp, input.axis_labels)),
        minimap,
        tooltip: input.tooltip,
    }
}

fn inflated_contains(bounds: Rect, center: Point, margin: f64) -> bool {
    center.x >= bounds.x0 - margin
        && center.x <= bounds.x1 + margin
        && center.y >= bounds.y0 - margin
        && center.y <= bounds.y1 + margin
}

fn minimap_primitives<T>(
    mm: &MiniMap,
    vp: &Viewport,
    points: &[DataPoint<T>],
) -> Option<MiniMapPrimitives> {
    let indicator = mm.indicator(vp)?;
    let overview = mm
        .overview_points(points.iter().map(DataPoint::position))
        .into_iter()
        .filter_map(|(i, center)| {
            points.get(i).map(|p| OverviewPoint {
                center,
                color: p.color,
            })
        })
        .collect();
    Some(MiniMapPrimitives {
        frame: mm.frame(),
        points: overview,
        indicator,
    })
}

fn axes(vp: &Viewport, labels: &AxisLabels) -> AxisPrimitives {
    let visible = vp.visible_data_rect();
    let x_ticks = ticks(visible.x0, visible.x1, vp.suggest_tick_spacing_x(0.0), |v| {
        vp.to_screen(Point::new(v, 0.0)).x
    });
    let y_ticks = ticks(visible.y0, visible.y1, vp.suggest_tick_spacing_y(0.0), |v| {
        vp.to_screen(Point::new(0.0, v)).y
    });
    AxisPrimitives {
        x_ticks,
        y_ticks,
        x_title: labels.x.clone(),
        y_title: labels.y.clone(),
    }
}

fn ticks(lo: f64, hi: f64, spacing: f64, to_screen: impl Fn(f64) -> f64) -> Vec<Tick> {
    let mut out = Vec::new();
    if !(lo.is_finite() && hi.is_finite() && spacing.is_finite() && spacing > 0.0) {
        return out;
    }
    let decimals = decimals_for(spacing);
    let first = (lo / spacing).ceil() * spacing;
    let mut n = 0.0;
    while out.len() < MAX_TICKS {
        let mut value = first + n * spacing;
        if value > hi {
            break;
        }
        if value == 0.0 {
            // Normalize `-0`.
            value = 0.0;
        }
        out.push(Tick {
            value,
            screen: to_screen(value),
            label: format!("{value:.decimals$}"),
        });
        n += 1.0;
    }
    out
}

/// Fraction digits needed to print multiples of `spacing` exactly.
fn decimals_for(spacing: f64) -> usize {
    let mut s = spacing;
    let mut d = 0;
    while s < 1.0 - 1e-9 && d < 12 {
        s *= 10.0;
        d += 1;
    }
    d
}
