// Copyright 2025 the Scatterscope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The point entity supplied by the host, and helpers over point sequences.

use kurbo::Rect;
use peniko::Color;
use peniko::color::{Srgb, parse_color as parse_css_color};

/// One plotted datum.
///
/// Identity is the position within the sequence handed to the chart. The
/// `metadata` payload is never inspected; it is passed through unchanged to
/// callbacks and the tooltip formatter.
#[derive(Clone, Debug, PartialEq)]
pub struct DataPoint<T> {
    /// Horizontal data coordinate.
    pub x: f64,
    /// Vertical data coordinate.
    pub y: f64,
    /// Render radius in pixels; `None` uses the chart's default radius.
    pub r: Option<f64>,
    /// Fill color.
    pub color: Color,
    /// Opacity in `[0, 1]`; `None` is fully opaque.
    pub opacity: Option<f32>,
    /// Opaque payload owned by the host.
    pub metadata: T,
}

impl<T> DataPoint<T> {
    /// Creates a black point at `(x, y)` with default radius and full opacity.
    pub fn new(x: f64, y: f64, metadata: T) -> Self {
        Self {
            x,
            y,
            r: None,
            color: Color::BLACK,
            opacity: None,
            metadata,
        }
    }

    /// Sets the render radius.
    #[must_use]
    pub fn with_radius(mut self, r: f64) -> Self {
        self.r = Some(r);
        self
    }

    /// Sets the fill color.
    #[must_use]
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Sets the opacity.
    #[must_use]
    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = Some(opacity);
        self
    }

    /// Data-space position.
    pub fn position(&self) -> kurbo::Point {
        kurbo::Point::new(self.x, self.y)
    }

    /// Returns `true` if both coordinates are finite.
    ///
    /// Points failing this are excluded from rendering, hit-testing and
    /// selection.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Render radius, falling back to `default` for missing or invalid values.
    pub fn radius_or(&self, default: f64) -> f64 {
        match self.r {
            Some(r) if r.is_finite() && r >= 0.0 => r,
            _ => default,
        }
    }

    /// Opacity clamped to `[0, 1]`; missing or NaN values are opaque.
    pub fn effective_opacity(&self) -> f32 {
        match self.opacity {
            Some(o) if !o.is_nan() => o.clamp(0.0, 1.0),
            _ => 1.0,
        }
    }
}

/// Parses a CSS color string (`"red"`, `"#3366ff"`, `"rgb(10 20 30)"`, ...).
///
/// Unparseable input yields `fallback`.
pub fn parse_color(css: &str, fallback: Color) -> Color {
    match parse_css_color(css) {
        Ok(c) => c.to_alpha_color::<Srgb>(),
        Err(_) => {
            log::warn!("unrecognized color {css:?}, using fallback");
            fallback
        }
    }
}

/// Bounding box of all finite points in data space, or `None` if there are none.
pub fn data_extent<T>(points: &[DataPoint<T>]) -> Option<Rect> {
    points
        .iter()
        .filter(|p| p.is_finite())
        .fold(None, |acc: Option<Rect>, p| {
            let here = Rect::from_points(p.position(), p.position());
            Some(acc.map_or(here, |r| r.union(here)))
        })
}

/// Mean render radius over finite points, or `default` if there are none.
pub(crate) fn mean_radius<T>(points: &[DataPoint<T>], default: f64) -> f64 {
    let (sum, n) = points
        .iter()
        .filter(|p| p.is_finite())
        .fold((0.0, 0_u32), |(sum, n), p| {
            (sum + p.radius_or(default), n.saturating_add(1))
        });
    if n == 0 { default } else { sum / f64::from(n) }
}
