// Copyright 2025 the Scatterscope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chart configuration, validation and repair.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use kurbo::Size;
use scatter_selection::{DEFAULT_CLICK_THRESHOLD, DEFAULT_HIT_RADIUS, SelectionMode, SelectionShape};
use scatter_view::{DEFAULT_MAX_SCALE, DEFAULT_MIN_SCALE};

/// Default multiplicative zoom per wheel notch.
pub const DEFAULT_WHEEL_STEP: f64 = 1.1;
/// Default render radius for points without one.
pub const DEFAULT_POINT_RADIUS: f64 = 3.0;
/// Default fractional padding used by zoom-to-fit.
pub const DEFAULT_FIT_PADDING: f64 = 0.05;
/// Default minimap size in pixels.
pub const DEFAULT_MINIMAP_SIZE: Size = Size::new(160.0, 120.0);
/// Default minimap distance from the right and bottom canvas edges.
pub const DEFAULT_MINIMAP_MARGIN: f64 = 10.0;

/// Initial per-axis scale.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoomScale {
    /// Horizontal scale in pixels per data unit.
    pub scale_x: f64,
    /// Vertical scale in pixels per data unit.
    pub scale_y: f64,
}

impl Default for ZoomScale {
    fn default() -> Self {
        Self {
            scale_x: 1.0,
            scale_y: 1.0,
        }
    }
}

/// Minimap offsets from the right and bottom canvas edges, in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MiniMapPosition {
    /// Distance from the right edge.
    pub right: f64,
    /// Distance from the bottom edge.
    pub bottom: f64,
}

impl Default for MiniMapPosition {
    fn default() -> Self {
        Self {
            right: DEFAULT_MINIMAP_MARGIN,
            bottom: DEFAULT_MINIMAP_MARGIN,
        }
    }
}

/// Minimap configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MiniMapConfig {
    /// Whether the minimap is shown and interactive.
    pub show: bool,
    /// Placement; `None` is the bottom-right corner with the default margin.
    pub position: Option<MiniMapPosition>,
    /// Size of the overview in pixels.
    pub size: Size,
}

impl Default for MiniMapConfig {
    fn default() -> Self {
        Self {
            show: true,
            position: None,
            size: DEFAULT_MINIMAP_SIZE,
        }
    }
}

/// Axis titles.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AxisLabels {
    /// Title of the horizontal axis.
    pub x: String,
    /// Title of the vertical axis.
    pub y: String,
}

/// Everything a [`ScatterChart`](crate::ScatterChart) can be configured with.
#[derive(Clone, Debug, PartialEq)]
pub struct ChartConfig {
    /// What a primary drag does: select or pan.
    pub selection_type: SelectionMode,
    /// Marquee or lasso.
    pub selection_shape: SelectionShape,
    /// Initial scale, used until the first zoom-to-fit.
    pub zoom_scale: ZoomScale,
    /// `(min_scale, max_scale)` bounds applied to both axes.
    pub zoom_limits: (f64, f64),
    /// Multiplicative zoom per wheel notch; must be `> 1`.
    pub wheel_step: f64,
    /// Movement in pixels below which a gesture is a click.
    pub click_threshold: f64,
    /// Pick slop in pixels for hover and click.
    pub hover_radius: f64,
    /// Render radius for points without one.
    pub default_radius: f64,
    /// Minimap settings.
    pub mini_map: MiniMapConfig,
    /// Axis titles.
    pub axis_labels: AxisLabels,
    /// Fractional padding around the data extent for zoom-to-fit.
    pub fit_padding: f64,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            selection_type: SelectionMode::Select,
            selection_shape: SelectionShape::Lasso,
            zoom_scale: ZoomScale::default(),
            zoom_limits: (DEFAULT_MIN_SCALE, DEFAULT_MAX_SCALE),
            wheel_step: DEFAULT_WHEEL_STEP,
            click_threshold: DEFAULT_CLICK_THRESHOLD,
            hover_radius: DEFAULT_HIT_RADIUS,
            default_radius: DEFAULT_POINT_RADIUS,
            mini_map: MiniMapConfig::default(),
            axis_labels: AxisLabels::default(),
            fit_padding: DEFAULT_FIT_PADDING,
        }
    }
}

impl ChartConfig {
    /// Sets the drag mode.
    #[must_use]
    pub fn with_selection_type(mut self, mode: SelectionMode) -> Self {
        self.selection_type = mode;
        self
    }

    /// Sets the selection shape.
    #[must_use]
    pub fn with_selection_shape(mut self, shape: SelectionShape) -> Self {
        self.selection_shape = shape;
        self
    }

    /// Sets the initial scale.
    #[must_use]
    pub fn with_zoom_scale(mut self, scale_x: f64, scale_y: f64) -> Self {
        self.zoom_scale = ZoomScale { scale_x, scale_y };
        self
    }

    /// Sets the scale bounds.
    #[must_use]
    pub fn with_zoom_limits(mut self, min_scale: f64, max_scale: f64) -> Self {
        self.zoom_limits = (min_scale, max_scale);
        self
    }

    /// Sets the wheel step.
    #[must_use]
    pub fn with_wheel_step(mut self, step: f64) -> Self {
        self.wheel_step = step;
        self
    }

    /// Sets the click threshold.
    #[must_use]
    pub fn with_click_threshold(mut self, px: f64) -> Self {
        self.click_threshold = px;
        self
    }

    /// Sets the hover pick slop.
    #[must_use]
    pub fn with_hover_radius(mut self, px: f64) -> Self {
        self.hover_radius = px;
        self
    }

    /// Sets the default point radius.
    #[must_use]
    pub fn with_default_radius(mut self, px: f64) -> Self {
        self.default_radius = px;
        self
    }

    /// Sets the minimap configuration.
    #[must_use]
    pub fn with_mini_map(mut self, mini_map: MiniMapConfig) -> Self {
        self.mini_map = mini_map;
        self
    }

    /// Sets the axis titles.
    #[must_use]
    pub fn with_axis_labels(mut self, x: impl Into<String>, y: impl Into<String>) -> Self {
        self.axis_labels = AxisLabels {
            x: x.into(),
            y: y.into(),
        };
        self
    }

    /// Sets the zoom-to-fit padding.
    #[must_use]
    pub fn with_fit_padding(mut self, padding: f64) -> Self {
        self.fit_padding = padding;
        self
    }

    /// Returns every problem with this configuration, in field order.
    pub fn errors(&self) -> Vec<ConfigError> {
        let mut out = Vec::new();
        let ZoomScale { scale_x, scale_y } = self.zoom_scale;
        if !is_positive(scale_x) || !is_positive(scale_y) {
            out.push(ConfigError::InvalidZoomScale { scale_x, scale_y });
        }
        let (min, max) = self.zoom_limits;
        if !is_positive(min) || !is_positive(max) {
            out.push(ConfigError::NonPositiveZoomLimits { min, max });
        } else if min > max {
            out.push(ConfigError::InvertedZoomLimits { min, max });
        }
        if !(self.wheel_step.is_finite() && self.wheel_step > 1.0) {
            out.push(ConfigError::InvalidWheelStep(self.wheel_step));
        }
        if !is_non_negative(self.click_threshold) {
            out.push(ConfigError::InvalidClickThreshold(self.click_threshold));
        }
        if !is_non_negative(self.hover_radius) {
            out.push(ConfigError::InvalidHoverRadius(self.hover_radius));
        }
        if !is_non_negative(self.default_radius) {
            out.push(ConfigError::InvalidDefaultRadius(self.default_radius));
        }
        let size = self.mini_map.size;
        if !is_positive(size.width) || !is_positive(size.height) {
            out.push(ConfigError::InvalidMiniMapSize(size));
        }
        if let Some(pos) = self.mini_map.position
            && !(pos.right.is_finite() && pos.bottom.is_finite())
        {
            out.push(ConfigError::InvalidMiniMapPosition(pos));
        }
        if !is_non_negative(self.fit_padding) {
            out.push(ConfigError::InvalidFitPadding(self.fit_padding));
        }
        out
    }

    /// Checks the configuration, reporting the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.errors().into_iter().next() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Returns a copy with every reported problem repaired.
    ///
    /// Each repair is logged at `warn` level.
    #[must_use]
    pub fn sanitized(&self) -> Self {
        let mut out = self.clone();
        for err in self.errors() {
            log::warn!("chart config: {err}; {}", err.repair());
            match err {
                ConfigError::InvalidZoomScale { scale_x, scale_y } => {
                    out.zoom_scale = ZoomScale {
                        scale_x: if is_positive(scale_x) { scale_x } else { 1.0 },
                        scale_y: if is_positive(scale_y) { scale_y } else { 1.0 },
                    };
                }
                ConfigError::NonPositiveZoomLimits { .. } => {
                    out.zoom_limits = (DEFAULT_MIN_SCALE, DEFAULT_MAX_SCALE);
                }
                ConfigError::InvertedZoomLimits { min, max } => out.zoom_limits = (max, min),
                ConfigError::InvalidWheelStep(_) => out.wheel_step = DEFAULT_WHEEL_STEP,
                ConfigError::InvalidClickThreshold(_) => {
                    out.click_threshold = DEFAULT_CLICK_THRESHOLD;
                }
                ConfigError::InvalidHoverRadius(_) => out.hover_radius = DEFAULT_HIT_RADIUS,
                ConfigError::InvalidDefaultRadius(_) => out.default_radius = DEFAULT_POINT_RADIUS,
                ConfigError::InvalidMiniMapSize(_) => out.mini_map.size = DEFAULT_MINIMAP_SIZE,
                ConfigError::InvalidMiniMapPosition(_) => out.mini_map.position = None,
                ConfigError::InvalidFitPadding(_) => out.fit_padding = DEFAULT_FIT_PADDING,
            }
        }
        out
    }
}

/// A configuration value the chart cannot use as given.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ConfigError {
    /// An initial scale is zero, negative or non-finite.
    InvalidZoomScale {
        /// Requested horizontal scale.
        scale_x: f64,
        /// Requested vertical scale.
        scale_y: f64,
    },
    /// A scale bound is zero, negative or non-finite.
    NonPositiveZoomLimits {
        /// Requested lower bound.
        min: f64,
        /// Requested upper bound.
        max: f64,
    },
    /// The lower scale bound exceeds the upper one.
    InvertedZoomLimits {
        /// Requested lower bound.
        min: f64,
        /// Requested upper bound.
        max: f64,
    },
    /// The wheel step does not zoom (`<= 1`) or is non-finite.
    InvalidWheelStep(f64),
    /// The click threshold is negative or non-finite.
    InvalidClickThreshold(f64),
    /// The hover radius is negative or non-finite.
    InvalidHoverRadius(f64),
    /// The default point radius is negative or non-finite.
    InvalidDefaultRadius(f64),
    /// The minimap has no area.
    InvalidMiniMapSize(Size),
    /// A minimap offset is non-finite.
    InvalidMiniMapPosition(MiniMapPosition),
    /// The fit padding is negative or non-finite.
    InvalidFitPadding(f64),
}

impl ConfigError {
    fn repair(&self) -> &'static str {
        match self {
            Self::InvalidZoomScale { .. } => "using 1.0 for the invalid axis",
            Self::NonPositiveZoomLimits { .. } => "using the default scale limits",
            Self::InvertedZoomLimits { .. } => "swapping the limits",
            Self::InvalidWheelStep(_) => "using the default wheel step",
            Self::InvalidClickThreshold(_) => "using the default click threshold",
            Self::InvalidHoverRadius(_) => "using the default hover radius",
            Self::InvalidDefaultRadius(_) => "using the default point radius",
            Self::InvalidMiniMapSize(_) => "using the default minimap size",
            Self::InvalidMiniMapPosition(_) => "using the default minimap corner",
            Self::InvalidFitPadding(_) => "using the default fit padding",
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidZoomScale { scale_x, scale_y } => {
                write!(f, "initial zoom scale ({scale_x}, {scale_y}) must be finite and positive")
            }
            Self::NonPositiveZoomLimits { min, max } => {
                write!(f, "zoom limits ({min}, {max}) must be finite and positive")
            }
            Self::InvertedZoomLimits { min, max } => {
                write!(f, "zoom limit minimum {min} exceeds maximum {max}")
            }
            Self::InvalidWheelStep(step) => {
                write!(f, "wheel step {step} must be finite and greater than 1")
            }
            Self::InvalidClickThreshold(v) => {
                write!(f, "click threshold {v} must be finite and non-negative")
            }
            Self::InvalidHoverRadius(v) => {
                write!(f, "hover radius {v} must be finite and non-negative")
            }
            Self::InvalidDefaultRadius(v) => {
                write!(f, "default point radius {v} must be finite and non-negative")
            }
            Self::InvalidMiniMapSize(size) => {
                write!(f, "minimap size {}x{} must be positive", size.width, size.height)
            }
            Self::InvalidMiniMapPosition(pos) => {
                write!(f, "minimap offsets ({}, {}) must be finite", pos.right, pos.bottom)
            }
            Self::InvalidFitPadding(v) => {
                write!(f, "fit padding {v} must be finite and non-negative")
            }
        }
    }
}

impl core::error::Error for ConfigError {}

fn is_positive(v: f64) -> bool {
    v.is_finite() && v > 0.0
}

fn is_non_negative(v: f64) -> bool {
    v.is_finite() && v >= 0.0
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(ChartConfig::default().validate(), Ok(()));
        assert_eq!(ChartConfig::default().sanitized(), ChartConfig::default());
    }

    #[test]
    fn validate_reports_first_problem() {
        let cfg = ChartConfig::default()
            .with_wheel_step(0.5)
            .with_hover_radius(-1.0);
        assert_eq!(cfg.validate(), Err(ConfigError::InvalidWheelStep(0.5)));
        assert_eq!(cfg.errors().len(), 2);
    }

    #[test]
    fn sanitized_repairs_everything() {
        let cfg = ChartConfig::default()
            .with_zoom_scale(0.0, 2.0)
            .with_zoom_limits(50.0, 0.5)
            .with_wheel_step(f64::NAN)
            .with_click_threshold(-3.0)
            .with_default_radius(f64::INFINITY)
            .with_fit_padding(-0.1)
            .with_mini_map(MiniMapConfig {
                show: true,
                position: Some(MiniMapPosition {
                    right: f64::NAN,
                    bottom: 4.0,
                }),
                size: Size::new(0.0, 100.0),
            });
        let fixed = cfg.sanitized();
        assert_eq!(fixed.validate(), Ok(()));
        assert_eq!(fixed.zoom_scale, ZoomScale { scale_x: 1.0, scale_y: 2.0 });
        assert_eq!(fixed.zoom_limits, (0.5, 50.0));
        assert_eq!(fixed.wheel_step, DEFAULT_WHEEL_STEP);
        assert_eq!(fixed.click_threshold, DEFAULT_CLICK_THRESHOLD);
        assert_eq!(fixed.default_radius, DEFAULT_POINT_RADIUS);
        assert_eq!(fixed.fit_padding, DEFAULT_FIT_PADDING);
        assert_eq!(fixed.mini_map.size, DEFAULT_MINIMAP_SIZE);
        assert_eq!(fixed.mini_map.position, None);
    }

    #[test]
    fn non_positive_limits_reset_to_defaults() {
        let fixed = ChartConfig::default().with_zoom_limits(-1.0, 10.0).sanitized();
        assert_eq!(fixed.zoom_limits, (DEFAULT_MIN_SCALE, DEFAULT_MAX_SCALE));
    }

    #[test]
    fn errors_display_the_offending_value() {
        let msg = ConfigError::InvertedZoomLimits { min: 4.0, max: 2.0 }.to_string();
        assert_eq!(msg, "zoom limit minimum 4 exceeds maximum 2");
    }
}
