// Copyright 2025 the Scatterscope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scatter View: the data-space to screen-space transform of a scatter plot.
//!
//! This crate provides a small, headless model of a plot viewport:
//! - Per-axis scale and translation (`screen = data * scale + translate`).
//! - Coordinate conversion between data space and screen (pixel) space.
//! - Zoom about a focal point, with each axis clamped to a scale range.
//! - Zoom-to-fit over a data extent, and recentering on a data point.
//!
//! Axes scale independently because a scatter plot's axes frequently carry
//! unrelated units (for example two embedding components, or time against
//! intensity). Callers that want a uniform zoom simply pass the same factor
//! for both axes.
//!
//! It does **not** own any point data, input handling or rendering. Gesture
//! interpretation (wheel notches, pinch, drag) belongs to a controller layer
//! built on top of [`Viewport`].
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Point;
//! use scatter_view::Viewport;
//!
//! let mut view = Viewport::new(800.0, 600.0);
//!
//! // Zoom in 2x while keeping the data under (100, 100) fixed on screen.
//! let focal = Point::new(100.0, 100.0);
//! let before = view.to_data(focal);
//! view.apply_zoom(focal, 2.0, 2.0);
//! let after = view.to_data(focal);
//! assert!((before - after).hypot() < 1e-9);
//!
//! // Pans are plain screen-space translations.
//! view.apply_pan(10.0, -5.0);
//! assert_eq!(view.state().translate_x, -90.0);
//! ```
//!
//! ## Fitting
//!
//! ```rust
//! use kurbo::Rect;
//! use scatter_view::{FitMode, Viewport};
//!
//! let mut view = Viewport::new(400.0, 200.0);
//! view.fit_data(Rect::new(-1.0, -1.0, 1.0, 1.0), 0.0, FitMode::Stretch);
//! let visible = view.visible_data_rect();
//! assert!((visible.x0 + 1.0).abs() < 1e-9);
//! assert!((visible.y1 - 1.0).abs() < 1e-9);
//! ```
//!
//! This crate is `no_std`.

#![no_std]

mod modes;
mod viewport;

pub use modes::FitMode;
pub use viewport::{DEFAULT_MAX_SCALE, DEFAULT_MIN_SCALE, Viewport, ViewportState};
