// Copyright 2025 the Scatterscope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scatter Chart: a headless, interactive scatter plot.
//!
//! This crate ties the Scatterscope building blocks together:
//! - [`scatter_view::Viewport`] for the data-to-screen transform,
//! - [`scatter_index::backends::GridIndex`] for hit-testing and range queries,
//! - [`scatter_selection::SelectionEngine`] for marquee and lasso gestures,
//!
//! and adds the pieces that only make sense for a whole chart:
//! - [`ZoomPanController`]: wheel, pinch and drag-pan input.
//! - [`MiniMap`]: a fixed-scale overview with a click-to-recenter affordance.
//! - [`HoverTracker`]: the point under the cursor, for tooltips.
//! - [`compose`]: a pure function from chart state to a [`DrawList`].
//! - [`FrameScheduler`]: coalesces any number of events into one redraw.
//! - [`ScatterChart`]: owns all of the above and routes [`ChartEvent`]s.
//!
//! Nothing here draws. Hosts translate the [`DrawList`] into calls on their
//! own 2D API, and receive selection and click notifications through
//! callbacks carrying the original [`DataPoint`]s, metadata included.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Vec2};
//! use scatter_chart::{ChartConfig, ChartEvent, DataPoint, ScatterChart, ZoomAxis};
//! use scatter_selection::SelectionShape;
//!
//! let config = ChartConfig::default().with_selection_shape(SelectionShape::Rectangle);
//! let mut chart = ScatterChart::new(config, 800.0, 600.0);
//! chart.set_points(vec![
//!     DataPoint::new(100.0, 100.0, "A"),
//!     DataPoint::new(200.0, 200.0, "B"),
//!     DataPoint::new(700.0, 500.0, "C"),
//! ]);
//!
//! // Drag a marquee around A and B.
//! let a = chart.viewport().to_screen(Point::new(100.0, 100.0));
//! let b = chart.viewport().to_screen(Point::new(200.0, 200.0));
//! chart.handle_event(ChartEvent::PointerDown { pointer: 1, pos: a - Vec2::new(20.0, 20.0), extend: false });
//! chart.handle_event(ChartEvent::PointerMove { pointer: 1, pos: b });
//! chart.handle_event(ChartEvent::PointerUp { pointer: 1, pos: b + Vec2::new(20.0, 20.0) });
//!
//! let names: Vec<_> = chart.selected_points().iter().map(|p| p.metadata).collect();
//! assert_eq!(names, ["A", "B"]);
//!
//! // Scroll up to zoom in; the host redraws once per frame.
//! chart.handle_event(ChartEvent::Wheel { pos: a, delta_y: -1.0, axis: ZoomAxis::Both });
//! if !chart.take_frame().is_empty() {
//!     let list = chart.draw_list();
//!     assert!(list.points.iter().any(|p| p.selected));
//! }
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod chart;
mod config;
mod controller;
mod frame;
mod minimap;
mod point;
mod render;
mod tooltip;

pub use chart::{ChartEvent, ScatterChart};
pub use config::{
    AxisLabels, ChartConfig, ConfigError, DEFAULT_FIT_PADDING, DEFAULT_MINIMAP_MARGIN,
    DEFAULT_MINIMAP_SIZE, DEFAULT_POINT_RADIUS, DEFAULT_WHEEL_STEP, MiniMapConfig,
    MiniMapPosition, ZoomScale,
};
pub use controller::{ZoomAxis, ZoomPanController};
pub use frame::{Dirty, FrameScheduler};
pub use minimap::MiniMap;
pub use point::{DataPoint, data_extent, parse_color};
pub use render::{
    AxisPrimitives, DIMMED_OPACITY, DrawList, MiniMapPrimitives, OverviewPoint, PointPrimitive,
    RenderInput, SELECTED_RADIUS_BOOST, Tick, TooltipPrimitive, compose,
};
pub use tooltip::{HoverChange, HoverTracker, tooltip_anchor};
