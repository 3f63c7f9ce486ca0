// Copyright 2025 the Scatterscope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scatter Index: screen-space point indexing for hit testing and selection.
//!
//! A scatter plot needs three spatial queries at interactive rates:
//! - **Rectangle**: which points fall inside a marquee (or a minimap region)?
//! - **Polygon**: which points fall inside a closed lasso path?
//! - **Nearest**: which point is under the cursor, if any?
//!
//! Points are identified by their position in the caller's ordered sequence.
//! Every query reports indices in that order, and nearest-point ties resolve
//! to the lower index, so results are deterministic.
//!
//! Two backends implement [`SpatialQuery`]:
//! - [`backends::LinearScan`]: a flat vector with linear scans. Small and
//!   obviously correct; useful for tiny sets and as a test oracle.
//! - [`backends::GridIndex`] (feature `backend_grid`, on by default): a
//!   uniform grid keyed on screen-space cells. `O(n)` to build and
//!   cell-bounded per query.
//!
//! Inputs with non-finite coordinates are skipped at build time; they are
//! never reported by a query and do not affect other points.
//!
//! ## Minimal example
//!
//! ```rust
//! # #[cfg(feature = "backend_grid")]
//! # {
//! use kurbo::{Point, Rect};
//! use scatter_index::{SpatialQuery, backends::GridIndex};
//!
//! let screen = [
//!     (Point::new(100.0, 100.0), 3.0),
//!     (Point::new(200.0, 200.0), 3.0),
//!     (Point::new(700.0, 500.0), 3.0),
//! ];
//! let index = GridIndex::build(screen, GridIndex::suggest_cell_size(3.0));
//!
//! assert_eq!(index.query_rect(Rect::new(50.0, 50.0, 250.0, 250.0)), vec![0, 1]);
//! assert_eq!(index.nearest(Point::new(198.0, 201.0), 5.0), Some(1));
//! assert_eq!(index.nearest(Point::new(400.0, 400.0), 5.0), None);
//! # }
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod backend;
pub mod backends;
mod polygon;
mod types;

pub use backend::SpatialQuery;
pub use polygon::{point_in_polygon, polygon_bounds};
pub use types::IndexedPoint;
