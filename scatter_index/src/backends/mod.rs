// Copyright 2025 the Scatterscope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Index backends.
//!
//! - `linear`: flat vector with linear scans; tiny sets and test oracle.
//! - `grid`: uniform screen-space grid, the default for interactive use.

#[cfg(feature = "backend_grid")]
mod grid;
mod linear;

#[cfg(feature = "backend_grid")]
pub use grid::GridIndex;
pub use linear::LinearScan;
