// Copyright 2025 the Scatterscope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// How [`crate::Viewport::fit_data`] maps a data extent onto the screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum FitMode {
    /// Scale each axis independently so the extent fills the whole viewport.
    ///
    /// This is the natural choice when the axes carry unrelated units.
    #[default]
    Stretch,
    /// Use the same scale on both axes and center the extent.
    ///
    /// The smaller of the two per-axis scales is used, so the whole extent
    /// stays visible and distances are comparable across axes.
    PreserveAspect,
}
