// Copyright 2025 the Scatterscope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Redraw coalescing.

bitflags::bitflags! {
    /// Parts of the chart that changed since the last frame.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct Dirty: u8 {
        /// Scale or translation changed.
        const VIEWPORT  = 0b0000_0001;
        /// The selected set changed.
        const SELECTION = 0b0000_0010;
        /// The hovered point changed.
        const HOVER     = 0b0000_0100;
        /// The point sequence was replaced.
        const POINTS    = 0b0000_1000;
        /// The in-progress selection outline changed.
        const OUTLINE   = 0b0001_0000;
    }
}

/// Accumulates [`Dirty`] bits between animation frames.
///
/// Any number of events before a frame boundary collapse into one
/// [`FrameScheduler::take_frame`] result.
#[derive(Clone, Copy, Debug, Default)]
pub struct FrameScheduler {
    pending: Dirty,
}

impl FrameScheduler {
    /// Records changes.
    pub fn mark(&mut self, dirty: Dirty) {
        self.pending |= dirty;
    }

    /// Changes recorded since the last frame.
    #[must_use]
    pub fn pending(&self) -> Dirty {
        self.pending
    }

    /// Returns `true` if a redraw is due.
    #[must_use]
    pub fn needs_frame(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Hands out the accumulated changes and starts a new frame.
    pub fn take_frame(&mut self) -> Dirty {
        core::mem::take(&mut self.pending)
    }
}
