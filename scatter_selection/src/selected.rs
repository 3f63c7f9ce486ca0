// Copyright 2025 the Scatterscope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bookkeeping for the set of selected point indices.

use alloc::vec::Vec;

/// The set of selected point indices plus a revision counter.
///
/// Indices are kept sorted and unique, which is also the original sequence
/// order of the points they refer to. Membership tests are binary searches.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectedSet {
    indices: Vec<usize>,
    revision: u64,
}

impl SelectedSet {
    /// Creates an empty selection.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            indices: Vec::new(),
            revision: 0,
        }
    }

    /// Returns `true` if nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Returns the number of selected indices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Returns the selected indices in ascending order.
    #[must_use]
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Returns an iterator over the selected indices in ascending order.
    pub fn iter(&self) -> core::iter::Copied<core::slice::Iter<'_, usize>> {
        self.indices.iter().copied()
    }

    /// Returns `true` if `index` is selected.
    #[must_use]
    pub fn contains(&self, index: usize) -> bool {
        self.indices.binary_search(&index).is_ok()
    }

    /// Returns the current revision counter.
    ///
    /// The revision is bumped only when the contents change; no-op calls
    /// (for example replacing the selection with identical contents) leave
    /// it unchanged. Observers can compare revisions instead of contents.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Removes everything. Returns `true` if the selection changed.
    pub fn clear(&mut self) -> bool {
        if self.indices.is_empty() {
            return false;
        }
        self.indices.clear();
        self.bump_revision();
        true
    }

    /// Replaces the selection with `indices`.
    ///
    /// Input order and duplicates do not matter. Returns `true` if the
    /// selection changed.
    pub fn replace_with<I>(&mut self, indices: I) -> bool
    where
        I: IntoIterator<Item = usize>,
    {
        let mut new_indices: Vec<usize> = indices.into_iter().collect();
        new_indices.sort_unstable();
        new_indices.dedup();
        if new_indices == self.indices {
            return false;
        }
        self.indices = new_indices;
        self.bump_revision();
        true
    }

    /// Adds `indices` to the selection.
    ///
    /// Returns `true` if at least one new index was added.
    pub fn extend_with<I>(&mut self, indices: I) -> bool
    where
        I: IntoIterator<Item = usize>,
    {
        let before = self.indices.len();
        self.indices.extend(indices);
        self.indices.sort_unstable();
        self.indices.dedup();
        if self.indices.len() == before {
            return false;
        }
        self.bump_revision();
        true
    }

    fn bump_revision(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}
