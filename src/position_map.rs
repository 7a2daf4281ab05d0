// Copyright (c) Meta Platforms, Inc. and affiliates.
//
// This source code is dual-licensed under either the MIT license found in the
// LICENSE-MIT file in the root directory of this source tree or the Apache
// License, Version 2.0 found in the LICENSE-APACHE file in the root directory
// of this source tree. You may select, at your option, one of the above-listed licenses.

//! The Path ORAM position map: one assigned leaf per logical block address.
//!
//! Invariant: a block that is anywhere in the tree lies on the path from the
//! root to its assigned leaf. The engine refreshes an address's assignment
//! with a fresh uniform leaf at the start of every access, before the old
//! path is read, so the observed path is independent of the new assignment.

use crate::tree_index::CompleteBinaryTreeIndex;
use crate::{Address, OramError, TreeHeight, TreeIndex};
use rand::Rng;

#[derive(Debug)]
pub(crate) struct PositionMap {
    positions: Vec<TreeIndex>,
}

impl PositionMap {
    /// A position map over `block_capacity` addresses, every entry drawn
    /// independently and uniformly from the leaves of a tree of `height`.
    pub fn new<R: Rng>(
        block_capacity: Address,
        height: TreeHeight,
        rng: &mut R,
    ) -> Result<Self, OramError> {
        let mut positions = vec![0; usize::try_from(block_capacity)?];
        for position in positions.iter_mut() {
            *position = TreeIndex::random_leaf(height, rng);
        }
        Ok(Self { positions })
    }

    pub fn read(&self, address: Address) -> Result<TreeIndex, OramError> {
        Ok(self.positions[usize::try_from(address)?])
    }

    pub fn write(&mut self, address: Address, position: TreeIndex) -> Result<(), OramError> {
        self.positions[usize::try_from(address)?] = position;
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn as_slice(&self) -> &[TreeIndex] {
        &self.positions
    }
}
