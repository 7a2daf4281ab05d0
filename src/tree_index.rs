// Copyright (c) Meta Platforms, Inc. and affiliates.
//
// This source code is dual-licensed under either the MIT license found in the
// LICENSE-MIT file in the root directory of this source tree or the Apache
// License, Version 2.0 found in the LICENSE-APACHE file in the root directory
// of this source tree. You may select, at your option, one of the above-listed licenses.

//! Path indexing for the complete binary tree of buckets.
//!
//! The tree is stored as a flat array in implicit-heap order: the root is at
//! index 0 and the children of node `i` are at `2i + 1` and `2i + 2`. Leaves
//! are identified separately by their in-level ordering `0..2^height`.

use crate::{TreeHeight, TreeIndex};
use rand::Rng;

pub(crate) trait CompleteBinaryTreeIndex {
    /// The heap index of the ancestor at `level` of the path from the root to
    /// leaf `self`, in a tree of the given `height`.
    fn node_on_path(&self, level: TreeHeight, height: TreeHeight) -> Self;
    /// The deepest level at which the paths to leaves `self` and `other` pass
    /// through the same bucket. Level 0 (the root) is always shared.
    fn common_ancestor_level(&self, other: Self, height: TreeHeight) -> TreeHeight;
    /// A leaf index drawn uniformly from `0..2^height`.
    fn random_leaf<R: Rng>(height: TreeHeight, rng: &mut R) -> Self;
}

impl CompleteBinaryTreeIndex for TreeIndex {
    fn node_on_path(&self, level: TreeHeight, height: TreeHeight) -> Self {
        debug_assert!(level <= height);
        debug_assert!(*self < (1 << height));
        // The ancestor at `level` heads the subtree of the leaf's top `level`
        // bits; heap indices at `level` start at 2^level - 1.
        (self >> (height - level)) + ((1 << level) - 1)
    }

    fn common_ancestor_level(&self, other: Self, height: TreeHeight) -> TreeHeight {
        debug_assert!(*self < (1 << height));
        debug_assert!(other < (1 << height));
        let differing = self ^ other;
        height - (TreeIndex::BITS - differing.leading_zeros())
    }

    fn random_leaf<R: Rng>(height: TreeHeight, rng: &mut R) -> Self {
        rng.gen_range(0..(1 << height))
    }
}
