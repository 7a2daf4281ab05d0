// Copyright (c) Meta Platforms, Inc. and affiliates.
//
// This source code is dual-licensed under either the MIT license found in the
// LICENSE-MIT file in the root directory of this source tree or the Apache
// License, Version 2.0 found in the LICENSE-APACHE file in the root directory
// of this source tree. You may select, at your option, one of the above-listed licenses.

//! The Path ORAM stash: blocks held client-side between path reads and
//! path writes, and across accesses when a path could not absorb them all.
//!
//! Keyed by block address. Backed by a `BTreeMap` so that iteration order is
//! deterministic, which keeps whole-engine runs reproducible under a fixed
//! RNG seed.

use crate::{Address, BlockSize, BlockValue};
use std::collections::BTreeMap;

#[derive(Debug, Default)]
pub(crate) struct Stash<const B: BlockSize> {
    blocks: BTreeMap<Address, BlockValue<B>>,
}

impl<const B: BlockSize> Stash<B> {
    pub fn new() -> Self {
        Self {
            blocks: BTreeMap::new(),
        }
    }

    /// Inserts `value` at `address`, replacing any block already stashed there.
    pub fn insert(&mut self, address: Address, value: BlockValue<B>) {
        self.blocks.insert(address, value);
    }

    /// Removes and returns the block stashed at `address`.
    pub fn remove(&mut self, address: Address) -> Option<BlockValue<B>> {
        self.blocks.remove(&address)
    }

    /// The payload stashed at `address`. An address that has never been
    /// written gets an explicit zero-filled block inserted and returned, so
    /// that eviction treats first-touch reads like any other resident block.
    pub fn read_or_zero(&mut self, address: Address) -> BlockValue<B> {
        *self.blocks.entry(address).or_default()
    }

    /// Iterates over the stashed blocks in ascending address order.
    pub fn iter(&self) -> impl Iterator<Item = (&Address, &BlockValue<B>)> {
        self.blocks.iter()
    }

    /// The number of blocks currently stashed.
    pub fn occupancy(&self) -> usize {
        self.blocks.len()
    }

    #[cfg(test)]
    pub(crate) fn contains(&self, address: Address) -> bool {
        self.blocks.contains_key(&address)
    }
}
