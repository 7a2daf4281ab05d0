// Copyright (c) Meta Platforms, Inc. and affiliates.
//
// This source code is dual-licensed under either the MIT license found in the
// LICENSE-MIT file in the root directory of this source tree or the Apache
// License, Version 2.0 found in the LICENSE-APACHE file in the root directory
// of this source tree. You may select, at your option, one of the above-listed licenses.

//! Implements a generic ORAM payload `BlockValue` consisting of unstructured bytes.

use crate::BlockSize;
use aligned::{Aligned, A64};
use rand::{
    distributions::{Distribution, Standard},
    Rng,
};

/// The smallest unit of memory readable and writable by the ORAM:
/// a fixed-size payload of `B` unstructured bytes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BlockValue<const B: BlockSize>(Aligned<A64, [u8; B]>);

impl<const B: BlockSize> BlockValue<B> {
    /// Instantiates a `BlockValue` from an array of `B` bytes.
    pub fn new(data: [u8; B]) -> Self {
        Self(Aligned(data))
    }

    /// Returns the length in bytes of this `BlockValue`.
    pub fn byte_length(&self) -> BlockSize {
        B
    }
}

impl<const B: BlockSize> From<BlockValue<B>> for [u8; B] {
    fn from(value: BlockValue<B>) -> Self {
        *value.0
    }
}

impl<const B: BlockSize> Default for BlockValue<B> {
    fn default() -> Self {
        BlockValue::<B>(Aligned([0u8; B]))
    }
}

impl<const B: BlockSize> Distribution<BlockValue<B>> for Standard {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> BlockValue<B> {
        let mut result = BlockValue::default();
        for i in 0..B {
            result.0[i] = rng.gen();
        }
        result
    }
}
