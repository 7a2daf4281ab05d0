// Copyright (c) Meta Platforms, Inc. and affiliates.
//
// This source code is dual-licensed under either the MIT license found in the
// LICENSE-MIT file in the root directory of this source tree or the Apache
// License, Version 2.0 found in the LICENSE-APACHE file in the root directory
// of this source tree. You may select, at your option, one of the above-listed licenses.

//! An implementation of Path ORAM: an in-memory, key-addressed block store
//! whose physical access pattern is statistically independent of the logical
//! addresses being read or written.
//!
//! The engine stores fixed-size blocks in a complete binary tree of buckets.
//! Each access reads one root-to-leaf path into a client-side stash, remaps
//! the touched block to a fresh random leaf, and greedily writes the path
//! back. An observer of the bucket array sees only uniformly random paths.
//!
//! ```
//! use path_oram::{BlockValue, ConcretePathOram, OramError};
//!
//! # fn main() -> Result<(), OramError> {
//! let mut oram = ConcretePathOram::<4>::with_seed(4, 0)?;
//! oram.write(7, BlockValue::new([1, 2, 3, 4]))?;
//! assert_eq!(<[u8; 4]>::from(oram.read(7)?), [1, 2, 3, 4]);
//! # Ok(())
//! # }
//! ```

#![warn(clippy::cargo, clippy::doc_markdown, missing_docs, rustdoc::all)]

use std::num::TryFromIntError;
use thiserror::Error;

/// The numeric type used for logical block addresses and physical bucket indices.
pub type Address = u64;
/// The numeric type used to specify the size of each block of the ORAM in bytes.
pub type BlockSize = usize;
/// The numeric type used to specify the number of blocks in each bucket.
pub type BucketSize = usize;
/// The numeric type used for tree levels; the root is at level 0.
pub type TreeHeight = u32;

/// A leaf or node index of the bucket tree. Leaves are numbered `0..2^height`;
/// node indices follow the implicit-heap layout with the root at index 0.
pub(crate) type TreeIndex = u64;

/// The error type returned by fallible ORAM operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OramError {
    /// A logical block address at or beyond the engine's block capacity.
    #[error("block address {address} exceeds ORAM capacity of {capacity} blocks")]
    AddressOutOfBoundsError {
        /// The offending address.
        address: Address,
        /// The engine's capacity in blocks.
        capacity: Address,
    },
    /// Structural parameters that do not describe a valid bucket tree.
    #[error("invalid ORAM configuration: {parameter_name} = {parameter_value}")]
    InvalidConfigurationError {
        /// The name of the offending parameter.
        parameter_name: String,
        /// Its rejected value.
        parameter_value: String,
    },
    /// An address or size did not fit the platform word size.
    #[error("integer conversion error during an ORAM operation")]
    IntegerConversionError(#[from] TryFromIntError),
}

pub mod path_oram;

mod block_value;
mod bucket;
mod position_map;
mod stash;
mod tree;
mod tree_index;

#[cfg(test)]
mod test_utils;

pub use block_value::BlockValue;
pub use bucket::{Bucket, Slot};
pub use path_oram::{
    ConcretePathOram, Operation, PathOram, DEFAULT_BLOCKS_PER_BUCKET, MAXIMUM_TREE_HEIGHT,
    STASH_SAFETY_LIMIT,
};
pub use tree::BucketTree;
