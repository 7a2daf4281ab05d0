// Copyright (c) Meta Platforms, Inc. and affiliates.
//
// This source code is dual-licensed under either the MIT license found in the
// LICENSE-MIT file in the root directory of this source tree or the Apache
// License, Version 2.0 found in the LICENSE-APACHE file in the root directory
// of this source tree. You may select, at your option, one of the above-listed licenses.

//! The backing storage for the bucket tree.
//!
//! A flat array of buckets in implicit-heap order, modeling the untrusted
//! memory the ORAM protocol runs against. The engine touches it only
//! through [`BucketTree::read_bucket`] and [`BucketTree::write_bucket`],
//! which count every access per node: that per-node trace is the
//! adversary's entire view of the ORAM, and is what the obliviousness
//! tests and the benchmarks inspect.

use crate::{Address, BlockSize, Bucket, BucketSize, OramError, TreeHeight, TreeIndex};

/// The complete binary tree of buckets, stored flat with the root at node 0
/// and the children of node `i` at `2i + 1` and `2i + 2`.
#[derive(Debug)]
pub struct BucketTree<const B: BlockSize, const Z: BucketSize> {
    buckets: Vec<Bucket<B, Z>>,
    /// `reads[i]` tracks the total number of reads of the bucket at node `i`.
    pub reads: Vec<u64>,
    /// `writes[i]` tracks the total number of writes of the bucket at node `i`.
    pub writes: Vec<u64>,
}

impl<const B: BlockSize, const Z: BucketSize> BucketTree<B, Z> {
    /// An all-vacant tree of `2^(height + 1) - 1` buckets.
    pub(crate) fn new(height: TreeHeight) -> Result<Self, OramError> {
        let bucket_count = usize::try_from((1u64 << (height + 1)) - 1)?;
        Ok(Self {
            buckets: vec![Bucket::default(); bucket_count],
            reads: vec![0; bucket_count],
            writes: vec![0; bucket_count],
        })
    }

    /// The number of buckets in the tree.
    pub fn bucket_count(&self) -> Address {
        self.buckets.len() as Address
    }

    pub(crate) fn read_bucket(&mut self, node: TreeIndex) -> Result<Bucket<B, Z>, OramError> {
        log::debug!("bucket read -- node {}", node);

        let node = usize::try_from(node)?;
        self.reads[node] += 1;
        Ok(self.buckets[node])
    }

    /// Replaces the bucket at `node` wholesale.
    pub(crate) fn write_bucket(
        &mut self,
        node: TreeIndex,
        bucket: Bucket<B, Z>,
    ) -> Result<(), OramError> {
        log::debug!("bucket write -- node {}", node);

        let node = usize::try_from(node)?;
        self.writes[node] += 1;
        self.buckets[node] = bucket;
        Ok(())
    }

    /// The total number of bucket reads across all nodes.
    pub fn get_read_count(&self) -> u64 {
        self.reads.iter().sum()
    }

    /// The total number of bucket writes across all nodes.
    pub fn get_write_count(&self) -> u64 {
        self.writes.iter().sum()
    }

    #[cfg(test)]
    pub(crate) fn contents(&self) -> &[Bucket<B, Z>] {
        &self.buckets
    }
}
