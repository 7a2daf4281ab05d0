// Copyright (c) Meta Platforms, Inc. and affiliates.
//
// This source code is dual-licensed under either the MIT license found in the
// LICENSE-MIT file in the root directory of this source tree or the Apache
// License, Version 2.0 found in the LICENSE-APACHE file in the root directory
// of this source tree. You may select, at your option, one of the above-listed licenses.

//! The Path ORAM engine.
//!
//! Each access reads one root-to-leaf path of buckets into the client-side
//! stash, remaps the accessed block to a fresh uniformly random leaf,
//! performs the logical read or write against the stash, and then packs
//! stash blocks back into the same path, deepest eligible bucket first. The
//! bucket array only ever sees whole-path reads and whole-path writes at
//! uniformly random leaves, independent of the addresses being accessed.

use crate::bucket::VACANT_ADDRESS;
use crate::position_map::PositionMap;
use crate::stash::Stash;
use crate::tree::BucketTree;
use crate::tree_index::CompleteBinaryTreeIndex;
use crate::{
    Address, BlockSize, BlockValue, Bucket, BucketSize, OramError, Slot, TreeHeight, TreeIndex,
};
use rand::{rngs::StdRng, Rng, SeedableRng};

/// The parameter "Z" from the Path ORAM literature that sets the number of
/// blocks per bucket; typical values are 3 or 4. Here we adopt the more
/// conservative setting of 4.
pub const DEFAULT_BLOCKS_PER_BUCKET: BucketSize = 4;

/// The largest supported tree height.
pub const MAXIMUM_TREE_HEIGHT: TreeHeight = 32;

/// A backstop on stash occupancy. The stash is unbounded in the interface
/// and its occupancy can never exceed the block capacity, but growth
/// anywhere near this limit means the parameters (or the RNG) cannot
/// sustain the workload, and continuing would quietly degrade the tree
/// packing invariants. Exceeding the limit aborts.
pub const STASH_SAFETY_LIMIT: usize = 1 << 20;

/// The two logical operations an ORAM access can perform. Both produce the
/// identical physical bucket access sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    /// Yield the payload currently stored at the address.
    Read,
    /// Replace the payload stored at the address.
    Write,
}

/// A Path ORAM storing `Z` blocks of `B` bytes per bucket, with a
/// client-side position map and stash.
///
/// The tree shape is fixed at construction by a height `L`: the engine
/// addresses `N = Z * (2^(L+1) - 1)` logical blocks. Reads of an address
/// that has never been written return a zero-filled block.
#[derive(Debug)]
pub struct PathOram<const B: BlockSize, const Z: BucketSize = DEFAULT_BLOCKS_PER_BUCKET, R = StdRng>
{
    /// The bucket tree in implicit-heap order, behind instrumented storage.
    /// Public so that tests and benchmarks can observe the physical access
    /// trace; clients should only use the access methods.
    pub physical_memory: BucketTree<B, Z>,
    stash: Stash<B>,
    position_map: PositionMap,
    height: TreeHeight,
    rng: R,
}

/// A `PathOram` with the default bucket size and a standard seedable RNG.
pub type ConcretePathOram<const B: BlockSize> = PathOram<B, DEFAULT_BLOCKS_PER_BUCKET, StdRng>;

impl<const B: BlockSize, const Z: BucketSize> PathOram<B, Z, StdRng> {
    /// An engine of the given height, seeded from system entropy.
    pub fn new(height: TreeHeight) -> Result<Self, OramError> {
        Self::with_rng(height, StdRng::from_entropy())
    }

    /// An engine of the given height with a deterministic RNG seed. Two
    /// engines built from the same seed produce identical physical access
    /// traces for identical operation sequences.
    pub fn with_seed(height: TreeHeight, seed: u64) -> Result<Self, OramError> {
        Self::with_rng(height, StdRng::seed_from_u64(seed))
    }
}

impl<const B: BlockSize, const Z: BucketSize, R: Rng> PathOram<B, Z, R> {
    /// An engine of the given height drawing leaves from `rng`.
    pub fn with_rng(height: TreeHeight, mut rng: R) -> Result<Self, OramError> {
        if Z == 0 {
            return Err(OramError::InvalidConfigurationError {
                parameter_name: "bucket size Z".to_string(),
                parameter_value: Z.to_string(),
            });
        }
        if height > MAXIMUM_TREE_HEIGHT {
            return Err(OramError::InvalidConfigurationError {
                parameter_name: "tree height".to_string(),
                parameter_value: height.to_string(),
            });
        }

        log::info!(
            "PathOram::new(height = {}, block_size = {}, bucket_size = {})",
            height,
            B,
            Z
        );

        let physical_memory = BucketTree::new(height)?;
        let block_capacity = (Z as Address) * physical_memory.bucket_count();
        let position_map = PositionMap::new(block_capacity, height, &mut rng)?;

        Ok(Self {
            physical_memory,
            stash: Stash::new(),
            position_map,
            height,
            rng,
        })
    }

    /// The height `L` of the bucket tree; leaves are at level `L`.
    pub fn height(&self) -> TreeHeight {
        self.height
    }

    /// The size in bytes of each block.
    pub fn block_size(&self) -> BlockSize {
        B
    }

    /// The number of block slots in each bucket.
    pub fn bucket_size(&self) -> BucketSize {
        Z
    }

    /// The number of buckets in the tree.
    pub fn bucket_count(&self) -> Address {
        self.physical_memory.bucket_count()
    }

    /// The number of leaves of the tree.
    pub fn leaf_count(&self) -> Address {
        1 << self.height
    }

    /// The number of addressable logical blocks, `N`.
    pub fn block_capacity(&self) -> Address {
        (Z as Address) * self.bucket_count()
    }

    /// Obliviously reads the block stored at `address`. An address that has
    /// never been written reads as a zero-filled block.
    pub fn read(&mut self, address: Address) -> Result<BlockValue<B>, OramError> {
        let mut value = BlockValue::default();
        self.access(Operation::Read, address, &mut value)?;
        Ok(value)
    }

    /// Obliviously writes `value` to the block at `address`.
    pub fn write(&mut self, address: Address, value: BlockValue<B>) -> Result<(), OramError> {
        let mut value = value;
        self.access(Operation::Write, address, &mut value)
    }

    /// Performs one oblivious access: on [`Operation::Read`], `value` is
    /// overwritten with the stored block; on [`Operation::Write`], `value`
    /// is stored. Reads and writes are physically indistinguishable.
    pub fn access(
        &mut self,
        operation: Operation,
        address: Address,
        value: &mut BlockValue<B>,
    ) -> Result<(), OramError> {
        // Not constant-time, but leaks only whether the address is well-formed.
        let capacity = self.block_capacity();
        if address >= capacity {
            return Err(OramError::AddressOutOfBoundsError { address, capacity });
        }

        // Remap before reading: the path observed below must be independent
        // of the block's fresh assignment.
        let path = self.position_map.read(address)?;
        let new_position = TreeIndex::random_leaf(self.height, &mut self.rng);
        self.position_map.write(address, new_position)?;

        self.read_path(path)?;

        match operation {
            Operation::Read => *value = self.stash.read_or_zero(address),
            Operation::Write => self.stash.insert(address, *value),
        }

        self.write_path(path)?;

        assert!(
            self.stash.occupancy() <= STASH_SAFETY_LIMIT,
            "stash occupancy {} exceeds the safety limit",
            self.stash.occupancy()
        );

        Ok(())
    }

    /// Reads every bucket on the path to `path`, root first, moving all
    /// resident blocks into the stash.
    fn read_path(&mut self, path: TreeIndex) -> Result<(), OramError> {
        for level in 0..=self.height {
            let node = path.node_on_path(level, self.height);
            let bucket = self.physical_memory.read_bucket(node)?;
            for slot in bucket.slots {
                if !slot.is_vacant() {
                    self.stash.insert(slot.address, slot.value);
                }
            }
        }
        Ok(())
    }

    /// Rebuilds and writes every bucket on the path to `path`, leaf first.
    ///
    /// A single pass over the stash assigns each block to the deepest bucket
    /// that lies both on the written path and on the path to the block's own
    /// assigned leaf and still has a free slot. Eligibility at a level
    /// implies eligibility at every level above it, so blocks that find all
    /// their buckets full stay in the stash.
    fn write_path(&mut self, path: TreeIndex) -> Result<(), OramError> {
        let levels = usize::try_from(self.height)? + 1;

        let mut chosen = vec![[VACANT_ADDRESS; Z]; levels];
        let mut chosen_counts = vec![0usize; levels];

        for (&address, _) in self.stash.iter() {
            let assigned_leaf = self.position_map.read(address)?;
            let deepest = path.common_ancestor_level(assigned_leaf, self.height);
            let mut level = usize::try_from(deepest)?;
            loop {
                if chosen_counts[level] < Z {
                    chosen[level][chosen_counts[level]] = address;
                    chosen_counts[level] += 1;
                    break;
                }
                if level == 0 {
                    break;
                }
                level -= 1;
            }
        }

        for level in (0..levels).rev() {
            let mut bucket = Bucket::<B, Z>::default();
            for (slot, &address) in bucket
                .slots
                .iter_mut()
                .zip(&chosen[level][..chosen_counts[level]])
            {
                let value = self
                    .stash
                    .remove(address)
                    .expect("selected block must be in the stash");
                *slot = Slot::occupied(address, value);
            }

            let node = path.node_on_path(TreeHeight::try_from(level)?, self.height);
            self.physical_memory.write_bucket(node, bucket)?;
        }

        Ok(())
    }
}
