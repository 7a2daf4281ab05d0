// Copyright (c) Meta Platforms, Inc. and affiliates.
//
// This source code is dual-licensed under either the MIT license found in the
// LICENSE-MIT file in the root directory of this source tree or the Apache
// License, Version 2.0 found in the LICENSE-APACHE file in the root directory
// of this source tree. You may select, at your option, one of the above-listed licenses.

//! Common test utilities: correctness workloads run against a mirror array,
//! and macros generating test matrices over block size, bucket size, and
//! tree height.

use crate::{Address, BlockSize, BlockValue, BucketSize, PathOram, TreeHeight};
use rand::{rngs::StdRng, Rng, SeedableRng};

pub(crate) fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Runs random reads and writes against an engine and a mirror array, then
/// checks every address.
pub(crate) fn test_correctness_random_workload<const B: BlockSize, const Z: BucketSize>(
    height: TreeHeight,
    num_operations: u32,
) {
    init_logger();

    let mut rng = StdRng::seed_from_u64(0);
    let mut oram = PathOram::<B, Z, StdRng>::with_seed(height, 1).unwrap();
    let capacity = usize::try_from(oram.block_capacity()).unwrap();
    let mut mirror_array = vec![BlockValue::<B>::default(); capacity];

    for _ in 0..num_operations {
        let random_address = rng.gen_range(0..capacity);
        let random_block_value = rng.gen::<BlockValue<B>>();
        let read_versus_write = rng.gen::<bool>();

        if read_versus_write {
            assert_eq!(
                oram.read(random_address as Address).unwrap(),
                mirror_array[random_address]
            );
        } else {
            oram.write(random_address as Address, random_block_value)
                .unwrap();
            mirror_array[random_address] = random_block_value;
        }
    }

    for address in 0..capacity {
        assert_eq!(
            oram.read(address as Address).unwrap(),
            mirror_array[address],
            "{address}"
        );
    }
}

/// Runs `num_passes` sequential passes of randomized reads and writes over
/// the whole address space against a mirror array, then checks every address.
pub(crate) fn test_correctness_linear_workload<const B: BlockSize, const Z: BucketSize>(
    height: TreeHeight,
    num_passes: u32,
) {
    init_logger();

    let mut rng = StdRng::seed_from_u64(0);
    let mut oram = PathOram::<B, Z, StdRng>::with_seed(height, 1).unwrap();
    let capacity = usize::try_from(oram.block_capacity()).unwrap();
    let mut mirror_array = vec![BlockValue::<B>::default(); capacity];

    for _ in 0..num_passes {
        for address in 0..capacity {
            let random_block_value = rng.gen::<BlockValue<B>>();
            let read_versus_write = rng.gen::<bool>();

            if read_versus_write {
                assert_eq!(oram.read(address as Address).unwrap(), mirror_array[address]);
            } else {
                oram.write(address as Address, random_block_value).unwrap();
                mirror_array[address] = random_block_value;
            }
        }
    }

    for address in 0..capacity {
        assert_eq!(
            oram.read(address as Address).unwrap(),
            mirror_array[address],
            "{address}"
        );
    }
}

macro_rules! create_correctness_test {
    ($function_name:ident, $block_size:expr, $height:expr, $iterations_to_test:expr) => {
        paste::paste! {
            #[test]
            fn [<$function_name _ $block_size _ $height _ $iterations_to_test>]() {
                $function_name::<$block_size, { crate::DEFAULT_BLOCKS_PER_BUCKET }>(
                    $height,
                    $iterations_to_test,
                );
            }
        }
    };
}

macro_rules! create_correctness_test_with_bucket_size {
    ($function_name:ident, $block_size:expr, $bucket_size:expr, $height:expr,
     $iterations_to_test:expr) => {
        paste::paste! {
            #[test]
            fn [<$function_name _ $block_size _z $bucket_size _ $height _ $iterations_to_test>]() {
                $function_name::<$block_size, $bucket_size>($height, $iterations_to_test);
            }
        }
    };
}

pub(crate) use create_correctness_test;
pub(crate) use create_correctness_test_with_bucket_size;
