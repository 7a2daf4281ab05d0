// Copyright (c) Meta Platforms, Inc. and affiliates.
//
// This source code is dual-licensed under either the MIT license found in the
// LICENSE-MIT file in the root directory of this source tree or the Apache
// License, Version 2.0 found in the LICENSE-APACHE file in the root directory
// of this source tree. You may select, at your option, one of the above-listed licenses.

//! A smoke-test driver: populate an ORAM with randomly addressed random
//! blocks, read everything back, and report success and failure counts.

use path_oram::{Address, BlockValue, ConcretePathOram, OramError, TreeHeight};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::collections::HashMap;

const HEIGHT: TreeHeight = 12;
const BLOCK_SIZE: usize = 16;

fn main() -> Result<(), OramError> {
    let mut oram = ConcretePathOram::<BLOCK_SIZE>::new(HEIGHT)?;

    println!("Height: {}", oram.height());
    println!("Bucket Count: {}", oram.bucket_count());
    println!();

    let mut rng = StdRng::from_entropy();
    let capacity = oram.block_capacity();

    // Addresses are drawn with replacement, so collisions shrink the
    // distinct set below the capacity.
    println!("Generating inputs");
    let mut inputs: HashMap<Address, BlockValue<BLOCK_SIZE>> = HashMap::new();
    for _ in 0..capacity {
        inputs.insert(rng.gen_range(0..capacity), rng.gen());
    }

    println!("Writing {} distinct blocks", inputs.len());
    for (&address, &value) in &inputs {
        oram.write(address, value)?;
    }

    println!("Reading data");
    let mut successes = 0u64;
    let mut failures = 0u64;
    for (&address, &value) in &inputs {
        if oram.read(address)? == value {
            successes += 1;
        } else {
            failures += 1;
        }
    }

    println!("Successful tests: {successes}");
    println!("Failed tests: {failures}");

    Ok(())
}
