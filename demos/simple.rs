// Copyright (c) Meta Platforms, Inc. and affiliates.
//
// This source code is dual-licensed under either the MIT license found in the
// LICENSE-MIT file in the root directory of this source tree or the Apache
// License, Version 2.0 found in the LICENSE-APACHE file in the root directory
// of this source tree. You may select, at your option, one of the above-listed licenses.

//! A very simple demonstration of the use of ORAM.

use path_oram::{BlockValue, ConcretePathOram, OramError};

fn main() -> Result<(), OramError> {
    let mut oram = ConcretePathOram::<8>::new(4)?;
    oram.write(0, BlockValue::new(1u64.to_le_bytes()))?;
    println!("{}", u64::from_le_bytes(oram.read(0)?.into()));
    Ok(())
}
