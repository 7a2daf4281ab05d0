// Copyright (c) Meta Platforms, Inc. and affiliates.
//
// This source code is dual-licensed under either the MIT license found in the
// LICENSE-MIT file in the root directory of this source tree or the Apache
// License, Version 2.0 found in the LICENSE-APACHE file in the root directory
// of this source tree. You may select, at your option, one of the above-listed licenses.

//! An interactive ORAM session: read and write u64 values from a prompt.

use path_oram::{Address, BlockValue, ConcretePathOram, TreeHeight};
use rustyline::history::FileHistory;
use rustyline::Editor;

const HEIGHT: TreeHeight = 4;
const USAGE: &str = "commands: r <address> | w <address> <value> | q";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut rl: Editor<(), FileHistory> = Editor::new()?;
    let mut oram = ConcretePathOram::<8>::new(HEIGHT)?;

    println!(
        "Oblivious RAM session: {} u64 slots in a tree of height {}.",
        oram.block_capacity(),
        oram.height()
    );
    println!("{USAGE}");

    loop {
        let line = rl.readline("oram> ")?;
        let mut words = line.split_whitespace();

        match (words.next(), words.next(), words.next()) {
            (Some("q"), None, None) => break,
            (Some("r"), Some(address), None) => match address.parse::<Address>() {
                Ok(address) => match oram.read(address) {
                    Ok(value) => println!("{}", u64::from_le_bytes(value.into())),
                    Err(error) => println!("{error}"),
                },
                Err(_) => println!("addresses are unsigned integers"),
            },
            (Some("w"), Some(address), Some(value)) => {
                match (address.parse::<Address>(), value.parse::<u64>()) {
                    (Ok(address), Ok(value)) => {
                        match oram.write(address, BlockValue::new(value.to_le_bytes())) {
                            Ok(()) => println!("wrote {value} to address {address}"),
                            Err(error) => println!("{error}"),
                        }
                    }
                    _ => println!("addresses and values are unsigned integers"),
                }
            }
            _ => println!("{USAGE}"),
        }
    }

    Ok(())
}
