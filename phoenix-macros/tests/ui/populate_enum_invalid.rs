#![allow(missing_docs, dead_code)]

use phoenix_di::Populate;

#[derive(Populate)]
enum Mode {
    Debug,
    Release,
}

fn main() {}
