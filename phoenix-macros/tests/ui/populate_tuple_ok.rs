#![allow(missing_docs)]

use phoenix_di::Populate;

pub struct Clock;

#[derive(Populate)]
pub struct Handler(pub Option<Clock>, u32);

#[derive(Populate)]
pub struct Marker;

fn main() {
    assert_eq!(Handler::fields().len(), 1);
    assert!(Marker::fields().is_empty());
}
