#![doc(test(attr(deny(warnings))))]

//! Contains storage layer implementations for [LDP Fusion](https://docs.rs/ldp-fusion/).

pub mod composition;
pub mod memory;
