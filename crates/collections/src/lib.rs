//! Various collections implemented for the RAFA toolset.
//!
//! Forbid unsafe code in this crate.
#![forbid(unsafe_code)]

mod vecset;

pub use vecset::*;
