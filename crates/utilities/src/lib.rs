//! Utility types and functions for the RAFA toolset.
//!
//! Forbid unsafe code in this crate.
#![forbid(unsafe_code)]

mod error;
mod test_logger;

pub use error::*;
pub use random_test::*;
pub use test_logger::*;
