//!
//! Command line flags that are shared by all tools, such as the verbosity
//! and the version.
//!

#![forbid(unsafe_code)]

pub mod verbosity;
mod version;

pub use verbosity::VerbosityFlag;
pub use version::*;
