use std::error::Error;

/// The error type used at the boundaries of the toolset, i.e. for the binaries
/// and for functions that combine I/O with the typed errors of the libraries.
pub type RafaError = Box<dyn Error>;
