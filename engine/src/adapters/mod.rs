//! Port adapters
//!
//! Concrete implementations of the domain ports. Only filesystem-backed
//! adapters live in the engine; interactive ones belong to the binary that
//! drives it.

pub mod fs;
