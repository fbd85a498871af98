//! Code-quality module
//!
//! Runs the configured external lint/test/format tooling

pub mod routine;

pub use routine::*;
