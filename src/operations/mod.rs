//! Operations module
//!
//! Coordinates the workflow run and external command execution

pub mod commands;
pub mod workflow;

pub use commands::*;
pub use workflow::*;
