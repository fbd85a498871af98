//! Git operations module
//!
//! Shells out to the fixed git commands the workflow needs

pub mod repository;

pub use repository::*;
