//! Toggl Track API module
//!
//! Blocking client for reading and stopping the running time entry

pub mod client;

pub use client::*;
