//! `toggl-commit` - A CLI tool that commits your work under the name of the
//! running Toggl time entry
//!
//! This library reads the currently running Toggl time entry, optionally
//! runs code-quality tooling against a target repository, then stages,
//! commits and pushes that repository using the entry description as the
//! commit message, and optionally stops the tracker.
//!
//! The configuration driving all of this is produced by a schema-driven
//! materializer: a static schema graph is walked recursively and each
//! field is either adopted from the persisted JSON document or collected
//! interactively with per-type validation, then persisted for the next
//! run.

pub mod cli;
pub mod config;
pub mod error;
pub mod git;
pub mod operations;
pub mod quality;
pub mod system;
pub mod toggl;
pub mod utils;

use anyhow::Result;
use cli::Args;
use operations::workflow::WorkflowOperation;
use system::RealSystem;

/// Application display name used for the startup banner
pub const APP_NAME: &str = "Python, Git & Toggl Tracker Utility";

/// Main entry point for the toggl-commit library
pub fn run(args: Args) -> Result<()> {
    let system = RealSystem;
    let workflow = WorkflowOperation::new(&args, &system)?;
    workflow.execute()
}
