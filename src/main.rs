//! # toggl-commit
//!
//! `toggl-commit` is a personal workflow automation tool: it reads the
//! currently running Toggl time entry, runs the configured code-quality
//! checks against a target repository, commits and pushes that repository
//! with the entry description as the message, and optionally stops the
//! tracker.
//!
//! ## Usage
//!
//! **Normal run (reuses the stored configuration):**
//! ```sh
//! toggl-commit
//! ```
//!
//! **Force a new configuration dialog:**
//! ```sh
//! toggl-commit --new-config
//! ```
//!
//! The configuration document lives under the platform config directory
//! (`toggl-commit/configuration.json`) and is collected interactively on
//! the first run. See `toggl-commit --help` for the remaining options.

use anyhow::Result;
use clap::Parser as _;
use toggl_commit::cli::Args;
use toggl_commit::error::CommitError;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt};

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize tracing subscriber based on verbose flag
    let log_level = if args.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    fmt().with_target(false).with_env_filter(filter).init();

    info!("{}", toggl_commit::APP_NAME.to_uppercase());

    match toggl_commit::run(args) {
        Ok(()) => std::process::exit(0),
        Err(err) => {
            error!("{:#}", err);
            std::process::exit(
                err.downcast_ref::<CommitError>()
                    .map_or(1, CommitError::exit_code),
            );
        }
    }
}
