//! Git command wrapper for the target repository
//!
//! Shells out to the handful of fixed git commands the workflow needs and
//! hands their output back; no libgit2, no porcelain parsing.

use crate::operations::commands::{CommandOutput, run_program};
use crate::utils::text::title_case;
use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing::info;

/// Wrapper around the git commands run against one repository
pub struct GitRepository {
    path: PathBuf,
}

impl GitRepository {
    /// Create a wrapper for the repository at `path`
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    /// Path of the wrapped repository
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check whether the target folder is inside a git work tree
    pub fn is_repository(&self) -> Result<bool> {
        let output = self.run(&["rev-parse", "--is-inside-work-tree"])?;
        Ok(output.stdout.contains("true"))
    }

    /// Stage every change in the repository
    pub fn add_all(&self) -> Result<()> {
        info!("Adding files to version control");
        self.run(&["add", "."])?;
        Ok(())
    }

    /// Create a commit with the given message, Title-Cased
    pub fn commit(&self, message: &str) -> Result<()> {
        let message = title_case(message);
        info!("Creating a git commit with message: {message}");
        self.run(&["commit", "-m", &message])?;
        Ok(())
    }

    /// Push the current state to the given branch on origin
    pub fn push(&self, branch: &str) -> Result<()> {
        info!("Pushing to origin {branch}");
        self.run(&["push", "origin", branch])?;
        Ok(())
    }

    fn run(&self, args: &[&str]) -> Result<CommandOutput> {
        run_program("git", args, &self.path)
    }
}
