//! Workflow coordination
//!
//! Glues the pieces together for one run: obtain the configuration, check
//! the target repository, fetch the running time entry, run the quality
//! routine, then apply the gated git steps and optionally stop the
//! tracker.

use crate::cli::Args;
use crate::config::{Config, ConfigManager};
use crate::error::CommitError;
use crate::git::GitRepository;
use crate::quality::QualityRoutine;
use crate::system::System;
use crate::toggl::TogglClient;
use anyhow::Result;
use tracing::info;

/// Coordinates one end-to-end run of the utility
#[non_exhaustive]
pub struct WorkflowOperation<'src> {
    config: Config,
    branch: String,
    system: &'src dyn System,
}

impl<'src> WorkflowOperation<'src> {
    /// Create a new workflow from CLI arguments
    ///
    /// Obtains the configuration first: an existing document is reused,
    /// `--new-config` forces regeneration.
    pub fn new(args: &Args, system: &'src dyn System) -> Result<Self> {
        let manager = ConfigManager::new(system)?;
        let config = manager.obtain(args.new_config)?;

        Ok(Self {
            config,
            branch: args.branch.clone(),
            system,
        })
    }

    /// The configuration driving this run
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Execute the workflow
    pub fn execute(&self) -> Result<()> {
        let repo_path = &self.config.target_directory;
        if !self.system.exists(repo_path) {
            return Err(CommitError::filesystem(format!(
                "target repository folder does not exist: {}",
                repo_path.display()
            ))
            .into());
        }

        let repository = GitRepository::new(repo_path);
        if !repository.is_repository()? {
            return Err(CommitError::git(format!(
                "target folder is not a git repository: {}",
                repo_path.display()
            ))
            .into());
        }

        let client = TogglClient::new(&self.config.toggl)?;
        let entry = client.current_entry(self.config.toggl.project)?;
        info!("Current time entry is: {}", entry.description);

        QualityRoutine::new(&self.config.python, repo_path).run()?;

        if self.config.git.add {
            repository.add_all()?;
        }
        if self.config.git.commit {
            repository.commit(&entry.description)?;
        }
        if self.config.git.push {
            repository.push(&self.branch)?;
        }

        if self.config.toggl.cancel {
            client.stop_entry(&entry);
        }

        Ok(())
    }
}
