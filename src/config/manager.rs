//! Configuration manager
//!
//! Orchestrates the two entry states: Reuse (a stored document exists and
//! decodes, materialize against it and return without rewriting) and Fresh
//! (no document, a corrupt document, or explicit regeneration; materialize
//! from scratch and persist the result).

use crate::config::codec;
use crate::config::materialize::Materializer;
use crate::config::model::Config;
use crate::config::schema::app_schema;
use crate::error::CommitError;
use crate::system::System;
use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Environment variable overriding the configuration directory
pub const CONFIG_DIR_ENV: &str = "TOGGL_COMMIT_CONFIG_DIR";

const CONFIG_FILE_NAME: &str = "configuration.json";

/// Manages loading, (re)generation and persistence of the configuration
pub struct ConfigManager<'sys> {
    system: &'sys dyn System,
    config_dir: PathBuf,
}

impl<'sys> ConfigManager<'sys> {
    /// Create a manager using the canonical configuration directory
    ///
    /// The directory is the platform config dir plus `toggl-commit`,
    /// unless `TOGGL_COMMIT_CONFIG_DIR` overrides it.
    pub fn new(system: &'sys dyn System) -> Result<Self> {
        let config_dir = match system.env_var(CONFIG_DIR_ENV) {
            Ok(dir) => PathBuf::from(dir),
            Err(_) => dirs::config_dir()
                .ok_or_else(|| {
                    CommitError::configuration("cannot determine a configuration directory")
                })?
                .join("toggl-commit"),
        };

        Ok(Self { system, config_dir })
    }

    /// Path of the persisted configuration document
    #[must_use]
    pub fn config_path(&self) -> PathBuf {
        self.config_dir.join(CONFIG_FILE_NAME)
    }

    /// Obtain the configuration for this run
    ///
    /// With `regenerate` set the stored document is ignored and a new one
    /// is collected and written unconditionally. Otherwise an existing
    /// document is reused when it decodes; a corrupt or untypable document
    /// degrades to a fresh run with a logged warning. A partially written
    /// document from a crashed run lands on the same fallback.
    pub fn obtain(&self, regenerate: bool) -> Result<Config> {
        let path = self.config_path();

        if regenerate {
            info!("Regenerating configuration on request");
        } else if self.system.exists(&path) {
            match self.reuse(&path) {
                Ok(config) => return Ok(config),
                Err(err) => warn!("Stored configuration is unusable: {err:#}"),
            }
        } else {
            warn!("No configuration detected");
        }

        self.fresh(&path)
    }

    /// Reuse path: decode, materialize against the stored tree, return
    /// without rewriting the document
    fn reuse(&self, path: &Path) -> Result<Config> {
        info!("Loading configuration from {}", path.display());

        let text = self.system.read_to_string(path)?;
        let raw = codec::decode(&text)?;
        let tree = Materializer::new(self.system).materialize(&app_schema(), Some(&raw))?;
        codec::into_typed(tree)
    }

    /// Fresh path: materialize from scratch, then persist
    fn fresh(&self, path: &Path) -> Result<Config> {
        let tree = Materializer::new(self.system).materialize(&app_schema(), None)?;
        let config = codec::into_typed(tree)?;

        info!("Writing new configuration to {}", path.display());
        let text = codec::encode(&config)?;
        self.system.create_dir_all(&self.config_dir).map_err(|err| {
            CommitError::filesystem(format!(
                "cannot create configuration directory {}: {err}",
                self.config_dir.display()
            ))
        })?;
        self.system.write(path, text.as_bytes()).map_err(|err| {
            CommitError::filesystem(format!(
                "cannot write configuration document {}: {err}",
                path.display()
            ))
        })?;

        Ok(config)
    }
}
