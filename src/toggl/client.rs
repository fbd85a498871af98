//! Toggl Track API client
//!
//! Thin blocking wrapper over the v9 endpoints the workflow needs: read
//! the currently running time entry and stop it. One attempt per call, no
//! retry; a failed read is fatal for the run.

use crate::config::TogglConfig;
use crate::error::CommitError;
use anyhow::{Context as _, Result};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as B64;
use serde::Deserialize;
use std::time::Duration;
use tracing::{error, info};

/// Base Toggl API v9 endpoint
pub const BASE_URL: &str = "https://api.track.toggl.com/api/v9";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

/// Currently running time entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeEntry {
    pub id: i64,
    pub workspace_id: i64,
    pub description: String,
}

/// Wire shape of `GET /me/time_entries/current`; the endpoint answers
/// `null` when nothing is being tracked.
#[derive(Debug, Deserialize)]
struct CurrentEntryBody {
    id: i64,
    workspace_id: i64,
    #[serde(default)]
    description: String,
    #[serde(default)]
    project_id: Option<i64>,
}

/// Client holding the prepared Basic-Auth header
pub struct TogglClient {
    email: String,
    authorization: String,
    agent: ureq::Agent,
}

impl TogglClient {
    /// Build a client from the Toggl configuration record
    ///
    /// The stored password is base64; it is decoded here and folded into
    /// the Basic-Auth header.
    pub fn new(config: &TogglConfig) -> Result<Self> {
        let auth = &config.user_data;

        let password_bytes = B64.decode(auth.password.as_bytes()).map_err(|err| {
            CommitError::configuration(format!("stored password is not valid base64: {err}"))
        })?;
        let password = String::from_utf8(password_bytes).map_err(|err| {
            CommitError::configuration(format!("stored password is not valid UTF-8: {err}"))
        })?;

        let agent = ureq::AgentBuilder::new().timeout(REQUEST_TIMEOUT).build();

        Ok(Self {
            email: auth.username.clone(),
            authorization: basic_auth(&auth.username, &password),
            agent,
        })
    }

    /// Fetch the currently running time entry
    ///
    /// With `project` set, a running entry tracked under a different
    /// project is rejected as a guard against committing under the wrong
    /// task.
    pub fn current_entry(&self, project: Option<i64>) -> Result<TimeEntry> {
        info!("Grabbing current Toggl time entry for user {}", self.email);

        let response = self
            .agent
            .get(&format!("{BASE_URL}/me/time_entries/current"))
            .set("Content-Type", "application/json")
            .set("Authorization", &self.authorization)
            .call()
            .map_err(|err| match err {
                ureq::Error::Status(code, _) => {
                    CommitError::tracker(format!("Toggl API answered with status {code}"))
                }
                ureq::Error::Transport(transport) => {
                    CommitError::tracker(format!("failed to reach the Toggl API: {transport}"))
                }
            })?;

        let body: Option<CurrentEntryBody> = response
            .into_json()
            .context("failed to parse the Toggl time entry response")?;
        let Some(body) = body else {
            return Err(
                CommitError::tracker("user is not tracking a time entry at the moment").into(),
            );
        };

        if let Some(expected) = project {
            let running = body.project_id.unwrap_or(0);
            if running != expected {
                return Err(CommitError::tracker(format!(
                    "wrong project is being tracked: {running}"
                ))
                .into());
            }
        }

        Ok(TimeEntry {
            id: body.id,
            workspace_id: body.workspace_id,
            description: body.description,
        })
    }

    /// Stop the given time entry
    ///
    /// Failure to stop is logged, not fatal; the commit has already
    /// happened by the time this runs.
    pub fn stop_entry(&self, entry: &TimeEntry) -> bool {
        info!("Stopping time entry {}", entry.id);

        let url = format!(
            "{BASE_URL}/workspaces/{}/time_entries/{}/stop",
            entry.workspace_id, entry.id
        );
        match self
            .agent
            .patch(&url)
            .set("Content-Type", "application/json")
            .set("Authorization", &self.authorization)
            .call()
        {
            Ok(_) => true,
            Err(err) => {
                error!("Failed to stop the time entry: {err}");
                false
            }
        }
    }
}

fn basic_auth(username: &str, password: &str) -> String {
    format!("Basic {}", B64.encode(format!("{username}:{password}")))
}
