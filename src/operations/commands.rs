//! External command execution with captured output

use crate::error::CommitError;
use anyhow::{Context as _, Result};
use std::path::Path;
use std::process::{Command, Output, Stdio};
use tracing::{info, warn};

/// Captured result of one external command
///
/// A non-zero exit status is data, not an error: several of the quality
/// tools exit non-zero on findings and the workflow inspects their output
/// instead of aborting.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    pub status: i32,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    /// Whether the command exited with status zero
    #[must_use]
    pub const fn success(&self) -> bool {
        self.status == 0
    }
}

/// Run a shell command line in the given working directory
///
/// The command goes through the platform shell so redirections keep
/// working. Only a spawn failure is an error.
pub fn run_shell(command: &str, working_dir: &Path) -> Result<CommandOutput> {
    if command.trim().is_empty() {
        return Err(CommitError::command("refusing to run an empty command").into());
    }
    if !working_dir.exists() {
        return Err(CommitError::filesystem(format!(
            "working directory does not exist: {}",
            working_dir.display()
        ))
        .into());
    }

    let (shell, shell_arg) = shell_command();
    info!("Running: {command}");

    let output = Command::new(shell)
        .arg(shell_arg)
        .arg(command)
        .current_dir(working_dir)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .with_context(|| format!("failed to execute command: {command}"))?;

    collect_output(command, output)
}

/// Run a program with an explicit argument list in the given working directory
///
/// Used where an argument carries operator-controlled text (commit
/// messages), which must not pass through shell quoting.
pub fn run_program(program: &str, args: &[&str], working_dir: &Path) -> Result<CommandOutput> {
    info!("Running: {program} {}", args.join(" "));

    let output = Command::new(program)
        .args(args)
        .current_dir(working_dir)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .with_context(|| format!("failed to execute {program}"))?;

    collect_output(program, output)
}

fn collect_output(label: &str, output: Output) -> Result<CommandOutput> {
    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
    let status = output.status.code().unwrap_or(-1);

    if !stdout.trim().is_empty() {
        info!("{}", stdout.trim());
    }
    if status != 0 {
        warn!("{label} exited with status {status}");
        if !stderr.trim().is_empty() {
            warn!("{}", stderr.trim());
        }
    }

    Ok(CommandOutput {
        status,
        stdout,
        stderr,
    })
}

/// Get the appropriate shell command for the current platform
fn shell_command() -> (&'static str, &'static str) {
    if cfg!(target_os = "windows") {
        ("cmd", "/C")
    } else {
        ("sh", "-c")
    }
}
