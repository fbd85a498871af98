//! Code-quality task list for the target repository
//!
//! Runs the configured external tooling (tests, type checking, linting,
//! security checking, formatting, requirements export) against the target
//! repository. Failed tests and severe security findings abort the
//! workflow before anything is committed; everything else just reports.

use crate::config::{
    Formatter, Linter, PackageManager, PythonConfig, SecurityChecker, TestRunner,
};
use crate::error::CommitError;
use crate::operations::commands::run_shell;
use anyhow::Result;
use std::path::Path;
use tracing::{debug, info};

/// Severities that cancel the workflow when the security checker reports them
const SEVERITY_MATCH: &[&str] = &["High", "Critical"];

/// Runs the configured quality tooling against one repository
pub struct QualityRoutine<'cfg> {
    config: &'cfg PythonConfig,
    path: &'cfg Path,
}

impl<'cfg> QualityRoutine<'cfg> {
    /// Create a routine for `config`, executed inside `path`
    #[must_use]
    pub const fn new(config: &'cfg PythonConfig, path: &'cfg Path) -> Self {
        Self { config, path }
    }

    /// Run the whole code management routine per the configuration
    pub fn run(&self) -> Result<()> {
        info!("Running code checking routine");
        debug!("Configuration: {:?}", self.config);

        if let Some(runner) = self.config.tests {
            self.run_tests(runner)?;
        }
        if self.config.type_checking.is_some() {
            self.type_check()?;
        }
        if let Some(linter) = self.config.linting {
            self.lint(linter)?;
        }
        if let Some(checker) = self.config.security_checking {
            self.security_check(checker)?;
        }
        if self.config.format_code
            && let Some(formatter) = self.config.formatter
        {
            self.format(formatter)?;
        }

        self.generate_requirements()
    }

    /// Run the test suite; failures cancel the rest of the workflow
    fn run_tests(&self, runner: TestRunner) -> Result<()> {
        let command = match runner {
            // TODO: drive unittest via its module runner once discovery
            // arguments are configurable.
            TestRunner::Unittest => return Ok(()),
            TestRunner::Pytest => "pytest tests -v",
        };

        let command = if self.config.package_manager == PackageManager::Poetry {
            format!("poetry run {command}")
        } else {
            command.to_owned()
        };

        let output = run_shell(&command, self.path)?;
        if output.stdout.contains("failed") {
            return Err(CommitError::command("all or some of the tests failed").into());
        }
        Ok(())
    }

    fn type_check(&self) -> Result<()> {
        run_shell(&format!("mypy {}", self.main_code()), self.path)?;
        Ok(())
    }

    fn lint(&self, linter: Linter) -> Result<()> {
        let command = match linter {
            Linter::Flake8 => format!("flake8 {}", self.main_code()),
            Linter::Ruff => format!("ruff check {}", self.main_code()),
            Linter::Pylint => format!("pylint {}", self.main_code()),
        };
        run_shell(&command, self.path)?;
        Ok(())
    }

    fn format(&self, formatter: Formatter) -> Result<()> {
        let command = match formatter {
            Formatter::Ruff => format!("ruff format {}", self.main_code()),
            Formatter::Black => format!("black {}", self.main_code()),
        };
        run_shell(&command, self.path)?;
        Ok(())
    }

    /// Security findings at High or Critical severity cancel the workflow
    fn security_check(&self, checker: SecurityChecker) -> Result<()> {
        let command = match checker {
            SecurityChecker::Bandit => format!("bandit -r {}", self.main_code()),
        };

        let output = run_shell(&command, self.path)?;
        if SEVERITY_MATCH
            .iter()
            .any(|severity| output.stdout.contains(&format!("Severity: {severity}")))
        {
            return Err(
                CommitError::command("security findings are too severe to continue").into(),
            );
        }
        Ok(())
    }

    /// Export a requirements file with the configured package manager
    fn generate_requirements(&self) -> Result<()> {
        let command = match self.config.package_manager {
            PackageManager::Poetry => "poetry lock",
            PackageManager::Conda => "conda env export > environment.yml",
            PackageManager::Pip => "pip freeze > requirements.txt",
        };
        run_shell(command, self.path)?;
        Ok(())
    }

    fn main_code(&self) -> String {
        self.config.main_code.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Environment;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn quiet_config() -> PythonConfig {
        PythonConfig {
            package_manager: PackageManager::Pip,
            environment: Environment::Venv,
            type_checking: None,
            security_checking: None,
            linting: None,
            formatter: None,
            tests: None,
            main_code: PathBuf::from("src"),
            format_code: false,
        }
    }

    #[test]
    fn test_unittest_runner_is_a_no_op() {
        let temp_dir = TempDir::new().unwrap();
        let config = quiet_config();
        let routine = QualityRoutine::new(&config, temp_dir.path());

        // The unittest arm returns before any command is spawned.
        assert!(routine.run_tests(TestRunner::Unittest).is_ok());
    }

    #[test]
    fn test_requirements_export_writes_a_file() {
        let temp_dir = TempDir::new().unwrap();
        let config = quiet_config();
        let routine = QualityRoutine::new(&config, temp_dir.path());

        // pip may be missing; the redirection still creates the file when
        // the shell itself runs.
        if routine.generate_requirements().is_ok() {
            assert!(temp_dir.path().join("requirements.txt").exists());
        }
    }
}
