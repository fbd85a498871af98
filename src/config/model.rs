//! Typed configuration model
//!
//! The materializer produces a raw JSON tree; these structs are its typed
//! counterpart and define the field order of the persisted document. The
//! rest of the program only ever sees this model.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Fully materialized configuration for one run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Repository the workflow operates on
    pub target_directory: PathBuf,
    pub python: PythonConfig,
    pub git: GitConfig,
    pub toggl: TogglConfig,
}

/// Configuration for Python code management
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PythonConfig {
    pub package_manager: PackageManager,
    pub environment: Environment,
    pub type_checking: Option<TypeChecker>,
    pub security_checking: Option<SecurityChecker>,
    pub linting: Option<Linter>,
    pub formatter: Option<Formatter>,
    pub tests: Option<TestRunner>,
    /// Directory holding the code the quality tools run against
    pub main_code: PathBuf,
    /// Gates whether the configured formatter runs at all
    pub format_code: bool,
}

/// Boolean gates for the git side of the workflow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitConfig {
    pub add: bool,
    pub commit: bool,
    pub push: bool,
}

/// Authentication information for the Toggl tracker
///
/// The password is stored reversibly base64-encoded, not encrypted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TogglAuth {
    pub username: String,
    pub password: String,
    pub api_key: Option<String>,
}

/// Configuration for Toggl access
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TogglConfig {
    pub user_data: TogglAuth,
    /// Expected project id, as a guard against committing under the wrong
    /// running entry
    pub project: Option<i64>,
    /// Stop the running entry once the workflow finishes
    pub cancel: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PackageManager {
    #[serde(rename = "PIP")]
    Pip,
    Conda,
    Poetry,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Conda,
    Venv,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TypeChecker {
    Mypy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SecurityChecker {
    Bandit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Linter {
    Flake8,
    Ruff,
    Pylint,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Formatter {
    Black,
    Ruff,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TestRunner {
    Unittest,
    Pytest,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_enum_wire_names() {
        assert_eq!(json!(PackageManager::Pip), json!("PIP"));
        assert_eq!(json!(Environment::Venv), json!("Venv"));
        assert_eq!(json!(Linter::Flake8), json!("Flake8"));
        assert_eq!(json!(TestRunner::Pytest), json!("Pytest"));
    }

    #[test]
    fn test_optional_fields_serialize_as_null() {
        let python = PythonConfig {
            package_manager: PackageManager::Pip,
            environment: Environment::Venv,
            type_checking: None,
            security_checking: None,
            linting: Some(Linter::Flake8),
            formatter: None,
            tests: None,
            main_code: PathBuf::from("src"),
            format_code: true,
        };

        let value = serde_json::to_value(&python).unwrap();
        assert_eq!(value["type_checking"], serde_json::Value::Null);
        assert_eq!(value["linting"], json!("Flake8"));
        assert_eq!(value["main_code"], json!("src"));
    }
}
