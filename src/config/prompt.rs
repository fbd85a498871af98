//! Interactive prompt resolvers
//!
//! One resolver per leaf type. Every resolver prints an instruction naming
//! the field, reads one line of operator input and validates it against its
//! type-specific rule; invalid input prints a hint and repeats until a
//! valid value arrives. The loops are unbounded: the tool is interactive
//! and an extra prompt beats an unattended failure.

use crate::system::System;
use crate::utils::text::display_name;
use anyhow::{Context as _, Result};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as B64;
use regex::Regex;
use serde_json::Value;
use std::path::Path;

const SEPARATOR_WIDTH: usize = 60;

/// Email-like identifier rule: alphanumeric local part optionally
/// segmented by `.`/`-`/`_`, then a hyphenated domain and a dot-separated
/// suffix of at least two letters.
const USERNAME_PATTERN: &str = r"^([A-Za-z0-9]+[._-])*[A-Za-z0-9]+@[A-Za-z0-9-]+(\.[A-Za-z]{2,})+$";

/// Resolver identifiers used by the name override table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolverKind {
    /// Masked input, stored base64-encoded
    Secret,
    /// Email-like identifier
    Identity,
}

/// Field-name overrides, consulted before shape-based dispatch
///
/// Credential fields resolve by name, not by their declared shape: two
/// plain string fields named `username` and `password` collect through
/// different resolvers.
pub const RESOLVER_OVERRIDES: &[(&str, ResolverKind)] = &[
    ("username", ResolverKind::Identity),
    ("password", ResolverKind::Secret),
    ("api_key", ResolverKind::Secret),
];

/// Look up the resolver override for a field name
#[must_use]
pub fn resolver_override(field: &str) -> Option<ResolverKind> {
    RESOLVER_OVERRIDES
        .iter()
        .find(|(name, _)| *name == field)
        .map(|&(_, kind)| kind)
}

/// Ask for a filesystem path until an existing one is entered
pub fn resolve_path(system: &dyn System, field: &str) -> Result<Value> {
    separator(system);
    let name = display_name(field);

    loop {
        system.show(&format!("Please specify a valid target {name} path."));
        let line = system.read_line("> ")?;

        if system.exists(Path::new(&line)) {
            return Ok(Value::String(line));
        }

        system.show("Invalid path specified.");
    }
}

/// Ask for a base-10 integer until one parses
pub fn resolve_int(system: &dyn System, field: &str) -> Result<Value> {
    separator(system);
    let name = display_name(field);
    system.show(&format!("What is the {name} you want to use?"));

    loop {
        let line = system.read_line(&format!("{name} > "))?;

        match line.trim().parse::<i64>() {
            Ok(value) => return Ok(Value::from(value)),
            Err(_) => {
                system.show(&format!("Selected {name} needs to be an integer!"));
                system.show("Try again!");
            }
        }
    }
}

/// Ask to pick one of `options` by 1-based index
///
/// The index one past the last option selects `default`, which may itself
/// be absent; in that case the sentinel resolves to `null` and the record
/// above must tolerate the missing value.
pub fn resolve_choice(
    system: &dyn System,
    field: &str,
    options: &[String],
    default: Option<&Value>,
) -> Result<Value> {
    separator(system);
    system.show(&format!("Select the {} you use.", display_name(field)));

    let sentinel = options.len() + 1;
    let default_label = match default {
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
        None => "None".to_owned(),
    };

    loop {
        for (index, option) in options.iter().enumerate() {
            system.show(&format!("{}: {option}", index + 1));
        }
        system.show(&format!("{sentinel}: DEFAULT[{default_label}]"));

        let line = system.read_line("> ")?;
        let Ok(selection) = line.trim().parse::<usize>() else {
            system.show(&format!(
                "Bad input, select a number between 1 and {sentinel}"
            ));
            continue;
        };

        if (1..=options.len()).contains(&selection) {
            return Ok(Value::String(options[selection - 1].clone()));
        } else if selection == sentinel {
            return Ok(default.cloned().unwrap_or(Value::Null));
        }

        system.show(&format!(
            "Bad input, select a number between 1 and {sentinel}"
        ));
    }
}

/// Ask for a secret without echoing it; any text is accepted
///
/// The entered text is base64-encoded before being returned so the literal
/// plaintext never lands in the persisted document. This is a reversible
/// encoding, not a secrecy boundary.
pub fn resolve_secret(system: &dyn System, field: &str) -> Result<Value> {
    separator(system);
    let name = display_name(field);
    system.show(&format!("Type in the {name} for your Toggl account."));

    let raw = system.read_secret(&format!("Enter {name}: "))?;
    Ok(Value::String(B64.encode(raw.as_bytes())))
}

/// Ask for a username until it matches the email-like pattern
pub fn resolve_username(system: &dyn System) -> Result<Value> {
    separator(system);
    let pattern = Regex::new(USERNAME_PATTERN).context("invalid username pattern")?;
    system.show("Input a username (email) for your Toggl account.");

    loop {
        let line = system.read_line("> ")?;

        if pattern.is_match(&line) {
            return Ok(Value::String(line));
        }

        system.show("Wrong email format! Try again.");
    }
}

/// Ask for a plain string; the first line is accepted as entered
pub fn resolve_string(system: &dyn System, field: &str) -> Result<Value> {
    separator(system);
    system.show(&format!("Enter the {}.", display_name(field)));

    let line = system.read_line("> ")?;
    Ok(Value::String(line))
}

fn separator(system: &dyn System) {
    system.show(&"#".repeat(SEPARATOR_WIDTH));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::MockSystem;
    use serde_json::json;

    fn error_lines(system: &MockSystem, needle: &str) -> usize {
        system
            .shown_lines()
            .iter()
            .filter(|line| line.contains(needle))
            .count()
    }

    #[test]
    fn test_path_retry_until_valid() {
        let system = MockSystem::new()
            .with_dir("/repo")
            .with_input(&["nope", "also/missing", "/repo"]);

        let value = resolve_path(&system, "target_directory").unwrap();
        assert_eq!(value, json!("/repo"));
        assert_eq!(system.reads(), 3);
        assert_eq!(error_lines(&system, "Invalid path specified."), 2);
    }

    #[test]
    fn test_path_eof_propagates() {
        let system = MockSystem::new().with_input(&["missing"]);
        assert!(resolve_path(&system, "target_directory").is_err());
    }

    #[test]
    fn test_int_retry_until_parsed() {
        let system = MockSystem::new().with_input(&["abc", "4x", "42"]);

        let value = resolve_int(&system, "project").unwrap();
        assert_eq!(value, json!(42));
        assert_eq!(system.reads(), 3);
        assert_eq!(error_lines(&system, "needs to be an integer"), 2);
    }

    #[test]
    fn test_choice_by_index() {
        let options = vec!["PIP".to_owned(), "Conda".to_owned(), "Poetry".to_owned()];
        let system = MockSystem::new().with_input(&["2"]);

        let value = resolve_choice(&system, "package_manager", &options, Some(&json!("PIP")));
        assert_eq!(value.unwrap(), json!("Conda"));
    }

    #[test]
    fn test_choice_sentinel_selects_default() {
        let options = vec!["PIP".to_owned(), "Conda".to_owned(), "Poetry".to_owned()];
        let system = MockSystem::new().with_input(&["4"]);

        let value = resolve_choice(&system, "package_manager", &options, Some(&json!("PIP")));
        assert_eq!(value.unwrap(), json!("PIP"));
    }

    #[test]
    fn test_choice_sentinel_with_absent_default() {
        let options = vec!["Mypy".to_owned()];
        let system = MockSystem::new().with_input(&["2"]);

        let value = resolve_choice(&system, "type_checking", &options, None);
        assert_eq!(value.unwrap(), Value::Null);
    }

    #[test]
    fn test_choice_rejects_out_of_range_and_garbage() {
        let options = vec!["Flake8".to_owned(), "Ruff".to_owned(), "Pylint".to_owned()];
        let system = MockSystem::new().with_input(&["x", "9", "1"]);

        let value = resolve_choice(&system, "linting", &options, Some(&json!("Flake8")));
        assert_eq!(value.unwrap(), json!("Flake8"));
        assert_eq!(system.reads(), 3);
        assert_eq!(error_lines(&system, "Bad input"), 2);
    }

    #[test]
    fn test_username_pattern() {
        let system = MockSystem::new().with_input(&[
            "not-an-email",
            "missing@domain",
            "bad@domain.c",
            "dev.user-one@exam-ple.co.uk",
        ]);

        let value = resolve_username(&system).unwrap();
        assert_eq!(value, json!("dev.user-one@exam-ple.co.uk"));
        assert_eq!(system.reads(), 4);
        assert_eq!(error_lines(&system, "Wrong email format"), 3);
    }

    #[test]
    fn test_secret_is_base64_encoded() {
        let system = MockSystem::new().with_input(&["hunter2"]);

        let value = resolve_secret(&system, "password").unwrap();
        assert_eq!(value, json!("aHVudGVyMg=="));
    }

    #[test]
    fn test_string_accepts_first_line() {
        let system = MockSystem::new().with_input(&["anything goes"]);

        let value = resolve_string(&system, "note").unwrap();
        assert_eq!(value, json!("anything goes"));
        assert_eq!(system.reads(), 1);
    }

    #[test]
    fn test_resolver_override_table() {
        assert_eq!(resolver_override("username"), Some(ResolverKind::Identity));
        assert_eq!(resolver_override("password"), Some(ResolverKind::Secret));
        assert_eq!(resolver_override("api_key"), Some(ResolverKind::Secret));
        assert_eq!(resolver_override("project"), None);
    }
}
