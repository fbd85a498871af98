//! Persistence codec for the configuration document
//!
//! Encodes a typed configuration value to JSON text and parses stored text
//! back into the raw nested mapping the materializer reconciles against.
//! Path leaves render as plain strings and absent optionals as `null`, so
//! a document re-parsed and re-materialized against the same schema yields
//! the value that produced it.

use crate::config::model::Config;
use anyhow::{Context as _, Result};
use serde_json::Value;

/// Encode a configuration value as a JSON document
pub fn encode(config: &Config) -> Result<String> {
    serde_json::to_string_pretty(config).context("failed to encode the configuration")
}

/// Parse a stored document into a raw nested mapping
///
/// A parse failure here means "no usable existing configuration" to the
/// caller, not a hard crash.
pub fn decode(text: &str) -> Result<Value> {
    serde_json::from_str(text).context("failed to parse the configuration document")
}

/// Convert a fully materialized tree into the typed model
pub fn into_typed(tree: Value) -> Result<Config> {
    serde_json::from_value(tree).context("configuration tree does not match the expected shape")
}
