//! Recursive schema materialization
//!
//! Turns a schema node plus an optional previously persisted value into a
//! fully populated configuration tree. Records recurse field by field in
//! declaration order; a stored value short-circuits every prompt, which is
//! what makes configuration reuse across runs possible. When no stored
//! value exists a leaf falls through to its prompt resolver, except for
//! booleans (always defaulted, never prompted) and optionals whose default
//! is absent (resolved to `null` silently).

use crate::config::prompt::{self, ResolverKind, resolver_override};
use crate::config::schema::{Primitive, SchemaNode, Shape};
use crate::system::System;
use anyhow::Result;
use serde_json::{Map, Value};

/// Walks a schema and produces a concrete configuration tree
pub struct Materializer<'sys> {
    system: &'sys dyn System,
}

impl<'sys> Materializer<'sys> {
    /// Create a materializer running its prompts against `system`
    #[must_use]
    pub const fn new(system: &'sys dyn System) -> Self {
        Self { system }
    }

    /// Materialize `node`, reconciling against `existing` when present
    ///
    /// `existing` is the matching sub-tree of a previously persisted
    /// document. Missing record fields fall through to prompting; there is
    /// no recoverable failure path beyond the retry loops inside the
    /// resolvers themselves.
    pub fn materialize(&self, node: &SchemaNode, existing: Option<&Value>) -> Result<Value> {
        if let Shape::Record(fields) = &node.shape {
            return self.materialize_record(fields, existing);
        }

        // Stored leaves are adopted verbatim, secrets included.
        if let Some(value) = existing {
            return Ok(value.clone());
        }

        self.collect(node)
    }

    fn materialize_record(
        &self,
        fields: &[SchemaNode],
        existing: Option<&Value>,
    ) -> Result<Value> {
        let mut record = Map::new();

        for field in fields {
            let slice = existing.and_then(|value| value.get(&field.name));
            record.insert(field.name.clone(), self.materialize(field, slice)?);
        }

        Ok(Value::Object(record))
    }

    /// Collect a leaf value interactively or from its declared default
    fn collect(&self, node: &SchemaNode) -> Result<Value> {
        // Name overrides beat shape dispatch: credential fields collect
        // through their dedicated resolvers even when declared optional.
        if let Some(kind) = resolver_override(&node.name) {
            return match kind {
                ResolverKind::Identity => prompt::resolve_username(self.system),
                ResolverKind::Secret => prompt::resolve_secret(self.system, &node.name),
            };
        }

        self.collect_shape(&node.name, &node.shape, node.default.as_ref())
    }

    fn collect_shape(
        &self,
        name: &str,
        shape: &Shape,
        default: Option<&Value>,
    ) -> Result<Value> {
        match shape {
            Shape::Optional(inner) => match default {
                // An absent default resolves silently, without a prompt.
                None | Some(Value::Null) => Ok(Value::Null),
                Some(_) => self.collect_shape(name, inner, default),
            },
            Shape::Choice { options } => {
                prompt::resolve_choice(self.system, name, options, default)
            }
            // Booleans are never prompted, only defaulted or adopted.
            Shape::Primitive(Primitive::Bool) => {
                Ok(default.cloned().unwrap_or(Value::Bool(false)))
            }
            Shape::Primitive(Primitive::Path) => prompt::resolve_path(self.system, name),
            Shape::Primitive(Primitive::Int) => prompt::resolve_int(self.system, name),
            Shape::Primitive(Primitive::Str) => prompt::resolve_string(self.system, name),
            Shape::Record(fields) => self.materialize_record(fields, None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::MockSystem;
    use serde_json::json;

    #[test]
    fn test_boolean_never_prompts() {
        let system = MockSystem::new();
        let node = SchemaNode::bool("format_code", false);

        let value = Materializer::new(&system).materialize(&node, None).unwrap();
        assert_eq!(value, json!(false));
        assert_eq!(system.reads(), 0);
    }

    #[test]
    fn test_boolean_without_default_is_false() {
        let system = MockSystem::new();
        let node = SchemaNode::new("flag", Shape::Primitive(Primitive::Bool));

        let value = Materializer::new(&system).materialize(&node, None).unwrap();
        assert_eq!(value, json!(false));
    }

    #[test]
    fn test_optional_defaults_silently_to_absent() {
        let system = MockSystem::new();
        let node = SchemaNode::optional_int("project");

        let value = Materializer::new(&system).materialize(&node, None).unwrap();
        assert_eq!(value, Value::Null);
        assert_eq!(system.reads(), 0);
    }

    #[test]
    fn test_existing_leaf_adopted_without_prompt() {
        let system = MockSystem::new();
        let node = SchemaNode::string("password");
        let stored = json!("QUJDRA==");

        let value = Materializer::new(&system)
            .materialize(&node, Some(&stored))
            .unwrap();
        assert_eq!(value, stored);
        assert_eq!(system.reads(), 0);
    }

    #[test]
    fn test_existing_choice_adopted_without_prompt() {
        let system = MockSystem::new();
        let node = SchemaNode::choice("linting", &["Flake8", "Ruff"], Some("Flake8"));

        let value = Materializer::new(&system)
            .materialize(&node, Some(&json!("Ruff")))
            .unwrap();
        assert_eq!(value, json!("Ruff"));
        assert_eq!(system.reads(), 0);
    }

    #[test]
    fn test_record_recurses_in_declaration_order() {
        let system = MockSystem::new().with_input(&["7", "hello"]);
        let node = SchemaNode::record(
            "record",
            vec![
                SchemaNode::bool("a", true),
                SchemaNode::int("b"),
                SchemaNode::string("c"),
            ],
        );

        let value = Materializer::new(&system).materialize(&node, None).unwrap();
        assert_eq!(value, json!({"a": true, "b": 7, "c": "hello"}));
    }

    #[test]
    fn test_record_fills_only_missing_fields() {
        let system = MockSystem::new().with_input(&["12"]);
        let node = SchemaNode::record(
            "record",
            vec![SchemaNode::int("kept"), SchemaNode::int("collected")],
        );
        let stored = json!({"kept": 3});

        let value = Materializer::new(&system)
            .materialize(&node, Some(&stored))
            .unwrap();
        assert_eq!(value, json!({"kept": 3, "collected": 12}));
        assert_eq!(system.reads(), 1);
    }

    #[test]
    fn test_name_override_beats_optional_rule() {
        // api_key is optional with an absent default, but its name routes
        // it to the secret resolver instead of the silent-absent rule.
        let system = MockSystem::new().with_input(&["sekret"]);
        let node = SchemaNode::optional_string("api_key");

        let value = Materializer::new(&system).materialize(&node, None).unwrap();
        assert_eq!(value, json!("c2VrcmV0"));
        assert_eq!(system.reads(), 1);
    }

    #[test]
    fn test_username_override_on_plain_string() {
        let system = MockSystem::new().with_input(&["dev@example.com"]);
        let node = SchemaNode::string("username");

        let value = Materializer::new(&system).materialize(&node, None).unwrap();
        assert_eq!(value, json!("dev@example.com"));
    }

    #[test]
    fn test_choice_prompt_with_absent_default() {
        let system = MockSystem::new().with_input(&["2"]);
        let node = SchemaNode::choice("tests", &["Unittest", "Pytest"], None);

        let value = Materializer::new(&system).materialize(&node, None).unwrap();
        assert_eq!(value, json!("Pytest"));
    }

    #[test]
    fn test_minimal_schema_scenario() {
        // {a: bool default=true, b: Optional<int> default=absent} needs no
        // input at all and round-trips through its own JSON encoding.
        let system = MockSystem::new();
        let node = SchemaNode::record(
            "minimal",
            vec![SchemaNode::bool("a", true), SchemaNode::optional_int("b")],
        );
        let materializer = Materializer::new(&system);

        let value = materializer.materialize(&node, None).unwrap();
        assert_eq!(value, json!({"a": true, "b": null}));

        let encoded = serde_json::to_string(&value).unwrap();
        let decoded: Value = serde_json::from_str(&encoded).unwrap();
        let again = materializer.materialize(&node, Some(&decoded)).unwrap();
        assert_eq!(again, value);
        assert_eq!(system.reads(), 0);
    }
}
