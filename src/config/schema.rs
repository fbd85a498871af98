//! Static configuration schema graph
//!
//! The schema is a hand-authored tree of nodes describing every field the
//! program needs: its name, shape and optional default. Record shapes can
//! be declared in layers (outermost first); `merge_field_layers` folds the
//! layers into one ordered field list where a redeclared field keeps its
//! first position but takes the closest (innermost) declaration.

use serde_json::{Value, json};

/// Scalar leaf kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    Bool,
    Int,
    Str,
    Path,
}

/// Shape of one schema node
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// Scalar leaf
    Primitive(Primitive),
    /// One of a fixed ordered set of named options
    Choice { options: Vec<String> },
    /// A value that may be absent
    Optional(Box<Shape>),
    /// Nested record with ordered fields
    Record(Vec<SchemaNode>),
}

/// Describes one configuration field
///
/// Field names are unique within their parent record and their order is
/// stable: it determines both the prompt order and the field order of the
/// persisted document.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaNode {
    pub name: String,
    pub shape: Shape,
    pub default: Option<Value>,
}

impl SchemaNode {
    /// Create a node without a default
    pub fn new<S: Into<String>>(name: S, shape: Shape) -> Self {
        Self {
            name: name.into(),
            shape,
            default: None,
        }
    }

    /// Attach a default value (builder pattern)
    #[must_use]
    pub fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }

    /// Boolean leaf with a declared default
    pub fn bool<S: Into<String>>(name: S, default: bool) -> Self {
        Self::new(name, Shape::Primitive(Primitive::Bool)).with_default(Value::Bool(default))
    }

    /// Integer leaf
    pub fn int<S: Into<String>>(name: S) -> Self {
        Self::new(name, Shape::Primitive(Primitive::Int))
    }

    /// String leaf
    pub fn string<S: Into<String>>(name: S) -> Self {
        Self::new(name, Shape::Primitive(Primitive::Str))
    }

    /// Filesystem path leaf
    pub fn path<S: Into<String>>(name: S) -> Self {
        Self::new(name, Shape::Primitive(Primitive::Path))
    }

    /// Choice leaf over a fixed option set; `default` may be absent
    pub fn choice<S: Into<String>>(name: S, options: &[&str], default: Option<&str>) -> Self {
        let node = Self::new(
            name,
            Shape::Choice {
                options: options.iter().map(|&option| option.to_owned()).collect(),
            },
        );
        match default {
            Some(value) => node.with_default(json!(value)),
            None => node,
        }
    }

    /// Optional integer leaf, absent by default
    pub fn optional_int<S: Into<String>>(name: S) -> Self {
        Self::new(
            name,
            Shape::Optional(Box::new(Shape::Primitive(Primitive::Int))),
        )
    }

    /// Optional string leaf, absent by default
    pub fn optional_string<S: Into<String>>(name: S) -> Self {
        Self::new(
            name,
            Shape::Optional(Box::new(Shape::Primitive(Primitive::Str))),
        )
    }

    /// Record node with a single declaration layer
    pub fn record<S: Into<String>>(name: S, fields: Vec<SchemaNode>) -> Self {
        Self::new(name, Shape::Record(fields))
    }

    /// Record node declared in layers, outermost first
    pub fn record_layered<S: Into<String>>(name: S, layers: Vec<Vec<SchemaNode>>) -> Self {
        Self::new(name, Shape::Record(merge_field_layers(layers)))
    }
}

/// Merge layered field declarations into one ordered field list
///
/// Layers are ordered outermost (least specific) first. A field keeps the
/// position of its first declaration, while a redeclaration closer to the
/// leaf replaces its shape and default ("closest wins"). Conflicting
/// shapes across layers are not reported; the precedence rule resolves
/// them silently.
#[must_use]
pub fn merge_field_layers(layers: Vec<Vec<SchemaNode>>) -> Vec<SchemaNode> {
    let mut merged: Vec<SchemaNode> = Vec::new();

    for layer in layers {
        for node in layer {
            if let Some(existing) = merged.iter_mut().find(|field| field.name == node.name) {
                *existing = node;
            } else {
                merged.push(node);
            }
        }
    }

    merged
}

/// The application configuration schema
///
/// Mirrors the persisted-document shape: a target directory, the Python
/// code-management record, the git gates and the Toggl access record.
#[must_use]
pub fn app_schema() -> SchemaNode {
    SchemaNode::record(
        "configuration",
        vec![
            SchemaNode::path("target_directory"),
            SchemaNode::record(
                "python",
                vec![
                    SchemaNode::choice("package_manager", &["PIP", "Conda", "Poetry"], Some("PIP")),
                    SchemaNode::choice("environment", &["Conda", "Venv"], Some("Venv")),
                    SchemaNode::choice("type_checking", &["Mypy"], None),
                    SchemaNode::choice("security_checking", &["Bandit"], None),
                    SchemaNode::choice("linting", &["Flake8", "Ruff", "Pylint"], Some("Flake8")),
                    SchemaNode::choice("formatter", &["Black", "Ruff"], None),
                    SchemaNode::choice("tests", &["Unittest", "Pytest"], None),
                    SchemaNode::path("main_code").with_default(json!("src")),
                    SchemaNode::bool("format_code", true),
                ],
            ),
            SchemaNode::record(
                "git",
                vec![
                    SchemaNode::bool("add", false),
                    SchemaNode::bool("commit", true),
                    SchemaNode::bool("push", false),
                ],
            ),
            SchemaNode::record(
                "toggl",
                vec![
                    SchemaNode::record(
                        "user_data",
                        vec![
                            SchemaNode::string("username"),
                            SchemaNode::string("password"),
                            SchemaNode::optional_string("api_key"),
                        ],
                    ),
                    SchemaNode::optional_int("project"),
                    SchemaNode::bool("cancel", false),
                ],
            ),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_keeps_first_declaration_order() {
        let outer = vec![SchemaNode::int("a"), SchemaNode::bool("b", false)];
        let inner = vec![SchemaNode::string("c")];

        let merged = merge_field_layers(vec![outer, inner]);
        let names: Vec<&str> = merged.iter().map(|node| node.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_merge_closest_declaration_wins() {
        let outer = vec![SchemaNode::int("a"), SchemaNode::bool("b", false)];
        let inner = vec![SchemaNode::string("a"), SchemaNode::bool("b", true)];

        let merged = merge_field_layers(vec![outer, inner]);
        assert_eq!(merged.len(), 2);
        // "a" keeps its position but takes the inner shape
        assert_eq!(merged[0].name, "a");
        assert_eq!(merged[0].shape, Shape::Primitive(Primitive::Str));
        assert_eq!(merged[1].default, Some(Value::Bool(true)));
    }

    #[test]
    fn test_record_layered_builder() {
        let node = SchemaNode::record_layered(
            "record",
            vec![vec![SchemaNode::int("x")], vec![SchemaNode::string("x")]],
        );
        let Shape::Record(fields) = &node.shape else {
            panic!("expected a record shape");
        };
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].shape, Shape::Primitive(Primitive::Str));
    }

    #[test]
    fn test_app_schema_field_order() {
        let root = app_schema();
        let Shape::Record(fields) = &root.shape else {
            panic!("expected a record root");
        };

        let names: Vec<&str> = fields.iter().map(|node| node.name.as_str()).collect();
        assert_eq!(names, vec!["target_directory", "python", "git", "toggl"]);

        let Shape::Record(toggl) = &fields[3].shape else {
            panic!("expected a record for toggl");
        };
        let toggl_names: Vec<&str> = toggl.iter().map(|node| node.name.as_str()).collect();
        assert_eq!(toggl_names, vec!["user_data", "project", "cancel"]);
    }

    #[test]
    fn test_choice_defaults() {
        let with_default = SchemaNode::choice("linting", &["Flake8", "Ruff"], Some("Flake8"));
        assert_eq!(with_default.default, Some(json!("Flake8")));

        let without_default = SchemaNode::choice("tests", &["Unittest", "Pytest"], None);
        assert_eq!(without_default.default, None);
    }
}
