//! JSON interpretation of the `$filter` / `$default` / `$env` shape.
//!
//! Responsibilities:
//! - Convert a `serde_json::Value` document into the typed node tree.
//! - Reject malformed directive nodes at load time.
//!
//! Does NOT handle:
//! - Resolution; interpretation never consults criteria or the environment.
//!
//! Invariants:
//! - `$filter` and `$env` values must be strings.
//! - A `$env` node carries only `$env` and `$default` fields.
//! - Objects without directive keys become plain mappings; `$meta` fields
//!   are documentation and are dropped.

use std::collections::BTreeMap;

use serde_json::{Map, Value};
use thiserror::Error;

use super::node::{FilterNode, Node};

/// Reserved field naming the criteria key of a filter node.
const FILTER_KEY: &str = "$filter";

/// Reserved field naming the fallback subtree or literal.
const DEFAULT_KEY: &str = "$default";

/// Reserved field naming the environment variable of an override node.
const ENV_KEY: &str = "$env";

/// Reserved field carrying free-form documentation.
const META_KEY: &str = "$meta";

/// Errors produced while interpreting a JSON document.
#[derive(Error, Debug)]
pub enum DocumentError {
    /// The `$filter` field was not a string.
    #[error("'$filter' at '{path}' must be a string naming a criteria key")]
    FilterNotString { path: String },

    /// The `$env` field was not a string.
    #[error("'$env' at '{path}' must be a string naming an environment variable")]
    EnvNotString { path: String },

    /// A `$env` node carried a field other than `$env` and `$default`.
    #[error("'$env' node at '{path}' has unexpected field '{field}'")]
    EnvUnexpectedField { path: String, field: String },
}

impl Node {
    /// Interpret a JSON value as a configuration document.
    ///
    /// Objects carrying `$filter` become filter nodes, objects carrying
    /// `$env` become environment-override nodes, and any other object
    /// becomes a plain mapping.
    ///
    /// # Errors
    ///
    /// Returns a [`DocumentError`] when a directive field has the wrong
    /// shape. The error names the dotted path of the offending node.
    pub fn from_value(value: &Value) -> Result<Self, DocumentError> {
        interpret(value, "")
    }
}

fn interpret(value: &Value, path: &str) -> Result<Node, DocumentError> {
    let Some(object) = value.as_object() else {
        return Ok(Node::Value(value.clone()));
    };

    if object.contains_key(ENV_KEY) {
        return interpret_env(object, path);
    }
    if object.contains_key(FILTER_KEY) {
        return interpret_filter(object, path);
    }

    let mut children = BTreeMap::new();
    for (key, child) in object {
        if key == META_KEY {
            continue;
        }
        children.insert(key.clone(), interpret(child, &child_path(path, key))?);
    }
    Ok(Node::Mapping(children))
}

fn interpret_env(object: &Map<String, Value>, path: &str) -> Result<Node, DocumentError> {
    let var = object
        .get(ENV_KEY)
        .and_then(Value::as_str)
        .ok_or_else(|| DocumentError::EnvNotString {
            path: path.to_string(),
        })?;

    for field in object.keys() {
        if field != ENV_KEY && field != DEFAULT_KEY {
            return Err(DocumentError::EnvUnexpectedField {
                path: path.to_string(),
                field: field.clone(),
            });
        }
    }

    Ok(match object.get(DEFAULT_KEY) {
        Some(fallback) => Node::env_var_or(var, fallback.clone()),
        None => Node::env_var(var),
    })
}

fn interpret_filter(object: &Map<String, Value>, path: &str) -> Result<Node, DocumentError> {
    let criterion = object
        .get(FILTER_KEY)
        .and_then(Value::as_str)
        .ok_or_else(|| DocumentError::FilterNotString {
            path: path.to_string(),
        })?;

    let mut filter = FilterNode::on(criterion);
    for (key, child) in object {
        if key == FILTER_KEY || key == META_KEY {
            continue;
        }
        let node = interpret(child, &child_path(path, key))?;
        if key == DEFAULT_KEY {
            filter = filter.fallback(node);
        } else {
            filter = filter.branch(key.clone(), node);
        }
    }
    Ok(Node::Filter(filter))
}

fn child_path(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{parent}.{key}")
    }
}
