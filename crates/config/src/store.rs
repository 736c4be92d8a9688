//! Read-only resolution of configuration documents.
//!
//! Responsibilities:
//! - Walk dot-delimited key paths through a document.
//! - Select filter branches against a criteria set.
//! - Materialize terminal subtrees into plain JSON values.
//!
//! Does NOT handle:
//! - Document authoring or interpretation (see document/).
//! - Criteria derivation (see criteria.rs).
//!
//! Invariants:
//! - Resolution is a pure function of (document, path, criteria, snapshot);
//!   no environment variable is read after the store is constructed.
//! - An unresolvable path yields `None`, never an error.

use serde_json::Value;

use crate::criteria::Criteria;
use crate::document::Node;
use crate::env::EnvSnapshot;

/// An immutable configuration store.
///
/// Wraps a document and the snapshot of the environment variables the
/// document references. `get` only reads, so a store is safe to share
/// across threads without locking.
#[derive(Debug, Clone)]
pub struct Store {
    root: Node,
    env: EnvSnapshot,
}

impl Store {
    /// Create a store, capturing the environment variables the document
    /// references from the process environment.
    pub fn new(root: Node) -> Self {
        let env = EnvSnapshot::capture(root.env_vars());
        Self::with_env(root, env)
    }

    /// Create a store with an explicit environment snapshot (primarily for
    /// testing).
    pub fn with_env(root: Node, env: EnvSnapshot) -> Self {
        Self { root, env }
    }

    /// Resolve a dot-delimited key path against the given criteria.
    ///
    /// The empty path addresses the document root. Missing paths, filters
    /// with neither a matching branch nor a fallback, and unset overrides
    /// without a fallback all resolve to `None`.
    pub fn get(&self, path: &str, criteria: &Criteria) -> Option<Value> {
        let mut node = &self.root;
        if !path.is_empty() {
            for segment in path.split('.') {
                let Node::Mapping(children) = select(node, criteria)? else {
                    // Descending into a literal or env override dead-ends.
                    return None;
                };
                node = children.get(segment)?;
            }
        }
        self.materialize(node, criteria)
    }

    /// Materialize a subtree into a plain JSON value, resolving nested
    /// filters and env overrides along the way.
    fn materialize(&self, node: &Node, criteria: &Criteria) -> Option<Value> {
        match select(node, criteria)? {
            Node::Value(value) => Some(value.clone()),
            Node::EnvOverride(env) => self
                .env
                .get(env.var())
                .map(|value| Value::String(value.to_string()))
                .or_else(|| env.fallback().cloned()),
            Node::Mapping(children) => {
                let mut object = serde_json::Map::new();
                for (key, child) in children {
                    // Children that resolve to absence are omitted, not nulled.
                    if let Some(value) = self.materialize(child, criteria) {
                        object.insert(key.clone(), value);
                    }
                }
                Some(Value::Object(object))
            }
            // select never yields a filter
            Node::Filter(_) => None,
        }
    }
}

/// Unwrap nested filter nodes until a concrete node is reached.
fn select<'a>(mut node: &'a Node, criteria: &Criteria) -> Option<&'a Node> {
    loop {
        match node {
            Node::Filter(filter) => {
                node = filter.select(criteria.get(filter.criterion()))?;
            }
            other => return Some(other),
        }
    }
}
