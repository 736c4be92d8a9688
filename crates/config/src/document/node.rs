//! Tagged variant tree for configuration documents.
//!
//! Responsibilities:
//! - Define the node variants resolution is exhaustively matched over.
//! - Provide builder constructors for authoring documents in code.
//!
//! Invariants:
//! - There is no untyped escape hatch; every document shape is one of the
//!   four variants.

use std::collections::BTreeMap;

use serde_json::Value;

/// A node in a configuration document.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// A literal value (string, number, boolean, array, or object).
    Value(Value),
    /// A plain nested mapping.
    Mapping(BTreeMap<String, Node>),
    /// A branch point selected by a criteria value.
    Filter(FilterNode),
    /// A value sourced from an environment variable at snapshot time.
    EnvOverride(EnvOverride),
}

/// A document node that branches on a criteria value.
///
/// Holds zero or more branches keyed by the expected criteria value and an
/// optional fallback subtree used when no branch matches.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterNode {
    criterion: String,
    branches: BTreeMap<String, Node>,
    fallback: Option<Box<Node>>,
}

/// A document node resolving to an environment variable's value or a
/// fallback literal.
#[derive(Debug, Clone, PartialEq)]
pub struct EnvOverride {
    var: String,
    fallback: Option<Value>,
}

impl Node {
    /// Build a mapping node from key/node pairs.
    pub fn mapping<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<Node>,
    {
        Self::Mapping(
            entries
                .into_iter()
                .map(|(key, node)| (key.into(), node.into()))
                .collect(),
        )
    }

    /// Build an environment-override node with no fallback.
    pub fn env_var(var: impl Into<String>) -> Self {
        Self::EnvOverride(EnvOverride {
            var: var.into(),
            fallback: None,
        })
    }

    /// Build an environment-override node with a fallback literal.
    pub fn env_var_or(var: impl Into<String>, fallback: impl Into<Value>) -> Self {
        Self::EnvOverride(EnvOverride {
            var: var.into(),
            fallback: Some(fallback.into()),
        })
    }

    /// Names of all environment variables referenced by this subtree,
    /// deduplicated.
    pub fn env_vars(&self) -> Vec<&str> {
        let mut vars = Vec::new();
        self.collect_env_vars(&mut vars);
        vars.sort_unstable();
        vars.dedup();
        vars
    }

    fn collect_env_vars<'a>(&'a self, vars: &mut Vec<&'a str>) {
        match self {
            Node::Value(_) => {}
            Node::Mapping(children) => {
                for child in children.values() {
                    child.collect_env_vars(vars);
                }
            }
            Node::Filter(filter) => {
                for branch in filter.branches.values() {
                    branch.collect_env_vars(vars);
                }
                if let Some(fallback) = &filter.fallback {
                    fallback.collect_env_vars(vars);
                }
            }
            Node::EnvOverride(env) => vars.push(&env.var),
        }
    }
}

impl FilterNode {
    /// Start a filter branching on the named criteria key.
    pub fn on(criterion: impl Into<String>) -> Self {
        Self {
            criterion: criterion.into(),
            branches: BTreeMap::new(),
            fallback: None,
        }
    }

    /// Add a branch selected when the criteria value equals `value`.
    pub fn branch(mut self, value: impl Into<String>, node: impl Into<Node>) -> Self {
        self.branches.insert(value.into(), node.into());
        self
    }

    /// Set the subtree used when no branch matches.
    pub fn fallback(mut self, node: impl Into<Node>) -> Self {
        self.fallback = Some(Box::new(node.into()));
        self
    }

    /// The criteria key this filter branches on.
    pub fn criterion(&self) -> &str {
        &self.criterion
    }

    /// Select the branch for a criteria value, falling back to the fallback
    /// subtree. `None` when neither exists.
    pub(crate) fn select(&self, criteria_value: Option<&str>) -> Option<&Node> {
        criteria_value
            .and_then(|value| self.branches.get(value))
            .or(self.fallback.as_deref())
    }
}

impl EnvOverride {
    /// The environment variable this node reads.
    pub fn var(&self) -> &str {
        &self.var
    }

    /// The fallback literal used when the variable is unset.
    pub fn fallback(&self) -> Option<&Value> {
        self.fallback.as_ref()
    }
}

impl From<FilterNode> for Node {
    fn from(filter: FilterNode) -> Self {
        Self::Filter(filter)
    }
}

impl From<EnvOverride> for Node {
    fn from(env: EnvOverride) -> Self {
        Self::EnvOverride(env)
    }
}

impl From<Value> for Node {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

impl From<&str> for Node {
    fn from(value: &str) -> Self {
        Self::Value(Value::from(value))
    }
}

impl From<String> for Node {
    fn from(value: String) -> Self {
        Self::Value(Value::from(value))
    }
}

impl From<bool> for Node {
    fn from(value: bool) -> Self {
        Self::Value(Value::from(value))
    }
}

impl From<i64> for Node {
    fn from(value: i64) -> Self {
        Self::Value(Value::from(value))
    }
}

impl From<u16> for Node {
    fn from(value: u16) -> Self {
        Self::Value(Value::from(value))
    }
}
