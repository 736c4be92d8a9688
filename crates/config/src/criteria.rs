//! Runtime criteria used to select configuration branches.
//!
//! Responsibilities:
//! - Hold the flat criteria map consulted by filter nodes.
//! - Seed the map once from the process environment.
//!
//! Does NOT handle:
//! - Branch selection itself (see store.rs).
//!
//! Invariants:
//! - Criteria are captured once and never re-read after construction.
//! - An unset environment variable leaves its criteria key absent, which
//!   sends filters on that key to their fallback branch.

use std::collections::BTreeMap;

use crate::env::env_var_or_none;

/// Criteria key selecting per-environment branches.
pub const CRITERION_ENV: &str = "env";

/// Criteria key selecting continuous-integration branches.
pub const CRITERION_CI: &str = "ci";

/// Environment variable seeding [`CRITERION_ENV`].
pub const ENV_VAR_ENVIRONMENT: &str = "SHIELD_ENV";

/// Environment variable seeding [`CRITERION_CI`].
pub const ENV_VAR_CI: &str = "CI";

/// Flat mapping from criteria-key name to a runtime-determined value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Criteria {
    values: BTreeMap<String, String>,
}

impl Criteria {
    /// Create an empty criteria set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed criteria from the process environment.
    ///
    /// Reads `SHIELD_ENV` and `CI` exactly once; empty and whitespace-only
    /// values count as unset.
    pub fn from_process_env() -> Self {
        let mut criteria = Self::new();
        if let Some(env) = env_var_or_none(ENV_VAR_ENVIRONMENT) {
            criteria = criteria.with(CRITERION_ENV, env);
        }
        if let Some(ci) = env_var_or_none(ENV_VAR_CI) {
            criteria = criteria.with(CRITERION_CI, ci);
        }
        tracing::debug!(
            env = criteria.get(CRITERION_ENV).unwrap_or("<unset>"),
            ci = criteria.get(CRITERION_CI).is_some(),
            "configuration criteria captured"
        );
        criteria
    }

    /// Set a criteria value.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Look up a criteria value.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}
