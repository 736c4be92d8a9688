//! Environment variable plumbing for configuration.
//!
//! Responsibilities:
//! - Read environment variables with empty/whitespace filtering.
//! - Capture an immutable snapshot of the variables a document references.
//! - Load `.env` files behind the `DOTENV_DISABLED` gate.
//!
//! Does NOT handle:
//! - Criteria derivation (see criteria.rs).
//! - Document resolution (see store.rs).
//!
//! Invariants:
//! - Empty or whitespace-only environment variables are treated as unset.
//! - Returned values are trimmed (leading/trailing whitespace removed).
//! - A snapshot is read once and never refreshed; resolution after capture
//!   is independent of the live process environment.

use std::collections::BTreeMap;

use crate::error::ConfigError;

/// Read an environment variable, returning None if unset, empty, or whitespace-only.
/// Returns the trimmed value if present.
pub fn env_var_or_none(key: &str) -> Option<String> {
    std::env::var(key).ok().and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.len() == s.len() {
            // Nothing was trimmed, keep the original allocation
            Some(s)
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// Immutable snapshot of the environment variables a document references.
///
/// Stores construct one at initialization; every later lookup resolves
/// against the snapshot rather than the live environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvSnapshot {
    values: BTreeMap<String, String>,
}

impl EnvSnapshot {
    /// Capture the named variables from the process environment.
    ///
    /// Variables that are unset, empty, or whitespace-only are omitted from
    /// the snapshot.
    pub fn capture<'a>(vars: impl IntoIterator<Item = &'a str>) -> Self {
        let mut values = BTreeMap::new();
        for var in vars {
            if let Some(value) = env_var_or_none(var) {
                values.insert(var.to_string(), value);
            }
        }
        tracing::debug!(count = values.len(), "environment snapshot captured");
        Self { values }
    }

    /// Build a snapshot from explicit pairs (primarily for testing).
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            values: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Look up a captured variable.
    pub fn get(&self, var: &str) -> Option<&str> {
        self.values.get(var).map(String::as_str)
    }

    /// Whether the snapshot captured no variables.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of captured variables.
    pub fn len(&self) -> usize {
        self.values.len()
    }
}

/// Check if dotenv loading is disabled via environment variable.
fn dotenv_disabled() -> bool {
    matches!(
        std::env::var("DOTENV_DISABLED").ok().as_deref(),
        Some("true") | Some("1")
    )
}

/// Load environment variables from a `.env` file if present.
///
/// Call this before the settings singleton is first touched so `.env`
/// values are visible to the criteria and snapshot capture. If the
/// `DOTENV_DISABLED` environment variable is set to "true" or "1", the
/// `.env` file is not loaded (useful for testing).
///
/// # Errors
///
/// Returns an error if:
/// - The `.env` file exists but has invalid syntax (`ConfigError::DotenvParse`)
/// - The `.env` file exists but cannot be read due to I/O errors (`ConfigError::DotenvIo`)
///
/// Missing `.env` files are silently ignored.
///
/// SAFETY: Error messages never include raw .env line contents to prevent
/// secret leakage.
pub fn load_dotenv() -> Result<(), ConfigError> {
    if dotenv_disabled() {
        return Ok(());
    }

    match dotenvy::dotenv() {
        Ok(_) => Ok(()),
        Err(e) if is_not_found(&e) => Ok(()),
        Err(dotenvy::Error::LineParse(_, idx)) => Err(ConfigError::DotenvParse { error_index: idx }),
        Err(dotenvy::Error::Io(io_err)) => Err(ConfigError::DotenvIo {
            kind: io_err.kind(),
        }),
        Err(_) => Err(ConfigError::DotenvUnknown),
    }
}

/// Check if a dotenv error indicates the file was not found.
fn is_not_found(err: &dotenvy::Error) -> bool {
    matches!(
        err,
        dotenvy::Error::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound
    )
}
