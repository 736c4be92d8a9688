//! Typed views over resolved configuration values.
//!
//! Downstream components (web server, database layer, telemetry agent,
//! request validators) consume these instead of poking at raw JSON. They
//! are built by the accessors on [`crate::AppSettings`].

use std::fmt;

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

/// Module for deserializing optional secrets from document values.
mod opt_secret_string {
    use secrecy::SecretString;
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<SecretString>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<String>::deserialize(deserializer)?;
        Ok(value.map(|s| SecretString::new(s.into())))
    }
}

/// Deployment environment resolved from the `env` key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Environment {
    Production,
    Integration,
    Test,
    /// Anything unrecognized falls back here, matching the document's
    /// fallback branch.
    #[default]
    Dev,
}

impl Environment {
    /// Parse the document's `env` string, defaulting to `Dev` for anything
    /// unrecognized.
    pub fn from_name(name: &str) -> Self {
        match name {
            "production" => Self::Production,
            "integration" => Self::Integration,
            "test" => Self::Test,
            _ => Self::Dev,
        }
    }

    /// The string form used by the document and criteria.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Production => "production",
            Self::Integration => "integration",
            Self::Test => "test",
            Self::Dev => "dev",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Database connection settings resolved from the `postgres` key.
#[derive(Debug, Clone, Deserialize)]
pub struct PostgresSettings {
    /// Connection URI, validated as an absolute postgres URL with a host.
    pub uri: String,
    /// Driver options passed through to the database layer.
    #[serde(default)]
    pub options: serde_json::Map<String, serde_json::Value>,
}

/// Migrations directory resolved from the `typeormDir` key.
#[derive(Debug, Clone, Deserialize)]
pub struct MigrationsSettings {
    /// Directory the migration runner scans.
    pub dir: String,
}

/// Environment naming resolved from the `environment` key.
#[derive(Debug, Clone, Deserialize)]
pub struct EnvironmentNaming {
    /// Human-facing environment name.
    pub name: String,
    /// Short prefix applied to generated identifiers.
    pub prefix: String,
}

/// New Relic agent settings resolved from the `new_relic` key.
///
/// The license key is held as a [`SecretString`] so it never appears in
/// `Debug` output or logs.
#[derive(Debug, Clone, Deserialize)]
pub struct TelemetrySettings {
    /// Application name reported to the agent.
    #[serde(rename = "APP_NAME", default)]
    pub app_name: Option<String>,
    /// License key.
    #[serde(
        rename = "KEY",
        default,
        deserialize_with = "opt_secret_string::deserialize"
    )]
    pub key: Option<SecretString>,
    /// String flag carried as-is from the document.
    #[serde(default)]
    pub enabled: Option<String>,
}

impl TelemetrySettings {
    /// Whether the agent should start.
    pub fn is_enabled(&self) -> bool {
        matches!(self.enabled.as_deref(), Some("true") | Some("1"))
    }
}

/// Options handed to the request/schema validator.
///
/// These are exposed as data; validation itself happens downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationOptions {
    /// Abort after the last validation error instead of the first.
    pub abort_early: bool,
    /// Remove unknown keys from the validated data.
    pub strip_unknown: bool,
}
