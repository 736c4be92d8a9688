//! Process-wide application settings for Shield.
//!
//! Responsibilities:
//! - Author the static configuration document.
//! - Bundle the store with the criteria captured at initialization.
//! - Expose the process-wide accessor and typed views.
//!
//! Does NOT handle:
//! - Resolution mechanics (see store.rs).
//! - `.env` loading; call [`crate::load_dotenv`] before first access so
//!   `.env` values are visible to the capture.
//!
//! Invariants:
//! - The singleton is built once on first access and never reconstructed.
//! - Criteria and environment snapshot reflect the process environment at
//!   that moment only; later mutations are invisible.

use std::sync::OnceLock;

use serde_json::Value;
use url::Url;

use crate::constants::{
    DEFAULT_ENVIRONMENT_NAME, DEFAULT_ENVIRONMENT_PREFIX, DEFAULT_WEB_PORT,
    TEST_ENVIRONMENT_PREFIX, TEST_POSTGRES_URI, TEST_WEB_PORT,
};
use crate::criteria::{CRITERION_CI, CRITERION_ENV, Criteria};
use crate::document::{FilterNode, Node};
use crate::env::EnvSnapshot;
use crate::error::ConfigError;
use crate::store::Store;
use crate::types::{
    Environment, EnvironmentNaming, MigrationsSettings, PostgresSettings, TelemetrySettings,
    ValidationOptions,
};

/// The static Shield configuration document.
///
/// Every key carries its per-environment variants; filters branch on the
/// `env` and `ci` criteria.
pub fn application_document() -> Node {
    Node::mapping([
        (
            "env",
            Node::from(
                FilterNode::on(CRITERION_ENV)
                    .branch("production", "production")
                    .branch("integration", "integration")
                    .branch("test", "test")
                    .fallback("dev"),
            ),
        ),
        (
            "port",
            Node::mapping([(
                "web",
                Node::from(
                    FilterNode::on(CRITERION_ENV)
                        .branch("test", TEST_WEB_PORT)
                        .branch("production", Node::env_var("PORT"))
                        .branch("integration", Node::env_var("PORT"))
                        .fallback(Node::env_var_or("PORT", DEFAULT_WEB_PORT)),
                ),
            )]),
        ),
        (
            "postgres",
            Node::from(
                FilterNode::on(CRITERION_ENV)
                    .branch(
                        "test",
                        FilterNode::on(CRITERION_CI)
                            .branch(
                                "gitlab",
                                Node::mapping([("uri", Node::from(TEST_POSTGRES_URI))]),
                            )
                            .fallback(Node::mapping([("uri", Node::from(TEST_POSTGRES_URI))])),
                    )
                    .fallback(Node::mapping([
                        ("uri", Node::env_var("POSTGRES_HOST")),
                        ("options", Node::from(Value::Object(serde_json::Map::new()))),
                    ])),
            ),
        ),
        (
            "typeormDir",
            Node::from(
                FilterNode::on(CRITERION_ENV)
                    .branch("test", Node::mapping([("dir", Node::from("."))]))
                    .fallback(Node::mapping([("dir", Node::from("./build"))])),
            ),
        ),
        (
            "environment",
            Node::from(
                FilterNode::on(CRITERION_ENV)
                    .branch(
                        "test",
                        Node::mapping([
                            ("name", Node::from(DEFAULT_ENVIRONMENT_NAME)),
                            ("prefix", Node::from(TEST_ENVIRONMENT_PREFIX)),
                        ]),
                    )
                    .fallback(Node::mapping([
                        (
                            "name",
                            Node::env_var_or("ENVIRONMENT_NAME", DEFAULT_ENVIRONMENT_NAME),
                        ),
                        (
                            "prefix",
                            Node::env_var_or("ENVIRONMENT_PREFIX", DEFAULT_ENVIRONMENT_PREFIX),
                        ),
                    ])),
            ),
        ),
        (
            "new_relic",
            Node::mapping([
                ("APP_NAME", Node::env_var("APP_NAME")),
                ("KEY", Node::env_var("NEW_RELIC_KEY")),
                (
                    "enabled",
                    Node::from(
                        FilterNode::on(CRITERION_ENV)
                            .branch("test", "false")
                            .fallback(Node::env_var_or("ENABLE_NEW_RELIC", "true")),
                    ),
                ),
            ]),
        ),
        (
            "validationOptions",
            Node::mapping([
                // abort after the last validation error
                ("abortEarly", Node::from(false)),
                // remove unknown keys from the validated data
                ("stripUnknown", Node::from(true)),
            ]),
        ),
    ])
}

/// Immutable bundle of the configuration store and the criteria captured
/// at initialization.
#[derive(Debug, Clone)]
pub struct AppSettings {
    store: Store,
    criteria: Criteria,
}

impl AppSettings {
    /// Build settings from the process environment.
    ///
    /// Criteria and the environment snapshot are read here and never again.
    pub fn from_process_env() -> Self {
        Self {
            store: Store::new(application_document()),
            criteria: Criteria::from_process_env(),
        }
    }

    /// Build settings from injected parts (primarily for testing).
    pub fn with_parts(document: Node, criteria: Criteria, env: EnvSnapshot) -> Self {
        Self {
            store: Store::with_env(document, env),
            criteria,
        }
    }

    /// Resolve a dot-delimited key against the captured criteria.
    ///
    /// Missing keys resolve to `None`; callers handle absence themselves.
    pub fn get(&self, key: &str) -> Option<Value> {
        self.store.get(key, &self.criteria)
    }

    /// The active deployment environment.
    pub fn environment(&self) -> Environment {
        match self.get("env") {
            Some(Value::String(name)) => Environment::from_name(&name),
            _ => Environment::Dev,
        }
    }

    /// The port the web server binds.
    ///
    /// Environment-sourced ports arrive as strings; both numeric and string
    /// forms are accepted.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is absent (e.g. `PORT` unset in
    /// production) or not a valid port number.
    pub fn web_port(&self) -> Result<u16, ConfigError> {
        const KEY: &str = "port.web";
        match self.get(KEY) {
            Some(Value::Number(number)) => number
                .as_u64()
                .and_then(|port| u16::try_from(port).ok())
                .ok_or_else(|| invalid(KEY, "port out of range")),
            Some(Value::String(raw)) => raw
                .parse::<u16>()
                .map_err(|_| invalid(KEY, "port must be a number")),
            Some(_) => Err(invalid(KEY, "port must be a number or numeric string")),
            None => Err(missing(KEY)),
        }
    }

    /// Database connection settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the subtree is absent, malformed, or its URI is
    /// not an absolute postgres URL with a host.
    pub fn postgres(&self) -> Result<PostgresSettings, ConfigError> {
        const KEY: &str = "postgres";
        let value = self.get(KEY).ok_or_else(|| missing(KEY))?;
        let settings: PostgresSettings =
            serde_json::from_value(value).map_err(|e| invalid(KEY, e.to_string()))?;
        validate_postgres_uri(&settings.uri)?;
        Ok(settings)
    }

    /// Directory the migration runner scans for migration files.
    ///
    /// # Errors
    ///
    /// Returns an error if the `typeormDir` subtree is absent or malformed.
    pub fn migrations(&self) -> Result<MigrationsSettings, ConfigError> {
        const KEY: &str = "typeormDir";
        let value = self.get(KEY).ok_or_else(|| missing(KEY))?;
        serde_json::from_value(value).map_err(|e| invalid(KEY, e.to_string()))
    }

    /// Environment naming used for generated identifiers.
    ///
    /// # Errors
    ///
    /// Returns an error if the `environment` subtree is absent or malformed.
    pub fn environment_naming(&self) -> Result<EnvironmentNaming, ConfigError> {
        const KEY: &str = "environment";
        let value = self.get(KEY).ok_or_else(|| missing(KEY))?;
        serde_json::from_value(value).map_err(|e| invalid(KEY, e.to_string()))
    }

    /// New Relic agent settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the `new_relic` subtree is absent or malformed.
    pub fn telemetry(&self) -> Result<TelemetrySettings, ConfigError> {
        const KEY: &str = "new_relic";
        let value = self.get(KEY).ok_or_else(|| missing(KEY))?;
        serde_json::from_value(value).map_err(|e| invalid(KEY, e.to_string()))
    }

    /// Options handed to the request/schema validator.
    ///
    /// # Errors
    ///
    /// Returns an error if the `validationOptions` subtree is absent or
    /// malformed.
    pub fn validation_options(&self) -> Result<ValidationOptions, ConfigError> {
        const KEY: &str = "validationOptions";
        let value = self.get(KEY).ok_or_else(|| missing(KEY))?;
        serde_json::from_value(value).map_err(|e| invalid(KEY, e.to_string()))
    }
}

fn missing(key: &str) -> ConfigError {
    ConfigError::MissingValue {
        key: key.to_string(),
    }
}

fn invalid(key: &str, message: impl Into<String>) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        message: message.into(),
    }
}

/// Validate a postgres connection URI: absolute URL, postgres/postgresql
/// scheme, host present.
fn validate_postgres_uri(raw: &str) -> Result<(), ConfigError> {
    const KEY: &str = "postgres.uri";

    let parsed = Url::parse(raw).map_err(|e| {
        invalid(
            KEY,
            format!("must be an absolute postgres URL (e.g. postgresql://user@localhost:5432/db): {e}"),
        )
    })?;

    let scheme = parsed.scheme();
    if scheme != "postgres" && scheme != "postgresql" {
        return Err(invalid(
            KEY,
            format!("scheme must be postgres or postgresql, got: {scheme}"),
        ));
    }

    if parsed.host_str().is_none() {
        return Err(invalid(KEY, "host is required"));
    }

    Ok(())
}

/// Process-wide settings, built once on first access.
static SETTINGS: OnceLock<AppSettings> = OnceLock::new();

/// The process-wide settings singleton.
///
/// Criteria and the environment snapshot are captured on first access and
/// never refreshed.
pub fn settings() -> &'static AppSettings {
    SETTINGS.get_or_init(AppSettings::from_process_env)
}

/// Resolve a configuration key against the process-wide settings.
///
/// This is the accessor the rest of the service reads through. Missing
/// keys resolve to `None`.
pub fn get(key: &str) -> Option<Value> {
    settings().get(key)
}
