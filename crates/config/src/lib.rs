//! Configuration store for the Shield service.
//!
//! This crate holds the static, filterable configuration document, the
//! runtime criteria captured from the process environment, and the
//! process-wide accessor the rest of the service reads settings through.

pub mod constants;
mod criteria;
mod document;
mod env;
mod error;
mod settings;
mod store;
pub mod types;

pub use criteria::{CRITERION_CI, CRITERION_ENV, Criteria, ENV_VAR_CI, ENV_VAR_ENVIRONMENT};
pub use document::{DocumentError, EnvOverride, FilterNode, Node};
pub use env::{EnvSnapshot, env_var_or_none, load_dotenv};
pub use error::ConfigError;
pub use settings::{AppSettings, application_document, get, settings};
pub use store::Store;
