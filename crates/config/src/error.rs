//! Error types for configuration handling.
//!
//! Responsibilities:
//! - Define error variants for document interpretation, typed views, and
//!   `.env` loading.
//!
//! Does NOT handle:
//! - Resolution failures: a missing path resolves to `None`, never an error
//!   (see store.rs).
//!
//! Invariants:
//! - Every variant carries the offending key or position for debugging.
//! - Dotenv errors NEVER include raw .env line contents to prevent secret
//!   leakage.

use std::io::ErrorKind;

use thiserror::Error;

use crate::document::DocumentError;

/// Errors surfaced by typed accessors and environment loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A typed accessor found no value at its key.
    #[error("missing configuration value at '{key}'")]
    MissingValue { key: String },

    /// A resolved value did not match the shape a typed accessor expects.
    #[error("invalid configuration value at '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// A hand-authored JSON document was malformed.
    #[error(transparent)]
    Document(#[from] DocumentError),

    /// Failed to parse the `.env` file due to invalid syntax.
    ///
    /// SAFETY: only the byte index of the parse failure is reported, NOT
    /// the offending line content.
    #[error(
        "failed to parse .env file at position {error_index}. Hint: set DOTENV_DISABLED=1 to skip .env loading"
    )]
    DotenvParse { error_index: usize },

    /// Failed to read the `.env` file due to an I/O error.
    #[error("failed to read .env file: {kind}")]
    DotenvIo { kind: ErrorKind },

    /// Unknown dotenv error (future variants from the dotenvy crate).
    #[error("failed to load .env file. Hint: set DOTENV_DISABLED=1 to skip .env loading")]
    DotenvUnknown,
}
