//! Centralized defaults for the Shield configuration document.
//!
//! This module contains the literal values the document falls back to so
//! they are not duplicated between the document and its tests.

// =============================================================================
// Web Server Defaults
// =============================================================================

/// Default web port when `PORT` is not set outside production.
pub const DEFAULT_WEB_PORT: u16 = 8000;

/// Web port pinned under the test environment.
pub const TEST_WEB_PORT: u16 = 9000;

// =============================================================================
// Database Defaults
// =============================================================================

/// Connection URI for the database used by tests and CI.
pub const TEST_POSTGRES_URI: &str = "postgresql://shield_test@localhost:4322/shield_test";

// =============================================================================
// Environment Naming Defaults
// =============================================================================

/// Default human-facing environment name.
pub const DEFAULT_ENVIRONMENT_NAME: &str = "local";

/// Default prefix applied to generated identifiers.
pub const DEFAULT_ENVIRONMENT_PREFIX: &str = "g";

/// Identifier prefix pinned under the test environment.
pub const TEST_ENVIRONMENT_PREFIX: &str = "t";
