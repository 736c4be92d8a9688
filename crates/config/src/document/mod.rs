//! The filterable configuration document.
//!
//! Responsibilities:
//! - Model the document as a tagged variant tree (`Node`).
//! - Provide infallible typed builders for authoring documents in code.
//! - Interpret the `$filter` / `$default` / `$env` JSON shape.
//!
//! Does NOT handle:
//! - Resolution against criteria (see store.rs).
//! - Environment snapshot capture (see env.rs).
//!
//! Invariants:
//! - A document is immutable once handed to a store.
//! - Builders cannot fail; only JSON interpretation can reject input.

mod node;
mod parse;

pub use node::{EnvOverride, FilterNode, Node};
pub use parse::DocumentError;

#[cfg(test)]
mod tests;
