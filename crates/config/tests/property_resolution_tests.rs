//! Property-based tests for document resolution.
//!
//! These verify structural properties of the resolution algorithm with
//! randomly generated documents and criteria, catching edge cases unit
//! tests miss.
//!
//! Test coverage:
//! - A declared path always resolves to exactly the value placed there.
//! - Wrapping a document in a filter whose branch matches the criteria is
//!   invisible to resolution.
//! - Arbitrary criteria values never break the application document's
//!   fallback behavior.

use proptest::prelude::*;
use serde_json::Value;

use shield_config::{
    AppSettings, CRITERION_ENV, Criteria, EnvSnapshot, FilterNode, Node, Store,
    application_document,
};

/// Strategy for generating scalar leaf values.
fn leaf_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<bool>().prop_map(Value::from),
        any::<i32>().prop_map(|n| Value::from(i64::from(n))),
        "[a-z0-9]{0,12}".prop_map(Value::from),
    ]
}

/// Strategy for generating path segments and criteria tokens.
fn token_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,8}".prop_map(String::from)
}

/// Nest a leaf under the given path segments, innermost last.
fn nest(segments: &[String], leaf: Value) -> Node {
    let mut node = Node::from(leaf);
    for segment in segments.iter().rev() {
        node = Node::mapping([(segment.clone(), node)]);
    }
    node
}

proptest! {
    #[test]
    fn declared_paths_resolve_to_their_values(
        segments in prop::collection::vec(token_strategy(), 1..4),
        leaf in leaf_strategy(),
    ) {
        let store = Store::with_env(nest(&segments, leaf.clone()), EnvSnapshot::default());
        let path = segments.join(".");
        prop_assert_eq!(store.get(&path, &Criteria::new()), Some(leaf));
    }

    #[test]
    fn undeclared_siblings_resolve_to_none(
        segments in prop::collection::vec(token_strategy(), 1..4),
        leaf in leaf_strategy(),
        missing in token_strategy(),
    ) {
        prop_assume!(missing != segments[0]);
        let store = Store::with_env(nest(&segments, leaf), EnvSnapshot::default());
        prop_assert_eq!(store.get(&missing, &Criteria::new()), None);
    }

    #[test]
    fn matching_filter_wrapping_is_transparent(
        segments in prop::collection::vec(token_strategy(), 1..4),
        leaf in leaf_strategy(),
        criterion in token_strategy(),
        chosen in token_strategy(),
    ) {
        let plain = nest(&segments, leaf);
        let wrapped = Node::from(
            FilterNode::on(criterion.clone()).branch(chosen.clone(), plain.clone()),
        );

        let criteria = Criteria::new().with(criterion, chosen);
        let path = segments.join(".");

        let plain_store = Store::with_env(plain, EnvSnapshot::default());
        let wrapped_store = Store::with_env(wrapped, EnvSnapshot::default());
        prop_assert_eq!(
            wrapped_store.get(&path, &criteria),
            plain_store.get(&path, &criteria)
        );
    }

    #[test]
    fn unknown_environment_values_fall_back(env_value in "[a-z]{1,12}") {
        let settings = AppSettings::with_parts(
            application_document(),
            Criteria::new().with(CRITERION_ENV, env_value.clone()),
            EnvSnapshot::default(),
        );

        let resolved = settings.get("env").expect("'env' always has a fallback");
        let name = resolved.as_str().expect("'env' resolves to a string");
        if ["production", "integration", "test"].contains(&env_value.as_str()) {
            prop_assert_eq!(name, env_value.as_str());
        } else {
            prop_assert_eq!(name, "dev");
        }
    }

    #[test]
    fn resolution_is_idempotent_over_the_application_document(
        env_value in "[a-z]{1,12}",
        ci_value in prop::option::of("[a-z]{1,8}"),
    ) {
        let mut criteria = Criteria::new().with(CRITERION_ENV, env_value);
        if let Some(ci) = ci_value {
            criteria = criteria.with("ci", ci);
        }
        let settings = AppSettings::with_parts(
            application_document(),
            criteria,
            EnvSnapshot::from_pairs([("PORT", "3000")]),
        );

        for path in ["env", "port.web", "postgres", "new_relic", ""] {
            prop_assert_eq!(settings.get(path), settings.get(path), "path '{}'", path);
        }
    }
}
