//! Tests for node builders and subtree inspection.

use serde_json::{Value, json};

use crate::document::{FilterNode, Node};

#[test]
fn mapping_builder_collects_entries() {
    let node = Node::mapping([("a", Node::from(1i64)), ("b", Node::from("two"))]);

    let Node::Mapping(children) = node else {
        panic!("expected a mapping");
    };
    assert_eq!(children.len(), 2);
    assert_eq!(children.get("a"), Some(&Node::Value(json!(1))));
    assert_eq!(children.get("b"), Some(&Node::Value(json!("two"))));
}

#[test]
fn filter_builder_records_branches_and_fallback() {
    let filter = FilterNode::on("env")
        .branch("test", "t")
        .branch("production", "p")
        .fallback("d");

    assert_eq!(filter.criterion(), "env");

    let node = Node::from(filter);
    let Node::Filter(filter) = node else {
        panic!("expected a filter");
    };
    assert_eq!(
        filter.select(Some("test")),
        Some(&Node::Value(json!("t")))
    );
    assert_eq!(
        filter.select(Some("staging")),
        Some(&Node::Value(json!("d")))
    );
    assert_eq!(filter.select(None), Some(&Node::Value(json!("d"))));
}

#[test]
fn filter_without_fallback_selects_nothing_on_miss() {
    let filter = FilterNode::on("env").branch("test", "t");
    assert_eq!(filter.select(Some("dev")), None);
    assert_eq!(filter.select(None), None);
}

#[test]
fn env_override_builders_carry_var_and_fallback() {
    let Node::EnvOverride(bare) = Node::env_var("PORT") else {
        panic!("expected an env override");
    };
    assert_eq!(bare.var(), "PORT");
    assert_eq!(bare.fallback(), None);

    let Node::EnvOverride(defaulted) = Node::env_var_or("PORT", 8000i64) else {
        panic!("expected an env override");
    };
    assert_eq!(defaulted.fallback(), Some(&Value::from(8000)));
}

#[test]
fn env_vars_walks_every_variant_and_dedups() {
    let doc = Node::mapping([
        ("a", Node::env_var("SHARED")),
        (
            "b",
            Node::from(
                FilterNode::on("env")
                    .branch("test", Node::env_var("SHARED"))
                    .fallback(Node::env_var("FALLBACK_ONLY")),
            ),
        ),
        ("c", Node::mapping([("d", Node::env_var_or("NESTED", "x"))])),
        ("e", Node::from("literal")),
    ]);

    assert_eq!(doc.env_vars(), vec!["FALLBACK_ONLY", "NESTED", "SHARED"]);
}
