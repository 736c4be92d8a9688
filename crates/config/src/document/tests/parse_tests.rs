//! Tests for JSON document interpretation.

use serde_json::json;

use crate::document::{DocumentError, FilterNode, Node};

#[test]
fn scalars_and_arrays_become_literals() {
    assert_eq!(
        Node::from_value(&json!("text")).unwrap(),
        Node::Value(json!("text"))
    );
    assert_eq!(
        Node::from_value(&json!([1, 2])).unwrap(),
        Node::Value(json!([1, 2]))
    );
}

#[test]
fn plain_objects_become_mappings() {
    let node = Node::from_value(&json!({ "a": { "b": 1 } })).unwrap();
    assert_eq!(
        node,
        Node::mapping([("a", Node::mapping([("b", Node::from(1i64))]))])
    );
}

#[test]
fn meta_fields_are_dropped() {
    let node = Node::from_value(&json!({
        "$meta": "App configuration",
        "a": 1
    }))
    .unwrap();
    assert_eq!(node, Node::mapping([("a", Node::from(1i64))]));
}

#[test]
fn filter_objects_become_filter_nodes() {
    let node = Node::from_value(&json!({
        "$filter": "env",
        "test": "t",
        "$default": "d"
    }))
    .unwrap();

    assert_eq!(
        node,
        Node::from(FilterNode::on("env").branch("test", "t").fallback("d"))
    );
}

#[test]
fn env_objects_become_overrides() {
    assert_eq!(
        Node::from_value(&json!({ "$env": "PORT" })).unwrap(),
        Node::env_var("PORT")
    );
    assert_eq!(
        Node::from_value(&json!({ "$env": "PORT", "$default": 8000 })).unwrap(),
        Node::env_var_or("PORT", 8000i64)
    );
}

#[test]
fn non_string_filter_is_rejected_with_its_path() {
    let err = Node::from_value(&json!({ "db": { "$filter": 1, "x": 2 } })).unwrap_err();
    match err {
        DocumentError::FilterNotString { path } => assert_eq!(path, "db"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn non_string_env_is_rejected_with_its_path() {
    let err = Node::from_value(&json!({ "port": { "$env": true } })).unwrap_err();
    match err {
        DocumentError::EnvNotString { path } => assert_eq!(path, "port"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn env_nodes_reject_extra_fields() {
    let err = Node::from_value(&json!({ "$env": "PORT", "extra": 1 })).unwrap_err();
    match err {
        DocumentError::EnvUnexpectedField { path, field } => {
            assert_eq!(path, "");
            assert_eq!(field, "extra");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn json_and_builder_authored_documents_agree() {
    let from_json = Node::from_value(&json!({
        "$filter": "env",
        "test": {
            "$filter": "ci",
            "gitlab": { "uri": "ci-db" },
            "$default": { "uri": "local-db" }
        },
        "$default": {
            "uri": { "$env": "POSTGRES_HOST" },
            "options": {}
        }
    }))
    .unwrap();

    let from_builder = Node::from(
        FilterNode::on("env")
            .branch(
                "test",
                FilterNode::on("ci")
                    .branch("gitlab", Node::mapping([("uri", Node::from("ci-db"))]))
                    .fallback(Node::mapping([("uri", Node::from("local-db"))])),
            )
            .fallback(Node::mapping([
                ("uri", Node::env_var("POSTGRES_HOST")),
                (
                    "options",
                    Node::Mapping(std::collections::BTreeMap::new()),
                ),
            ])),
    );

    assert_eq!(from_json, from_builder);
}
