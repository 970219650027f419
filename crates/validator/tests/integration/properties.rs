//! Observable guarantees of flat validation.

use pretty_assertions::assert_eq;
use rulecraft_validator::prelude::*;
use serde_json::json;

use crate::data;

// ============================================================================
// OPTIONAL AND REQUIRED FIELDS
// ============================================================================

#[test]
fn absent_optional_field_passes_whatever_its_rules() {
    let mut v = Validator::new();
    v.add_field("field", "numeric|between:18,120|email", None)
        .unwrap();

    assert!(v.is_valid(&data(json!({})), None));
    assert!(v.is_valid(&data(json!({ "field": null })), None));
    assert!(v.is_valid(&data(json!({ "field": "" })), None));
    assert!(v.errors().is_empty());
}

#[test]
fn empty_required_field_reports_only_required() {
    let mut v = Validator::new();
    v.add_field("field", "required|numeric|between:18,120", None)
        .unwrap();

    assert!(!v.is_valid(&data(json!({ "field": "" })), None));
    assert_eq!(
        v.errors().to_json(),
        json!({ "field": { "required": "value required" } })
    );
}

#[test]
fn required_declared_last_still_runs_first() {
    let mut v = Validator::new();
    v.add_field("field", "numeric|between:18,120|required", None)
        .unwrap();

    assert!(!v.is_valid(&data(json!({})), None));
    assert_eq!(
        v.errors().to_json(),
        json!({ "field": { "required": "value required" } })
    );
}

// ============================================================================
// ERROR ACCUMULATION
// ============================================================================

#[test]
fn every_violated_rule_is_listed() {
    let mut v = Validator::new();
    v.add_field("field", "numeric|between:18,120", None).unwrap();

    assert!(!v.is_valid(&data(json!({ "field": "a" })), None));
    assert_eq!(
        v.errors().to_json(),
        json!({
            "field": {
                "numeric": "only digits allowed",
                "between": "must be between 18 and 120"
            }
        })
    );
}

#[test]
fn field_message_collapses_failures_into_wildcard() {
    let mut v = Validator::new();
    v.add_field("field", "numeric|between:18,120", Some("enter an age"))
        .unwrap();

    assert!(!v.is_valid(&data(json!({ "field": "a" })), None));
    assert_eq!(
        v.errors().to_json(),
        json!({ "field": { "*": "enter an age" } })
    );
}

#[test]
fn undeclared_keys_are_ignored() {
    let mut v = Validator::new();
    v.add_field("name", "required", None).unwrap();
    assert!(v.is_valid(&data(json!({ "name": "x", "extra": [1, 2] })), None));
}

// ============================================================================
// IDEMPOTENCE
// ============================================================================

#[test]
fn repeated_calls_replace_the_tree() {
    let mut v = Validator::new();
    v.add_field("name", "required|alpha", None).unwrap();
    v.add_field("age", "numeric", None).unwrap();

    let valid = data(json!({ "name": "Ada", "age": 36 }));
    assert!(v.is_valid(&valid, None));
    assert!(v.is_valid(&valid, None));
    assert!(v.errors().is_empty());

    assert!(!v.is_valid(&data(json!({ "name": "Ada1" })), None));
    assert_eq!(
        v.errors().to_json(),
        json!({ "name": { "alpha": "only alphabetic characters allowed" } })
    );

    assert!(!v.is_valid(&data(json!({ "name": "Ada", "age": "x" })), None));
    assert_eq!(
        v.errors().to_json(),
        json!({ "age": { "numeric": "only digits allowed" } })
    );
}

// ============================================================================
// TRANSLATION
// ============================================================================

#[test]
fn translator_sees_templates_before_params_are_filled() {
    let mut v = Validator::new();
    v.add_field("age", "required|between:18,120", None).unwrap();

    let seen = std::cell::RefCell::new(Vec::new());
    let translate = |m: &str| {
        seen.borrow_mut().push(m.to_owned());
        m.to_uppercase()
    };

    assert!(!v.is_valid(&data(json!({ "age": 5 })), Some(&translate)));
    assert_eq!(
        v.errors().to_json(),
        json!({ "age": { "between": "MUST BE BETWEEN 18 AND 120" } })
    );
    assert_eq!(seen.into_inner(), vec!["must be between {0} and {1}"]);
}
