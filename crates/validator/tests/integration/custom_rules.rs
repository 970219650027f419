//! Registering rule units beyond the builtin catalogue.

use std::sync::Arc;

use pretty_assertions::assert_eq;
use rulecraft_validator::foundation::expect_parsed;
use rulecraft_validator::prelude::*;
use rulecraft_validator::rule;
use serde_json::json;

use crate::data;

rule! {
    /// Passes for even integers.
    pub Even as "even";
    message "must be even";
    rule(value, params) { value.as_i64().is_some_and(|n| n % 2 == 0) }
}

rule! {
    /// Passes for multiples of the parameter.
    pub MultipleOf as "multiple_of";
    message "must be a multiple of {0}";
    params(params) {
        let divisor = expect_parsed::<i64>(params, 1)?;
        if divisor[0] == 0 {
            return Err("divisor must not be zero".to_owned());
        }
        Ok(())
    }
    rule(value, params) {
        let divisor: i64 = params[0].parse().unwrap_or(1);
        value.as_i64().is_some_and(|n| n % divisor == 0)
    }
}

fn registry() -> Arc<RuleRegistry> {
    let mut registry = RuleRegistry::with_builtins();
    registry
        .register(Even::NAME, Arc::new(Even))
        .unwrap()
        .register(MultipleOf::NAME, Arc::new(MultipleOf))
        .unwrap();
    Arc::new(registry)
}

#[test]
fn custom_rules_join_builtin_chains() {
    let mut v = Validator::with_registry(registry());
    v.add_field("count", "required|even|multiple_of:3", None)
        .unwrap();

    assert!(v.is_valid(&data(json!({ "count": 12 })), None));
    assert!(!v.is_valid(&data(json!({ "count": 9 })), None));
    assert_eq!(
        v.errors().to_json(),
        json!({ "count": { "even": "must be even" } })
    );
}

#[test]
fn parameter_contracts_run_at_declaration() {
    let mut v = Validator::with_registry(registry());
    let err = v.add_field("count", "multiple_of:0", None).unwrap_err();
    assert_eq!(
        err,
        SchemaError::RuleSyntax {
            segment: "multiple_of:0".into(),
            reason: "divisor must not be zero".into(),
        }
    );
}

#[test]
fn duplicate_names_are_rejected() {
    let mut registry = RuleRegistry::with_builtins();
    let err = registry.register("email", Arc::new(Even)).unwrap_err();
    assert_eq!(err.code(), "RULE_DUPLICATE");
}

#[test]
fn per_rule_messages_from_map_form() {
    let mut v = Validator::with_registry(registry());
    v.add_field(
        "count",
        vec![
            ("even", json!({ "message": "pairs only" })),
            ("multiple_of", json!({ "params": 5, "message": "steps of {0}" })),
        ],
        None,
    )
    .unwrap();

    assert!(!v.is_valid(&data(json!({ "count": 7 })), None));
    assert_eq!(
        v.errors().to_json(),
        json!({ "count": { "even": "pairs only", "multiple_of": "steps of 5" } })
    );
}
