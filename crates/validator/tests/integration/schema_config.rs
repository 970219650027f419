//! Loading validators from serialized configuration.

use pretty_assertions::assert_eq;
use rulecraft_validator::prelude::*;
use rulecraft_validator::registry;
use serde_json::json;

use crate::data;

#[test]
fn json_config_builds_a_validator() {
    let config: ValidatorConfig = serde_json::from_value(json!({
        "fields": {
            "name": { "rules": "minlen:3", "required": true, "message": "name please" },
            "age": { "numeric": null, "between": [18, 120] },
            "ip": "ipv4"
        }
    }))
    .unwrap();

    let mut v = Validator::from_config(config, registry::global()).unwrap();
    assert!(!v.is_valid(
        &data(json!({ "age": "150", "ip": "10.0.0.256" })),
        None
    ));
    assert_eq!(
        v.errors().to_json(),
        json!({
            "name": { "*": "name please" },
            "age": { "between": "must be between 18 and 120" },
            "ip": { "ipv4": "invalid IPv4 address" }
        })
    );
}

#[test]
fn unknown_rules_fail_loading() {
    let config: ValidatorConfig =
        serde_json::from_value(json!({ "fields": { "zip": "postcode" } })).unwrap();
    let err = Validator::from_config(config, registry::global()).unwrap_err();
    assert_eq!(err, SchemaError::UnknownRule { name: "postcode".into() });
}
