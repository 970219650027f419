//! Nested records and recordsets.

use pretty_assertions::assert_eq;
use rulecraft_record::prelude::*;
use serde_json::json;

use crate::{data, device_schema};

fn address_schema() -> std::sync::Arc<RecordSchema> {
    RecordSchema::builder()
        .name("address")
        .field("street", "required|maxlen:128")
        .field("city", "required|alpha")
        .build()
        .unwrap()
}

fn user_schema() -> std::sync::Arc<RecordSchema> {
    RecordSchema::builder()
        .name("user")
        .field("name", "required|maxlen:128")
        .field("age", "numeric|between:18,120")
        .declare(Field::record("address", address_schema()).required())
        .recordset("devices", device_schema())
        .build()
        .unwrap()
}

#[test]
fn missing_required_record_reports_required() {
    let mut user = user_schema().record();
    assert!(!user.is_valid(&data(json!({ "name": "Ada" })), None));
    assert_eq!(
        user.errors().to_json(),
        json!({ "address": { "required": "value required" } })
    );
}

#[test]
fn nested_record_errors_sit_under_the_nested_key() {
    let mut user = user_schema().record();
    let input = json!({
        "name": "Ada",
        "address": { "street": "Main St 1", "city": "L0nd0n" }
    });
    assert!(!user.is_valid(&data(input), None));
    assert_eq!(
        user.errors().to_json(),
        json!({
            "address": { "_": { "city": { "alpha": "only alphabetic characters allowed" } } }
        })
    );
}

#[test]
fn recordset_errors_are_keyed_by_failing_index() {
    let mut user = user_schema().record();
    let input = json!({
        "name": "Ada",
        "address": { "street": "Main St 1", "city": "London" },
        "devices": [
            { "brand": "Apple", "ip_address": "10.0.0.1" },
            { "brand": "Dell", "ip_address": "10.0.0.2" },
            { "brand": "HP", "ip_address": "10.0.0.256" }
        ]
    });
    assert!(!user.is_valid(&data(input), None));
    assert_eq!(
        user.errors().to_json(),
        json!({
            "devices": { "_": { "2": { "ip_address": { "ipv4": "invalid IPv4 address" } } } }
        })
    );

    let flat = user.errors().flatten();
    assert_eq!(flat.len(), 1);
    assert_eq!(flat[0].path, "devices[2].ip_address");
    assert_eq!(
        user.errors().to_string(),
        "devices[2].ip_address (ipv4): invalid IPv4 address"
    );
}

#[test]
fn nested_checks_wait_for_scalar_fields() {
    let mut user = user_schema().record();
    let input = json!({
        "name": "",
        "address": { "street": "", "city": "" }
    });
    assert!(!user.is_valid(&data(input), None));
    assert_eq!(
        user.errors().to_json(),
        json!({ "name": { "required": "value required" } })
    );
}

#[test]
fn every_nested_failure_is_collected() {
    let mut user = user_schema().record();
    let input = json!({
        "name": "Ada",
        "address": { "street": "Main St 1" },
        "devices": [
            { "brand": "A", "ip_address": "10.0.0.1" },
            { "brand": "Dell", "ip_address": "10.0.0.2" },
            { "ip_address": "x" }
        ]
    });
    assert!(!user.is_valid(&data(input), None));
    assert_eq!(
        user.errors().to_json(),
        json!({
            "address": { "_": { "city": { "required": "value required" } } },
            "devices": { "_": {
                "0": { "brand": { "minlen": "minimum allowed length is 2" } },
                "2": {
                    "brand": { "required": "value required" },
                    "ip_address": { "ipv4": "invalid IPv4 address" }
                }
            } }
        })
    );
}

#[test]
fn valid_data_is_stored_with_nested_values() {
    let mut user = user_schema().record();
    let input = json!({
        "name": "Ada",
        "age": 36,
        "address": { "street": "Main St 1", "city": "London", "zip": "ignored" },
        "devices": [{ "brand": "Apple", "ip_address": "10.0.0.1" }],
        "unknown": true
    });
    assert!(user.is_valid(&data(input), None));
    assert!(user.errors().is_empty());
    assert_eq!(
        serde_json::Value::Object(user.data()),
        json!({
            "name": "Ada",
            "age": 36,
            "address": { "street": "Main St 1", "city": "London" },
            "devices": [{ "brand": "Apple", "ip_address": "10.0.0.1" }]
        })
    );
}

#[test]
fn revalidation_gives_the_same_outcome() {
    let mut user = user_schema().record();
    let input = data(json!({
        "name": "Ada",
        "address": { "street": "Main St 1", "city": "London" },
        "devices": [{ "brand": "Apple", "ip_address": "nope" }]
    }));

    assert!(!user.is_valid(&input, None));
    let first = user.errors().clone();
    assert!(!user.is_valid(&input, None));
    assert_eq!(user.errors(), &first);
}

#[test]
fn nesting_three_levels_deep() {
    let port = RecordSchema::builder()
        .field("number", "required|numeric|between:1,65535")
        .build()
        .unwrap();
    let device = RecordSchema::builder()
        .field("brand", "required")
        .recordset("ports", port)
        .build()
        .unwrap();
    let user = RecordSchema::builder()
        .field("name", "required")
        .recordset("devices", device)
        .build()
        .unwrap();

    let mut record = user.record();
    let input = json!({
        "name": "Ada",
        "devices": [
            { "brand": "Apple", "ports": [{ "number": 22 }] },
            { "brand": "Dell", "ports": [{ "number": 80 }, { "number": 70000 }] }
        ]
    });
    assert!(!record.is_valid(&data(input), None));
    assert_eq!(
        record.errors().flatten()[0].path,
        "devices[1].ports[1].number"
    );
}

#[test]
fn translator_reaches_nested_records() {
    let mut user = user_schema().record();
    let upper = |message: &str| message.to_uppercase();
    assert!(!user.is_valid(&data(json!({ "name": "Ada", "address": {} })), Some(&upper)));
    assert_eq!(
        user.errors().to_json(),
        json!({
            "address": { "_": {
                "street": { "required": "VALUE REQUIRED" },
                "city": { "required": "VALUE REQUIRED" }
            } }
        })
    );
}
