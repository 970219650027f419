//! Custom validators and manual errors.

use std::sync::{Arc, Mutex};

use pretty_assertions::assert_eq;
use rulecraft_record::prelude::*;
use serde_json::json;

use crate::data;

#[test]
fn hooks_run_after_structure_in_declaration_order() {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let (first, second) = (Arc::clone(&calls), Arc::clone(&calls));

    let schema = RecordSchema::builder()
        .field("password", "required|minlen:8")
        .field("confirm", "required")
        .validator("confirm", move |_, _, _| {
            first.lock().unwrap().push("confirm");
            true
        })
        .validator("password", move |_, _, _| {
            second.lock().unwrap().push("password");
            true
        })
        .build()
        .unwrap();

    let mut record = schema.record();
    assert!(!record.is_valid(&data(json!({ "password": "short", "confirm": "short" })), None));
    assert!(calls.lock().unwrap().is_empty());

    assert!(record.is_valid(&data(json!({ "password": "long enough", "confirm": "x" })), None));
    assert_eq!(*calls.lock().unwrap(), vec!["password", "confirm"]);
}

#[test]
fn first_failing_hook_stops_the_rest() {
    let later = Arc::new(Mutex::new(false));
    let ran = Arc::clone(&later);

    let schema = RecordSchema::builder()
        .field("password", "required")
        .field("confirm", "required")
        .validator("password", |record, data, t| {
            if data.get("password") == data.get("confirm") {
                return true;
            }
            record
                .add_error("confirm", "passwords do not match", Some(t))
                .unwrap();
            false
        })
        .validator("confirm", move |_, _, _| {
            *ran.lock().unwrap() = true;
            true
        })
        .build()
        .unwrap();

    let mut record = schema.record();
    assert!(!record.is_valid(&data(json!({ "password": "a", "confirm": "b" })), None));
    assert_eq!(
        record.errors().to_json(),
        json!({ "confirm": { "*": "passwords do not match" } })
    );
    assert!(!*later.lock().unwrap());
    assert_eq!(record.get("password"), Some(&serde_json::Value::Null));
}

#[test]
fn hooks_do_not_run_when_nested_data_fails() {
    let ran = Arc::new(Mutex::new(false));
    let flag = Arc::clone(&ran);

    let schema = RecordSchema::builder()
        .field("name", "required")
        .recordset("devices", crate::device_schema())
        .validator("name", move |_, _, _| {
            *flag.lock().unwrap() = true;
            true
        })
        .build()
        .unwrap();

    let mut record = schema.record();
    let input = json!({ "name": "Ada", "devices": [{ "brand": "Apple", "ip_address": "" }] });
    assert!(!record.is_valid(&data(input), None));
    assert!(!*ran.lock().unwrap());
}

#[test]
fn hook_error_without_false_still_fails() {
    let schema = RecordSchema::builder()
        .field("name", "required")
        .validator("name", |record, _, _| {
            record.add_error("name", "taken", None).is_ok()
        })
        .build()
        .unwrap();

    let mut record = schema.record();
    assert!(!record.is_valid(&data(json!({ "name": "root" })), None));
    assert_eq!(record.errors().to_json(), json!({ "name": { "*": "taken" } }));
}

#[test]
fn manual_errors_replace_rule_errors() {
    let schema = RecordSchema::builder()
        .field("age", "numeric|between:18,120")
        .build()
        .unwrap();
    let mut record = schema.record();
    assert!(!record.is_valid(&data(json!({ "age": "x" })), None));

    record.add_error("age", "check your age", None).unwrap();
    assert_eq!(
        record.errors().to_json(),
        json!({ "age": { "*": "check your age" } })
    );

    record.clear_errors();
    assert!(record.errors().is_empty());
}

#[test]
fn field_message_collapses_every_failure() {
    let schema = RecordSchema::builder()
        .declare(
            Field::new("age")
                .rules("numeric|between:18,120")
                .message("age must be a number between 18 and 120"),
        )
        .build()
        .unwrap();
    let mut record = schema.record();
    assert!(!record.is_valid(&data(json!({ "age": "abc" })), None));
    assert_eq!(
        record.errors().to_json(),
        json!({ "age": { "*": "age must be a number between 18 and 120" } })
    );
}
