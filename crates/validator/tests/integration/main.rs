//! Integration tests for rulecraft-validator.

mod custom_rules;
mod properties;
mod schema_config;

use rulecraft_validator::{Map, Value};

pub fn data(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("expected an object, got {other}"),
    }
}
