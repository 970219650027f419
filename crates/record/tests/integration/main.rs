//! Integration tests for rulecraft-record.

mod binding;
mod forms;
mod hooks;
mod nesting;
mod schema_config;

use std::sync::Arc;

use rulecraft_record::prelude::*;
use rulecraft_record::{Map, Value};

pub fn data(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("expected an object, got {other}"),
    }
}

pub fn device_schema() -> Arc<RecordSchema> {
    RecordSchema::builder()
        .name("device")
        .field("brand", "required|minlen:2|maxlen:128")
        .field("ip_address", "required|ipv4")
        .build()
        .unwrap()
}
