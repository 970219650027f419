//! Schemas built from serialized configuration.

use pretty_assertions::assert_eq;
use rulecraft_record::prelude::*;
use rulecraft_record::schema::RecordSchemaBuilder;
use rulecraft_validator::registry;
use serde_json::json;

use crate::data;

const USER_TOML: &str = r#"
name = "user"

[fields]
name = { rules = "required|maxlen:128", filter = ["trim"] }
age = { rules = "numeric|between:18,120", message = "age must be between 18 and 120" }

[fields.address]
required = true
record = { fields = { city = "required|alpha" } }

[fields.devices.recordset.fields]
brand = "required|minlen:2"
ip_address = "required|ipv4"
"#;

fn user() -> std::sync::Arc<RecordSchema> {
    let config: RecordConfig = toml::from_str(USER_TOML).unwrap();
    RecordSchema::from_config(config, registry::global()).unwrap()
}

#[test]
fn toml_schema_keeps_declaration_order() {
    let schema = user();
    assert_eq!(schema.name(), "user");
    let ids: Vec<_> = schema.fields().map(FieldDescriptor::id).collect();
    assert_eq!(ids, vec!["name", "age", "address", "devices"]);
    assert!(schema.field("address").unwrap().is_required());
    assert!(!schema.field("devices").unwrap().is_required());
}

#[test]
fn toml_schema_validates_like_a_built_one() {
    let mut record = user().record();
    let input = json!({
        "name": " Ada ",
        "age": 12,
        "address": { "city": "London" },
        "devices": [{ "brand": "X", "ip_address": "1.2.3.4" }]
    });
    assert!(!record.is_valid(&data(input), None));
    assert_eq!(
        record.errors().to_json(),
        json!({ "age": { "*": "age must be between 18 and 120" } })
    );

    let input = json!({ "name": " Ada ", "age": 30, "address": { "city": "London" } });
    assert!(record.is_valid(&data(input), None));
    assert_eq!(record.get("name"), Some(&json!("Ada")));
}

#[test]
fn json_schema_with_hooks() {
    let config: RecordConfig = serde_json::from_value(json!({
        "fields": {
            "password": "required|minlen:8",
            "confirm": { "rules": "required", "message": "please confirm" }
        }
    }))
    .unwrap();

    let schema = RecordSchemaBuilder::from_config(config, registry::global())
        .unwrap()
        .validator("confirm", |record, data, _| {
            let same = data.get("password") == data.get("confirm");
            if !same {
                let _ = record.add_error("confirm", "passwords differ", None);
            }
            same
        })
        .build()
        .unwrap();

    let mut record = schema.record();
    assert!(!record.is_valid(&data(json!({ "password": "password1" })), None));
    assert_eq!(record.errors().to_json(), json!({ "confirm": { "*": "please confirm" } }));

    let input = json!({ "password": "password1", "confirm": "password2" });
    assert!(!record.is_valid(&data(input), None));
    assert_eq!(record.errors().to_json(), json!({ "confirm": { "*": "passwords differ" } }));
}

#[test]
fn unknown_rule_in_config_fails_the_build() {
    let config: RecordConfig = serde_json::from_value(json!({
        "fields": { "inner": { "record": { "fields": { "x": "required|nope" } } } }
    }))
    .unwrap();
    let err = RecordSchema::from_config(config, registry::global()).unwrap_err();
    assert_eq!(err.code(), "RULE_UNKNOWN");
}

#[test]
fn unknown_option_reads_as_a_rule_map() {
    let config: RecordConfig = serde_json::from_value(json!({
        "fields": { "x": { "rules": "required", "colour": "red" } }
    }))
    .unwrap();
    assert!(matches!(config.fields["x"], FieldEntry::Rules(_)));
    assert_eq!(
        RecordSchema::from_config(config, registry::global())
            .unwrap_err()
            .code(),
        "RULE_UNKNOWN"
    );
}
