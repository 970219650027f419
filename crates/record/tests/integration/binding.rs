//! Binding stored values onto typed targets.

use pretty_assertions::assert_eq;
use rulecraft_record::prelude::*;
use serde_json::json;

use crate::data;

#[derive(Debug, Default, PartialEq)]
struct User {
    full_name: String,
    email: String,
    age: u8,
}

impl BindTarget for User {
    fn slots() -> Slots<Self> {
        Slots::new()
            .slot("full_name", |u: &mut User, v: String| u.full_name = v)
            .slot("email", |u: &mut User, v: String| u.email = v)
            .slot("age", |u: &mut User, v: u8| u.age = v)
    }
}

fn schema() -> std::sync::Arc<RecordSchema> {
    RecordSchema::builder()
        .declare(Field::new("name").rules("required").bind("full_name").filter(Trim))
        .declare(Field::new("email").rules("required|email").filter(Trim).filter(Lowercase))
        .declare(Field::new("age").rules("numeric").filter(ToInt))
        .field("nickname", "alphanum")
        .build()
        .unwrap()
}

#[test]
fn filtered_values_bind_through_slots() {
    let mut record = schema().record();
    let input = json!({ "name": "  Ada ", "email": "Ada@Example.COM", "age": "36" });
    assert!(record.is_valid(&data(input), None));

    let user: User = record.bind().unwrap();
    assert_eq!(
        user,
        User {
            full_name: "Ada".into(),
            email: "ada@example.com".into(),
            age: 36,
        }
    );
}

#[test]
fn bindx_returns_values_without_a_slot() {
    let mut record = schema().record();
    let input = json!({ "name": "Ada", "email": "ada@example.com", "nickname": "ada99" });
    assert!(record.is_valid(&data(input), None));

    let (user, unmapped) = record.bindx::<User>().unwrap();
    assert_eq!(user.full_name, "Ada");
    assert_eq!(user.age, 0);
    assert_eq!(serde_json::Value::Object(unmapped), json!({ "nickname": "ada99" }));
}

#[test]
fn bind_into_keeps_untouched_fields() {
    let mut record = schema().record();
    assert!(record.is_valid(&data(json!({ "name": "Ada", "email": "a@b.io" })), None));

    let mut user = User {
        age: 50,
        ..User::default()
    };
    record.bind_into(&mut user).unwrap();
    assert_eq!(user.age, 50);
    assert_eq!(user.email, "a@b.io");
}

#[test]
fn failed_record_binds_nothing() {
    let mut record = schema().record();
    assert!(!record.is_valid(&data(json!({ "name": "Ada" })), None));
    let (user, unmapped) = record.bindx::<User>().unwrap();
    assert_eq!(user, User::default());
    assert!(unmapped.is_empty());
}

#[test]
fn conversion_errors_surface() {
    let schema = RecordSchema::builder()
        .declare(Field::new("years").rules("alpha").bind("age"))
        .build()
        .unwrap();
    let mut record = schema.record();
    assert!(record.is_valid(&data(json!({ "years": "many" })), None));

    let err = record.bind::<User>().unwrap_err();
    assert_eq!(err.code(), "BIND_CONVERSION");
    assert_eq!(err.category(), "conversion");
}

#[test]
fn set_overrides_a_stored_value() {
    let mut record = schema().record();
    assert!(record.is_valid(&data(json!({ "name": "Ada", "email": "a@b.io" })), None));
    record.set("name", "Grace").unwrap();
    assert_eq!(record.bind::<User>().unwrap().full_name, "Grace");
}

#[derive(Debug, Default, PartialEq, serde::Deserialize)]
struct Address {
    city: String,
    #[serde(default)]
    zip: String,
}

#[derive(Debug, Default, PartialEq)]
struct Customer {
    name: String,
    address: Option<Address>,
}

impl BindTarget for Customer {
    fn slots() -> Slots<Self> {
        Slots::new()
            .slot("name", |c: &mut Customer, v: String| c.name = v)
            .slot("address", |c: &mut Customer, v: Address| c.address = Some(v))
    }
}

#[test]
fn nested_record_with_absent_optional_field_binds() {
    let address = RecordSchema::builder()
        .field("city", "required")
        .field("zip", "numeric")
        .build()
        .unwrap();
    let schema = RecordSchema::builder()
        .field("name", "required")
        .record("address", address)
        .build()
        .unwrap();
    let mut record = schema.record();
    let input = json!({ "name": "Rui", "address": { "city": "Porto" } });
    assert!(record.is_valid(&data(input), None));
    assert_eq!(record.get("address"), Some(&json!({ "city": "Porto" })));

    let customer: Customer = record.bind().unwrap();
    assert_eq!(
        customer,
        Customer {
            name: "Rui".into(),
            address: Some(Address {
                city: "Porto".into(),
                zip: String::new(),
            }),
        }
    );
}
