//! Forms over the shared validator.

use pretty_assertions::assert_eq;
use rulecraft_record::prelude::*;
use serde_json::json;

use crate::data;

fn registration() -> Form {
    let mut form = Form::new();
    form.field(FormField::new("text", "username", "Username").rules("required|alphanum|minlen:3|maxlen:20"))
        .unwrap()
        .field(FormField::new("email", "email", "Email").rules("required|email"))
        .unwrap()
        .field(FormField::new("password", "password", "Password").rules("required|minlen:8"))
        .unwrap();
    form.fieldset("profile", "Profile")
        .field(FormField::new("text", "age", "Age").rules("numeric|between:13,120"))
        .unwrap()
        .field(
            FormField::new("select", "country", "Country")
                .rules("in:pt,es")
                .choice("pt", "Portugal")
                .choice("es", "Spain"),
        )
        .unwrap();
    form
}

#[test]
fn registration_succeeds_and_exposes_values() {
    let mut form = registration();
    let input = json!({
        "username": "alice123",
        "email": "alice@example.com",
        "password": "SecurePass123",
        "age": "25",
        "country": "pt"
    });
    assert!(form.is_valid(&data(input), None));
    assert!(form.errors().is_empty());
    assert_eq!(form.get("age"), Some(&json!("25")));
    assert_eq!(form.get("country"), Some(&json!("pt")));
}

#[test]
fn registration_failures_are_keyed_by_field() {
    let mut form = registration();
    let input = json!({
        "username": "ab",
        "email": "bob@test.com",
        "password": "short",
        "age": "150"
    });
    assert!(!form.is_valid(&data(input), None));
    assert_eq!(
        form.error_messages(),
        json!({
            "username": { "minlen": "minimum allowed length is 3" },
            "password": { "minlen": "minimum allowed length is 8" },
            "age": { "between": "must be between 13 and 120" }
        })
    );
}

#[test]
fn translator_applies_to_form_errors() {
    let mut form = Form::new();
    form.field(FormField::new("text", "username", "Username").required())
        .unwrap();
    let pt = |msg: &str| match msg {
        "value required" => "valor obrigatório".to_owned(),
        other => other.to_owned(),
    };
    assert!(!form.is_valid(&data(json!({})), Some(&pt)));
    assert_eq!(
        form.error_messages(),
        json!({ "username": { "required": "valor obrigatório" } })
    );
}
