//! Character class and enumeration rules.

use serde_json::Value;

use crate::value::as_text;

crate::rule! {
    /// Passes when every character is alphabetic.
    pub Alpha as "alpha";
    message "only alphabetic characters allowed";
    rule(value, params) {
        value.as_str().is_some_and(|s| s.chars().all(char::is_alphabetic))
    }
}

crate::rule! {
    /// Passes when every character is alphanumeric.
    pub AlphaNum as "alphanum";
    message "only alphanumeric characters allowed";
    rule(value, params) {
        as_text(value).is_some_and(|s| s.chars().all(char::is_alphanumeric))
    }
}

crate::rule! {
    /// Passes for lowercase ascii letters, digits, `-` and `_`.
    pub Slug as "slug";
    message "invalid slug";
    rule(value, params) {
        value.as_str().is_some_and(|s| {
            s.bytes()
                .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-' || b == b'_')
        })
    }
}

crate::rule! {
    /// Passes for JSON booleans and `true`, `false`, `1`, `0`.
    pub Bool as "bool";
    message "invalid boolean value";
    rule(value, params) {
        match value {
            Value::Bool(_) => true,
            Value::Number(n) => matches!(n.as_u64(), Some(0 | 1)),
            Value::String(s) => matches!(s.as_str(), "true" | "false" | "1" | "0"),
            _ => false,
        }
    }
}

crate::rule! {
    /// Passes when the value equals one of the parameters.
    pub OneOf as "in";
    message "value not allowed";
    params(params) {
        if params.is_empty() {
            Err("expected at least one allowed value".to_owned())
        } else {
            Ok(())
        }
    }
    rule(value, params) {
        as_text(value).is_some_and(|s| params.iter().any(|p| p == s.as_ref()))
    }
}
