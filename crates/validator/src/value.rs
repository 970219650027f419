//! Helpers for reading form-style JSON values.
//!
//! Input usually arrives from forms or query strings, so numbers may come in
//! as strings (`"25"`) as well as JSON numbers. Rules read values through
//! these helpers instead of matching on [`Value`] themselves.

use std::borrow::Cow;

use serde_json::Value;

/// Returns `true` for values that count as "not provided": `null` and the
/// empty string.
#[must_use]
pub fn is_absent(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

/// Textual view of a scalar value. Arrays and objects have none.
#[must_use]
pub fn as_text(value: &Value) -> Option<Cow<'_, str>> {
    match value {
        Value::String(s) => Some(Cow::Borrowed(s.as_str())),
        Value::Number(n) => Some(Cow::Owned(n.to_string())),
        Value::Bool(b) => Some(Cow::Borrowed(if *b { "true" } else { "false" })),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Numeric view of a value: JSON numbers, or strings holding a plain decimal
/// literal. `NaN`, infinities and exponents are rejected.
#[must_use]
pub fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_decimal(s),
        _ => None,
    }
}

/// Length of a value: characters for scalars, elements for arrays, keys for
/// objects.
#[must_use]
pub fn length(value: &Value) -> Option<usize> {
    match value {
        Value::Array(items) => Some(items.len()),
        Value::Object(map) => Some(map.len()),
        other => as_text(other).map(|s| s.chars().count()),
    }
}

/// Returns `true` if `s` is an optionally signed run of ascii digits.
#[must_use]
pub fn is_integer_literal(s: &str) -> bool {
    let digits = s.strip_prefix(['+', '-']).unwrap_or(s);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Returns `true` if `s` is an optionally signed decimal literal such as
/// `19.99`, `-3`, `.5` or `5.`.
#[must_use]
pub fn is_decimal_literal(s: &str) -> bool {
    let body = s.strip_prefix(['+', '-']).unwrap_or(s);
    let (int, frac) = body.split_once('.').unwrap_or((body, ""));
    let has_digits = !int.is_empty() || !frac.is_empty();
    has_digits
        && int.bytes().all(|b| b.is_ascii_digit())
        && frac.bytes().all(|b| b.is_ascii_digit())
}

fn parse_decimal(s: &str) -> Option<f64> {
    let s = s.trim();
    if is_decimal_literal(s) {
        s.parse().ok()
    } else {
        None
    }
}
