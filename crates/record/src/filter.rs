//! Value filters applied when a validated value is stored.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Transforms a validated value before a record stores it.
///
/// Filters never run on `null`, and only after the whole record validated.
pub trait Filter: Send + Sync + fmt::Debug {
    /// Returns the stored form of `value`.
    fn apply(&self, value: Value) -> Value;
}

/// Trims surrounding whitespace from strings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Trim;

impl Filter for Trim {
    fn apply(&self, value: Value) -> Value {
        match value {
            Value::String(s) => Value::String(s.trim().to_owned()),
            other => other,
        }
    }
}

/// Lowercases strings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Lowercase;

impl Filter for Lowercase {
    fn apply(&self, value: Value) -> Value {
        match value {
            Value::String(s) => Value::String(s.to_lowercase()),
            other => other,
        }
    }
}

/// Converts integer strings such as `"42"` into JSON integers. Anything else
/// passes through unchanged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ToInt;

impl Filter for ToInt {
    fn apply(&self, value: Value) -> Value {
        match value {
            Value::String(s) => match s.trim().parse::<i64>() {
                Ok(n) => Value::from(n),
                Err(_) => Value::String(s),
            },
            other => other,
        }
    }
}

/// A closure used as a filter. Build one with [`filter_fn`].
pub struct FnFilter<F>(F);

impl<F> fmt::Debug for FnFilter<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FnFilter")
    }
}

impl<F> Filter for FnFilter<F>
where
    F: Fn(Value) -> Value + Send + Sync,
{
    fn apply(&self, value: Value) -> Value {
        (self.0)(value)
    }
}

/// Wraps a closure as a [`Filter`].
///
/// # Examples
///
/// ```
/// use rulecraft_record::filter::{Filter, filter_fn};
/// use serde_json::{Value, json};
///
/// let clamp = filter_fn(|v: Value| match v.as_i64() {
///     Some(n) if n > 100 => json!(100),
///     _ => v,
/// });
/// assert_eq!(clamp.apply(json!(250)), json!(100));
/// ```
pub fn filter_fn<F>(f: F) -> FnFilter<F>
where
    F: Fn(Value) -> Value + Send + Sync,
{
    FnFilter(f)
}

/// Builtin filters by name, for serialized schemas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterName {
    /// [`Trim`]
    Trim,
    /// [`Lowercase`]
    Lowercase,
    /// [`ToInt`]
    ToInt,
}

impl FilterName {
    /// The filter this name stands for.
    pub fn instantiate(self) -> Arc<dyn Filter> {
        match self {
            Self::Trim => Arc::new(Trim),
            Self::Lowercase => Arc::new(Lowercase),
            Self::ToInt => Arc::new(ToInt),
        }
    }
}
