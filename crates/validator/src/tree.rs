//! Error tree
//!
//! Multi-field, multi-level validation failures. A field id is present in a
//! tree if and only if that field failed.
//!
//! Wire shape (see [`ErrorTree::to_json`]):
//!
//! ```text
//! { "age":     { "required": "value required" } }          rule failures
//! { "name":    { "*": "please enter your name" } }         override / manual
//! { "address": { "_": { "street": { ... } } } }            nested record
//! { "devices": { "_": { "2": { "ip": { ... } } } } }        recordset element 2
//! ```

use std::collections::BTreeMap;
use std::fmt;

use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;

/// Reserved key that introduces a nested tree.
pub const NESTED_KEY: &str = "_";

/// Key for override and manually added messages.
pub const WILDCARD_KEY: &str = "*";

// ============================================================================
// FIELD ERRORS
// ============================================================================

/// Failures recorded for one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldErrors {
    /// Rule name (or `*`) → message.
    Rules(IndexMap<String, String>),
    /// Errors of a nested record.
    Record(ErrorTree),
    /// Errors of failing recordset elements, by zero-based index.
    Recordset(BTreeMap<usize, ErrorTree>),
}

impl FieldErrors {
    /// A single wildcard-keyed message.
    pub fn wildcard(message: impl Into<String>) -> Self {
        Self::rule(WILDCARD_KEY, message)
    }

    /// A single rule-keyed message.
    pub fn rule(rule: impl Into<String>, message: impl Into<String>) -> Self {
        let mut rules = IndexMap::with_capacity(1);
        rules.insert(rule.into(), message.into());
        Self::Rules(rules)
    }

    /// Message recorded for `rule`, if this field failed on rules.
    pub fn message(&self, rule: &str) -> Option<&str> {
        match self {
            Self::Rules(rules) => rules.get(rule).map(String::as_str),
            Self::Record(_) | Self::Recordset(_) => None,
        }
    }

    /// Rule-keyed messages, if any.
    pub fn as_rules(&self) -> Option<&IndexMap<String, String>> {
        match self {
            Self::Rules(rules) => Some(rules),
            _ => None,
        }
    }

    /// Nested record tree, if any.
    pub fn as_record(&self) -> Option<&ErrorTree> {
        match self {
            Self::Record(tree) => Some(tree),
            _ => None,
        }
    }

    /// Failing recordset elements, if any.
    pub fn as_recordset(&self) -> Option<&BTreeMap<usize, ErrorTree>> {
        match self {
            Self::Recordset(items) => Some(items),
            _ => None,
        }
    }

    fn is_empty(&self) -> bool {
        match self {
            Self::Rules(rules) => rules.is_empty(),
            Self::Record(tree) => tree.is_empty(),
            Self::Recordset(items) => items.is_empty(),
        }
    }
}

impl Serialize for FieldErrors {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Rules(rules) => rules.serialize(serializer),
            Self::Record(tree) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry(NESTED_KEY, tree)?;
                map.end()
            }
            Self::Recordset(items) => {
                let indexed: IndexMap<String, &ErrorTree> =
                    items.iter().map(|(i, tree)| (i.to_string(), tree)).collect();
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry(NESTED_KEY, &indexed)?;
                map.end()
            }
        }
    }
}

// ============================================================================
// ERROR TREE
// ============================================================================

/// Field id → failures, in the order fields were checked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorTree {
    fields: IndexMap<String, FieldErrors>,
}

impl ErrorTree {
    /// Creates an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Failures of `field`, if it failed.
    pub fn get(&self, field: &str) -> Option<&FieldErrors> {
        self.fields.get(field)
    }

    /// Returns `true` if `field` failed.
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Number of failed fields at this level.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if nothing failed.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Failed fields with their errors.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldErrors)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Records failures for `field`, replacing earlier ones. Empty failure
    /// sets are dropped so the tree only lists failed fields.
    pub fn insert(&mut self, field: impl Into<String>, errors: FieldErrors) {
        let field = field.into();
        if errors.is_empty() {
            self.fields.shift_remove(&field);
        } else {
            self.fields.insert(field, errors);
        }
    }

    /// Replaces the failures of `field` with a single wildcard message.
    pub fn set_wildcard(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.insert(field, FieldErrors::wildcard(message));
    }

    /// Drops the failures of `field`.
    pub fn remove(&mut self, field: &str) -> Option<FieldErrors> {
        self.fields.shift_remove(field)
    }

    /// Drops every failure.
    pub fn clear(&mut self) {
        self.fields.clear();
    }

    /// The tree in its JSON wire shape.
    pub fn to_json(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }

    /// Every leaf message with an addressable path, e.g.
    /// `devices[2].ip_address`.
    pub fn flatten(&self) -> Vec<FlatError> {
        let mut out = Vec::new();
        self.flatten_into("", &mut out);
        out
    }

    fn flatten_into(&self, prefix: &str, out: &mut Vec<FlatError>) {
        for (field, errors) in &self.fields {
            let path = if prefix.is_empty() {
                field.clone()
            } else {
                format!("{prefix}.{field}")
            };
            match errors {
                FieldErrors::Rules(rules) => {
                    out.extend(rules.iter().map(|(rule, message)| FlatError {
                        path: path.clone(),
                        rule: rule.clone(),
                        message: message.clone(),
                    }));
                }
                FieldErrors::Record(tree) => tree.flatten_into(&path, out),
                FieldErrors::Recordset(items) => {
                    for (index, tree) in items {
                        tree.flatten_into(&format!("{path}[{index}]"), out);
                    }
                }
            }
        }
    }
}

impl Serialize for ErrorTree {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.fields.serialize(serializer)
    }
}

impl fmt::Display for ErrorTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.flatten().iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{error}")?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a ErrorTree {
    type Item = (&'a String, &'a FieldErrors);
    type IntoIter = indexmap::map::Iter<'a, String, FieldErrors>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

/// One leaf of a flattened [`ErrorTree`].
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct FlatError {
    /// Dotted path with recordset indexes, e.g. `devices[2].ip_address`.
    pub path: String,
    /// Failing rule name, or `*`.
    pub rule: String,
    /// Rendered message.
    pub message: String,
}

impl fmt::Display for FlatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.path, self.rule, self.message)
    }
}
