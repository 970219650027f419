//! Serialized record schemas.
//!
//! Mirrors the builder: each field is a bare rule spec, a scalar spec with
//! options, or a nested `record` / `recordset` spec holding another
//! configuration.
//!
//! ```toml
//! name = "user"
//!
//! [fields]
//! name = "required|maxlen:128"
//! age = { rules = "numeric|between:18,120", required = true, filter = ["to_int"] }
//!
//! [fields.devices]
//! required = false
//! recordset = { fields = { brand = "required|minlen:2", ip_address = "required|ipv4" } }
//! ```
//!
//! Custom hooks cannot be serialized; add them with
//! [`RecordSchemaBuilder::validator`](crate::schema::RecordSchemaBuilder::validator)
//! after [`RecordSchemaBuilder::from_config`](crate::schema::RecordSchemaBuilder::from_config).

use indexmap::IndexMap;
use rulecraft_validator::config::RuleSpec;
use serde::{Deserialize, Serialize};

use crate::descriptor::Field;
use crate::filter::FilterName;

/// A record schema as data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordConfig {
    /// Schema name, used in logs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Declared fields, in order.
    #[serde(default)]
    pub fields: IndexMap<String, FieldEntry>,
}

/// Options shared by every field form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldOptions {
    /// Field-level message override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Target slot name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bind: Option<String>,
    /// Filters run before the value is stored.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub filter: Vec<FilterName>,
    /// Whether the field must be present.
    #[serde(default)]
    pub required: bool,
}

/// A nested record field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RecordSpec {
    /// Schema of the nested record.
    pub record: Box<RecordConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bind: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub filter: Vec<FilterName>,
    #[serde(default)]
    pub required: bool,
}

/// A recordset field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RecordsetSpec {
    /// Schema of every element.
    pub recordset: Box<RecordConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bind: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub filter: Vec<FilterName>,
    #[serde(default)]
    pub required: bool,
}

/// A scalar field with options.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScalarSpec {
    /// Rule chain.
    #[serde(default)]
    pub rules: RuleSpec,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bind: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub filter: Vec<FilterName>,
    #[serde(default)]
    pub required: bool,
}

/// One field entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldEntry {
    /// `{ record = { ... } }`
    Record(RecordSpec),
    /// `{ recordset = { ... } }`
    Recordset(RecordsetSpec),
    /// `{ rules = "...", ... }`
    Scalar(ScalarSpec),
    /// `"required|email"` or `{ required = {}, email = {} }`
    Rules(RuleSpec),
}

macro_rules! options_of {
    ($($spec:ty),*) => {$(
        impl $spec {
            /// Options of this entry.
            pub fn options(&self) -> FieldOptions {
                FieldOptions {
                    message: self.message.clone(),
                    bind: self.bind.clone(),
                    filter: self.filter.clone(),
                    required: self.required,
                }
            }
        }
    )*};
}

options_of!(RecordSpec, RecordsetSpec, ScalarSpec);

/// Applies `options` to a declaration.
pub(crate) fn decorate(mut field: Field, options: FieldOptions) -> Field {
    if options.required {
        field = field.required();
    }
    if let Some(message) = options.message {
        field = field.message(message);
    }
    if let Some(bind) = options.bind {
        field = field.bind(bind);
    }
    for name in options.filter {
        field = field.filter_arc(name.instantiate());
    }
    field
}
