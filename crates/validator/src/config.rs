//! Serialized schema configuration.
//!
//! A plain serde structure mirroring [`Validator::add_field`]; loading one
//! replaces the declared schema wholesale.
//!
//! ```json
//! {
//!   "fields": {
//!     "age":  "required|numeric|between:18,120",
//!     "name": { "rules": { "required": null, "minlen": 3 }, "message": "please enter a name" },
//!     "code": { "rules": "alphanum", "required": true }
//!   }
//! }
//! ```
//!
//! [`Validator::add_field`]: crate::validator::Validator::add_field

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::chain::{IntoRuleChain, RuleChain};
use crate::foundation::SchemaResult;

/// Rules of one field, in either input form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RuleSpec {
    /// `"required|between:18,120"`
    Text(String),
    /// `{ "required": null, "between": [18, 120] }`
    Map(IndexMap<String, Value>),
}

impl Default for RuleSpec {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

impl IntoRuleChain for RuleSpec {
    fn into_rule_chain(self) -> SchemaResult<RuleChain> {
        match self {
            Self::Text(text) => RuleChain::parse(&text),
            Self::Map(map) => RuleChain::from_map(map),
        }
    }
}

/// Full field form: rules plus options.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldSpec {
    /// Rule chain.
    #[serde(default)]
    pub rules: RuleSpec,
    /// Field-level message override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Adds `required` if the rules lack it.
    #[serde(default)]
    pub required: bool,
}

/// One field: bare rules or the full form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldConfig {
    /// Rules plus options.
    Full(FieldSpec),
    /// Rules only.
    Rules(RuleSpec),
}

impl FieldConfig {
    /// Parses the rules, applying `required`.
    pub fn into_parts(self) -> SchemaResult<(RuleChain, Option<String>)> {
        match self {
            Self::Full(spec) => {
                let chain = spec.rules.into_rule_chain()?;
                let chain = if spec.required { chain.require() } else { chain };
                Ok((chain, spec.message))
            }
            Self::Rules(rules) => Ok((rules.into_rule_chain()?, None)),
        }
    }
}

impl From<&str> for FieldConfig {
    fn from(rules: &str) -> Self {
        Self::Rules(RuleSpec::Text(rules.to_owned()))
    }
}

/// Flat validator schema: field id → rules, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidatorConfig {
    /// Declared fields.
    #[serde(default)]
    pub fields: IndexMap<String, FieldConfig>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn both_field_forms_deserialize() {
        let config: ValidatorConfig = serde_json::from_value(json!({
            "fields": {
                "age": "required|numeric",
                "name": { "rules": { "minlen": 3 }, "message": "bad name", "required": true },
                "tags": { "maxlen": 5 }
            }
        }))
        .unwrap();

        let ids: Vec<_> = config.fields.keys().map(String::as_str).collect();
        assert_eq!(ids, vec!["age", "name", "tags"]);

        let (chain, message) = config.fields["name"].clone().into_parts().unwrap();
        assert_eq!(chain.to_string(), "required|minlen:3");
        assert_eq!(message.as_deref(), Some("bad name"));

        let (chain, message) = config.fields["tags"].clone().into_parts().unwrap();
        assert_eq!(chain.to_string(), "maxlen:5");
        assert_eq!(message, None);
    }

    #[test]
    fn syntax_errors_surface_on_parts() {
        let field = FieldConfig::from("between:");
        assert_eq!(field.into_parts().unwrap_err().code(), "RULE_SYNTAX");
    }
}
