//! Rule Chain Parser
//!
//! A field's rules arrive either as a delimited string or as a mapping from
//! rule name to parameters. Both are parsed into one [`RuleChain`], and
//! nothing downstream looks at the original representation again.
//!
//! # String form
//!
//! `name[:param1,param2,...]` segments joined by `|`:
//!
//! ```
//! use rulecraft_validator::chain::RuleChain;
//!
//! let chain = RuleChain::parse("numeric|between:18,120|required").unwrap();
//! let names: Vec<_> = chain.iter().map(|call| call.name()).collect();
//! assert_eq!(names, ["required", "numeric", "between"]);
//! ```
//!
//! # Mapping form
//!
//! Rule name to `null` (no parameters), a scalar (one parameter) or a list.
//! An object value may carry `params` and a per-rule `message`:
//!
//! ```
//! use rulecraft_validator::chain::RuleChain;
//! use serde_json::json;
//!
//! let chain = RuleChain::from_map([
//!     ("required", json!(null)),
//!     ("between", json!([18, 120])),
//!     ("minlen", json!({ "params": 2, "message": "too short" })),
//! ])
//! .unwrap();
//! assert_eq!(chain.to_string(), "required|between:18,120|minlen:2");
//! ```

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde_json::{Map, Value};
use smallvec::SmallVec;

use crate::foundation::{SchemaError, SchemaResult};

/// Name of the presence rule, always evaluated first.
pub const REQUIRED: &str = "required";

/// Separates rules in the string form.
pub const RULE_SEPARATOR: char = '|';

/// Separates a rule name from its parameter list.
pub const PARAM_MARKER: char = ':';

/// Separates parameters.
pub const PARAM_SEPARATOR: char = ',';

/// Inline storage for rule parameters; most rules take at most two.
pub type Params = SmallVec<[String; 2]>;

// ============================================================================
// RULE CALL
// ============================================================================

/// One rule invocation inside a chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleCall {
    name: String,
    params: Params,
    message: Option<String>,
}

impl RuleCall {
    /// Creates a call without parameters.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::RuleSyntax`] if `name` is not a valid rule name.
    pub fn new(name: impl Into<String>) -> SchemaResult<Self> {
        let name = name.into();
        check_name(&name, &name)?;
        Ok(Self {
            name,
            params: Params::new(),
            message: None,
        })
    }

    /// Sets the parameters.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::RuleSyntax`] if any parameter is empty.
    pub fn with_params<I, S>(mut self, params: I) -> SchemaResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.params = params.into_iter().map(Into::into).collect();
        if self.params.iter().any(|p| p.trim().is_empty()) {
            return Err(SchemaError::syntax(self.to_string(), "empty parameter"));
        }
        Ok(self)
    }

    /// Sets a message used instead of the rule's default.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Rule name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rule parameters, as declared.
    pub fn params(&self) -> &[String] {
        &self.params
    }

    /// Per-rule message override.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Returns `true` for the presence rule.
    pub fn is_required(&self) -> bool {
        self.name == REQUIRED
    }

    fn parse_segment(segment: &str) -> SchemaResult<Self> {
        let (name, params) = match segment.split_once(PARAM_MARKER) {
            Some((name, params)) => (name.trim(), Some(params)),
            None => (segment.trim(), None),
        };
        let call = Self::new(name).map_err(|_| invalid_name(segment, name))?;
        match params {
            None => Ok(call),
            Some(list) if list.trim().is_empty() => {
                Err(SchemaError::syntax(segment, "missing parameter list"))
            }
            Some(list) => call
                .with_params(list.split(PARAM_SEPARATOR).map(str::trim))
                .map_err(|_| SchemaError::syntax(segment, "empty parameter")),
        }
    }

    fn from_entry(name: &str, value: &Value) -> SchemaResult<Self> {
        let call = Self::new(name)?;
        let segment = || format!("{name}{PARAM_MARKER}{value}");
        match value {
            Value::Object(options) => {
                let mut call = match options.get("params") {
                    Some(params) => call.with_params(param_list(params).ok_or_else(|| {
                        SchemaError::syntax(segment(), "parameters must be scalars")
                    })?)?,
                    None => call,
                };
                match options.get("message") {
                    Some(Value::String(message)) => call.message = Some(message.clone()),
                    Some(Value::Null) | None => {}
                    Some(_) => return Err(SchemaError::syntax(segment(), "message must be text")),
                }
                Ok(call)
            }
            other => {
                let params = param_list(other)
                    .ok_or_else(|| SchemaError::syntax(segment(), "parameters must be scalars"))?;
                call.with_params(params)
                    .map_err(|_| SchemaError::syntax(segment(), "empty parameter"))
            }
        }
    }
}

impl fmt::Display for RuleCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if !self.params.is_empty() {
            write!(f, "{PARAM_MARKER}{}", self.params.join(","))?;
        }
        Ok(())
    }
}

fn check_name(segment: &str, name: &str) -> SchemaResult<()> {
    if name.is_empty() {
        return Err(SchemaError::syntax(segment, "empty rule name"));
    }
    if !name.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_') {
        return Err(invalid_name(segment, name));
    }
    Ok(())
}

fn invalid_name(segment: &str, name: &str) -> SchemaError {
    if name.is_empty() {
        SchemaError::syntax(segment, "empty rule name")
    } else {
        SchemaError::syntax(segment, format!("invalid rule name `{name}`"))
    }
}

/// Scalar parameters as text; `None` if a nested array or object shows up.
fn param_list(value: &Value) -> Option<Vec<String>> {
    match value {
        Value::Null => Some(Vec::new()),
        Value::Array(items) => items.iter().map(param_text).collect(),
        scalar => param_text(scalar).map(|p| vec![p]),
    }
}

fn param_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

// ============================================================================
// RULE CHAIN
// ============================================================================

/// Ordered rule calls for one field.
///
/// Invariants kept by every constructor:
/// - declaration order is preserved, except that `required` always sits at
///   position 0 when present
/// - a rule name appears at most once; a repeated name keeps only its last
///   declaration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleChain {
    calls: Vec<RuleCall>,
}

impl RuleChain {
    /// Creates an empty chain. An empty chain accepts any value.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses the string form, e.g. `"required|between:18,120"`.
    ///
    /// An empty or whitespace-only string gives an empty chain.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::RuleSyntax`] naming the offending segment for
    /// empty or invalid names, a `:` without parameters, or an empty
    /// parameter.
    pub fn parse(spec: &str) -> SchemaResult<Self> {
        let mut chain = Self::new();
        if spec.trim().is_empty() {
            return Ok(chain);
        }
        for segment in spec.split(RULE_SEPARATOR) {
            chain.push(RuleCall::parse_segment(segment)?);
        }
        Ok(chain)
    }

    /// Builds a chain from rule name → parameter entries, in iteration order.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::RuleSyntax`] for invalid names, nested
    /// parameter values or empty parameters.
    pub fn from_map<I, K>(entries: I) -> SchemaResult<Self>
    where
        I: IntoIterator<Item = (K, Value)>,
        K: AsRef<str>,
    {
        let mut chain = Self::new();
        for (name, value) in entries {
            chain.push(RuleCall::from_entry(name.as_ref(), &value)?);
        }
        Ok(chain)
    }

    /// Appends a call, applying the chain invariants.
    pub fn push(&mut self, call: RuleCall) -> &mut Self {
        self.calls.retain(|existing| existing.name != call.name);
        if call.is_required() {
            self.calls.insert(0, call);
        } else {
            self.calls.push(call);
        }
        self
    }

    /// Makes the chain start with `required`, inserting it if missing.
    #[must_use = "builder methods must be chained or built"]
    pub fn require(mut self) -> Self {
        if !self.is_required() {
            self.calls.insert(
                0,
                RuleCall {
                    name: REQUIRED.to_owned(),
                    params: Params::new(),
                    message: None,
                },
            );
        }
        self
    }

    /// Returns `true` if the chain starts with `required`.
    pub fn is_required(&self) -> bool {
        self.calls.first().is_some_and(RuleCall::is_required)
    }

    /// Looks up a call by rule name.
    pub fn get(&self, name: &str) -> Option<&RuleCall> {
        self.calls.iter().find(|call| call.name == name)
    }

    /// Calls in evaluation order.
    pub fn iter(&self) -> std::slice::Iter<'_, RuleCall> {
        self.calls.iter()
    }

    /// Number of calls.
    pub fn len(&self) -> usize {
        self.calls.len()
    }

    /// Returns `true` if the chain holds no call.
    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }
}

impl fmt::Display for RuleChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, call) in self.calls.iter().enumerate() {
            if i > 0 {
                write!(f, "{RULE_SEPARATOR}")?;
            }
            write!(f, "{call}")?;
        }
        Ok(())
    }
}

impl FromStr for RuleChain {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl<'a> IntoIterator for &'a RuleChain {
    type Item = &'a RuleCall;
    type IntoIter = std::slice::Iter<'a, RuleCall>;

    fn into_iter(self) -> Self::IntoIter {
        self.calls.iter()
    }
}

// ============================================================================
// CONVERSIONS
// ============================================================================

/// Anything that can declare a field's rules.
pub trait IntoRuleChain {
    /// Parses `self` into a chain.
    fn into_rule_chain(self) -> SchemaResult<RuleChain>;
}

impl IntoRuleChain for RuleChain {
    fn into_rule_chain(self) -> SchemaResult<RuleChain> {
        Ok(self)
    }
}

impl IntoRuleChain for &RuleChain {
    fn into_rule_chain(self) -> SchemaResult<RuleChain> {
        Ok(self.clone())
    }
}

impl IntoRuleChain for &str {
    fn into_rule_chain(self) -> SchemaResult<RuleChain> {
        RuleChain::parse(self)
    }
}

impl IntoRuleChain for String {
    fn into_rule_chain(self) -> SchemaResult<RuleChain> {
        RuleChain::parse(&self)
    }
}

impl IntoRuleChain for &String {
    fn into_rule_chain(self) -> SchemaResult<RuleChain> {
        RuleChain::parse(self)
    }
}

impl IntoRuleChain for IndexMap<String, Value> {
    fn into_rule_chain(self) -> SchemaResult<RuleChain> {
        RuleChain::from_map(self)
    }
}

impl IntoRuleChain for Map<String, Value> {
    fn into_rule_chain(self) -> SchemaResult<RuleChain> {
        RuleChain::from_map(self)
    }
}

impl<K: AsRef<str>> IntoRuleChain for Vec<(K, Value)> {
    fn into_rule_chain(self) -> SchemaResult<RuleChain> {
        RuleChain::from_map(self)
    }
}

impl<K: AsRef<str>, const N: usize> IntoRuleChain for [(K, Value); N] {
    fn into_rule_chain(self) -> SchemaResult<RuleChain> {
        RuleChain::from_map(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    fn names(chain: &RuleChain) -> Vec<&str> {
        chain.iter().map(RuleCall::name).collect()
    }

    #[test]
    fn parses_names_and_params_in_order() {
        let chain = RuleChain::parse("numeric|between:18,120|maxlen:3").unwrap();
        assert_eq!(names(&chain), vec!["numeric", "between", "maxlen"]);
        assert_eq!(chain.get("between").unwrap().params(), ["18", "120"]);
        assert!(!chain.is_required());
    }

    #[test]
    fn required_is_hoisted() {
        let chain = RuleChain::parse("numeric|between:18,120|required").unwrap();
        assert_eq!(names(&chain), vec!["required", "numeric", "between"]);
        assert!(chain.is_required());
    }

    #[test]
    fn require_inserts_when_missing() {
        let chain = RuleChain::parse("numeric").unwrap().require();
        assert_eq!(names(&chain), vec!["required", "numeric"]);
        let again = chain.clone().require();
        assert_eq!(again, chain);
    }

    #[test]
    fn whitespace_is_tolerated() {
        let chain = RuleChain::parse(" required | between: 1 , 5 ").unwrap();
        assert_eq!(chain.to_string(), "required|between:1,5");
    }

    #[test]
    fn duplicates_keep_last_declaration() {
        let chain = RuleChain::parse("minlen:2|alpha|minlen:4").unwrap();
        assert_eq!(chain.to_string(), "alpha|minlen:4");
    }

    #[test]
    fn empty_spec_is_empty_chain() {
        assert!(RuleChain::parse("").unwrap().is_empty());
        assert!(RuleChain::parse("  ").unwrap().is_empty());
    }

    #[rstest]
    #[case("required||numeric", "", "empty rule name")]
    #[case("between:", "between:", "missing parameter list")]
    #[case("between:18,", "between:18,", "empty parameter")]
    #[case("max-len:3", "max-len:3", "invalid rule name `max-len`")]
    #[case(":18", ":18", "empty rule name")]
    fn malformed_segments(#[case] spec: &str, #[case] segment: &str, #[case] reason: &str) {
        let err = RuleChain::parse(spec).unwrap_err();
        assert_eq!(
            err,
            SchemaError::RuleSyntax {
                segment: segment.into(),
                reason: reason.into(),
            }
        );
    }

    #[test]
    fn map_form_matches_string_form() {
        let from_map = RuleChain::from_map([
            ("between", json!(["18", 120])),
            ("required", json!(null)),
            ("in", json!("a")),
        ])
        .unwrap();
        let from_str = RuleChain::parse("required|between:18,120|in:a").unwrap();
        assert_eq!(from_map, from_str);
    }

    #[test]
    fn map_form_carries_rule_messages() {
        let chain = RuleChain::from_map([(
            "minlen",
            json!({ "params": [3], "message": "at least {0}" }),
        )])
        .unwrap();
        let call = chain.get("minlen").unwrap();
        assert_eq!(call.params(), ["3"]);
        assert_eq!(call.message(), Some("at least {0}"));
    }

    #[test]
    fn map_form_rejects_nested_params() {
        let err = RuleChain::from_map([("between", json!([[1], 2]))]).unwrap_err();
        assert_eq!(err.code(), "RULE_SYNTAX");
        let err = RuleChain::from_map([("between", json!(["", 2]))]).unwrap_err();
        assert_eq!(err.code(), "RULE_SYNTAX");
    }

    #[test]
    fn into_rule_chain_accepts_both_forms() {
        let a = "required|email".into_rule_chain().unwrap();
        let b = vec![("email", json!(null)), ("required", json!(null))]
            .into_rule_chain()
            .unwrap();
        assert_eq!(a, b);
    }
}
