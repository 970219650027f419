//! The rule unit contract.

use std::fmt;

use serde_json::Value;

use crate::foundation::translator::{Translator, render_message};

// ============================================================================
// RULE TRAIT
// ============================================================================

/// A stateless, named predicate over a single field value.
///
/// Rule units are instantiated once, registered under a name in a
/// [`RuleRegistry`](crate::registry::RuleRegistry) and shared by every
/// validation afterwards, so an implementation must not keep per-call state.
///
/// The value handed to [`validate`](Rule::validate) is `Value::Null` when the
/// field is missing from the input. Only the `required` rule ever observes an
/// absent value; every other rule runs on present values only.
///
/// # Examples
///
/// ```
/// use rulecraft_validator::foundation::Rule;
/// use serde_json::{Value, json};
///
/// #[derive(Debug)]
/// struct Even;
///
/// impl Rule for Even {
///     fn name(&self) -> &'static str {
///         "even"
///     }
///
///     fn message(&self) -> &'static str {
///         "must be even"
///     }
///
///     fn validate(&self, value: &Value, _params: &[String]) -> bool {
///         value.as_i64().is_some_and(|n| n % 2 == 0)
///     }
/// }
///
/// assert!(Even.validate(&json!(4), &[]));
/// assert!(!Even.validate(&json!(3), &[]));
/// ```
pub trait Rule: Send + Sync + fmt::Debug {
    /// Name the rule unit is known by.
    fn name(&self) -> &'static str;

    /// Default message template; `{0}`, `{1}`, ... refer to the parameters.
    fn message(&self) -> &'static str;

    /// Checks the declared parameters once, when a chain is compiled.
    ///
    /// Returns a human-readable reason on failure. The default accepts
    /// no parameters at all.
    fn check_params(&self, params: &[String]) -> Result<(), String> {
        if params.is_empty() {
            Ok(())
        } else {
            Err(format!("expected no parameters, got {}", params.len()))
        }
    }

    /// Returns `true` if `value` satisfies the rule.
    fn validate(&self, value: &Value, params: &[String]) -> bool;

    /// Builds the failure message: override or default template, translated,
    /// then parameters substituted.
    fn error_message(
        &self,
        params: &[String],
        message: Option<&str>,
        translator: &dyn Translator,
    ) -> String {
        let template = translator.t(message.unwrap_or_else(|| self.message()));
        render_message(&template, params)
    }
}

// ============================================================================
// PARAMETER CONTRACTS
// ============================================================================

/// Requires exactly `count` parameters.
pub fn expect_count(params: &[String], count: usize) -> Result<(), String> {
    if params.len() == count {
        Ok(())
    } else {
        Err(format!("expected {count} parameter(s), got {}", params.len()))
    }
}

/// Requires exactly `count` parameters, all parsable as `T`.
pub fn expect_parsed<T>(params: &[String], count: usize) -> Result<Vec<T>, String>
where
    T: std::str::FromStr,
{
    expect_count(params, count)?;
    params
        .iter()
        .map(|p| {
            p.parse::<T>()
                .map_err(|_| format!("parameter `{p}` has the wrong type"))
        })
        .collect()
}
