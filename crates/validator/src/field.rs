//! Field Validator
//!
//! Evaluates one field's compiled rule chain against one value.

use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::Value;
use tracing::trace;

use crate::chain::{RuleCall, RuleChain};
use crate::foundation::{Rule, SchemaError, SchemaResult, Translator};
use crate::registry::RuleRegistry;
use crate::tree::{FieldErrors, WILDCARD_KEY};
use crate::value::is_absent;

// ============================================================================
// OUTCOME
// ============================================================================

/// Result of validating one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldOutcome {
    /// Every rule passed.
    Valid,
    /// Optional field without a value; no rule ran.
    Skipped,
    /// Failing rule name (or `*`) → message.
    Invalid(IndexMap<String, String>),
}

impl FieldOutcome {
    /// Returns `true` unless the field failed.
    pub fn is_valid(&self) -> bool {
        !matches!(self, Self::Invalid(_))
    }

    /// The failures as tree entries, if the field failed.
    pub fn into_errors(self) -> Option<FieldErrors> {
        match self {
            Self::Invalid(rules) => Some(FieldErrors::Rules(rules)),
            Self::Valid | Self::Skipped => None,
        }
    }
}

// ============================================================================
// FIELD VALIDATOR
// ============================================================================

/// A field id with its chain resolved against a registry.
///
/// Rules are resolved and their parameters checked once, here, so a field
/// validator that exists can always run.
#[derive(Debug, Clone)]
pub struct FieldValidator {
    id: String,
    chain: RuleChain,
    rules: Vec<Arc<dyn Rule>>,
    message: Option<String>,
}

impl FieldValidator {
    /// Resolves every call of `chain` in `registry`.
    ///
    /// # Errors
    ///
    /// - [`SchemaError::UnknownRule`] for a name missing from `registry`
    /// - [`SchemaError::RuleSyntax`] when parameters break a rule's contract
    pub fn compile(
        id: impl Into<String>,
        chain: RuleChain,
        message: Option<String>,
        registry: &RuleRegistry,
    ) -> SchemaResult<Self> {
        let rules = chain
            .iter()
            .map(|call| {
                let rule = registry.resolve(call.name())?;
                rule.check_params(call.params())
                    .map_err(|reason| SchemaError::syntax(call.to_string(), reason))?;
                Ok(rule)
            })
            .collect::<SchemaResult<Vec<_>>>()?;

        Ok(Self {
            id: id.into(),
            chain,
            rules,
            message,
        })
    }

    /// Field id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Declared chain.
    pub fn chain(&self) -> &RuleChain {
        &self.chain
    }

    /// Field-level message override.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Returns `true` if the chain starts with `required`.
    pub fn is_required(&self) -> bool {
        self.chain.is_required()
    }

    /// Validates `value`, `Value::Null` standing in for a missing one.
    ///
    /// - a failing `required` stops the chain with exactly one entry
    /// - an absent value on an optional field skips every rule
    /// - otherwise every rule runs and every failure is kept
    /// - a field-level override collapses failures into one `*` entry
    pub fn validate(&self, value: &Value, translator: &dyn Translator) -> FieldOutcome {
        let mut calls = self.chain.iter().zip(&self.rules).peekable();

        if let Some((call, rule)) = calls.next_if(|(call, _)| call.is_required()) {
            if !self.passes(call, Arc::as_ref(rule), value) {
                return self.fail(vec![(call, Arc::as_ref(rule))], translator);
            }
        } else if is_absent(value) {
            trace!(field = %self.id, "optional field absent, rules skipped");
            return FieldOutcome::Skipped;
        }

        let failed: Vec<(&RuleCall, &dyn Rule)> = calls
            .filter(|&(call, rule)| !self.passes(call, Arc::as_ref(rule), value))
            .map(|(call, rule)| (call, Arc::as_ref(rule)))
            .collect();

        if failed.is_empty() {
            FieldOutcome::Valid
        } else {
            self.fail(failed, translator)
        }
    }

    fn passes(&self, call: &RuleCall, rule: &dyn Rule, value: &Value) -> bool {
        let passed = rule.validate(value, call.params());
        trace!(field = %self.id, rule = call.name(), passed, "rule evaluated");
        passed
    }

    fn fail(&self, failed: Vec<(&RuleCall, &dyn Rule)>, translator: &dyn Translator) -> FieldOutcome {
        let mut errors = IndexMap::new();
        if let Some(message) = &self.message {
            errors.insert(WILDCARD_KEY.to_owned(), translator.t(message));
        } else {
            for (call, rule) in failed {
                let message = rule.error_message(call.params(), call.message(), translator);
                errors.insert(call.name().to_owned(), message);
            }
        }
        FieldOutcome::Invalid(errors)
    }
}
