//! Validator
//!
//! Runs field validators across a flat data mapping and keeps the resulting
//! [`ErrorTree`].

use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::{Map, Value};
use tracing::debug;

use crate::chain::IntoRuleChain;
use crate::config::ValidatorConfig;
use crate::field::FieldValidator;
use crate::foundation::{NoopTranslator, SchemaError, SchemaResult, Translator};
use crate::registry::{self, RuleRegistry};
use crate::tree::{ErrorTree, FieldErrors};

/// A declared set of fields and the errors of the last validation.
///
/// Declaration errors surface immediately from [`add_field`](Self::add_field);
/// data errors never do: [`is_valid`](Self::is_valid) returns `false` and
/// [`errors`](Self::errors) explains why.
///
/// `is_valid` replaces the error tree, so an instance must not be shared
/// across concurrent validations without external locking.
///
/// # Examples
///
/// ```
/// use rulecraft_validator::prelude::*;
/// use serde_json::json;
///
/// let mut validator = Validator::new();
/// validator
///     .add_field("name", "required|minlen:3", None)?
///     .add_field("age", "required|numeric|between:18,120", None)?;
///
/// let data = json!({ "name": "Jo", "age": "17" });
/// assert!(!validator.is_valid(data.as_object().unwrap(), None));
/// assert_eq!(
///     validator.errors().to_json(),
///     json!({
///         "name": { "minlen": "minimum allowed length is 3" },
///         "age": { "between": "must be between 18 and 120" }
///     })
/// );
/// # Ok::<(), SchemaError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Validator {
    registry: Arc<RuleRegistry>,
    fields: IndexMap<String, FieldValidator>,
    errors: ErrorTree,
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator {
    /// Creates an empty validator resolving rules in the process-wide
    /// registry.
    #[must_use]
    pub fn new() -> Self {
        Self::with_registry(registry::global())
    }

    /// Creates an empty validator resolving rules in `registry`.
    #[must_use]
    pub fn with_registry(registry: Arc<RuleRegistry>) -> Self {
        Self {
            registry,
            fields: IndexMap::new(),
            errors: ErrorTree::new(),
        }
    }

    /// Builds a validator from a serialized schema.
    pub fn from_config(config: ValidatorConfig, registry: Arc<RuleRegistry>) -> SchemaResult<Self> {
        let mut validator = Self::with_registry(registry);
        validator.load(config)?;
        Ok(validator)
    }

    /// Declares `id` with its rules, replacing an earlier declaration of the
    /// same id.
    ///
    /// # Errors
    ///
    /// - [`SchemaError::RuleSyntax`] for a malformed chain or parameters a
    ///   rule rejects
    /// - [`SchemaError::UnknownRule`] for a rule the registry lacks
    pub fn add_field(
        &mut self,
        id: impl Into<String>,
        rules: impl IntoRuleChain,
        message: Option<&str>,
    ) -> SchemaResult<&mut Self> {
        let id = id.into();
        let field = FieldValidator::compile(
            id.clone(),
            rules.into_rule_chain()?,
            message.map(str::to_owned),
            &self.registry,
        )?;
        debug!(field = %id, chain = %field.chain(), "field declared");
        self.fields.insert(id, field);
        Ok(self)
    }

    /// Replaces every declared field with the fields of `config`.
    ///
    /// Nothing changes unless the whole configuration compiles.
    pub fn load(&mut self, config: ValidatorConfig) -> SchemaResult<()> {
        let mut fields = IndexMap::with_capacity(config.fields.len());
        for (id, field) in config.fields {
            let (chain, message) = field.into_parts()?;
            let compiled = FieldValidator::compile(id.clone(), chain, message, &self.registry)?;
            fields.insert(id, compiled);
        }
        debug!(fields = fields.len(), "schema loaded");
        self.fields = fields;
        self.errors.clear();
        Ok(())
    }

    /// Validates every declared field against `data`.
    ///
    /// Missing keys count as `null`. Keys in `data` that were not declared
    /// are ignored. The previous error tree is discarded.
    pub fn is_valid(&mut self, data: &Map<String, Value>, translator: Option<&dyn Translator>) -> bool {
        let translator = translator.unwrap_or(&NoopTranslator);
        let mut errors = ErrorTree::new();
        for (id, field) in &self.fields {
            let value = data.get(id).unwrap_or(&Value::Null);
            if let Some(failed) = field.validate(value, translator).into_errors() {
                errors.insert(id.clone(), failed);
            }
        }
        self.errors = errors;
        debug!(
            fields = self.fields.len(),
            failed = self.errors.len(),
            "validation finished"
        );
        self.errors.is_empty()
    }

    /// Errors of the last [`is_valid`](Self::is_valid) call.
    pub fn errors(&self) -> &ErrorTree {
        &self.errors
    }

    /// Sets a single wildcard-keyed error on `id`, dropping its other errors.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::UnknownField`] if `id` was never declared.
    pub fn add_error(
        &mut self,
        id: &str,
        message: &str,
        translator: Option<&dyn Translator>,
    ) -> SchemaResult<()> {
        if !self.fields.contains_key(id) {
            return Err(SchemaError::unknown_field(id));
        }
        let translator = translator.unwrap_or(&NoopTranslator);
        self.errors
            .insert(id.to_owned(), FieldErrors::wildcard(translator.t(message)));
        Ok(())
    }

    /// Drops every recorded error.
    pub fn clear_errors(&mut self) {
        self.errors.clear();
    }

    /// Declared field, if any.
    pub fn field(&self, id: &str) -> Option<&FieldValidator> {
        self.fields.get(id)
    }

    /// Declared fields, in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = &FieldValidator> {
        self.fields.values()
    }

    /// Returns `true` if `id` was declared.
    pub fn contains(&self, id: &str) -> bool {
        self.fields.contains_key(id)
    }

    /// Registry rules are resolved in.
    pub fn registry(&self) -> &Arc<RuleRegistry> {
        &self.registry
    }
}
