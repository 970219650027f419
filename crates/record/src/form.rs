//! Forms.
//!
//! A [`Form`] is a set of labelled input fields grouped into fieldsets and
//! validated by one shared [`Validator`]. Fields added without a fieldset go
//! to [`DEFAULT_FIELDSET`]. Values are kept per field and refreshed each
//! time the form validates.
//!
//! # Examples
//!
//! ```
//! use rulecraft_record::prelude::*;
//! use serde_json::{json, Value};
//!
//! let mut form = Form::new();
//! form.field(FormField::new("text", "name", "Full Name").rules("required|minlen:3"))?
//!     .field(FormField::new("email", "email", "Email").rules("required|email"))?;
//! form.fieldset("extra", "Extra")
//!     .field(FormField::new("textarea", "notes", "Notes").rules("maxlen:200"))?;
//!
//! let data = json!({ "name": "Ada Lovelace", "email": "ada@example.com" });
//! assert!(form.is_valid(data.as_object().unwrap(), None));
//! assert_eq!(form.get("name"), Some(&json!("Ada Lovelace")));
//! assert_eq!(form.get("notes"), Some(&Value::Null));
//! # Ok::<(), SchemaError>(())
//! ```

use std::sync::Arc;

use indexmap::IndexMap;
use rulecraft_validator::chain::{IntoRuleChain, RuleChain};
use rulecraft_validator::foundation::{SchemaError, SchemaResult, Translator};
use rulecraft_validator::registry::RuleRegistry;
use rulecraft_validator::tree::ErrorTree;
use rulecraft_validator::validator::Validator;
use serde_json::{Map, Value};
use tracing::debug;

/// Id of the fieldset that receives fields added through [`Form::field`].
pub const DEFAULT_FIELDSET: &str = "__default__";

// ============================================================================
// FIELD
// ============================================================================

/// A form input: its kind, label, rules and presentation hints.
///
/// `kind` is free text such as `"text"`, `"email"` or `"select"`; it is
/// carried for rendering and never affects validation.
#[derive(Debug, Clone)]
pub struct FormField {
    id: String,
    kind: String,
    label: String,
    value: Value,
    rules: SchemaResult<RuleChain>,
    message: Option<String>,
    select: IndexMap<String, String>,
    attributes: IndexMap<String, String>,
    options: Map<String, Value>,
}

impl FormField {
    /// Declares a field with no rules.
    pub fn new(kind: impl Into<String>, id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
            label: label.into(),
            value: Value::Null,
            rules: Ok(RuleChain::new()),
            message: None,
            select: IndexMap::new(),
            attributes: IndexMap::new(),
            options: Map::new(),
        }
    }

    /// Sets the rules. Parse errors surface when the field is added to a form.
    #[must_use = "builder methods must be chained or added to a form"]
    pub fn rules(mut self, rules: impl IntoRuleChain) -> Self {
        let required = self.rules.as_ref().is_ok_and(RuleChain::is_required);
        self.rules = rules.into_rule_chain();
        if required {
            return self.required();
        }
        self
    }

    /// Marks the field as required.
    #[must_use = "builder methods must be chained or added to a form"]
    pub fn required(mut self) -> Self {
        self.rules = self.rules.map(RuleChain::require);
        self
    }

    /// Replaces every failure message of this field with one `*` message.
    #[must_use = "builder methods must be chained or added to a form"]
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Initial value, shown until the form validates.
    #[must_use = "builder methods must be chained or added to a form"]
    pub fn value(mut self, value: impl Into<Value>) -> Self {
        self.value = value.into();
        self
    }

    /// Adds a choice for select-like inputs.
    #[must_use = "builder methods must be chained or added to a form"]
    pub fn choice(mut self, value: impl Into<String>, label: impl Into<String>) -> Self {
        self.select.insert(value.into(), label.into());
        self
    }

    /// Adds a presentation attribute such as `placeholder` or `class`.
    #[must_use = "builder methods must be chained or added to a form"]
    pub fn attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Adds a field-specific option for whoever renders the form.
    #[must_use = "builder methods must be chained or added to a form"]
    pub fn option(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.options.insert(name.into(), value.into());
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Current value; `null` until set or validated.
    pub fn current(&self) -> &Value {
        &self.value
    }

    /// Choices in declaration order, value to label.
    pub fn choices(&self) -> &IndexMap<String, String> {
        &self.select
    }

    pub fn attributes(&self) -> &IndexMap<String, String> {
        &self.attributes
    }

    pub fn options(&self) -> &Map<String, Value> {
        &self.options
    }

    /// Returns `true` if the field carries `required`.
    pub fn is_required(&self) -> bool {
        self.rules.as_ref().is_ok_and(RuleChain::is_required)
    }
}

// ============================================================================
// FIELDSET
// ============================================================================

/// A named, labelled group of fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSet {
    id: String,
    label: String,
    fields: Vec<String>,
}

impl FieldSet {
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Legend of the group; empty for the default fieldset.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Ids of the fields in this group, in declaration order.
    pub fn field_ids(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(String::as_str)
    }
}

/// Adds fields to one fieldset of a form. Returned by [`Form::fieldset`].
#[derive(Debug)]
pub struct FieldSetBuilder<'a> {
    form: &'a mut Form,
    fieldset: String,
}

impl FieldSetBuilder<'_> {
    /// Adds `field` to this fieldset.
    ///
    /// # Errors
    ///
    /// Same as [`Form::field`].
    pub fn field(self, field: FormField) -> SchemaResult<Self> {
        self.form.insert(&self.fieldset, field)?;
        Ok(self)
    }
}

// ============================================================================
// FORM
// ============================================================================

/// Labelled fields grouped into fieldsets over a shared [`Validator`].
#[derive(Debug)]
pub struct Form {
    validator: Validator,
    fieldsets: IndexMap<String, FieldSet>,
    fields: IndexMap<String, FormField>,
}

impl Default for Form {
    fn default() -> Self {
        Self::new()
    }
}

impl Form {
    /// Creates an empty form over the global rule registry.
    pub fn new() -> Self {
        Self::with_validator(Validator::new())
    }

    /// Creates an empty form resolving rule names in `registry`.
    pub fn with_registry(registry: Arc<RuleRegistry>) -> Self {
        Self::with_validator(Validator::with_registry(registry))
    }

    fn with_validator(validator: Validator) -> Self {
        let mut form = Self {
            validator,
            fieldsets: IndexMap::new(),
            fields: IndexMap::new(),
        };
        form.ensure_fieldset(DEFAULT_FIELDSET, "");
        form
    }

    fn ensure_fieldset(&mut self, id: &str, label: &str) {
        if !self.fieldsets.contains_key(id) {
            self.fieldsets.insert(
                id.to_owned(),
                FieldSet {
                    id: id.to_owned(),
                    label: label.to_owned(),
                    fields: Vec::new(),
                },
            );
        }
    }

    /// Selects fieldset `id` for adding fields, creating it with `label` if
    /// it does not exist yet. An existing fieldset keeps its label.
    pub fn fieldset(&mut self, id: &str, label: &str) -> FieldSetBuilder<'_> {
        self.ensure_fieldset(id, label);
        FieldSetBuilder {
            form: self,
            fieldset: id.to_owned(),
        }
    }

    /// Adds `field` to the default fieldset.
    ///
    /// # Errors
    ///
    /// - [`SchemaError::DuplicateField`] if a field with the same id exists
    ///   in any fieldset
    /// - [`SchemaError::RuleSyntax`] / [`SchemaError::UnknownRule`] from the
    ///   field's rules
    pub fn field(&mut self, field: FormField) -> SchemaResult<&mut Self> {
        self.insert(DEFAULT_FIELDSET, field)?;
        Ok(self)
    }

    fn insert(&mut self, fieldset: &str, field: FormField) -> SchemaResult<()> {
        if self.fields.contains_key(&field.id) {
            return Err(SchemaError::DuplicateField { field: field.id });
        }
        let rules = field.rules.clone()?;
        self.validator
            .add_field(field.id.clone(), rules, field.message.as_deref())?;
        if let Some(set) = self.fieldsets.get_mut(fieldset) {
            set.fields.push(field.id.clone());
        }
        debug!(field = %field.id, fieldset, kind = %field.kind, "form field declared");
        self.fields.insert(field.id.clone(), field);
        Ok(())
    }

    /// Validates `data` against every field.
    ///
    /// On success each field takes its value from `data`, `null` when the
    /// key is missing. On failure the values are left as they were.
    pub fn is_valid(&mut self, data: &Map<String, Value>, translator: Option<&dyn Translator>) -> bool {
        if !self.validator.is_valid(data, translator) {
            return false;
        }
        for (id, field) in &mut self.fields {
            field.value = data.get(id).cloned().unwrap_or(Value::Null);
        }
        true
    }

    /// Errors of the last validation.
    pub fn errors(&self) -> &ErrorTree {
        self.validator.errors()
    }

    /// Errors of the last validation as a JSON mapping.
    pub fn error_messages(&self) -> Value {
        self.validator.errors().to_json()
    }

    /// Current value of field `id`, `None` if no such field exists.
    pub fn get(&self, id: &str) -> Option<&Value> {
        self.fields.get(id).map(FormField::current)
    }

    /// Overrides the current value of field `id`.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::UnknownField`] if `id` was never declared.
    pub fn set(&mut self, id: &str, value: impl Into<Value>) -> SchemaResult<&mut Self> {
        let field = self
            .fields
            .get_mut(id)
            .ok_or_else(|| SchemaError::unknown_field(id))?;
        field.value = value.into();
        Ok(self)
    }

    /// Every current value by field id.
    pub fn data(&self) -> Map<String, Value> {
        self.fields
            .iter()
            .map(|(id, field)| (id.clone(), field.value.clone()))
            .collect()
    }

    /// Declared field `id`.
    pub fn get_field(&self, id: &str) -> Option<&FormField> {
        self.fields.get(id)
    }

    /// Every field in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = &FormField> {
        self.fields.values()
    }

    /// Every fieldset in creation order, the default one first.
    pub fn fieldsets(&self) -> impl Iterator<Item = &FieldSet> {
        self.fieldsets.values()
    }

    /// Fields of fieldset `id` in declaration order; empty for an unknown id.
    pub fn fields_in(&self, id: &str) -> impl Iterator<Item = &FormField> {
        self.fieldsets
            .get(id)
            .into_iter()
            .flat_map(|set| set.fields.iter())
            .filter_map(|field| self.fields.get(field))
    }

    /// The validator backing this form.
    pub fn validator(&self) -> &Validator {
        &self.validator
    }
}
