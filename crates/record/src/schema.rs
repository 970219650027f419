//! Record schemas.
//!
//! A [`RecordSchema`] is an immutable table of field descriptors, shared
//! through an `Arc` by every [`Record`](crate::record::Record) built from it
//! and by every parent schema nesting it. Schemas are built bottom-up, so a
//! schema can never contain itself.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use rulecraft_validator::chain::{IntoRuleChain, RuleChain};
use rulecraft_validator::field::FieldValidator;
use rulecraft_validator::foundation::{SchemaError, SchemaResult, Translator};
use rulecraft_validator::registry::{self, RuleRegistry};
use rulecraft_validator::validator::Validator;
use serde_json::{Map, Value};
use tracing::debug;

use crate::config::{FieldEntry, RecordConfig, decorate};
use crate::descriptor::{Field, FieldDescriptor, FieldKind, Hook};
use crate::record::Record;

const DEFAULT_NAME: &str = "record";

// ============================================================================
// RECORD SCHEMA
// ============================================================================

/// Declared fields of a record type.
pub struct RecordSchema {
    name: String,
    fields: IndexMap<String, FieldDescriptor>,
    /// Precompiled flat pass over the scalar fields.
    scalars: Validator,
}

impl RecordSchema {
    /// Starts declaring a schema.
    pub fn builder() -> RecordSchemaBuilder {
        RecordSchemaBuilder::new()
    }

    /// Builds a schema from a serialized configuration, resolving rules in
    /// `registry`.
    pub fn from_config(
        config: RecordConfig,
        registry: Arc<RuleRegistry>,
    ) -> SchemaResult<Arc<Self>> {
        RecordSchemaBuilder::from_config(config, registry)?.build()
    }

    /// Schema name, used in logs.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Looks up a field.
    pub fn field(&self, id: &str) -> Option<&FieldDescriptor> {
        self.fields.get(id)
    }

    /// Returns `true` if `id` is declared.
    pub fn contains(&self, id: &str) -> bool {
        self.fields.contains_key(id)
    }

    /// Fields in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.values()
    }

    /// Number of declared fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if no field is declared.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Creates a fresh record of this schema.
    pub fn record(self: &Arc<Self>) -> Record {
        Record::new(Arc::clone(self))
    }

    pub(crate) fn scalars(&self) -> &Validator {
        &self.scalars
    }
}

impl fmt::Debug for RecordSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordSchema")
            .field("name", &self.name)
            .field("fields", &self.fields.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

// ============================================================================
// BUILDER
// ============================================================================

/// Builder for [`RecordSchema`].
///
/// Declarations never fail on their own; the first problem is reported by
/// [`build`](Self::build).
///
/// # Examples
///
/// ```
/// use rulecraft_record::prelude::*;
///
/// let device = RecordSchema::builder()
///     .name("device")
///     .field("brand", "required|minlen:2|maxlen:128")
///     .field("ip_address", "required|ipv4")
///     .build()?;
///
/// let user = RecordSchema::builder()
///     .name("user")
///     .field("name", "required|maxlen:128")
///     .field("age", "required|numeric|between:18,120")
///     .recordset("devices", device)
///     .build()?;
///
/// assert_eq!(user.len(), 3);
/// # Ok::<(), SchemaError>(())
/// ```
pub struct RecordSchemaBuilder {
    name: String,
    registry: Option<Arc<RuleRegistry>>,
    fields: IndexMap<String, Field>,
    hooks: Vec<(String, Hook)>,
}

impl Default for RecordSchemaBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordSchemaBuilder {
    /// Creates an empty builder resolving rules in the process-wide registry.
    pub fn new() -> Self {
        Self {
            name: DEFAULT_NAME.to_owned(),
            registry: None,
            fields: IndexMap::new(),
            hooks: Vec::new(),
        }
    }

    /// Sets the schema name.
    #[must_use = "builder methods must be chained or built"]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Resolves rules in `registry` instead of the process-wide one.
    #[must_use = "builder methods must be chained or built"]
    pub fn registry(mut self, registry: Arc<RuleRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Declares a scalar field with its rules.
    #[must_use = "builder methods must be chained or built"]
    pub fn field(self, id: impl Into<String>, rules: impl IntoRuleChain) -> Self {
        self.declare(Field::new(id).rules(rules))
    }

    /// Declares an optional nested record field.
    #[must_use = "builder methods must be chained or built"]
    pub fn record(self, id: impl Into<String>, schema: Arc<RecordSchema>) -> Self {
        self.declare(Field::record(id, schema))
    }

    /// Declares an optional recordset field.
    #[must_use = "builder methods must be chained or built"]
    pub fn recordset(self, id: impl Into<String>, schema: Arc<RecordSchema>) -> Self {
        self.declare(Field::recordset(id, schema))
    }

    /// Declares a field in its full form. Re-declaring an id replaces it.
    #[must_use = "builder methods must be chained or built"]
    pub fn declare(mut self, field: Field) -> Self {
        self.fields.insert(field.id.clone(), field);
        self
    }

    /// Registers the custom hook of field `id`, replacing an earlier one.
    ///
    /// An undeclared `id` makes [`build`](Self::build) fail with
    /// [`SchemaError::UnknownField`].
    #[must_use = "builder methods must be chained or built"]
    pub fn validator<F>(mut self, id: impl Into<String>, hook: F) -> Self
    where
        F: Fn(&mut Record, &Map<String, Value>, &dyn Translator) -> bool + Send + Sync + 'static,
    {
        let hook: Hook = Arc::new(hook);
        self.hooks.push((id.into(), hook));
        self
    }

    /// Compiles every declaration.
    ///
    /// # Errors
    ///
    /// - [`SchemaError::RuleSyntax`] / [`SchemaError::UnknownRule`] from a
    ///   scalar chain
    /// - [`SchemaError::UnknownField`] for a hook on an undeclared field
    pub fn build(self) -> SchemaResult<Arc<RecordSchema>> {
        let registry = self.registry.unwrap_or_else(registry::global);
        let mut scalars = Validator::with_registry(Arc::clone(&registry));
        let mut fields = IndexMap::with_capacity(self.fields.len());

        for (id, field) in self.fields {
            let kind = field.kind?;
            let presence = match &kind {
                FieldKind::Scalar(chain) => {
                    scalars.add_field(id.clone(), chain, field.message.as_deref())?;
                    None
                }
                FieldKind::Record { .. } | FieldKind::Recordset { .. } => {
                    Some(FieldValidator::compile(
                        id.clone(),
                        RuleChain::new().require(),
                        field.message.clone(),
                        &registry,
                    )?)
                }
            };
            fields.insert(
                id.clone(),
                FieldDescriptor {
                    id,
                    kind,
                    message: field.message,
                    bind: field.bind,
                    filters: field.filters,
                    hook: None,
                    presence,
                },
            );
        }

        for (id, hook) in self.hooks {
            let descriptor = fields
                .get_mut(&id)
                .ok_or_else(|| SchemaError::unknown_field(&id))?;
            descriptor.hook = Some(hook);
        }

        debug!(schema = %self.name, fields = fields.len(), "record schema built");
        Ok(Arc::new(RecordSchema {
            name: self.name,
            fields,
            scalars,
        }))
    }

    /// Starts a builder from a serialized configuration. Nested record
    /// configurations are built first, against the same registry. Hooks can
    /// be added before building.
    pub fn from_config(config: RecordConfig, registry: Arc<RuleRegistry>) -> SchemaResult<Self> {
        let mut builder = Self::new().registry(Arc::clone(&registry));
        if let Some(name) = config.name {
            builder = builder.name(name);
        }
        for (id, entry) in config.fields {
            let field = match entry {
                FieldEntry::Record(spec) => {
                    let options = spec.options();
                    let schema = RecordSchema::from_config(*spec.record, Arc::clone(&registry))?;
                    decorate(Field::record(id, schema), options)
                }
                FieldEntry::Recordset(spec) => {
                    let options = spec.options();
                    let schema =
                        RecordSchema::from_config(*spec.recordset, Arc::clone(&registry))?;
                    decorate(Field::recordset(id, schema), options)
                }
                FieldEntry::Scalar(spec) => {
                    let options = spec.options();
                    decorate(Field::new(id).rules(spec.rules), options)
                }
                FieldEntry::Rules(rules) => Field::new(id).rules(rules),
            };
            builder = builder.declare(field);
        }
        Ok(builder)
    }
}

impl fmt::Debug for RecordSchemaBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordSchemaBuilder")
            .field("name", &self.name)
            .field("fields", &self.fields.keys().collect::<Vec<_>>())
            .field("hooks", &self.hooks.len())
            .finish_non_exhaustive()
    }
}
