//! Field descriptors.
//!
//! A [`Field`] is a declaration as written by the caller; the schema builder
//! compiles it into a [`FieldDescriptor`] once, when the schema is built.

use std::fmt;
use std::sync::Arc;

use rulecraft_validator::chain::{IntoRuleChain, RuleChain};
use rulecraft_validator::field::FieldValidator;
use rulecraft_validator::foundation::{SchemaResult, Translator};
use serde_json::{Map, Value};

use crate::filter::Filter;
use crate::record::Record;
use crate::schema::RecordSchema;

/// A custom business-rule check, run after structural validation passed.
///
/// Receives the record being validated, the full input and the translator.
/// A hook reports failure by calling [`Record::add_error`] and returning
/// `false`; the first `false` stops every later hook.
pub type Hook = Arc<dyn Fn(&mut Record, &Map<String, Value>, &dyn Translator) -> bool + Send + Sync>;

// ============================================================================
// FIELD KIND
// ============================================================================

/// What a field holds.
#[derive(Debug, Clone)]
pub enum FieldKind {
    /// A single value checked by a rule chain.
    Scalar(RuleChain),
    /// A nested mapping validated against `schema`.
    Record {
        schema: Arc<RecordSchema>,
        required: bool,
    },
    /// A list of mappings, each validated against `schema`.
    Recordset {
        schema: Arc<RecordSchema>,
        required: bool,
    },
}

impl FieldKind {
    /// Returns `true` if the field must be present.
    pub fn is_required(&self) -> bool {
        match self {
            Self::Scalar(chain) => chain.is_required(),
            Self::Record { required, .. } | Self::Recordset { required, .. } => *required,
        }
    }

    /// Nested schema of record and recordset fields.
    pub fn schema(&self) -> Option<&Arc<RecordSchema>> {
        match self {
            Self::Scalar(_) => None,
            Self::Record { schema, .. } | Self::Recordset { schema, .. } => Some(schema),
        }
    }
}

// ============================================================================
// FIELD DECLARATION
// ============================================================================

/// A field declaration.
///
/// # Examples
///
/// ```
/// use rulecraft_record::prelude::*;
///
/// let name = Field::new("name")
///     .rules("required|maxlen:128")
///     .message("please enter a name")
///     .bind("full_name")
///     .filter(Trim);
/// assert_eq!(name.id(), "name");
/// ```
#[derive(Debug, Clone)]
pub struct Field {
    pub(crate) id: String,
    pub(crate) kind: SchemaResult<FieldKind>,
    pub(crate) message: Option<String>,
    pub(crate) bind: Option<String>,
    pub(crate) filters: Vec<Arc<dyn Filter>>,
}

impl Field {
    /// Declares a scalar field with no rules.
    pub fn new(id: impl Into<String>) -> Self {
        Self::with_kind(id, Ok(FieldKind::Scalar(RuleChain::new())))
    }

    /// Declares a nested record field, optional unless [`required`](Self::required).
    pub fn record(id: impl Into<String>, schema: Arc<RecordSchema>) -> Self {
        Self::with_kind(
            id,
            Ok(FieldKind::Record {
                schema,
                required: false,
            }),
        )
    }

    /// Declares a recordset field, optional unless [`required`](Self::required).
    pub fn recordset(id: impl Into<String>, schema: Arc<RecordSchema>) -> Self {
        Self::with_kind(
            id,
            Ok(FieldKind::Recordset {
                schema,
                required: false,
            }),
        )
    }

    fn with_kind(id: impl Into<String>, kind: SchemaResult<FieldKind>) -> Self {
        Self {
            id: id.into(),
            kind,
            message: None,
            bind: None,
            filters: Vec::new(),
        }
    }

    /// Sets the rules of a scalar field. Parse errors surface when the
    /// schema is built. Ignored on record and recordset fields.
    #[must_use = "builder methods must be chained or built"]
    pub fn rules(mut self, rules: impl IntoRuleChain) -> Self {
        if matches!(self.kind, Ok(FieldKind::Scalar(_))) {
            self.kind = rules.into_rule_chain().map(FieldKind::Scalar);
        }
        self
    }

    /// Marks the field as required.
    #[must_use = "builder methods must be chained or built"]
    pub fn required(mut self) -> Self {
        self.kind = self.kind.map(|kind| match kind {
            FieldKind::Scalar(chain) => FieldKind::Scalar(chain.require()),
            FieldKind::Record { schema, .. } => FieldKind::Record {
                schema,
                required: true,
            },
            FieldKind::Recordset { schema, .. } => FieldKind::Recordset {
                schema,
                required: true,
            },
        });
        self
    }

    /// Replaces every failure message of this field with one `*` message.
    #[must_use = "builder methods must be chained or built"]
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Binds the field to the target slot `name` instead of its id.
    #[must_use = "builder methods must be chained or built"]
    pub fn bind(mut self, name: impl Into<String>) -> Self {
        self.bind = Some(name.into());
        self
    }

    /// Appends a filter run on the value before it is stored.
    #[must_use = "builder methods must be chained or built"]
    pub fn filter(mut self, filter: impl Filter + 'static) -> Self {
        self.filters.push(Arc::new(filter));
        self
    }

    /// Appends a shared filter.
    #[must_use = "builder methods must be chained or built"]
    pub fn filter_arc(mut self, filter: Arc<dyn Filter>) -> Self {
        self.filters.push(filter);
        self
    }

    /// Field id.
    pub fn id(&self) -> &str {
        &self.id
    }
}

// ============================================================================
// COMPILED DESCRIPTOR
// ============================================================================

/// A compiled field of a [`RecordSchema`].
#[derive(Clone)]
pub struct FieldDescriptor {
    pub(crate) id: String,
    pub(crate) kind: FieldKind,
    pub(crate) message: Option<String>,
    pub(crate) bind: Option<String>,
    pub(crate) filters: Vec<Arc<dyn Filter>>,
    pub(crate) hook: Option<Hook>,
    /// Presence check of record and recordset fields, reporting exactly like
    /// a scalar `required` failure.
    pub(crate) presence: Option<FieldValidator>,
}

impl FieldDescriptor {
    /// Field id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// What the field holds.
    pub fn kind(&self) -> &FieldKind {
        &self.kind
    }

    /// Field-level message override.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Target slot name: the declared bind name, or the field id.
    pub fn bind_name(&self) -> &str {
        self.bind.as_deref().unwrap_or(&self.id)
    }

    /// Returns `true` if the field must be present.
    pub fn is_required(&self) -> bool {
        self.kind.is_required()
    }

    /// Returns `true` if a custom hook is registered for the field.
    pub fn has_hook(&self) -> bool {
        self.hook.is_some()
    }

    /// Runs the declared filters over `value`. `null` is left alone.
    pub fn apply_filters(&self, value: Value) -> Value {
        if value.is_null() {
            return value;
        }
        self.filters.iter().fold(value, |value, filter| filter.apply(value))
    }
}

impl fmt::Debug for FieldDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .field("message", &self.message)
            .field("bind", &self.bind)
            .field("filters", &self.filters)
            .field("hook", &self.hook.is_some())
            .finish_non_exhaustive()
    }
}
