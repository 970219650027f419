//! Record instances.

use std::collections::BTreeMap;
use std::sync::Arc;

use indexmap::IndexMap;
use rulecraft_validator::foundation::{NoopTranslator, SchemaError, SchemaResult, Translator};
use rulecraft_validator::tree::{ErrorTree, FieldErrors, WILDCARD_KEY};
use rulecraft_validator::validator::Validator;
use rulecraft_validator::value::is_absent;
use serde_json::{Map, Value};
use tracing::{debug, trace};

use crate::bind::{BindError, BindTarget, Binding, assign};
use crate::descriptor::{FieldDescriptor, FieldKind};
use crate::schema::RecordSchema;

/// Rule key of a nested record given something other than a mapping.
pub const RECORD_KEY: &str = "record";

/// Rule key of a recordset given something other than a list.
pub const RECORDSET_KEY: &str = "recordset";

const INVALID_RECORD: &str = "invalid record";
const INVALID_RECORDSET: &str = "invalid recordset";

static NULL: Value = Value::Null;

// ============================================================================
// RECORD
// ============================================================================

/// One validation target of a [`RecordSchema`]: its error tree and, after a
/// successful validation, its stored values.
///
/// Values are stored only when the whole record passes, and are reset to
/// `null` at the start of every validation, so a failed call never leaves
/// values from an earlier one behind.
///
/// # Examples
///
/// ```
/// use rulecraft_record::prelude::*;
/// use serde_json::json;
///
/// let address = RecordSchema::builder()
///     .field("city", "required")
///     .build()?;
/// let contact = RecordSchema::builder()
///     .field("name", "required")
///     .declare(Field::record("address", address).required())
///     .build()?;
///
/// let mut record = contact.record();
/// let data = json!({ "name": "Jane", "address": { "city": "" } });
/// assert!(!record.is_valid(data.as_object().unwrap(), None));
/// assert_eq!(
///     record.errors().to_json(),
///     json!({ "address": { "_": { "city": { "required": "value required" } } } })
/// );
/// # Ok::<(), SchemaError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Record {
    schema: Arc<RecordSchema>,
    scalars: Validator,
    errors: ErrorTree,
    values: IndexMap<String, Value>,
}

impl Record {
    /// Creates a record with every value `null` and no errors.
    pub fn new(schema: Arc<RecordSchema>) -> Self {
        let values = null_values(&schema);
        Self {
            scalars: schema.scalars().clone(),
            schema,
            errors: ErrorTree::new(),
            values,
        }
    }

    /// Schema of this record.
    pub fn schema(&self) -> &Arc<RecordSchema> {
        &self.schema
    }

    /// Replaces the schema wholesale, dropping errors and values.
    pub fn set_schema(&mut self, schema: Arc<RecordSchema>) {
        *self = Self::new(schema);
    }

    /// Validates `data`:
    ///
    /// 1. scalar fields, stopping here on any failure
    /// 2. nested records and recordsets, recursively
    /// 3. custom hooks in declaration order, stopping at the first `false`
    /// 4. on success, stores every field value through its filters
    ///
    /// The previous error tree is discarded.
    pub fn is_valid(&mut self, data: &Map<String, Value>, translator: Option<&dyn Translator>) -> bool {
        let translator = translator.unwrap_or(&NoopTranslator);
        self.errors.clear();
        self.values = null_values(&self.schema);

        if !self.scalars.is_valid(data, Some(translator)) {
            self.errors = self.scalars.errors().clone();
            return self.finish(false, "scalar fields failed");
        }

        let schema = Arc::clone(&self.schema);
        let mut nested = IndexMap::new();
        let mut errors = ErrorTree::new();
        for field in schema.fields() {
            let value = data.get(field.id()).unwrap_or(&NULL);
            let checked = match field.kind() {
                FieldKind::Scalar(_) => continue,
                FieldKind::Record { schema, .. } => check_record(field, schema, value, translator),
                FieldKind::Recordset { schema, .. } => {
                    check_recordset(field, schema, value, translator)
                }
            };
            match checked {
                Ok(stored) => {
                    nested.insert(field.id().to_owned(), stored);
                }
                Err(failed) => errors.insert(field.id(), failed),
            }
        }
        if !errors.is_empty() {
            self.errors = errors;
            return self.finish(false, "nested fields failed");
        }

        for field in schema.fields() {
            let Some(hook) = &field.hook else { continue };
            trace!(record = %schema.name(), field = field.id(), "running custom validator");
            if !hook(self, data, translator) {
                return self.finish(false, "custom validator failed");
            }
        }
        if !self.errors.is_empty() {
            return self.finish(false, "custom validator added errors");
        }

        for field in schema.fields() {
            let raw = match field.kind() {
                FieldKind::Scalar(_) => data.get(field.id()).cloned(),
                FieldKind::Record { .. } | FieldKind::Recordset { .. } => {
                    nested.shift_remove(field.id())
                }
            };
            let stored = field.apply_filters(raw.unwrap_or(Value::Null));
            self.values.insert(field.id().to_owned(), stored);
        }
        self.finish(true, "record validated")
    }

    fn finish(&self, valid: bool, outcome: &str) -> bool {
        debug!(
            record = %self.schema.name(),
            valid,
            failed = self.errors.len(),
            "{outcome}"
        );
        valid
    }

    /// Errors of the last validation, plus any added since.
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
    ) -> SchemaResult<&mut Self> {
        if !self.schema.contains(id) {
            return Err(SchemaError::unknown_field(id));
        }
        let translator = translator.unwrap_or(&NoopTranslator);
        self.errors.set_wildcard(id, translator.t(message));
        Ok(self)
    }

    /// Drops every recorded error.
    pub fn clear_errors(&mut self) {
        self.errors.clear();
    }

    /// Stored value of `id`; `None` if `id` was never declared.
    pub fn get(&self, id: &str) -> Option<&Value> {
        self.values.get(id)
    }

    /// Overwrites the stored value of `id`.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::UnknownField`] if `id` was never declared.
    pub fn set(&mut self, id: &str, value: impl Into<Value>) -> SchemaResult<&mut Self> {
        let slot = self
            .values
            .get_mut(id)
            .ok_or_else(|| SchemaError::unknown_field(id))?;
        *slot = value.into();
        Ok(self)
    }

    /// Every stored value by field id, nested records as mappings and
    /// recordsets as lists of mappings.
    ///
    /// Absent top-level fields map to `null`; inside nested mappings absent
    /// fields are omitted.
    pub fn data(&self) -> Map<String, Value> {
        self.values
            .iter()
            .map(|(id, value)| (id.clone(), value.clone()))
            .collect()
    }

    /// Stored values without the `null` entries, the shape a nested record
    /// keeps in its parent.
    fn present_data(&self) -> Map<String, Value> {
        self.values
            .iter()
            .filter(|(_, value)| !value.is_null())
            .map(|(id, value)| (id.clone(), value.clone()))
            .collect()
    }

    // ------------------------------------------------------------------------
    // Binding
    // ------------------------------------------------------------------------

    /// Binds stored values onto a fresh `T`. Values without a slot are
    /// skipped.
    pub fn bind<T: BindTarget + Default>(&self) -> Result<T, BindError> {
        let mut target = T::default();
        self.bind_into(&mut target)?;
        Ok(target)
    }

    /// Binds stored values onto an existing `target`. Values without a slot
    /// are skipped.
    pub fn bind_into<T: BindTarget>(&self, target: &mut T) -> Result<(), BindError> {
        assign(target, self.bindings()).map(|_| ())
    }

    /// Binds stored values onto a fresh `T`, also returning the non-null
    /// values that had no slot, keyed by field id.
    pub fn bindx<T: BindTarget + Default>(&self) -> Result<(T, Map<String, Value>), BindError> {
        let mut target = T::default();
        let unmapped = self.bindx_into(&mut target)?;
        Ok((target, unmapped))
    }

    /// Binds stored values onto `target`, returning the non-null values that
    /// had no slot, keyed by field id.
    pub fn bindx_into<T: BindTarget>(&self, target: &mut T) -> Result<Map<String, Value>, BindError> {
        assign(target, self.bindings())
    }

    fn bindings(&self) -> impl Iterator<Item = Binding<'_>> {
        self.schema.fields().map(|field| Binding {
            field: field.id(),
            slot: field.bind_name(),
            value: self.values.get(field.id()).unwrap_or(&NULL),
        })
    }
}

fn null_values(schema: &RecordSchema) -> IndexMap<String, Value> {
    schema
        .fields()
        .map(|field| (field.id().to_owned(), Value::Null))
        .collect()
}

// ============================================================================
// NESTED CHECKS
// ============================================================================

/// The `required` failure of `field`, reported like a scalar one.
fn required_error(field: &FieldDescriptor, translator: &dyn Translator) -> FieldErrors {
    field
        .presence
        .as_ref()
        .and_then(|presence| presence.validate(&NULL, translator).into_errors())
        .unwrap_or_else(|| shape_error(field, "required", "value required", translator))
}

fn shape_error(
    field: &FieldDescriptor,
    key: &str,
    message: &str,
    translator: &dyn Translator,
) -> FieldErrors {
    match field.message() {
        Some(message) => FieldErrors::wildcard(translator.t(message)),
        None => FieldErrors::rule(key, translator.t(message)),
    }
}

fn check_record(
    field: &FieldDescriptor,
    schema: &Arc<RecordSchema>,
    value: &Value,
    translator: &dyn Translator,
) -> Result<Value, FieldErrors> {
    match value {
        Value::Object(map) => {
            let mut nested = Record::new(Arc::clone(schema));
            if nested.is_valid(map, Some(translator)) {
                Ok(Value::Object(nested.present_data()))
            } else {
                Err(FieldErrors::Record(nested.errors))
            }
        }
        absent if is_absent(absent) => {
            if field.is_required() {
                Err(required_error(field, translator))
            } else {
                Ok(Value::Null)
            }
        }
        _ => Err(shape_error(field, RECORD_KEY, INVALID_RECORD, translator)),
    }
}

fn check_recordset(
    field: &FieldDescriptor,
    schema: &Arc<RecordSchema>,
    value: &Value,
    translator: &dyn Translator,
) -> Result<Value, FieldErrors> {
    let items = match value {
        Value::Array(items) => items,
        _ if field.is_required() => return Err(required_error(field, translator)),
        absent if is_absent(absent) => return Ok(Value::Null),
        _ => return Err(shape_error(field, RECORDSET_KEY, INVALID_RECORDSET, translator)),
    };

    let mut stored = Vec::with_capacity(items.len());
    let mut failed = BTreeMap::new();
    for (index, item) in items.iter().enumerate() {
        let Value::Object(map) = item else {
            let mut tree = ErrorTree::new();
            tree.insert(
                WILDCARD_KEY,
                FieldErrors::rule(RECORD_KEY, translator.t(INVALID_RECORD)),
            );
            failed.insert(index, tree);
            continue;
        };
        let mut nested = Record::new(Arc::clone(schema));
        if nested.is_valid(map, Some(translator)) {
            stored.push(Value::Object(nested.present_data()));
        } else {
            failed.insert(index, nested.errors);
        }
    }

    if failed.is_empty() {
        Ok(Value::Array(stored))
    } else {
        Err(FieldErrors::Recordset(failed))
    }
}
