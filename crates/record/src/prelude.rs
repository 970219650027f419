//! Prelude module for convenient imports.
//!
//! Brings in the record engine together with the flat validation prelude of
//! [`rulecraft_validator`].

pub use rulecraft_validator::prelude::*;

// ============================================================================
// SCHEMA: Declarations and compiled schemas
// ============================================================================

pub use crate::config::{FieldEntry, FieldOptions, RecordConfig};
pub use crate::descriptor::{Field, FieldDescriptor, FieldKind, Hook};
pub use crate::schema::{RecordSchema, RecordSchemaBuilder};

// ============================================================================
// RECORDS: Validation targets, filters and binding
// ============================================================================

pub use crate::bind::{BindError, BindTarget, Slots};
pub use crate::filter::{Filter, FilterName, Lowercase, ToInt, Trim, filter_fn};
pub use crate::record::Record;

// ============================================================================
// FORMS: Labelled fields grouped into fieldsets
// ============================================================================

pub use crate::form::{DEFAULT_FIELDSET, FieldSet, FieldSetBuilder, Form, FormField};
