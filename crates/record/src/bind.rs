//! Binding validated values onto typed targets.
//!
//! A target type lists its writable slots once, in a [`Slots`] table. Each
//! slot owns a typed setter; the stored JSON value is converted with serde
//! before the setter runs. Fields whose bind name has no slot are skipped, or
//! returned to the caller by [`Record::bindx`](crate::record::Record::bindx).
//!
//! # Examples
//!
//! ```
//! use rulecraft_record::bind::{BindTarget, Slots};
//!
//! #[derive(Debug, Default)]
//! struct User {
//!     name: String,
//!     age: u8,
//! }
//!
//! impl BindTarget for User {
//!     fn slots() -> Slots<Self> {
//!         Slots::new()
//!             .slot("name", |u: &mut User, v: String| u.name = v)
//!             .slot("age", |u: &mut User, v: u8| u.age = v)
//!     }
//! }
//! ```

use std::fmt;

use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::debug;

// ============================================================================
// ERRORS
// ============================================================================

/// Error raised while binding stored values onto a target.
#[derive(Debug, thiserror::Error)]
pub enum BindError {
    /// A stored value could not be converted into the slot's type.
    #[error("cannot bind field `{field}` to slot `{slot}`: {source}")]
    Conversion {
        field: String,
        slot: String,
        #[source]
        source: serde_json::Error,
    },
}

impl BindError {
    /// Broad error category for grouping in logs.
    #[must_use]
    pub fn category(&self) -> &str {
        match self {
            Self::Conversion { .. } => "conversion",
        }
    }

    /// Machine-readable error code for programmatic handling.
    #[must_use]
    pub fn code(&self) -> &str {
        match self {
            Self::Conversion { .. } => "BIND_CONVERSION",
        }
    }
}

// ============================================================================
// SLOTS
// ============================================================================

type Setter<T> = Box<dyn Fn(&mut T, Value) -> Result<(), serde_json::Error> + Send + Sync>;

/// Writable slots of a target type, by name.
pub struct Slots<T> {
    setters: IndexMap<String, Setter<T>>,
}

impl<T> Default for Slots<T> {
    fn default() -> Self {
        Self {
            setters: IndexMap::new(),
        }
    }
}

impl<T> Slots<T> {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a slot whose value is deserialized into `V` before `set` runs.
    #[must_use = "builder methods must be chained or built"]
    pub fn slot<V, F>(mut self, name: impl Into<String>, set: F) -> Self
    where
        T: 'static,
        V: DeserializeOwned + 'static,
        F: Fn(&mut T, V) + Send + Sync + 'static,
    {
        let setter: Setter<T> = Box::new(move |target, value| {
            set(target, serde_json::from_value(value)?);
            Ok(())
        });
        self.setters.insert(name.into(), setter);
        self
    }

    /// Returns `true` if a slot named `name` exists.
    pub fn contains(&self, name: &str) -> bool {
        self.setters.contains_key(name)
    }

    /// Slot names, in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.setters.keys().map(String::as_str)
    }

    /// Number of slots.
    pub fn len(&self) -> usize {
        self.setters.len()
    }

    /// Returns `true` if the table has no slot.
    pub fn is_empty(&self) -> bool {
        self.setters.is_empty()
    }
}

impl<T> fmt::Debug for Slots<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Slots")
            .field("names", &self.setters.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// A type validated records can bind onto.
pub trait BindTarget: Sized {
    /// The writable slots of `Self`.
    fn slots() -> Slots<Self>;
}

// ============================================================================
// ASSIGNMENT
// ============================================================================

/// One stored value ready for binding.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Binding<'a> {
    pub field: &'a str,
    pub slot: &'a str,
    pub value: &'a Value,
}

/// Writes `bindings` onto `target`, returning the values that had no slot,
/// keyed by field id. `null` values are neither written nor returned.
pub(crate) fn assign<'a, T: BindTarget>(
    target: &mut T,
    bindings: impl IntoIterator<Item = Binding<'a>>,
) -> Result<Map<String, Value>, BindError> {
    let slots = T::slots();
    let mut unmapped = Map::new();
    for Binding { field, slot, value } in bindings {
        if value.is_null() {
            continue;
        }
        match slots.setters.get(slot) {
            Some(setter) => {
                setter(target, value.clone()).map_err(|source| BindError::Conversion {
                    field: field.to_owned(),
                    slot: slot.to_owned(),
                    source,
                })?;
            }
            None => {
                debug!(field, slot, "no slot on target, value left unbound");
                unmapped.insert(field.to_owned(), value.clone());
            }
        }
    }
    Ok(unmapped)
}
