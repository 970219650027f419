//! Prelude module for convenient imports.
//!
//! Provides a single `use rulecraft_validator::prelude::*;` import that brings
//! in the validator, its schema types and the error tree.
//!
//! # Examples
//!
//! ```rust,ignore
//! use rulecraft_validator::prelude::*;
//!
//! let mut validator = Validator::new();
//! validator.add_field("email", "required|email", None)?;
//! ```

// ============================================================================
// FOUNDATION: Contracts and schema errors
// ============================================================================

pub use crate::foundation::{NoopTranslator, Rule, SchemaError, SchemaResult, Translator};

// ============================================================================
// SCHEMA: Registry, chains and validators
// ============================================================================

pub use crate::chain::{IntoRuleChain, RuleCall, RuleChain};
pub use crate::config::{FieldConfig, FieldSpec, RuleSpec, ValidatorConfig};
pub use crate::field::{FieldOutcome, FieldValidator};
pub use crate::registry::RuleRegistry;
pub use crate::validator::Validator;

// ============================================================================
// RESULTS: Error tree
// ============================================================================

pub use crate::tree::{ErrorTree, FieldErrors, FlatError};
