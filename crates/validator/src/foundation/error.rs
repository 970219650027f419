//! Schema declaration errors.
//!
//! These errors describe programming defects in a declared schema: a rule
//! string that does not parse, a rule name nobody registered, a field id that
//! was never declared. They are raised while a schema is being built.
//!
//! Data that fails validation is *not* an error. `is_valid` returns `false`
//! and the caller reads the error tree instead.

/// Error raised while declaring rules, fields or records.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    /// A rule specification segment could not be parsed, or its parameters do
    /// not satisfy the rule's parameter contract.
    #[error("malformed rule segment `{segment}`: {reason}")]
    RuleSyntax { segment: String, reason: String },

    /// A rule chain references a name missing from the registry.
    #[error("unknown rule `{name}`")]
    UnknownRule { name: String },

    /// A rule name was registered twice.
    #[error("rule `{name}` is already registered")]
    DuplicateRule { name: String },

    /// A field id does not match any declared field.
    #[error("unknown field `{field}`")]
    UnknownField { field: String },

    /// A field id was declared twice where ids must be unique.
    #[error("field `{field}` is already declared")]
    DuplicateField { field: String },
}

impl SchemaError {
    /// Shorthand for a [`SchemaError::RuleSyntax`].
    pub fn syntax(segment: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::RuleSyntax {
            segment: segment.into(),
            reason: reason.into(),
        }
    }

    /// Shorthand for a [`SchemaError::UnknownField`].
    pub fn unknown_field(field: impl Into<String>) -> Self {
        Self::UnknownField {
            field: field.into(),
        }
    }

    /// Broad error category for grouping in logs.
    #[must_use]
    pub fn category(&self) -> &str {
        match self {
            Self::RuleSyntax { .. } => "syntax",
            Self::UnknownRule { .. } | Self::DuplicateRule { .. } => "registry",
            Self::UnknownField { .. } => "lookup",
            Self::DuplicateField { .. } => "declaration",
        }
    }

    /// Machine-readable error code for programmatic handling.
    #[must_use]
    pub fn code(&self) -> &str {
        match self {
            Self::RuleSyntax { .. } => "RULE_SYNTAX",
            Self::UnknownRule { .. } => "RULE_UNKNOWN",
            Self::DuplicateRule { .. } => "RULE_DUPLICATE",
            Self::UnknownField { .. } => "FIELD_UNKNOWN",
            Self::DuplicateField { .. } => "FIELD_DUPLICATE",
        }
    }
}

/// Result alias for schema declaration.
pub type SchemaResult<T> = Result<T, SchemaError>;
