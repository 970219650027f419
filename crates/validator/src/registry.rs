//! Rule Registry
//!
//! Name → rule unit lookup. A registry is filled once, then only read: the
//! process-wide instance behind [`global`] is installed at most once and is
//! immutable afterwards, so validators share it without locking.

use std::fmt;
use std::sync::{Arc, OnceLock};

use indexmap::IndexMap;
use tracing::{debug, info};

use crate::foundation::{Rule, SchemaError, SchemaResult};
use crate::rules;

// ============================================================================
// RULE REGISTRY
// ============================================================================

/// Lookup table from rule name to a shared, stateless rule unit.
///
/// # Examples
///
/// ```
/// use rulecraft_validator::registry::RuleRegistry;
///
/// let registry = RuleRegistry::with_builtins();
/// assert!(registry.resolve("between").is_ok());
/// assert!(registry.resolve("nope").is_err());
/// ```
#[derive(Clone, Default)]
pub struct RuleRegistry {
    rules: IndexMap<String, Arc<dyn Rule>>,
}

impl RuleRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the builtin catalogue.
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for rule in rules::builtins() {
            registry.rules.insert(rule.name().to_owned(), rule);
        }
        info!(count = registry.len(), "registered builtin rules");
        registry
    }

    /// Adds a rule unit under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::DuplicateRule`] if `name` is taken. Use
    /// [`replace`](Self::replace) to overwrite on purpose.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        rule: Arc<dyn Rule>,
    ) -> SchemaResult<&mut Self> {
        let name = name.into();
        if self.rules.contains_key(&name) {
            return Err(SchemaError::DuplicateRule { name });
        }
        debug!(rule = %name, "registering rule");
        self.rules.insert(name, rule);
        Ok(self)
    }

    /// Adds or overwrites the rule unit under `name`, returning the previous
    /// one.
    pub fn replace(
        &mut self,
        name: impl Into<String>,
        rule: Arc<dyn Rule>,
    ) -> Option<Arc<dyn Rule>> {
        let name = name.into();
        debug!(rule = %name, "replacing rule");
        self.rules.insert(name, rule)
    }

    /// Looks up a rule unit by name.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::UnknownRule`] if nothing is registered under
    /// `name`.
    pub fn resolve(&self, name: &str) -> SchemaResult<Arc<dyn Rule>> {
        self.rules
            .get(name)
            .cloned()
            .ok_or_else(|| SchemaError::UnknownRule {
                name: name.to_owned(),
            })
    }

    /// Returns `true` if a rule is registered under `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.rules.contains_key(name)
    }

    /// Registered names, in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.rules.keys().map(String::as_str)
    }

    /// Registered rules with their names, in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Arc<dyn Rule>)> {
        self.rules.iter().map(|(name, rule)| (name.as_str(), rule))
    }

    /// Number of registered rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns `true` if no rule is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleRegistry")
            .field("rules", &self.rules.keys().collect::<Vec<_>>())
            .finish()
    }
}

// ============================================================================
// PROCESS-WIDE REGISTRY
// ============================================================================

static GLOBAL: OnceLock<Arc<RuleRegistry>> = OnceLock::new();

/// The process-wide registry.
///
/// Holds the registry passed to [`install`], or the builtin catalogue if
/// nothing was installed before first use.
pub fn global() -> Arc<RuleRegistry> {
    Arc::clone(GLOBAL.get_or_init(|| Arc::new(RuleRegistry::with_builtins())))
}

/// Installs `registry` as the process-wide registry.
///
/// # Errors
///
/// Returns the registry back if the global one was already installed or
/// already read.
pub fn install(registry: RuleRegistry) -> Result<(), RuleRegistry> {
    let registry = Arc::new(registry);
    GLOBAL
        .set(registry)
        .map_err(|rejected| Arc::unwrap_or_clone(rejected))
}
