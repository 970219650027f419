//! Builtin rule units
//!
//! Every unit here is a stateless, zero-sized type declared with
//! [`rule!`](crate::rule). [`register_builtins`] installs the whole catalogue
//! into a [`RuleRegistry`] under each unit's `NAME`.
//!
//! # Categories
//!
//! - **Presence**: `required`
//! - **Numeric**: `numeric`, `int`, `decimal`, `between`
//! - **Length**: `minlen`, `maxlen`, `len`
//! - **Text**: `alpha`, `alphanum`, `slug`, `bool`, `in`
//! - **Network**: `email`, `ipv4`, `ipv6`, `ip`, `fqdn`, `mac`

use std::sync::Arc;

use crate::foundation::{Rule, SchemaResult};
use crate::registry::RuleRegistry;

pub mod length;
pub mod network;
pub mod numeric;
pub mod presence;
pub mod text;

pub use length::{Len, MaxLen, MinLen};
pub use network::{Email, Fqdn, Ip, Ipv4, Ipv6, Mac};
pub use numeric::{Between, Decimal, Int, Numeric};
pub use presence::Required;
pub use text::{Alpha, AlphaNum, Bool, OneOf, Slug};

/// Every builtin rule unit, in catalogue order.
#[must_use]
pub fn builtins() -> Vec<Arc<dyn Rule>> {
    vec![
        Arc::new(Required),
        Arc::new(Numeric),
        Arc::new(Int),
        Arc::new(Decimal),
        Arc::new(Between),
        Arc::new(MinLen),
        Arc::new(MaxLen),
        Arc::new(Len),
        Arc::new(Alpha),
        Arc::new(AlphaNum),
        Arc::new(Slug),
        Arc::new(Email),
        Arc::new(Ipv4),
        Arc::new(Ipv6),
        Arc::new(Ip),
        Arc::new(Fqdn),
        Arc::new(Mac),
        Arc::new(Bool),
        Arc::new(OneOf),
    ]
}

/// Registers the builtin catalogue.
///
/// # Errors
///
/// Returns [`SchemaError::DuplicateRule`](crate::foundation::SchemaError) if
/// any builtin name is already taken in `registry`.
pub fn register_builtins(registry: &mut RuleRegistry) -> SchemaResult<()> {
    for rule in builtins() {
        registry.register(rule.name(), rule)?;
    }
    Ok(())
}
