//! Core contracts of the validation engine
//!
//! - **Traits**: [`Rule`], the contract every rule unit satisfies, and
//!   [`Translator`], the message localization seam
//! - **Errors**: [`SchemaError`], raised when a schema is declared wrongly
//!
//! Data that fails validation never surfaces here; it is reported through the
//! [`ErrorTree`](crate::tree::ErrorTree).

pub mod error;
pub mod traits;
pub mod translator;

pub use error::{SchemaError, SchemaResult};
pub use traits::{Rule, expect_count, expect_parsed};
pub use translator::{NoopTranslator, Translator, render_message};
