//! # rulecraft-validator
//!
//! Rule-based validation of flat data mappings.
//!
//! ## Quick Start
//!
//! ```
//! use rulecraft_validator::prelude::*;
//! use serde_json::json;
//!
//! let mut validator = Validator::new();
//! validator.add_field("age", "required|numeric|between:18,120", None)?;
//!
//! let data = json!({ "age": "" });
//! assert!(!validator.is_valid(data.as_object().unwrap(), None));
//! assert_eq!(
//!     validator.errors().to_json(),
//!     json!({ "age": { "required": "value required" } })
//! );
//! # Ok::<(), SchemaError>(())
//! ```
//!
//! ## Pieces
//!
//! - [`registry`]: rule name → [`Rule`](foundation::Rule) unit lookup
//! - [`chain`]: string and mapping rule specifications, parsed into one
//!   [`RuleChain`](chain::RuleChain)
//! - [`field`]: one chain against one value
//! - [`validator`]: every declared field against a data mapping
//! - [`tree`]: the nested, addressable [`ErrorTree`](tree::ErrorTree)
//!
//! ## Custom Rules
//!
//! Use the [`rule!`] macro, or implement [`Rule`](foundation::Rule) by hand,
//! then register the unit in a [`RuleRegistry`](registry::RuleRegistry).

pub mod chain;
pub mod config;
pub mod field;
pub mod foundation;
mod macros;
pub mod prelude;
pub mod registry;
pub mod rules;
pub mod tree;
pub mod validator;
pub mod value;

pub use serde_json::{Map, Value};
