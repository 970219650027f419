//! # rulecraft-record
//!
//! Record engine on top of [`rulecraft_validator`]: declared fields that are
//! scalars, nested records or recordsets, custom business-rule hooks, value
//! filters, binding onto typed targets and labelled forms.
//!
//! ## Quick Start
//!
//! ```
//! use rulecraft_record::prelude::*;
//! use serde_json::json;
//!
//! let device = RecordSchema::builder()
//!     .field("brand", "required|minlen:2")
//!     .field("ip_address", "required|ipv4")
//!     .build()?;
//! let user = RecordSchema::builder()
//!     .field("name", "required|maxlen:128")
//!     .recordset("devices", device)
//!     .build()?;
//!
//! let data = json!({
//!     "name": "Ada",
//!     "devices": [
//!         { "brand": "Apple", "ip_address": "10.0.0.1" },
//!         { "brand": "Dell", "ip_address": "10.0.0.300" },
//!     ],
//! });
//! let mut record = user.record();
//! assert!(!record.is_valid(data.as_object().unwrap(), None));
//! assert_eq!(
//!     record.errors().to_json(),
//!     json!({ "devices": { "_": { "1": { "ip_address": { "ipv4": "invalid IPv4 address" } } } } })
//! );
//! # Ok::<(), SchemaError>(())
//! ```
//!
//! ## Validation order
//!
//! Scalar fields first; nested records and recordsets only when every scalar
//! passed; hooks only when the whole structure passed. Values are stored, after
//! filtering, only when everything passed.

pub mod bind;
pub mod config;
pub mod descriptor;
pub mod filter;
pub mod form;
pub mod prelude;
pub mod record;
pub mod schema;

pub use serde_json::{Map, Value};
