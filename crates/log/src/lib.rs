//! # rulecraft-log
//!
//! `tracing` subscriber setup shared by rulecraft binaries.
//!
//! ```no_run
//! use rulecraft_log::{Config, LoggerBuilder};
//!
//! let _guard = LoggerBuilder::from_config(Config::from_env()).build()?;
//! tracing::info!("ready");
//! # Ok::<(), rulecraft_log::LogError>(())
//! ```
//!
//! The filter comes from `RULECRAFT_LOG`, then `RUST_LOG`, and defaults to
//! `info`. `RULECRAFT_LOG_FORMAT` picks `pretty`, `compact` or `json`.

pub mod builder;
pub mod config;
pub mod error;

pub use builder::{LoggerBuilder, LoggerGuard, ReloadHandle};
pub use config::{Config, DisplayConfig, Format};
pub use error::{LogError, LogResult};

/// Initializes logging from the environment.
///
/// # Errors
///
/// See [`LoggerBuilder::build`].
pub fn init() -> LogResult<LoggerGuard> {
    LoggerBuilder::from_config(Config::from_env()).build()
}
