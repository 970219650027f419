//! Logger builder implementation
//!
//! - `reload`: runtime filter reload logic

mod reload;

pub use reload::ReloadHandle;

use tracing_subscriber::layer::{Layered, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

use crate::config::{Config, DisplayConfig, Format};
use crate::error::{LogError, LogResult};

type Filtered = Layered<reload::FilterLayer, Registry>;
type FmtLayer = Box<dyn Layer<Filtered> + Send + Sync + 'static>;

/// Logger builder
#[derive(Debug)]
pub struct LoggerBuilder {
    config: Config,
}

/// Guard returned by [`LoggerBuilder::build`]; holds the reload handle, if
/// any.
#[derive(Debug)]
#[must_use = "dropping the guard drops the reload handle"]
pub struct LoggerGuard {
    reload_handle: Option<ReloadHandle>,
}

impl LoggerGuard {
    /// Handle to change the filter at runtime, when the configuration asked
    /// for one.
    pub fn reload_handle(&self) -> Option<&ReloadHandle> {
        self.reload_handle.as_ref()
    }
}

impl LoggerBuilder {
    /// Create builder from config
    #[must_use]
    pub fn from_config(config: Config) -> Self {
        Self { config }
    }

    /// Build and install the global subscriber, writing to stderr
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - Filter string cannot be parsed
    /// - A global subscriber is already installed
    pub fn build(self) -> LogResult<LoggerGuard> {
        let filter = EnvFilter::try_new(&self.config.level)
            .map_err(|e| LogError::filter(&self.config.level, e))?;

        let (filter_layer, reload_handle) =
            reload::create_filter_layer(filter, &self.config.level, self.config.reloadable);

        Registry::default()
            .with(filter_layer)
            .with(fmt_layer(self.config.format, &self.config.display))
            .try_init()
            .map_err(|e| LogError::Init(e.to_string()))?;

        tracing::debug!(
            level = %self.config.level,
            format = %self.config.format,
            "logger initialized"
        );
        Ok(LoggerGuard { reload_handle })
    }
}

fn fmt_layer(format: Format, display: &DisplayConfig) -> FmtLayer {
    let base = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(display.colors)
        .with_target(display.target)
        .with_file(display.source)
        .with_line_number(display.source);

    match (format, display.time) {
        (Format::Pretty, true) => base.pretty().boxed(),
        (Format::Pretty, false) => base.pretty().without_time().boxed(),
        (Format::Compact, true) => base.compact().boxed(),
        (Format::Compact, false) => base.compact().without_time().boxed(),
        (Format::Json, true) => base.json().boxed(),
        (Format::Json, false) => base.json().without_time().boxed(),
    }
}
