//! Ready-made configurations.

use super::{Config, DisplayConfig, Format};

impl Config {
    /// Reads the process environment. See [`Config::from_lookup`].
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a configuration from a variable source.
    ///
    /// Reads `RULECRAFT_LOG` (falling back to `RUST_LOG`) and
    /// `RULECRAFT_LOG_FORMAT`. An unknown format keeps the default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(level) = lookup("RULECRAFT_LOG").or_else(|| lookup("RUST_LOG")) {
            config.level = level;
        }

        if let Some(format) = lookup("RULECRAFT_LOG_FORMAT") {
            config.format = format.parse().unwrap_or_default();
        }

        if lookup("NO_COLOR").is_some() {
            config.display.colors = false;
        }

        config
    }

    /// Pretty output at `debug`, with source locations.
    #[must_use]
    pub fn development() -> Self {
        Self {
            level: "debug".to_owned(),
            format: Format::Pretty,
            display: DisplayConfig {
                source: true,
                ..DisplayConfig::default()
            },
            ..Self::default()
        }
    }

    /// JSON lines at `info`, without colors.
    #[must_use]
    pub fn production() -> Self {
        Self {
            level: "info".to_owned(),
            format: Format::Json,
            display: DisplayConfig {
                colors: false,
                ..DisplayConfig::default()
            },
            ..Self::default()
        }
    }

    /// Compact output at `trace`, without colors or timestamps.
    #[must_use]
    pub fn test() -> Self {
        Self {
            level: "trace".to_owned(),
            format: Format::Compact,
            display: DisplayConfig {
                colors: false,
                time: false,
                ..DisplayConfig::default()
            },
            ..Self::default()
        }
    }
}
