//! Logger configuration.

mod presets;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::LogError;

/// Output format of log lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// Multi-line, human oriented.
    Pretty,
    /// One line per event.
    #[default]
    Compact,
    /// One JSON object per event.
    Json,
}

impl FromStr for Format {
    type Err = LogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "compact" => Ok(Self::Compact),
            "json" => Ok(Self::Json),
            _ => Err(LogError::Format(s.to_owned())),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Pretty => "pretty",
            Self::Compact => "compact",
            Self::Json => "json",
        })
    }
}

/// What each line shows besides the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// ANSI colors.
    pub colors: bool,
    /// Timestamps.
    pub time: bool,
    /// Event target (module path).
    pub target: bool,
    /// Source file and line.
    pub source: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            colors: true,
            time: true,
            target: true,
            source: false,
        }
    }
}

/// Logger configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// `EnvFilter` directive, e.g. `info` or `rulecraft_record=debug`.
    pub level: String,
    pub format: Format,
    pub display: DisplayConfig,
    /// Keep a [`ReloadHandle`](crate::ReloadHandle) to change the filter at
    /// runtime.
    pub reloadable: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            format: Format::default(),
            display: DisplayConfig::default(),
            reloadable: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("pretty", Format::Pretty)]
    #[case("COMPACT", Format::Compact)]
    #[case(" json ", Format::Json)]
    fn format_parses(#[case] input: &str, #[case] expected: Format) {
        assert_eq!(input.parse::<Format>().unwrap(), expected);
    }

    #[test]
    fn unknown_format_is_rejected() {
        assert_eq!(
            "logfmt".parse::<Format>().unwrap_err(),
            LogError::Format("logfmt".into())
        );
    }

    #[test]
    fn partial_config_deserializes_over_defaults() {
        let config: Config = serde_json::from_value(serde_json::json!({
            "level": "debug",
            "display": { "colors": false }
        }))
        .unwrap();
        assert_eq!(config.level, "debug");
        assert_eq!(config.format, Format::Compact);
        assert!(!config.display.colors);
        assert!(config.display.time);
    }
}
