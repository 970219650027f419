//! Layered settings: defaults, then `rulecraft.toml`, then `RULECRAFT_*`
//! environment variables, then command-line flags.

use std::path::Path;

use clap::ValueEnum;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

/// Report format on stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Output {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub output: Output,
    pub log: rulecraft_log::Config,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            output: Output::default(),
            log: rulecraft_log::Config {
                level: "warn".to_owned(),
                ..rulecraft_log::Config::default()
            },
        }
    }
}

/// Flag values that override every other layer when present.
#[derive(Debug, Default)]
pub struct Overrides {
    pub output: Option<Output>,
    pub log_level: Option<String>,
}

impl Settings {
    pub fn load(file: &Path, overrides: Overrides) -> figment::Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(file))
            .merge(
                Env::prefixed("RULECRAFT_")
                    .split("__")
                    .ignore(&["log", "log_format", "config"]),
            )
            .merge(Env::raw().only(&["RULECRAFT_LOG"]).map(|_| "log.level".into()))
            .merge(Env::raw().only(&["RULECRAFT_LOG_FORMAT"]).map(|_| "log.format".into()));

        if let Some(output) = overrides.output {
            figment = figment.merge(Serialized::default("output", output));
        }
        if let Some(level) = overrides.log_level {
            figment = figment.merge(Serialized::default("log.level", level));
        }
        figment.extract()
    }
}
