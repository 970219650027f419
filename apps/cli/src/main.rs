//! `rulecraft`: validate JSON data against record schemas.

mod commands;
mod settings;

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rulecraft_log::LoggerBuilder;

use crate::commands::check::CheckArgs;
use crate::settings::{Overrides, Settings};

#[derive(Debug, Parser)]
#[command(name = "rulecraft", version, about = "Rule-based validation of JSON records")]
struct Cli {
    /// Settings file
    #[arg(long, env = "RULECRAFT_CONFIG", default_value = "rulecraft.toml", global = true)]
    config: PathBuf,

    /// Log filter, e.g. `debug` or `rulecraft_record=trace`
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Validate data files against a record schema
    Check(CheckArgs),
    /// List the registered rules and their default messages
    Rules {
        /// Report format; overrides `output` from settings
        #[arg(long, value_enum)]
        format: Option<settings::Output>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(2)
        }
    }
}

fn run(cli: Cli) -> Result<bool> {
    let output = match &cli.command {
        Command::Check(args) => args.format,
        Command::Rules { format } => *format,
    };
    let settings = Settings::load(
        &cli.config,
        Overrides {
            output,
            log_level: cli.log_level,
        },
    )
    .with_context(|| format!("cannot load settings from {}", cli.config.display()))?;
    let _guard = LoggerBuilder::from_config(settings.log).build()?;

    let mut stdout = io::stdout().lock();
    match &cli.command {
        Command::Check(args) => commands::check::run(args, settings.output, &mut stdout),
        Command::Rules { .. } => {
            commands::rules::run(settings.output, &mut stdout)?;
            Ok(true)
        }
    }
}
