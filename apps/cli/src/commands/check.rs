//! `rulecraft check`: validate data files against a record schema.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::Args;
use rulecraft_record::config::RecordConfig;
use rulecraft_record::schema::RecordSchema;
use rulecraft_validator::registry;
use rulecraft_validator::tree::FlatError;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::settings::Output;

#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Record schema, as JSON or TOML (picked by extension)
    #[arg(long, short)]
    pub schema: PathBuf,

    /// JSON data files: one object, or a list of objects
    #[arg(required = true)]
    pub data: Vec<PathBuf>,

    /// Report format; overrides `output` from settings
    #[arg(long, value_enum)]
    pub format: Option<Output>,
}

#[derive(Debug, Serialize)]
struct Report {
    source: String,
    valid: bool,
    errors: Value,
    #[serde(skip)]
    flat: Vec<FlatError>,
}

/// Returns `true` when every record is valid.
pub fn run(args: &CheckArgs, output: Output, out: &mut impl Write) -> Result<bool> {
    let schema = load_schema(&args.schema)?;
    info!(schema = %args.schema.display(), files = args.data.len(), "checking data");

    let mut reports = Vec::new();
    for path in &args.data {
        for (source, data) in load_data(path)? {
            let mut record = schema.record();
            let valid = record.is_valid(&data, None);
            debug!(%source, valid, "checked");
            reports.push(Report {
                source,
                valid,
                errors: record.errors().to_json(),
                flat: record.errors().flatten(),
            });
        }
    }

    match output {
        Output::Text => {
            for report in &reports {
                if report.valid {
                    writeln!(out, "{}: ok", report.source)?;
                } else {
                    writeln!(out, "{}: invalid", report.source)?;
                    for error in &report.flat {
                        writeln!(out, "  {error}")?;
                    }
                }
            }
        }
        Output::Json => writeln!(out, "{}", serde_json::to_string_pretty(&reports)?)?,
    }

    Ok(reports.iter().all(|report| report.valid))
}

fn load_schema(path: &Path) -> Result<Arc<RecordSchema>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("cannot read schema {}", path.display()))?;
    let config: RecordConfig = match path.extension().and_then(|ext| ext.to_str()) {
        Some("toml") => toml::from_str(&text)
            .with_context(|| format!("cannot parse schema {}", path.display()))?,
        _ => serde_json::from_str(&text)
            .with_context(|| format!("cannot parse schema {}", path.display()))?,
    };
    RecordSchema::from_config(config, registry::global())
        .with_context(|| format!("invalid schema {}", path.display()))
}

fn load_data(path: &Path) -> Result<Vec<(String, Map<String, Value>)>> {
    let text =
        fs::read_to_string(path).with_context(|| format!("cannot read {}", path.display()))?;
    let value: Value = serde_json::from_str(&text)
        .with_context(|| format!("cannot parse {}", path.display()))?;
    let name = path.display().to_string();

    match value {
        Value::Object(map) => Ok(vec![(name, map)]),
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(index, item)| match item {
                Value::Object(map) => Ok((format!("{name}[{index}]"), map)),
                _ => bail!("{name}[{index}] is not an object"),
            })
            .collect(),
        _ => bail!("{name} must hold an object or a list of objects"),
    }
}
