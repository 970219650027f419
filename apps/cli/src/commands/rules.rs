//! `rulecraft rules`: list the registered rules.

use std::io::Write;

use anyhow::Result;
use rulecraft_validator::registry;
use serde_json::json;

use crate::settings::Output;

pub fn run(output: Output, out: &mut impl Write) -> Result<()> {
    let registry = registry::global();
    match output {
        Output::Text => {
            let width = registry.names().map(str::len).max().unwrap_or(0);
            for (name, rule) in registry.iter() {
                writeln!(out, "{name:<width$}  {}", rule.message())?;
            }
        }
        Output::Json => {
            let rules: Vec<_> = registry
                .iter()
                .map(|(name, rule)| json!({ "name": name, "message": rule.message() }))
                .collect();
            writeln!(out, "{}", serde_json::to_string_pretty(&rules)?)?;
        }
    }
    Ok(())
}
