//! Config command implementation.
//!
//! Writes scenario templates and shows parsed scenarios.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Subcommand};
use serde_json::Value;

use corpval_config::Scenario;
use corpval_core::format::PLACEHOLDER;

use crate::cli::OutputFormat;
use crate::output::{print_header, print_json_value, print_key_values, print_success, KeyValue};

/// Arguments for the config command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Print a scenario with every section filled with defaults
    Template(TemplateArgs),

    /// Parse, validate and show a scenario file
    Show(ShowArgs),
}

/// Arguments for the template subcommand.
#[derive(Args, Debug)]
pub struct TemplateArgs {
    /// Write the template here (.toml or .json) instead of printing it
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// Arguments for the show subcommand.
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Scenario file (.toml or .json)
    pub path: PathBuf,
}

/// Flattens a JSON tree into `a.b[0].c = value` rows.
fn flatten(prefix: &str, value: &Value, rows: &mut Vec<KeyValue>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                flatten(&path, child, rows);
            }
        }
        Value::Array(items) => {
            for (i, child) in items.iter().enumerate() {
                flatten(&format!("{prefix}[{i}]"), child, rows);
            }
        }
        Value::String(s) => rows.push(KeyValue::new(prefix, s.clone())),
        Value::Null => rows.push(KeyValue::new(prefix, PLACEHOLDER)),
        other => rows.push(KeyValue::new(prefix, other.to_string())),
    }
}

fn scenario_rows(scenario: &Scenario) -> Result<Vec<KeyValue>> {
    let mut rows = Vec::new();
    flatten("", &serde_json::to_value(scenario)?, &mut rows);
    Ok(rows)
}

fn print_scenario(scenario: &Scenario, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => {
            print_header("Scenario");
            print_key_values(&scenario_rows(scenario)?, format)?;
        }
        OutputFormat::Json => print_json_value(scenario)?,
        OutputFormat::Csv => print_key_values(&scenario_rows(scenario)?, format)?,
        OutputFormat::Minimal => print!("{}", scenario.to_toml_string()?),
    }
    Ok(())
}

/// Execute the config command.
pub fn execute(args: ConfigArgs, format: OutputFormat) -> Result<()> {
    match args.command {
        ConfigCommand::Template(template) => {
            let scenario = Scenario::default_template();
            match template.output {
                Some(path) => {
                    scenario.save(&path)?;
                    print_success(&format!("Template written to {}", path.display()));
                }
                None if format == OutputFormat::Json => print_json_value(&scenario)?,
                None => print!("{}", scenario.to_toml_string()?),
            }
        }
        ConfigCommand::Show(show) => {
            let scenario = Scenario::from_file(&show.path)?;
            print_scenario(&scenario, format)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flatten_paths() {
        let value = serde_json::json!({
            "dcf": { "discount_rate": 12.0, "stages": [{ "name": "a", "years": 3 }] }
        });
        let mut rows = Vec::new();
        flatten("", &value, &mut rows);

        let keys: Vec<&str> = rows.iter().map(|r| r.key.as_str()).collect();
        assert!(keys.contains(&"dcf.discount_rate"));
        assert!(keys.contains(&"dcf.stages[0].name"));
        let name = rows.iter().find(|r| r.key == "dcf.stages[0].name").unwrap();
        assert_eq!(name.value, "a");
    }

    #[test]
    fn test_template_rows_cover_every_section() {
        let rows = scenario_rows(&Scenario::default_template()).unwrap();
        for prefix in ["dcf.", "wacc.", "roic."] {
            assert!(rows.iter().any(|r| r.key.starts_with(prefix)), "{prefix}");
        }
    }
}
