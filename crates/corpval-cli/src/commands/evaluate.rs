//! Evaluate command implementation.
//!
//! Runs every section of a scenario in one session: WACC first so that ROIC
//! can be compared against it, then ROIC, then DCF. A failing section is
//! reported and the remaining sections still run.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tracing::{info, warn};

use corpval_analytics::session::ValuationSession;
use corpval_config::Scenario;

use crate::chart::ChartSlot;
use crate::cli::OutputFormat;
use crate::commands::{dcf, roic, wacc};
use crate::error::CliError;
use crate::output::{print_error, print_json_value};

/// Arguments for the evaluate command.
#[derive(Args, Debug)]
pub struct EvaluateArgs {
    /// Scenario file (.toml or .json)
    pub scenario: PathBuf,

    /// Draw the DCF cash flow chart
    #[arg(long)]
    pub chart: bool,
}

/// Collects section outcomes. JSON output is gathered into one object.
struct Report {
    format: OutputFormat,
    json: serde_json::Map<String, serde_json::Value>,
    failures: usize,
}

impl Report {
    fn new(format: OutputFormat) -> Self {
        Self {
            format,
            json: serde_json::Map::new(),
            failures: 0,
        }
    }

    fn record<T: Serialize>(
        &mut self,
        section: &str,
        outcome: Result<T>,
        render: impl FnOnce(&T) -> Result<()>,
    ) -> Result<()> {
        match outcome {
            Ok(value) if self.format == OutputFormat::Json => {
                self.json
                    .insert(section.to_string(), serde_json::to_value(&value)?);
            }
            Ok(value) => render(&value)?,
            Err(err) => {
                warn!(section, "section failed");
                let message = format!("{err:#}");
                print_error(&format!("[{section}] {message}"));
                if self.format == OutputFormat::Json {
                    self.json.insert(
                        section.to_string(),
                        serde_json::json!({ "error": message }),
                    );
                }
                self.failures += 1;
            }
        }
        Ok(())
    }

    fn finish(self) -> Result<()> {
        if self.format == OutputFormat::Json {
            print_json_value(&self.json)?;
        }
        if self.failures > 0 {
            return Err(CliError::SectionsFailed(self.failures).into());
        }
        Ok(())
    }
}

/// Execute the evaluate command.
pub fn execute(args: EvaluateArgs, format: OutputFormat) -> Result<()> {
    let scenario = Scenario::from_file(&args.scenario)?;
    info!(path = %args.scenario.display(), "evaluating scenario");

    let mut session = ValuationSession::new();
    let mut slot = ChartSlot::new();
    let mut report = Report::new(format);

    if let Some(section) = &scenario.wacc {
        let outcome = section
            .to_inputs()
            .map_err(anyhow::Error::from)
            .and_then(|inputs| Ok(session.calculate_wacc(&inputs)?));
        report.record("wacc", outcome, |result| wacc::render(result, format))?;
    }

    if let Some(section) = &scenario.roic {
        let outcome = session
            .calculate_roic(&section.to_inputs())
            .map_err(anyhow::Error::from);
        report.record("roic", outcome, |result| roic::render(result, format))?;
    }

    if let Some(section) = &scenario.dcf {
        let outcome = section
            .to_inputs()
            .map_err(anyhow::Error::from)
            .and_then(|inputs| Ok(session.calculate_dcf(&inputs)?));
        report.record("dcf", outcome, |result| {
            dcf::render(result, format, args.chart.then_some(&mut slot))
        })?;
    }

    report.finish()
}
