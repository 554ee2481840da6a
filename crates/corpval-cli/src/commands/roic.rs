//! ROIC command implementation.
//!
//! Return on invested capital from the income statement and balance sheet.
//! With `--wacc-scenario` the WACC of that file is calculated first in the same
//! session and ROIC is classified against it.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use tracing::{info, warn};

use corpval_analytics::roic::RoicResult;
use corpval_analytics::session::ValuationSession;
use corpval_config::{RoicSection, Scenario};
use corpval_core::format::format_percent;

use crate::cli::OutputFormat;
use crate::error::CliError;
use crate::output::{
    print_error, print_header, print_info, print_json_value, print_key_values, print_verdict,
    KeyValue,
};

/// Arguments for the roic command. Omitted figures come from the reference company.
#[derive(Args, Debug)]
pub struct RoicArgs {
    /// Operating profit
    #[arg(short, long, allow_negative_numbers = true)]
    pub operating_profit: Option<f64>,

    /// Interest expense
    #[arg(long, allow_negative_numbers = true)]
    pub interest_expense: Option<f64>,

    /// Total profit before tax
    #[arg(long, allow_negative_numbers = true)]
    pub pretax_profit: Option<f64>,

    /// Income tax expense
    #[arg(long, allow_negative_numbers = true)]
    pub income_tax: Option<f64>,

    /// Equity attributable to the parent
    #[arg(short, long, allow_negative_numbers = true)]
    pub parent_equity: Option<f64>,

    /// Interest-bearing debt
    #[arg(short, long, allow_negative_numbers = true)]
    pub debt: Option<f64>,

    /// Scenario file whose [wacc] section is calculated first for comparison
    #[arg(short, long, value_name = "FILE")]
    pub wacc_scenario: Option<PathBuf>,
}

impl RoicArgs {
    fn to_section(&self) -> RoicSection {
        let sample = RoicSection::sample();
        RoicSection {
            operating_profit: self.operating_profit.unwrap_or(sample.operating_profit),
            interest_expense: self.interest_expense.unwrap_or(sample.interest_expense),
            total_pretax_profit: self.pretax_profit.unwrap_or(sample.total_pretax_profit),
            income_tax_expense: self.income_tax.unwrap_or(sample.income_tax_expense),
            parent_equity: self.parent_equity.unwrap_or(sample.parent_equity),
            interest_bearing_debt: self.debt.unwrap_or(sample.interest_bearing_debt),
        }
    }
}

/// Rows of a ROIC result, including the WACC comparison when present.
pub fn summary_rows(result: &RoicResult) -> Vec<KeyValue> {
    let mut rows = vec![
        KeyValue::percent("Effective Tax Rate", result.effective_tax_rate),
        KeyValue::currency("NOPAT", result.nopat),
        KeyValue::currency("Invested Capital", result.invested_capital),
        KeyValue::percent("ROIC", result.roic),
    ];
    match &result.comparison {
        Some(comparison) => {
            rows.push(KeyValue::new("WACC", comparison.wacc_percent.clone()));
            rows.push(KeyValue::new("Comparison", comparison.summary.clone()));
        }
        None => rows.push(KeyValue::new("Comparison", "- (no WACC calculated)")),
    }
    rows
}

/// Prints a ROIC result.
pub fn render(result: &RoicResult, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => {
            print_header("ROIC");
            print_key_values(&summary_rows(result), format)?;
            print_info("NOPAT = (operating profit + interest expense) × (1 - effective tax rate)");
            print_info("Invested capital = parent equity + interest-bearing debt");
            if let Some(comparison) = &result.comparison {
                print_verdict(comparison.verdict, &comparison.summary);
            }
        }
        OutputFormat::Json => print_json_value(result)?,
        OutputFormat::Csv => print_key_values(&summary_rows(result), format)?,
        OutputFormat::Minimal => println!("{}", format_percent(result.roic)),
    }
    Ok(())
}

/// Execute the roic command.
pub fn execute(args: RoicArgs, format: OutputFormat) -> Result<()> {
    let mut session = ValuationSession::new();

    if let Some(path) = &args.wacc_scenario {
        let scenario = Scenario::from_file(path)?;
        let section = scenario.wacc.ok_or(CliError::MissingSection("wacc"))?;
        let outcome = section
            .to_inputs()
            .map_err(anyhow::Error::from)
            .and_then(|inputs| Ok(session.calculate_wacc(&inputs)?));
        match outcome {
            Ok(wacc) => info!(wacc = wacc.wacc, "WACC calculated for comparison"),
            Err(err) => {
                // ROIC still runs; the comparison is left out.
                warn!("WACC calculation failed");
                print_error(&format!("WACC: {err:#}"));
            }
        }
    }

    let result = session.calculate_roic(&args.to_section().to_inputs())?;
    info!(roic = result.roic, "ROIC calculated");

    render(&result, format)
}
