//! DCF command implementation.
//!
//! Projects free cash flows over a single-rate or multi-stage horizon, adds a
//! Gordon growth terminal value and prints the yearly schedule.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;
use tracing::info;

use corpval_analytics::dcf::{DcfResult, GrowthStage};
use corpval_analytics::session::ValuationSession;
use corpval_config::sections::{
    DcfSection, DEFAULT_DISCOUNT_RATE, DEFAULT_INITIAL_CASH_FLOW, DEFAULT_TERMINAL_GROWTH_RATE,
};
use corpval_core::format::{format_currency, format_factor, PLACEHOLDER};

use crate::chart::{Chart, ChartSlot, TextLineChart};
use crate::cli::OutputFormat;
use crate::commands::parse_stage;
use crate::output::{
    print_header, print_json_value, print_key_values, print_output, print_warning, KeyValue,
};

const CHART_HEIGHT: usize = 12;

/// Arguments for the dcf command.
#[derive(Args, Debug)]
pub struct DcfArgs {
    /// Base-year free cash flow
    #[arg(short, long, default_value_t = DEFAULT_INITIAL_CASH_FLOW, allow_negative_numbers = true)]
    pub initial_cash_flow: f64,

    /// Growth rate in percent (single-rate mode, default 10)
    #[arg(short, long, conflicts_with = "stages", allow_negative_numbers = true)]
    pub growth_rate: Option<f64>,

    /// Forecast years (single-rate mode, default 5)
    #[arg(short, long)]
    pub years: Option<u32>,

    /// Discount rate in percent
    #[arg(short = 'r', long, default_value_t = DEFAULT_DISCOUNT_RATE, allow_negative_numbers = true)]
    pub discount_rate: f64,

    /// Terminal growth rate in percent
    #[arg(short, long, default_value_t = DEFAULT_TERMINAL_GROWTH_RATE, allow_negative_numbers = true)]
    pub terminal_growth_rate: f64,

    /// Shares outstanding, for value per share
    #[arg(short, long)]
    pub share_capital: Option<f64>,

    /// Growth stage as NAME:YEARS:RATE; repeat for multi-stage mode
    #[arg(long = "stage", value_name = "NAME:YEARS:RATE", value_parser = parse_stage)]
    pub stages: Vec<GrowthStage>,

    /// Draw a chart of cash flows against present values
    #[arg(long)]
    pub chart: bool,
}

impl DcfArgs {
    fn to_section(&self) -> DcfSection {
        DcfSection {
            initial_cash_flow: self.initial_cash_flow,
            growth_rate: self.growth_rate,
            years: self.years,
            discount_rate: self.discount_rate,
            terminal_growth_rate: self.terminal_growth_rate,
            share_capital: self.share_capital,
            stages: (!self.stages.is_empty()).then(|| self.stages.clone()),
        }
    }
}

/// One row of the DCF schedule.
#[derive(Debug, Serialize, Tabled)]
pub struct DcfRow {
    #[tabled(rename = "Year")]
    pub year: String,
    #[tabled(rename = "Cash Flow", display_with = "display_currency")]
    pub cash_flow: f64,
    #[tabled(rename = "Discount Factor", display_with = "display_factor")]
    pub discount_factor: f64,
    #[tabled(rename = "Present Value", display_with = "display_currency")]
    pub present_value: f64,
    #[tabled(rename = "Cumulative PV", display_with = "display_currency")]
    pub cumulative_pv: f64,
}

fn display_currency(value: &f64) -> String {
    format_currency(*value)
}

fn display_factor(value: &f64) -> String {
    format_factor(*value)
}

/// Yearly rows followed by the terminal value row.
pub fn schedule_rows(result: &DcfResult) -> Vec<DcfRow> {
    let mut rows: Vec<DcfRow> = result
        .yearly
        .iter()
        .map(|record| DcfRow {
            year: record.label(),
            cash_flow: record.cash_flow,
            discount_factor: record.discount_factor,
            present_value: record.present_value,
            cumulative_pv: record.cumulative_pv,
        })
        .collect();

    let terminal = result.terminal;
    rows.push(DcfRow {
        year: "Terminal Value".to_string(),
        cash_flow: terminal.terminal_value,
        discount_factor: terminal.terminal_value / terminal.present_value,
        present_value: terminal.present_value,
        cumulative_pv: result.company_value,
    });
    rows
}

/// Headline figures of a valuation.
pub fn summary_rows(result: &DcfResult) -> Vec<KeyValue> {
    vec![
        KeyValue::new("Forecast Years", result.forecast_years.to_string()),
        KeyValue::currency("Operating Value", result.operating_value),
        KeyValue::currency("Terminal Value", result.terminal.terminal_value),
        KeyValue::currency("Terminal Value (PV)", result.terminal_value_pv),
        KeyValue::percent("Terminal Share of Value", result.terminal_share()),
        KeyValue::currency("Company Value", result.company_value),
        KeyValue::new(
            "Stock Price",
            result
                .stock_price
                .map_or_else(|| PLACEHOLDER.to_string(), format_currency),
        ),
    ]
}

/// Prints a DCF result. The chart is drawn into `chart` in table mode only.
pub fn render(
    result: &DcfResult,
    format: OutputFormat,
    chart: Option<&mut ChartSlot<TextLineChart>>,
) -> Result<()> {
    if chart.is_some() && format != OutputFormat::Table {
        print_warning("--chart is only drawn with table output");
    }

    match format {
        OutputFormat::Table => {
            print_header("DCF Valuation");
            print_output(&schedule_rows(result), format)?;
            print_header("Summary");
            print_key_values(&summary_rows(result), format)?;
            if let Some(slot) = chart {
                println!();
                let drawn = slot.replace(TextLineChart::new(
                    "Cash flow vs present value",
                    result.chart_series(),
                    CHART_HEIGHT,
                ));
                print!("{}", drawn.render());
            }
        }
        OutputFormat::Json => print_json_value(result)?,
        OutputFormat::Csv => print_output(&schedule_rows(result), format)?,
        OutputFormat::Minimal => println!("{}", format_currency(result.company_value)),
    }
    Ok(())
}

/// Execute the dcf command.
pub fn execute(args: DcfArgs, format: OutputFormat) -> Result<()> {
    let inputs = args.to_section().to_inputs()?;
    let session = ValuationSession::new();
    let result = session.calculate_dcf(&inputs)?;
    info!(
        years = result.forecast_years,
        company_value = result.company_value,
        "DCF calculated"
    );

    let mut slot = ChartSlot::new();
    render(&result, format, args.chart.then_some(&mut slot))
}
