//! Output formatting utilities.

use std::sync::atomic::{AtomicBool, Ordering};

use colored::Colorize;
use corpval_analytics::roic::ValueVerdict;
use corpval_core::format::{format_currency, format_percent};
use serde::Serialize;
use tabled::{
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};

use crate::cli::OutputFormat;

static QUIET: AtomicBool = AtomicBool::new(false);

/// Silences success and info messages. Results, warnings and errors still print.
pub fn set_quiet(quiet: bool) {
    QUIET.store(quiet, Ordering::Relaxed);
}

fn is_quiet() -> bool {
    QUIET.load(Ordering::Relaxed)
}

/// Formats and prints rows based on the specified format.
pub fn print_output<T: Serialize + Tabled>(data: &[T], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Table => print_table(data),
        OutputFormat::Json => print_json(data),
        OutputFormat::Csv => print_csv(data),
        OutputFormat::Minimal => print_minimal(data),
    }
}

/// Prints a serializable value as pretty JSON.
pub fn print_json_value<T: Serialize + ?Sized>(data: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(data)?);
    Ok(())
}

/// Prints data as a formatted table.
fn print_table<T: Tabled>(data: &[T]) -> anyhow::Result<()> {
    if data.is_empty() {
        println!("No results.");
        return Ok(());
    }

    let table = Table::new(data)
        .with(Style::rounded())
        .with(Modify::new(Columns::first()).with(Alignment::left()))
        .with(Modify::new(Columns::new(1..)).with(Alignment::right()))
        .to_string();

    println!("{table}");
    Ok(())
}

fn print_json<T: Serialize>(data: &[T]) -> anyhow::Result<()> {
    print_json_value(data)
}

fn print_csv<T: Serialize>(data: &[T]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(std::io::stdout());
    for item in data {
        wtr.serialize(item)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Prints the last row's last column, which by convention is the headline.
fn print_minimal<T: Tabled>(data: &[T]) -> anyhow::Result<()> {
    if let Some(value) = data.last().and_then(|row| row.fields().last().map(|f| f.to_string())) {
        println!("{value}");
    }
    Ok(())
}

/// Prints a success message.
pub fn print_success(message: &str) {
    if is_quiet() {
        return;
    }
    println!("{} {}", "✓".green(), message);
}

/// Prints an error message.
pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red(), message);
}

/// Prints a warning message.
pub fn print_warning(message: &str) {
    eprintln!("{} {}", "⚠".yellow(), message);
}

/// Prints an info message.
pub fn print_info(message: &str) {
    if is_quiet() {
        return;
    }
    println!("{} {}", "ℹ".blue(), message);
}

/// Prints a verdict line, colored by outcome.
pub fn print_verdict(verdict: ValueVerdict, summary: &str) {
    let line = format!("{summary}: {}", verdict.explanation());
    match verdict {
        ValueVerdict::CreatesValue => println!("{} {}", "▲".green(), line.green()),
        ValueVerdict::DestroysValue => println!("{} {}", "▼".red(), line.red()),
        ValueVerdict::Neutral => println!("{} {}", "●".yellow(), line.yellow()),
    }
}

/// A key-value pair for display.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct KeyValue {
    #[tabled(rename = "Metric")]
    pub key: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

impl KeyValue {
    /// Creates a new key-value pair.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Creates a key-value pair formatted as currency.
    pub fn currency(key: impl Into<String>, value: f64) -> Self {
        Self::new(key, format_currency(value))
    }

    /// Creates a key-value pair formatted as a percentage of a decimal rate.
    pub fn percent(key: impl Into<String>, rate: f64) -> Self {
        Self::new(key, format_percent(rate))
    }
}

/// Prints key-value rows. JSON output is an object keyed by metric.
pub fn print_key_values(rows: &[KeyValue], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            let object: serde_json::Map<String, serde_json::Value> = rows
                .iter()
                .map(|r| (r.key.clone(), serde_json::Value::String(r.value.clone())))
                .collect();
            print_json_value(&object)
        }
        _ => print_output(rows, format),
    }
}

/// Prints a header for a section.
pub fn print_header(title: &str) {
    println!("\n{}", title.bold().underline());
}
