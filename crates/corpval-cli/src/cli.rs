//! CLI argument definitions.

use clap::{Parser, Subcommand, ValueEnum};

use crate::commands::{ConfigArgs, DcfArgs, EvaluateArgs, RoicArgs, WaccArgs};

/// corpval - DCF, WACC and ROIC valuation from the command line
#[derive(Parser)]
#[command(name = "corpval")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// Suppress informational messages and non-error logs
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Discounted cash flow valuation (single rate or multi-stage)
    Dcf(DcfArgs),

    /// Weighted average cost of capital
    Wacc(WaccArgs),

    /// Return on invested capital, optionally compared against WACC
    Roic(RoicArgs),

    /// Run every section of a scenario file in one session
    Evaluate(EvaluateArgs),

    /// Scenario templates and inspection
    Config(ConfigArgs),
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
    /// Minimal output (just the headline value)
    Minimal,
}
