//! corpval CLI - Command-line interface for corporate valuation.
//!
//! # Usage
//!
//! ```bash
//! # Single-rate DCF with a cash flow chart
//! corpval dcf --initial-cash-flow 1000 --growth-rate 10 --discount-rate 12 --years 5 --chart
//!
//! # Multi-stage DCF
//! corpval dcf --stage expansion:3:15 --stage maturity:2:8
//!
//! # WACC with an implied tax rate
//! corpval wacc --equity 120000000 --debt 30000000 --interest 1500000 \
//!     --pretax-income 11963857 --income-tax 3030385
//!
//! # Everything in a scenario file, in one session
//! corpval evaluate scenario.toml
//! ```

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod chart;
mod cli;
mod commands;
mod error;
mod output;

use cli::{Cli, Commands};

const CRATE_TARGETS: [&str; 4] = ["corpval", "corpval_analytics", "corpval_config", "corpval_core"];

fn init_logging(verbose: bool, quiet: bool) {
    let level = match (verbose, quiet) {
        (true, _) => "debug",
        (false, true) => "warn",
        (false, false) => "info",
    };
    let default_filter = CRATE_TARGETS
        .iter()
        .map(|target| format!("{target}={level}"))
        .collect::<Vec<_>>()
        .join(",");
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    // Results go to stdout; keep logs on stderr so piped JSON/CSV stays clean.
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let format = cli.format;

    match cli.command {
        Commands::Dcf(args) => commands::dcf::execute(args, format),
        Commands::Wacc(args) => commands::wacc::execute(args, format),
        Commands::Roic(args) => commands::roic::execute(args, format),
        Commands::Evaluate(args) => commands::evaluate::execute(args, format),
        Commands::Config(args) => commands::config::execute(args, format),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);
    output::set_quiet(cli.quiet);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            output::print_error(&format!("{err:#}"));
            ExitCode::FAILURE
        }
    }
}
