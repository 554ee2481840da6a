//! WACC command implementation.
//!
//! Weighs a CAPM cost of equity and an after-tax cost of debt by market value
//! of equity and interest-bearing debt.

use anyhow::Result;
use clap::Args;
use tracing::info;

use corpval_analytics::session::ValuationSession;
use corpval_analytics::wacc::WaccResult;
use corpval_config::sections::{
    WaccSection, DEFAULT_BETA, DEFAULT_EQUITY_RISK_PREMIUM, DEFAULT_RISK_FREE_RATE,
};
use corpval_core::format::format_percent;

use crate::cli::OutputFormat;
use crate::output::{print_header, print_json_value, print_key_values, KeyValue};

/// Arguments for the wacc command.
#[derive(Args, Debug)]
pub struct WaccArgs {
    /// Market value of equity
    #[arg(short, long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub equity: f64,

    /// Interest-bearing debt
    #[arg(short, long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub debt: f64,

    /// Interest expense
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub interest: f64,

    /// Profit before tax, for the implied tax rate
    #[arg(long, requires = "income_tax", allow_negative_numbers = true)]
    pub pretax_income: Option<f64>,

    /// Income tax expense, for the implied tax rate
    #[arg(long, requires = "pretax_income", allow_negative_numbers = true)]
    pub income_tax: Option<f64>,

    /// Tax rate as a decimal (e.g. 0.25), instead of the implied rate
    #[arg(long, conflicts_with_all = ["pretax_income", "income_tax"], allow_negative_numbers = true)]
    pub tax_rate: Option<f64>,

    /// Equity beta
    #[arg(short, long, default_value_t = DEFAULT_BETA, allow_negative_numbers = true)]
    pub beta: f64,

    /// Risk-free rate as a decimal
    #[arg(long, default_value_t = DEFAULT_RISK_FREE_RATE, allow_negative_numbers = true)]
    pub risk_free_rate: f64,

    /// Equity risk premium as a decimal
    #[arg(long, default_value_t = DEFAULT_EQUITY_RISK_PREMIUM, allow_negative_numbers = true)]
    pub equity_risk_premium: f64,
}

impl WaccArgs {
    fn to_section(&self) -> WaccSection {
        WaccSection {
            equity_market_value: self.equity,
            interest_bearing_debt: self.debt,
            interest_expense: self.interest,
            pretax_income: self.pretax_income,
            income_tax_expense: self.income_tax,
            tax_rate: self.tax_rate,
            beta: self.beta,
            risk_free_rate: self.risk_free_rate,
            equity_risk_premium: self.equity_risk_premium,
        }
    }
}

/// Rows of a WACC result, the WACC itself last.
pub fn summary_rows(result: &WaccResult) -> Vec<KeyValue> {
    vec![
        KeyValue::percent("Tax Rate", result.tax_rate),
        KeyValue::percent("Cost of Debt (pre-tax)", result.cost_of_debt_pre_tax),
        KeyValue::percent("Cost of Debt (after tax)", result.cost_of_debt_after_tax),
        KeyValue::percent("Cost of Equity", result.cost_of_equity),
        KeyValue::percent("Equity Weight", result.equity_weight),
        KeyValue::percent("Debt Weight", result.debt_weight),
        KeyValue::percent("WACC", result.wacc),
    ]
}

/// Prints a WACC result.
pub fn render(result: &WaccResult, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => {
            print_header("WACC");
            print_key_values(&summary_rows(result), format)?;
        }
        OutputFormat::Json => print_json_value(result)?,
        OutputFormat::Csv => print_key_values(&summary_rows(result), format)?,
        OutputFormat::Minimal => println!("{}", format_percent(result.wacc)),
    }
    Ok(())
}

/// Execute the wacc command.
pub fn execute(args: WaccArgs, format: OutputFormat) -> Result<()> {
    let inputs = args.to_section().to_inputs()?;
    let mut session = ValuationSession::new();
    let result = session.calculate_wacc(&inputs)?;
    info!(wacc = result.wacc, "WACC calculated");

    render(&result, format)
}
