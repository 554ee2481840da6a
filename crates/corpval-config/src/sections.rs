//! Scenario sections and their conversion into engine inputs.
//!
//! Field names follow the input form: amounts are plain numbers, DCF rates are
//! percentages, WACC market parameters are decimals. Missing fields fall back
//! to the defaults below.

use corpval_analytics::dcf::{DcfInputs, GrowthSpec, GrowthStage};
use corpval_analytics::roic::RoicInputs;
use corpval_analytics::wacc::{TaxRateSource, WaccInputs};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult, Validate, ValidationError};

/// Default base-year free cash flow.
pub const DEFAULT_INITIAL_CASH_FLOW: f64 = 1000.0;
/// Default single-stage growth rate, in percent.
pub const DEFAULT_GROWTH_RATE: f64 = 10.0;
/// Default discount rate, in percent.
pub const DEFAULT_DISCOUNT_RATE: f64 = 12.0;
/// Default single-stage forecast horizon.
pub const DEFAULT_YEARS: u32 = 5;
/// Default terminal growth rate, in percent.
pub const DEFAULT_TERMINAL_GROWTH_RATE: f64 = 3.0;
/// Default equity beta.
pub const DEFAULT_BETA: f64 = 1.1;
/// Default risk-free rate.
pub const DEFAULT_RISK_FREE_RATE: f64 = 0.026;
/// Default equity risk premium.
pub const DEFAULT_EQUITY_RISK_PREMIUM: f64 = 0.06;

fn default_initial_cash_flow() -> f64 {
    DEFAULT_INITIAL_CASH_FLOW
}

fn default_discount_rate() -> f64 {
    DEFAULT_DISCOUNT_RATE
}

fn default_terminal_growth_rate() -> f64 {
    DEFAULT_TERMINAL_GROWTH_RATE
}

fn default_beta() -> f64 {
    DEFAULT_BETA
}

fn default_risk_free_rate() -> f64 {
    DEFAULT_RISK_FREE_RATE
}

fn default_equity_risk_premium() -> f64 {
    DEFAULT_EQUITY_RISK_PREMIUM
}

// ============================================================================
// DCF
// ============================================================================

/// `[dcf]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DcfSection {
    /// Base-year free cash flow.
    #[serde(default = "default_initial_cash_flow")]
    pub initial_cash_flow: f64,

    /// Single-stage growth rate (percent). Mutually exclusive with `stages`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub growth_rate: Option<f64>,

    /// Single-stage horizon. Ignored when `stages` is present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub years: Option<u32>,

    /// Discount rate (percent).
    #[serde(default = "default_discount_rate")]
    pub discount_rate: f64,

    /// Terminal growth rate (percent).
    #[serde(default = "default_terminal_growth_rate")]
    pub terminal_growth_rate: f64,

    /// Shares outstanding, for value per share.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub share_capital: Option<f64>,

    /// Multi-stage growth schedule.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stages: Option<Vec<GrowthStage>>,
}

impl Default for DcfSection {
    fn default() -> Self {
        Self {
            initial_cash_flow: DEFAULT_INITIAL_CASH_FLOW,
            growth_rate: Some(DEFAULT_GROWTH_RATE),
            years: Some(DEFAULT_YEARS),
            discount_rate: DEFAULT_DISCOUNT_RATE,
            terminal_growth_rate: DEFAULT_TERMINAL_GROWTH_RATE,
            share_capital: None,
            stages: None,
        }
    }
}

impl Validate for DcfSection {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        if self.stages.is_some() && self.growth_rate.is_some() {
            errors.push(ValidationError::new(
                "dcf.growth_rate",
                "growth_rate and stages cannot both be set",
            ));
        }
        if matches!(&self.stages, Some(stages) if stages.is_empty()) {
            errors.push(ValidationError::new(
                "dcf.stages",
                "stages must list at least one stage",
            ));
        }
        errors
    }
}

impl DcfSection {
    /// Builds the engine inputs.
    ///
    /// In multi-stage mode the horizon comes from the stage durations and any
    /// `years` value is ignored.
    pub fn to_inputs(&self) -> ConfigResult<DcfInputs> {
        self.validate_or_error()?;

        let growth = match &self.stages {
            Some(stages) => {
                if let Some(years) = self.years {
                    let derived = stages
                        .iter()
                        .fold(0u32, |total, s| total.saturating_add(s.years));
                    if years != derived {
                        log::info!(
                            "dcf.years = {years} ignored; stage durations give {derived} years"
                        );
                    }
                }
                GrowthSpec::stages(stages.clone())
            }
            None => GrowthSpec::Single {
                growth_rate: self.growth_rate.unwrap_or(DEFAULT_GROWTH_RATE),
                years: self.years.unwrap_or(DEFAULT_YEARS),
            },
        };

        Ok(DcfInputs {
            initial_cash_flow: self.initial_cash_flow,
            growth,
            discount_rate: self.discount_rate,
            terminal_growth_rate: self.terminal_growth_rate,
            share_count: self.share_capital,
        })
    }
}

// ============================================================================
// WACC
// ============================================================================

/// `[wacc]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WaccSection {
    /// Market value of equity.
    #[serde(default)]
    pub equity_market_value: f64,

    /// Interest-bearing debt.
    #[serde(default)]
    pub interest_bearing_debt: f64,

    /// Interest expense.
    #[serde(default)]
    pub interest_expense: f64,

    /// Profit before tax (implied tax rate entry).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pretax_income: Option<f64>,

    /// Income tax expense (implied tax rate entry).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub income_tax_expense: Option<f64>,

    /// Tax rate as a decimal (direct entry).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_rate: Option<f64>,

    /// Equity beta.
    #[serde(default = "default_beta")]
    pub beta: f64,

    /// Risk-free rate (decimal).
    #[serde(default = "default_risk_free_rate")]
    pub risk_free_rate: f64,

    /// Equity risk premium (decimal).
    #[serde(default = "default_equity_risk_premium")]
    pub equity_risk_premium: f64,
}

impl Default for WaccSection {
    fn default() -> Self {
        Self {
            equity_market_value: 0.0,
            interest_bearing_debt: 0.0,
            interest_expense: 0.0,
            pretax_income: None,
            income_tax_expense: None,
            tax_rate: None,
            beta: DEFAULT_BETA,
            risk_free_rate: DEFAULT_RISK_FREE_RATE,
            equity_risk_premium: DEFAULT_EQUITY_RISK_PREMIUM,
        }
    }
}

impl WaccSection {
    fn tax_source(&self) -> Result<TaxRateSource, ValidationError> {
        match (self.tax_rate, self.pretax_income, self.income_tax_expense) {
            (Some(tax_rate), None, None) => Ok(TaxRateSource::Direct { tax_rate }),
            (None, Some(pretax_income), Some(income_tax_expense)) => {
                Ok(TaxRateSource::FromIncome {
                    pretax_income,
                    income_tax_expense,
                })
            }
            (Some(_), _, _) => Err(ValidationError::new(
                "wacc.tax_rate",
                "give either tax_rate or pretax_income + income_tax_expense, not both",
            )),
            (None, None, None) => Err(ValidationError::new(
                "wacc.tax_rate",
                "a tax entry is required: tax_rate, or pretax_income + income_tax_expense",
            )),
            (None, _, _) => Err(ValidationError::new(
                "wacc.pretax_income",
                "pretax_income and income_tax_expense must be given together",
            )),
        }
    }

    /// Builds the engine inputs.
    pub fn to_inputs(&self) -> ConfigResult<WaccInputs> {
        self.validate_or_error()?;
        let tax = self.tax_source().map_err(|e| ConfigError::Validation {
            field: e.field,
            message: e.message,
        })?;

        Ok(WaccInputs {
            equity_market_value: self.equity_market_value,
            interest_bearing_debt: self.interest_bearing_debt,
            interest_expense: self.interest_expense,
            tax,
            beta: self.beta,
            risk_free_rate: self.risk_free_rate,
            equity_risk_premium: self.equity_risk_premium,
        })
    }
}

impl Validate for WaccSection {
    fn validate(&self) -> Vec<ValidationError> {
        self.tax_source().err().into_iter().collect()
    }
}

// ============================================================================
// ROIC
// ============================================================================

/// `[roic]` section.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RoicSection {
    /// Operating profit.
    pub operating_profit: f64,
    /// Interest expense.
    pub interest_expense: f64,
    /// Total profit before tax.
    pub total_pretax_profit: f64,
    /// Income tax expense.
    pub income_tax_expense: f64,
    /// Equity attributable to the parent.
    pub parent_equity: f64,
    /// Interest-bearing debt.
    pub interest_bearing_debt: f64,
}

impl RoicSection {
    /// Reference company used by the template.
    pub fn sample() -> Self {
        Self {
            operating_profit: 11_968_858.0,
            interest_expense: 1447.0,
            total_pretax_profit: 11_963_857.0,
            income_tax_expense: 3_030_385.0,
            parent_equity: 23_310_598.0,
            interest_bearing_debt: 0.0,
        }
    }

    /// Builds the engine inputs.
    pub fn to_inputs(&self) -> RoicInputs {
        RoicInputs {
            operating_profit: self.operating_profit,
            interest_expense: self.interest_expense,
            total_pretax_profit: self.total_pretax_profit,
            income_tax_expense: self.income_tax_expense,
            parent_equity: self.parent_equity,
            interest_bearing_debt: self.interest_bearing_debt,
        }
    }
}
