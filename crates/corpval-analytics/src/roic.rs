//! Return on invested capital.
//!
//! ```text
//! t          = income tax expense / total pre-tax profit    (0 when profit ≤ 0)
//! NOPAT      = (operating profit + interest expense) × (1 − t)
//! IC         = parent equity + interest-bearing debt
//! ROIC       = NOPAT / IC
//! ```

use std::cmp::Ordering;
use std::fmt;

use corpval_core::format::{format_percent, to_display_percent};
use corpval_core::rates::{ensure_finite, ensure_non_negative};
use corpval_core::{ValuationError, ValuationResult};
use serde::{Deserialize, Serialize};

/// Inputs of a ROIC calculation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoicInputs {
    /// Operating profit. Must be non-zero.
    pub operating_profit: f64,
    /// Interest expense added back to operating profit.
    pub interest_expense: f64,
    /// Total profit before tax, used for the effective tax rate.
    pub total_pretax_profit: f64,
    /// Income tax expense.
    pub income_tax_expense: f64,
    /// Equity attributable to the parent company's owners.
    pub parent_equity: f64,
    /// Interest-bearing debt.
    pub interest_bearing_debt: f64,
}

impl RoicInputs {
    /// Parent equity plus interest-bearing debt.
    pub fn invested_capital(&self) -> f64 {
        self.parent_equity + self.interest_bearing_debt
    }

    /// Effective tax rate; zero when pre-tax profit is not positive.
    pub fn effective_tax_rate(&self) -> f64 {
        if self.total_pretax_profit > 0.0 {
            self.income_tax_expense / self.total_pretax_profit
        } else {
            0.0
        }
    }
}

/// Outcome of comparing ROIC against WACC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueVerdict {
    /// ROIC above WACC.
    CreatesValue,
    /// ROIC below WACC.
    DestroysValue,
    /// ROIC equal to WACC.
    Neutral,
}

impl ValueVerdict {
    /// Relation symbol between ROIC and WACC.
    pub fn symbol(self) -> &'static str {
        match self {
            Self::CreatesValue => ">",
            Self::DestroysValue => "<",
            Self::Neutral => "=",
        }
    }

    /// One line explanation of the verdict.
    pub fn explanation(self) -> &'static str {
        match self {
            Self::CreatesValue => "value creation: return on capital exceeds the cost of capital",
            Self::DestroysValue => {
                "value destruction: return on capital is below the cost of capital"
            }
            Self::Neutral => "value maintained: return on capital equals the cost of capital",
        }
    }
}

impl fmt::Display for ValueVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::CreatesValue => "Creates value",
            Self::DestroysValue => "Destroys value",
            Self::Neutral => "Value neutral",
        };
        write!(f, "{name}")
    }
}

/// ROIC measured against a previously computed WACC.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaccComparison {
    /// Classification.
    pub verdict: ValueVerdict,
    /// ROIC formatted as a percentage.
    pub roic_percent: String,
    /// WACC formatted as a percentage.
    pub wacc_percent: String,
    /// e.g. `ROIC > WACC (38.3302% > 9.2000%)`.
    pub summary: String,
    /// Explanation of the verdict.
    pub explanation: String,
}

impl WaccComparison {
    /// Compares `roic` and `wacc` (decimals) on the percentages as displayed,
    /// so two rates that print the same are `Neutral`.
    pub fn new(roic: f64, wacc: f64) -> Self {
        let verdict = match to_display_percent(roic).partial_cmp(&to_display_percent(wacc)) {
            Some(Ordering::Greater) => ValueVerdict::CreatesValue,
            Some(Ordering::Less) => ValueVerdict::DestroysValue,
            _ => ValueVerdict::Neutral,
        };
        let roic_percent = format_percent(roic);
        let wacc_percent = format_percent(wacc);
        let summary = format!(
            "ROIC {sym} WACC ({roic_percent} {sym} {wacc_percent})",
            sym = verdict.symbol()
        );

        Self {
            verdict,
            roic_percent,
            wacc_percent,
            summary,
            explanation: verdict.explanation().to_string(),
        }
    }
}

/// Result of a ROIC calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoicResult {
    /// Tax rate applied to operating profit.
    pub effective_tax_rate: f64,
    /// Net operating profit after tax.
    pub nopat: f64,
    /// Parent equity plus interest-bearing debt.
    pub invested_capital: f64,
    /// NOPAT over invested capital.
    pub roic: f64,
    /// Comparison against a prior WACC, when one was available.
    pub comparison: Option<WaccComparison>,
}

fn validate(inputs: &RoicInputs) -> ValuationResult<()> {
    for (field, value) in [
        ("operating profit", inputs.operating_profit),
        ("interest expense", inputs.interest_expense),
        ("total pre-tax profit", inputs.total_pretax_profit),
        ("income tax expense", inputs.income_tax_expense),
        ("parent equity", inputs.parent_equity),
        ("interest-bearing debt", inputs.interest_bearing_debt),
    ] {
        ensure_finite(field, value)?;
    }

    if inputs.operating_profit == 0.0 {
        return Err(ValuationError::domain(
            "operating profit",
            "operating profit cannot be zero",
        ));
    }
    ensure_non_negative("parent equity", inputs.parent_equity)?;
    ensure_non_negative("interest-bearing debt", inputs.interest_bearing_debt)?;
    if inputs.invested_capital() <= 0.0 {
        return Err(ValuationError::domain(
            "invested capital",
            "invested capital (parent equity + interest-bearing debt) must be greater than zero",
        ));
    }
    Ok(())
}

/// Calculates ROIC and, given a prior WACC, classifies value creation.
///
/// # Errors
///
/// Zero operating profit, negative equity or debt, and non-positive invested
/// capital are domain errors.
pub fn calculate_roic(inputs: &RoicInputs, prior_wacc: Option<f64>) -> ValuationResult<RoicResult> {
    validate(inputs)?;

    let effective_tax_rate = inputs.effective_tax_rate();
    let nopat = (inputs.operating_profit + inputs.interest_expense) * (1.0 - effective_tax_rate);
    let invested_capital = inputs.invested_capital();
    let roic = nopat / invested_capital;

    let comparison = prior_wacc.map(|wacc| WaccComparison::new(roic, wacc));

    log::debug!(
        "ROIC {:.6}: NOPAT {:.2} over invested capital {:.2} (tax rate {:.4})",
        roic,
        nopat,
        invested_capital,
        effective_tax_rate
    );

    Ok(RoicResult {
        effective_tax_rate,
        nopat,
        invested_capital,
        roic,
        comparison,
    })
}
