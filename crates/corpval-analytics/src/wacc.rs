//! Weighted average cost of capital.
//!
//! ```text
//! r_d        = interest expense / interest-bearing debt      (0 without debt)
//! r_d(after) = r_d × (1 − t)
//! r_e        = r_f + β × ERP                                  (CAPM)
//! w_e, w_d   = E / (E + D), D / (E + D)
//! WACC       = w_e × r_e + w_d × r_d(after)
//! ```
//!
//! All rates are decimals.

use corpval_core::rates::ensure_finite;
use corpval_core::{ValuationError, ValuationResult};
use serde::{Deserialize, Serialize};

/// Where the tax rate used for the debt tax shield comes from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum TaxRateSource {
    /// Implied rate `income_tax_expense / pretax_income`.
    FromIncome {
        /// Profit before tax. Must be positive.
        pretax_income: f64,
        /// Income tax expense. Must be non-negative and below pre-tax income.
        income_tax_expense: f64,
    },
    /// A tax rate entered directly, in `[0, 1]`.
    Direct {
        /// Tax rate as a decimal.
        tax_rate: f64,
    },
}

impl TaxRateSource {
    /// Validates the entry and returns the tax rate.
    pub fn tax_rate(&self) -> ValuationResult<f64> {
        match *self {
            Self::FromIncome {
                pretax_income,
                income_tax_expense,
            } => {
                let pretax_income = ensure_finite("pre-tax income", pretax_income)?;
                let tax = ensure_finite("income tax expense", income_tax_expense)?;
                if pretax_income <= 0.0 {
                    return Err(ValuationError::domain(
                        "pre-tax income",
                        "pre-tax income must be greater than zero",
                    ));
                }
                if tax < 0.0 {
                    return Err(ValuationError::domain(
                        "income tax expense",
                        "income tax expense cannot be negative",
                    ));
                }
                if tax >= pretax_income {
                    return Err(ValuationError::domain(
                        "income tax expense",
                        "income tax expense must be less than pre-tax income",
                    ));
                }
                Ok(tax / pretax_income)
            }
            Self::Direct { tax_rate } => {
                let rate = ensure_finite("tax rate", tax_rate)?;
                if !(0.0..=1.0).contains(&rate) {
                    return Err(ValuationError::domain(
                        "tax rate",
                        "tax rate must be between 0 and 1",
                    ));
                }
                Ok(rate)
            }
        }
    }
}

/// Inputs of a WACC calculation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaccInputs {
    /// Market value of equity (E).
    pub equity_market_value: f64,
    /// Interest-bearing debt (D).
    pub interest_bearing_debt: f64,
    /// Annual interest expense on that debt.
    pub interest_expense: f64,
    /// Tax rate entry.
    pub tax: TaxRateSource,
    /// Equity beta.
    pub beta: f64,
    /// Risk-free rate as a decimal.
    pub risk_free_rate: f64,
    /// Equity risk premium as a decimal.
    pub equity_risk_premium: f64,
}

/// Result of a WACC calculation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaccResult {
    /// Tax rate applied to the cost of debt.
    pub tax_rate: f64,
    /// Interest expense over debt.
    pub cost_of_debt_pre_tax: f64,
    /// Cost of debt after the tax shield.
    pub cost_of_debt_after_tax: f64,
    /// CAPM cost of equity.
    pub cost_of_equity: f64,
    /// E / (E + D).
    pub equity_weight: f64,
    /// D / (E + D).
    pub debt_weight: f64,
    /// Weighted average cost of capital.
    pub wacc: f64,
}

fn validate(inputs: &WaccInputs) -> ValuationResult<f64> {
    for (field, value) in [
        ("equity market value", inputs.equity_market_value),
        ("interest-bearing debt", inputs.interest_bearing_debt),
        ("interest expense", inputs.interest_expense),
    ] {
        ensure_finite(field, value)?;
    }
    if inputs.equity_market_value < 0.0
        || inputs.interest_bearing_debt < 0.0
        || inputs.interest_expense < 0.0
    {
        return Err(ValuationError::domain(
            "capital structure",
            "market value, debt and interest expense cannot be negative",
        ));
    }

    let tax_rate = inputs.tax.tax_rate()?;

    if inputs.interest_bearing_debt == 0.0 && inputs.interest_expense != 0.0 {
        return Err(ValuationError::domain(
            "interest expense",
            "interest expense is reported but interest-bearing debt is zero",
        ));
    }
    if inputs.equity_market_value == 0.0 && inputs.interest_bearing_debt == 0.0 {
        return Err(ValuationError::domain(
            "capital structure",
            "market value and debt cannot both be zero",
        ));
    }

    ensure_finite("beta", inputs.beta)?;
    ensure_finite("risk-free rate", inputs.risk_free_rate)?;
    ensure_finite("equity risk premium", inputs.equity_risk_premium)?;

    Ok(tax_rate)
}

/// Calculates the weighted average cost of capital.
///
/// # Errors
///
/// Returns a domain validation error for negative amounts, an invalid tax
/// entry, interest without debt, or a capital structure with neither equity
/// nor debt.
pub fn calculate_wacc(inputs: &WaccInputs) -> ValuationResult<WaccResult> {
    let tax_rate = validate(inputs)?;

    let debt = inputs.interest_bearing_debt;
    let cost_of_debt_pre_tax = if debt == 0.0 {
        0.0
    } else {
        inputs.interest_expense / debt
    };
    let cost_of_debt_after_tax = cost_of_debt_pre_tax * (1.0 - tax_rate);

    let cost_of_equity = inputs.risk_free_rate + inputs.beta * inputs.equity_risk_premium;

    let total = inputs.equity_market_value + debt;
    let (equity_weight, debt_weight) = if total == 0.0 {
        (0.0, 0.0)
    } else {
        (inputs.equity_market_value / total, debt / total)
    };

    let wacc = equity_weight * cost_of_equity + debt_weight * cost_of_debt_after_tax;

    log::debug!(
        "WACC {:.6}: E weight {:.4}, D weight {:.4}, r_e {:.6}, r_d after tax {:.6}",
        wacc,
        equity_weight,
        debt_weight,
        cost_of_equity,
        cost_of_debt_after_tax
    );

    Ok(WaccResult {
        tax_rate,
        cost_of_debt_pre_tax,
        cost_of_debt_after_tax,
        cost_of_equity,
        equity_weight,
        debt_weight,
        wacc,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sample() -> WaccInputs {
        WaccInputs {
            equity_market_value: 8000.0,
            interest_bearing_debt: 2000.0,
            interest_expense: 100.0,
            tax: TaxRateSource::FromIncome {
                pretax_income: 1000.0,
                income_tax_expense: 250.0,
            },
            beta: 1.1,
            risk_free_rate: 0.026,
            equity_risk_premium: 0.06,
        }
    }

    #[test]
    fn test_wacc_components() {
        let result = calculate_wacc(&sample()).unwrap();

        assert_relative_eq!(result.tax_rate, 0.25);
        assert_relative_eq!(result.cost_of_debt_pre_tax, 0.05);
        assert_relative_eq!(result.cost_of_debt_after_tax, 0.0375, epsilon = 1e-12);
        assert_relative_eq!(result.cost_of_equity, 0.092, epsilon = 1e-12);
        assert_relative_eq!(result.equity_weight, 0.8);
        assert_relative_eq!(result.debt_weight, 0.2);
        assert_relative_eq!(result.wacc, 0.8 * 0.092 + 0.2 * 0.0375, epsilon = 1e-12);
    }

    #[test]
    fn test_direct_tax_rate() {
        let mut inputs = sample();
        inputs.tax = TaxRateSource::Direct { tax_rate: 0.25 };
        let direct = calculate_wacc(&inputs).unwrap();
        let implied = calculate_wacc(&sample()).unwrap();
        assert_relative_eq!(direct.wacc, implied.wacc, epsilon = 1e-12);

        inputs.tax = TaxRateSource::Direct { tax_rate: 1.2 };
        assert_eq!(calculate_wacc(&inputs).unwrap_err().field(), "tax rate");
        inputs.tax = TaxRateSource::Direct { tax_rate: -0.1 };
        assert!(calculate_wacc(&inputs).is_err());
    }

    #[test]
    fn test_equity_only_firm() {
        let mut inputs = sample();
        inputs.interest_bearing_debt = 0.0;
        inputs.interest_expense = 0.0;

        let result = calculate_wacc(&inputs).unwrap();
        assert_relative_eq!(result.cost_of_debt_pre_tax, 0.0);
        assert_relative_eq!(result.equity_weight, 1.0);
        assert_relative_eq!(result.wacc, result.cost_of_equity);
    }

    #[test]
    fn test_both_zero_rejected() {
        let mut inputs = sample();
        inputs.equity_market_value = 0.0;
        inputs.interest_bearing_debt = 0.0;
        inputs.interest_expense = 0.0;

        let err = calculate_wacc(&inputs).unwrap_err();
        assert!(err.to_string().contains("market value and debt cannot both be zero"));
    }

    #[test]
    fn test_interest_without_debt_rejected() {
        let mut inputs = sample();
        inputs.interest_bearing_debt = 0.0;
        assert_eq!(calculate_wacc(&inputs).unwrap_err().field(), "interest expense");
    }

    #[test]
    fn test_negative_amounts_rejected() {
        let mut inputs = sample();
        inputs.equity_market_value = -1.0;
        assert!(calculate_wacc(&inputs).unwrap_err().message().contains("cannot be negative"));
    }

    #[test]
    fn test_income_derived_tax_rules() {
        let mut inputs = sample();
        inputs.tax = TaxRateSource::FromIncome {
            pretax_income: 0.0,
            income_tax_expense: 0.0,
        };
        assert_eq!(calculate_wacc(&inputs).unwrap_err().field(), "pre-tax income");

        inputs.tax = TaxRateSource::FromIncome {
            pretax_income: 100.0,
            income_tax_expense: -5.0,
        };
        assert_eq!(calculate_wacc(&inputs).unwrap_err().field(), "income tax expense");

        inputs.tax = TaxRateSource::FromIncome {
            pretax_income: 100.0,
            income_tax_expense: 100.0,
        };
        assert!(calculate_wacc(&inputs)
            .unwrap_err()
            .message()
            .contains("less than pre-tax income"));
    }
}
