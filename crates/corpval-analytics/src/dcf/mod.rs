//! Discounted cash flow valuation.
//!
//! The engine runs in three steps that share one record type:
//!
//! 1. [`project_cash_flows`] grows the initial free cash flow over the
//!    forecast horizon and discounts every year;
//! 2. [`terminal_value`] capitalises the last projected cash flow with the
//!    Gordon growth formula and discounts it back;
//! 3. [`aggregate`] sums operating value, company value and value per share.
//!
//! [`calculate_dcf`] validates the inputs and chains the three steps.
//!
//! # Formula
//!
//! ```text
//! CF(t)  = CF(t-1) × (1 + g_stage)            CF(0) = initial cash flow
//! DF(t)  = (1 + r)^t
//! PV(t)  = CF(t) / DF(t)
//! TV     = CF(N) × (1 + g_T) / (r − g_T)
//! EV     = Σ PV(t) + TV / (1 + r)^N
//! ```
//!
//! Rates on [`DcfInputs`] are percentages (`12.0` for 12 %).

mod aggregate;
mod projection;
mod terminal;

pub use aggregate::{aggregate, Aggregate};
pub use projection::{project_cash_flows, Projection};
pub use terminal::terminal_value;

use corpval_core::rates::{ensure_finite, percent_to_decimal};
use corpval_core::{ValuationError, ValuationResult};
use serde::{Deserialize, Serialize};

/// A contiguous run of forecast years sharing one growth rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GrowthStage {
    /// Display name of the stage ("high growth", "fade", ...).
    #[serde(default)]
    pub name: String,
    /// Number of forecast years in the stage. Must be at least one.
    pub years: u32,
    /// Annual growth rate in percent. Zero and negative rates are valid;
    /// a missing rate is rejected.
    #[serde(default)]
    pub growth_rate: Option<f64>,
}

impl GrowthStage {
    /// Creates a stage with a growth rate.
    pub fn new(name: impl Into<String>, years: u32, growth_rate: f64) -> Self {
        Self {
            name: name.into(),
            years,
            growth_rate: Some(growth_rate),
        }
    }

    /// Label used in error messages and chart labels.
    pub(crate) fn describe(&self, position: usize) -> String {
        if self.name.trim().is_empty() {
            format!("stage #{}", position + 1)
        } else {
            format!("stage '{}'", self.name)
        }
    }
}

/// How the initial cash flow grows over the forecast horizon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum GrowthSpec {
    /// One growth rate (percent) applied for `years` years.
    Single {
        /// Annual growth rate in percent.
        growth_rate: f64,
        /// Forecast horizon in years.
        years: u32,
    },
    /// Ordered growth stages; the horizon is the sum of stage durations.
    MultiStage {
        /// The stages, in projection order.
        stages: Vec<GrowthStage>,
    },
}

/// Longest forecast horizon accepted, in years.
pub const MAX_FORECAST_YEARS: u32 = 1000;

fn check_horizon(total_years: u64) -> ValuationResult<()> {
    if total_years > u64::from(MAX_FORECAST_YEARS) {
        return Err(ValuationError::domain(
            "forecast years",
            format!(
                "forecast horizon of {total_years} years exceeds the {MAX_FORECAST_YEARS}-year limit"
            ),
        ));
    }
    Ok(())
}

impl GrowthSpec {
    /// Builds a multi-stage schedule.
    pub fn stages(stages: Vec<GrowthStage>) -> Self {
        Self::MultiStage { stages }
    }

    /// Total forecast years implied by the schedule.
    ///
    /// In multi-stage mode this is the sum of the stage durations and takes
    /// precedence over any separately supplied horizon.
    pub fn forecast_years(&self) -> u32 {
        match self {
            Self::Single { years, .. } => *years,
            Self::MultiStage { stages } => stages
                .iter()
                .fold(0u32, |total, s| total.saturating_add(s.years)),
        }
    }

    /// Checks durations and growth rates before any projection happens.
    pub fn validate(&self) -> ValuationResult<()> {
        match self {
            Self::Single { growth_rate, years } => {
                ensure_finite("growth rate", *growth_rate)?;
                if *years == 0 {
                    return Err(ValuationError::domain(
                        "forecast years",
                        "forecast horizon must be at least one year",
                    ));
                }
                check_horizon(u64::from(*years))?;
            }
            Self::MultiStage { stages } => {
                if stages.is_empty() {
                    return Err(ValuationError::domain(
                        "growth stages",
                        "at least one growth stage is required",
                    ));
                }
                for (i, stage) in stages.iter().enumerate() {
                    if stage.years == 0 {
                        return Err(ValuationError::domain(
                            stage.describe(i),
                            "duration must be at least one year",
                        ));
                    }
                    match stage.growth_rate {
                        None => {
                            return Err(ValuationError::domain(
                                stage.describe(i),
                                "growth rate is missing",
                            ))
                        }
                        Some(g) if !g.is_finite() => {
                            return Err(ValuationError::domain(
                                stage.describe(i),
                                "growth rate must be a finite number",
                            ))
                        }
                        Some(_) => {}
                    }
                }
                check_horizon(stages.iter().map(|s| u64::from(s.years)).sum())?;
            }
        }
        Ok(())
    }
}

/// Inputs of a DCF valuation. Rates are in percent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DcfInputs {
    /// Free cash flow of the base year (year 0).
    pub initial_cash_flow: f64,
    /// Growth schedule.
    pub growth: GrowthSpec,
    /// Discount rate in percent.
    pub discount_rate: f64,
    /// Perpetual growth rate after the forecast horizon, in percent.
    pub terminal_growth_rate: f64,
    /// Shares outstanding. Value per share is only reported when positive.
    #[serde(default)]
    pub share_count: Option<f64>,
}

/// One forecast year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearRecord {
    /// 1-based forecast year.
    pub year: u32,
    /// Stage that produced this year, in multi-stage mode.
    pub stage: Option<String>,
    /// Projected free cash flow.
    pub cash_flow: f64,
    /// `(1 + r)^year`.
    pub discount_factor: f64,
    /// `cash_flow / discount_factor`.
    pub present_value: f64,
    /// Running sum of present values up to and including this year.
    pub cumulative_pv: f64,
}

impl YearRecord {
    /// Row / axis label for this year.
    pub fn label(&self) -> String {
        match &self.stage {
            Some(stage) if !stage.is_empty() => format!("Year {} ({})", self.year, stage),
            _ => format!("Year {}", self.year),
        }
    }
}

/// The terminal value row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TerminalRecord {
    /// Undiscounted Gordon growth value at the end of the horizon.
    pub terminal_value: f64,
    /// Terminal value discounted to today.
    pub present_value: f64,
}

/// One point of the cash flow chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    /// X axis label.
    pub label: String,
    /// Stage of the year, in multi-stage mode.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stage: Option<String>,
    /// Projected cash flow.
    pub cash_flow: f64,
    /// Discounted cash flow.
    pub present_value: f64,
}

/// Complete output of a DCF valuation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DcfResult {
    /// Forecast years, in order.
    pub yearly: Vec<YearRecord>,
    /// Terminal value row.
    pub terminal: TerminalRecord,
    /// Sum of the forecast-period present values.
    pub operating_value: f64,
    /// Present value of the terminal value.
    pub terminal_value_pv: f64,
    /// Operating value plus terminal present value (enterprise value).
    pub company_value: f64,
    /// Company value per share, when a positive share count was supplied.
    pub stock_price: Option<f64>,
    /// Length of the forecast horizon actually used.
    pub forecast_years: u32,
}

impl DcfResult {
    /// Chart series of (label, cash flow, present value), terminal row excluded.
    pub fn chart_series(&self) -> Vec<ChartPoint> {
        self.yearly
            .iter()
            .map(|r| ChartPoint {
                label: r.label(),
                stage: r.stage.clone(),
                cash_flow: r.cash_flow,
                present_value: r.present_value,
            })
            .collect()
    }

    /// Share of company value coming from the terminal value.
    pub fn terminal_share(&self) -> f64 {
        self.terminal_value_pv / self.company_value
    }
}

/// Runs a complete DCF valuation.
///
/// # Errors
///
/// Returns [`ValuationError::DomainValidation`] when the initial cash flow is
/// not positive, the discount rate does not exceed the terminal growth rate,
/// or the growth schedule has a zero-length stage or a missing rate.
pub fn calculate_dcf(inputs: &DcfInputs) -> ValuationResult<DcfResult> {
    let initial = ensure_finite("initial cash flow", inputs.initial_cash_flow)?;
    if initial <= 0.0 {
        return Err(ValuationError::domain(
            "initial cash flow",
            "must be greater than zero",
        ));
    }

    let discount_rate = percent_to_decimal(ensure_finite("discount rate", inputs.discount_rate)?);
    if discount_rate <= -1.0 {
        return Err(ValuationError::domain(
            "discount rate",
            "must be greater than -100%",
        ));
    }
    let terminal_growth =
        percent_to_decimal(ensure_finite("terminal growth rate", inputs.terminal_growth_rate)?);
    terminal::check_rates(terminal_growth, discount_rate)?;

    inputs.growth.validate()?;

    let share_count = match inputs.share_count {
        Some(shares) => Some(ensure_finite("share count", shares)?),
        None => None,
    };

    let projection = project_cash_flows(initial, &inputs.growth, discount_rate)?;
    let forecast_years = inputs.growth.forecast_years();

    let (nominal, terminal_pv) = terminal_value(
        projection.last_cash_flow,
        terminal_growth,
        discount_rate,
        forecast_years,
    )?;

    let totals = aggregate(&projection.records, terminal_pv, share_count);

    log::debug!(
        "DCF over {} years: operating value {:.2}, terminal PV {:.2}, company value {:.2}",
        forecast_years,
        totals.operating_value,
        terminal_pv,
        totals.company_value
    );

    Ok(DcfResult {
        yearly: projection.records,
        terminal: TerminalRecord {
            terminal_value: nominal,
            present_value: terminal_pv,
        },
        operating_value: totals.operating_value,
        terminal_value_pv: terminal_pv,
        company_value: totals.company_value,
        stock_price: totals.stock_price,
        forecast_years,
    })
}
