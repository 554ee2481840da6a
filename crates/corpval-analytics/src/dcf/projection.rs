//! Free cash flow projection.

use corpval_core::rates::percent_to_decimal;
use corpval_core::ValuationResult;

use super::{GrowthSpec, YearRecord};

/// Projected forecast years plus the cash flow the terminal value grows from.
#[derive(Debug, Clone, PartialEq)]
pub struct Projection {
    /// One record per forecast year.
    pub records: Vec<YearRecord>,
    /// Cash flow of the final forecast year.
    pub last_cash_flow: f64,
}

/// Projects and discounts free cash flows.
///
/// * Single rate: `CF(i) = CF0 × (1 + g)^i` for `i = 1..=years`.
/// * Multi-stage: each year grows off the previous year's cash flow at the
///   rate of the stage it belongs to, so every stage boundary carries over
///   the last cash flow of the stage before it.
///
/// # Arguments
///
/// * `initial_cash_flow` - Base year free cash flow
/// * `growth` - Growth schedule (rates in percent)
/// * `discount_rate` - Discount rate as a decimal (e.g., 0.12 for 12%)
///
/// The schedule is validated before anything is computed.
pub fn project_cash_flows(
    initial_cash_flow: f64,
    growth: &GrowthSpec,
    discount_rate: f64,
) -> ValuationResult<Projection> {
    growth.validate()?;

    let horizon = growth.forecast_years() as usize;
    let mut records = Vec::with_capacity(horizon);
    let mut cumulative_pv = 0.0;
    let mut push = |year: u32, stage: Option<String>, cash_flow: f64| {
        let discount_factor = (1.0 + discount_rate).powi(year as i32);
        let present_value = cash_flow / discount_factor;
        cumulative_pv += present_value;
        records.push(YearRecord {
            year,
            stage,
            cash_flow,
            discount_factor,
            present_value,
            cumulative_pv,
        });
    };

    let last_cash_flow = match growth {
        GrowthSpec::Single { growth_rate, years } => {
            let g = percent_to_decimal(*growth_rate);
            let mut cash_flow = initial_cash_flow;
            for year in 1..=*years {
                cash_flow = initial_cash_flow * (1.0 + g).powi(year as i32);
                push(year, None, cash_flow);
            }
            cash_flow
        }
        GrowthSpec::MultiStage { stages } => {
            let mut cash_flow = initial_cash_flow;
            let mut year = 0u32;
            for stage in stages {
                // validate() guarantees the rate is present
                let g = percent_to_decimal(stage.growth_rate.unwrap_or_default());
                for _ in 0..stage.years {
                    year += 1;
                    cash_flow *= 1.0 + g;
                    push(year, Some(stage.name.clone()), cash_flow);
                }
            }
            cash_flow
        }
    };

    Ok(Projection {
        records,
        last_cash_flow,
    })
}
