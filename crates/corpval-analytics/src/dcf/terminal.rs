//! Gordon growth terminal value.

use corpval_core::{ValuationError, ValuationResult};

use super::MAX_FORECAST_YEARS;

/// Rejects rate pairs for which the perpetuity has no finite positive value.
pub(crate) fn check_rates(terminal_growth_rate: f64, discount_rate: f64) -> ValuationResult<()> {
    if discount_rate <= terminal_growth_rate {
        return Err(ValuationError::domain(
            "terminal growth rate",
            "discount rate must exceed terminal growth rate",
        ));
    }
    Ok(())
}

/// Calculates the terminal value and its present value.
///
/// ```text
/// TV    = CF(N) × (1 + g) / (r − g)
/// TV_PV = TV / (1 + r)^N
/// ```
///
/// Rates are decimals. Returns `(nominal, present_value)`.
///
/// # Errors
///
/// `discount_rate <= terminal_growth_rate` and horizons beyond
/// [`MAX_FORECAST_YEARS`] are domain errors.
pub fn terminal_value(
    last_cash_flow: f64,
    terminal_growth_rate: f64,
    discount_rate: f64,
    years: u32,
) -> ValuationResult<(f64, f64)> {
    check_rates(terminal_growth_rate, discount_rate)?;
    if years > MAX_FORECAST_YEARS {
        return Err(ValuationError::domain(
            "forecast years",
            format!("forecast horizon exceeds the {MAX_FORECAST_YEARS}-year limit"),
        ));
    }

    let nominal =
        last_cash_flow * (1.0 + terminal_growth_rate) / (discount_rate - terminal_growth_rate);
    let present_value = nominal / (1.0 + discount_rate).powi(years as i32);

    Ok((nominal, present_value))
}
