//! Enterprise value aggregation.

use serde::{Deserialize, Serialize};

use super::YearRecord;

/// Aggregate values of a DCF valuation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aggregate {
    /// Sum of forecast-period present values.
    pub operating_value: f64,
    /// Operating value plus terminal present value.
    pub company_value: f64,
    /// Company value per share.
    pub stock_price: Option<f64>,
}

/// Sums the forecast present values and adds the terminal present value.
///
/// The stock price is only computed for a positive share count.
pub fn aggregate(records: &[YearRecord], terminal_pv: f64, share_count: Option<f64>) -> Aggregate {
    let operating_value: f64 = records.iter().map(|r| r.present_value).sum();
    let company_value = operating_value + terminal_pv;
    let stock_price = share_count
        .filter(|shares| *shares > 0.0)
        .map(|shares| company_value / shares);

    Aggregate {
        operating_value,
        company_value,
        stock_price,
    }
}
