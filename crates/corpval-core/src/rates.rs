//! Rate conventions and input guards.
//!
//! DCF rates are entered as percentages (`10.0` for 10 %), while market
//! parameters and every computed rate are plain decimals (`0.10`).

use crate::error::{ValuationError, ValuationResult};

/// Converts a percentage (`12.0`) into a decimal rate (`0.12`).
#[inline]
pub fn percent_to_decimal(percent: f64) -> f64 {
    percent / 100.0
}

/// Converts a decimal rate (`0.12`) into a percentage (`12.0`).
#[inline]
pub fn decimal_to_percent(rate: f64) -> f64 {
    rate * 100.0
}

/// Rejects NaN and infinite inputs.
pub fn ensure_finite(field: &str, value: f64) -> ValuationResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ValuationError::domain(field, "must be a finite number"))
    }
}

/// Rejects non-finite and negative inputs.
pub fn ensure_non_negative(field: &str, value: f64) -> ValuationResult<f64> {
    let value = ensure_finite(field, value)?;
    if value < 0.0 {
        return Err(ValuationError::domain(field, "cannot be negative"));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_percent_round_trip() {
        assert_relative_eq!(percent_to_decimal(12.0), 0.12);
        assert_relative_eq!(decimal_to_percent(0.026), 2.6, epsilon = 1e-12);
    }

    #[test]
    fn test_guards() {
        assert!(ensure_finite("beta", f64::NAN).is_err());
        assert!(ensure_finite("beta", f64::INFINITY).is_err());
        assert_eq!(ensure_finite("beta", -0.5).unwrap(), -0.5);

        let err = ensure_non_negative("debt", -1.0).unwrap_err();
        assert_eq!(err.field(), "debt");
        assert_eq!(ensure_non_negative("debt", 0.0).unwrap(), 0.0);
    }
}
