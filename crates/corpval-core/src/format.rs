//! Display formatting for valuation results.
//!
//! Values are converted to `rust_decimal` and rounded half away from zero
//! before printing. Finite magnitudes beyond `Decimal::MAX` fall back to plain
//! `f64` formatting. Only NaN and infinities render as [`PLACEHOLDER`].

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Rendered in place of undefined or non-finite values.
pub const PLACEHOLDER: &str = "-";

/// Fraction digits used for currency amounts.
pub const CURRENCY_DECIMALS: u32 = 2;

/// Fraction digits used for percentages and factors.
pub const PERCENT_DECIMALS: u32 = 4;

fn normalize_zero(rounded: Decimal) -> Decimal {
    // Avoid "-0.00" for tiny negatives.
    if rounded.is_zero() {
        Decimal::ZERO
    } else {
        rounded
    }
}

/// Converts a finite `f64` into a `Decimal` rounded half away from zero.
///
/// Returns `None` for values `Decimal` cannot hold.
pub fn to_display_decimal(value: f64, decimals: u32) -> Option<Decimal> {
    if !value.is_finite() {
        return None;
    }
    let rounded = Decimal::from_f64(value)?
        .round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero);
    Some(normalize_zero(rounded))
}

/// A decimal rate as the percentage [`format_percent`] shows (`0.12` → `12.0000`).
///
/// Returns `None` for non-finite rates and rates `Decimal` cannot hold.
pub fn to_display_percent(rate: f64) -> Option<Decimal> {
    if !rate.is_finite() {
        return None;
    }
    let percent = Decimal::from_f64(rate)?.checked_mul(Decimal::ONE_HUNDRED)?;
    Some(normalize_zero(percent.round_dp_with_strategy(
        PERCENT_DECIMALS,
        RoundingStrategy::MidpointAwayFromZero,
    )))
}

/// Fixed-point text for a finite value, or `None` for NaN and infinities.
fn fixed(value: f64, decimals: u32) -> Option<String> {
    let prec = decimals as usize;
    match to_display_decimal(value, decimals) {
        Some(d) => Some(format!("{d:.prec$}")),
        None if value.is_finite() => Some(format!("{value:.prec$}")),
        None => None,
    }
}

/// Formats a currency amount with thousands grouping and two decimals.
///
/// ```rust
/// use corpval_core::format::format_currency;
///
/// assert_eq!(format_currency(982.142_857), "982.14");
/// assert_eq!(format_currency(-1_234_567.891), "-1,234,567.89");
/// ```
pub fn format_currency(value: f64) -> String {
    fixed(value, CURRENCY_DECIMALS)
        .map_or_else(|| PLACEHOLDER.to_string(), |plain| group_thousands(&plain))
}

/// Formats a decimal rate as a percentage with four decimals (`0.12` → `12.0000%`).
pub fn format_percent(rate: f64) -> String {
    let prec = PERCENT_DECIMALS as usize;
    match to_display_percent(rate) {
        Some(d) => format!("{d:.prec$}%"),
        None if rate.is_finite() => format!("{:.prec$}%", rate * 100.0),
        None => PLACEHOLDER.to_string(),
    }
}

/// Formats a discount factor or other unitless ratio with four decimals.
pub fn format_factor(value: f64) -> String {
    fixed(value, PERCENT_DECIMALS).unwrap_or_else(|| PLACEHOLDER.to_string())
}

/// Inserts `,` separators into the integer part of a plain decimal string.
fn group_thousands(plain: &str) -> String {
    let (sign, unsigned) = match plain.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", plain),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match frac_part {
        Some(f) => format!("{sign}{grouped}.{f}"),
        None => format!("{sign}{grouped}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_currency_two_decimals() {
        assert_eq!(format_currency(1100.0), "1,100.00");
        assert_eq!(format_currency(0.0), "0.00");
        assert_eq!(format_currency(999.999), "1,000.00");
        assert_eq!(format_currency(2.5), "2.50");
        assert_eq!(format_currency(-0.001), "0.00");
    }

    #[test]
    fn test_currency_placeholder() {
        assert_eq!(format_currency(f64::NAN), PLACEHOLDER);
        assert_eq!(format_currency(f64::INFINITY), PLACEHOLDER);
        assert_eq!(format_currency(f64::NEG_INFINITY), PLACEHOLDER);
    }

    #[test]
    fn test_currency_beyond_decimal_range() {
        // 2^100 is exact in f64 and above Decimal::MAX.
        let huge = 2f64.powi(100);
        assert_eq!(
            format_currency(huge),
            "1,267,650,600,228,229,401,496,703,205,376.00"
        );
        assert_eq!(
            format_currency(-huge),
            "-1,267,650,600,228,229,401,496,703,205,376.00"
        );
        assert_ne!(format_currency(1e29), PLACEHOLDER);
        assert_ne!(format_currency(1e300), PLACEHOLDER);
        assert_eq!(format_factor(huge), "1267650600228229401496703205376.0000");
        assert!(format_percent(1e300).ends_with('%'));
    }

    #[test]
    fn test_display_percent_matches_formatting() {
        assert_eq!(to_display_percent(0.092_000_001), Some(dec!(9.2000)));
        assert_eq!(to_display_percent(0.092), to_display_percent(0.092_000_001));
        assert_eq!(to_display_percent(-0.000_000_1), Some(Decimal::ZERO));
        assert_eq!(to_display_percent(f64::NAN), None);
    }

    #[test]
    fn test_percent_four_decimals() {
        assert_eq!(format_percent(0.12), "12.0000%");
        assert_eq!(format_percent(0.026 + 1.1 * 0.06), "9.2000%");
        assert_eq!(format_percent(0.253_301_236), "25.3301%");
        assert_eq!(format_percent(-0.05), "-5.0000%");
        assert_eq!(format_percent(f64::NAN), PLACEHOLDER);
        assert_eq!(format_percent(f64::INFINITY), PLACEHOLDER);
    }

    #[test]
    fn test_factor() {
        assert_eq!(format_factor(1.12), "1.1200");
        assert_eq!(format_factor(1.12_f64.powi(5)), "1.7623");
        assert_eq!(format_factor(f64::NAN), PLACEHOLDER);
    }

    #[test]
    fn test_display_decimal() {
        assert_eq!(to_display_decimal(982.142_857, 2), Some(dec!(982.14)));
        assert_eq!(to_display_decimal(2.5, 0), Some(dec!(3)));
        assert_eq!(to_display_decimal(f64::NAN, 2), None);
    }

    #[test]
    fn test_grouping() {
        assert_eq!(group_thousands("123.45"), "123.45");
        assert_eq!(group_thousands("1234.00"), "1,234.00");
        assert_eq!(group_thousands("-23310598.00"), "-23,310,598.00");
        assert_eq!(group_thousands("100000"), "100,000");
    }

    proptest! {
        #[test]
        fn currency_never_leaks_non_numeric_text(x in proptest::num::f64::ANY) {
            let s = format_currency(x);
            prop_assert!(!s.contains("NaN") && !s.contains("inf"));
            if s != PLACEHOLDER {
                let frac = s.rsplit('.').next().unwrap();
                prop_assert_eq!(frac.len(), 2);
            }
        }

        #[test]
        fn percent_always_has_four_decimals(x in -10.0f64..10.0) {
            let s = format_percent(x);
            prop_assert!(s.ends_with('%'));
            let frac = s.trim_end_matches('%').rsplit('.').next().unwrap();
            prop_assert_eq!(frac.len(), 4);
        }
    }
}
