//! # corpval Core
//!
//! Foundational building blocks shared by the corpval valuation crates:
//!
//! - **Errors**: the domain validation error raised by every calculation
//! - **Rates**: percent/decimal conventions and input guards
//! - **Formatting**: currency, percentage and factor display strings
//!
//! ## Example
//!
//! ```rust
//! use corpval_core::format::{format_currency, format_percent};
//!
//! assert_eq!(format_currency(1100.0), "1,100.00");
//! assert_eq!(format_percent(0.0886), "8.8600%");
//! assert_eq!(format_currency(f64::NAN), "-");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]

pub mod error;
pub mod format;
pub mod rates;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{ValuationError, ValuationResult};
    pub use crate::format::{format_currency, format_factor, format_percent, PLACEHOLDER};
    pub use crate::rates::{
        decimal_to_percent, ensure_finite, ensure_non_negative, percent_to_decimal,
    };
}

// Re-export commonly used types at crate root
pub use error::{ValuationError, ValuationResult};
