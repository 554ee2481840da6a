//! # corpval Analytics
//!
//! Pure valuation engines over plain input structs:
//! - **DCF**: single-rate or multi-stage free cash flow projection, Gordon
//!   growth terminal value, enterprise value and value per share
//! - **WACC**: CAPM cost of equity, after-tax cost of debt, capital weights
//! - **ROIC**: NOPAT over invested capital, compared against a prior WACC
//! - **Session**: remembers the last successful WACC so ROIC can be compared
//!
//! Every calculation validates first and returns
//! [`ValuationError::DomainValidation`] for the first violated rule.
//!
//! ## Usage
//!
//! ```rust
//! use corpval_analytics::prelude::*;
//!
//! let inputs = DcfInputs {
//!     initial_cash_flow: 1000.0,
//!     growth: GrowthSpec::Single { growth_rate: 10.0, years: 5 },
//!     discount_rate: 12.0,
//!     terminal_growth_rate: 3.0,
//!     share_count: None,
//! };
//! let result = calculate_dcf(&inputs)?;
//! assert!(result.company_value > result.operating_value);
//! # Ok::<(), ValuationError>(())
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub use corpval_core::{ValuationError, ValuationResult};

pub mod dcf;
pub mod roic;
pub mod session;
pub mod wacc;

/// Prelude module for convenient imports.
///
/// ```rust
/// use corpval_analytics::prelude::*;
/// ```
pub mod prelude {
    pub use corpval_core::{ValuationError, ValuationResult};

    // DCF
    pub use crate::dcf::{
        aggregate, calculate_dcf, project_cash_flows, terminal_value, Aggregate, ChartPoint,
        DcfInputs, DcfResult, GrowthSpec, GrowthStage, Projection, TerminalRecord, YearRecord,
    };

    // WACC
    pub use crate::wacc::{calculate_wacc, TaxRateSource, WaccInputs, WaccResult};

    // ROIC
    pub use crate::roic::{calculate_roic, RoicInputs, RoicResult, ValueVerdict, WaccComparison};

    // Session
    pub use crate::session::ValuationSession;
}
