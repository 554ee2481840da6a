//! corpval Configuration Layer
//!
//! Scenario files describe the inputs of a valuation run. A scenario may carry
//! any subset of the `[dcf]`, `[wacc]` and `[roic]` sections; missing fields
//! fall back to the defaults in [`sections`].
//!
//! # Example
//!
//! ```rust
//! use corpval_config::Scenario;
//!
//! let scenario = Scenario::from_toml_str(r#"
//!     [dcf]
//!     initial_cash_flow = 2500.0
//!     growth_rate = 6.0
//!     years = 7
//! "#).unwrap();
//!
//! let inputs = scenario.dcf.unwrap().to_inputs().unwrap();
//! assert_eq!(inputs.growth.forecast_years(), 7);
//! assert_eq!(inputs.discount_rate, 12.0);
//! ```

#![warn(missing_docs)]

pub mod error;
pub mod scenario;
pub mod sections;

pub use error::{ConfigError, ConfigResult, Validate, ValidationError};
pub use scenario::{Scenario, ScenarioFormat};
pub use sections::{DcfSection, RoicSection, WaccSection};
