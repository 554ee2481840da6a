//! Calculation session.
//!
//! The only state shared between calculations is the last successful WACC,
//! which ROIC uses for its value-creation comparison. A failed WACC
//! calculation clears it, so a comparison never refers to stale inputs.

use corpval_core::ValuationResult;

use crate::dcf::{calculate_dcf, DcfInputs, DcfResult};
use crate::roic::{calculate_roic, RoicInputs, RoicResult};
use crate::wacc::{calculate_wacc, WaccInputs, WaccResult};

/// Holds the state one user session carries between calculations.
#[derive(Debug, Clone, Default)]
pub struct ValuationSession {
    last_wacc: Option<WaccResult>,
}

impl ValuationSession {
    /// Creates an empty session.
    pub fn new() -> Self {
        Self::default()
    }

    /// The last successful WACC result, if any.
    pub fn last_wacc(&self) -> Option<&WaccResult> {
        self.last_wacc.as_ref()
    }

    /// Runs a DCF valuation. Does not touch session state.
    pub fn calculate_dcf(&self, inputs: &DcfInputs) -> ValuationResult<DcfResult> {
        calculate_dcf(inputs)
    }

    /// Runs a WACC calculation and remembers the result on success.
    ///
    /// On failure the previously stored WACC is discarded.
    pub fn calculate_wacc(&mut self, inputs: &WaccInputs) -> ValuationResult<WaccResult> {
        match calculate_wacc(inputs) {
            Ok(result) => {
                self.last_wacc = Some(result);
                Ok(result)
            }
            Err(err) => {
                self.last_wacc = None;
                Err(err)
            }
        }
    }

    /// Runs a ROIC calculation, compared against the stored WACC if present.
    pub fn calculate_roic(&self, inputs: &RoicInputs) -> ValuationResult<RoicResult> {
        calculate_roic(inputs, self.last_wacc.map(|w| w.wacc))
    }

    /// Forgets the stored WACC.
    pub fn reset(&mut self) {
        self.last_wacc = None;
    }
}
