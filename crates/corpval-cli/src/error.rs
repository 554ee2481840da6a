//! CLI error types.

use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// A `--stage` value that is not `NAME:YEARS:RATE`.
    #[error("Invalid stage '{0}'. Use NAME:YEARS:RATE, e.g. expansion:3:15")]
    InvalidStage(String),

    /// The scenario lacks a section the command needs.
    #[error("Scenario has no [{0}] section")]
    MissingSection(&'static str),

    /// One or more sections of an evaluation failed.
    #[error("{0} of the scenario sections failed")]
    SectionsFailed(usize),
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
