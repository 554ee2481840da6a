//! Error types for the corpval library.
//!
//! Every calculation validates its inputs up front and reports the first
//! violated rule as a [`ValuationError::DomainValidation`]. Nothing past the
//! validation step returns an error.

use thiserror::Error;

/// A specialized Result type for valuation operations.
pub type ValuationResult<T> = Result<T, ValuationError>;

/// The error type for valuation calculations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValuationError {
    /// An input violates one of the calculation's domain rules.
    #[error("invalid {field}: {message}")]
    DomainValidation {
        /// Input (or group of inputs) that failed validation.
        field: String,
        /// Human readable description of the violated rule.
        message: String,
    },
}

impl ValuationError {
    /// Creates a domain validation error.
    #[must_use]
    pub fn domain(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::DomainValidation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Returns the offending input name.
    pub fn field(&self) -> &str {
        match self {
            Self::DomainValidation { field, .. } => field,
        }
    }

    /// Returns the rule description without the field prefix.
    pub fn message(&self) -> &str {
        match self {
            Self::DomainValidation { message, .. } => message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ValuationError::domain("capital structure", "market value and debt cannot both be zero");
        assert_eq!(
            err.to_string(),
            "invalid capital structure: market value and debt cannot both be zero"
        );
    }

    #[test]
    fn test_accessors() {
        let err = ValuationError::domain("stage 'growth'", "duration must be at least one year");
        assert_eq!(err.field(), "stage 'growth'");
        assert!(err.message().contains("at least one year"));
    }
}
