//! Error types for the calculators and their loaders

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CalcError {
    /// A calculator precondition was violated. Raised before any arithmetic runs.
    #[error("Invalid input for {field} ({value}): {reason}")]
    InvalidInput {
        field: &'static str,
        value: f64,
        reason: String,
    },

    #[error("Invalid scenario at line {line}: {message}")]
    InvalidScenario { line: u64, message: String },

    #[error("CSV processing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CalcError {
    pub(crate) fn invalid(field: &'static str, value: f64, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field,
            value,
            reason: reason.into(),
        }
    }

    pub fn is_invalid_input(&self) -> bool {
        matches!(self, CalcError::InvalidInput { .. })
    }
}

pub type Result<T> = std::result::Result<T, CalcError>;

/// Reject NaN and infinities
pub(crate) fn require_finite(field: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CalcError::invalid(field, value, "must be a finite number"))
    }
}

pub(crate) fn require_positive(field: &'static str, value: f64) -> Result<f64> {
    require_finite(field, value)?;
    if value > 0.0 {
        Ok(value)
    } else {
        Err(CalcError::invalid(field, value, "must be greater than zero"))
    }
}

pub(crate) fn require_non_negative(field: &'static str, value: f64) -> Result<f64> {
    require_finite(field, value)?;
    if value >= 0.0 {
        Ok(value)
    } else {
        Err(CalcError::invalid(field, value, "must not be negative"))
    }
}

pub(crate) fn require_term(term_months: u32) -> Result<u32> {
    if term_months == 0 {
        return Err(CalcError::invalid(
            "term_months",
            0.0,
            "must be at least one month",
        ));
    }
    Ok(term_months)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_non_finite() {
        assert!(require_finite("principal", f64::NAN).is_err());
        assert!(require_positive("principal", f64::INFINITY).is_err());
        assert!(require_non_negative("annual_rate_percent", f64::NEG_INFINITY).is_err());
    }

    #[test]
    fn test_sign_checks() {
        assert!(require_positive("principal", 0.0).is_err());
        assert!(require_positive("principal", 1.0).is_ok());
        assert!(require_non_negative("initial_deposit", 0.0).is_ok());
        assert!(require_non_negative("initial_deposit", -0.01).is_err());
        assert!(require_term(0).is_err());
        assert_eq!(require_term(12).unwrap(), 12);
    }

    #[test]
    fn test_error_message_names_field() {
        let err = require_positive("principal", -100.0).unwrap_err();
        assert!(err.is_invalid_input());
        assert!(err.to_string().contains("principal"));
    }
}
