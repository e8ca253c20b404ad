//! Error types shared by the engines, the input layer and the loaders

use std::fmt;

use thiserror::Error;

/// Contract violations raised by an engine call.
///
/// Expected edge cases (no loans, no IRR, month cap reached) are encoded in
/// result fields instead and never surface here.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("monte carlo path count must be at least 1, got {0}")]
    InvalidPathCount(u32),

    #[error("annual volatility must be a finite, non-negative percentage, got {0}")]
    InvalidVolatility(f64),
}

pub type Result<T> = std::result::Result<T, EngineError>;

/// Malformed raw input that cannot be turned into a typed value
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("invalid month '{value}': expected YYYY-MM")]
    InvalidMonth { value: String },

    #[error("unknown repayment strategy '{value}': expected snowball or avalanche")]
    UnknownStrategy { value: String },

    #[error("unknown fee preset '{value}'")]
    UnknownFeePreset { value: String },
}

/// A single violated validation rule
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("add at least one loan to continue")]
    NoLoans,

    #[error("remaining principal must be greater than 0 for {loan}")]
    NonPositivePrincipal { loan: String },

    #[error("interest rate must be >= 0 for {loan}")]
    NegativeRate { loan: String },

    #[error("minimum payment must be greater than 0 for {loan}")]
    NonPositiveMinPayment { loan: String },

    #[error("start month is required for {loan}")]
    MissingStartDate { loan: String },

    #[error("payment does not cover the interest on {loan}; the debt would grow")]
    PaymentBelowInterest { loan: String },

    #[error("home price must be greater than 0")]
    NonPositivePrice,

    #[error("down payment cannot be negative")]
    NegativeDownPayment,

    #[error("down payment must be less than the home price")]
    DownPaymentTooLarge,

    #[error("loan term must be greater than 0 years")]
    NonPositiveTerm,

    #[error("annual rate must be greater than 0%")]
    NonPositiveRate,

    #[error("interest-only period cannot exceed the loan term")]
    InterestOnlyExceedsTerm,

    #[error("one or more values are not numbers")]
    NotANumber,

    #[error("rent must be greater than 0")]
    NonPositiveRent,

    #[error("vacancy cannot be negative")]
    NegativeVacancy,

    #[error("amounts cannot be negative")]
    NegativeAmount,
}

/// Every rule a form violated, in the order the rules were checked
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationErrors(pub Vec<ValidationError>);

impl ValidationErrors {
    pub fn errors(&self) -> &[ValidationError] {
        &self.0
    }

    pub fn contains(&self, error: &ValidationError) -> bool {
        self.0.contains(error)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl From<ValidationError> for ValidationErrors {
    fn from(error: ValidationError) -> Self {
        Self(vec![error])
    }
}

/// Failure while loading engine inputs from disk
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Input(#[from] InputError),

    #[error("invalid loans:\n{0}")]
    Validation(#[from] ValidationErrors),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_errors_join_with_newlines() {
        let errors = ValidationErrors(vec![
            ValidationError::NoLoans,
            ValidationError::NegativeRate { loan: "Car".to_string() },
        ]);

        assert_eq!(
            errors.to_string(),
            "add at least one loan to continue\ninterest rate must be >= 0 for Car"
        );
        assert!(errors.contains(&ValidationError::NoLoans));
    }
}
