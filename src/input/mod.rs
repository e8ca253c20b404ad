//! Raw form input: locale-tolerant number parsing and pre-engine validation

mod parse;
mod validation;

pub use parse::{clamp_path_count, finite_or_zero, parse_locale_number, parse_percent};
pub use validation::{validate_loans, validate_mortgage, validate_rental, LoanDraft};
