//! Repayment ordering policies

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::loan::Loan;
use crate::error::InputError;

/// Orders the active loans each month; the first loan in order is paid first
/// from the shared monthly budget
pub type LoanComparator = fn(&Loan, &Loan) -> Ordering;

/// Which loan receives the budget first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepaymentStrategy {
    /// Smallest remaining principal first
    Snowball,
    /// Highest annual rate first
    Avalanche,
}

impl RepaymentStrategy {
    pub const ALL: [RepaymentStrategy; 2] = [RepaymentStrategy::Snowball, RepaymentStrategy::Avalanche];

    pub fn comparator(self) -> LoanComparator {
        match self {
            RepaymentStrategy::Snowball => smallest_principal_first,
            RepaymentStrategy::Avalanche => highest_rate_first,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RepaymentStrategy::Snowball => "snowball",
            RepaymentStrategy::Avalanche => "avalanche",
        }
    }
}

fn smallest_principal_first(a: &Loan, b: &Loan) -> Ordering {
    a.principal.total_cmp(&b.principal)
}

fn highest_rate_first(a: &Loan, b: &Loan) -> Ordering {
    b.annual_rate.total_cmp(&a.annual_rate)
}

impl fmt::Display for RepaymentStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RepaymentStrategy {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "snowball" => Ok(RepaymentStrategy::Snowball),
            "avalanche" => Ok(RepaymentStrategy::Avalanche),
            _ => Err(InputError::UnknownStrategy {
                value: s.to_string(),
            }),
        }
    }
}
