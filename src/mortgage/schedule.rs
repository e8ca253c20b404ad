use std::fmt;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::input::finite_or_zero;

/// Monthly payment of a fixed-rate loan, by phase
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MonthlyPayment {
    /// Amortizing from the first month
    Annuity { annuity: f64 },

    /// Interest only for a period, then amortizing
    InterestOnlyThenAnnuity { interest_only: f64, annuity: f64 },

    /// Interest only for the whole term; the balance never falls
    InterestOnly { interest_only: f64 },
}

impl MonthlyPayment {
    /// Payment once any interest-only period is over
    pub fn amortizing_payment(&self) -> f64 {
        match *self {
            MonthlyPayment::Annuity { annuity } => annuity,
            MonthlyPayment::InterestOnlyThenAnnuity { annuity, .. } => annuity,
            MonthlyPayment::InterestOnly { interest_only } => interest_only,
        }
    }

    /// Payment in the first month
    pub fn first_payment(&self) -> f64 {
        match *self {
            MonthlyPayment::Annuity { annuity } => annuity,
            MonthlyPayment::InterestOnlyThenAnnuity { interest_only, .. } => interest_only,
            MonthlyPayment::InterestOnly { interest_only } => interest_only,
        }
    }

    pub fn is_interest_only(&self) -> bool {
        matches!(self, MonthlyPayment::InterestOnly { .. })
    }
}

impl fmt::Display for MonthlyPayment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            MonthlyPayment::Annuity { annuity } => write!(f, "{annuity:.0}"),
            MonthlyPayment::InterestOnlyThenAnnuity { interest_only, annuity } => {
                write!(f, "{interest_only:.0} (interest only) / {annuity:.0} after")
            }
            MonthlyPayment::InterestOnly { interest_only } => {
                write!(f, "{interest_only:.0} (interest only)")
            }
        }
    }
}

/// Summary of a walked loan schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanSchedule {
    pub loan_amount: f64,
    pub payment: MonthlyPayment,
    pub total_interest: f64,

    /// Balance after month 60, or 0 when the term is shorter
    pub balance_after_5y: f64,

    /// Balance after month 120, or 0 when the term is shorter
    pub balance_after_10y: f64,
}

/// Simple monthly rate, `pct / 100 / 12`
pub fn monthly_rate(annual_rate_pct: f64) -> f64 {
    finite_or_zero(annual_rate_pct) / 100.0 / 12.0
}

/// Level payment that retires `principal` over `months` at monthly rate `r`
fn annuity_payment(principal: f64, r: f64, months: u32) -> f64 {
    if r == 0.0 {
        principal / months as f64
    } else {
        principal * r / (1.0 - (1.0 + r).powi(-(months as i32)))
    }
}

/// Amortize a fixed-rate loan with an optional interest-only start.
///
/// A zero term is treated as one month and the interest-only period is
/// clamped to the term. The balance is walked month by month for the 5 and
/// 10 year snapshots.
pub fn amortize(
    principal: f64,
    annual_rate_pct: f64,
    term_years: u32,
    interest_only_years: u32,
) -> LoanSchedule {
    let principal = finite_or_zero(principal);
    let r = monthly_rate(annual_rate_pct);
    let months = term_years.saturating_mul(12).max(1);
    let io_months = interest_only_years.saturating_mul(12).min(months);
    let amortizing_months = months - io_months;

    let interest_only = principal * r;
    let payment = match (io_months, amortizing_months) {
        (_, 0) => MonthlyPayment::InterestOnly { interest_only },
        (0, n) => MonthlyPayment::Annuity {
            annuity: annuity_payment(principal, r, n),
        },
        (_, n) => MonthlyPayment::InterestOnlyThenAnnuity {
            interest_only,
            annuity: annuity_payment(principal, r, n),
        },
    };

    let mut balance = principal;
    let mut total_interest = 0.0;
    let mut balance_after_5y = 0.0;
    let mut balance_after_10y = 0.0;

    for month in 1..=months {
        let interest = balance * r;
        total_interest += interest;

        if month > io_months {
            let principal_paid = payment.amortizing_payment() - interest;
            balance = (balance - principal_paid).max(0.0);
        }

        match month {
            60 => balance_after_5y = balance,
            120 => balance_after_10y = balance,
            _ => {}
        }
    }

    debug!(
        "amortized {principal:.2} over {months} months ({io_months} interest only): total interest {total_interest:.2}"
    );

    LoanSchedule {
        loan_amount: principal,
        payment,
        total_interest,
        balance_after_5y,
        balance_after_10y,
    }
}
