//! Fixed-rate mortgage schedules
//!
//! Uses the simple monthly rate `annual / 12`, unlike the geometric
//! conversion in `investment`.

mod schedule;

use serde::{Deserialize, Serialize};

pub use schedule::{amortize, monthly_rate, LoanSchedule, MonthlyPayment};

/// Mortgage form inputs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MortgageInputs {
    pub price: f64,
    pub down_payment: f64,
    pub term_years: u32,

    /// Annual rate in percent (4.0 = 4%)
    pub annual_rate_pct: f64,

    #[serde(default)]
    pub interest_only_years: u32,
}

impl MortgageInputs {
    pub fn loan_amount(&self) -> f64 {
        self.price - self.down_payment
    }
}

/// Amortize the loan left after the down payment
pub fn calculate_mortgage(inputs: &MortgageInputs) -> LoanSchedule {
    amortize(
        inputs.loan_amount(),
        inputs.annual_rate_pct,
        inputs.term_years,
        inputs.interest_only_years,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calculate_mortgage_finances_price_less_down_payment() {
        let inputs = MortgageInputs {
            price: 3_000_000.0,
            down_payment: 150_000.0,
            term_years: 30,
            annual_rate_pct: 4.0,
            interest_only_years: 0,
        };
        let schedule = calculate_mortgage(&inputs);
        assert_eq!(schedule.loan_amount, 2_850_000.0);
        assert_eq!(schedule, amortize(2_850_000.0, 4.0, 30, 0));
    }

    #[test]
    fn test_inputs_from_json_default_interest_only() {
        let inputs: MortgageInputs = serde_json::from_str(
            r#"{"price": 2000000, "down_payment": 100000, "term_years": 20, "annual_rate_pct": 3.5}"#,
        )
        .unwrap();
        assert_eq!(inputs.interest_only_years, 0);
    }
}
