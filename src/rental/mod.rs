//! Monthly cashflow of a rented-out property

mod cashflow;

use serde::{Deserialize, Serialize};

use crate::mortgage::LoanSchedule;

pub use cashflow::{calculate_rental, RentalResult};

/// Rental form inputs. Monthly amounts unless noted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RentalInputs {
    pub rent: f64,

    /// Expected vacancy in percent of the year
    pub vacancy_pct: f64,
    pub utilities: f64,
    pub maintenance: f64,

    /// Yearly
    pub property_tax: f64,

    /// Yearly
    pub insurance: f64,
    pub loan_payment: f64,
}

impl RentalInputs {
    /// Same inputs with the loan payment taken from a mortgage schedule
    pub fn financed_by(self, schedule: &LoanSchedule) -> Self {
        Self {
            loan_payment: schedule.payment.amortizing_payment(),
            ..self
        }
    }
}
