use serde::{Deserialize, Serialize};

use super::RentalInputs;

/// Cashflow figures for one property
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RentalResult {
    pub monthly_expenses: f64,
    pub monthly_cashflow: f64,
    pub yearly_cashflow: f64,

    /// Monthly cashflow scaled down by vacancy
    pub adjusted_cashflow: f64,

    /// Rent that exactly covers the monthly expenses
    pub breakeven_rent: f64,

    /// Yearly vacancy-adjusted cashflow over yearly running costs
    /// (property tax, insurance, maintenance); 0 when those are 0
    pub roi: f64,
}

pub fn calculate_rental(inputs: &RentalInputs) -> RentalResult {
    let monthly_expenses = inputs.utilities
        + inputs.maintenance
        + inputs.loan_payment
        + inputs.property_tax / 12.0
        + inputs.insurance / 12.0;

    let monthly_cashflow = inputs.rent - monthly_expenses;
    let adjusted_cashflow = monthly_cashflow * (1.0 - inputs.vacancy_pct / 100.0);

    let running_costs = inputs.property_tax + inputs.insurance + inputs.maintenance * 12.0;
    let roi = if running_costs > 0.0 {
        adjusted_cashflow * 12.0 / running_costs
    } else {
        0.0
    };

    RentalResult {
        monthly_expenses,
        monthly_cashflow,
        yearly_cashflow: monthly_cashflow * 12.0,
        adjusted_cashflow,
        breakeven_rent: monthly_expenses,
        roi,
    }
}
