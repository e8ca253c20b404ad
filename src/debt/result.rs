//! Output structures for a debt payoff plan

use serde::{Deserialize, Serialize};

use super::loan::{Loan, YearMonth};
use super::strategy::RepaymentStrategy;

/// Total outstanding balance at the start of one simulated month
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BalanceSample {
    pub month: YearMonth,
    pub balance: f64,
}

/// Row emitted for each simulated December
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YearlyDebtRow {
    pub year: i32,

    /// Total balance before December's payments
    pub balance: f64,

    /// December's interest only, not the calendar year's sum
    pub interest: f64,
}

/// Month in which a loan's balance was cleared
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanPayoff {
    pub name: String,
    pub month: YearMonth,
}

/// Headline figures for a plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebtSummary {
    /// Fixed monthly budget: sum of every loan's minimum plus extra
    pub monthly_payment: f64,

    /// Interest over the whole plan, rounded to 2 decimals
    pub total_interest: f64,

    /// Month the simulation stopped in; None when there were no loans
    pub debt_free_date: Option<YearMonth>,

    pub months: u32,
    pub years: u32,
    pub remaining_months: u32,

    /// The month cap stopped the simulation before every loan was paid off
    pub hit_month_cap: bool,
}

/// Complete payoff plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebtPlanResult {
    /// Loans as supplied by the caller, unmodified
    pub loans: Vec<Loan>,
    pub strategy: RepaymentStrategy,

    /// First simulated month (earliest start date)
    pub start: Option<YearMonth>,

    pub summary: DebtSummary,
    pub graph: Vec<BalanceSample>,
    pub table: Vec<YearlyDebtRow>,

    /// Loans in the order they were paid off
    pub payoffs: Vec<LoanPayoff>,
}

impl DebtPlanResult {
    /// Plan for an empty loan list
    pub fn empty(strategy: RepaymentStrategy) -> Self {
        Self {
            loans: Vec::new(),
            strategy,
            start: None,
            summary: DebtSummary {
                monthly_payment: 0.0,
                total_interest: 0.0,
                debt_free_date: None,
                months: 0,
                years: 0,
                remaining_months: 0,
                hit_month_cap: false,
            },
            graph: Vec::new(),
            table: Vec::new(),
            payoffs: Vec::new(),
        }
    }

    /// Whether every loan was paid off within the month cap
    pub fn is_debt_free(&self) -> bool {
        !self.summary.hit_month_cap
    }

    /// Balance at the start of the first simulated month
    pub fn starting_balance(&self) -> f64 {
        self.graph.first().map(|s| s.balance).unwrap_or(0.0)
    }
}
