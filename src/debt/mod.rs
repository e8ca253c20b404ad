//! Multi-loan debt payoff planning

mod loan;
mod strategy;
mod engine;
mod result;
pub mod loader;

pub use loan::{Loan, YearMonth};
pub use strategy::{LoanComparator, RepaymentStrategy};
pub use engine::{simulate, DebtEngine};
pub use result::{BalanceSample, DebtPlanResult, DebtSummary, LoanPayoff, YearlyDebtRow};
