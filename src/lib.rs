//! Household Finance - Deterministic projection engines for personal finance calculators
//!
//! This library provides:
//! - Multi-loan debt payoff plans under snowball or avalanche ordering
//! - Investment growth with fee drag, IRR and Monte Carlo percentile bands
//! - Fixed-rate mortgage schedules with interest-only periods
//! - Rental cashflow and a simplified capital tax estimate
//! - Input parsing and validation that runs before any engine
//!
//! Engines are pure functions of their inputs. Expected edge cases (no loans,
//! no IRR, month cap reached) come back as ordinary result fields.

pub mod config;
pub mod error;
pub mod input;
pub mod debt;
pub mod investment;
pub mod mortgage;
pub mod rental;
pub mod tax;
pub mod scenario;

// Re-export commonly used types
pub use config::EngineConfig;
pub use error::{EngineError, InputError, LoadError, ValidationError, ValidationErrors};
pub use debt::{DebtEngine, DebtPlanResult, Loan, RepaymentStrategy, YearMonth};
pub use investment::{InvestmentEngine, MonteCarloBand, MonteCarloEngine, ProjectionResult};
pub use mortgage::{calculate_mortgage, LoanSchedule, MortgageInputs};
pub use rental::{calculate_rental, RentalInputs, RentalResult};
pub use scenario::ScenarioRunner;
