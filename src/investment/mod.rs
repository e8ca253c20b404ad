//! Investment projections: deterministic compounding, IRR and Monte Carlo bands
//!
//! Annual rates become monthly rates geometrically, `(1 + a)^(1/12) - 1`.
//! The mortgage module uses simple division instead; the two are kept apart.

mod fees;
pub mod irr;
mod monte_carlo;
mod projection;

pub use fees::FeePreset;
pub use monte_carlo::{MonteCarloBand, MonteCarloEngine, MonteCarloInputs, MonteCarloRow};
pub use projection::{
    net_of_fee_rate, project, InvestmentEngine, ProjectionInputs, ProjectionResult, RateEstimate,
    YearRow,
};

/// Monthly rate equivalent to a decimal annual rate under monthly compounding
pub fn monthly_from_annual(annual: f64) -> f64 {
    (1.0 + annual).powf(1.0 / 12.0) - 1.0
}
