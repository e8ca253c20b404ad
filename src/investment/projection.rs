//! Deterministic monthly contribution growth with fee drag

use log::debug;
use serde::{Deserialize, Serialize};

use super::irr::annual_irr;
use super::monthly_from_annual;
use crate::config::IrrSettings;
use crate::input::finite_or_zero;

/// Inputs for a single-account projection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionInputs {
    pub initial: f64,
    pub monthly_contribution: f64,
    pub years: u32,

    /// Expected annual return in percent (7.0 = 7%)
    pub annual_return_pct: f64,

    /// Annual fee in percent of balance
    pub annual_fee_pct: f64,
}

impl ProjectionInputs {
    /// Same inputs with NaN and infinities replaced by 0
    fn sanitized(&self) -> Self {
        Self {
            initial: finite_or_zero(self.initial),
            monthly_contribution: finite_or_zero(self.monthly_contribution),
            years: self.years,
            annual_return_pct: finite_or_zero(self.annual_return_pct),
            annual_fee_pct: finite_or_zero(self.annual_fee_pct),
        }
    }
}

/// Account state at the end of one projected year
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YearRow {
    pub year: u32,

    /// Initial deposit plus every contribution so far
    pub contribution: f64,

    /// Balance above contributions, floored at 0
    pub gain: f64,
    pub balance: f64,
}

/// Annual rate to display for a projection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "rate", rename_all = "snake_case")]
pub enum RateEstimate {
    /// IRR solved from the projected cashflows
    Solved(f64),
    /// No IRR found: `(1 + return) / (1 + fee) - 1`, an approximation only
    NetOfFees(f64),
}

impl RateEstimate {
    pub fn value(&self) -> f64 {
        match self {
            RateEstimate::Solved(rate) | RateEstimate::NetOfFees(rate) => *rate,
        }
    }

    pub fn is_solved(&self) -> bool {
        matches!(self, RateEstimate::Solved(_))
    }
}

/// Complete projection output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionResult {
    pub rows: Vec<YearRow>,
    pub final_balance: f64,
    pub total_contribution: f64,

    /// Final balance minus contributions; negative when fees outrun growth
    pub total_gain: f64,

    /// Solved IRR, annualized; None when bisection found no root
    pub effective_annual_rate: Option<f64>,

    /// Fallback approximation, kept apart from the solved rate
    pub net_of_fee_rate: f64,
}

impl ProjectionResult {
    pub fn rate_estimate(&self) -> RateEstimate {
        match self.effective_annual_rate {
            Some(rate) => RateEstimate::Solved(rate),
            None => RateEstimate::NetOfFees(self.net_of_fee_rate),
        }
    }
}

/// `(1 + return) / (1 + fee) - 1` for decimal annual rates
pub fn net_of_fee_rate(annual_return: f64, annual_fee: f64) -> f64 {
    (1.0 + annual_return) / (1.0 + annual_fee) - 1.0
}

/// Contribution projection engine
#[derive(Debug, Clone, Default)]
pub struct InvestmentEngine {
    irr: IrrSettings,
}

impl InvestmentEngine {
    pub fn new(irr: IrrSettings) -> Self {
        Self { irr }
    }

    /// Project the account month by month.
    ///
    /// Each month deposits the contribution, then applies growth, then the fee.
    /// Zero years yields no rows and no IRR.
    pub fn project(&self, inputs: &ProjectionInputs) -> ProjectionResult {
        let inputs = inputs.sanitized();
        let annual_return = inputs.annual_return_pct / 100.0;
        let annual_fee = inputs.annual_fee_pct / 100.0;
        let monthly_return = monthly_from_annual(annual_return);
        let monthly_fee = monthly_from_annual(annual_fee);
        let monthly = inputs.monthly_contribution;

        let mut balance = inputs.initial;
        let mut rows = Vec::with_capacity(inputs.years as usize);

        for year in 1..=inputs.years {
            for _ in 0..12 {
                balance = grow_one_month(balance, monthly, monthly_return, monthly_fee);
            }
            let contribution = inputs.initial + monthly * 12.0 * year as f64;
            rows.push(YearRow {
                year,
                contribution,
                gain: (balance - contribution).max(0.0),
                balance,
            });
        }

        let total_contribution = inputs.initial + monthly * 12.0 * inputs.years as f64;
        let effective_annual_rate = if inputs.years == 0 {
            None
        } else {
            annual_irr(&contribution_cashflows(&inputs, balance), &self.irr)
        };

        debug!(
            "projected {} years: final balance {:.2}, effective rate {:?}",
            inputs.years, balance, effective_annual_rate
        );

        ProjectionResult {
            rows,
            final_balance: balance,
            total_contribution,
            total_gain: balance - total_contribution,
            effective_annual_rate,
            net_of_fee_rate: net_of_fee_rate(annual_return, annual_fee),
        }
    }
}

/// Project with the default IRR settings
pub fn project(
    initial: f64,
    monthly_contribution: f64,
    years: u32,
    annual_return_pct: f64,
    annual_fee_pct: f64,
) -> ProjectionResult {
    InvestmentEngine::default().project(&ProjectionInputs {
        initial,
        monthly_contribution,
        years,
        annual_return_pct,
        annual_fee_pct,
    })
}

/// One month: deposit, then growth, then fee
pub(crate) fn grow_one_month(balance: f64, contribution: f64, monthly_return: f64, monthly_fee: f64) -> f64 {
    (balance + contribution) * (1.0 + monthly_return) * (1.0 - monthly_fee)
}

/// Investor cashflows: month 0 carries the initial deposit and the first
/// contribution, the final month receives the balance
fn contribution_cashflows(inputs: &ProjectionInputs, final_balance: f64) -> Vec<f64> {
    let months = inputs.years as usize * 12;
    let monthly = inputs.monthly_contribution;

    let mut flows = Vec::with_capacity(months + 1);
    flows.push(-(inputs.initial + monthly));
    flows.extend(std::iter::repeat(-monthly).take(months.saturating_sub(1)));
    flows.push(final_balance);
    flows
}
