//! Scenario runner for side-by-side plans
//!
//! Holds one `EngineConfig` and builds engines from it, so many plans can be
//! run against the same limits without threading the config through every call.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::debt::{DebtEngine, DebtPlanResult, Loan, RepaymentStrategy};
use crate::error::Result;
use crate::investment::{
    InvestmentEngine, MonteCarloBand, MonteCarloEngine, MonteCarloInputs, ProjectionInputs,
    ProjectionResult,
};

/// Both repayment strategies run over the same loans
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyComparison {
    pub snowball: DebtPlanResult,
    pub avalanche: DebtPlanResult,

    /// Strategy with the lower total interest; avalanche on a tie
    pub cheaper: RepaymentStrategy,
    pub interest_saved: f64,

    /// Months the cheaper plan finishes ahead of the other (negative if later)
    pub months_saved: i64,
}

impl StrategyComparison {
    pub fn plan(&self, strategy: RepaymentStrategy) -> &DebtPlanResult {
        match strategy {
            RepaymentStrategy::Snowball => &self.snowball,
            RepaymentStrategy::Avalanche => &self.avalanche,
        }
    }
}

/// Pre-configured runner for batch and comparison runs
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::from_env();
/// let comparison = runner.compare_strategies(&loans);
/// println!("{} saves {:.2}", comparison.cheaper, comparison.interest_saved);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScenarioRunner {
    config: EngineConfig,
}

impl ScenarioRunner {
    /// Create runner with the default limits
    pub fn new() -> Self {
        Self::default()
    }

    /// Create runner with limits taken from the environment
    pub fn from_env() -> Self {
        Self::with_config(EngineConfig::from_env())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn debt_engine(&self) -> DebtEngine {
        DebtEngine::new(self.config.debt)
    }

    pub fn investment_engine(&self) -> InvestmentEngine {
        InvestmentEngine::new(self.config.irr)
    }

    pub fn monte_carlo_engine(&self) -> MonteCarloEngine {
        MonteCarloEngine::new(self.config.monte_carlo)
    }

    pub fn run_debt(&self, loans: &[Loan], strategy: RepaymentStrategy) -> DebtPlanResult {
        self.debt_engine().simulate(loans, strategy)
    }

    /// Run snowball and avalanche over the same loans
    pub fn compare_strategies(&self, loans: &[Loan]) -> StrategyComparison {
        let engine = self.debt_engine();
        let snowball = engine.simulate(loans, RepaymentStrategy::Snowball);
        let avalanche = engine.simulate(loans, RepaymentStrategy::Avalanche);

        let snowball_interest = snowball.summary.total_interest;
        let avalanche_interest = avalanche.summary.total_interest;
        let (cheaper, winner, loser) = if snowball_interest < avalanche_interest {
            (RepaymentStrategy::Snowball, &snowball, &avalanche)
        } else {
            (RepaymentStrategy::Avalanche, &avalanche, &snowball)
        };

        let interest_saved = loser.summary.total_interest - winner.summary.total_interest;
        let months_saved = i64::from(loser.summary.months) - i64::from(winner.summary.months);

        StrategyComparison {
            cheaper,
            interest_saved,
            months_saved,
            snowball,
            avalanche,
        }
    }

    /// Run many projections in parallel; results keep the input order
    pub fn run_projections(&self, inputs: &[ProjectionInputs]) -> Vec<ProjectionResult> {
        let engine = self.investment_engine();
        inputs.par_iter().map(|i| engine.project(i)).collect()
    }

    /// Seeded parallel Monte Carlo with the configured path limits
    pub fn run_monte_carlo(&self, inputs: &MonteCarloInputs, seed: u64) -> Result<MonteCarloBand> {
        self.monte_carlo_engine().simulate_parallel(inputs, seed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DebtLimits;
    use crate::debt::YearMonth;

    fn loans() -> Vec<Loan> {
        let start = YearMonth::new(2024, 1).unwrap();
        vec![
            Loan::new("Car", 500.0, 0.10, 50.0, 0.0, start),
            Loan::new("Card", 1_000.0, 0.20, 50.0, 0.0, start),
            Loan::new("Phone", 100.0, 0.0, 100.0, 0.0, start),
        ]
    }

    #[test]
    fn test_avalanche_is_cheaper_when_rates_diverge() {
        let comparison = ScenarioRunner::new().compare_strategies(&loans());
        assert_eq!(comparison.cheaper, RepaymentStrategy::Avalanche);
        assert!(comparison.interest_saved > 0.0);
        assert_eq!(
            comparison.plan(RepaymentStrategy::Snowball).strategy,
            RepaymentStrategy::Snowball
        );
    }

    #[test]
    fn test_tie_favors_avalanche() {
        let start = YearMonth::new(2024, 1).unwrap();
        let single = [Loan::new("Only", 1_000.0, 0.05, 100.0, 0.0, start)];
        let comparison = ScenarioRunner::new().compare_strategies(&single);
        assert_eq!(comparison.cheaper, RepaymentStrategy::Avalanche);
        assert_eq!(comparison.interest_saved, 0.0);
        assert_eq!(comparison.months_saved, 0);
    }

    #[test]
    fn test_runner_applies_config() {
        let config = EngineConfig {
            debt: DebtLimits {
                max_months: 3,
                ..DebtLimits::default()
            },
            ..EngineConfig::default()
        };
        let runner = ScenarioRunner::with_config(config);
        let plan = runner.run_debt(&loans(), RepaymentStrategy::Snowball);
        assert_eq!(plan.summary.months, 3);
        assert!(plan.summary.hit_month_cap);
    }

    #[test]
    fn test_run_projections_keeps_order() {
        let inputs: Vec<ProjectionInputs> = (1..=8)
            .map(|years| ProjectionInputs {
                initial: 1_000.0,
                monthly_contribution: 100.0,
                years,
                annual_return_pct: 6.0,
                annual_fee_pct: 0.5,
            })
            .collect();

        let results = ScenarioRunner::new().run_projections(&inputs);
        assert_eq!(results.len(), 8);
        for (i, result) in results.iter().enumerate() {
            assert_eq!(result.rows.len(), i + 1);
        }
    }
}
