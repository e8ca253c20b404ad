//! Engine limits and constants
//!
//! Every engine reads its bounds from here rather than hardcoding them, so a
//! host can load them from a JSON file or override single values through
//! environment variables.

use std::env;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::LoadError;

/// All tunable engine settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub debt: DebtLimits,
    pub irr: IrrSettings,
    pub monte_carlo: MonteCarloLimits,
    pub tax: TaxRates,
}

/// Bounds for the multi-loan payoff simulation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DebtLimits {
    /// Hard cap on simulated months (50 years)
    pub max_months: u32,

    /// A loan at or below this balance counts as paid off
    pub payoff_epsilon: f64,
}

impl Default for DebtLimits {
    fn default() -> Self {
        Self {
            max_months: 600,
            payoff_epsilon: 0.01,
        }
    }
}

/// Bisection settings for the monthly internal rate of return
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IrrSettings {
    /// Lower end of the monthly rate bracket
    pub bracket_low: f64,

    /// Upper end of the monthly rate bracket
    pub bracket_high: f64,

    pub max_iterations: u32,

    /// Stop once |NPV| falls below this
    pub tolerance: f64,

    /// A root at or below this monthly rate is rejected
    pub domain_low: f64,

    /// A root at or above this monthly rate is rejected
    pub domain_high: f64,
}

impl Default for IrrSettings {
    fn default() -> Self {
        Self {
            bracket_low: -0.999,
            bracket_high: 0.3,
            max_iterations: 100,
            tolerance: 1e-7,
            domain_low: -0.9,
            domain_high: 0.3,
        }
    }
}

/// Path count bounds for Monte Carlo bands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonteCarloLimits {
    pub min_paths: u32,
    pub max_paths: u32,
    pub default_paths: u32,
}

impl Default for MonteCarloLimits {
    fn default() -> Self {
        Self {
            min_paths: 50,
            max_paths: 3000,
            default_paths: 350,
        }
    }
}

/// Flat rates for the simplified capital tax estimate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaxRates {
    /// Share income rate up to the threshold
    pub stock_low_rate: f64,

    /// Share income rate above the threshold
    pub stock_high_rate: f64,

    /// Threshold used when none is supplied
    pub default_stock_threshold: f64,
}

impl Default for TaxRates {
    fn default() -> Self {
        Self {
            stock_low_rate: 0.27,
            stock_high_rate: 0.42,
            default_stock_threshold: 62_000.0,
        }
    }
}

impl EngineConfig {
    /// Defaults with overrides from the environment:
    ///   DEBT_MAX_MONTHS, DEBT_PAYOFF_EPSILON,
    ///   IRR_MAX_ITERATIONS, IRR_TOLERANCE,
    ///   MC_MIN_PATHS, MC_MAX_PATHS, MC_DEFAULT_PATHS
    pub fn from_env() -> Self {
        let mut config = Self::default();

        config.debt.max_months = env_or("DEBT_MAX_MONTHS", config.debt.max_months);
        config.debt.payoff_epsilon = env_or("DEBT_PAYOFF_EPSILON", config.debt.payoff_epsilon);

        config.irr.max_iterations = env_or("IRR_MAX_ITERATIONS", config.irr.max_iterations);
        config.irr.tolerance = env_or("IRR_TOLERANCE", config.irr.tolerance);

        config.monte_carlo.min_paths = env_or("MC_MIN_PATHS", config.monte_carlo.min_paths);
        config.monte_carlo.max_paths = env_or("MC_MAX_PATHS", config.monte_carlo.max_paths);
        config.monte_carlo.default_paths =
            env_or("MC_DEFAULT_PATHS", config.monte_carlo.default_paths);

        config
    }

    /// Load a (possibly partial) config from a JSON file; missing keys keep their defaults
    pub fn from_json_path(path: &Path) -> Result<Self, LoadError> {
        let file = std::fs::File::open(path)?;
        let config = serde_json::from_reader(std::io::BufReader::new(file))?;
        Ok(config)
    }
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_engine_constants() {
        let config = EngineConfig::default();
        assert_eq!(config.debt.max_months, 600);
        assert_eq!(config.debt.payoff_epsilon, 0.01);
        assert_eq!(config.irr.bracket_low, -0.999);
        assert_eq!(config.irr.bracket_high, 0.3);
        assert_eq!(config.irr.max_iterations, 100);
        assert_eq!(config.monte_carlo.min_paths, 50);
        assert_eq!(config.monte_carlo.max_paths, 3000);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: EngineConfig =
            serde_json::from_str(r#"{ "debt": { "max_months": 120 } }"#).unwrap();
        assert_eq!(config.debt.max_months, 120);
        assert_eq!(config.debt.payoff_epsilon, 0.01);
        assert_eq!(config.monte_carlo, MonteCarloLimits::default());
    }

    #[test]
    fn test_env_or_falls_back_on_garbage() {
        assert_eq!(env_or("HOUSEHOLD_FINANCE_UNSET_KEY_FOR_TEST", 42u32), 42);
    }
}
