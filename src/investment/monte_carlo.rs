//! Monte Carlo percentile bands for a contribution plan
//!
//! Every year horizon is estimated from its own batch of full-length paths;
//! shorter horizons are never reused. The random source is injected so a fixed
//! seed reproduces the band exactly.

use std::f64::consts::PI;

use log::debug;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::monthly_from_annual;
use super::projection::grow_one_month;
use crate::config::MonteCarloLimits;
use crate::error::{EngineError, Result};
use crate::input::{clamp_path_count, finite_or_zero};

/// Inputs for one Monte Carlo run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonteCarloInputs {
    pub years: u32,

    /// Mean annual return as a decimal
    pub annual_return: f64,

    /// Annual fee as a decimal
    pub annual_fee: f64,
    pub initial: f64,
    pub monthly: f64,
    pub path_count: u32,

    /// Annual volatility in percent (15.0 = 15%)
    pub annual_volatility_pct: f64,
}

/// Empirical p10/p50/p90 of simulated balances, one entry per year
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MonteCarloBand {
    pub p10: Vec<f64>,
    pub p50: Vec<f64>,
    pub p90: Vec<f64>,
}

/// One year of a band, for tabular output
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonteCarloRow {
    pub year: u32,
    pub p10: f64,
    pub p50: f64,
    pub p90: f64,
}

impl MonteCarloBand {
    pub fn len(&self) -> usize {
        self.p50.len()
    }

    pub fn is_empty(&self) -> bool {
        self.p50.is_empty()
    }

    pub fn rows(&self) -> Vec<MonteCarloRow> {
        self.p10
            .iter()
            .zip(&self.p50)
            .zip(&self.p90)
            .enumerate()
            .map(|(i, ((&p10, &p50), &p90))| MonteCarloRow {
                year: i as u32 + 1,
                p10,
                p50,
                p90,
            })
            .collect()
    }

    fn push(&mut self, sorted: &[f64]) {
        self.p10.push(nearest_rank(sorted, 0.10));
        self.p50.push(nearest_rank(sorted, 0.50));
        self.p90.push(nearest_rank(sorted, 0.90));
    }
}

/// Monthly parameters shared by every path of a run
#[derive(Debug, Clone, Copy)]
struct PathModel {
    initial: f64,
    monthly: f64,
    mean_return: f64,
    monthly_fee: f64,
    monthly_vol: f64,
}

impl PathModel {
    fn from_inputs(inputs: &MonteCarloInputs) -> Self {
        Self {
            initial: finite_or_zero(inputs.initial),
            monthly: finite_or_zero(inputs.monthly),
            mean_return: monthly_from_annual(finite_or_zero(inputs.annual_return)),
            monthly_fee: monthly_from_annual(finite_or_zero(inputs.annual_fee)),
            monthly_vol: inputs.annual_volatility_pct / 100.0 / 12f64.sqrt(),
        }
    }

    /// Terminal balance of one path after `months`
    fn run<R: Rng + ?Sized>(&self, months: u32, rng: &mut R) -> f64 {
        let mut balance = self.initial;
        for _ in 0..months {
            let r = self.mean_return + self.monthly_vol * standard_normal(rng);
            balance = grow_one_month(balance, self.monthly, r, self.monthly_fee);
        }
        balance
    }
}

/// Monte Carlo engine over the configured path limits
#[derive(Debug, Clone, Default)]
pub struct MonteCarloEngine {
    limits: MonteCarloLimits,
}

impl MonteCarloEngine {
    pub fn new(limits: MonteCarloLimits) -> Self {
        Self { limits }
    }

    /// Path count to use for a user request: default when absent, clamped to the limits
    pub fn resolve_path_count(&self, requested: Option<u32>) -> u32 {
        clamp_path_count(requested, &self.limits)
    }

    /// Simulate sequentially, drawing every deviate from `rng`
    pub fn simulate<R: Rng + ?Sized>(
        &self,
        inputs: &MonteCarloInputs,
        rng: &mut R,
    ) -> Result<MonteCarloBand> {
        check_inputs(inputs)?;
        let model = PathModel::from_inputs(inputs);
        let mut band = MonteCarloBand::default();

        for year in 1..=inputs.years {
            let mut balances: Vec<f64> = (0..inputs.path_count)
                .map(|_| model.run(year * 12, rng))
                .collect();
            balances.sort_by(f64::total_cmp);
            band.push(&balances);
            debug!("monte carlo year {year}: p50 {:.2}", nearest_rank(&balances, 0.50));
        }

        Ok(band)
    }

    /// Simulate paths in parallel; each path owns an RNG derived from `seed`,
    /// its year and its index, so the band does not depend on scheduling
    pub fn simulate_parallel(&self, inputs: &MonteCarloInputs, seed: u64) -> Result<MonteCarloBand> {
        check_inputs(inputs)?;
        let model = PathModel::from_inputs(inputs);
        let mut band = MonteCarloBand::default();

        for year in 1..=inputs.years {
            let mut balances: Vec<f64> = (0..inputs.path_count)
                .into_par_iter()
                .map(|path| {
                    let mut rng = SmallRng::seed_from_u64(derive_seed(seed, year, path));
                    model.run(year * 12, &mut rng)
                })
                .collect();
            balances.sort_by(f64::total_cmp);
            band.push(&balances);
            debug!("monte carlo year {year}: p50 {:.2}", nearest_rank(&balances, 0.50));
        }

        Ok(band)
    }
}

fn check_inputs(inputs: &MonteCarloInputs) -> Result<()> {
    if inputs.path_count == 0 {
        return Err(EngineError::InvalidPathCount(inputs.path_count));
    }
    let vol = inputs.annual_volatility_pct;
    if !vol.is_finite() || vol < 0.0 {
        return Err(EngineError::InvalidVolatility(vol));
    }
    Ok(())
}

/// Box-Muller standard normal; zero uniforms are redrawn so the log stays finite
fn standard_normal<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    let mut u: f64 = 0.0;
    while u == 0.0 {
        u = rng.gen();
    }
    let mut v: f64 = 0.0;
    while v == 0.0 {
        v = rng.gen();
    }
    (-2.0 * u.ln()).sqrt() * (2.0 * PI * v).cos()
}

/// Value at `floor((n - 1) * q)` of an ascending slice
fn nearest_rank(sorted: &[f64], q: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    let last = sorted.len() - 1;
    let index = ((last as f64) * q).floor().max(0.0) as usize;
    sorted[index.min(last)]
}

fn derive_seed(base_seed: u64, year: u32, path: u32) -> u64 {
    let mixed = base_seed ^ ((year as u64) << 32) ^ path as u64;
    splitmix64(mixed)
}

fn splitmix64(mut x: u64) -> u64 {
    x = x.wrapping_add(0x9E3779B97F4A7C15);
    let mut z = x;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
    z ^ (z >> 31)
}
