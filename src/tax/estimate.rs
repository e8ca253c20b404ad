//! Rough tax on share, capital and crypto income
//!
//! Not tax advice: flat rates, no allowances, no carry-forward of losses.

use serde::{Deserialize, Serialize};

use crate::config::TaxRates;
use crate::input::finite_or_zero;

/// Yearly income figures; rates are decimals (0.37 = 37%)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaxInputs {
    pub stock_gain: f64,
    pub stock_loss: f64,
    pub stock_dividend: f64,

    /// Upper bound of the low share-income bracket; 0 selects the default
    pub stock_threshold: f64,

    /// Net change in capital income, may be negative
    pub capital_change: f64,
    pub capital_dividend: f64,
    pub capital_rate: f64,

    pub crypto_gain: f64,
    pub crypto_loss: f64,
    pub crypto_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxEstimate {
    pub stock_base: f64,
    pub capital_base: f64,
    pub crypto_base: f64,

    pub stock_tax: f64,
    pub capital_tax: f64,
    pub crypto_tax: f64,
    pub total_tax: f64,

    /// Positive income only
    pub gross: f64,
    pub net: f64,
}

pub fn estimate(inputs: &TaxInputs, rates: &TaxRates) -> TaxEstimate {
    let non_negative = |v: f64| finite_or_zero(v).max(0.0);

    let threshold = match finite_or_zero(inputs.stock_threshold) {
        t if t == 0.0 => rates.default_stock_threshold,
        t => t.max(0.0),
    };

    let stock_base = (non_negative(inputs.stock_gain) - non_negative(inputs.stock_loss)).max(0.0)
        + non_negative(inputs.stock_dividend);
    let capital_base = finite_or_zero(inputs.capital_change) + non_negative(inputs.capital_dividend);
    let crypto_base = (non_negative(inputs.crypto_gain) - non_negative(inputs.crypto_loss)).max(0.0);

    let stock_tax = if stock_base > 0.0 {
        let low = stock_base.min(threshold);
        let high = (stock_base - threshold).max(0.0);
        low * rates.stock_low_rate + high * rates.stock_high_rate
    } else {
        0.0
    };

    let flat = |base: f64, rate: f64| {
        let rate = finite_or_zero(rate);
        if base > 0.0 && rate > 0.0 {
            base * rate
        } else {
            0.0
        }
    };
    let capital_tax = flat(capital_base, inputs.capital_rate);
    let crypto_tax = flat(crypto_base, inputs.crypto_rate);

    let total_tax = stock_tax + capital_tax + crypto_tax;
    let gross = stock_base + capital_base.max(0.0) + crypto_base;

    TaxEstimate {
        stock_base,
        capital_base,
        crypto_base,
        stock_tax,
        capital_tax,
        crypto_tax,
        total_tax,
        gross,
        net: (gross - total_tax).max(0.0),
    }
}
