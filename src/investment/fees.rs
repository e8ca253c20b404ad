use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::InputError;

/// Typical annual cost levels for common ways of investing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeePreset {
    /// Fee entered by hand
    Manual,
    GlobalIndex,
    DanishIndex,
    EtfBroker,
    Robo,
    SingleStocks,
    CryptoHold,
}

impl FeePreset {
    pub const ALL: [FeePreset; 7] = [
        FeePreset::Manual,
        FeePreset::GlobalIndex,
        FeePreset::DanishIndex,
        FeePreset::EtfBroker,
        FeePreset::Robo,
        FeePreset::SingleStocks,
        FeePreset::CryptoHold,
    ];

    /// Annual fee in percent, None for `Manual`
    pub fn annual_fee_pct(&self) -> Option<f64> {
        match self {
            FeePreset::Manual => None,
            FeePreset::GlobalIndex => Some(0.20),
            FeePreset::DanishIndex => Some(0.50),
            FeePreset::EtfBroker => Some(0.35),
            FeePreset::Robo => Some(0.75),
            FeePreset::SingleStocks | FeePreset::CryptoHold => Some(0.0),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FeePreset::Manual => "manual",
            FeePreset::GlobalIndex => "global_index",
            FeePreset::DanishIndex => "danish_index",
            FeePreset::EtfBroker => "etf_broker",
            FeePreset::Robo => "robo",
            FeePreset::SingleStocks => "single_stocks",
            FeePreset::CryptoHold => "crypto_hold",
        }
    }
}

impl fmt::Display for FeePreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FeePreset {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == wanted)
            .ok_or_else(|| InputError::UnknownFeePreset { value: s.to_string() })
    }
}
