//! Market state classification and buy level configuration models

use crate::models::indicators::{RsiIndicator, SmaIndicator};
use serde::{Deserialize, Serialize};

pub const DEFAULT_OVERBOUGHT_MULTIPLIER: f64 = 0.8;
pub const DEFAULT_OVERSOLD_MULTIPLIER: f64 = 1.2;
pub const DEFAULT_NEUTRAL_MULTIPLIER: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarketState {
    Overbought,
    Oversold,
    Neutral,
}

impl std::fmt::Display for MarketState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            MarketState::Overbought => "overbought",
            MarketState::Oversold => "oversold",
            MarketState::Neutral => "neutral",
        };
        f.write_str(label)
    }
}

/// The two independent predicates evaluated against the latest indicator values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketSignals {
    pub overbought: bool,
    pub oversold: bool,
}

impl MarketSignals {
    /// Collapse both predicates into a single state. Overbought wins when both hold.
    pub fn resolve(self) -> MarketState {
        match (self.overbought, self.oversold) {
            (true, _) => MarketState::Overbought,
            (false, true) => MarketState::Oversold,
            (false, false) => MarketState::Neutral,
        }
    }
}

/// Latest values a classification was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarketSnapshot {
    pub price: f64,
    pub sma: SmaIndicator,
    pub rsi: RsiIndicator,
    pub signals: MarketSignals,
    pub state: MarketState,
}

/// Purchase multipliers per market state. Each missing field falls back to its
/// own default independently of the others.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuyLevelConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overbought_multiplier: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oversold_multiplier: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub neutral_multiplier: Option<f64>,
}

impl BuyLevelConfig {
    pub fn multiplier_for(&self, state: MarketState) -> f64 {
        match state {
            MarketState::Overbought => self
                .overbought_multiplier
                .unwrap_or(DEFAULT_OVERBOUGHT_MULTIPLIER),
            MarketState::Oversold => self
                .oversold_multiplier
                .unwrap_or(DEFAULT_OVERSOLD_MULTIPLIER),
            MarketState::Neutral => self
                .neutral_multiplier
                .unwrap_or(DEFAULT_NEUTRAL_MULTIPLIER),
        }
    }
}
