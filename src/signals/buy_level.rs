//! Buy size multiplier derived from the market state.

use crate::models::market::{BuyLevelConfig, MarketState};
use crate::models::price::PriceSample;
use crate::signals::market_state::MarketStateClassifier;

/// Multiplier to apply to the base purchase amount.
///
/// Always uses the default 14/200 windows. A missing config is the same as a
/// config with every field unset.
pub fn buy_level_multiplier(samples: &[PriceSample], config: Option<&BuyLevelConfig>) -> f64 {
    let state = MarketStateClassifier::default().classify(samples);
    multiplier_for_state(state, config)
}

pub fn multiplier_for_state(state: MarketState, config: Option<&BuyLevelConfig>) -> f64 {
    config.copied().unwrap_or_default().multiplier_for(state)
}
