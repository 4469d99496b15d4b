//! Shared data models spanning the engine layers.

pub mod indicators;
pub mod market;
pub mod price;

pub use indicators::{IndicatorSeries, RsiIndicator, SmaIndicator};
pub use market::{BuyLevelConfig, MarketSignals, MarketSnapshot, MarketState};
pub use price::{PriceSample, PriceSeries};
