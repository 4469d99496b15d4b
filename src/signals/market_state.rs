//! Overbought / oversold classification from RSI and a long SMA.

use crate::indicators::momentum::{latest_rsi, DEFAULT_RSI_PERIOD};
use crate::indicators::trend::latest_sma;
use crate::models::market::{MarketSignals, MarketSnapshot, MarketState};
use crate::models::price::{latest_price, PriceSample};

pub const DEFAULT_SMA_PERIOD: usize = 200;
pub const RSI_OVERBOUGHT: f64 = 70.0;
pub const RSI_OVERSOLD: f64 = 30.0;

/// Classifies the latest sample of a series against RSI and SMA.
///
/// - Overbought: RSI > 70 and price above the SMA
/// - Oversold: RSI < 30 and price below the SMA
///
/// Series shorter than the longest window carry no signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarketStateClassifier {
    pub rsi_period: usize,
    pub sma_period: usize,
}

impl Default for MarketStateClassifier {
    fn default() -> Self {
        Self {
            rsi_period: DEFAULT_RSI_PERIOD,
            sma_period: DEFAULT_SMA_PERIOD,
        }
    }
}

impl MarketStateClassifier {
    pub fn new(rsi_period: usize, sma_period: usize) -> Self {
        Self {
            rsi_period,
            sma_period,
        }
    }

    /// Latest price, SMA and RSI with the resulting signals, or `None` when
    /// there is not enough history to produce both indicators.
    pub fn snapshot(&self, samples: &[PriceSample]) -> Option<MarketSnapshot> {
        if samples.len() < self.rsi_period.max(self.sma_period) {
            return None;
        }

        let price = latest_price(samples)?;
        let sma = latest_sma(samples, self.sma_period)?;
        let rsi = latest_rsi(samples, self.rsi_period)?;

        let signals = MarketSignals {
            overbought: rsi.value > RSI_OVERBOUGHT && price > sma.value,
            oversold: rsi.value < RSI_OVERSOLD && price < sma.value,
        };

        Some(MarketSnapshot {
            price,
            sma,
            rsi,
            signals,
            state: signals.resolve(),
        })
    }

    pub fn signals(&self, samples: &[PriceSample]) -> MarketSignals {
        self.snapshot(samples)
            .map(|snapshot| snapshot.signals)
            .unwrap_or_default()
    }

    pub fn classify(&self, samples: &[PriceSample]) -> MarketState {
        self.signals(samples).resolve()
    }
}

pub fn is_overbought(samples: &[PriceSample], rsi_period: usize, sma_period: usize) -> bool {
    MarketStateClassifier::new(rsi_period, sma_period)
        .signals(samples)
        .overbought
}

pub fn is_oversold(samples: &[PriceSample], rsi_period: usize, sma_period: usize) -> bool {
    MarketStateClassifier::new(rsi_period, sma_period)
        .signals(samples)
        .oversold
}
