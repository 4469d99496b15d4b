//! RSI (Relative Strength Index) indicator
//!
//! Wilder smoothing: the first average gain/loss is the plain mean over the
//! first `period` price changes, every later change folds in with weight
//! `1 / period`.
//!
//! RSI = 100 - (100 / (1 + RS))
//! RS = Average Gain / Average Loss

use crate::models::indicators::{IndicatorSeries, RsiIndicator};
use crate::models::price::PriceSample;

pub const DEFAULT_RSI_PERIOD: usize = 14;

#[derive(Debug, Clone, Copy)]
struct WilderAverages {
    gain: f64,
    loss: f64,
}

impl WilderAverages {
    fn seed(changes: &[f64], period: usize) -> Self {
        let (gains, losses) = changes
            .iter()
            .fold((0.0, 0.0), |(gains, losses), &change| {
                if change >= 0.0 {
                    (gains + change, losses)
                } else {
                    (gains, losses + change.abs())
                }
            });

        Self {
            gain: gains / period as f64,
            loss: losses / period as f64,
        }
    }

    fn smooth(self, change: f64, period: usize) -> Self {
        let carried = (period - 1) as f64;
        let gain = change.max(0.0);
        let loss = (-change).max(0.0);

        Self {
            gain: (self.gain * carried + gain) / period as f64,
            loss: (self.loss * carried + loss) / period as f64,
        }
    }

    fn rsi(self) -> f64 {
        if self.gain == 0.0 && self.loss == 0.0 {
            // flat market
            50.0
        } else if self.loss == 0.0 {
            100.0
        } else {
            100.0 - (100.0 / (1.0 + self.gain / self.loss))
        }
    }
}

/// Calculate the RSI series
///
/// One value per step from the seed through the end of the series, so the
/// output holds `len - period` values (none when fewer than `period + 1`
/// samples are available).
pub fn calculate_rsi(samples: &[PriceSample], period: usize) -> IndicatorSeries {
    if period == 0 || samples.len() < period + 1 {
        return Vec::new();
    }

    let changes: Vec<f64> = samples
        .windows(2)
        .map(|pair| pair[1].price - pair[0].price)
        .collect();
    let (seed_changes, rest) = changes.split_at(period);
    let seed = WilderAverages::seed(seed_changes, period);

    std::iter::once(seed.rsi())
        .chain(rest.iter().scan(seed, |averages, &change| {
            *averages = averages.smooth(change, period);
            Some(averages.rsi())
        }))
        .collect()
}

/// Calculate the RSI series with default period (14)
pub fn calculate_rsi_default(samples: &[PriceSample]) -> IndicatorSeries {
    calculate_rsi(samples, DEFAULT_RSI_PERIOD)
}

/// Latest RSI value for a specific period
pub fn latest_rsi(samples: &[PriceSample], period: usize) -> Option<RsiIndicator> {
    let value = *calculate_rsi(samples, period).last()?;
    Some(RsiIndicator { value, period })
}
