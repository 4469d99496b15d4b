//! SMA (Simple Moving Average) indicator

use crate::models::indicators::{IndicatorSeries, SmaIndicator};
use crate::models::price::PriceSample;

/// Calculate the SMA series for a specific period
///
/// Value `i` is the mean of the prices ending at sample `period - 1 + i`,
/// so the output holds `len - period + 1` values (none when the series is
/// shorter than the period).
pub fn calculate_sma(samples: &[PriceSample], period: usize) -> IndicatorSeries {
    if period == 0 || samples.len() < period {
        return Vec::new();
    }

    samples
        .windows(period)
        .map(|window| window.iter().map(|s| s.price).sum::<f64>() / period as f64)
        .collect()
}

/// Latest SMA value for a specific period
pub fn latest_sma(samples: &[PriceSample], period: usize) -> Option<SmaIndicator> {
    let value = *calculate_sma(samples, period).last()?;
    Some(SmaIndicator { value, period })
}
