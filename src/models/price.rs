//! Timestamped price samples as delivered by market data providers.

use serde::{Deserialize, Serialize};

/// A single `(timestamp, price)` observation.
///
/// Providers deliver samples as two-element JSON arrays (`[1700000000000, 37012.5]`),
/// so the serde representation is the tuple rather than a map.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "(f64, f64)", into = "(f64, f64)")]
pub struct PriceSample {
    pub timestamp: f64,
    pub price: f64,
}

impl PriceSample {
    pub fn new(timestamp: f64, price: f64) -> Self {
        Self { timestamp, price }
    }
}

impl From<(f64, f64)> for PriceSample {
    fn from((timestamp, price): (f64, f64)) -> Self {
        Self { timestamp, price }
    }
}

impl From<PriceSample> for (f64, f64) {
    fn from(sample: PriceSample) -> Self {
        (sample.timestamp, sample.price)
    }
}

/// Time-ordered samples, oldest first.
///
/// Callers are responsible for ordering and for keeping prices finite and
/// non-negative; the indicator functions do not re-check either.
pub type PriceSeries = Vec<PriceSample>;

/// Latest price of a series, if any.
pub fn latest_price(samples: &[PriceSample]) -> Option<f64> {
    samples.last().map(|s| s.price)
}
