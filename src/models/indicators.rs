use serde::{Deserialize, Serialize};

/// Output of a sliding indicator, one value per complete window.
pub type IndicatorSeries = Vec<f64>;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RsiIndicator {
    pub value: f64,
    pub period: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SmaIndicator {
    pub value: f64,
    pub period: usize,
}
