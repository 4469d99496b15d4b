//! Market data provider interface.

use crate::models::price::PriceSeries;
use crate::services::error::ServiceError;
use serde::{Deserialize, Serialize};

/// Historical chart as returned by the provider: each entry is `[timestamp_ms, value]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketChart {
    pub prices: PriceSeries,
    #[serde(default)]
    pub market_caps: Vec<(f64, f64)>,
    #[serde(default)]
    pub total_volumes: Vec<(f64, f64)>,
}

#[async_trait::async_trait]
pub trait MarketDataProvider {
    /// Fetch `days` of daily history for `coin_id` quoted in `vs_currency`.
    async fn fetch_market_chart(
        &self,
        coin_id: &str,
        vs_currency: &str,
        days: u32,
    ) -> Result<MarketChart, ServiceError>;
}
