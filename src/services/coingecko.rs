//! CoinGecko market chart client

use crate::services::error::{ensure_success, ServiceError};
use crate::services::market_data::{MarketChart, MarketDataProvider};
use backon::{ExponentialBuilder, Retryable};
use std::time::Duration;
use tracing::{debug, warn};

pub const COINGECKO_API_BASE: &str = "https://api.coingecko.com/api/v3";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_MAX_RETRIES: usize = 3;
const DEFAULT_RETRY_DELAY: Duration = Duration::from_millis(500);

/// Map a ticker symbol to the id CoinGecko expects in paths and `vs_currency`.
pub fn coingecko_id(symbol: &str) -> String {
    match symbol.to_uppercase().as_str() {
        "BTC" => "bitcoin".to_string(),
        "USD" => "usd".to_string(),
        _ => symbol.to_lowercase(),
    }
}

pub struct CoinGeckoClient {
    client: reqwest::Client,
    base_url: String,
    max_retries: usize,
    retry_delay: Duration,
}

impl CoinGeckoClient {
    pub fn new() -> Result<Self, ServiceError> {
        let client = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .map_err(|e| ServiceError::Request(e.to_string()))?;
        Ok(Self::with_client(COINGECKO_API_BASE, client))
    }

    /// Point the client at another base URL (mock servers, proxies).
    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            max_retries: DEFAULT_MAX_RETRIES,
            retry_delay: DEFAULT_RETRY_DELAY,
        }
    }

    pub fn with_retry_policy(mut self, max_retries: usize, retry_delay: Duration) -> Self {
        self.max_retries = max_retries;
        self.retry_delay = retry_delay;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn fetch_once(
        &self,
        coin_id: &str,
        vs_currency: &str,
        days: u32,
    ) -> Result<MarketChart, ServiceError> {
        let url = format!("{}/coins/{}/market_chart", self.base_url, coin_id);
        let days = days.to_string();
        debug!(url = %url, vs_currency = %vs_currency, days = %days, "GET market chart");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("vs_currency", vs_currency),
                ("days", days.as_str()),
                ("interval", "daily"),
            ])
            .send()
            .await?;

        let chart = ensure_success(response).await?.json::<MarketChart>().await?;
        Ok(chart)
    }
}

#[async_trait::async_trait]
impl MarketDataProvider for CoinGeckoClient {
    async fn fetch_market_chart(
        &self,
        coin_id: &str,
        vs_currency: &str,
        days: u32,
    ) -> Result<MarketChart, ServiceError> {
        let backoff = ExponentialBuilder::default()
            .with_min_delay(self.retry_delay)
            .with_max_times(self.max_retries);

        let chart = (|| self.fetch_once(coin_id, vs_currency, days))
            .retry(backoff)
            .when(ServiceError::is_retryable)
            .notify(|err: &ServiceError, delay: Duration| {
                warn!(
                    coin_id = %coin_id,
                    vs_currency = %vs_currency,
                    error = %err,
                    "CoinGecko request failed, retrying in {:?}",
                    delay
                );
            })
            .await?;

        debug!(
            coin_id = %coin_id,
            vs_currency = %vs_currency,
            samples = chart.prices.len(),
            "Market chart response successfully fetched"
        );
        Ok(chart)
    }
}
