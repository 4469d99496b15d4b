//! Strike REST client for balances and currency exchange

use crate::config::Environment;
use crate::services::error::{ensure_success, ServiceError};
use crate::services::exchange::{Balance, ExchangeProvider, ExchangeQuote};
use reqwest::StatusCode;
use serde_json::json;
use std::time::Duration;
use tracing::{debug, error, info, warn};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

pub struct StrikeClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl StrikeClient {
    pub fn new(api_key: impl Into<String>, environment: Environment) -> Result<Self, ServiceError> {
        let client = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .map_err(|e| ServiceError::Request(e.to_string()))?;
        Ok(Self::with_client(
            environment.strike_base_url(),
            client,
            api_key,
        ))
    }

    pub fn with_client(
        base_url: impl Into<String>,
        client: reqwest::Client,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        self.client
            .request(method, format!("{}{}", self.base_url, path))
            .bearer_auth(&self.api_key)
    }
}

#[async_trait::async_trait]
impl ExchangeProvider for StrikeClient {
    async fn get_account_balances(&self) -> Result<Vec<Balance>, ServiceError> {
        let result = async {
            let response = self.request(reqwest::Method::GET, "/balances").send().await?;
            let balances = ensure_success(response).await?.json::<Vec<Balance>>().await?;
            Ok::<_, ServiceError>(balances)
        }
        .await;

        if let Err(ref e) = result {
            error!(error = %e, "Error fetching account balances");
        }
        result
    }

    async fn create_currency_exchange_quote(
        &self,
        source_currency: &str,
        target_currency: &str,
        amount: f64,
    ) -> Result<ExchangeQuote, ServiceError> {
        info!(
            amount = amount,
            source_currency = %source_currency,
            target_currency = %target_currency,
            "Creating currency exchange quote for {:.2} {} to {}",
            amount,
            source_currency,
            target_currency
        );

        let body = json!({
            "sell": source_currency,
            "buy": target_currency,
            "amount": {
                "amount": format!("{:.2}", amount),
                "currency": source_currency,
            }
        });

        let result = async {
            let response = self
                .request(reqwest::Method::POST, "/currency-exchange-quotes")
                .json(&body)
                .send()
                .await?;
            let quote = ensure_success(response).await?.json::<ExchangeQuote>().await?;
            Ok::<_, ServiceError>(quote)
        }
        .await;

        match result {
            Ok(quote) => {
                debug!(quote = ?quote, "Currency exchange quote response");
                Ok(quote)
            }
            Err(e) => {
                error!(error = %e, "Error creating currency exchange quote");
                Err(e)
            }
        }
    }

    async fn execute_currency_exchange(&self, quote_id: &str) -> Result<(), ServiceError> {
        let path = format!("/currency-exchange-quotes/{}/execute", quote_id);
        let result = async {
            let response = self
                .request(reqwest::Method::PATCH, &path)
                .json(&json!({}))
                .send()
                .await?;
            Ok::<_, ServiceError>(ensure_success(response).await?.status())
        }
        .await;

        match result {
            Ok(status) if status == StatusCode::ACCEPTED => {
                info!(quote_id = %quote_id, "Currency exchange execution accepted (202)");
                Ok(())
            }
            Ok(status) => {
                warn!(
                    quote_id = %quote_id,
                    status = status.as_u16(),
                    "Unexpected status executing currency exchange: {}",
                    status
                );
                Ok(())
            }
            Err(e) => {
                error!(quote_id = %quote_id, error = %e, "Error executing currency exchange");
                Err(e)
            }
        }
    }
}
