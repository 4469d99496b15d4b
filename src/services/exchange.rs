//! Exchange provider interface: balances and currency exchange quotes.

use crate::services::error::ServiceError;
use serde::{Deserialize, Deserializer, Serialize};

/// Account balance for one currency. Amounts arrive as decimal strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Balance {
    pub currency: String,
    #[serde(default, deserialize_with = "decimal")]
    pub current: f64,
    #[serde(default, deserialize_with = "decimal")]
    pub available: f64,
    #[serde(default, deserialize_with = "decimal")]
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoneyAmount {
    #[serde(deserialize_with = "decimal")]
    pub amount: f64,
    pub currency: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionRate {
    #[serde(deserialize_with = "decimal")]
    pub amount: f64,
    #[serde(default)]
    pub source_currency: Option<String>,
    #[serde(default)]
    pub target_currency: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeQuote {
    pub id: String,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub valid_until: Option<String>,
    #[serde(default)]
    pub source: Option<MoneyAmount>,
    #[serde(default)]
    pub target: Option<MoneyAmount>,
    #[serde(default)]
    pub conversion_rate: Option<ConversionRate>,
}

#[async_trait::async_trait]
pub trait ExchangeProvider {
    async fn get_account_balances(&self) -> Result<Vec<Balance>, ServiceError>;

    /// Quote selling `amount` of `source_currency` for `target_currency`.
    async fn create_currency_exchange_quote(
        &self,
        source_currency: &str,
        target_currency: &str,
        amount: f64,
    ) -> Result<ExchangeQuote, ServiceError>;

    async fn execute_currency_exchange(&self, quote_id: &str) -> Result<(), ServiceError>;
}

/// Accept `"12.34"` as well as `12.34`.
fn decimal<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Decimal {
        Text(String),
        Number(f64),
    }

    match Decimal::deserialize(deserializer)? {
        Decimal::Number(value) => Ok(value),
        Decimal::Text(text) => text
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("invalid decimal amount '{}'", text))),
    }
}
