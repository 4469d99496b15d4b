//! Dollar-cost-averaging run: size a purchase from the market state and
//! exchange the source balance into the target currency.

use crate::config::AppConfig;
use crate::metrics::Metrics;
use crate::models::market::{BuyLevelConfig, MarketSnapshot};
use crate::services::coingecko::coingecko_id;
use crate::services::error::ServiceError;
use crate::services::exchange::ExchangeProvider;
use crate::services::market_data::MarketDataProvider;
use crate::signals::buy_level::buy_level_multiplier;
use crate::signals::market_state::MarketStateClassifier;
use chrono::{Datelike, Local, Weekday};
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, warn};

/// Days of history requested for the buy level calculation (200-day SMA plus slack).
pub const MARKET_CHART_DAYS: u32 = 210;

/// Multiplier used when market data cannot be fetched.
pub const FALLBACK_MULTIPLIER: f64 = 1.0;

#[derive(Debug, Error)]
pub enum DcaError {
    #[error("failed to fetch account balances: {0}")]
    Balances(#[source] ServiceError),

    #[error("failed to create exchange quote: {0}")]
    Quote(#[source] ServiceError),

    #[error("failed to execute exchange quote {quote_id}: {source}")]
    Execution {
        quote_id: String,
        #[source]
        source: ServiceError,
    },
}

/// Why a run ended without placing an exchange.
#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
    NotABuyDay { today: Weekday },
    NoAvailableBalance { currency: String },
    NonPositiveAmount { amount: f64 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExecutedExchange {
    pub quote_id: String,
    pub source_currency: String,
    pub target_currency: String,
    /// Source-currency amount sent to the exchange.
    pub amount: f64,
    pub multiplier: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DcaOutcome {
    Skipped(SkipReason),
    Executed(ExecutedExchange),
}

/// Settings a run needs, taken from `AppConfig`.
#[derive(Debug, Clone, PartialEq)]
pub struct DcaSettings {
    pub source_currency: String,
    pub target_currency: String,
    pub dca_amount: Option<f64>,
    pub buy_days: Option<Vec<Weekday>>,
    pub buy_levels: BuyLevelConfig,
}

impl From<&AppConfig> for DcaSettings {
    fn from(config: &AppConfig) -> Self {
        Self {
            source_currency: config.source_currency.clone(),
            target_currency: config.target_currency.clone(),
            dca_amount: config.dca_amount,
            buy_days: config.dca_buy_days.clone(),
            buy_levels: config.buy_levels,
        }
    }
}

/// Base amount capped at the available balance, scaled by the multiplier and
/// capped again.
pub fn exchange_amount(available: f64, dca_amount: Option<f64>, multiplier: f64) -> f64 {
    let base = match dca_amount {
        Some(amount) if available < amount => available,
        Some(amount) => amount,
        None => available,
    };
    (base * multiplier).min(available)
}

pub struct DcaExecutor {
    settings: DcaSettings,
    market_data: Arc<dyn MarketDataProvider + Send + Sync>,
    exchange: Arc<dyn ExchangeProvider + Send + Sync>,
    metrics: Option<Arc<Metrics>>,
}

impl DcaExecutor {
    pub fn new(
        settings: DcaSettings,
        market_data: Arc<dyn MarketDataProvider + Send + Sync>,
        exchange: Arc<dyn ExchangeProvider + Send + Sync>,
    ) -> Self {
        Self {
            settings,
            market_data,
            exchange,
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn settings(&self) -> &DcaSettings {
        &self.settings
    }

    /// Run for the current local weekday.
    pub async fn execute(&self) -> Result<DcaOutcome, DcaError> {
        self.execute_on(Local::now().weekday()).await
    }

    pub async fn execute_on(&self, today: Weekday) -> Result<DcaOutcome, DcaError> {
        let result = self.run(today).await;

        if let Some(ref metrics) = self.metrics {
            match &result {
                Ok(DcaOutcome::Executed(_)) => metrics.dca_executions_total.inc(),
                Ok(DcaOutcome::Skipped(_)) => metrics.dca_skipped_total.inc(),
                Err(_) => metrics.dca_failures_total.inc(),
            }
        }

        result
    }

    async fn run(&self, today: Weekday) -> Result<DcaOutcome, DcaError> {
        let settings = &self.settings;

        if let Some(ref days) = settings.buy_days {
            if !days.is_empty() && !days.contains(&today) {
                info!(
                    today = %today,
                    buy_days = ?days,
                    "Today ({}) is not a configured buy day, skipping DCA execution",
                    today
                );
                return Ok(DcaOutcome::Skipped(SkipReason::NotABuyDay { today }));
            }
        }

        info!("Starting DCA execution");

        let multiplier = self.buy_multiplier().await;

        let balances = self
            .exchange
            .get_account_balances()
            .await
            .map_err(DcaError::Balances)?;
        let available = balances
            .iter()
            .find(|b| b.currency == settings.source_currency)
            .map(|b| b.available)
            .unwrap_or(0.0);

        if available == 0.0 {
            info!(
                currency = %settings.source_currency,
                "No available {} balance, skipping DCA execution",
                settings.source_currency
            );
            return Ok(DcaOutcome::Skipped(SkipReason::NoAvailableBalance {
                currency: settings.source_currency.clone(),
            }));
        }

        let amount = exchange_amount(available, settings.dca_amount, multiplier);
        info!(
            available = available,
            dca_amount = ?settings.dca_amount,
            multiplier = multiplier,
            amount = amount,
            "Adjusted amount to exchange after buy level: {}",
            amount
        );

        if amount <= 0.0 {
            warn!(amount = amount, "Adjusted amount is not positive, skipping DCA execution");
            return Ok(DcaOutcome::Skipped(SkipReason::NonPositiveAmount { amount }));
        }

        let quote = self
            .exchange
            .create_currency_exchange_quote(
                &settings.source_currency,
                &settings.target_currency,
                amount,
            )
            .await
            .map_err(DcaError::Quote)?;

        info!(
            quote_id = %quote.id,
            rate = ?quote.conversion_rate.as_ref().map(|r| r.amount),
            source_amount = ?quote.source.as_ref().map(|s| s.amount),
            target_amount = ?quote.target.as_ref().map(|t| t.amount),
            "Created exchange quote"
        );

        self.exchange
            .execute_currency_exchange(&quote.id)
            .await
            .map_err(|source| DcaError::Execution {
                quote_id: quote.id.clone(),
                source,
            })?;

        info!(quote_id = %quote.id, "DCA execution successful");

        Ok(DcaOutcome::Executed(ExecutedExchange {
            quote_id: quote.id,
            source_currency: settings.source_currency.clone(),
            target_currency: settings.target_currency.clone(),
            amount,
            multiplier,
        }))
    }

    /// Multiplier from the current market state; falls back to neutral when the
    /// chart cannot be fetched.
    pub async fn buy_multiplier(&self) -> f64 {
        let target_id = coingecko_id(&self.settings.target_currency);
        let source_id = coingecko_id(&self.settings.source_currency);

        let multiplier = match self
            .market_data
            .fetch_market_chart(&target_id, &source_id, MARKET_CHART_DAYS)
            .await
        {
            Ok(chart) => {
                let multiplier =
                    buy_level_multiplier(&chart.prices, Some(&self.settings.buy_levels));
                log_snapshot(
                    MarketStateClassifier::default().snapshot(&chart.prices),
                    multiplier,
                );
                multiplier
            }
            Err(e) => {
                error!(
                    target_currency = %self.settings.target_currency,
                    target_id = %target_id,
                    source_currency = %self.settings.source_currency,
                    source_id = %source_id,
                    error = %e,
                    "Market data error, could not determine buy level multiplier"
                );
                warn!("Defaulting buy level multiplier to {}", FALLBACK_MULTIPLIER);
                if let Some(ref metrics) = self.metrics {
                    metrics.market_data_fallbacks_total.inc();
                }
                FALLBACK_MULTIPLIER
            }
        };

        if let Some(ref metrics) = self.metrics {
            metrics.buy_multiplier.set(multiplier);
        }
        multiplier
    }
}

fn log_snapshot(snapshot: Option<MarketSnapshot>, multiplier: f64) {
    match snapshot {
        Some(s) => info!(
            price = s.price,
            sma = s.sma.value,
            rsi = s.rsi.value,
            state = %s.state,
            multiplier = multiplier,
            "Buy level multiplier determined: {}",
            multiplier
        ),
        None => info!(
            multiplier = multiplier,
            "Not enough price history for a market signal, buy level multiplier: {}",
            multiplier
        ),
    }
}
