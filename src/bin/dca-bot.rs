//! Strike DCA Bot
//!
//! Serves the health, balances and metrics endpoints and, when an API key is
//! configured, runs the DCA job on its cron schedule.

use dotenvy::dotenv;
use std::sync::Arc;
use strike_dca::config::AppConfig;
use strike_dca::core::dca::{DcaExecutor, DcaSettings};
use strike_dca::core::http::{start_server, AppState};
use strike_dca::core::scheduler::DcaScheduler;
use strike_dca::logging;
use strike_dca::metrics::Metrics;
use strike_dca::services::coingecko::CoinGeckoClient;
use strike_dca::services::exchange::ExchangeProvider;
use strike_dca::services::market_data::MarketDataProvider;
use strike_dca::services::strike::StrikeClient;
use tokio::signal;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env if present
    dotenv().ok();

    let config = AppConfig::from_env()?;
    logging::init_logging(config.environment);

    info!(environment = %config.environment, "Starting Strike DCA Bot");
    info!(config = ?config, "Configuration");

    let metrics = Arc::new(Metrics::new()?);

    let exchange: Arc<dyn ExchangeProvider + Send + Sync> =
        Arc::new(StrikeClient::new(config.api_key.clone(), config.environment)?);
    let market_data: Arc<dyn MarketDataProvider + Send + Sync> = Arc::new(CoinGeckoClient::new()?);

    let scheduler = if config.scheduling_enabled() {
        let executor = Arc::new(
            DcaExecutor::new(DcaSettings::from(&config), market_data, exchange.clone())
                .with_metrics(metrics.clone()),
        );
        let scheduler = DcaScheduler::new(executor, &config.dca_frequency)?;
        scheduler.start().await;
        info!(
            frequency = %config.dca_frequency,
            next_run = ?scheduler.next_run(),
            "DCA scheduled to run with frequency: {}",
            config.dca_frequency
        );
        Some(scheduler)
    } else {
        warn!("No STRIKE_API_KEY provided. DCA scheduling is disabled.");
        None
    };

    let state = AppState::new(metrics, exchange);
    let port = config.port;
    let server_handle = tokio::spawn(async move {
        if let Err(e) = start_server(port, state).await {
            error!(error = %e, "HTTP server error");
        }
    });

    // Graceful shutdown
    tokio::select! {
        _ = signal::ctrl_c() => {
            info!("Shutting down DCA bot...");
        }
        _ = server_handle => {
            error!("HTTP server stopped");
        }
    }

    if let Some(scheduler) = scheduler {
        scheduler.stop().await;
    }
    info!("DCA bot stopped");

    Ok(())
}
