//! Market State CLI: fetch price history and report the buy level.
//!
//! Prints the latest price, SMA, RSI, the overbought/oversold verdicts and
//! the multiplier a DCA run would apply.

use clap::Parser;
use dotenvy::dotenv;
use strike_dca::config::{AppConfig, Environment};
use strike_dca::core::dca::MARKET_CHART_DAYS;
use strike_dca::indicators::momentum::DEFAULT_RSI_PERIOD;
use strike_dca::logging;
use strike_dca::services::coingecko::{coingecko_id, CoinGeckoClient};
use strike_dca::services::market_data::MarketDataProvider;
use strike_dca::signals::buy_level::buy_level_multiplier;
use strike_dca::signals::market_state::{MarketStateClassifier, DEFAULT_SMA_PERIOD};

#[derive(Parser)]
#[command(
    name = "market-state",
    about = "Classify the current market and show the DCA buy level multiplier"
)]
struct Cli {
    /// Asset to evaluate (ticker or CoinGecko id).
    #[arg(long, default_value = "BTC")]
    coin: String,

    /// Quote currency (ticker or CoinGecko id).
    #[arg(long, default_value = "USD")]
    vs_currency: String,

    /// Days of daily history to fetch.
    #[arg(long, default_value_t = MARKET_CHART_DAYS)]
    days: u32,

    #[arg(long, default_value_t = DEFAULT_RSI_PERIOD)]
    rsi_period: usize,

    #[arg(long, default_value_t = DEFAULT_SMA_PERIOD)]
    sma_period: usize,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    logging::init_logging(Environment::Sandbox);

    let cli = Cli::parse();
    let config = AppConfig::from_env()?;

    let coin_id = coingecko_id(&cli.coin);
    let vs_currency = coingecko_id(&cli.vs_currency);
    let client = CoinGeckoClient::new()?;
    let chart = client
        .fetch_market_chart(&coin_id, &vs_currency, cli.days)
        .await?;

    let classifier = MarketStateClassifier::new(cli.rsi_period, cli.sma_period);
    println!("Pair: {}/{}", coin_id, vs_currency);
    println!("  Samples: {}", chart.prices.len());

    match classifier.snapshot(&chart.prices) {
        Some(snapshot) => {
            println!("  Price: {:.2}", snapshot.price);
            println!("  SMA({}): {:.2}", snapshot.sma.period, snapshot.sma.value);
            println!("  RSI({}): {:.2}", snapshot.rsi.period, snapshot.rsi.value);
            println!("  Overbought: {}", snapshot.signals.overbought);
            println!("  Oversold: {}", snapshot.signals.oversold);
            println!("  State: {}", snapshot.state);
        }
        None => {
            println!(
                "  Not enough history for RSI({}) / SMA({}), state: neutral",
                cli.rsi_period, cli.sma_period
            );
        }
    }

    println!(
        "  Buy level multiplier: {}",
        buy_level_multiplier(&chart.prices, Some(&config.buy_levels))
    );

    Ok(())
}
