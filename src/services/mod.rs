//! External collaborators: market data and exchange providers.

pub mod coingecko;
pub mod error;
pub mod exchange;
pub mod market_data;
pub mod strike;

pub use coingecko::{coingecko_id, CoinGeckoClient};
pub use error::ServiceError;
pub use exchange::{Balance, ExchangeProvider, ExchangeQuote, MoneyAmount};
pub use market_data::{MarketChart, MarketDataProvider};
pub use strike::StrikeClient;
