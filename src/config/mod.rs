//! Environment-driven application configuration

use crate::models::market::BuyLevelConfig;
use chrono::Weekday;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const DEFAULT_DCA_FREQUENCY: &str = "0 0 * * 1";
pub const DEFAULT_SOURCE_CURRENCY: &str = "USD";
pub const DEFAULT_TARGET_CURRENCY: &str = "BTC";
pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{key} must be a number, got '{value}'")]
    InvalidNumber { key: String, value: String },

    #[error("unknown environment '{0}' (expected 'sandbox' or 'production')")]
    InvalidEnvironment(String),

    #[error("unknown weekday '{0}' in DCA_BUY_DAYS")]
    InvalidWeekday(String),

    #[error("invalid cron expression '{expression}': {reason}")]
    InvalidSchedule { expression: String, reason: String },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Environment {
    #[default]
    Sandbox,
    Production,
}

impl Environment {
    pub fn strike_base_url(&self) -> &'static str {
        match self {
            Environment::Production => "https://api.strike.me/v1",
            Environment::Sandbox => "https://api.dev.strike.me/v1",
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sandbox" => Ok(Environment::Sandbox),
            "production" | "prod" => Ok(Environment::Production),
            other => Err(ConfigError::InvalidEnvironment(other.to_string())),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Sandbox => f.write_str("sandbox"),
            Environment::Production => f.write_str("production"),
        }
    }
}

#[derive(Clone, PartialEq)]
pub struct AppConfig {
    pub api_key: String,
    /// Fixed amount per run; `None` exchanges the whole available balance.
    pub dca_amount: Option<f64>,
    pub dca_frequency: String,
    pub source_currency: String,
    pub target_currency: String,
    pub environment: Environment,
    /// `None` runs on every scheduled tick.
    pub dca_buy_days: Option<Vec<Weekday>>,
    pub buy_levels: BuyLevelConfig,
    pub port: u16,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            dca_amount: None,
            dca_frequency: DEFAULT_DCA_FREQUENCY.to_string(),
            source_currency: DEFAULT_SOURCE_CURRENCY.to_string(),
            target_currency: DEFAULT_TARGET_CURRENCY.to_string(),
            environment: Environment::Sandbox,
            dca_buy_days: None,
            buy_levels: BuyLevelConfig::default(),
            port: DEFAULT_PORT,
        }
    }
}

impl AppConfig {
    /// Load from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from any key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let environment = match var("STRIKE_ENVIRONMENT") {
            Some(value) => value.parse()?,
            None => defaults.environment,
        };

        let dca_buy_days = var("DCA_BUY_DAYS")
            .map(|days| {
                days.split(',')
                    .map(str::trim)
                    .filter(|day| !day.is_empty())
                    .map(parse_weekday)
                    .collect::<Result<Vec<_>, _>>()
            })
            .transpose()?;

        let port = match var("PORT") {
            Some(value) => value
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidNumber {
                    key: "PORT".to_string(),
                    value,
                })?,
            None => defaults.port,
        };

        Ok(Self {
            api_key: var("STRIKE_API_KEY").unwrap_or_default(),
            dca_amount: parse_number(&var, "DCA_AMOUNT")?,
            dca_frequency: var("DCA_FREQUENCY").unwrap_or(defaults.dca_frequency),
            source_currency: var("SOURCE_CURRENCY").unwrap_or(defaults.source_currency),
            target_currency: var("TARGET_CURRENCY").unwrap_or(defaults.target_currency),
            environment,
            dca_buy_days,
            buy_levels: BuyLevelConfig {
                overbought_multiplier: parse_number(&var, "OVERBOUGHT_MULTIPLIER")?,
                oversold_multiplier: parse_number(&var, "OVERSOLD_MULTIPLIER")?,
                neutral_multiplier: parse_number(&var, "NEUTRAL_MULTIPLIER")?,
            },
            port,
        })
    }

    pub fn scheduling_enabled(&self) -> bool {
        !self.api_key.is_empty()
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_key", &"***")
            .field("dca_amount", &self.dca_amount)
            .field("dca_frequency", &self.dca_frequency)
            .field("source_currency", &self.source_currency)
            .field("target_currency", &self.target_currency)
            .field("environment", &self.environment)
            .field("dca_buy_days", &self.dca_buy_days)
            .field("buy_levels", &self.buy_levels)
            .field("port", &self.port)
            .finish()
    }
}

fn parse_number<F>(var: &F, key: &str) -> Result<Option<f64>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    var(key)
        .map(|value| match value.trim().parse::<f64>() {
            Ok(number) if number.is_finite() => Ok(number),
            _ => Err(ConfigError::InvalidNumber {
                key: key.to_string(),
                value,
            }),
        })
        .transpose()
}

/// Parse a weekday name such as `MONDAY`, `monday` or `Mon`.
pub fn parse_weekday(name: &str) -> Result<Weekday, ConfigError> {
    let weekday = match name.trim().to_uppercase().as_str() {
        "SUNDAY" | "SUN" => Weekday::Sun,
        "MONDAY" | "MON" => Weekday::Mon,
        "TUESDAY" | "TUE" => Weekday::Tue,
        "WEDNESDAY" | "WED" => Weekday::Wed,
        "THURSDAY" | "THU" => Weekday::Thu,
        "FRIDAY" | "FRI" => Weekday::Fri,
        "SATURDAY" | "SAT" => Weekday::Sat,
        _ => return Err(ConfigError::InvalidWeekday(name.trim().to_string())),
    };
    Ok(weekday)
}
