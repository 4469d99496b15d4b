//! Scheduled DCA bot that sizes each purchase from the market state.
//!
//! The indicator core (`indicators`, `signals`) is pure and synchronous; the
//! rest wires it to CoinGecko price history, the Strike exchange API, a cron
//! schedule and a small HTTP surface.

pub mod config;
pub mod core;
pub mod indicators;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod services;
pub mod signals;
