//! Market state classification and buy level selection.

pub mod buy_level;
pub mod market_state;

pub use buy_level::*;
pub use market_state::*;
