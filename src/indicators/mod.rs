//! Technical indicators computed over a complete, time-ordered price batch.

pub mod momentum;
pub mod trend;

pub use momentum::*;
pub use trend::*;
