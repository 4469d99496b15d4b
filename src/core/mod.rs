//! Core application primitives (DCA run, scheduler, HTTP surface)

pub mod dca;
pub mod http;
pub mod scheduler;

pub use dca::*;
pub use http::*;
pub use scheduler::*;
