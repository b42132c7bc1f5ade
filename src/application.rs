//! Application layer module
//!
//! Use cases that wire the watcher and extractor into a run and hand the
//! result off.

pub mod export;
pub mod market_helper;

pub use market_helper::{MarketHelper, RunReport};
