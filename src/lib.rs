//! Market Helper - marketplace module listing extractor
//!
//! Waits for a lazily loaded listing page to finish growing, then turns
//! every listing node into a [`domain::ModuleRecord`]. Ancestor and Trigger
//! modules use different markup and are parsed by separate schema parsers.

// Module declarations
pub mod domain;
pub mod application;
pub mod infrastructure;
pub mod commands;

#[doc(hidden)]
pub mod test_utils;

pub use application::{MarketHelper, RunReport};
pub use domain::{ExtractionResult, ModuleRecord, ModuleSchema, StatLine};
