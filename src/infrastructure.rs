//! Infrastructure layer for page access, parsing, configuration and logging
//!
//! The listing is reached through the [`LivePage`] seam: a saved snapshot
//! for offline runs, or a browser tab over DevTools with the `chrome`
//! feature.

pub mod config;
pub mod dom;
pub mod live_page;
pub mod logging;
pub mod parsing;
pub mod parsing_error;
pub mod stability_watcher;

#[cfg(feature = "chrome")]
pub mod chrome_page;

// Re-export commonly used items
pub use config::{AppConfig, ConfigManager, WatcherConfig};
pub use live_page::{LivePage, StaticPage};
pub use logging::{get_log_directory, init_logging, init_logging_with_config};
pub use parsing::{ModuleExtractor, ModuleSelectors, ParsingError, ParsingResult};
pub use stability_watcher::{StabilityOutcome, StabilityTracker, StabilityWatcher};

#[cfg(feature = "chrome")]
pub use chrome_page::{ChromePage, ChromeSession};
