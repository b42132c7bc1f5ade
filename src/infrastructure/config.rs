//! Configuration infrastructure
//!
//! Settings live in a JSON file under the user's config directory and are
//! created with defaults on first run. A file given explicitly on the command
//! line is layered with `MARKET_HELPER_*` environment variables instead.

#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tokio::fs;
use tracing::{info, warn};

use crate::infrastructure::parsing::{ModuleExtractor, ModuleSelectors};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load config from file: {source}")]
    FileLoad {
        #[from]
        source: config::ConfigError,
    },

    #[error("Configuration validation failed: {message}")]
    Validation { message: String },
}

impl ConfigError {
    fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Page stabilization timing
    pub watcher: WatcherConfig,

    /// CSS selectors for the listing page
    pub selectors: ModuleSelectors,

    pub logging: LoggingConfig,

    /// Where extraction results are written
    pub output: OutputConfig,
}

/// Timing of the stabilization poll loop
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WatcherConfig {
    /// Delay between samples in milliseconds
    pub poll_interval_ms: u64,

    /// Consecutive unchanged samples needed before the list counts as loaded
    pub stable_ticks_required: u32,

    /// Give up after this many samples; `null` waits forever
    pub max_ticks: Option<u32>,
}

impl WatcherConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: "error", "warn", "info", "debug", "trace"
    pub level: String,

    /// Enable JSON formatted logs in the log file
    pub json_format: bool,

    /// Enable console output (stderr)
    pub console_output: bool,

    /// Enable file output
    pub file_output: bool,

    /// Log directory; defaults to `logs/` next to the executable
    pub log_dir: Option<PathBuf>,

    pub file_name: String,

    /// Per-target level overrides, e.g. "html5ever": "warn"
    pub module_filters: HashMap<String, String>,
}

/// Result export settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output file when none is given on the command line
    pub path: PathBuf,

    pub pretty: bool,
}

impl Default for WatcherConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: defaults::POLL_INTERVAL_MS,
            stable_ticks_required: defaults::STABLE_TICKS_REQUIRED,
            max_ticks: Some(defaults::MAX_TICKS),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::LOG_LEVEL.to_string(),
            json_format: defaults::LOG_JSON_FORMAT,
            console_output: defaults::LOG_CONSOLE_OUTPUT,
            file_output: defaults::LOG_FILE_OUTPUT,
            log_dir: None,
            file_name: defaults::LOG_FILE_NAME.to_string(),
            module_filters: {
                let mut filters = HashMap::new();
                filters.insert("html5ever".to_string(), "warn".to_string());
                filters.insert("selectors".to_string(), "warn".to_string());
                filters.insert("chromiumoxide".to_string(), "warn".to_string());
                filters.insert("tungstenite".to_string(), "warn".to_string());
                filters
            },
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(defaults::OUTPUT_FILE),
            pretty: true,
        }
    }
}

impl AppConfig {
    /// Load from an explicit file, overridden by `MARKET_HELPER_*` variables.
    ///
    /// Nested keys use a double underscore, e.g.
    /// `MARKET_HELPER_WATCHER__POLL_INTERVAL_MS=500`.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        Self::from_layers(path, Self::environment())
    }

    /// `MARKET_HELPER_*` variable source
    fn environment() -> config::Environment {
        config::Environment::with_prefix(defaults::ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
    }

    fn from_layers(path: &Path, environment: config::Environment) -> Result<Self, ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path.to_path_buf()))
            .add_source(environment)
            .build()?;

        let config: Self = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.watcher.poll_interval_ms == 0 {
            return Err(ConfigError::validation("watcher.poll_interval_ms must be greater than 0"));
        }

        if self.watcher.stable_ticks_required == 0 {
            return Err(ConfigError::validation(
                "watcher.stable_ticks_required must be greater than 0",
            ));
        }

        if self.watcher.max_ticks == Some(0) {
            return Err(ConfigError::validation(
                "watcher.max_ticks must be greater than 0 or null",
            ));
        }

        ModuleExtractor::with_config(&self.selectors)
            .map_err(|e| ConfigError::validation(e.to_string()))?;

        scraper::Selector::parse(&self.selectors.loader).map_err(|e| {
            ConfigError::validation(format!("invalid loader selector '{}': {}", self.selectors.loader, e))
        })?;

        Ok(())
    }
}

/// Configuration manager for loading and saving settings
pub struct ConfigManager {
    pub config_path: PathBuf,
}

impl ConfigManager {
    /// Get the application configuration directory
    pub fn get_config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to get user config directory")?
            .join(defaults::APP_DIR_NAME);

        Ok(config_dir)
    }

    /// Manager for the per-user configuration file
    pub fn new() -> Result<Self> {
        let config_path = Self::get_config_dir()?.join(defaults::CONFIG_FILE_NAME);
        Ok(Self { config_path })
    }

    pub fn with_path(config_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
        }
    }

    /// Load configuration from file, creating default if it doesn't exist
    pub async fn load_config(&self) -> Result<AppConfig> {
        if !self.config_path.exists() {
            info!("Configuration file not found, creating default: {:?}", self.config_path);
            let default_config = AppConfig::default();
            self.save_config(&default_config).await?;
            return Ok(default_config);
        }

        let content = fs::read_to_string(&self.config_path)
            .await
            .context("Failed to read configuration file")?;

        let parsed = serde_json::from_str::<AppConfig>(&content)
            .map_err(anyhow::Error::from)
            .and_then(|config| {
                config.validate()?;
                Ok(config)
            });

        match parsed {
            Ok(config) => {
                info!("Loaded configuration from: {:?}", self.config_path);
                Ok(config)
            }
            Err(e) => {
                warn!("Configuration file unusable: {}", e);

                let backup_path = self.config_path.with_extension("json.corrupted");
                if let Err(copy_err) = fs::copy(&self.config_path, &backup_path).await {
                    warn!("Failed to create backup of corrupted config: {}", copy_err);
                } else {
                    info!("Backed up corrupted config to: {:?}", backup_path);
                }

                self.reset_to_defaults().await
            }
        }
    }

    /// Save configuration to file
    pub async fn save_config(&self, config: &AppConfig) -> Result<()> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent)
                .await
                .context("Failed to create config directory")?;
        }

        let content =
            serde_json::to_string_pretty(config).context("Failed to serialize configuration")?;

        fs::write(&self.config_path, content)
            .await
            .context("Failed to write configuration file")?;

        info!("Saved configuration to: {:?}", self.config_path);
        Ok(())
    }

    /// Reset configuration to defaults (useful for troubleshooting)
    pub async fn reset_to_defaults(&self) -> Result<AppConfig> {
        info!("Resetting configuration to defaults");

        let default_config = AppConfig::default();
        self.save_config(&default_config).await?;
        Ok(default_config)
    }

    pub fn config_path(&self) -> &PathBuf {
        &self.config_path
    }
}

pub mod defaults {
    /// Directory name under the user config dir
    pub const APP_DIR_NAME: &str = "market-helper";

    pub const CONFIG_FILE_NAME: &str = "market_helper_config.json";

    /// Prefix for environment overrides
    pub const ENV_PREFIX: &str = "MARKET_HELPER";

    /// Delay between stabilization samples
    pub const POLL_INTERVAL_MS: u64 = 700;

    /// Unchanged samples required before the list counts as loaded
    pub const STABLE_TICKS_REQUIRED: u32 = 3;

    /// Roughly seven minutes at the default interval
    pub const MAX_TICKS: u32 = 600;

    pub const OUTPUT_FILE: &str = "market_data.json";

    pub const LOG_LEVEL: &str = "info";
    pub const LOG_JSON_FORMAT: bool = false;
    pub const LOG_CONSOLE_OUTPUT: bool = true;
    pub const LOG_FILE_OUTPUT: bool = false;
    pub const LOG_FILE_NAME: &str = "market-helper.log";
}
