//! Command line interface
//!
//! `snapshot` extracts from a saved listing page. `live` attaches to a
//! running browser, waits for the listing to finish loading and extracts
//! from the open tab (requires the `chrome` feature).

#![allow(clippy::uninlined_format_args)]

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::info;

use crate::application::MarketHelper;
use crate::application::export::write_result;
use crate::domain::ExtractionResult;
use crate::infrastructure::config::{AppConfig, ConfigManager};

#[derive(Parser, Debug)]
#[command(name = "market-helper", version)]
#[command(about = "Extract marketplace module listings into JSON")]
pub struct Cli {
    /// Configuration file; defaults to the per-user settings file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the configured log level
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Extract modules from a saved HTML page
    Snapshot {
        /// Saved listing page
        html: PathBuf,

        /// Output file; defaults to the configured path
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Wait for a live listing to stabilize, then extract it
    #[cfg(feature = "chrome")]
    Live {
        /// DevTools websocket URL of a running browser
        #[arg(long)]
        ws: String,

        /// Use the first tab whose URL contains this text
        #[arg(long)]
        tab: Option<String>,

        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

impl Cli {
    /// Resolve configuration: explicit file plus environment, else the user settings file
    pub async fn load_config(&self) -> Result<AppConfig> {
        let mut config = match &self.config {
            Some(path) => AppConfig::from_file(path)?,
            None => ConfigManager::new()?.load_config().await?,
        };

        if let Some(level) = &self.log_level {
            config.logging.level = level.clone();
        }

        Ok(config)
    }
}

/// Run the selected command and return the result that was written
pub async fn execute(cli: &Cli, config: &AppConfig) -> Result<ExtractionResult> {
    match &cli.command {
        Command::Snapshot { html, output } => {
            let output = output.as_deref().unwrap_or(&config.output.path);
            extract_snapshot_file(config, html, output).await
        }
        #[cfg(feature = "chrome")]
        Command::Live { ws, tab, output } => {
            let output = output.as_deref().unwrap_or(&config.output.path);
            extract_live(config, ws, tab.as_deref(), output).await
        }
    }
}

/// Extract from a saved page and write the result
pub async fn extract_snapshot_file(config: &AppConfig, html_path: &Path, output: &Path) -> Result<ExtractionResult> {
    let helper = MarketHelper::new(config)?;

    let result = match fs::read_to_string(html_path).await {
        Ok(html) => {
            info!("Extracting from snapshot {:?}", html_path);
            helper.extract_snapshot(&html)
        }
        Err(e) => ExtractionResult::failed(format!("Failed to read {:?}: {}", html_path, e)),
    };

    write_result(&result, output, config.output.pretty).await?;
    Ok(result)
}

/// Drive an open browser tab until the listing is stable, then extract it.
///
/// Ctrl-C abandons the wait; nothing is written in that case.
#[cfg(feature = "chrome")]
pub async fn extract_live(config: &AppConfig, ws_url: &str, tab: Option<&str>, output: &Path) -> Result<ExtractionResult> {
    use crate::infrastructure::chrome_page::ChromeSession;

    let helper = MarketHelper::new(config)?;
    let session = ChromeSession::connect(ws_url).await?;
    let page = session.find_page(tab).await?;

    let report = tokio::select! {
        report = helper.run(&page) => report,
        _ = tokio::signal::ctrl_c() => {
            anyhow::bail!("Interrupted while waiting for the listing to load");
        }
    };

    info!(
        "Listing watch finished after {} ticks ({} items)",
        report.stability.ticks(),
        report.stability.item_count()
    );

    write_result(&report.result, output, config.output.pretty).await?;
    Ok(report.result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{ancestor_item, listing_page};
    use tempfile::TempDir;

    #[test]
    fn parses_snapshot_command() {
        let cli = Cli::try_parse_from([
            "market-helper",
            "--log-level",
            "debug",
            "snapshot",
            "page.html",
            "-o",
            "out.json",
        ])
        .unwrap();

        assert_eq!(cli.log_level.as_deref(), Some("debug"));
        match cli.command {
            Command::Snapshot { html, output } => {
                assert_eq!(html, PathBuf::from("page.html"));
                assert_eq!(output, Some(PathBuf::from("out.json")));
            }
            #[allow(unreachable_patterns)]
            _ => panic!("expected snapshot command"),
        }
    }

    #[test]
    fn snapshot_requires_a_page() {
        assert!(Cli::try_parse_from(["market-helper", "snapshot"]).is_err());
    }

    #[tokio::test]
    async fn snapshot_file_is_extracted_and_written() {
        let dir = TempDir::new().unwrap();
        let html_path = dir.path().join("page.html");
        let output = dir.path().join("market_data.json");
        let html = listing_page(&[ancestor_item("Fire Core", "Ancestor", "Crimson", &["(+) ATK 5"], &["100"])]);
        std::fs::write(&html_path, html).unwrap();

        let result = extract_snapshot_file(&AppConfig::default(), &html_path, &output)
            .await
            .unwrap();

        assert_eq!(result.modules().map(<[_]>::len), Some(1));
        let written = std::fs::read_to_string(&output).unwrap();
        assert!(written.contains("Fire Core"));
    }

    #[tokio::test]
    async fn unreadable_snapshot_becomes_error_result() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("market_data.json");

        let result = extract_snapshot_file(&AppConfig::default(), &dir.path().join("missing.html"), &output)
            .await
            .unwrap();

        assert!(result.is_error());
        let written = std::fs::read_to_string(&output).unwrap();
        assert!(written.contains("\"error\""));
    }
}
