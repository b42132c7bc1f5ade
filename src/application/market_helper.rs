//! Market helper use case
//!
//! One run: wait for the live listing to finish loading, snapshot the page,
//! extract every module. Anything that stops the run after the watcher
//! becomes the single error descriptor of the result.

use tracing::{info, warn};

use crate::domain::ExtractionResult;
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::live_page::LivePage;
use crate::infrastructure::parsing::{ModuleExtractor, ParsingResult};
use crate::infrastructure::stability_watcher::{StabilityOutcome, StabilityWatcher};

/// Result of a live run together with how the wait ended
#[derive(Debug, Clone)]
pub struct RunReport {
    pub stability: StabilityOutcome,
    pub result: ExtractionResult,
}

pub struct MarketHelper {
    watcher: StabilityWatcher,
    extractor: ModuleExtractor,
}

impl MarketHelper {
    pub fn new(config: &AppConfig) -> ParsingResult<Self> {
        Ok(Self {
            watcher: StabilityWatcher::new(&config.watcher, &config.selectors),
            extractor: ModuleExtractor::with_config(&config.selectors)?,
        })
    }

    /// Wait for the listing to stabilize, then extract from a snapshot
    pub async fn run<P: LivePage + ?Sized>(&self, page: &P) -> RunReport {
        let stability = self.watcher.wait_until_stable(page).await;
        if !stability.is_stable() {
            warn!(
                "Extracting from a listing that did not stabilize ({} items after {} ticks)",
                stability.item_count(),
                stability.ticks()
            );
        }

        let result = match page.snapshot().await {
            Ok(html) => self.extract_snapshot(&html),
            Err(e) => ExtractionResult::failed(e),
        };

        RunReport { stability, result }
    }

    /// Extract from already-loaded HTML without watching
    pub fn extract_snapshot(&self, html: &str) -> ExtractionResult {
        let result = ExtractionResult::from_result(self.extractor.extract_html(html));

        match result.error() {
            Some(error) => warn!("Error parsing page: {}", error),
            None => {
                let (ancestors, triggers) = result.schema_counts();
                info!(
                    "Parsed {} modules ({} ancestor, {} trigger)",
                    ancestors + triggers,
                    ancestors,
                    triggers
                );
            }
        }

        result
    }
}
