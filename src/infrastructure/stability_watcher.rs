//! Page stabilization for lazily loaded listings
//!
//! The marketplace keeps appending items while the user scrolls and there is
//! no "done" signal. The watcher samples the listing at a fixed interval,
//! scrolls to the bottom on every sample, and declares the list complete once
//! the item count has held still for several consecutive samples while no
//! loading indicator is rendered.

use std::time::Duration;

use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tracing::{debug, info, warn};

use crate::infrastructure::config::WatcherConfig;
use crate::infrastructure::live_page::LivePage;
use crate::infrastructure::parsing::ModuleSelectors;

/// Consecutive-sample counter behind the watcher
#[derive(Debug, Clone)]
pub struct StabilityTracker {
    required_stable_ticks: u32,
    last_item_count: usize,
    stable_ticks: u32,
}

impl StabilityTracker {
    pub fn new(required_stable_ticks: u32) -> Self {
        Self {
            required_stable_ticks,
            last_item_count: 0,
            stable_ticks: 0,
        }
    }

    /// Feed one sample; returns `true` once the list counts as loaded
    pub fn observe(&mut self, item_count: usize, loader_visible: bool) -> bool {
        if item_count == self.last_item_count {
            self.stable_ticks += 1;
        } else {
            self.stable_ticks = 0;
            self.last_item_count = item_count;
        }
        self.stable_ticks >= self.required_stable_ticks && !loader_visible
    }

    pub fn last_item_count(&self) -> usize {
        self.last_item_count
    }

    pub fn stable_ticks(&self) -> u32 {
        self.stable_ticks
    }
}

/// How a watch ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StabilityOutcome {
    /// Growth stopped and no loader is visible
    Stable { ticks: u32, item_count: usize },
    /// The tick bound was reached first; the list may be incomplete
    GaveUp { ticks: u32, item_count: usize },
}

impl StabilityOutcome {
    pub fn is_stable(&self) -> bool {
        matches!(self, Self::Stable { .. })
    }

    pub fn ticks(&self) -> u32 {
        match self {
            Self::Stable { ticks, .. } | Self::GaveUp { ticks, .. } => *ticks,
        }
    }

    pub fn item_count(&self) -> usize {
        match self {
            Self::Stable { item_count, .. } | Self::GaveUp { item_count, .. } => *item_count,
        }
    }
}

pub struct StabilityWatcher {
    poll_interval: Duration,
    required_stable_ticks: u32,
    max_ticks: Option<u32>,
    item_selector: String,
    loader_selector: String,
}

impl StabilityWatcher {
    pub fn new(config: &WatcherConfig, selectors: &ModuleSelectors) -> Self {
        Self {
            poll_interval: config.poll_interval(),
            required_stable_ticks: config.stable_ticks_required,
            max_ticks: config.max_ticks,
            item_selector: selectors.item.clone(),
            loader_selector: selectors.loader.clone(),
        }
    }

    /// Sample the page until the listing stops growing.
    ///
    /// Never fails: probe errors are logged and the sample is treated as
    /// uninformative. The first sample is taken one interval after the call.
    pub async fn wait_until_stable<P: LivePage + ?Sized>(&self, page: &P) -> StabilityOutcome {
        let mut ticker = interval_at(Instant::now() + self.poll_interval, self.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut tracker = StabilityTracker::new(self.required_stable_ticks);
        let mut tick: u32 = 0;

        info!(
            "Waiting for listing to stabilize (interval {:?}, {} stable samples)",
            self.poll_interval, self.required_stable_ticks
        );

        loop {
            ticker.tick().await;
            tick += 1;

            let count = page.count(&self.item_selector).await;
            page.scroll_to_bottom();

            match count {
                Ok(item_count) => {
                    let loader_visible = page
                        .is_rendered(&self.loader_selector)
                        .await
                        .unwrap_or_else(|e| {
                            warn!("Loader probe failed on tick {}: {}", tick, e);
                            false
                        });

                    let stable = tracker.observe(item_count, loader_visible);
                    debug!(
                        "Tick {}: {} items, stable for {}, loader visible: {}",
                        tick,
                        item_count,
                        tracker.stable_ticks(),
                        loader_visible
                    );

                    if stable {
                        info!("Listing stable after {} ticks with {} items", tick, item_count);
                        return StabilityOutcome::Stable { ticks: tick, item_count };
                    }
                }
                Err(e) => warn!("Item count probe failed on tick {}: {}", tick, e),
            }

            if self.max_ticks.is_some_and(|max| tick >= max) {
                warn!(
                    "Listing still not stable after {} ticks; continuing with {} items",
                    tick,
                    tracker.last_item_count()
                );
                return StabilityOutcome::GaveUp {
                    ticks: tick,
                    item_count: tracker.last_item_count(),
                };
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn growth_resets_the_stable_counter() {
        let mut tracker = StabilityTracker::new(3);
        assert!(!tracker.observe(5, false));
        assert!(!tracker.observe(5, false));
        assert!(!tracker.observe(8, false));
        assert_eq!(tracker.stable_ticks(), 0);
        assert!(!tracker.observe(8, false));
        assert!(!tracker.observe(8, false));
        assert!(tracker.observe(8, false));
        assert_eq!(tracker.last_item_count(), 8);
    }

    #[test]
    fn visible_loader_blocks_completion() {
        let mut tracker = StabilityTracker::new(3);
        for _ in 0..10 {
            assert!(!tracker.observe(0, true));
        }
        assert!(tracker.observe(0, false));
    }

    #[test]
    fn empty_page_counts_as_stable_from_the_start() {
        let mut tracker = StabilityTracker::new(3);
        assert!(!tracker.observe(0, false));
        assert!(!tracker.observe(0, false));
        assert!(tracker.observe(0, false));
    }
}
