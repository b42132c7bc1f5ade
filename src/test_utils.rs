//! Test utilities for Market Helper
//!
//! A scripted [`LivePage`] that replays item counts and loader visibility
//! tick by tick, plus builders for listing-page HTML fixtures.

use std::sync::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;

use crate::infrastructure::live_page::LivePage;
use crate::infrastructure::parsing::{ParsingError, ParsingResult};

/// Simulated live page.
///
/// Tick `n` is the `n`-th call to [`LivePage::count`]. Counts and loader
/// visibility are read by tick; past the end of a script the last value
/// repeats.
#[derive(Debug, Default)]
pub struct ScriptedPage {
    counts: Vec<usize>,
    loader: Vec<bool>,
    failing_ticks: Vec<u32>,
    html: String,
    ticks: AtomicU32,
    scrolls: AtomicU32,
    loader_probes: Mutex<Vec<u32>>,
}

impl ScriptedPage {
    pub fn new(counts: Vec<usize>) -> Self {
        Self {
            counts,
            ..Default::default()
        }
    }

    /// Loader visibility per tick
    pub fn with_loader(mut self, loader: Vec<bool>) -> Self {
        self.loader = loader;
        self
    }

    /// Loader rendered on every tick before `tick`
    pub fn with_loader_until(self, tick: u32) -> Self {
        let loader = (1..=tick).map(|t| t < tick).collect();
        self.with_loader(loader)
    }

    /// Ticks on which the count probe errors
    pub fn with_failing_ticks(mut self, ticks: Vec<u32>) -> Self {
        self.failing_ticks = ticks;
        self
    }

    pub fn with_html(mut self, html: impl Into<String>) -> Self {
        self.html = html.into();
        self
    }

    pub fn ticks(&self) -> u32 {
        self.ticks.load(Ordering::SeqCst)
    }

    pub fn scrolls(&self) -> u32 {
        self.scrolls.load(Ordering::SeqCst)
    }

    /// Ticks on which the loader was probed
    pub fn loader_probes(&self) -> Vec<u32> {
        self.loader_probes.lock().map(|p| p.clone()).unwrap_or_default()
    }

    fn at<T: Copy + Default>(script: &[T], tick: u32) -> T {
        let index = (tick as usize).saturating_sub(1);
        script
            .get(index)
            .or_else(|| script.last())
            .copied()
            .unwrap_or_default()
    }
}

#[async_trait]
impl LivePage for ScriptedPage {
    async fn count(&self, _selector: &str) -> ParsingResult<usize> {
        let tick = self.ticks.fetch_add(1, Ordering::SeqCst) + 1;
        if self.failing_ticks.contains(&tick) {
            return Err(ParsingError::probe_failed(format!("scripted failure on tick {}", tick)));
        }
        Ok(Self::at(&self.counts, tick))
    }

    fn scroll_to_bottom(&self) {
        self.scrolls.fetch_add(1, Ordering::SeqCst);
    }

    async fn is_rendered(&self, _selector: &str) -> ParsingResult<bool> {
        let tick = self.ticks();
        if let Ok(mut probes) = self.loader_probes.lock() {
            probes.push(tick);
        }
        Ok(Self::at(&self.loader, tick))
    }

    async fn snapshot(&self) -> ParsingResult<String> {
        Ok(self.html.clone())
    }
}

/// Wrap listing nodes in the default `.items` container
pub fn listing_page(items: &[String]) -> String {
    format!(
        "<html><body><div class=\"items\">{}</div></body></html>",
        items.concat()
    )
}

/// Ancestor listing node in the marketplace markup
pub fn ancestor_item(name: &str, category: &str, socket: &str, stat_lines: &[&str], price: &[&str]) -> String {
    format!(
        "<div class=\"item\">\
           <div class=\"row-wrapper\"><span class=\"name\">{name}</span><span class=\"type\">{category}</span></div>\
           <div class=\"ancestor-info\"><span class=\"socket-type\">{socket}</span>\
             <div class=\"required-rank\">Rank <span>10</span></div></div>\
           <div class=\"item__details\"><span class=\"option-name\">{stats}</span></div>\
           <div class=\"price\">{price}</div>\
         </div>",
        stats = stat_lines.join("\n"),
        price = price.join("<i class=\"currency\"></i>"),
    )
}

/// Trigger listing node with one name/value pair per option
pub fn trigger_item(name: &str, category: &str, options: &[(&str, &str)]) -> String {
    let options: String = options
        .iter()
        .map(|(label, value)| {
            format!(
                "<div class=\"option\"><span class=\"option-name\">{label}</span><span class=\"option-value\">{value}</span></div>"
            )
        })
        .collect();
    format!(
        "<div class=\"item\">\
           <div class=\"row-wrapper\"><span class=\"name\">{name}</span><span class=\"type\">{category}</span></div>\
           <div class=\"item__details\">{options}</div>\
         </div>"
    )
}
