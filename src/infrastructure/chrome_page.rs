//! Chrome DevTools backed live page
//!
//! Attaches to a browser that is already running with remote debugging
//! enabled and drives the tab the user has open. Nothing is navigated or
//! fetched; probes run as page scripts.

#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use chromiumoxide::{Browser, Page};
use futures::StreamExt;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::infrastructure::live_page::LivePage;
use crate::infrastructure::parsing::{ParsingError, ParsingResult};

const SCROLL_SCRIPT: &str = "window.scrollTo(0, document.body.scrollHeight)";

/// JS string literal for a selector
fn js_string(value: &str) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "\"\"".to_string())
}

fn count_script(selector: &str) -> String {
    format!("document.querySelectorAll({}).length", js_string(selector))
}

/// `offsetParent` is null for elements taken out of layout
fn rendered_script(selector: &str) -> String {
    format!(
        "(() => {{ const el = document.querySelector({}); return !!el && el.offsetParent !== null; }})()",
        js_string(selector)
    )
}

/// Connection to a running browser
pub struct ChromeSession {
    browser: Browser,
    handler_task: JoinHandle<()>,
}

impl ChromeSession {
    /// Connect to a DevTools websocket, e.g. `ws://127.0.0.1:9222/devtools/browser/<id>`
    pub async fn connect(ws_url: &str) -> Result<Self> {
        let (mut browser, mut handler) = Browser::connect(ws_url)
            .await
            .with_context(|| format!("Failed to connect to browser at {}", ws_url))?;

        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    debug!("Browser handler stopped: {}", e);
                    break;
                }
            }
        });

        browser
            .fetch_targets()
            .await
            .context("Failed to list browser targets")?;

        info!("Connected to browser at {}", ws_url);
        Ok(Self { browser, handler_task })
    }

    /// Pick the open tab whose URL contains `pattern`, or the first tab
    pub async fn find_page(&self, pattern: Option<&str>) -> Result<ChromePage> {
        let pages = self.browser.pages().await.context("Failed to list open tabs")?;

        for page in pages {
            let url = page.url().await.ok().flatten().unwrap_or_default();
            if pattern.is_none_or(|p| url.contains(p)) {
                info!("Using tab {}", url);
                return Ok(ChromePage::new(page));
            }
        }

        Err(anyhow!(
            "No open tab matches '{}'",
            pattern.unwrap_or("<any>")
        ))
    }
}

impl Drop for ChromeSession {
    fn drop(&mut self) {
        self.handler_task.abort();
    }
}

/// A single browser tab
#[derive(Clone)]
pub struct ChromePage {
    page: Page,
}

impl ChromePage {
    pub fn new(page: Page) -> Self {
        Self { page }
    }

    async fn eval<T: serde::de::DeserializeOwned>(&self, script: String) -> ParsingResult<T> {
        self.page
            .evaluate(script)
            .await
            .map_err(ParsingError::probe_failed)?
            .into_value::<T>()
            .map_err(ParsingError::probe_failed)
    }
}

#[async_trait]
impl LivePage for ChromePage {
    async fn count(&self, selector: &str) -> ParsingResult<usize> {
        self.eval::<usize>(count_script(selector)).await
    }

    fn scroll_to_bottom(&self) {
        let page = self.page.clone();
        tokio::spawn(async move {
            if let Err(e) = page.evaluate(SCROLL_SCRIPT).await {
                warn!("Scroll request failed: {}", e);
            }
        });
    }

    async fn is_rendered(&self, selector: &str) -> ParsingResult<bool> {
        self.eval::<bool>(rendered_script(selector)).await
    }

    async fn snapshot(&self) -> ParsingResult<String> {
        self.page.content().await.map_err(ParsingError::snapshot_failed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selectors_are_quoted_for_scripts() {
        let script = count_script(r#"[class*="loader"]"#);
        assert_eq!(script, r#"document.querySelectorAll("[class*=\"loader\"]").length"#);
        assert!(rendered_script(".spinner").contains("offsetParent !== null"));
    }
}
