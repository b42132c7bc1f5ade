//! Live page collaborator
//!
//! The watcher never talks to a browser directly. Anything that can count
//! elements, scroll, tell whether an element is rendered and hand out an
//! HTML snapshot can drive a run.

use async_trait::async_trait;
use scraper::{Html, Selector};

use crate::infrastructure::dom::DomNode;
use crate::infrastructure::parsing::{ParsingError, ParsingResult};

#[async_trait]
pub trait LivePage: Send + Sync {
    /// Number of elements currently matching `selector`
    async fn count(&self, selector: &str) -> ParsingResult<usize>;

    /// Ask the page to scroll to the bottom. Fire-and-forget: must not wait
    /// for whatever loading the scroll triggers.
    fn scroll_to_bottom(&self);

    /// Whether the first element matching `selector` exists and is rendered.
    /// A missing element is `Ok(false)`, not an error.
    async fn is_rendered(&self, selector: &str) -> ParsingResult<bool>;

    /// Serialized HTML of the current document
    async fn snapshot(&self) -> ParsingResult<String>;
}

/// A page that never changes, backed by a saved HTML document
pub struct StaticPage {
    html: String,
}

impl StaticPage {
    pub fn new(html: impl Into<String>) -> Self {
        Self { html: html.into() }
    }

    fn with_document<T>(&self, selector: &str, f: impl FnOnce(&Html, &Selector) -> T) -> ParsingResult<T> {
        let selector = Selector::parse(selector)
            .map_err(|e| ParsingError::invalid_selector("probe", selector, e))?;
        let document = Html::parse_document(&self.html);
        Ok(f(&document, &selector))
    }
}

#[async_trait]
impl LivePage for StaticPage {
    async fn count(&self, selector: &str) -> ParsingResult<usize> {
        self.with_document(selector, |doc, sel| doc.select(sel).count())
    }

    fn scroll_to_bottom(&self) {}

    async fn is_rendered(&self, selector: &str) -> ParsingResult<bool> {
        self.with_document(selector, |doc, sel| {
            doc.select(sel).next().is_some_and(|el| el.is_rendered())
        })
    }

    async fn snapshot(&self) -> ParsingResult<String> {
        Ok(self.html.clone())
    }
}
