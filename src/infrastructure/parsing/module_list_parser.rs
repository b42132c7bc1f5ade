//! Module list extraction
//!
//! Walks every listing node of a stabilized page and turns it into a
//! [`ModuleRecord`]. Per-node parsing never fails; only a missing listing
//! container aborts the run.

use super::{
    AncestorParser, CommonFieldParser, CommonFields, ModuleSelectors, ParsingError, ParsingResult,
    SchemaParser, TriggerParser, compile_selector,
};
use crate::domain::{AttributeSet, ModuleRecord, ModuleSchema};
use crate::infrastructure::dom::DomNode;
use scraper::{Html, Selector};
use tracing::{debug, info};

/// Parser for every module entry on a listing page
pub struct ModuleExtractor {
    container_selector: String,
    container: Selector,
    item: Selector,
    common: CommonFieldParser,
    ancestor: AncestorParser,
    trigger: TriggerParser,
}

impl ModuleExtractor {
    /// Create an extractor with the default marketplace selectors
    pub fn new() -> ParsingResult<Self> {
        Self::with_config(&ModuleSelectors::default())
    }

    pub fn with_config(selectors: &ModuleSelectors) -> ParsingResult<Self> {
        Ok(Self {
            container_selector: selectors.container.clone(),
            container: compile_selector("container", &selectors.container)?,
            item: compile_selector("item", &selectors.item)?,
            common: CommonFieldParser::with_config(selectors)?,
            ancestor: AncestorParser::with_config(&selectors.ancestor)?,
            trigger: TriggerParser::with_config(&selectors.trigger)?,
        })
    }

    /// Parse an HTML snapshot of the page
    pub fn extract_html(&self, html: &str) -> ParsingResult<Vec<ModuleRecord>> {
        let document = Html::parse_document(html);
        self.extract(&document.root_element())
    }

    /// Extract one record per listing node, in DOM order.
    ///
    /// The root itself is never matched, only its descendants.
    pub fn extract<N: DomNode>(&self, root: &N) -> ParsingResult<Vec<ModuleRecord>> {
        if root.select_one(&self.container).is_none() {
            return Err(ParsingError::container_not_found(&self.container_selector));
        }

        let items = root.select_all(&self.item);
        debug!("Found {} listing nodes", items.len());

        let modules: Vec<ModuleRecord> = items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                let record = self.parse_item(item);
                debug!(
                    "Parsed {} module at index {}: '{}' ({} stats)",
                    record.schema(),
                    index,
                    record.name,
                    record.stats.len()
                );
                record
            })
            .collect();

        info!("Extracted {} modules", modules.len());
        Ok(modules)
    }

    /// Classify a node and parse it with the matching schema
    pub fn parse_item<N: DomNode>(&self, item: &N) -> ModuleRecord {
        let common = self.common.parse(item);
        match ModuleSchema::classify(&common.category) {
            ModuleSchema::Ancestor => build_record(&self.ancestor, item, common),
            ModuleSchema::Trigger => build_record(&self.trigger, item, common),
        }
    }

    /// Schema a node would be parsed with
    pub fn classify<N: DomNode>(&self, item: &N) -> ModuleSchema {
        ModuleSchema::classify(&self.common.category(item))
    }
}

fn build_record<P: SchemaParser, N: DomNode>(parser: &P, item: &N, common: CommonFields) -> ModuleRecord {
    let parsed = parser.stats(item);
    let mut attributes = AttributeSet::new();
    let mut stats = Vec::with_capacity(parsed.len());
    for p in parsed {
        attributes.insert(&p.attribute);
        stats.push(p.stat);
    }

    ModuleRecord {
        name: common.name,
        category: common.category,
        socket_type: parser.socket_type(item),
        required_rank: parser.required_rank(item),
        price: common.price,
        platform: common.platform,
        reroll_count: common.reroll_count,
        seller_name: common.seller_name,
        seller_status: common.seller_status,
        seller_rank: common.seller_rank,
        reg_date: common.reg_date,
        attributes: attributes.into_vec(),
        stats,
    }
}
