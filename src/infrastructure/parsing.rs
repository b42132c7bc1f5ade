//! HTML parsing infrastructure for marketplace module listings
//!
//! A listing page mixes two module layouts. Every node is classified by its
//! category label and handed to the matching [`SchemaParser`]; the fields
//! both layouts share are read once by [`CommonFieldParser`].

pub mod ancestor_parser;
pub mod common_fields;
pub mod config;
pub mod error;
pub mod module_list_parser;
pub mod trigger_parser;

pub use ancestor_parser::AncestorParser;
pub use common_fields::{CommonFieldParser, CommonFields};
pub use config::{AncestorSelectors, ModuleSelectors, TriggerSelectors};
pub use error::{ParsingError, ParsingResult};
pub use module_list_parser::ModuleExtractor;
pub use trigger_parser::TriggerParser;

use crate::domain::StatLine;
use crate::infrastructure::dom::DomNode;
use scraper::Selector;
use tracing::{debug, warn};

/// A stat together with the attribute name it contributes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedStat {
    pub stat: StatLine,
    pub attribute: String,
}

/// Schema-specific part of a module record
pub trait SchemaParser {
    fn socket_type<N: DomNode>(&self, item: &N) -> String;

    fn required_rank<N: DomNode>(&self, item: &N) -> String;

    /// Stats in DOM order
    fn stats<N: DomNode>(&self, item: &N) -> Vec<ParsedStat>;
}

/// Compile a single selector; a bad selector is a configuration error
pub(crate) fn compile_selector(field: &str, selector: &str) -> ParsingResult<Selector> {
    Selector::parse(selector).map_err(|e| ParsingError::invalid_selector(field, selector, e))
}

/// Compile a list of alternative selectors.
///
/// Invalid entries are skipped with a warning as long as at least one
/// alternative survives. An empty list stays empty.
pub(crate) fn compile_selectors(field: &str, selectors: &[String]) -> ParsingResult<Vec<Selector>> {
    let mut compiled = Vec::with_capacity(selectors.len());
    let mut errors = Vec::new();

    for selector in selectors {
        match Selector::parse(selector) {
            Ok(s) => compiled.push(s),
            Err(e) => {
                warn!("Failed to compile {} selector '{}': {}", field, selector, e);
                errors.push(format!("'{}': {}", selector, e));
            }
        }
    }

    if compiled.is_empty() && !errors.is_empty() {
        return Err(ParsingError::invalid_selector(
            field,
            &selectors.join(", "),
            errors.join(", "),
        ));
    }

    if !errors.is_empty() {
        debug!("Some {} selectors failed to compile: {}", field, errors.join(", "));
    }

    Ok(compiled)
}

/// Compile alternatives into one selector group.
///
/// The group matches whichever alternative comes first in document order.
/// An empty list compiles to `None`.
pub(crate) fn compile_selector_group(field: &str, selectors: &[String]) -> ParsingResult<Option<Selector>> {
    if selectors.is_empty() {
        return Ok(None);
    }
    compile_selector(field, &selectors.join(", ")).map(Some)
}
