//! Fields shared by ancestor and trigger listings

use super::{ModuleSelectors, ParsingResult, compile_selector, compile_selectors};
use crate::infrastructure::dom::{DomNode, first_non_empty_text, text_of};
use scraper::Selector;

/// Values every module record carries regardless of schema
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommonFields {
    pub name: String,
    pub category: String,
    pub price: String,
    pub platform: String,
    pub reroll_count: String,
    pub seller_name: String,
    pub seller_status: String,
    pub seller_rank: String,
    pub reg_date: String,
}

/// Reads the schema-independent fields of a listing node
pub struct CommonFieldParser {
    name: Vec<Selector>,
    category: Selector,
    platform: Selector,
    reroll_count: Selector,
    seller_nickname: Selector,
    seller_status: Selector,
    seller_rank: Selector,
    price: Selector,
    reg_date: Selector,
}

impl CommonFieldParser {
    pub fn with_config(selectors: &ModuleSelectors) -> ParsingResult<Self> {
        Ok(Self {
            name: compile_selectors("name", &selectors.name)?,
            category: compile_selector("category", &selectors.category)?,
            platform: compile_selector("platform", &selectors.platform)?,
            reroll_count: compile_selector("reroll_count", &selectors.reroll_count)?,
            seller_nickname: compile_selector("seller_nickname", &selectors.seller_nickname)?,
            seller_status: compile_selector("seller_status", &selectors.seller_status)?,
            seller_rank: compile_selector("seller_rank", &selectors.seller_rank)?,
            price: compile_selector("price", &selectors.price)?,
            reg_date: compile_selector("reg_date", &selectors.reg_date)?,
        })
    }

    /// Category label only; used for classification before full parsing
    pub fn category<N: DomNode>(&self, item: &N) -> String {
        text_of(item, &self.category)
    }

    pub fn parse<N: DomNode>(&self, item: &N) -> CommonFields {
        let (seller_name, seller_status) = self.seller(item);
        CommonFields {
            name: first_non_empty_text(item, &self.name),
            category: self.category(item),
            price: self.price(item),
            platform: text_of(item, &self.platform),
            reroll_count: text_of(item, &self.reroll_count),
            seller_name,
            seller_status,
            seller_rank: text_of(item, &self.seller_rank),
            reg_date: text_of(item, &self.reg_date),
        }
    }

    /// Seller name and online marker from the nickname node.
    ///
    /// The name is the leading text node; when the nickname starts with an
    /// element instead, the whole nickname text is used.
    fn seller<N: DomNode>(&self, item: &N) -> (String, String) {
        let Some(nick) = item.select_one(&self.seller_nickname) else {
            return (String::new(), String::new());
        };

        let name = match nick.leading_text() {
            Some(text) => text.trim().to_string(),
            None if nick.has_children() => nick.text().trim().to_string(),
            None => String::new(),
        };
        let status = text_of(&nick, &self.seller_status);

        (name, status)
    }

    /// Direct text segments of the price node, currency icons excluded.
    /// Every segment is kept, so indentation-only text joins as an empty part.
    fn price<N: DomNode>(&self, item: &N) -> String {
        item.select_one(&self.price)
            .map(|price| {
                price
                    .direct_text()
                    .iter()
                    .map(|segment| segment.trim())
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .unwrap_or_default()
    }
}
