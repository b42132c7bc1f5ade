//! Ancestor module parser
//!
//! Ancestor listings expose a socket type and a required rank, and encode
//! stats as signed lines such as `(+)Power [10-20]`. One option element may
//! carry several lines separated by line breaks.

use super::{AncestorSelectors, ParsedStat, ParsingResult, SchemaParser, compile_selector, compile_selectors};
use crate::domain::StatLine;
use crate::infrastructure::dom::{DomNode, text_of_first_match};
use scraper::Selector;

const POSITIVE_MARKER: &str = "(+)";
const NEGATIVE_MARKER: &str = "(-)";

pub struct AncestorParser {
    socket_type: Vec<Selector>,
    required_rank: Vec<Selector>,
    option_name: Selector,
}

impl AncestorParser {
    pub fn with_config(selectors: &AncestorSelectors) -> ParsingResult<Self> {
        Ok(Self {
            socket_type: compile_selectors("ancestor.socket_type", &selectors.socket_type)?,
            required_rank: compile_selectors("ancestor.required_rank", &selectors.required_rank)?,
            option_name: compile_selector("ancestor.option_name", &selectors.option_name)?,
        })
    }
}

impl SchemaParser for AncestorParser {
    fn socket_type<N: DomNode>(&self, item: &N) -> String {
        text_of_first_match(item, &self.socket_type)
    }

    fn required_rank<N: DomNode>(&self, item: &N) -> String {
        text_of_first_match(item, &self.required_rank)
    }

    fn stats<N: DomNode>(&self, item: &N) -> Vec<ParsedStat> {
        item.select_all(&self.option_name)
            .iter()
            .flat_map(|option| parse_stat_block(&option.text()))
            .collect()
    }
}

/// Split an option element's text into stat lines, skipping blank lines
pub fn parse_stat_block(text: &str) -> Vec<ParsedStat> {
    text.split('\n').filter_map(parse_stat_line).collect()
}

/// Parse one stat line; `None` for blank lines
pub fn parse_stat_line(line: &str) -> Option<ParsedStat> {
    let raw = line.trim();
    if raw.is_empty() {
        return None;
    }

    Some(ParsedStat {
        stat: StatLine {
            raw: raw.to_string(),
            positive: raw.starts_with(POSITIVE_MARKER),
            negative: raw.starts_with(NEGATIVE_MARKER),
        },
        attribute: attribute_name(raw),
    })
}

/// Attribute name of a stat line: sign marker and value range removed
pub fn attribute_name(raw: &str) -> String {
    let unsigned = raw
        .strip_prefix(POSITIVE_MARKER)
        .or_else(|| raw.strip_prefix(NEGATIVE_MARKER))
        .unwrap_or(raw);

    unsigned
        .split('[')
        .next()
        .unwrap_or_default()
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use scraper::Html;

    #[rstest]
    #[case("(+)Power [10-20]", true, false, "Power")]
    #[case("(-)Speed [1-2]", false, true, "Speed")]
    #[case("Crit Rate [3-5]", false, false, "Crit Rate")]
    #[case("  (+) Fire Damage  ", true, false, "Fire Damage")]
    #[case("(+-)Odd", false, false, "(+-)Odd")]
    fn polarity_and_attribute(
        #[case] line: &str,
        #[case] positive: bool,
        #[case] negative: bool,
        #[case] attribute: &str,
    ) {
        let parsed = parse_stat_line(line).unwrap();
        assert_eq!(parsed.stat.raw, line.trim());
        assert_eq!(parsed.stat.positive, positive);
        assert_eq!(parsed.stat.negative, negative);
        assert_eq!(parsed.attribute, attribute);
    }

    #[test]
    fn block_splits_on_crlf_and_lf() {
        let stats = parse_stat_block("(+)Power [10-20]\r\n\n  \n(-)Speed [1-2]\n");
        let raws: Vec<_> = stats.iter().map(|s| s.stat.raw.as_str()).collect();
        assert_eq!(raws, vec!["(+)Power [10-20]", "(-)Speed [1-2]"]);
    }

    #[test]
    fn socket_type_prefers_ancestor_info() {
        let parser = AncestorParser::with_config(&AncestorSelectors::default()).unwrap();
        let html = Html::parse_fragment(
            r#"<div class="item__info"><span class="socket-type">Blue</span></div>
               <div class="ancestor-info"><span class="socket-type">Red</span>
                 <div class="required-rank">Rank <span>12</span></div></div>"#,
        );
        let root = html.root_element();
        assert_eq!(parser.socket_type(&root), "Red");
        assert_eq!(parser.required_rank(&root), "12");
    }

    #[test]
    fn socket_type_falls_back_to_item_info() {
        let parser = AncestorParser::with_config(&AncestorSelectors::default()).unwrap();
        let html = Html::parse_fragment(r#"<div class="item__info"><span class="socket-type">Blue</span></div>"#);
        let root = html.root_element();
        assert_eq!(parser.socket_type(&root), "Blue");
        assert_eq!(parser.required_rank(&root), "");
    }

    #[test]
    fn stats_follow_dom_order_across_elements() {
        let parser = AncestorParser::with_config(&AncestorSelectors::default()).unwrap();
        let html = Html::parse_fragment(
            "<div class=\"item__details\">\
               <span class=\"option-name\">(+)Power [10-20]\n(-)Speed [1-2]</span>\
               <span class=\"option-name\">Luck [1-3]</span>\
             </div>",
        );
        let stats = parser.stats(&html.root_element());
        let attrs: Vec<_> = stats.iter().map(|s| s.attribute.as_str()).collect();
        assert_eq!(attrs, vec!["Power", "Speed", "Luck"]);
    }
}
