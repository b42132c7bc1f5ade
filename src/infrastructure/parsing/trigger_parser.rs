//! Trigger module parser
//!
//! Trigger listings have no socket and no stat polarity. Each option is a
//! name/value pair, e.g. `Damage (10-20)` and `+15`.

use super::{ParsedStat, ParsingResult, SchemaParser, TriggerSelectors, compile_selector, compile_selector_group};
use crate::domain::StatLine;
use crate::infrastructure::dom::{DomNode, text_of};
use scraper::Selector;

pub struct TriggerParser {
    required_rank: Option<Selector>,
    option: Selector,
    option_name: Selector,
    option_value: Selector,
}

impl TriggerParser {
    pub fn with_config(selectors: &TriggerSelectors) -> ParsingResult<Self> {
        Ok(Self {
            required_rank: compile_selector_group("trigger.required_rank", &selectors.required_rank)?,
            option: compile_selector("trigger.option", &selectors.option)?,
            option_name: compile_selector("trigger.option_name", &selectors.option_name)?,
            option_value: compile_selector("trigger.option_value", &selectors.option_value)?,
        })
    }
}

impl SchemaParser for TriggerParser {
    fn socket_type<N: DomNode>(&self, _item: &N) -> String {
        String::new()
    }

    /// Rank from whichever rank location appears first in the node
    fn required_rank<N: DomNode>(&self, item: &N) -> String {
        self.required_rank
            .as_ref()
            .map(|group| text_of(item, group))
            .unwrap_or_default()
    }

    fn stats<N: DomNode>(&self, item: &N) -> Vec<ParsedStat> {
        item.select_all(&self.option)
            .iter()
            .map(|option| {
                option_stat(
                    &text_of(option, &self.option_name),
                    &text_of(option, &self.option_value),
                )
            })
            .collect()
    }
}

/// Build the neutral stat for one option from its trimmed name and value
pub fn option_stat(label: &str, value: &str) -> ParsedStat {
    ParsedStat {
        stat: StatLine::neutral(format!("{} {}", label, value)),
        attribute: label.split('(').next().unwrap_or_default().trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    fn parser() -> TriggerParser {
        TriggerParser::with_config(&TriggerSelectors::default()).unwrap()
    }

    #[test]
    fn option_pairs_become_neutral_stats() {
        let html = Html::parse_fragment(
            r#"<div class="item__details">
                 <div class="option"><span class="option-name"> Damage (10-20) </span><span class="option-value">+15</span></div>
                 <div class="option"><span class="option-name">(+)Crit</span><span class="option-value">-3</span></div>
               </div>"#,
        );
        let stats = parser().stats(&html.root_element());

        assert_eq!(stats.len(), 2);
        assert_eq!(stats[0].stat, StatLine::neutral("Damage (10-20) +15"));
        assert_eq!(stats[0].attribute, "Damage");
        assert!(!stats[1].stat.positive && !stats[1].stat.negative);
        assert_eq!(stats[1].attribute, "");
    }

    #[test]
    fn option_without_value_keeps_separator() {
        let stat = option_stat("Shield", "");
        assert_eq!(stat.stat.raw, "Shield ");
        assert_eq!(stat.attribute, "Shield");
    }

    #[test]
    fn required_rank_checks_both_locations() {
        let html = Html::parse_fragment(
            r#"<div class="item__info"><div class="required-rank">Rank <span>7</span></div></div>"#,
        );
        let root = html.root_element();
        assert_eq!(parser().required_rank(&root), "7");
        assert_eq!(parser().socket_type(&root), "");
    }

    #[test]
    fn required_rank_takes_earliest_location_in_document() {
        let html = Html::parse_fragment(
            r#"<div class="item__info">
                 <div class="required-rank">Rank <span>5</span></div>
                 <div class="required-mastery-rank">Mastery <span>9</span></div>
               </div>"#,
        );
        assert_eq!(parser().required_rank(&html.root_element()), "5");
    }
}
