//! Parsing configuration for module extraction
//!
//! Centralized CSS selectors for the marketplace listing page. Fields that
//! take a list are tried in order; the first location wins.

use serde::{Deserialize, Serialize};

/// CSS selectors for the listing page and its module entries
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModuleSelectors {
    /// Scrollable listing container; its absence fails the whole run
    pub container: String,

    /// Listing nodes, matched against the whole document
    pub item: String,

    /// Spinner/loader shown while the next batch is fetched
    pub loader: String,

    /// Display name: row name first, module name as fallback
    pub name: Vec<String>,

    pub category: String,
    pub platform: String,
    pub reroll_count: String,

    /// Seller nickname node; its leading text is the seller name
    pub seller_nickname: String,

    /// Online/offline marker nested inside the nickname node
    pub seller_status: String,

    pub seller_rank: String,
    pub price: String,
    pub reg_date: String,

    pub ancestor: AncestorSelectors,
    pub trigger: TriggerSelectors,
}

/// Selectors specific to ancestor modules
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AncestorSelectors {
    pub socket_type: Vec<String>,
    pub required_rank: Vec<String>,

    /// Each match may hold several stat lines separated by line breaks
    pub option_name: String,
}

/// Selectors specific to trigger modules
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TriggerSelectors {
    pub required_rank: Vec<String>,

    /// One match per stat option
    pub option: String,

    /// Name and value parts, relative to an option
    pub option_name: String,
    pub option_value: String,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for ModuleSelectors {
    fn default() -> Self {
        Self {
            container: ".items".to_string(),
            item: ".items .item".to_string(),
            loader: r#"[class*="loader"], [class*="loading"], [class*="spinner"]"#.to_string(),
            name: strings(&[".row-wrapper .name", ".module-name"]),
            category: ".row-wrapper .type".to_string(),
            platform: ".seller .platform".to_string(),
            reroll_count: ".seller .reroll span".to_string(),
            seller_nickname: ".seller .nickname".to_string(),
            seller_status: "i".to_string(),
            seller_rank: ".seller .rank span".to_string(),
            price: ".price".to_string(),
            reg_date: ".information .date span".to_string(),
            ancestor: AncestorSelectors::default(),
            trigger: TriggerSelectors::default(),
        }
    }
}

impl Default for AncestorSelectors {
    fn default() -> Self {
        Self {
            socket_type: strings(&[".ancestor-info .socket-type", ".item__info .socket-type"]),
            required_rank: strings(&[".ancestor-info .required-rank span"]),
            option_name: ".item__details .option-name".to_string(),
        }
    }
}

impl Default for TriggerSelectors {
    fn default() -> Self {
        Self {
            required_rank: strings(&[
                ".item__info .required-mastery-rank span",
                ".item__info .required-rank span",
            ]),
            option: ".item__details .option".to_string(),
            option_name: ".option-name".to_string(),
            option_value: ".option-value".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let selectors: ModuleSelectors =
            serde_json::from_str(r##"{"container": "#list", "trigger": {"option": ".opt"}}"##).unwrap();
        assert_eq!(selectors.container, "#list");
        assert_eq!(selectors.item, ".items .item");
        assert_eq!(selectors.trigger.option, ".opt");
        assert_eq!(selectors.trigger.option_value, ".option-value");
        assert_eq!(selectors.ancestor, AncestorSelectors::default());
    }
}
