use serde::{Deserialize, Serialize};

/// Listing variant a marketplace entry belongs to.
///
/// Classification is total: anything whose category label does not mention
/// "trigger" is treated as an ancestor module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleSchema {
    Ancestor,
    Trigger,
}

impl ModuleSchema {
    /// Pick the schema for a category label (case-insensitive "trigger" match)
    pub fn classify(category: &str) -> Self {
        if category.to_lowercase().contains("trigger") {
            Self::Trigger
        } else {
            Self::Ancestor
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ancestor => "ancestor",
            Self::Trigger => "trigger",
        }
    }
}

impl std::fmt::Display for ModuleSchema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One parsed stat line or option of a module
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatLine {
    pub raw: String,
    pub positive: bool,
    pub negative: bool,
}

impl StatLine {
    /// Stat without polarity (trigger options, unsigned ancestor lines)
    pub fn neutral(raw: impl Into<String>) -> Self {
        Self {
            raw: raw.into(),
            positive: false,
            negative: false,
        }
    }
}

/// Normalized record extracted from a single listing node
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleRecord {
    pub name: String,
    pub category: String,
    pub socket_type: String,
    pub required_rank: String,
    pub price: String,
    pub platform: String,
    pub reroll_count: String,
    pub seller_name: String,
    pub seller_status: String,
    pub seller_rank: String,
    pub reg_date: String,
    pub attributes: Vec<String>,
    pub stats: Vec<StatLine>,
}

impl ModuleRecord {
    /// Schema this record was parsed with, derived from its category
    pub fn schema(&self) -> ModuleSchema {
        ModuleSchema::classify(&self.category)
    }
}

/// Ordered, duplicate-free collection of attribute names.
///
/// Keeps the first-seen order; empty names are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeSet {
    names: Vec<String>,
}

impl AttributeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an attribute name. Returns `true` if it was new.
    pub fn insert(&mut self, name: &str) -> bool {
        if name.is_empty() || self.contains(name) {
            return false;
        }
        self.names.push(name.to_string());
        true
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn into_vec(self) -> Vec<String> {
        self.names
    }
}

impl<'a> FromIterator<&'a str> for AttributeSet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut set = Self::new();
        for name in iter {
            set.insert(name);
        }
        set
    }
}
