use serde::{Deserialize, Serialize};

use super::module_record::{ModuleRecord, ModuleSchema};

/// Outcome of one extraction run as handed to the viewer.
///
/// Serializes either as a flat list of records or as `{"error": "..."}`.
/// A caller must check [`ExtractionResult::is_error`] before trusting the
/// record list; an error never carries partial records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExtractionResult {
    Modules(Vec<ModuleRecord>),
    Failed { error: String },
}

impl ExtractionResult {
    pub fn failed(error: impl std::fmt::Display) -> Self {
        Self::Failed {
            error: error.to_string(),
        }
    }

    /// Collapse any displayable error into the single error descriptor
    pub fn from_result<E: std::fmt::Display>(result: Result<Vec<ModuleRecord>, E>) -> Self {
        match result {
            Ok(modules) => Self::Modules(modules),
            Err(e) => Self::failed(e),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed { error } => Some(error),
            Self::Modules(_) => None,
        }
    }

    pub fn modules(&self) -> Option<&[ModuleRecord]> {
        match self {
            Self::Modules(modules) => Some(modules),
            Self::Failed { .. } => None,
        }
    }

    /// (ancestor, trigger) record counts; zero for failed runs
    pub fn schema_counts(&self) -> (usize, usize) {
        self.modules()
            .unwrap_or_default()
            .iter()
            .fold((0, 0), |(a, t), m| match m.schema() {
                ModuleSchema::Ancestor => (a + 1, t),
                ModuleSchema::Trigger => (a, t + 1),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_run_serializes_as_error_object() {
        let result = ExtractionResult::failed("listing container '.items' not found");
        let json = serde_json::to_string(&result).unwrap();
        assert_eq!(json, r#"{"error":"listing container '.items' not found"}"#);
        assert!(result.is_error());
        assert!(result.modules().is_none());
    }

    #[test]
    fn modules_serialize_as_flat_list() {
        let result = ExtractionResult::Modules(vec![ModuleRecord::default()]);
        let json = serde_json::to_value(&result).unwrap();
        assert!(json.is_array());
        assert_eq!(json.as_array().unwrap().len(), 1);
    }

    #[test]
    fn round_trip_keeps_variant() {
        let parsed: ExtractionResult = serde_json::from_str(r#"{"error":"boom"}"#).unwrap();
        assert_eq!(parsed.error(), Some("boom"));

        let parsed: ExtractionResult = serde_json::from_str("[]").unwrap();
        assert_eq!(parsed.modules().map(<[_]>::len), Some(0));
    }

    #[test]
    fn counts_schemas() {
        let result = ExtractionResult::Modules(vec![
            ModuleRecord { category: "Trigger Module".into(), ..Default::default() },
            ModuleRecord { category: "Ancestor Boots".into(), ..Default::default() },
            ModuleRecord::default(),
        ]);
        assert_eq!(result.schema_counts(), (2, 1));
    }
}
