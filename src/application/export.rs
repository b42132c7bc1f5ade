//! Hand-off of extraction results to the viewer as a JSON file

use anyhow::{Context, Result};
use std::path::Path;
use tokio::fs;
use tracing::info;

use crate::domain::ExtractionResult;

pub fn to_json(result: &ExtractionResult, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(result)
    } else {
        serde_json::to_string(result)
    };
    json.context("Failed to serialize extraction result")
}

/// Write the flat record list, or the error object, to `path`
pub async fn write_result(result: &ExtractionResult, path: &Path, pretty: bool) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create output directory {:?}", parent))?;
    }

    fs::write(path, to_json(result, pretty)?)
        .await
        .with_context(|| format!("Failed to write results to {:?}", path))?;

    info!("Saved results to {:?}", path);
    Ok(())
}

pub async fn read_result(path: &Path) -> Result<ExtractionResult> {
    let content = fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read results from {:?}", path))?;
    serde_json::from_str(&content).context("Results file is not a module list or error object")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ModuleRecord;
    use tempfile::TempDir;

    #[tokio::test]
    async fn written_results_read_back() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out").join("market_data.json");
        let result = ExtractionResult::Modules(vec![ModuleRecord {
            name: "Fire Core".into(),
            ..Default::default()
        }]);

        write_result(&result, &path, true).await.unwrap();
        assert_eq!(read_result(&path).await.unwrap(), result);
    }

    #[test]
    fn compact_error_json() {
        let json = to_json(&ExtractionResult::failed("boom"), false).unwrap();
        assert_eq!(json, r#"{"error":"boom"}"#);
    }
}
