use crate::models::PropertyRecord;
use anyhow::{Context, Result};
use chrono::Utc;
use std::path::Path;
use tracing::info;

/// Writes the converted records to a local JSON artifact. The artifact is
/// written whenever at least one record survives, independent of whether an
/// upload follows.
pub struct ArtifactStore;

impl ArtifactStore {
    /// Pretty-printed JSON array, UTF-8 with Korean text left unescaped.
    pub fn write(path: &Path, records: &[PropertyRecord]) -> Result<()> {
        let json = serde_json::to_string_pretty(records)
            .context("Failed to serialize records to JSON")?;

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create output directory: {}", parent.display())
                })?;
            }
        }

        std::fs::write(path, json)
            .with_context(|| format!("Failed to write artifact: {}", path.display()))?;

        info!("Stored {} records at: {}", records.len(), path.display());
        Ok(())
    }

    pub fn generate_output_path() -> String {
        let date = Utc::now().format("%Y%m%d").to_string();
        format!("processed/properties_{}.json", date)
    }

    /// Indented render of the first record, for the run log.
    pub fn sample_preview(records: &[PropertyRecord]) -> Option<String> {
        records
            .first()
            .and_then(|record| serde_json::to_string_pretty(record).ok())
    }
}
