use crate::config::{DEFAULT_BATCH_SIZE, PipelineConfig};
use crate::models::PropertyRecord;
use anyhow::{Result, anyhow};
use std::time::Duration;
use tracing::{error, info};
use wreq::Client;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UploadSummary {
    pub uploaded: usize,
    pub failed: usize,
    pub batches: usize,
}

/// Bulk-inserts records into a Supabase-style REST table, one POST per
/// batch. A failed batch is counted and logged; later batches still run.
/// No retry and no rollback of batches that already succeeded.
pub struct SupabaseUploader {
    client: Client,
    endpoint: String,
    api_key: String,
    batch_size: usize,
}

impl SupabaseUploader {
    pub fn new(base_url: &str, table: &str, api_key: &str, batch_size: usize) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(SupabaseUploader {
            client,
            endpoint: insert_endpoint(base_url, table),
            api_key: api_key.to_string(),
            batch_size: batch_size.max(1),
        })
    }

    pub fn from_config(config: &PipelineConfig) -> Result<Self> {
        Self::new(
            &config.base_url,
            &config.table,
            config.get_api_key()?,
            config.batch_size(),
        )
    }

    pub async fn upload_all(&self, records: &[PropertyRecord]) -> UploadSummary {
        let mut summary = UploadSummary::default();
        let plan = plan_batches(records.len(), self.batch_size);
        info!(
            "Uploading {} records to {} in {} batches of up to {}",
            records.len(),
            self.endpoint,
            plan.len(),
            self.batch_size
        );

        for (batch_index, batch) in records.chunks(self.batch_size).enumerate() {
            summary.batches += 1;
            match self.insert_batch(batch).await {
                Ok(()) => {
                    summary.uploaded += batch.len();
                    info!(
                        "Batch {}: uploaded {} records ({} total)",
                        batch_index + 1,
                        batch.len(),
                        summary.uploaded
                    );
                }
                Err(e) => {
                    summary.failed += batch.len();
                    error!("Batch {} upload failed: {}", batch_index + 1, e);
                }
            }
        }

        summary
    }

    async fn insert_batch(&self, batch: &[PropertyRecord]) -> Result<()> {
        let response = self
            .client
            .post(&self.endpoint)
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .header("Prefer", "return=minimal")
            .json(&batch)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(anyhow!("HTTP error: {}", response.status()));
        }

        Ok(())
    }
}

fn insert_endpoint(base_url: &str, table: &str) -> String {
    format!("{}/rest/v1/{}", base_url.trim_end_matches('/'), table)
}

/// Batch sizes for `record_count` records, kept separate from the HTTP path
/// so partitioning stays testable offline.
pub fn plan_batches(record_count: usize, batch_size: usize) -> Vec<usize> {
    let batch_size = batch_size.max(1);
    let mut sizes = Vec::with_capacity(record_count.div_ceil(batch_size));
    let mut remaining = record_count;
    while remaining > 0 {
        let take = remaining.min(batch_size);
        sizes.push(take);
        remaining -= take;
    }
    sizes
}
