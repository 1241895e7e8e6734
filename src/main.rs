use anyhow::{Context, Result};
use config::PipelineConfig;
use processor::{RowTransformer, into_records};
use reader::CsvReader;
use storage::ArtifactStore;
use tracing::{info, warn};
use uploader::SupabaseUploader;
use std::env;
use std::path::Path;

mod config;
mod models;
mod processor;
mod reader;
mod storage;
mod uploader;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    // Load environment variables
    dotenv::dotenv().ok();

    // Check if we should also push the records to the remote table
    let upload = env::args().any(|arg| arg == "--upload" || arg == "-u");

    if upload {
        info!("🚀 Starting Listing Ingestion Pipeline (artifact + upload)");
    } else {
        info!("🚀 Starting Listing Ingestion Pipeline (artifact only)");
    }

    let config_path =
        env::var("PIPELINE_CONFIG").unwrap_or_else(|_| "src/configs/pipeline.toml".to_string());
    let mut config = PipelineConfig::from_file(&config_path)
        .with_context(|| format!("Failed to load pipeline configuration from {}", config_path))?;
    config.validate()?;

    info!(
        "Loaded pipeline configuration: {} -> table '{}'",
        config.input_path, config.table
    );

    let reader = CsvReader::new();
    let rows = reader
        .read_file(Path::new(&config.input_path))
        .context("Failed to read listing export")?;

    if rows.is_empty() {
        warn!("⚠️ Input file contains no data rows");
        return Ok(());
    }

    let transformer = RowTransformer::new(config.manager_id());
    let (outcomes, summary) = transformer.transform_rows(&rows);

    info!("\n=== Transformation Summary ===");
    info!(
        "✅ Converted {} out of {} rows ({} skipped)",
        summary.converted, summary.total_rows, summary.skipped
    );

    let records = into_records(outcomes);
    if records.is_empty() {
        warn!("⚠️ No listings survived transformation, nothing to store");
        return Ok(());
    }

    if let Some(preview) = ArtifactStore::sample_preview(&records) {
        info!("First converted listing:\n{}", preview);
    }

    let output_path = config
        .output_path
        .clone()
        .unwrap_or_else(ArtifactStore::generate_output_path);
    ArtifactStore::write(Path::new(&output_path), &records)
        .context("Failed to write JSON artifact")?;

    if upload {
        config
            .load_credentials()
            .context("Failed to load sink credentials")
            .with_context(|| {
                "Set the sink API key in the environment (see [sink] env_api_key in the config)"
            })?;
        config.validate_for_upload()?;

        let uploader = SupabaseUploader::from_config(&config)?;
        let result = uploader.upload_all(&records).await;

        info!("\n=== Upload Summary ===");
        info!(
            "✅ Uploaded {} records in {} batches",
            result.uploaded, result.batches
        );
        if result.failed > 0 {
            warn!("❌ Failed to upload {} records", result.failed);
        }
    } else {
        info!(
            "Skipping upload (run with --upload to insert into '{}')",
            config.table
        );
    }

    info!("🎉 Pipeline completed");
    Ok(())
}
