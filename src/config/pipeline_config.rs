use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;

pub const DEFAULT_BATCH_SIZE: usize = 50;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfigFile {
    pub pipeline: PipelineSection,
    pub sink: SinkSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineSection {
    pub input_path: String,
    pub output_path: Option<String>,
    pub default_manager_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SinkSection {
    pub base_url: String,
    pub table: String,
    pub batch_size: Option<usize>,
    // Optional environment variable name for customization
    pub env_api_key: Option<String>,
}

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub input_path: String,
    pub output_path: Option<String>,
    pub default_manager_id: Option<String>,
    pub base_url: String,
    pub table: String,
    pub batch_size: Option<usize>,
    // Loaded from an environment variable, never from the TOML file
    pub api_key: Option<String>,
    pub env_api_key: Option<String>,
}

impl PipelineConfig {
    pub fn from_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read pipeline config file: {}", path))?;

        let config_file: PipelineConfigFile = toml::from_str(&content)
            .with_context(|| format!("Failed to parse pipeline config file: {}", path))?;

        Ok(Self::from_sections(config_file))
    }

    fn from_sections(file: PipelineConfigFile) -> Self {
        Self {
            input_path: file.pipeline.input_path,
            output_path: file.pipeline.output_path,
            default_manager_id: file.pipeline.default_manager_id,
            base_url: file.sink.base_url,
            table: file.sink.table,
            batch_size: file.sink.batch_size,
            api_key: None,
            env_api_key: file.sink.env_api_key,
        }
    }

    /// Pulls the sink key from the environment. Only the upload path needs
    /// this; artifact-only runs never call it.
    pub fn load_credentials(&mut self) -> Result<()> {
        let api_key_var = self.env_api_key.as_deref().unwrap_or("SUPABASE_API_KEY");

        self.api_key = env::var(api_key_var)
            .with_context(|| format!("Missing environment variable: {}", api_key_var))?
            .into();

        Ok(())
    }

    pub fn get_api_key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .ok_or_else(|| anyhow::anyhow!("Sink API key not loaded"))
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size.unwrap_or(DEFAULT_BATCH_SIZE)
    }

    pub fn manager_id(&self) -> &str {
        self.default_manager_id.as_deref().unwrap_or("unassigned")
    }

    pub fn validate(&self) -> Result<()> {
        if self.input_path.is_empty() {
            return Err(anyhow::anyhow!("Input path cannot be empty"));
        }

        if self.base_url.is_empty() {
            return Err(anyhow::anyhow!("Sink base URL cannot be empty"));
        }

        if self.table.is_empty() {
            return Err(anyhow::anyhow!("Sink table cannot be empty"));
        }

        Ok(())
    }

    pub fn validate_for_upload(&self) -> Result<()> {
        self.validate()?;

        if self.api_key.is_none() {
            return Err(anyhow::anyhow!("Sink API key not loaded"));
        }

        Ok(())
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input_path: "listings.csv".to_string(),
            output_path: None,
            default_manager_id: None,
            base_url: "http://localhost:54321".to_string(),
            table: "properties".to_string(),
            batch_size: None,
            api_key: None,
            env_api_key: None,
        }
    }
}
