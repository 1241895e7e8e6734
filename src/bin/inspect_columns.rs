use anyhow::{Context, Result};
use std::env;
use std::path::Path;

#[path = "../config/mod.rs"]
mod config;

#[path = "../models/mod.rs"]
mod models;

#[path = "../reader/mod.rs"]
mod reader;

use config::PipelineConfig;
use models::columns;
use reader::CsvReader;

fn main() -> Result<()> {
    println!("=== INSPECTING LISTING EXPORT COLUMNS ===\n");

    let config_path =
        env::var("PIPELINE_CONFIG").unwrap_or_else(|_| "src/configs/pipeline.toml".to_string());
    let config = PipelineConfig::from_file(&config_path)
        .with_context(|| format!("Failed to load pipeline configuration from {}", config_path))?;

    let input_path = Path::new(&config.input_path);
    println!("1. Input file: {}", input_path.display());

    let bytes = std::fs::read(input_path)
        .with_context(|| format!("Failed to read input file: {}", input_path.display()))?;
    let (content, encoding) = reader::decode(&bytes)?;
    println!("   Detected encoding: {}", encoding);

    let header_line = content.lines().next().unwrap_or("");
    let headers: Vec<&str> = header_line.split(',').map(str::trim).collect();
    println!("\n2. Header labels ({}):", headers.len());
    for header in &headers {
        println!("   {}", header);
    }

    println!("\n3. Expected column coverage:");
    for expected in columns::EXPECTED {
        let marker = if headers.contains(&expected) { "present" } else { "MISSING" };
        println!("   {} -> {}", expected, marker);
    }

    let rows = CsvReader::new().parse_content(&content)?;
    println!("\n4. Parsed {} data rows", rows.len());

    if let Some(first) = rows.first() {
        println!("\n5. First row values:");
        for column in columns::EXPECTED {
            let value = first.get(column);
            if !value.is_empty() {
                println!("   {}: {}", column, value);
            }
        }
    }

    Ok(())
}
