//! Config command - show current configuration

use crate::cli::output::{format_bytes, format_millis};
use crate::cli::OutputFormat;
use crate::core::services::Services;
use crate::core::xdg::XdgDirs;
use clap::Args;
use serde::Serialize;
use std::sync::Arc;

/// Arguments for the config command
#[derive(Args, Debug, Default)]
pub struct ConfigArgs {
    /// Also show live cache occupancy and document count
    #[arg(long, short = 'a')]
    pub all: bool,
}

/// Configuration response
#[derive(Debug, Serialize)]
pub struct ConfigResponse {
    pub config_file: String,
    pub root_dir: String,
    pub cache: CacheInfo,
    pub preview_max_words: usize,
    pub scan_batch_size: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<StatusInfo>,
}

#[derive(Debug, Serialize)]
pub struct CacheInfo {
    pub max_size_bytes: usize,
    pub max_age_ms: u64,
    pub max_items: usize,
}

#[derive(Debug, Serialize)]
pub struct StatusInfo {
    pub documents: usize,
    pub cached_items: usize,
    pub cached_bytes: usize,
}

/// Execute the config command
pub async fn execute(
    args: ConfigArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = &services.config;
    let xdg = XdgDirs::new();

    let status = if args.all {
        let stats = services.storage.cache_stats().await;
        Some(StatusInfo {
            documents: services.storage.document_count().await,
            cached_items: stats.items,
            cached_bytes: stats.size_bytes,
        })
    } else {
        None
    };

    let response = ConfigResponse {
        config_file: xdg.config_file().to_string_lossy().into_owned(),
        root_dir: services.storage.root().to_string_lossy().into_owned(),
        cache: CacheInfo {
            max_size_bytes: config.cache.max_size_bytes,
            max_age_ms: config.cache.max_age_ms,
            max_items: config.cache.max_items,
        },
        preview_max_words: config.preview.max_words,
        scan_batch_size: config.maintenance.scan_batch_size,
        status,
    };

    match format {
        OutputFormat::Human => {
            println!("Configuration:");
            println!("  config_file: {}", response.config_file);
            println!("  root_dir: {}", response.root_dir);
            println!("  cache:");
            println!(
                "    max_size: {}",
                format_bytes(response.cache.max_size_bytes as u64)
            );
            println!("    max_age: {}", format_millis(response.cache.max_age_ms));
            println!("    max_items: {}", response.cache.max_items);
            println!("  preview:");
            println!("    max_words: {}", response.preview_max_words);
            println!("  maintenance:");
            println!("    scan_batch_size: {}", response.scan_batch_size);
            if let Some(status) = &response.status {
                println!("Status:");
                println!("  documents: {}", status.documents);
                println!(
                    "  cache: {} items, {}",
                    status.cached_items,
                    format_bytes(status.cached_bytes as u64)
                );
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
    }

    Ok(())
}
