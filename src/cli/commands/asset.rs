//! Asset commands - add, get, delete

use crate::cli::output::{colors, format_bytes};
use crate::cli::OutputFormat;
use crate::core::services::Services;
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

/// Arguments for add-asset
#[derive(Args, Debug)]
pub struct AddArgs {
    /// Document ID
    pub id: String,

    /// File to store
    pub path: PathBuf,

    /// Asset name (defaults to the file name)
    #[arg(long, short = 'n')]
    pub name: Option<String>,
}

/// Arguments for get-asset
#[derive(Args, Debug)]
pub struct GetArgs {
    /// Document ID
    pub id: String,

    /// Asset name
    pub name: String,

    /// Write the asset bytes to this file
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

/// Arguments for delete-asset
#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Document ID
    pub id: String,

    /// Asset name
    pub name: String,
}

#[derive(Debug, Serialize)]
struct AssetResponse {
    id: String,
    name: String,
    size: u64,
    last_modified: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    written_to: Option<String>,
}

/// Execute add-asset command
pub async fn execute_add(
    args: AddArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let name = match args.name {
        Some(name) => name,
        None => args
            .path
            .file_name()
            .and_then(|n| n.to_str())
            .map(str::to_string)
            .ok_or_else(|| format!("Cannot derive an asset name from {:?}", args.path))?,
    };

    let bytes = tokio::fs::read(&args.path)
        .await
        .map_err(|e| format!("Failed to read {}: {e}", args.path.display()))?;

    let stored = services.storage.add_asset(&args.id, &name, &bytes).await?;

    match format {
        OutputFormat::Human => {
            println!(
                "{} asset '{}' to '{}' ({})",
                colors::success("Added"),
                colors::file_path(&name),
                colors::document_id(&args.id),
                colors::number(&format_bytes(bytes.len() as u64))
            );
        }
        OutputFormat::Json => {
            let response = serde_json::json!({
                "id": args.id,
                "name": name,
                "size": bytes.len(),
                "path": stored.display().to_string()
            });
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
    }

    Ok(())
}

/// Execute get-asset command
pub async fn execute_get(
    args: GetArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let asset = services.storage.get_asset(&args.id, &args.name).await?;

    if let Some(output) = &args.output {
        tokio::fs::write(output, &asset.bytes)
            .await
            .map_err(|e| format!("Failed to write {}: {e}", output.display()))?;
    }

    let response = AssetResponse {
        id: args.id,
        name: args.name,
        size: asset.size,
        last_modified: asset.last_modified.to_rfc3339(),
        written_to: args.output.map(|p| p.display().to_string()),
    };

    match format {
        OutputFormat::Human => {
            println!(
                "{}: {}",
                colors::label("Asset"),
                colors::file_path(&response.name)
            );
            println!(
                "  {}: {}",
                colors::label("Document"),
                colors::document_id(&response.id)
            );
            println!(
                "  {}: {}",
                colors::label("Size"),
                colors::number(&format_bytes(response.size))
            );
            println!(
                "  {}: {}",
                colors::label("Modified"),
                colors::dim(&response.last_modified)
            );
            if let Some(path) = &response.written_to {
                println!("  {}: {}", colors::label("Written to"), colors::file_path(path));
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
    }

    Ok(())
}

/// Execute delete-asset command
pub async fn execute_delete(
    args: DeleteArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    services.storage.delete_asset(&args.id, &args.name).await?;

    match format {
        OutputFormat::Human => {
            println!(
                "{} asset '{}' from '{}'",
                colors::success("Deleted"),
                colors::file_path(&args.name),
                colors::document_id(&args.id)
            );
        }
        OutputFormat::Json => {
            let response = serde_json::json!({
                "deleted": true,
                "id": args.id,
                "name": args.name
            });
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
    }

    Ok(())
}
