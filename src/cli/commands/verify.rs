//! Verify command - check the document tree against the catalog

use crate::cli::output::colors;
use crate::cli::OutputFormat;
use crate::core::services::Services;
use clap::Args;
use std::sync::Arc;

/// Arguments for verify-storage
#[derive(Args, Debug, Default)]
pub struct VerifyArgs {
    /// Directories inspected concurrently (defaults to configuration)
    #[arg(long)]
    pub batch_size: Option<usize>,

    /// Exit with an error when inconsistencies are found
    #[arg(long)]
    pub strict: bool,
}

/// Execute verify-storage command
pub async fn execute(
    args: VerifyArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let batch_size = args
        .batch_size
        .unwrap_or(services.config.maintenance.scan_batch_size);

    let report = services.storage.verify(batch_size).await?;

    match format {
        OutputFormat::Human => {
            println!(
                "{}: {} catalogued, {} directories",
                colors::label("Storage"),
                colors::number(&report.documents_in_catalog.to_string()),
                colors::number(&report.directories_scanned.to_string())
            );

            if report.is_consistent {
                println!("  {}", colors::success("Consistent"));
            } else {
                for id in &report.orphan_dirs {
                    println!(
                        "  {} {} (directory without catalog entry)",
                        colors::warning("orphan"),
                        colors::document_id(id)
                    );
                }
                for id in &report.missing_dirs {
                    println!(
                        "  {} {} (catalog entry without directory)",
                        colors::error("missing"),
                        colors::document_id(id)
                    );
                }
                for doc in &report.incomplete {
                    let mut lacks = Vec::new();
                    if doc.missing_body {
                        lacks.push("body.md");
                    }
                    if doc.missing_config {
                        lacks.push("config.yaml");
                    }
                    println!(
                        "  {} {} (lacks {})",
                        colors::warning("incomplete"),
                        colors::document_id(&doc.id),
                        lacks.join(", ")
                    );
                }
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    if args.strict && !report.is_consistent {
        return Err("Document tree is inconsistent with the catalog".into());
    }

    Ok(())
}
