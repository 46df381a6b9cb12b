//! Listing commands - list-documents and list-taxonomy

use crate::cli::output::{colors, format_document_line, format_facets};
use crate::cli::OutputFormat;
use crate::core::services::Services;
use crate::core::types::ListOptions;
use clap::Args;
use serde::Serialize;
use std::sync::Arc;

/// Arguments for list-documents
#[derive(Args, Debug, Default)]
pub struct ListArgs {
    /// Title search (all words must match)
    #[arg(long, short = 'q')]
    pub query: Option<String>,

    /// Also match the query inside document bodies
    #[arg(long, requires = "query")]
    pub content: bool,

    /// Only documents in any of these categories (repeatable)
    #[arg(long = "category")]
    pub categories: Vec<String>,

    /// Only documents with any of these tags (repeatable)
    #[arg(long = "tag")]
    pub tags: Vec<String>,

    /// Hide unpublished documents
    #[arg(long)]
    pub published_only: bool,

    /// Page number, starting at 1
    #[arg(long, requires = "page_size")]
    pub page: Option<usize>,

    /// Documents per page
    #[arg(long)]
    pub page_size: Option<usize>,
}

/// Arguments for list-taxonomy
#[derive(Args, Debug, Default)]
pub struct TaxonomyArgs {}

#[derive(Debug, Serialize)]
struct ListResponse {
    total: usize,
    page: Option<usize>,
    page_size: Option<usize>,
    items: Vec<crate::core::types::DocumentMeta>,
}

impl ListArgs {
    /// Translate flags into list options
    pub fn to_options(&self) -> ListOptions {
        ListOptions {
            // A page size alone means the first page
            page: self.page.or(self.page_size.map(|_| 1)),
            page_size: self.page_size,
            published_only: self.published_only,
            categories: (!self.categories.is_empty()).then(|| self.categories.clone()),
            tags: (!self.tags.is_empty()).then(|| self.tags.clone()),
            query: self.query.clone(),
            search_content: self.content,
        }
    }
}

/// Execute list-documents command
pub async fn execute_list(
    args: ListArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let options = args.to_options();
    let page = options.page;
    let page_size = options.page_size;

    let result = services.storage.list_documents(options).await?;

    match format {
        OutputFormat::Human => {
            if result.total == 0 {
                println!(
                    "No documents found. Run '{}' to add one.",
                    colors::label("folio create-document <id> --title <title> --file <path>")
                );
            } else {
                match (page, page_size) {
                    (Some(page), Some(size)) => println!(
                        "{} ({} total, page {}, {} per page):",
                        colors::label("Documents"),
                        colors::number(&result.total.to_string()),
                        colors::number(&page.to_string()),
                        colors::number(&size.to_string())
                    ),
                    _ => println!(
                        "{} ({}):",
                        colors::label("Documents"),
                        colors::number(&result.total.to_string())
                    ),
                }
                for meta in &result.items {
                    println!("{}", format_document_line(meta));
                }
            }
        }
        OutputFormat::Json => {
            let response = ListResponse {
                total: result.total,
                page,
                page_size,
                items: result.items,
            };
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
    }

    Ok(())
}

/// Execute list-taxonomy command
pub async fn execute_taxonomy(
    _args: TaxonomyArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let taxonomy = services.storage.taxonomy().await;

    match format {
        OutputFormat::Human => {
            println!(
                "{} ({}): {}",
                colors::label("Categories"),
                colors::number(&taxonomy.categories.len().to_string()),
                format_facets(&taxonomy.categories)
            );
            println!(
                "{} ({}): {}",
                colors::label("Tags"),
                colors::number(&taxonomy.tags.len().to_string()),
                format_facets(&taxonomy.tags)
            );
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&taxonomy)?);
        }
    }

    Ok(())
}
