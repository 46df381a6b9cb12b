//! Document commands - create, get, update, delete
//!
//! Content comes from `--content` or from a file given with `--file`
//! (`-` reads standard input).

use crate::cli::output::{colors, format_facets, format_relative_time};
use crate::cli::OutputFormat;
use crate::core::services::Services;
use crate::core::types::{CreateDocumentInput, Document, UpdateDocumentInput};
use clap::Args;
use std::collections::BTreeSet;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Arguments for create-document
#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Document ID (also its directory name)
    pub id: String,

    /// Document title
    #[arg(long, short = 't')]
    pub title: String,

    /// Markdown content
    #[arg(long, short = 'c', conflicts_with = "file")]
    pub content: Option<String>,

    /// Read content from a file ("-" for stdin)
    #[arg(long, short = 'f')]
    pub file: Option<PathBuf>,

    /// Publish immediately
    #[arg(long)]
    pub published: bool,

    /// Comma-separated tags
    #[arg(long, value_delimiter = ',')]
    pub tags: Vec<String>,

    /// Comma-separated categories
    #[arg(long, value_delimiter = ',')]
    pub categories: Vec<String>,
}

/// Arguments for get-document
#[derive(Args, Debug)]
pub struct GetArgs {
    /// Document ID
    pub id: String,

    /// Print metadata only
    #[arg(long)]
    pub no_content: bool,
}

/// Arguments for update-document
#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Document ID
    pub id: String,

    /// New title
    #[arg(long, short = 't')]
    pub title: Option<String>,

    /// New markdown content
    #[arg(long, short = 'c', conflicts_with = "file")]
    pub content: Option<String>,

    /// Read new content from a file ("-" for stdin)
    #[arg(long, short = 'f')]
    pub file: Option<PathBuf>,

    /// Set publication state
    #[arg(long)]
    pub published: Option<bool>,

    /// Replace tags (comma-separated; empty string clears)
    #[arg(long, value_delimiter = ',')]
    pub tags: Option<Vec<String>>,

    /// Replace categories (comma-separated; empty string clears)
    #[arg(long, value_delimiter = ',')]
    pub categories: Option<Vec<String>>,
}

/// Arguments for delete-document
#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Document ID
    pub id: String,

    /// Skip confirmation prompt
    #[arg(long, short = 'f')]
    pub force: bool,
}

/// Execute create-document command
pub async fn execute_create(
    args: CreateArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let content = match read_content(args.content, args.file.as_deref())? {
        Some(content) => content,
        None => return Err("Provide content with --content or --file".into()),
    };

    let input = CreateDocumentInput::new(&args.id, args.title, content)
        .published(args.published)
        .with_tags(facet_set(args.tags))
        .with_categories(facet_set(args.categories));

    let document = services.storage.create_document(input).await?;

    match format {
        OutputFormat::Human => {
            println!(
                "{} document '{}'",
                colors::success("Created"),
                colors::document_id(&document.meta.id)
            );
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&document)?);
        }
    }

    Ok(())
}

/// Execute get-document command
pub async fn execute_get(
    args: GetArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut document = services.storage.get_document(&args.id).await.map_err(|e| {
        if e.is_not_found() {
            format!(
                "Document '{}' not found. Run 'folio list-documents' to see available documents.",
                args.id
            )
        } else {
            e.to_string()
        }
    })?;

    if args.no_content {
        document.content.clear();
    }

    match format {
        OutputFormat::Human => print_document(&document, !args.no_content),
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&document)?);
        }
    }

    Ok(())
}

/// Execute update-document command
pub async fn execute_update(
    args: UpdateArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let input = UpdateDocumentInput {
        title: args.title,
        content: read_content(args.content, args.file.as_deref())?,
        published: args.published,
        tags: args.tags.map(facet_set),
        categories: args.categories.map(facet_set),
    };

    let document = services.storage.update_document(&args.id, input).await?;

    match format {
        OutputFormat::Human => {
            println!(
                "{} document '{}'",
                colors::success("Updated"),
                colors::document_id(&document.meta.id)
            );
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&document)?);
        }
    }

    Ok(())
}

/// Execute delete-document command
pub async fn execute_delete(
    args: DeleteArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    if !services.storage.contains(&args.id).await {
        return Err(format!(
            "Document '{}' not found. Run 'folio list-documents' to see available documents.",
            args.id
        )
        .into());
    }

    // Confirmation prompt unless --force
    if !args.force {
        print!(
            "Delete document '{}' and its assets? [y/N] ",
            colors::document_id(&args.id)
        );
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;

        if !input.trim().eq_ignore_ascii_case("y") {
            println!("{}", colors::dim("Cancelled."));
            return Ok(());
        }
    }

    services.storage.delete_document(&args.id).await?;

    match format {
        OutputFormat::Human => {
            println!(
                "{} document '{}'",
                colors::success("Deleted"),
                colors::document_id(&args.id)
            );
        }
        OutputFormat::Json => {
            let response = serde_json::json!({
                "deleted": true,
                "id": args.id
            });
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
    }

    Ok(())
}

fn print_document(document: &Document, with_content: bool) {
    let meta = &document.meta;

    println!(
        "{}: {}",
        colors::label("Document"),
        colors::document_id(&meta.id)
    );
    println!("  {}: {}", colors::label("Title"), meta.title);
    println!(
        "  {}: {}",
        colors::label("Published"),
        if meta.published {
            colors::success("yes")
        } else {
            colors::dim("no")
        }
    );
    println!(
        "  {}: {} ({})",
        colors::label("Created"),
        meta.created_at.to_rfc3339(),
        colors::dim(&format_relative_time(&meta.created_at))
    );
    println!(
        "  {}: {} ({})",
        colors::label("Updated"),
        meta.updated_at.to_rfc3339(),
        colors::dim(&format_relative_time(&meta.updated_at))
    );
    println!(
        "  {}: {}",
        colors::label("Categories"),
        format_facets(&meta.categories)
    );
    println!("  {}: {}", colors::label("Tags"), format_facets(&meta.tags));
    println!(
        "  {}: {}",
        colors::label("Description"),
        colors::dim(&meta.description)
    );

    if document.assets.is_empty() {
        println!("  {}: {}", colors::label("Assets"), colors::dim("none"));
    } else {
        println!("  {}:", colors::label("Assets"));
        for asset in &document.assets {
            println!("    {}", colors::file_path(asset));
        }
    }

    if with_content {
        println!();
        println!("{}", document.content);
    }
}

/// Resolve content from an inline value or a file path ("-" is stdin)
pub fn read_content(
    inline: Option<String>,
    file: Option<&Path>,
) -> Result<Option<String>, Box<dyn std::error::Error>> {
    if inline.is_some() {
        return Ok(inline);
    }

    match file {
        Some(path) if path == Path::new("-") => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Ok(Some(buffer))
        }
        Some(path) => std::fs::read_to_string(path)
            .map(Some)
            .map_err(|e| format!("Failed to read {}: {e}", path.display()).into()),
        None => Ok(None),
    }
}

/// Trimmed, non-empty facet names
fn facet_set(values: Vec<String>) -> BTreeSet<String> {
    values
        .into_iter()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .collect()
}
