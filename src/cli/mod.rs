//! CLI adapter for Folio
//!
//! Thin clap front end over the storage manager. Every subcommand opens
//! the configured document tree through `Services`, runs one operation and
//! prints the result as human-readable text or JSON.
//!
//! # Architecture
//!
//! ```text
//! +------------------+
//! |     core/        |
//! |  (domain logic)  |
//! +--------+---------+
//!          |
//!          v
//! +------------------+
//! |      cli/        |
//! | (clap adapter)   |
//! +------------------+
//! ```

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Folio - file-backed blog document store
///
/// Create, read, update and delete markdown documents with metadata and
/// binary assets, list them with title search and category/tag filters,
/// and check the document tree for consistency.
#[derive(Parser, Debug)]
#[command(name = "folio")]
#[command(version)]
#[command(about = "File-backed blog document store", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(long, global = true, default_value = "human")]
    pub format: OutputFormat,

    /// Document tree root (overrides configuration)
    #[arg(long, global = true, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true, env = "FOLIO_LOG_JSON")]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output for scripting
    Json,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a new document
    #[command(name = "create-document")]
    CreateDocument(commands::document::CreateArgs),

    /// Show a document with its content and assets
    #[command(name = "get-document")]
    GetDocument(commands::document::GetArgs),

    /// Change fields of an existing document
    #[command(name = "update-document")]
    UpdateDocument(commands::document::UpdateArgs),

    /// Delete a document and all of its assets
    #[command(name = "delete-document")]
    DeleteDocument(commands::document::DeleteArgs),

    /// List documents, newest first, with optional filters
    #[command(name = "list-documents")]
    ListDocuments(commands::list::ListArgs),

    /// Show all categories and tags in use
    #[command(name = "list-taxonomy")]
    ListTaxonomy(commands::list::TaxonomyArgs),

    /// Store a file as an asset of a document
    #[command(name = "add-asset")]
    AddAsset(commands::asset::AddArgs),

    /// Show or export an asset of a document
    #[command(name = "get-asset")]
    GetAsset(commands::asset::GetArgs),

    /// Delete an asset of a document
    #[command(name = "delete-asset")]
    DeleteAsset(commands::asset::DeleteArgs),

    /// Compare the document tree on disk with the catalog
    #[command(name = "verify-storage")]
    VerifyStorage(commands::VerifyArgs),

    /// Show current configuration
    #[command(name = "show-config")]
    ShowConfig(commands::ConfigArgs),

    /// Generate shell completion scripts
    ///
    /// Output completion script to stdout. To install:
    ///
    ///   bash:  folio completions bash > ~/.local/share/bash-completion/completions/folio
    ///   zsh:   folio completions zsh > ~/.zfunc/_folio
    ///   fish:  folio completions fish > ~/.config/fish/completions/folio.fish
    Completions(commands::CompletionsArgs),
}

/// Run the CLI with the provided arguments
pub async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    use crate::core::config::Config;
    use crate::core::services::Services;
    use crate::core::xdg::XdgDirs;
    use std::sync::Arc;

    let command = match cli.command {
        // Completions don't need services
        Commands::Completions(args) => return commands::completions::execute(args),
        command => command,
    };

    let xdg = XdgDirs::new();
    xdg.log_paths();
    xdg.ensure_dirs_exist()?;

    let mut config = Config::load_with_xdg(&xdg)?;
    if let Some(root) = cli.root {
        config.storage.root_dir = root;
    }
    config.log_config();

    let services = Arc::new(Services::open(config).await?);
    let format = cli.format;

    match command {
        Commands::CreateDocument(args) => {
            commands::document::execute_create(args, &services, format).await
        }
        Commands::GetDocument(args) => {
            commands::document::execute_get(args, &services, format).await
        }
        Commands::UpdateDocument(args) => {
            commands::document::execute_update(args, &services, format).await
        }
        Commands::DeleteDocument(args) => {
            commands::document::execute_delete(args, &services, format).await
        }
        Commands::ListDocuments(args) => commands::list::execute_list(args, &services, format).await,
        Commands::ListTaxonomy(args) => {
            commands::list::execute_taxonomy(args, &services, format).await
        }
        Commands::AddAsset(args) => commands::asset::execute_add(args, &services, format).await,
        Commands::GetAsset(args) => commands::asset::execute_get(args, &services, format).await,
        Commands::DeleteAsset(args) => {
            commands::asset::execute_delete(args, &services, format).await
        }
        Commands::VerifyStorage(args) => commands::verify::execute(args, &services, format).await,
        Commands::ShowConfig(args) => commands::config::execute(args, &services, format).await,
        Commands::Completions(_) => unreachable!(), // Handled above
    }
}
