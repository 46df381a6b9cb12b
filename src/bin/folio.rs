//! Folio CLI - command-line interface for the document store
//!
//! # Examples
//!
//! ```bash
//! # Create a document from a markdown file
//! folio create-document hello-world --title "Hello World" --file post.md --tags rust,intro
//!
//! # List published documents in a category, second page of ten
//! folio list-documents --category tech --published-only --page 2 --page-size 10
//!
//! # Check the tree against the catalog
//! folio verify-storage --strict
//! ```
//!
//! Logs go to stderr, filtered by `FOLIO_LOG` (or `RUST_LOG`), default
//! `folio=warn`.

use clap::Parser;
use folio::cli::{run, Cli};
use tracing_subscriber::EnvFilter;

fn init_logging(json: bool) {
    let filter = EnvFilter::try_from_env("FOLIO_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("folio=warn"));

    let builder = tracing_subscriber::fmt()
        .with_writer(std::io::stderr) // stdout carries command output
        .with_env_filter(filter);

    if json {
        builder.json().init();
    } else {
        builder.compact().init();
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_json);

    if let Err(e) = run(cli).await {
        folio::cli::output::print_error(&e.to_string());
        std::process::exit(1);
    }
}
