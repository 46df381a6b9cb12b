//! File-backed document storage.
//!
//! # Architecture
//!
//! - **FileStore**: Raw disk access (catalog, bodies, configs, assets)
//! - **StorageManager**: Coordinates disk, search index and cache
//! - **Validator**: Read-only catalog/disk consistency scan
//!
//! # Document Tree
//!
//! ```text
//! {storage_root}/
//! ├── catalog.json            # All document metadata + global facets
//! ├── {document-id-1}/
//! │   ├── body.md             # Raw content
//! │   ├── config.yaml         # Metadata mirror (never read back)
//! │   └── assets/             # Arbitrary binary files
//! └── {document-id-2}/
//! ```

mod file_store;
mod manager;
mod validator;

pub use file_store::{
    DocumentFiles, FileStore, ASSETS_DIR, BODY_FILE, CATALOG_FILE, CONFIG_FILE,
};
pub use manager::{StorageManager, StorageOptions};
pub use validator::{IncompleteDocument, ValidationReport, Validator};
