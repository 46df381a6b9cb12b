//! Folio - file-backed content store for blog documents
//!
//! Each document lives in its own directory (markdown body, YAML metadata
//! mirror, binary assets) under one root, described by a single JSON
//! catalog. An in-memory inverted index serves title search and
//! category/tag filtering, and a bounded LRU cache keeps hot bodies in
//! memory.
//!
//! # Architecture
//!
//! - **core**: Domain logic
//!   - config, error, types, xdg
//!   - cache (LRU content cache)
//!   - search (inverted index)
//!   - storage (file store, storage manager, validator)
//!   - services (service container)
//!
//! - **cli**: `folio` command-line adapter (depends on core)

pub mod cli;
pub mod core;

pub use core::cache::{CacheLimits, ContentCache};
pub use core::config::Config;
pub use core::error::{FolioError, Result};
pub use core::search::SearchIndex;
pub use core::services::Services;
pub use core::storage::{FileStore, StorageManager, StorageOptions};
pub use core::types::*;
