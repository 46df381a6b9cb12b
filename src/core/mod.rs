//! Core domain logic (adapter-agnostic)
//!
//! # Architecture
//!
//! - **config**: Configuration loading (TOML + environment)
//! - **error**: Error types and Result alias
//! - **types**: Domain data structures
//! - **xdg**: XDG directory handling
//! - **clock**: Time source used for timestamps and cache expiry
//! - **preview**: Description previews from document bodies
//! - **cache**: Bounded LRU content cache
//! - **search**: Title/category/tag inverted index
//! - **storage**: File store, storage manager and validator
//! - **services**: Service container

pub mod cache;
pub mod clock;
pub mod config;
pub mod error;
pub mod preview;
pub mod search;
pub mod services;
pub mod storage;
pub mod types;
pub mod xdg;

pub use config::Config;
pub use error::{FolioError, Result};
pub use services::Services;
