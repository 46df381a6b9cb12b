//! CLI command implementations
//!
//! Each command module handles argument parsing and execution for one
//! group of `StorageManager` operations.

pub mod asset;
pub mod completions;
pub mod config;
pub mod document;
pub mod list;
pub mod verify;

// Re-export argument types for use in mod.rs
pub use completions::CompletionsArgs;
pub use config::ConfigArgs;
pub use verify::VerifyArgs;
