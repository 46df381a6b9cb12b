//! Service container for Folio
//!
//! Built once at process start and handed to every adapter.

use crate::core::config::Config;
use crate::core::error::Result;
use crate::core::preview::TextPreview;
use crate::core::storage::{StorageManager, StorageOptions};
use std::sync::Arc;

/// Shared services
#[derive(Clone)]
pub struct Services {
    /// The one storage manager for the configured root
    pub storage: Arc<StorageManager>,

    /// Application configuration
    pub config: Arc<Config>,
}

impl Services {
    /// Open the document tree named by `config`
    pub async fn open(config: Config) -> Result<Self> {
        let options = StorageOptions::default()
            .with_cache_limits(config.cache.limits())
            .with_summarizer(Arc::new(TextPreview::new(config.preview.max_words)));

        let storage = StorageManager::open_with(config.storage.root_dir.clone(), options).await?;

        Ok(Self {
            storage: Arc::new(storage),
            config: Arc::new(config),
        })
    }
}
