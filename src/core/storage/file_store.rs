//! On-disk layout of the document tree.
//!
//! `FileStore` is the only component that touches the filesystem. It
//! knows nothing about indexing or caching; callers decide when to
//! persist the catalog.

use crate::core::clock::{Clock, SystemClock};
use crate::core::error::{FolioError, Result};
use crate::core::types::{AssetData, Catalog, DocumentConfig};
use chrono::{DateTime, Utc};
use futures::future::join_all;
use std::fmt;
use std::future::Future;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;

pub const CATALOG_FILE: &str = "catalog.json";
pub const BODY_FILE: &str = "body.md";
pub const CONFIG_FILE: &str = "config.yaml";
pub const ASSETS_DIR: &str = "assets";

/// Presence of a document directory's files
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentFiles {
    pub has_body: bool,
    pub has_config: bool,
}

impl DocumentFiles {
    pub fn is_complete(&self) -> bool {
        self.has_body && self.has_config
    }
}

/// Filesystem access for the document tree rooted at `root`
#[derive(Clone)]
pub struct FileStore {
    root: PathBuf,
    clock: Arc<dyn Clock>,
}

impl fmt::Debug for FileStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileStore").field("root", &self.root).finish()
    }
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            clock: Arc::new(SystemClock),
        }
    }

    /// Stamp fresh catalogs with `clock` instead of wall-clock time
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get catalog file path
    pub fn catalog_path(&self) -> PathBuf {
        self.root.join(CATALOG_FILE)
    }

    /// Get document directory path
    pub fn document_dir(&self, id: &str) -> PathBuf {
        self.root.join(id)
    }

    fn body_path(&self, id: &str) -> PathBuf {
        self.document_dir(id).join(BODY_FILE)
    }

    fn config_path(&self, id: &str) -> PathBuf {
        self.document_dir(id).join(CONFIG_FILE)
    }

    fn assets_dir(&self, id: &str) -> PathBuf {
        self.document_dir(id).join(ASSETS_DIR)
    }

    fn asset_path(&self, id: &str, name: &str) -> PathBuf {
        self.assets_dir(id).join(name)
    }

    /// Create the root directory and an empty catalog if none exists
    pub async fn init(&self) -> Result<()> {
        fs::create_dir_all(&self.root).await?;

        if !fs::try_exists(self.catalog_path()).await? {
            tracing::info!("Creating empty catalog at {:?}", self.catalog_path());
            self.save_catalog(&Catalog::empty(self.clock.now())).await?;
        }

        Ok(())
    }

    /// Read the catalog. A missing or unreadable catalog is logged and
    /// replaced by an empty one; this never fails.
    pub async fn load_catalog(&self) -> Catalog {
        let path = self.catalog_path();

        let contents = match fs::read_to_string(&path).await {
            Ok(contents) => contents,
            Err(e) => {
                tracing::error!("Failed to read catalog {:?}: {}", path, e);
                return Catalog::empty(self.clock.now());
            }
        };

        match serde_json::from_str(&contents) {
            Ok(catalog) => catalog,
            Err(e) => {
                tracing::error!("Failed to parse catalog {:?}: {}", path, e);
                Catalog::empty(self.clock.now())
            }
        }
    }

    /// Replace the catalog file as a whole
    pub async fn save_catalog(&self, catalog: &Catalog) -> Result<()> {
        let json = serde_json::to_string_pretty(catalog)?;
        let path = self.catalog_path();
        let tmp = path.with_extension("json.tmp");

        fs::write(&tmp, json).await?;
        fs::rename(&tmp, &path).await?;

        Ok(())
    }

    pub async fn read_body(&self, id: &str) -> Result<String> {
        fs::read_to_string(self.body_path(id))
            .await
            .map_err(|e| document_error(e, id))
    }

    pub async fn write_body(&self, id: &str, content: &str) -> Result<()> {
        fs::write(self.body_path(id), content)
            .await
            .map_err(|e| document_error(e, id))
    }

    pub async fn read_config(&self, id: &str) -> Result<DocumentConfig> {
        let contents = fs::read_to_string(self.config_path(id))
            .await
            .map_err(|e| document_error(e, id))?;
        Ok(serde_yaml::from_str(&contents)?)
    }

    pub async fn write_config(&self, id: &str, config: &DocumentConfig) -> Result<()> {
        let yaml = serde_yaml::to_string(config)?;
        fs::write(self.config_path(id), yaml)
            .await
            .map_err(|e| document_error(e, id))
    }

    /// Whether a directory for `id` exists on disk
    pub async fn document_dir_exists(&self, id: &str) -> bool {
        fs::try_exists(self.document_dir(id)).await.unwrap_or(false)
    }

    /// Which of the expected files exist under `<id>/`
    pub async fn inspect_document_dir(&self, id: &str) -> Result<DocumentFiles> {
        Ok(DocumentFiles {
            has_body: fs::try_exists(self.body_path(id)).await?,
            has_config: fs::try_exists(self.config_path(id)).await?,
        })
    }

    /// Create `<id>/` and `<id>/assets/`.
    ///
    /// Fails if the directory already exists. The catalog is not consulted.
    pub async fn create_document_dir(&self, id: &str) -> Result<()> {
        let dir = self.document_dir(id);

        match fs::create_dir(&dir).await {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                return Err(FolioError::DocumentAlreadyExists(id.to_string()));
            }
            Err(e) => return Err(e.into()),
        }

        fs::create_dir(self.assets_dir(id)).await?;
        Ok(())
    }

    /// Recursively delete `<id>/`
    pub async fn delete_document_dir(&self, id: &str) -> Result<()> {
        fs::remove_dir_all(self.document_dir(id))
            .await
            .map_err(|e| document_error(e, id))
    }

    /// Asset filenames, sorted. A missing asset directory lists as empty.
    pub async fn list_assets(&self, id: &str) -> Result<Vec<String>> {
        let mut entries = match fs::read_dir(self.assets_dir(id)).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            if let Some(name) = entry.file_name().to_str() {
                names.push(name.to_string());
            }
        }
        names.sort();

        Ok(names)
    }

    pub async fn read_asset(&self, id: &str, name: &str) -> Result<AssetData> {
        let path = self.asset_path(id, name);

        let bytes = fs::read(&path)
            .await
            .map_err(|e| asset_error(e, id, name))?;
        let metadata = fs::metadata(&path)
            .await
            .map_err(|e| asset_error(e, id, name))?;
        let last_modified = metadata
            .modified()
            .map(DateTime::<Utc>::from)
            .unwrap_or_else(|_| self.clock.now());

        Ok(AssetData {
            size: metadata.len(),
            bytes,
            last_modified,
        })
    }

    /// Write an asset, returning its path on disk
    pub async fn write_asset(&self, id: &str, name: &str, bytes: &[u8]) -> Result<PathBuf> {
        if !self.document_dir_exists(id).await {
            return Err(FolioError::DocumentNotFound(id.to_string()));
        }

        fs::create_dir_all(self.assets_dir(id)).await?;
        let path = self.asset_path(id, name);
        fs::write(&path, bytes).await?;

        Ok(path)
    }

    pub async fn delete_asset(&self, id: &str, name: &str) -> Result<()> {
        fs::remove_file(self.asset_path(id, name))
            .await
            .map_err(|e| asset_error(e, id, name))
    }

    /// Apply `visitor` to every document directory name under the root,
    /// `batch_size` at a time concurrently, collecting the `Some` results.
    ///
    /// The catalog file and other plain files are skipped. Result order
    /// across batches is not guaranteed to mean anything; a visitor error
    /// stops the scan.
    pub async fn for_each_document_dir<T, F, Fut>(
        &self,
        visitor: F,
        batch_size: usize,
    ) -> Result<Vec<T>>
    where
        F: Fn(String) -> Fut,
        Fut: Future<Output = Result<Option<T>>>,
    {
        let mut names = Vec::new();
        let mut entries = fs::read_dir(&self.root).await?;

        while let Some(entry) = entries.next_entry().await? {
            let Ok(name) = entry.file_name().into_string() else {
                tracing::warn!("Skipping non UTF-8 entry {:?}", entry.path());
                continue;
            };
            if name == CATALOG_FILE || !entry.file_type().await?.is_dir() {
                continue;
            }
            names.push(name);
        }
        names.sort();

        let mut results = Vec::new();
        for batch in names.chunks(batch_size.max(1)) {
            let outcomes = join_all(batch.iter().cloned().map(&visitor)).await;
            for outcome in outcomes {
                if let Some(value) = outcome? {
                    results.push(value);
                }
            }
        }

        Ok(results)
    }
}

fn document_error(err: io::Error, id: &str) -> FolioError {
    if err.kind() == io::ErrorKind::NotFound {
        FolioError::DocumentNotFound(id.to_string())
    } else {
        FolioError::IoError(err)
    }
}

fn asset_error(err: io::Error, id: &str, name: &str) -> FolioError {
    if err.kind() == io::ErrorKind::NotFound {
        FolioError::AssetNotFound {
            id: id.to_string(),
            name: name.to_string(),
        }
    } else {
        FolioError::IoError(err)
    }
}
