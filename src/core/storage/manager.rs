//! Document storage management.
//!
//! `StorageManager` is the only entry point other subsystems use. It owns
//! the file store, the in-memory catalog, the search index and the content
//! cache, and keeps them consistent across every operation.
//!
//! Every operation runs under one async mutex, so concurrent create,
//! update and delete calls cannot interleave their catalog
//! read-modify-write cycles and lose each other's changes.

use crate::core::cache::{CacheLimits, CacheStats, ContentCache};
use crate::core::clock::{Clock, SystemClock};
use crate::core::error::{FolioError, Result};
use crate::core::preview::{Summarizer, TextPreview};
use crate::core::search::SearchIndex;
use crate::core::storage::file_store::FileStore;
use crate::core::storage::validator::{ValidationReport, Validator};
use crate::core::types::{
    AssetData, Catalog, CreateDocumentInput, Document, DocumentMeta, ListOptions, ListResult,
    Taxonomy, UpdateDocumentInput,
};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Collaborators and limits for a `StorageManager`
#[derive(Clone)]
pub struct StorageOptions {
    pub cache_limits: CacheLimits,
    pub clock: Arc<dyn Clock>,
    pub summarizer: Arc<dyn Summarizer>,
}

impl Default for StorageOptions {
    fn default() -> Self {
        Self {
            cache_limits: CacheLimits::default(),
            clock: Arc::new(SystemClock),
            summarizer: Arc::new(TextPreview::default()),
        }
    }
}

impl StorageOptions {
    pub fn with_cache_limits(mut self, limits: CacheLimits) -> Self {
        self.cache_limits = limits;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_summarizer(mut self, summarizer: Arc<dyn Summarizer>) -> Self {
        self.summarizer = summarizer;
        self
    }
}

/// Mutable state guarded by the manager's lock
struct State {
    catalog: Catalog,
    index: SearchIndex,
    cache: ContentCache<String>,
}

/// File-backed document store
pub struct StorageManager {
    files: FileStore,
    state: Mutex<State>,
    clock: Arc<dyn Clock>,
    summarizer: Arc<dyn Summarizer>,
}

impl StorageManager {
    /// Open (initializing if needed) the document tree at `root` with
    /// default options
    pub async fn open(root: impl Into<PathBuf>) -> Result<Self> {
        Self::open_with(root, StorageOptions::default()).await
    }

    /// Open the document tree at `root`: create it if missing, load the
    /// catalog and rebuild the search index from it.
    pub async fn open_with(root: impl Into<PathBuf>, options: StorageOptions) -> Result<Self> {
        let files = FileStore::new(root).with_clock(options.clock.clone());
        files.init().await?;

        let catalog = files.load_catalog().await;
        let mut index = SearchIndex::new();
        index.rebuild(&catalog.documents);

        tracing::info!(
            "Opened document store at {:?} ({} documents)",
            files.root(),
            catalog.documents.len()
        );

        let cache = ContentCache::with_clock(options.cache_limits, options.clock.clone());

        Ok(Self {
            files,
            state: Mutex::new(State {
                catalog,
                index,
                cache,
            }),
            clock: options.clock,
            summarizer: options.summarizer,
        })
    }

    /// Root directory of the document tree
    pub fn root(&self) -> &Path {
        self.files.root()
    }

    /// Create a new document.
    ///
    /// Fails with `DocumentAlreadyExists` if the id is already catalogued.
    /// If anything fails after the directory was created, the directory is
    /// removed again; a failed removal is reported as `Inconsistent`.
    pub async fn create_document(&self, input: CreateDocumentInput) -> Result<Document> {
        let CreateDocumentInput {
            id,
            title,
            content,
            published,
            tags,
            categories,
        } = input;
        let mut state = self.state.lock().await;

        if state.catalog.documents.contains_key(&id) {
            return Err(FolioError::DocumentAlreadyExists(id));
        }

        let now = self.clock.now();
        let meta = DocumentMeta {
            id: id.clone(),
            title,
            description: self.summarizer.summarize(&content),
            created_at: now,
            updated_at: now,
            published,
            tags,
            categories,
        };

        self.files.create_document_dir(&id).await?;

        let written = async {
            self.files.write_body(&id, &content).await?;
            self.files.write_config(&id, &meta.to_config()).await
        }
        .await;
        if let Err(e) = written {
            return Err(self.abort_create(&id, e).await);
        }

        let previous_update = state.catalog.last_updated;
        state.catalog.documents.insert(id.clone(), meta.clone());
        state.catalog.last_updated = now;
        state.catalog.refresh_facets();

        if let Err(e) = self.files.save_catalog(&state.catalog).await {
            state.catalog.documents.remove(&id);
            state.catalog.last_updated = previous_update;
            state.catalog.refresh_facets();
            return Err(self.abort_create(&id, e).await);
        }

        state.index.add(&id, &meta);
        cache_body(&mut state.cache, &id, content.clone());

        tracing::info!("Created document '{}'", id);

        Ok(Document {
            meta,
            content,
            assets: Vec::new(),
        })
    }

    /// Fetch a document: cached body when live, assets always from disk
    pub async fn get_document(&self, id: &str) -> Result<Document> {
        let mut state = self.state.lock().await;
        let meta = catalog_entry(&state, id)?;
        self.load_document(&mut state, meta).await
    }

    /// Overlay the provided fields onto an existing document.
    ///
    /// `created_at` is kept, `updated_at` refreshed, and the description is
    /// recomputed only when new content is supplied. Returns the reloaded
    /// document.
    ///
    /// If writing the files or the catalog fails, the previous body and
    /// config are written back; a failed restore is reported as
    /// `Inconsistent`.
    pub async fn update_document(&self, id: &str, input: UpdateDocumentInput) -> Result<Document> {
        let UpdateDocumentInput {
            title,
            content,
            published,
            tags,
            categories,
        } = input;
        let mut state = self.state.lock().await;
        let old = catalog_entry(&state, id)?;

        let now = self.clock.now();
        let mut new = old.clone();
        if let Some(title) = title {
            new.title = title;
        }
        if let Some(content) = &content {
            new.description = self.summarizer.summarize(content);
        }
        if let Some(published) = published {
            new.published = published;
        }
        if let Some(tags) = tags {
            new.tags = tags;
        }
        if let Some(categories) = categories {
            new.categories = categories;
        }
        new.updated_at = now;

        let previous_body = match content {
            Some(_) => match state.cache.get(id) {
                Some(body) => Some(body),
                None => self.files.read_body(id).await.ok(),
            },
            None => None,
        };
        let body_changed = content.is_some();

        let written = async {
            if let Some(content) = &content {
                self.files.write_body(id, content).await?;
            }
            self.files.write_config(id, &new.to_config()).await
        }
        .await;
        if let Err(e) = written {
            state.cache.delete(id);
            return Err(self
                .abort_update(id, &old, body_changed, previous_body.as_deref(), e)
                .await);
        }

        let previous_update = state.catalog.last_updated;
        state.catalog.documents.insert(id.to_string(), new.clone());
        state.catalog.last_updated = now;
        state.catalog.refresh_facets();

        if let Err(e) = self.files.save_catalog(&state.catalog).await {
            state.catalog.documents.insert(id.to_string(), old.clone());
            state.catalog.last_updated = previous_update;
            state.catalog.refresh_facets();
            state.cache.delete(id);
            return Err(self
                .abort_update(id, &old, body_changed, previous_body.as_deref(), e)
                .await);
        }

        state.index.update(id, &old, &new);
        if let Some(content) = content {
            cache_body(&mut state.cache, id, content);
        }

        tracing::info!("Updated document '{}'", id);

        self.load_document(&mut state, new).await
    }

    /// Remove a document's directory, cache entry, postings and catalog
    /// entry.
    ///
    /// The directory goes first: if that fails nothing else is touched. A
    /// catalog save failure afterwards is reported as `Inconsistent`.
    pub async fn delete_document(&self, id: &str) -> Result<()> {
        let mut state = self.state.lock().await;
        let meta = catalog_entry(&state, id)?;

        match self.files.delete_document_dir(id).await {
            Ok(()) => {}
            Err(e) if e.is_not_found() => {
                tracing::warn!("Directory for '{}' was already missing", id);
            }
            Err(e) => return Err(e),
        }

        state.cache.delete(id);
        state.index.remove(id, &meta);
        state.catalog.documents.remove(id);
        state.catalog.last_updated = self.clock.now();
        state.catalog.refresh_facets();

        if let Err(e) = self.files.save_catalog(&state.catalog).await {
            tracing::error!(
                "Deleted directory of '{}' but could not persist the catalog: {}",
                id,
                e
            );
            return Err(FolioError::Inconsistent(format!(
                "directory of '{id}' was deleted but catalog.json still lists it: {e}"
            )));
        }

        tracing::info!("Deleted document '{}'", id);
        Ok(())
    }

    /// Filter, sort (newest first) and paginate catalog entries.
    ///
    /// Published, category and tag filters narrow the catalog first. A
    /// non-blank query then keeps the title matches; with
    /// `search_content` set, documents whose body contains the query
    /// (case-insensitive) match too. Pagination applies only when both
    /// `page` and `page_size` are non-zero. `total` counts matches before
    /// pagination.
    pub async fn list_documents(&self, options: ListOptions) -> Result<ListResult> {
        let mut state = self.state.lock().await;

        let query = options
            .query
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty());
        let categories = options.categories.as_deref().filter(|c| !c.is_empty());
        let tags = options.tags.as_deref().filter(|t| !t.is_empty());

        let mut candidates: BTreeSet<String> = state
            .catalog
            .documents
            .values()
            .filter(|meta| !options.published_only || meta.published)
            .map(|meta| meta.id.clone())
            .collect();

        if let Some(categories) = categories {
            let matches = state.index.search_by_categories(categories);
            candidates.retain(|id| matches.contains(id));
        }

        if let Some(tags) = tags {
            let matches = state.index.search_by_tags(tags);
            candidates.retain(|id| matches.contains(id));
        }

        if let Some(query) = query {
            let title_matches = state.index.search(query);
            let mut matched: BTreeSet<String> =
                candidates.intersection(&title_matches).cloned().collect();

            if options.search_content {
                let needle = query.to_lowercase();
                for id in candidates.difference(&title_matches) {
                    if self.body_contains(&mut state, id, &needle).await {
                        matched.insert(id.clone());
                    }
                }
            }

            candidates = matched;
        }

        let mut items: Vec<DocumentMeta> = candidates
            .iter()
            .filter_map(|id| state.catalog.documents.get(id))
            .cloned()
            .collect();

        items.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| a.id.cmp(&b.id))
        });

        let total = items.len();

        if let (Some(page), Some(page_size)) = (options.page, options.page_size) {
            if page > 0 && page_size > 0 {
                let start = (page - 1).saturating_mul(page_size);
                items = items.into_iter().skip(start).take(page_size).collect();
            }
        }

        Ok(ListResult { items, total })
    }

    /// Categories and tags in use across all documents
    pub async fn taxonomy(&self) -> Taxonomy {
        let state = self.state.lock().await;
        Taxonomy {
            categories: state.catalog.categories.clone(),
            tags: state.catalog.tags.clone(),
        }
    }

    pub async fn get_asset(&self, id: &str, name: &str) -> Result<AssetData> {
        let state = self.state.lock().await;
        catalog_entry(&state, id)?;
        self.files.read_asset(id, name).await
    }

    /// Store an asset, returning its path on disk
    pub async fn add_asset(&self, id: &str, name: &str, bytes: &[u8]) -> Result<PathBuf> {
        let state = self.state.lock().await;
        catalog_entry(&state, id)?;
        let path = self.files.write_asset(id, name, bytes).await?;
        tracing::debug!("Stored asset '{}' for '{}' ({} bytes)", name, id, bytes.len());
        Ok(path)
    }

    pub async fn delete_asset(&self, id: &str, name: &str) -> Result<()> {
        let state = self.state.lock().await;
        catalog_entry(&state, id)?;
        self.files.delete_asset(id, name).await
    }

    pub async fn list_assets(&self, id: &str) -> Result<Vec<String>> {
        let state = self.state.lock().await;
        catalog_entry(&state, id)?;
        self.files.list_assets(id).await
    }

    /// Whether `id` is catalogued
    pub async fn contains(&self, id: &str) -> bool {
        self.state.lock().await.catalog.documents.contains_key(id)
    }

    pub async fn document_count(&self) -> usize {
        self.state.lock().await.catalog.documents.len()
    }

    pub async fn cache_stats(&self) -> CacheStats {
        self.state.lock().await.cache.stats()
    }

    /// Compare the document tree on disk against the catalog
    pub async fn verify(&self, batch_size: usize) -> Result<ValidationReport> {
        let state = self.state.lock().await;
        let ids: BTreeSet<String> = state.catalog.documents.keys().cloned().collect();
        Validator::new(&self.files).validate(&ids, batch_size).await
    }

    async fn load_document(
        &self,
        state: &mut State,
        meta: DocumentMeta,
    ) -> Result<Document> {
        let id = meta.id.clone();

        let content = match state.cache.get(&id) {
            Some(content) => content,
            None => {
                let content = self.files.read_body(&id).await?;
                cache_body(&mut state.cache, &id, content.clone());
                content
            }
        };

        let assets = self.files.list_assets(&id).await?;

        Ok(Document {
            meta,
            content,
            assets,
        })
    }

    /// Whether the body of `id` contains `needle` (already lower-cased).
    /// Cached bodies are used when live; others are read and cached.
    async fn body_contains(&self, state: &mut State, id: &str, needle: &str) -> bool {
        let body = match state.cache.get(id) {
            Some(body) => body,
            None => match self.files.read_body(id).await {
                Ok(body) => {
                    cache_body(&mut state.cache, id, body.clone());
                    body
                }
                Err(e) => {
                    tracing::warn!("Skipping body of '{}' in content search: {}", id, e);
                    return false;
                }
            },
        };
        body.to_lowercase().contains(needle)
    }

    /// Write back the files of `old` after a failed update
    async fn abort_update(
        &self,
        id: &str,
        old: &DocumentMeta,
        body_changed: bool,
        previous_body: Option<&str>,
        cause: FolioError,
    ) -> FolioError {
        let restored: Result<()> = async {
            if body_changed {
                let body = previous_body.ok_or_else(|| {
                    FolioError::Inconsistent(format!("previous body of '{id}' is unknown"))
                })?;
                self.files.write_body(id, body).await?;
            }
            self.files.write_config(id, &old.to_config()).await
        }
        .await;

        match restored {
            Ok(()) => {
                tracing::warn!("Update of '{}' failed, previous files restored: {}", id, cause);
                cause
            }
            Err(restore) => {
                tracing::error!(
                    "Update of '{}' failed ({}) and restoring its files failed: {}",
                    id,
                    cause,
                    restore
                );
                FolioError::Inconsistent(format!(
                    "update of '{id}' failed ({cause}) and its previous files could not be restored: {restore}"
                ))
            }
        }
    }

    async fn abort_create(&self, id: &str, cause: FolioError) -> FolioError {
        match self.files.delete_document_dir(id).await {
            Ok(()) => cause,
            Err(cleanup) => {
                tracing::error!(
                    "Create of '{}' failed ({}) and cleanup failed: {}",
                    id,
                    cause,
                    cleanup
                );
                FolioError::Inconsistent(format!(
                    "create of '{id}' failed ({cause}) and its directory could not be removed: {cleanup}"
                ))
            }
        }
    }
}

fn catalog_entry(state: &State, id: &str) -> Result<DocumentMeta> {
    state
        .catalog
        .documents
        .get(id)
        .cloned()
        .ok_or_else(|| FolioError::DocumentNotFound(id.to_string()))
}

/// Cache a body, dropping any stale entry when it does not fit
fn cache_body(cache: &mut ContentCache<String>, id: &str, content: String) {
    if let Err(e) = cache.set(id, content) {
        tracing::debug!("Not caching '{}': {}", id, e);
        cache.delete(id);
    }
}
