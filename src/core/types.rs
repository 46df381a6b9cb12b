//! Core data types for the Folio document store.
//!
//! Field names serialize in camelCase so `catalog.json` and
//! `config.yaml` stay compatible with existing blog trees.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Catalog entry for one document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentMeta {
    /// Unique id, also the directory name
    pub id: String,

    pub title: String,

    /// Preview derived from the content
    #[serde(default)]
    pub description: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    #[serde(default)]
    pub published: bool,

    #[serde(default)]
    pub tags: BTreeSet<String>,

    #[serde(default)]
    pub categories: BTreeSet<String>,
}

impl DocumentMeta {
    /// The `config.yaml` mirror of this entry
    pub fn to_config(&self) -> DocumentConfig {
        DocumentConfig {
            title: self.title.clone(),
            description: self.description.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
            published: self.published,
            tags: self.tags.clone(),
            categories: self.categories.clone(),
        }
    }
}

/// A document as returned to callers: metadata, body and asset names
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    #[serde(flatten)]
    pub meta: DocumentMeta,

    pub content: String,

    /// Filenames in the asset directory, sorted
    pub assets: Vec<String>,
}

/// Per-document `config.yaml`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentConfig {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub published: bool,
    #[serde(default)]
    pub tags: BTreeSet<String>,
    #[serde(default)]
    pub categories: BTreeSet<String>,
}

/// The persisted `catalog.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    pub last_updated: DateTime<Utc>,

    #[serde(default)]
    pub documents: BTreeMap<String, DocumentMeta>,

    /// Union of categories across all documents
    #[serde(default)]
    pub categories: BTreeSet<String>,

    /// Union of tags across all documents
    #[serde(default)]
    pub tags: BTreeSet<String>,
}

impl Catalog {
    /// An empty catalog stamped with `now`
    pub fn empty(now: DateTime<Utc>) -> Self {
        Self {
            last_updated: now,
            documents: BTreeMap::new(),
            categories: BTreeSet::new(),
            tags: BTreeSet::new(),
        }
    }

    /// Recompute the global facet sets from the documents
    pub fn refresh_facets(&mut self) {
        self.categories = self
            .documents
            .values()
            .flat_map(|meta| meta.categories.iter().cloned())
            .collect();
        self.tags = self
            .documents
            .values()
            .flat_map(|meta| meta.tags.iter().cloned())
            .collect();
    }
}

/// Input for `StorageManager::create_document`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateDocumentInput {
    pub id: String,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub published: bool,
    #[serde(default)]
    pub tags: BTreeSet<String>,
    #[serde(default)]
    pub categories: BTreeSet<String>,
}

impl CreateDocumentInput {
    pub fn new(id: impl Into<String>, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            content: content.into(),
            ..Default::default()
        }
    }

    pub fn published(mut self, published: bool) -> Self {
        self.published = published;
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories = categories.into_iter().map(Into::into).collect();
        self
    }
}

/// Input for `StorageManager::update_document`; `None` keeps the old value
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateDocumentInput {
    pub title: Option<String>,
    pub content: Option<String>,
    pub published: Option<bool>,
    pub tags: Option<BTreeSet<String>>,
    pub categories: Option<BTreeSet<String>>,
}

/// Filtering and pagination for `StorageManager::list_documents`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListOptions {
    /// 1-based page number
    pub page: Option<usize>,
    pub page_size: Option<usize>,
    #[serde(default)]
    pub published_only: bool,
    pub categories: Option<Vec<String>>,
    pub tags: Option<Vec<String>>,
    pub query: Option<String>,
    /// Also match the query as a substring of document bodies
    #[serde(default)]
    pub search_content: bool,
}

impl ListOptions {
    pub fn page(mut self, page: usize, page_size: usize) -> Self {
        self.page = Some(page);
        self.page_size = Some(page_size);
        self
    }

    pub fn published_only(mut self) -> Self {
        self.published_only = true;
        self
    }

    pub fn query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    pub fn search_content(mut self) -> Self {
        self.search_content = true;
        self
    }

    pub fn categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories = Some(categories.into_iter().map(Into::into).collect());
        self
    }

    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }
}

/// Result of `StorageManager::list_documents`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListResult {
    pub items: Vec<DocumentMeta>,
    /// Match count before pagination
    pub total: usize,
}

/// Global facet lists
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Taxonomy {
    pub categories: BTreeSet<String>,
    pub tags: BTreeSet<String>,
}

/// Raw asset bytes with file metadata
#[derive(Debug, Clone)]
pub struct AssetData {
    pub bytes: Vec<u8>,
    pub size: u64,
    pub last_modified: DateTime<Utc>,
}
