//! In-memory inverted index over titles, categories and tags.
//!
//! Postings are rebuilt from the catalog when the store opens and kept in
//! step with it incrementally afterwards. No disk I/O happens here.

use crate::core::search::query::{tokenize, unique_tokens};
use crate::core::types::DocumentMeta;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Token → document ids
type Postings = HashMap<String, BTreeSet<String>>;

/// Inverted index used for list filtering and title search
#[derive(Debug, Default)]
pub struct SearchIndex {
    title_index: Postings,
    category_index: Postings,
    tag_index: Postings,
    /// Every indexed id
    documents: BTreeSet<String>,
}

impl SearchIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop everything and index every document
    pub fn rebuild(&mut self, documents: &BTreeMap<String, DocumentMeta>) {
        self.clear();
        for (id, meta) in documents {
            self.add(id, meta);
        }
        tracing::debug!(
            "Search index rebuilt: {} documents, {} title terms",
            self.documents.len(),
            self.title_index.len()
        );
    }

    pub fn add(&mut self, id: &str, meta: &DocumentMeta) {
        for token in unique_tokens(&meta.title) {
            insert_posting(&mut self.title_index, token, id);
        }
        for category in &meta.categories {
            insert_posting(&mut self.category_index, category.clone(), id);
        }
        for tag in &meta.tags {
            insert_posting(&mut self.tag_index, tag.clone(), id);
        }
        self.documents.insert(id.to_string());
    }

    /// Exact inverse of `add` for the same `meta`
    pub fn remove(&mut self, id: &str, meta: &DocumentMeta) {
        for token in unique_tokens(&meta.title) {
            remove_posting(&mut self.title_index, &token, id);
        }
        for category in &meta.categories {
            remove_posting(&mut self.category_index, category, id);
        }
        for tag in &meta.tags {
            remove_posting(&mut self.tag_index, tag, id);
        }
        self.documents.remove(id);
    }

    pub fn update(&mut self, id: &str, old: &DocumentMeta, new: &DocumentMeta) {
        self.remove(id, old);
        self.add(id, new);
    }

    /// Ids whose titles contain every token of `query`.
    ///
    /// A query with no tokens matches nothing.
    pub fn search(&self, query: &str) -> BTreeSet<String> {
        let mut result: Option<BTreeSet<String>> = None;

        for token in tokenize(query) {
            let matches = self.title_index.get(&token);
            result = Some(match (result, matches) {
                (None, Some(ids)) => ids.clone(),
                (Some(acc), Some(ids)) => acc.intersection(ids).cloned().collect(),
                (_, None) => BTreeSet::new(),
            });

            if result.as_ref().is_some_and(BTreeSet::is_empty) {
                break;
            }
        }

        result.unwrap_or_default()
    }

    /// Ids in any of the given categories
    pub fn search_by_categories<S: AsRef<str>>(&self, categories: &[S]) -> BTreeSet<String> {
        union_postings(&self.category_index, categories)
    }

    /// Ids carrying any of the given tags
    pub fn search_by_tags<S: AsRef<str>>(&self, tags: &[S]) -> BTreeSet<String> {
        union_postings(&self.tag_index, tags)
    }

    pub fn clear(&mut self) {
        self.title_index.clear();
        self.category_index.clear();
        self.tag_index.clear();
        self.documents.clear();
    }

    /// Number of indexed documents
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.documents.contains(id)
    }

    /// Distinct title tokens
    pub fn term_count(&self) -> usize {
        self.title_index.len()
    }
}

fn insert_posting(index: &mut Postings, key: String, id: &str) {
    index.entry(key).or_default().insert(id.to_string());
}

fn remove_posting(index: &mut Postings, key: &str, id: &str) {
    if let Some(ids) = index.get_mut(key) {
        ids.remove(id);
        if ids.is_empty() {
            index.remove(key);
        }
    }
}

fn union_postings<S: AsRef<str>>(index: &Postings, keys: &[S]) -> BTreeSet<String> {
    keys.iter()
        .filter_map(|key| index.get(key.as_ref()))
        .flat_map(|ids| ids.iter().cloned())
        .collect()
}
