// Test helper functions

use super::fixtures::sample_posts;
use folio::core::clock::ManualClock;
use folio::core::config::Config;
use folio::core::services::Services;
use folio::core::storage::{StorageManager, StorageOptions};
use folio::core::types::{CreateDocumentInput, DocumentMeta, ListOptions};
use std::collections::BTreeSet;
use std::sync::Arc;
use tempfile::TempDir;

/// Create test services with temporary storage
#[allow(dead_code)]
pub async fn create_test_services() -> (Services, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let mut config = Config::default();
    config.storage.root_dir = temp_dir.path().join("documents");

    let services = Services::open(config)
        .await
        .expect("Failed to open services");
    (services, temp_dir)
}

/// Storage manager driven by a manual clock
#[allow(dead_code)]
pub async fn manual_storage() -> (StorageManager, Arc<ManualClock>, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let clock = Arc::new(ManualClock::fixed());
    let options = StorageOptions::default().with_clock(clock.clone());

    let storage = StorageManager::open_with(temp_dir.path().join("documents"), options)
        .await
        .expect("Failed to open storage");
    (storage, clock, temp_dir)
}

/// Create the sample posts, one second apart in fixture order
#[allow(dead_code)]
pub async fn seed_sample_posts(storage: &StorageManager, clock: &ManualClock) {
    for post in sample_posts() {
        let input = CreateDocumentInput::new(post.id, post.title, post.content)
            .published(post.published)
            .with_tags(post.tags.iter().copied())
            .with_categories(post.categories.iter().copied());
        storage
            .create_document(input)
            .await
            .expect("Failed to create sample post");
        clock.advance_millis(1_000);
    }
}

/// Create `count` documents `doc-01`.. with increasing creation times
#[allow(dead_code)]
pub async fn seed_numbered_documents(storage: &StorageManager, clock: &ManualClock, count: usize) {
    for i in 1..=count {
        let input = CreateDocumentInput::new(
            format!("doc-{i:02}"),
            format!("Numbered Post {i}"),
            format!("Body of post {i}"),
        )
        .published(i % 2 == 0);
        storage
            .create_document(input)
            .await
            .expect("Failed to create numbered document");
        clock.advance_millis(1_000);
    }
}

/// Filter `documents` by brute force the way `list_documents` should
#[allow(dead_code)]
pub fn linear_scan<'a>(
    documents: impl IntoIterator<Item = &'a DocumentMeta>,
    options: &ListOptions,
) -> BTreeSet<String> {
    let query_tokens: Vec<String> = options
        .query
        .as_deref()
        .map(folio::core::search::tokenize)
        .unwrap_or_default();
    let query_given = options
        .query
        .as_deref()
        .is_some_and(|q| !q.trim().is_empty());

    documents
        .into_iter()
        .filter(|meta| {
            if !query_given {
                return true;
            }
            let title_tokens = folio::core::search::unique_tokens(&meta.title);
            !query_tokens.is_empty() && query_tokens.iter().all(|t| title_tokens.contains(t))
        })
        .filter(|meta| match options.categories.as_deref() {
            Some(wanted) if !wanted.is_empty() => {
                wanted.iter().any(|c| meta.categories.contains(c))
            }
            _ => true,
        })
        .filter(|meta| match options.tags.as_deref() {
            Some(wanted) if !wanted.is_empty() => wanted.iter().any(|t| meta.tags.contains(t)),
            _ => true,
        })
        .filter(|meta| !options.published_only || meta.published)
        .map(|meta| meta.id.clone())
        .collect()
}
