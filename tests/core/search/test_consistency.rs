// The index must agree with a brute-force scan of the catalog after any
// sequence of mutations.

use crate::common::{linear_scan, manual_storage, seed_sample_posts};
use folio::core::types::{CreateDocumentInput, ListOptions, UpdateDocumentInput};
use std::collections::BTreeSet;

fn probe_options() -> Vec<ListOptions> {
    vec![
        ListOptions::default(),
        ListOptions::default().query("hello"),
        ListOptions::default().query("rust"),
        ListOptions::default().query("error handling"),
        ListOptions::default().query("notes spring"),
        ListOptions::default().query("nothing-matches-this"),
        ListOptions::default().categories(["tech"]),
        ListOptions::default().categories(["life", "travel"]),
        ListOptions::default().tags(["rust", "intro"]),
        ListOptions::default().query("rust").tags(["async"]),
        ListOptions::default().published_only(),
        ListOptions::default()
            .published_only()
            .categories(["tech"])
            .query("rust"),
    ]
}

async fn assert_matches_scan(storage: &folio::core::storage::StorageManager) {
    let everything = storage
        .list_documents(ListOptions::default())
        .await
        .unwrap()
        .items;

    for options in probe_options() {
        let expected = linear_scan(&everything, &options);
        let actual: BTreeSet<String> = storage
            .list_documents(options.clone())
            .await
            .unwrap()
            .items
            .into_iter()
            .map(|m| m.id)
            .collect();
        assert_eq!(actual, expected, "mismatch for {options:?}");
    }
}

#[tokio::test]
async fn test_index_matches_scan_after_mutations() {
    let (storage, clock, _temp) = manual_storage().await;
    seed_sample_posts(&storage, &clock).await;
    assert_matches_scan(&storage).await;

    storage
        .update_document(
            "garden-notes",
            UpdateDocumentInput {
                title: Some("Travel Notes: Rust Belt".to_string()),
                categories: Some(BTreeSet::from(["travel".to_string()])),
                tags: Some(BTreeSet::from(["rust".to_string()])),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_matches_scan(&storage).await;

    storage.delete_document("hello-world").await.unwrap();
    assert_matches_scan(&storage).await;

    storage
        .create_document(
            CreateDocumentInput::new("hello-again", "Hello Hello Again", "x")
                .published(true)
                .with_categories(["tech"])
                .with_tags(["intro"]),
        )
        .await
        .unwrap();
    assert_matches_scan(&storage).await;

    storage
        .update_document(
            "hello-again",
            UpdateDocumentInput {
                published: Some(false),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_matches_scan(&storage).await;
}

#[tokio::test]
async fn test_facets_match_documents_in_use() {
    let (storage, clock, _temp) = manual_storage().await;
    seed_sample_posts(&storage, &clock).await;

    for id in ["hello-world", "async-rust", "rust-errors"] {
        storage.delete_document(id).await.unwrap();
    }

    let taxonomy = storage.taxonomy().await;
    assert_eq!(taxonomy.categories, BTreeSet::from(["life".to_string()]));
    assert_eq!(
        taxonomy.tags,
        BTreeSet::from([
            "garden".to_string(),
            "intro".to_string(),
            "misc".to_string()
        ])
    );
}
