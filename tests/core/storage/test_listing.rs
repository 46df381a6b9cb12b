// Integration tests for list_documents filtering, ordering and pagination

use crate::common::{manual_storage, seed_numbered_documents, seed_sample_posts};
use folio::core::types::ListOptions;

fn ids(items: &[folio::core::types::DocumentMeta]) -> Vec<&str> {
    items.iter().map(|m| m.id.as_str()).collect()
}

#[tokio::test]
async fn test_list_all_newest_first() {
    let (storage, clock, _temp) = manual_storage().await;
    seed_sample_posts(&storage, &clock).await;

    let result = storage.list_documents(ListOptions::default()).await.unwrap();
    assert_eq!(result.total, 5);
    assert_eq!(
        ids(&result.items),
        vec![
            "rust-errors",
            "garden-notes",
            "async-rust",
            "hello-there",
            "hello-world"
        ]
    );
}

#[tokio::test]
async fn test_second_page_of_twelve() {
    let (storage, clock, _temp) = manual_storage().await;
    seed_numbered_documents(&storage, &clock, 12).await;

    let result = storage
        .list_documents(ListOptions::default().page(2, 5))
        .await
        .unwrap();

    assert_eq!(result.total, 12);
    // Newest first: ranks 6..=10 are doc-07 down to doc-03
    assert_eq!(
        ids(&result.items),
        vec!["doc-07", "doc-06", "doc-05", "doc-04", "doc-03"]
    );
}

#[tokio::test]
async fn test_page_past_the_end_is_empty() {
    let (storage, clock, _temp) = manual_storage().await;
    seed_numbered_documents(&storage, &clock, 3).await;

    let result = storage
        .list_documents(ListOptions::default().page(4, 5))
        .await
        .unwrap();
    assert_eq!(result.total, 3);
    assert!(result.items.is_empty());
}

#[tokio::test]
async fn test_zero_page_size_disables_pagination() {
    let (storage, clock, _temp) = manual_storage().await;
    seed_numbered_documents(&storage, &clock, 4).await;

    let result = storage
        .list_documents(ListOptions::default().page(1, 0))
        .await
        .unwrap();
    assert_eq!(result.items.len(), 4);

    let only_page = ListOptions {
        page: Some(2),
        ..Default::default()
    };
    let result = storage.list_documents(only_page).await.unwrap();
    assert_eq!(result.items.len(), 4);
}

#[tokio::test]
async fn test_query_matches_all_title_words() {
    let (storage, clock, _temp) = manual_storage().await;
    seed_sample_posts(&storage, &clock).await;

    let result = storage
        .list_documents(ListOptions::default().query("HELLO"))
        .await
        .unwrap();
    assert_eq!(ids(&result.items), vec!["hello-there", "hello-world"]);

    let result = storage
        .list_documents(ListOptions::default().query("rust in"))
        .await
        .unwrap();
    assert_eq!(ids(&result.items), vec!["rust-errors", "async-rust"]);

    let result = storage
        .list_documents(ListOptions::default().query("rust garden"))
        .await
        .unwrap();
    assert_eq!(result.total, 0);
}

#[tokio::test]
async fn test_blank_query_means_no_query() {
    let (storage, clock, _temp) = manual_storage().await;
    seed_sample_posts(&storage, &clock).await;

    let result = storage
        .list_documents(ListOptions::default().query("   "))
        .await
        .unwrap();
    assert_eq!(result.total, 5);
}

#[tokio::test]
async fn test_punctuation_only_query_matches_nothing() {
    let (storage, clock, _temp) = manual_storage().await;
    seed_sample_posts(&storage, &clock).await;

    let result = storage
        .list_documents(ListOptions::default().query("?!"))
        .await
        .unwrap();
    assert_eq!(result.total, 0);
}

#[tokio::test]
async fn test_category_and_tag_filters() {
    let (storage, clock, _temp) = manual_storage().await;
    seed_sample_posts(&storage, &clock).await;

    let tech = storage
        .list_documents(ListOptions::default().categories(["tech"]))
        .await
        .unwrap();
    assert_eq!(
        ids(&tech.items),
        vec!["rust-errors", "async-rust", "hello-world"]
    );

    // Any-of within a facet, all-of across facets
    let mixed = storage
        .list_documents(
            ListOptions::default()
                .categories(["tech", "life"])
                .tags(["intro"]),
        )
        .await
        .unwrap();
    assert_eq!(ids(&mixed.items), vec!["hello-there", "hello-world"]);

    let none = storage
        .list_documents(ListOptions::default().tags(["nonexistent"]))
        .await
        .unwrap();
    assert_eq!(none.total, 0);
}

#[tokio::test]
async fn test_empty_filter_lists_are_ignored() {
    let (storage, clock, _temp) = manual_storage().await;
    seed_sample_posts(&storage, &clock).await;

    let options = ListOptions {
        categories: Some(vec![]),
        tags: Some(vec![]),
        ..Default::default()
    };
    assert_eq!(storage.list_documents(options).await.unwrap().total, 5);
}

#[tokio::test]
async fn test_published_only_applies_before_pagination() {
    let (storage, clock, _temp) = manual_storage().await;
    seed_numbered_documents(&storage, &clock, 10).await;

    let result = storage
        .list_documents(ListOptions::default().published_only().page(1, 3))
        .await
        .unwrap();
    assert_eq!(result.total, 5);
    assert_eq!(ids(&result.items), vec!["doc-10", "doc-08", "doc-06"]);
}

#[tokio::test]
async fn test_equal_timestamps_order_by_id() {
    let (storage, _clock, _temp) = manual_storage().await;
    for id in ["c", "a", "b"] {
        storage
            .create_document(folio::core::types::CreateDocumentInput::new(id, id, "x"))
            .await
            .unwrap();
    }

    let result = storage.list_documents(ListOptions::default()).await.unwrap();
    assert_eq!(ids(&result.items), vec!["a", "b", "c"]);
}

#[tokio::test]
async fn test_content_search_is_opt_in() {
    let (storage, clock, _temp) = manual_storage().await;
    seed_sample_posts(&storage, &clock).await;

    let titles_only = storage
        .list_documents(ListOptions::default().query("Tomatoes"))
        .await
        .unwrap();
    assert_eq!(titles_only.total, 0);

    let with_bodies = storage
        .list_documents(ListOptions::default().query("Tomatoes").search_content())
        .await
        .unwrap();
    assert_eq!(ids(&with_bodies.items), vec!["garden-notes"]);

    // Case-insensitive substring, unioned with title matches
    let result = storage
        .list_documents(ListOptions::default().query("TOKIO").search_content())
        .await
        .unwrap();
    assert_eq!(ids(&result.items), vec!["async-rust"]);

    let result = storage
        .list_documents(ListOptions::default().query("hello").search_content())
        .await
        .unwrap();
    assert_eq!(result.total, 2);
}

#[tokio::test]
async fn test_content_search_respects_filters() {
    let (storage, clock, _temp) = manual_storage().await;
    seed_sample_posts(&storage, &clock).await;

    let options = ListOptions::default()
        .query("tomatoes")
        .search_content()
        .categories(["tech"]);
    assert_eq!(storage.list_documents(options).await.unwrap().total, 0);

    let options = ListOptions::default()
        .query("anyhow")
        .search_content()
        .published_only();
    assert_eq!(storage.list_documents(options).await.unwrap().total, 0);
}

#[tokio::test]
async fn test_content_search_reads_uncached_bodies() {
    let (storage, clock, _temp) = manual_storage().await;
    seed_sample_posts(&storage, &clock).await;
    let root = storage.root().to_path_buf();
    drop(storage);

    let reopened = folio::core::storage::StorageManager::open(&root)
        .await
        .unwrap();
    assert_eq!(reopened.cache_stats().await.items, 0);

    let result = reopened
        .list_documents(ListOptions::default().query("thiserror").search_content())
        .await
        .unwrap();
    assert_eq!(ids(&result.items), vec!["rust-errors"]);
    assert!(reopened.cache_stats().await.items > 0);

    // A document without a body is skipped, not an error
    std::fs::remove_file(root.join("garden-notes").join("body.md")).unwrap();
    let fresh = folio::core::storage::StorageManager::open(&root)
        .await
        .unwrap();
    let result = fresh
        .list_documents(ListOptions::default().query("tomatoes").search_content())
        .await
        .unwrap();
    assert_eq!(result.total, 0);
}
