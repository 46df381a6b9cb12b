//! Tests for listing CLI commands (list-documents, list-taxonomy)

use crate::cli::test_helpers::{create_cli_test_services, seeded_cli_services};
use folio::cli::commands::list::{execute_list, execute_taxonomy, ListArgs, TaxonomyArgs};
use folio::cli::OutputFormat;

#[tokio::test]
async fn test_list_empty_store() {
    let (services, _temp) = create_cli_test_services().await;

    for format in [OutputFormat::Human, OutputFormat::Json] {
        let result = execute_list(ListArgs::default(), &services, format).await;
        assert!(result.is_ok(), "List on empty store should succeed");
    }
}

#[tokio::test]
async fn test_list_with_filters() {
    let (services, _temp) = seeded_cli_services().await;

    let args = ListArgs {
        query: Some("rust".to_string()),
        categories: vec!["tech".to_string()],
        published_only: true,
        ..Default::default()
    };
    assert!(execute_list(args, &services, OutputFormat::Human).await.is_ok());
}

#[tokio::test]
async fn test_list_paginated_json() {
    let (services, _temp) = seeded_cli_services().await;

    let args = ListArgs {
        page: Some(2),
        page_size: Some(2),
        ..Default::default()
    };
    assert!(execute_list(args, &services, OutputFormat::Json).await.is_ok());
}

#[test]
fn test_args_to_options() {
    let args = ListArgs {
        tags: vec!["rust".to_string()],
        page_size: Some(10),
        ..Default::default()
    };
    let options = args.to_options();

    assert_eq!(options.page, Some(1));
    assert_eq!(options.page_size, Some(10));
    assert_eq!(options.tags, Some(vec!["rust".to_string()]));
    assert!(options.categories.is_none());
    assert!(options.query.is_none());
    assert!(!options.published_only);
}

#[test]
fn test_args_without_paging() {
    let options = ListArgs::default().to_options();
    assert!(options.page.is_none());
    assert!(options.page_size.is_none());
}

#[tokio::test]
async fn test_taxonomy_outputs() {
    let (services, _temp) = seeded_cli_services().await;

    for format in [OutputFormat::Human, OutputFormat::Json] {
        let result = execute_taxonomy(TaxonomyArgs::default(), &services, format).await;
        assert!(result.is_ok());
    }

    let taxonomy = services.storage.taxonomy().await;
    assert_eq!(taxonomy.categories.len(), 2);
    assert_eq!(taxonomy.tags.len(), 5);
}

#[test]
fn test_content_flag_enables_body_search() {
    let args = ListArgs {
        query: Some("tomatoes".to_string()),
        content: true,
        ..Default::default()
    };
    let options = args.to_options();
    assert!(options.search_content);
    assert_eq!(options.query.as_deref(), Some("tomatoes"));
}
