//! Tests for document CLI commands (create, get, update, delete)

use crate::cli::test_helpers::{create_cli_test_services, seeded_cli_services, write_file};
use folio::cli::commands::document::{
    execute_create, execute_delete, execute_get, execute_update, read_content, CreateArgs,
    DeleteArgs, GetArgs, UpdateArgs,
};
use folio::cli::OutputFormat;
use tempfile::TempDir;

fn create_args(id: &str, content: Option<&str>) -> CreateArgs {
    CreateArgs {
        id: id.to_string(),
        title: "From The CLI".to_string(),
        content: content.map(str::to_string),
        file: None,
        published: true,
        tags: vec!["cli".to_string(), " ".to_string()],
        categories: vec!["tools".to_string()],
    }
}

fn update_args(id: &str) -> UpdateArgs {
    UpdateArgs {
        id: id.to_string(),
        title: None,
        content: None,
        file: None,
        published: None,
        tags: None,
        categories: None,
    }
}

// =============================================================================
// create-document tests
// =============================================================================

#[tokio::test]
async fn test_create_with_inline_content() {
    let (services, _temp) = create_cli_test_services().await;

    let result = execute_create(create_args("cli-post", Some("body")), &services, OutputFormat::Human).await;
    assert!(result.is_ok(), "Create should succeed: {result:?}");

    let doc = services.storage.get_document("cli-post").await.unwrap();
    assert_eq!(doc.content, "body");
    assert!(doc.meta.published);
    // Blank facet names are dropped
    assert_eq!(doc.meta.tags.len(), 1);
    assert!(doc.meta.categories.contains("tools"));
}

#[tokio::test]
async fn test_create_from_file_json() {
    let (services, temp) = create_cli_test_services().await;
    let path = write_file(&temp, "post.md", b"# From a file");

    let mut args = create_args("file-post", None);
    args.file = Some(path);
    let result = execute_create(args, &services, OutputFormat::Json).await;
    assert!(result.is_ok());

    let doc = services.storage.get_document("file-post").await.unwrap();
    assert_eq!(doc.content, "# From a file");
}

#[tokio::test]
async fn test_create_without_content_fails() {
    let (services, _temp) = create_cli_test_services().await;

    let result = execute_create(create_args("empty", None), &services, OutputFormat::Human).await;
    assert!(result.is_err());
    assert!(!services.storage.contains("empty").await);
}

#[tokio::test]
async fn test_create_duplicate_fails() {
    let (services, _temp) = seeded_cli_services().await;

    let result = execute_create(
        create_args("hello-world", Some("again")),
        &services,
        OutputFormat::Human,
    )
    .await;
    let err = result.unwrap_err();
    assert!(err.to_string().contains("already exists"));
}

// =============================================================================
// get-document tests
// =============================================================================

#[tokio::test]
async fn test_get_human_and_json() {
    let (services, _temp) = seeded_cli_services().await;

    for format in [OutputFormat::Human, OutputFormat::Json] {
        let args = GetArgs {
            id: "async-rust".to_string(),
            no_content: false,
        };
        assert!(execute_get(args, &services, format).await.is_ok());
    }
}

#[tokio::test]
async fn test_get_missing_suggests_listing() {
    let (services, _temp) = create_cli_test_services().await;

    let args = GetArgs {
        id: "ghost".to_string(),
        no_content: true,
    };
    let err = execute_get(args, &services, OutputFormat::Human)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("folio list-documents"));
}

// =============================================================================
// update-document tests
// =============================================================================

#[tokio::test]
async fn test_update_fields() {
    let (services, _temp) = seeded_cli_services().await;

    let mut args = update_args("hello-there");
    args.title = Some("Hello Again".to_string());
    args.published = Some(true);
    args.tags = Some(vec![String::new()]);
    let result = execute_update(args, &services, OutputFormat::Json).await;
    assert!(result.is_ok());

    let doc = services.storage.get_document("hello-there").await.unwrap();
    assert_eq!(doc.meta.title, "Hello Again");
    assert!(doc.meta.published);
    // An empty --tags value clears the tags
    assert!(doc.meta.tags.is_empty());
    assert_eq!(doc.meta.categories.len(), 1);
}

#[tokio::test]
async fn test_update_content_from_file() {
    let (services, temp) = seeded_cli_services().await;
    let path = write_file(&temp, "new.md", b"Fresh words here");

    let mut args = update_args("garden-notes");
    args.file = Some(path);
    execute_update(args, &services, OutputFormat::Human)
        .await
        .unwrap();

    let doc = services.storage.get_document("garden-notes").await.unwrap();
    assert_eq!(doc.content, "Fresh words here");
    assert_eq!(doc.meta.description, "Fresh words here");
}

#[tokio::test]
async fn test_update_missing_fails() {
    let (services, _temp) = create_cli_test_services().await;
    let result = execute_update(update_args("ghost"), &services, OutputFormat::Human).await;
    assert!(result.is_err());
}

// =============================================================================
// delete-document tests
// =============================================================================

#[tokio::test]
async fn test_delete_with_force() {
    let (services, _temp) = seeded_cli_services().await;

    let args = DeleteArgs {
        id: "rust-errors".to_string(),
        force: true,
    };
    assert!(execute_delete(args, &services, OutputFormat::Json).await.is_ok());
    assert!(!services.storage.contains("rust-errors").await);
}

#[tokio::test]
async fn test_delete_missing_fails_before_prompt() {
    let (services, _temp) = create_cli_test_services().await;

    let args = DeleteArgs {
        id: "ghost".to_string(),
        force: false,
    };
    let err = execute_delete(args, &services, OutputFormat::Human)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("not found"));
}

// =============================================================================
// read_content tests
// =============================================================================

#[test]
fn test_read_content_prefers_inline() {
    let content = read_content(Some("inline".to_string()), None).unwrap();
    assert_eq!(content.as_deref(), Some("inline"));
    assert!(read_content(None, None).unwrap().is_none());
}

#[test]
fn test_read_content_missing_file() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope.md");
    let err = read_content(None, Some(&missing)).unwrap_err();
    assert!(err.to_string().contains("Failed to read"));
}
