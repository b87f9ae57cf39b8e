//! LinkService tests
//!
//! Create/retry/validation/ownership behavior of the link management
//! service, against a tempdir-backed SQLite database.

use std::sync::{Arc, Once};

use gatelink::config::init_config;
use gatelink::errors::GatelinkError;
use gatelink::services::{CreateLinkRequest, LinkService, ResolverService};
use gatelink::storage::backend::SeaOrmStorage;
use tempfile::TempDir;

static INIT: Once = Once::new();

fn init_test_config() {
    INIT.call_once(init_config);
}

async fn setup(dir: &TempDir) -> (Arc<SeaOrmStorage>, LinkService) {
    init_test_config();
    let db_path = dir.path().join("gatelink-test.db");
    let url = format!("sqlite://{}", db_path.display());
    let storage = Arc::new(
        SeaOrmStorage::new(&url, "sqlite")
            .await
            .expect("storage init"),
    );
    let service = LinkService::new(storage.clone());
    (storage, service)
}

fn create_request(code: Option<&str>, destination: &str) -> CreateLinkRequest {
    CreateLinkRequest {
        code: code.map(|c| c.to_string()),
        destination: destination.to_string(),
        label: None,
    }
}

#[tokio::test]
async fn test_create_link_with_custom_code_and_resolve() {
    let dir = TempDir::new().unwrap();
    let (storage, service) = setup(&dir).await;

    let result = service
        .create_link("op-1", create_request(Some("ab12cd"), "https://example.com"))
        .await
        .unwrap();

    assert_eq!(result.link.code, "ab12cd");
    assert_eq!(result.link.owner, "op-1");
    assert!(!result.generated_code);

    let resolver = ResolverService::new(storage);
    assert_eq!(
        resolver.resolve("ab12cd").await.unwrap(),
        "https://example.com"
    );
}

#[tokio::test]
async fn test_create_link_duplicate_code_is_collision() {
    let dir = TempDir::new().unwrap();
    let (_storage, service) = setup(&dir).await;

    service
        .create_link("op-1", create_request(Some("ab12cd"), "https://example.com"))
        .await
        .unwrap();

    let err = service
        .create_link("op-1", create_request(Some("ab12cd"), "https://other.com"))
        .await
        .unwrap_err();
    assert!(matches!(err, GatelinkError::Collision(_)));
}

#[tokio::test]
async fn test_create_link_generates_code_when_missing() {
    let dir = TempDir::new().unwrap();
    let (storage, service) = setup(&dir).await;

    let result = service
        .create_link("op-1", create_request(None, "https://example.com"))
        .await
        .unwrap();

    assert!(result.generated_code);
    assert_eq!(result.link.code.len(), 6);
    assert!(result.link.code.bytes().all(|b| b.is_ascii_alphanumeric()));

    // Generated code actually resolves.
    let stored = storage.get_link(&result.link.code).await.unwrap();
    assert!(stored.is_some());
}

#[tokio::test]
async fn test_create_link_rejects_bad_destinations() {
    let dir = TempDir::new().unwrap();
    let (_storage, service) = setup(&dir).await;

    for destination in ["", "example.com", "ftp://example.com", "javascript:alert(1)"] {
        let err = service
            .create_link("op-1", create_request(None, destination))
            .await
            .unwrap_err();
        assert!(
            matches!(err, GatelinkError::Validation(_)),
            "destination {:?} must be rejected",
            destination
        );
    }
}

#[tokio::test]
async fn test_create_link_rejects_bad_custom_codes() {
    let dir = TempDir::new().unwrap();
    let (_storage, service) = setup(&dir).await;

    for code in ["has space", "has/slash", "healthz"] {
        let err = service
            .create_link("op-1", create_request(Some(code), "https://example.com"))
            .await
            .unwrap_err();
        assert!(
            matches!(err, GatelinkError::Validation(_)),
            "code {:?} must be rejected",
            code
        );
    }
}

#[tokio::test]
async fn test_get_link_for_owner_enforces_ownership() {
    let dir = TempDir::new().unwrap();
    let (_storage, service) = setup(&dir).await;

    service
        .create_link("op-1", create_request(Some("ab12cd"), "https://example.com"))
        .await
        .unwrap();

    let link = service.get_link_for_owner("op-1", "ab12cd").await.unwrap();
    assert_eq!(link.destination, "https://example.com");

    let err = service.get_link_for_owner("op-2", "ab12cd").await.unwrap_err();
    assert!(matches!(err, GatelinkError::Forbidden(_)));

    let err = service.get_link_for_owner("op-1", "zzzzzz").await.unwrap_err();
    assert!(matches!(err, GatelinkError::NotFound(_)));
}

#[tokio::test]
async fn test_delete_link_enforces_ownership_then_unresolves() {
    let dir = TempDir::new().unwrap();
    let (storage, service) = setup(&dir).await;

    service
        .create_link("op-1", create_request(Some("ab12cd"), "https://example.com"))
        .await
        .unwrap();

    let err = service.delete_link("op-2", "ab12cd").await.unwrap_err();
    assert!(matches!(err, GatelinkError::Forbidden(_)));

    service.delete_link("op-1", "ab12cd").await.unwrap();

    let resolver = ResolverService::new(storage);
    let err = resolver.resolve("ab12cd").await.unwrap_err();
    assert!(matches!(err, GatelinkError::NotFound(_)));
}

#[tokio::test]
async fn test_list_links_scopes_to_owner() {
    let dir = TempDir::new().unwrap();
    let (_storage, service) = setup(&dir).await;

    service
        .create_link("op-1", create_request(Some("aaa111"), "https://example.com"))
        .await
        .unwrap();
    service
        .create_link("op-2", create_request(Some("bbb222"), "https://example.com"))
        .await
        .unwrap();

    let (links, total) = service.list_links("op-1", 1, 20).await.unwrap();
    assert_eq!(total, 1);
    assert_eq!(links[0].code, "aaa111");

    let (links, total) = service.list_links("op-3", 1, 20).await.unwrap();
    assert_eq!(total, 0);
    assert!(links.is_empty());
}

#[tokio::test]
async fn test_label_is_stored_and_empty_label_dropped() {
    let dir = TempDir::new().unwrap();
    let (_storage, service) = setup(&dir).await;

    let with_label = service
        .create_link(
            "op-1",
            CreateLinkRequest {
                code: Some("aaa111".to_string()),
                destination: "https://example.com".to_string(),
                label: Some("launch campaign".to_string()),
            },
        )
        .await
        .unwrap();
    assert_eq!(with_label.link.label.as_deref(), Some("launch campaign"));

    let empty_label = service
        .create_link(
            "op-1",
            CreateLinkRequest {
                code: Some("bbb222".to_string()),
                destination: "https://example.com".to_string(),
                label: Some(String::new()),
            },
        )
        .await
        .unwrap();
    assert!(empty_label.link.label.is_none());
}
