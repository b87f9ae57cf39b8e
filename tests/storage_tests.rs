//! Storage backend tests against a tempdir-backed SQLite database.

use std::sync::{Arc, Once};

use chrono::{Duration, Utc};
use gatelink::config::init_config;
use gatelink::errors::GatelinkError;
use gatelink::storage::backend::SeaOrmStorage;
use gatelink::storage::{FieldMap, Link, Submission};
use tempfile::TempDir;

static INIT: Once = Once::new();

fn init_test_config() {
    INIT.call_once(init_config);
}

async fn test_storage(dir: &TempDir) -> Arc<SeaOrmStorage> {
    init_test_config();
    let db_path = dir.path().join("gatelink-test.db");
    let url = format!("sqlite://{}", db_path.display());
    Arc::new(
        SeaOrmStorage::new(&url, "sqlite")
            .await
            .expect("storage init"),
    )
}

fn link(code: &str, owner: &str, destination: &str) -> Link {
    Link {
        code: code.to_string(),
        owner: owner.to_string(),
        destination: destination.to_string(),
        label: None,
        created_at: Utc::now(),
    }
}

fn fields(pairs: &[(&str, &str)]) -> FieldMap {
    let mut map = FieldMap::new();
    for (k, v) in pairs {
        map.insert(k.to_string(), serde_json::Value::String(v.to_string()));
    }
    map
}

fn submission(code: &str, offset_secs: i64) -> Submission {
    Submission {
        id: uuid::Uuid::new_v4().to_string(),
        code: code.to_string(),
        fields: fields(&[("email", "visitor@example.com")]),
        captured_at: Utc::now() + Duration::seconds(offset_secs),
    }
}

#[tokio::test]
async fn test_insert_and_get_link() {
    let dir = TempDir::new().unwrap();
    let storage = test_storage(&dir).await;

    storage
        .insert_link(&link("ab12cd", "op-1", "https://example.com"))
        .await
        .unwrap();

    let stored = storage.get_link("ab12cd").await.unwrap().unwrap();
    assert_eq!(stored.code, "ab12cd");
    assert_eq!(stored.owner, "op-1");
    assert_eq!(stored.destination, "https://example.com");
    assert!(stored.label.is_none());

    assert!(storage.get_link("zzzzzz").await.unwrap().is_none());
}

#[tokio::test]
async fn test_duplicate_code_maps_to_collision() {
    let dir = TempDir::new().unwrap();
    let storage = test_storage(&dir).await;

    storage
        .insert_link(&link("ab12cd", "op-1", "https://example.com"))
        .await
        .unwrap();

    // Same code, different owner and destination: the constraint decides.
    let err = storage
        .insert_link(&link("ab12cd", "op-2", "https://other.com"))
        .await
        .unwrap_err();
    assert!(matches!(err, GatelinkError::Collision(_)));

    // The original mapping is untouched.
    let stored = storage.get_link("ab12cd").await.unwrap().unwrap();
    assert_eq!(stored.owner, "op-1");
    assert_eq!(stored.destination, "https://example.com");
}

#[tokio::test]
async fn test_delete_link_keeps_submissions() {
    let dir = TempDir::new().unwrap();
    let storage = test_storage(&dir).await;

    storage
        .insert_link(&link("ab12cd", "op-1", "https://example.com"))
        .await
        .unwrap();
    storage.insert_submission(&submission("ab12cd", 0)).await.unwrap();

    storage.delete_link("ab12cd").await.unwrap();
    assert!(storage.get_link("ab12cd").await.unwrap().is_none());

    // The submission row survives the link.
    let (subs, total) = storage
        .list_submissions(&["ab12cd".to_string()], 1, 20)
        .await
        .unwrap();
    assert_eq!(total, 1);
    assert_eq!(subs.len(), 1);
}

#[tokio::test]
async fn test_delete_missing_link_is_not_found() {
    let dir = TempDir::new().unwrap();
    let storage = test_storage(&dir).await;

    let err = storage.delete_link("zzzzzz").await.unwrap_err();
    assert!(matches!(err, GatelinkError::NotFound(_)));
}

#[tokio::test]
async fn test_links_by_owner_in_creation_order() {
    let dir = TempDir::new().unwrap();
    let storage = test_storage(&dir).await;

    for (code, owner) in [("aaa111", "op-1"), ("bbb222", "op-2"), ("ccc333", "op-1")] {
        let mut l = link(code, owner, "https://example.com");
        // Spread creation times so ordering is deterministic.
        l.created_at = Utc::now()
            + Duration::seconds(match code {
                "aaa111" => 0,
                "bbb222" => 1,
                _ => 2,
            });
        storage.insert_link(&l).await.unwrap();
    }

    let owned = storage.links_by_owner("op-1").await.unwrap();
    let codes: Vec<&str> = owned.iter().map(|l| l.code.as_str()).collect();
    assert_eq!(codes, vec!["aaa111", "ccc333"]);

    assert!(storage.links_by_owner("op-3").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_list_links_by_owner_paginated_newest_first() {
    let dir = TempDir::new().unwrap();
    let storage = test_storage(&dir).await;

    for i in 0..5 {
        let mut l = link(&format!("code{:02}", i), "op-1", "https://example.com");
        l.created_at = Utc::now() + Duration::seconds(i);
        storage.insert_link(&l).await.unwrap();
    }

    let (page1, total) = storage.list_links_by_owner("op-1", 1, 2).await.unwrap();
    assert_eq!(total, 5);
    let codes: Vec<&str> = page1.iter().map(|l| l.code.as_str()).collect();
    assert_eq!(codes, vec!["code04", "code03"]);

    let (page3, _) = storage.list_links_by_owner("op-1", 3, 2).await.unwrap();
    assert_eq!(page3.len(), 1);
    assert_eq!(page3[0].code, "code00");
}

#[tokio::test]
async fn test_list_submissions_filters_and_orders() {
    let dir = TempDir::new().unwrap();
    let storage = test_storage(&dir).await;

    storage
        .insert_link(&link("aaa111", "op-1", "https://example.com"))
        .await
        .unwrap();
    storage
        .insert_link(&link("bbb222", "op-1", "https://example.com"))
        .await
        .unwrap();
    storage
        .insert_link(&link("ccc333", "op-2", "https://example.com"))
        .await
        .unwrap();

    let oldest = submission("aaa111", 0);
    let middle = submission("bbb222", 10);
    let newest = submission("aaa111", 20);
    let foreign = submission("ccc333", 30);
    for sub in [&oldest, &middle, &newest, &foreign] {
        storage.insert_submission(sub).await.unwrap();
    }

    let owned_codes = vec!["aaa111".to_string(), "bbb222".to_string()];
    let (subs, total) = storage.list_submissions(&owned_codes, 1, 20).await.unwrap();
    assert_eq!(total, 3);

    // Newest first, and nothing from codes outside the set.
    let ids: Vec<&str> = subs.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec![newest.id.as_str(), middle.id.as_str(), oldest.id.as_str()]);
    assert!(subs.iter().all(|s| s.code != "ccc333"));
}

#[tokio::test]
async fn test_list_submissions_empty_code_set() {
    let dir = TempDir::new().unwrap();
    let storage = test_storage(&dir).await;

    let (subs, total) = storage.list_submissions(&[], 1, 20).await.unwrap();
    assert!(subs.is_empty());
    assert_eq!(total, 0);
}
