// ABOUTME: Tests for the in-memory and file-backed credential stores
// ABOUTME: Persistence across reopen, clearing, corrupt files, and concurrent writers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use std::sync::Arc;

use pierre_mobile_client::credentials::{
    CredentialStore, FileCredentialStore, InMemoryCredentialStore,
};
use pierre_mobile_client::errors::CredentialStoreError;
use pierre_mobile_client::models::Credentials;
use tempfile::TempDir;

#[tokio::test]
async fn test_memory_store_set_and_clear() {
    let store = InMemoryCredentialStore::new();
    assert!(store.snapshot().await.unwrap().is_empty());

    store.set_bearer_token("tok").await.unwrap();
    store.set_session_cookie("abc").await.unwrap();
    store.set_refresh_token("r-1").await.unwrap();

    let snapshot = store.snapshot().await.unwrap();
    assert_eq!(snapshot.bearer_token(), Some("tok"));
    assert_eq!(snapshot.session_cookie_value(), Some("abc"));
    assert_eq!(snapshot.refresh_token(), Some("r-1"));

    store.clear_all().await.unwrap();
    assert!(store.snapshot().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_memory_store_prepopulated() {
    let store = InMemoryCredentialStore::with_credentials(Credentials::bearer("tok"));
    assert_eq!(store.bearer_token().await.unwrap().as_deref(), Some("tok"));
    assert_eq!(store.session_cookie().await.unwrap(), None);
}

#[tokio::test]
async fn test_file_store_missing_file_is_empty() {
    let dir = TempDir::new().unwrap();
    let store = FileCredentialStore::open(dir.path().join("credentials.json"))
        .await
        .unwrap();

    assert!(store.snapshot().await.unwrap().is_empty());
    assert!(!store.path().exists());
}

#[tokio::test]
async fn test_file_store_persists_across_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("credentials.json");

    {
        let store = FileCredentialStore::open(&path).await.unwrap();
        store.set_bearer_token("tok").await.unwrap();
        store.set_session_cookie("abc").await.unwrap();
    }

    let reopened = FileCredentialStore::open(&path).await.unwrap();
    let snapshot = reopened.snapshot().await.unwrap();
    assert_eq!(snapshot.bearer_token(), Some("tok"));
    assert_eq!(snapshot.session_cookie_value(), Some("abc"));

    let raw: serde_json::Value =
        serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
    assert_eq!(raw["bearerToken"], "tok");
    assert!(raw["updatedAt"].is_string());
    assert!(!path.with_extension("json.tmp").exists());
}

#[tokio::test]
async fn test_file_store_clear_removes_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("credentials.json");
    let store = FileCredentialStore::open(&path).await.unwrap();

    store.set_refresh_token("r-1").await.unwrap();
    assert!(path.exists());

    store.clear_all().await.unwrap();
    assert!(!path.exists());
    assert!(store.snapshot().await.unwrap().is_empty());

    // clearing twice is fine
    store.clear_all().await.unwrap();
}

#[tokio::test]
async fn test_file_store_rejects_corrupt_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("credentials.json");
    std::fs::write(&path, "not json").unwrap();

    let result = FileCredentialStore::open(&path).await;
    assert!(matches!(result, Err(CredentialStoreError::Corrupt(_))));
}

#[tokio::test]
async fn test_file_store_concurrent_writers_keep_a_whole_record() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("credentials.json");
    let store = Arc::new(FileCredentialStore::open(&path).await.unwrap());

    let handles: Vec<_> = (0..10)
        .map(|i| {
            let store = Arc::clone(&store);
            tokio::spawn(async move {
                store.set_bearer_token(&format!("tok-{i}")).await.unwrap();
                store.set_session_cookie(&format!("cookie-{i}")).await.unwrap();
            })
        })
        .collect();
    for handle in handles {
        handle.await.unwrap();
    }

    let reopened = FileCredentialStore::open(&path).await.unwrap();
    let snapshot = reopened.snapshot().await.unwrap();
    assert!(snapshot.bearer_token().unwrap().starts_with("tok-"));
    assert!(snapshot.session_cookie_value().unwrap().starts_with("cookie-"));
    assert_eq!(snapshot, store.snapshot().await.unwrap());
}
