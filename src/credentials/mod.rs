// ABOUTME: Credential store abstraction injected into the request orchestrator
// ABOUTME: Async get/set/clear of bearer token, session cookie, and refresh token
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Credential storage
//!
//! The orchestrator never reads process-wide state; it receives an
//! `Arc<dyn CredentialStore>` at construction. Login flows write through the
//! same store. Implementations must allow concurrent reads and serialize
//! writes; last write wins.

/// JSON file backed store
pub mod file;
/// Process-local store
pub mod memory;

use async_trait::async_trait;

use crate::errors::CredentialStoreError;
use crate::models::Credentials;

pub use file::FileCredentialStore;
pub use memory::InMemoryCredentialStore;

/// Result alias for credential store operations
pub type StoreResult<T> = Result<T, CredentialStoreError>;

/// Persistent holder of the client's authentication material
///
/// Every method fails with a `CredentialStoreError` when the backing storage
/// cannot be read or written.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Stored bearer token
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read
    async fn bearer_token(&self) -> StoreResult<Option<String>>;

    /// Stored session cookie value
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read
    async fn session_cookie(&self) -> StoreResult<Option<String>>;

    /// Stored refresh token
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read
    async fn refresh_token(&self) -> StoreResult<Option<String>>;

    /// Replace the bearer token
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written
    async fn set_bearer_token(&self, token: &str) -> StoreResult<()>;

    /// Replace the session cookie value
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written
    async fn set_session_cookie(&self, value: &str) -> StoreResult<()>;

    /// Replace the refresh token
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written
    async fn set_refresh_token(&self, token: &str) -> StoreResult<()>;

    /// Forget every stored credential
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be removed
    async fn clear_all(&self) -> StoreResult<()>;

    /// Read all credentials at once
    ///
    /// Stores holding the values in one record should override this so the
    /// snapshot is taken under a single read.
    ///
    /// # Errors
    ///
    /// Returns an error if any value cannot be read
    async fn snapshot(&self) -> StoreResult<Credentials> {
        Ok(Credentials {
            bearer_token: self.bearer_token().await?,
            session_cookie_value: self.session_cookie().await?,
            refresh_token: self.refresh_token().await?,
        })
    }
}
