// ABOUTME: In-memory credential store for ephemeral sessions and tests
// ABOUTME: Single record behind an async RwLock so token and cookie never interleave
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{CredentialStore, StoreResult};
use crate::models::Credentials;

/// Process-local credential store
#[derive(Debug, Default)]
pub struct InMemoryCredentialStore {
    credentials: RwLock<Credentials>,
}

impl InMemoryCredentialStore {
    /// Empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with credentials
    #[must_use]
    pub fn with_credentials(credentials: Credentials) -> Self {
        Self {
            credentials: RwLock::new(credentials),
        }
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn bearer_token(&self) -> StoreResult<Option<String>> {
        Ok(self.credentials.read().await.bearer_token.clone())
    }

    async fn session_cookie(&self) -> StoreResult<Option<String>> {
        Ok(self.credentials.read().await.session_cookie_value.clone())
    }

    async fn refresh_token(&self) -> StoreResult<Option<String>> {
        Ok(self.credentials.read().await.refresh_token.clone())
    }

    async fn set_bearer_token(&self, token: &str) -> StoreResult<()> {
        self.credentials.write().await.bearer_token = Some(token.to_owned());
        Ok(())
    }

    async fn set_session_cookie(&self, value: &str) -> StoreResult<()> {
        self.credentials.write().await.session_cookie_value = Some(value.to_owned());
        Ok(())
    }

    async fn set_refresh_token(&self, token: &str) -> StoreResult<()> {
        self.credentials.write().await.refresh_token = Some(token.to_owned());
        Ok(())
    }

    async fn clear_all(&self) -> StoreResult<()> {
        *self.credentials.write().await = Credentials::default();
        Ok(())
    }

    async fn snapshot(&self) -> StoreResult<Credentials> {
        Ok(self.credentials.read().await.clone())
    }
}
