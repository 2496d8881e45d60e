// ABOUTME: JSON file credential store persisting tokens across app restarts
// ABOUTME: Whole-record atomic writes via temp file and rename, cached for concurrent reads
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::env;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::fs;
use tokio::sync::RwLock;
use tracing::{debug, info};

use super::{CredentialStore, StoreResult};
use crate::constants::env_config;
use crate::errors::CredentialStoreError;
use crate::models::Credentials;

/// File name used under the platform data directory
const CREDENTIALS_FILE_NAME: &str = "credentials.json";

/// Application directory under the platform data directory
const APP_DIR_NAME: &str = "pierre";

/// On-disk record
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredCredentials {
    #[serde(flatten)]
    credentials: Credentials,
    updated_at: DateTime<Utc>,
}

/// Credential store backed by a JSON file
///
/// The file is read once at open; afterwards reads are served from memory and
/// every write rewrites the whole record.
#[derive(Debug)]
pub struct FileCredentialStore {
    path: PathBuf,
    cached: RwLock<Credentials>,
}

impl FileCredentialStore {
    /// Open the store at `path`; a missing file reads as empty credentials
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed
    pub async fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();
        let credentials = match fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice::<StoredCredentials>(&bytes)?.credentials,
            Err(e) if e.kind() == ErrorKind::NotFound => Credentials::default(),
            Err(e) => return Err(CredentialStoreError::io("reading credentials", e)),
        };

        debug!(path = %path.display(), "Opened credential store");

        Ok(Self {
            path,
            cached: RwLock::new(credentials),
        })
    }

    /// Open the store at `PIERRE_CREDENTIALS_PATH` or the platform data directory
    ///
    /// # Errors
    ///
    /// Returns an error if no location can be determined or the file is unreadable
    pub async fn open_default() -> StoreResult<Self> {
        Self::open(default_path()?).await
    }

    /// Location of the backing file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn update<F>(&self, apply: F) -> StoreResult<()>
    where
        F: FnOnce(&mut Credentials) + Send,
    {
        let mut cached = self.cached.write().await;
        let mut next = cached.clone();
        apply(&mut next);
        self.persist(&next).await?;
        *cached = next;
        Ok(())
    }

    async fn persist(&self, credentials: &Credentials) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| CredentialStoreError::io("creating credential directory", e))?;
        }

        let record = StoredCredentials {
            credentials: credentials.clone(),
            updated_at: Utc::now(),
        };
        let bytes = serde_json::to_vec_pretty(&record)?;

        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, bytes)
            .await
            .map_err(|e| CredentialStoreError::io("writing credentials", e))?;
        fs::rename(&tmp_path, &self.path)
            .await
            .map_err(|e| CredentialStoreError::io("replacing credentials", e))
    }
}

#[async_trait]
impl CredentialStore for FileCredentialStore {
    async fn bearer_token(&self) -> StoreResult<Option<String>> {
        Ok(self.cached.read().await.bearer_token.clone())
    }

    async fn session_cookie(&self) -> StoreResult<Option<String>> {
        Ok(self.cached.read().await.session_cookie_value.clone())
    }

    async fn refresh_token(&self) -> StoreResult<Option<String>> {
        Ok(self.cached.read().await.refresh_token.clone())
    }

    async fn set_bearer_token(&self, token: &str) -> StoreResult<()> {
        let token = token.to_owned();
        self.update(move |c| c.bearer_token = Some(token)).await
    }

    async fn set_session_cookie(&self, value: &str) -> StoreResult<()> {
        let value = value.to_owned();
        self.update(move |c| c.session_cookie_value = Some(value))
            .await
    }

    async fn set_refresh_token(&self, token: &str) -> StoreResult<()> {
        let token = token.to_owned();
        self.update(move |c| c.refresh_token = Some(token)).await
    }

    async fn clear_all(&self) -> StoreResult<()> {
        let mut cached = self.cached.write().await;
        match fs::remove_file(&self.path).await {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(CredentialStoreError::io("removing credentials", e)),
        }
        *cached = Credentials::default();
        info!(path = %self.path.display(), "Cleared stored credentials");
        Ok(())
    }

    async fn snapshot(&self) -> StoreResult<Credentials> {
        Ok(self.cached.read().await.clone())
    }
}

fn default_path() -> StoreResult<PathBuf> {
    if let Ok(path) = env::var(env_config::CREDENTIALS_PATH) {
        return Ok(PathBuf::from(path));
    }
    dirs::data_local_dir()
        .map(|dir| dir.join(APP_DIR_NAME).join(CREDENTIALS_FILE_NAME))
        .ok_or_else(|| {
            CredentialStoreError::Location("no local data directory on this platform".to_owned())
        })
}
