// ABOUTME: Credential store error types for token and session cookie persistence
// ABOUTME: Wraps I/O and serialization failures of persistent credential stores
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::io;

/// Failure reading or writing stored credentials
#[derive(Debug, thiserror::Error)]
pub enum CredentialStoreError {
    /// Backing storage could not be read or written
    #[error("Credential storage I/O failed for {context}")]
    Io {
        /// Operation that failed
        context: &'static str,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Stored credentials could not be encoded or decoded
    #[error("Credential storage is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),

    /// No storage location could be determined
    #[error("Credential storage location unavailable: {0}")]
    Location(String),
}

impl CredentialStoreError {
    /// Wrap an I/O error with the operation that produced it
    #[must_use]
    pub const fn io(context: &'static str, source: io::Error) -> Self {
        Self::Io { context, source }
    }
}
