// ABOUTME: Main library entry point for the Pierre mobile API client
// ABOUTME: Dual-transport HTTP client with response classification and session proxy fallback
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Pierre Mobile Client
//!
//! HTTP client used by the Pierre mobile app to reach its backend.
//!
//! The backend is reached over two transports. The primary one is the app's
//! own HTTP stack. The fallback is a sandbox that already holds a signed-in
//! session and can execute requests on its behalf. Responses from either are
//! classified before anyone trusts them, since the backend answers expired
//! sessions with its HTML sign-in page and a 200 status.
//!
//! ## Architecture
//!
//! - **classifier**: pure response classification
//! - **envelope**: unwrapping of backend and proxy response wrappers
//! - **transport**: primary transport trait and its reqwest implementation
//! - **fallback**: session proxy contract and the attachable slot
//! - **credentials**: token persistence behind an async trait
//! - **orchestrator**: `ApiClient`, which routes each request across both
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use pierre_mobile_client::config::ClientConfig;
//! use pierre_mobile_client::credentials::FileCredentialStore;
//! use pierre_mobile_client::orchestrator::ApiClient;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ClientConfig::from_env()?;
//!     let store = Arc::new(FileCredentialStore::open_default().await?);
//!     let client = ApiClient::new(&config, store)?;
//!
//!     let profile = client.get("/api/profile").await?;
//!     println!("{profile}");
//!     Ok(())
//! }
//! ```

/// Authentication header selection and token capture
pub mod auth;

/// Response classification
pub mod classifier;

/// Client configuration
pub mod config;

/// Credential persistence
pub mod credentials;

/// Response envelope normalization
pub mod envelope;

/// Session proxy fallback boundary
pub mod fallback;

/// Tracing subscriber setup
pub mod logging;

/// Request orchestration across both transports
pub mod orchestrator;

/// Primary transport
pub mod transport;

pub use pierre_client_core::{constants, errors, models};

pub use config::ClientConfig;
pub use credentials::{CredentialStore, FileCredentialStore, InMemoryCredentialStore};
pub use errors::{ClientError, ClientResult, TransportErrorKind, TransportSide};
pub use fallback::{FallbackError, FallbackReply, FallbackRequest, FallbackSlot, FallbackTransport};
pub use models::{Credentials, FormField, HttpMethod, RawResponse, RequestSpec};
pub use orchestrator::ApiClient;
pub use transport::{HttpTransport, PrimaryTransport};
