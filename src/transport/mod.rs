// ABOUTME: Primary transport abstraction for issuing requests over the app's own HTTP stack
// ABOUTME: Trait seam plus the reqwest implementation and request header construction
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Primary transport
//!
//! A primary transport performs exactly one round trip and reports failures to
//! complete it as a structured [`TransportError`]. HTTP-level failures are not
//! errors here: every completed round trip yields a [`RawResponse`] and is
//! classified by the orchestrator.

/// Request header construction shared by transports
pub mod headers;
/// reqwest-backed transport
pub mod http;

use async_trait::async_trait;

use crate::errors::TransportError;
use crate::models::{Credentials, RawResponse, RequestSpec};

pub use http::{build_url, HttpTransport};

/// Transport issuing requests directly from the app process
#[async_trait]
pub trait PrimaryTransport: Send + Sync {
    /// Perform one round trip
    ///
    /// # Errors
    ///
    /// Returns a `TransportError` when the round trip cannot complete
    /// (unreachable host, timeout, request that cannot be built).
    async fn invoke(
        &self,
        request: &RequestSpec,
        credentials: &Credentials,
    ) -> Result<RawResponse, TransportError>;
}
