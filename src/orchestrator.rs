// ABOUTME: Request orchestrator choosing transport order and switching once to the session proxy
// ABOUTME: Classifies responses, normalizes envelopes, persists echoed tokens, clears stale credentials
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Request orchestration
//!
//! Every API call goes through [`ApiClient::send`], which drives a small state
//! machine:
//!
//! ```text
//! Start ──GET+body──────────────────────────────┐
//!   │                                           ▼
//!   └─► TryPrimary ─► Classify ─► Done    TryFallback ─► Classify ─► Done | Failed
//!          │              │                     ▲
//!          │              ├─ ServerError ─► Failed
//!          │              └─ AuthRequired / HtmlLoginPage ──┤
//!          └─ network / timeout ────────────────────────────┘
//! ```
//!
//! The fallback is a one-shot channel switch: at most one attempt per logical
//! request, no backoff. When the proxy cannot help, the primary failure is
//! reported because it says more about what went wrong.
//!
//! When a request finally fails on authentication, stored credentials are
//! cleared exactly once.

use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::auth::{redact_secret, CapturedTokens};
use crate::classifier::classify;
use crate::config::ClientConfig;
use crate::credentials::CredentialStore;
use crate::envelope::{decode, normalize};
use crate::errors::{
    ClientError, ClientResult, CredentialStoreError, TransportErrorKind, TransportSide,
};
use crate::fallback::{FallbackError, FallbackRequest, FallbackSlot, FallbackTransport};
use crate::models::{Credentials, RawResponse, RequestSpec};
use crate::transport::{HttpTransport, PrimaryTransport};

/// Why a request is being routed to the fallback transport
#[derive(Debug)]
enum FallbackReason {
    /// GET with a body is never sent on the primary transport
    GetWithBody,
    /// The primary transport could not complete the round trip
    PrimaryUnreachable(ClientError),
    /// The backend rejected the primary transport's credentials
    SessionRejected(ClientError),
}

impl FallbackReason {
    const fn label(&self) -> &'static str {
        match self {
            Self::GetWithBody => "get_with_body",
            Self::PrimaryUnreachable(_) => "primary_unreachable",
            Self::SessionRejected(_) => "session_rejected",
        }
    }

    /// Error to surface when no proxy is attached
    fn into_unavailable_error(self) -> ClientError {
        match self {
            Self::GetWithBody => ClientError::unsupported(
                "GET requests with a body can only be sent through the session proxy, and none is attached",
            ),
            Self::PrimaryUnreachable(error) => error,
            Self::SessionRejected(error) => ClientError::fallback_unavailable(format!(
                "{error}; open the signed-in session view to re-establish the session, then retry"
            )),
        }
    }

    /// Error to surface when the proxy itself failed
    fn into_proxy_failure_error(self, message: String) -> ClientError {
        match self {
            Self::GetWithBody => ClientError::Transport {
                side: TransportSide::Fallback,
                kind: TransportErrorKind::Network,
                message,
            },
            Self::PrimaryUnreachable(error) | Self::SessionRejected(error) => error,
        }
    }
}

/// State of one orchestration
#[derive(Debug)]
enum Step {
    TryPrimary,
    TryFallback(FallbackReason),
    Done(ClientResult<Value>),
}

/// Entry point for every backend call
///
/// Cheap to share behind an `Arc`; concurrent requests run independent
/// orchestrations and share only the credential store.
pub struct ApiClient {
    primary: Arc<dyn PrimaryTransport>,
    fallback: FallbackSlot,
    credentials: Arc<dyn CredentialStore>,
}

impl ApiClient {
    /// Create a client using the reqwest transport and no session proxy
    ///
    /// # Errors
    ///
    /// Returns a `Malformed` transport error if the configuration is invalid
    /// or the HTTP client cannot be built
    pub fn new(config: &ClientConfig, credentials: Arc<dyn CredentialStore>) -> ClientResult<Self> {
        let primary = HttpTransport::new(config)
            .map_err(|e| ClientError::transport(TransportSide::Primary, e))?;
        Ok(Self::with_transports(
            Arc::new(primary),
            credentials,
            FallbackSlot::new(),
        ))
    }

    /// Create a client from explicit collaborators
    #[must_use]
    pub fn with_transports(
        primary: Arc<dyn PrimaryTransport>,
        credentials: Arc<dyn CredentialStore>,
        fallback: FallbackSlot,
    ) -> Self {
        Self {
            primary,
            fallback,
            credentials,
        }
    }

    /// Session proxy slot shared with the UI layer that mounts the sandbox
    #[must_use]
    pub const fn fallback_slot(&self) -> &FallbackSlot {
        &self.fallback
    }

    /// Attach the session proxy
    pub async fn attach_fallback(&self, transport: Arc<dyn FallbackTransport>) {
        self.fallback.attach(transport).await;
    }

    /// Detach the session proxy
    pub async fn detach_fallback(&self) {
        self.fallback.detach().await;
    }

    /// Credential store used by this client
    #[must_use]
    pub fn credentials(&self) -> &Arc<dyn CredentialStore> {
        &self.credentials
    }

    /// Execute a request and return the normalized payload
    ///
    /// # Errors
    ///
    /// Returns a `ClientError` describing the failure and the transport that
    /// produced it; see the module documentation for routing rules.
    pub async fn send(&self, request: &RequestSpec) -> ClientResult<Value> {
        let span = info_span!(
            "api_request",
            request_id = %Uuid::new_v4(),
            method = %request.method(),
            path = %request.path(),
        );
        self.orchestrate(request).instrument(span).await
    }

    /// Execute a request and deserialize the normalized payload
    ///
    /// # Errors
    ///
    /// Returns any `send` error, or `ClientError::InvalidPayload` if the payload
    /// does not match `T`
    pub async fn send_as<T: DeserializeOwned>(&self, request: &RequestSpec) -> ClientResult<T> {
        decode(self.send(request).await?)
    }

    /// GET a path
    ///
    /// # Errors
    ///
    /// See [`ApiClient::send`]
    pub async fn get(&self, path: &str) -> ClientResult<Value> {
        self.send(&RequestSpec::get(path)).await
    }

    /// GET a path and deserialize the payload
    ///
    /// # Errors
    ///
    /// See [`ApiClient::send_as`]
    pub async fn get_as<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.send_as(&RequestSpec::get(path)).await
    }

    /// POST a JSON body
    ///
    /// # Errors
    ///
    /// See [`ApiClient::send`]
    pub async fn post(&self, path: &str, body: Value) -> ClientResult<Value> {
        self.send(&RequestSpec::post(path).json(body)).await
    }

    /// PUT a JSON body
    ///
    /// # Errors
    ///
    /// See [`ApiClient::send`]
    pub async fn put(&self, path: &str, body: Value) -> ClientResult<Value> {
        self.send(&RequestSpec::put(path).json(body)).await
    }

    /// PATCH a JSON body
    ///
    /// # Errors
    ///
    /// See [`ApiClient::send`]
    pub async fn patch(&self, path: &str, body: Value) -> ClientResult<Value> {
        self.send(&RequestSpec::patch(path).json(body)).await
    }

    /// DELETE a path
    ///
    /// # Errors
    ///
    /// See [`ApiClient::send`]
    pub async fn delete(&self, path: &str) -> ClientResult<Value> {
        self.send(&RequestSpec::delete(path)).await
    }

    async fn orchestrate(&self, request: &RequestSpec) -> ClientResult<Value> {
        let credentials = self.credentials.snapshot().await?;

        let mut step = if request.is_get_with_body() {
            debug!("GET with body bypasses the primary transport");
            Step::TryFallback(FallbackReason::GetWithBody)
        } else {
            Step::TryPrimary
        };

        loop {
            step = match step {
                Step::TryPrimary => self.try_primary(request, &credentials).await,
                Step::TryFallback(reason) => self.try_fallback(request, &credentials, reason).await,
                Step::Done(result) => return self.finish(result).await,
            };
        }
    }

    async fn try_primary(&self, request: &RequestSpec, credentials: &Credentials) -> Step {
        let error = match self.primary.invoke(request, credentials).await {
            Ok(raw) => {
                debug!(status = raw.status, "Primary transport responded");
                match self.settle(&raw, TransportSide::Primary).await {
                    Ok(payload) => return Step::Done(Ok(payload)),
                    Err(error) => error,
                }
            }
            Err(error) => ClientError::transport(TransportSide::Primary, error),
        };

        if !error.is_retryable_via_fallback() {
            return Step::Done(Err(error));
        }

        if error.is_auth_failure() {
            warn!(error = %error, "Primary transport credentials rejected");
            Step::TryFallback(FallbackReason::SessionRejected(error))
        } else {
            warn!(error = %error, "Primary transport unreachable");
            Step::TryFallback(FallbackReason::PrimaryUnreachable(error))
        }
    }

    async fn try_fallback(
        &self,
        request: &RequestSpec,
        credentials: &Credentials,
        reason: FallbackReason,
    ) -> Step {
        let Some(proxy) = self.fallback.current().await else {
            info!(reason = reason.label(), "No session proxy attached");
            return Step::Done(Err(reason.into_unavailable_error()));
        };

        info!(reason = reason.label(), "Routing request through session proxy");

        let reply = match proxy
            .execute(FallbackRequest::from_spec(request, credentials))
            .await
        {
            Ok(reply) => reply,
            Err(FallbackError::Unavailable) => {
                info!("Session proxy went away before executing the request");
                return Step::Done(Err(reason.into_unavailable_error()));
            }
            Err(FallbackError::Transport(message)) => {
                warn!(error = %message, "Session proxy failed");
                return Step::Done(Err(reason.into_proxy_failure_error(message)));
            }
        };

        let raw = reply.into_raw_response();
        debug!(status = raw.status, "Session proxy responded");

        Step::Done(self.settle(&raw, TransportSide::Fallback).await)
    }

    /// Classify a response, persist any echoed tokens unless the session was
    /// rejected, and unwrap the payload
    async fn settle(&self, raw: &RawResponse, side: TransportSide) -> ClientResult<Value> {
        let outcome = classify(raw);
        if !outcome.is_auth_failure() {
            self.capture_tokens(raw).await;
        }
        outcome.into_result(side).map(normalize)
    }

    async fn finish(&self, result: ClientResult<Value>) -> ClientResult<Value> {
        if let Err(error) = &result {
            if error.is_auth_failure() {
                warn!(error = %error, "Clearing stale credentials");
                if let Err(clear_error) = self.credentials.clear_all().await {
                    warn!(error = %clear_error, "Failed to clear stale credentials");
                }
            }
        }
        result
    }

    async fn capture_tokens(&self, raw: &RawResponse) {
        let captured = CapturedTokens::from_response(raw);
        if captured.is_empty() {
            return;
        }
        if let Err(error) = self.store_tokens(&captured).await {
            warn!(error = %error, "Failed to persist refreshed credentials");
        }
    }

    async fn store_tokens(&self, captured: &CapturedTokens) -> Result<(), CredentialStoreError> {
        if let Some(token) = &captured.bearer_token {
            debug!(token = %redact_secret(token), "Backend refreshed the bearer token");
            self.credentials.set_bearer_token(token).await?;
        }
        if let Some(token) = &captured.refresh_token {
            debug!(token = %redact_secret(token), "Backend issued a refresh token");
            self.credentials.set_refresh_token(token).await?;
        }
        if let Some(cookie) = &captured.session_cookie {
            debug!(cookie = %redact_secret(cookie), "Backend issued a session cookie");
            self.credentials.set_session_cookie(cookie).await?;
        }
        Ok(())
    }
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("fallback", &self.fallback)
            .finish_non_exhaustive()
    }
}
