// ABOUTME: Fallback transport boundary for the session-bearing sandbox proxy
// ABOUTME: Request/reply contract, reply shape unification, and the attachable capability slot
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Fallback transport boundary
//!
//! The fallback transport executes requests inside an environment that
//! already holds the backend session (an embedded browser context). Only the
//! contract lives here; the sandbox itself is an external collaborator that
//! implements [`FallbackTransport`].
//!
//! ## Reply shapes
//!
//! The proxy answers in one of three shapes, unified by
//! [`FallbackReply::into_raw_response`] before classification:
//!
//! - a raw HTTP-like response (`status`, `contentType`, `body`)
//! - a structured JSON value, possibly signalling failure through `status`,
//!   `error`, `message` or `errorCode` fields
//! - a string that usually holds JSON and needs a parse step
//!
//! ## Availability
//!
//! The sandbox only exists while its session surface is mounted.
//! [`FallbackSlot`] models that as an optional capability the orchestrator
//! checks before every fallback attempt.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::info;

use crate::auth::ActiveAuth;
use crate::classifier::parse_body;
use crate::constants::{envelope, headers};
use crate::models::{Credentials, FormField, HttpMethod, RawResponse, RequestBody, RequestSpec};
use crate::transport::headers::is_auth_header;

/// Request as handed to the sandbox proxy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FallbackRequest {
    /// HTTP method; GET may carry a body here
    pub method: HttpMethod,
    /// Relative path, resolved by the proxy against the backend origin
    pub path: String,
    /// Headers to forward
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
    /// Query parameters
    #[serde(default)]
    pub query: BTreeMap<String, String>,
    /// JSON body
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,
    /// Whether the request is a multipart form submission
    #[serde(default)]
    pub use_form_data: bool,
    /// Multipart fields when `use_form_data` is set
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub form_data_fields: Vec<FormField>,
}

impl FallbackRequest {
    /// Translate a request spec for the proxy
    ///
    /// Caller headers are forwarded except `Authorization`/`Cookie`. A bearer
    /// token is forwarded as `Authorization`; a session cookie never is, the
    /// sandbox holds its own session.
    #[must_use]
    pub fn from_spec(request: &RequestSpec, credentials: &Credentials) -> Self {
        let mut forwarded: BTreeMap<String, String> = request
            .headers()
            .iter()
            .filter(|(name, _)| !is_auth_header(name))
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect();

        let bearer = ActiveAuth::from_credentials(credentials).filter(ActiveAuth::is_bearer);
        if let Some(auth) = bearer {
            let (name, value) = auth.header();
            forwarded.insert(name.to_owned(), value);
        }

        let (body, use_form_data, form_data_fields) = match request.payload() {
            Some(RequestBody::Json(value)) => (Some(value.clone()), false, Vec::new()),
            Some(RequestBody::Form(fields)) => (None, true, fields.clone()),
            None => (None, false, Vec::new()),
        };

        Self {
            method: request.method(),
            path: request.path().to_owned(),
            headers: forwarded,
            query: request.query_params().clone(),
            body,
            use_form_data,
            form_data_fields,
        }
    }
}

/// Reply from the sandbox proxy in any of its three shapes
#[derive(Debug, Clone, PartialEq)]
pub enum FallbackReply {
    /// HTTP-like response
    Raw(RawResponse),
    /// Structured value, already decoded
    Value(Value),
    /// Text that usually holds JSON
    Text(String),
}

impl FallbackReply {
    /// Unify the reply into a raw response for classification
    ///
    /// Structured values take their status from an integer `status` field
    /// when it reports a failure. Otherwise a non-200 `errorCode` means that
    /// code when it is an HTTP error status and 500 when it is not. A truthy
    /// `error` field or a non-numeric `status` other than `ok`/`success` also
    /// means 500. Everything else is the declared status, or 200.
    /// Text that is not JSON is passed through as a 200 text body, so a
    /// sign-in page served by the sandbox is still recognized.
    #[must_use]
    pub fn into_raw_response(self) -> RawResponse {
        match self {
            Self::Raw(raw) => raw,
            Self::Value(value) => value_to_raw(value),
            Self::Text(text) => match parse_body(&text) {
                Value::String(_) | Value::Null => RawResponse::new(200, text),
                value => value_to_raw(value),
            },
        }
    }
}

fn value_to_raw(value: Value) -> RawResponse {
    let status = reply_status(&value);
    RawResponse::new(status, value.to_string()).with_content_type(headers::ACCEPT_JSON)
}

fn reply_status(value: &Value) -> u16 {
    let declared = value.get(envelope::STATUS_KEY).filter(|status| !status.is_null());
    let declared_code = declared.and_then(status_code);

    if let Some(code) = declared_code.filter(|code| *code >= 400) {
        return code;
    }
    if let Some(code) = failing_error_code(value) {
        return code;
    }
    if value.get(envelope::ERROR_KEY).is_some_and(is_truthy) {
        return FAILURE_STATUS;
    }
    match (declared, declared_code) {
        (_, Some(code)) => code,
        (Some(word), None) if !is_success_word(word) => FAILURE_STATUS,
        _ => 200,
    }
}

const FAILURE_STATUS: u16 = 500;

fn status_code(value: &Value) -> Option<u16> {
    value
        .as_u64()
        .and_then(|code| u16::try_from(code).ok())
        .or_else(|| value.as_str().and_then(|text| text.trim().parse().ok()))
        .filter(|code| (100..=599).contains(code))
}

/// Status implied by a business `errorCode` other than the success code
fn failing_error_code(value: &Value) -> Option<u16> {
    let code = value
        .get(envelope::ERROR_CODE_KEY)
        .filter(|code| !code.is_null())?;
    let numeric = code
        .as_i64()
        .or_else(|| code.as_str().and_then(|text| text.trim().parse().ok()));
    if numeric == Some(envelope::SUCCESS_ERROR_CODE) {
        return None;
    }
    Some(
        numeric
            .and_then(|code| u16::try_from(code).ok())
            .filter(|code| (400..=599).contains(code))
            .unwrap_or(FAILURE_STATUS),
    )
}

fn is_success_word(value: &Value) -> bool {
    value
        .as_str()
        .is_some_and(|text| matches!(text.trim().to_ascii_lowercase().as_str(), "ok" | "success"))
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(false) => false,
        Value::String(text) => !text.is_empty(),
        _ => true,
    }
}

/// Failure at the fallback boundary
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FallbackError {
    /// No session surface is attached to execute the request
    #[error("No session proxy is attached")]
    Unavailable,
    /// The proxy failed internally
    #[error("Session proxy failed: {0}")]
    Transport(String),
}

/// Alternate transport executing requests inside a session-bearing sandbox
#[async_trait]
pub trait FallbackTransport: Send + Sync {
    /// Execute one request through the sandbox
    ///
    /// # Errors
    ///
    /// Returns `FallbackError::Unavailable` if the sandbox went away and
    /// `FallbackError::Transport` if it failed internally.
    async fn execute(&self, request: FallbackRequest) -> Result<FallbackReply, FallbackError>;
}

/// Optional fallback capability, attached while the session surface is mounted
#[derive(Default, Clone)]
pub struct FallbackSlot {
    inner: Arc<RwLock<Option<Arc<dyn FallbackTransport>>>>,
}

impl FallbackSlot {
    /// Empty slot
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Slot holding a transport
    #[must_use]
    pub fn with_transport(transport: Arc<dyn FallbackTransport>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Some(transport))),
        }
    }

    /// Attach a transport, replacing any previous one
    pub async fn attach(&self, transport: Arc<dyn FallbackTransport>) {
        *self.inner.write().await = Some(transport);
        info!("Session proxy attached");
    }

    /// Detach the current transport
    pub async fn detach(&self) {
        if self.inner.write().await.take().is_some() {
            info!("Session proxy detached");
        }
    }

    /// Currently attached transport
    pub async fn current(&self) -> Option<Arc<dyn FallbackTransport>> {
        self.inner.read().await.clone()
    }

    /// Whether a transport is attached
    pub async fn is_attached(&self) -> bool {
        self.inner.read().await.is_some()
    }
}

impl fmt::Debug for FallbackSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FallbackSlot").finish_non_exhaustive()
    }
}
