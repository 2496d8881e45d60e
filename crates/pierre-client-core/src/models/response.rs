// ABOUTME: Unified raw response produced by either transport and its classified outcome
// ABOUTME: Classification is a tagged union consumed by the request orchestrator
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::{ClientError, ClientResult, TransportSide};

/// Response of one round trip, independent of the transport that produced it
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawResponse {
    /// HTTP status code
    pub status: u16,
    /// `Content-Type` response header
    #[serde(default)]
    pub content_type: Option<String>,
    /// Response body as text
    #[serde(default, alias = "bodyText")]
    pub body: String,
    /// Response headers with lower-cased names
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
}

impl RawResponse {
    /// Response with a status and a body
    #[must_use]
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
            ..Self::default()
        }
    }

    /// Set the content type
    #[must_use]
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Add a header; the name is stored lower-cased
    #[must_use]
    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.insert(name.to_ascii_lowercase(), value.into());
        self
    }

    /// Header value by case-insensitive name
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }
}

/// What a raw response means for the caller
#[derive(Debug, Clone, PartialEq)]
pub enum ClassifiedOutcome {
    /// 2xx with a non-HTML body; carries the parsed JSON or the raw string
    Success(Value),
    /// 401 or 403
    AuthRequired {
        /// HTTP status received
        status: u16,
    },
    /// The backend's sign-in page, whatever the status
    HtmlLoginPage {
        /// HTTP status received
        status: u16,
    },
    /// Any other status of 400 or above
    ServerError {
        /// HTTP status received
        status: u16,
        /// Message extracted from the body
        message: String,
    },
}

impl ClassifiedOutcome {
    /// Whether the session behind this response was rejected
    #[must_use]
    pub const fn is_auth_failure(&self) -> bool {
        matches!(self, Self::AuthRequired { .. } | Self::HtmlLoginPage { .. })
    }

    /// Convert into the caller-facing result, attributing failures to `side`
    ///
    /// # Errors
    ///
    /// Returns the `ClientError` matching every non-success outcome.
    pub fn into_result(self, side: TransportSide) -> ClientResult<Value> {
        match self {
            Self::Success(payload) => Ok(payload),
            Self::AuthRequired { status } => Err(ClientError::AuthRequired { side, status }),
            Self::HtmlLoginPage { status } => Err(ClientError::HtmlLoginPage { side, status }),
            Self::ServerError { status, message } => {
                Err(ClientError::server(side, status, message))
            }
        }
    }
}
