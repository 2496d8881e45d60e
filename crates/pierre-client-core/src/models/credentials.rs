// ABOUTME: Credential snapshot model holding bearer token, session cookie, and refresh token
// ABOUTME: Blank values are treated as absent so stale empty strings never become auth headers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

/// Point-in-time copy of the stored credentials
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    /// Bearer token issued by the login flow or echoed by the backend
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bearer_token: Option<String>,
    /// Raw session cookie value, possibly including attributes (`abc; Path=/`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_cookie_value: Option<String>,
    /// Refresh token echoed via `X-Refresh-Token`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
}

impl Credentials {
    /// Credentials holding only a bearer token
    #[must_use]
    pub fn bearer(token: impl Into<String>) -> Self {
        Self {
            bearer_token: Some(token.into()),
            ..Self::default()
        }
    }

    /// Credentials holding only a session cookie
    #[must_use]
    pub fn session_cookie(value: impl Into<String>) -> Self {
        Self {
            session_cookie_value: Some(value.into()),
            ..Self::default()
        }
    }

    /// Bearer token, if present and not blank
    #[must_use]
    pub fn bearer_token(&self) -> Option<&str> {
        non_blank(self.bearer_token.as_deref())
    }

    /// Session cookie value, if present and not blank
    #[must_use]
    pub fn session_cookie_value(&self) -> Option<&str> {
        non_blank(self.session_cookie_value.as_deref())
    }

    /// Refresh token, if present and not blank
    #[must_use]
    pub fn refresh_token(&self) -> Option<&str> {
        non_blank(self.refresh_token.as_deref())
    }

    /// Whether no usable credential is stored
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bearer_token().is_none()
            && self.session_cookie_value().is_none()
            && self.refresh_token().is_none()
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
