// ABOUTME: Authentication header selection and token capture for backend requests
// ABOUTME: Chooses bearer over session cookie and extracts refreshed tokens from response headers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Authentication channel handling
//!
//! The backend accepts either `Authorization: Bearer <token>` or
//! `Cookie: JSESSIONID=<value>`. A request carries exactly one of them, bearer
//! first. Responses may echo a refreshed bearer token, a refresh token, or a
//! new session cookie; [`CapturedTokens`] collects them for persistence.

use crate::constants::headers;
use crate::models::{Credentials, RawResponse};

/// The single authentication channel a request uses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActiveAuth {
    /// Bearer token
    Bearer(String),
    /// Normalized `JSESSIONID=<value>` cookie pair
    SessionCookie(String),
}

impl ActiveAuth {
    /// Pick the active channel; bearer wins when both are stored
    #[must_use]
    pub fn from_credentials(credentials: &Credentials) -> Option<Self> {
        if let Some(token) = credentials.bearer_token() {
            return Some(Self::Bearer(token.to_owned()));
        }
        credentials
            .session_cookie_value()
            .and_then(normalize_session_cookie)
            .map(Self::SessionCookie)
    }

    /// Header name and value to send
    #[must_use]
    pub fn header(&self) -> (&'static str, String) {
        match self {
            Self::Bearer(token) => ("Authorization", format!("{}{token}", headers::BEARER_PREFIX)),
            Self::SessionCookie(cookie) => ("Cookie", cookie.clone()),
        }
    }

    /// Whether this is the bearer channel
    #[must_use]
    pub const fn is_bearer(&self) -> bool {
        matches!(self, Self::Bearer(_))
    }
}

/// Normalize a stored cookie into a `JSESSIONID=<value>` pair
///
/// Only the segment before the first `;` is kept, and the `JSESSIONID=`
/// prefix is added when missing. Returns `None` when no value remains.
#[must_use]
pub fn normalize_session_cookie(raw: &str) -> Option<String> {
    let segment = raw.split(';').next().unwrap_or_default().trim();
    let prefix = format!("{}=", headers::SESSION_COOKIE_NAME);
    let value = segment.strip_prefix(prefix.as_str()).unwrap_or(segment).trim();
    if value.is_empty() {
        return None;
    }
    Some(format!("{prefix}{value}"))
}

/// Extract the token from an `Authorization` response header value
///
/// The `Bearer ` prefix is optional; blank values yield `None`.
#[must_use]
pub fn extract_bearer_token(header_value: &str) -> Option<&str> {
    let trimmed = header_value.trim();
    let token = match trimmed.get(..headers::BEARER_PREFIX.len()) {
        Some(prefix) if prefix.eq_ignore_ascii_case(headers::BEARER_PREFIX) => {
            &trimmed[headers::BEARER_PREFIX.len()..]
        }
        _ => trimmed,
    }
    .trim();
    (!token.is_empty()).then_some(token)
}

/// Extract the `JSESSIONID` value from a `Set-Cookie` header value
#[must_use]
pub fn extract_session_cookie(set_cookie: &str) -> Option<&str> {
    let prefix = format!("{}=", headers::SESSION_COOKIE_NAME);
    set_cookie
        .split(';')
        .map(str::trim)
        .find_map(|pair| pair.strip_prefix(prefix.as_str()))
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

/// Tokens the backend echoed on a response
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapturedTokens {
    /// Refreshed bearer token from the `Authorization` header
    pub bearer_token: Option<String>,
    /// Refresh token from `X-Refresh-Token`
    pub refresh_token: Option<String>,
    /// Session cookie value from `Set-Cookie`
    pub session_cookie: Option<String>,
}

impl CapturedTokens {
    /// Collect tokens from the response headers
    #[must_use]
    pub fn from_response(response: &RawResponse) -> Self {
        Self {
            bearer_token: response
                .header(headers::AUTHORIZATION)
                .and_then(extract_bearer_token)
                .map(str::to_owned),
            refresh_token: response
                .header(headers::REFRESH_TOKEN)
                .map(str::trim)
                .filter(|token| !token.is_empty())
                .map(str::to_owned),
            session_cookie: response
                .header(headers::SET_COOKIE)
                .and_then(extract_session_cookie)
                .map(str::to_owned),
        }
    }

    /// Whether nothing was echoed
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.bearer_token.is_none() && self.refresh_token.is_none() && self.session_cookie.is_none()
    }
}

/// Shorten a secret for log output
#[must_use]
pub fn redact_secret(secret: &str) -> String {
    let visible: String = secret.chars().take(4).collect();
    format!("{visible}***")
}
