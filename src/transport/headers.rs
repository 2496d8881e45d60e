// ABOUTME: Request header construction for the primary transport
// ABOUTME: Accept, JSON content type, caller headers, and exactly one authentication header
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, CONTENT_TYPE};

use crate::auth::ActiveAuth;
use crate::constants::headers;
use crate::errors::TransportError;
use crate::models::{Credentials, RequestBody, RequestSpec};

/// Whether a caller-supplied header would collide with the auth channel
#[must_use]
pub fn is_auth_header(name: &str) -> bool {
    name.eq_ignore_ascii_case(headers::AUTHORIZATION) || name.eq_ignore_ascii_case(headers::COOKIE)
}

/// Build the full header set for a primary-transport request
///
/// `Content-Type` is set only for JSON bodies; multipart bodies get their
/// boundary header from reqwest. Caller headers may override `Accept` but
/// never the authentication header.
///
/// # Errors
///
/// Returns a `Malformed` transport error if a header name or value is invalid
pub fn build_headers(
    request: &RequestSpec,
    credentials: &Credentials,
) -> Result<HeaderMap, TransportError> {
    let mut map = HeaderMap::new();
    map.insert(ACCEPT, HeaderValue::from_static(headers::ACCEPT_JSON));

    for (name, value) in request.headers() {
        if is_auth_header(name) {
            continue;
        }
        map.insert(header_name(name)?, header_value(name, value)?);
    }

    match request.payload() {
        Some(RequestBody::Json(_)) => {
            map.insert(
                CONTENT_TYPE,
                HeaderValue::from_static(headers::CONTENT_TYPE_JSON),
            );
        }
        Some(RequestBody::Form(_)) => {
            map.remove(CONTENT_TYPE);
        }
        None => {}
    }

    if let Some(auth) = ActiveAuth::from_credentials(credentials) {
        let (name, value) = auth.header();
        let mut value = header_value(name, &value)?;
        value.set_sensitive(true);
        map.insert(header_name(name)?, value);
    }

    Ok(map)
}

fn header_name(name: &str) -> Result<HeaderName, TransportError> {
    HeaderName::from_bytes(name.as_bytes())
        .map_err(|e| TransportError::malformed(format!("invalid header name '{name}': {e}")))
}

fn header_value(name: &str, value: &str) -> Result<HeaderValue, TransportError> {
    HeaderValue::from_str(value)
        .map_err(|e| TransportError::malformed(format!("invalid value for header '{name}': {e}")))
}
