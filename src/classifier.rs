// ABOUTME: Pure response classifier deciding success, auth failure, login page, or server error
// ABOUTME: Detects the backend's HTML sign-in page even when it is served with status 200
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Response classification
//!
//! The backend answers unauthenticated browser-style requests with its HTML
//! sign-in page and a 200 status, so the status code alone never proves
//! success. Rules, in order:
//!
//! 1. HTML content type or a login-page signature in the body: `HtmlLoginPage`
//! 2. 401 / 403: `AuthRequired`
//! 3. 400 and above: `ServerError` with a message pulled from the body
//! 4. anything else: `Success` with the parsed JSON (or the raw text)

use serde_json::Value;

use crate::constants::{classifier, envelope};
use crate::models::{ClassifiedOutcome, RawResponse};

/// Classify a raw response. Has no side effects.
#[must_use]
pub fn classify(response: &RawResponse) -> ClassifiedOutcome {
    let status = response.status;

    if is_login_page(response) {
        return ClassifiedOutcome::HtmlLoginPage { status };
    }

    if status == 401 || status == 403 {
        return ClassifiedOutcome::AuthRequired { status };
    }

    if status >= 400 {
        return ClassifiedOutcome::ServerError {
            status,
            message: error_message(status, &response.body),
        };
    }

    ClassifiedOutcome::Success(parse_body(&response.body))
}

/// Whether the response is an HTML document or the sign-in page
#[must_use]
pub fn is_login_page(response: &RawResponse) -> bool {
    let html_content_type = response
        .content_type
        .as_deref()
        .is_some_and(|ct| ct.to_ascii_lowercase().contains(classifier::HTML_CONTENT_TYPE));

    html_content_type || contains_login_signature(&response.body)
}

/// Whether the body contains one of the known sign-in page fragments
#[must_use]
pub fn contains_login_signature(body: &str) -> bool {
    let lowered = body.to_lowercase();
    classifier::LOGIN_PAGE_SIGNATURES
        .iter()
        .any(|signature| lowered.contains(signature))
}

/// Parse a success body: JSON when possible, `Null` when empty, raw text otherwise
#[must_use]
pub fn parse_body(body: &str) -> Value {
    if body.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(body).unwrap_or_else(|_| Value::String(body.to_owned()))
}

/// Build a human-readable message for an error response
///
/// Looks for `message`, `error` and `description` in a JSON body, falling back
/// to a truncated snippet of the raw body. A non-success `errorCode` is
/// appended so business error codes survive into logs.
#[must_use]
pub fn error_message(status: u16, body: &str) -> String {
    let parsed: Option<Value> = serde_json::from_str(body).ok();

    let base = parsed
        .as_ref()
        .and_then(message_field)
        .unwrap_or_else(|| snippet(status, body));

    match parsed.as_ref().and_then(business_error_code) {
        Some(code) => format!("{base} (errorCode {code})"),
        None => base,
    }
}

fn message_field(json: &Value) -> Option<String> {
    envelope::MESSAGE_FIELDS.iter().find_map(|field| {
        json.get(field)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|message| !message.is_empty())
            .map(str::to_owned)
    })
}

fn business_error_code(json: &Value) -> Option<String> {
    let code = json.get(envelope::ERROR_CODE_KEY)?;
    let numeric = code
        .as_i64()
        .or_else(|| code.as_str().and_then(|text| text.trim().parse().ok()));
    if code.is_null() || numeric == Some(envelope::SUCCESS_ERROR_CODE) {
        return None;
    }
    Some(match code {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    })
}

fn snippet(status: u16, body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return format!("HTTP {status}");
    }
    let mut text: String = trimmed
        .chars()
        .take(classifier::ERROR_SNIPPET_MAX_CHARS)
        .collect();
    if trimmed.chars().count() > classifier::ERROR_SNIPPET_MAX_CHARS {
        text.push_str("...");
    }
    text
}
