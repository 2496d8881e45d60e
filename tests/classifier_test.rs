// ABOUTME: Unit tests for response classification
// ABOUTME: Login page detection, auth statuses, error message extraction, and success parsing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use pierre_mobile_client::classifier::{classify, contains_login_signature, error_message, parse_body};
use pierre_mobile_client::models::{ClassifiedOutcome, RawResponse};
use serde_json::json;

const SIGN_IN_PAGE: &str = r#"<!DOCTYPE html>
<html><head><title>Please sign in</title></head>
<body><a href="/oauth2/authorization/google">Sign in with Google</a></body></html>"#;

#[test]
fn test_login_page_with_status_200_is_not_success() {
    let response = RawResponse::new(200, SIGN_IN_PAGE);
    assert_eq!(
        classify(&response),
        ClassifiedOutcome::HtmlLoginPage { status: 200 }
    );
}

#[test]
fn test_html_content_type_is_login_page_even_with_json_like_body() {
    let response =
        RawResponse::new(200, r#"{"ok":true}"#).with_content_type("text/html; charset=UTF-8");
    assert_eq!(
        classify(&response),
        ClassifiedOutcome::HtmlLoginPage { status: 200 }
    );
}

#[test]
fn test_login_page_takes_priority_over_auth_status() {
    let response = RawResponse::new(401, SIGN_IN_PAGE);
    assert_eq!(
        classify(&response),
        ClassifiedOutcome::HtmlLoginPage { status: 401 }
    );
}

#[test]
fn test_login_page_detected_on_redirect_target_fragment() {
    let response = RawResponse::new(200, "Redirecting to /login?next=%2Fapi%2Fprofile");
    assert!(matches!(
        classify(&response),
        ClassifiedOutcome::HtmlLoginPage { .. }
    ));
}

#[test]
fn test_signature_matching_is_case_insensitive() {
    assert!(contains_login_signature("<HTML><body>x</body></HTML>"));
    assert!(contains_login_signature("PLEASE SIGN IN to continue"));
    assert!(!contains_login_signature(r#"{"name":"Morning run"}"#));
}

#[test]
fn test_unauthorized_and_forbidden_are_auth_required() {
    for status in [401, 403] {
        let response = RawResponse::new(status, r#"{"error":"denied"}"#)
            .with_content_type("application/json");
        assert_eq!(
            classify(&response),
            ClassifiedOutcome::AuthRequired { status }
        );
    }
}

#[test]
fn test_server_error_uses_message_field() {
    let response = RawResponse::new(500, r#"{"message":"database unavailable"}"#);
    assert_eq!(
        classify(&response),
        ClassifiedOutcome::ServerError {
            status: 500,
            message: "database unavailable".to_owned(),
        }
    );
}

#[test]
fn test_server_error_prefers_message_then_error_then_description() {
    assert_eq!(
        error_message(400, r#"{"error":"bad input","description":"ignored"}"#),
        "bad input"
    );
    assert_eq!(
        error_message(400, r#"{"description":"Goal date is in the past"}"#),
        "Goal date is in the past"
    );
}

#[test]
fn test_server_error_appends_business_error_code() {
    let message = error_message(422, r#"{"errorCode":4001,"description":"Invalid goal"}"#);
    assert_eq!(message, "Invalid goal (errorCode 4001)");
}

#[test]
fn test_success_error_code_is_not_appended() {
    let message = error_message(500, r#"{"errorCode":200,"message":"odd but ok"}"#);
    assert_eq!(message, "odd but ok");
}

#[test]
fn test_server_error_without_json_uses_truncated_snippet() {
    let body = "x".repeat(500);
    let message = error_message(502, &body);
    assert!(message.len() < body.len());
    assert!(message.starts_with("xxxx"));
}

#[test]
fn test_server_error_with_empty_body_reports_status() {
    assert_eq!(error_message(503, ""), "HTTP 503");
}

#[test]
fn test_success_parses_json() {
    let response = RawResponse::new(200, r#"{"value":{"id":1}}"#);
    assert_eq!(
        classify(&response),
        ClassifiedOutcome::Success(json!({"value": {"id": 1}}))
    );
}

#[test]
fn test_success_with_plain_text_keeps_raw_string() {
    let response = RawResponse::new(200, "pong");
    assert_eq!(classify(&response), ClassifiedOutcome::Success(json!("pong")));
}

#[test]
fn test_success_with_empty_body_is_null() {
    let response = RawResponse::new(204, "");
    assert_eq!(
        classify(&response),
        ClassifiedOutcome::Success(serde_json::Value::Null)
    );
}

#[test]
fn test_parse_body_whitespace_is_null() {
    assert!(parse_body("  \n").is_null());
}

#[test]
fn test_auth_failure_outcomes() {
    assert!(ClassifiedOutcome::AuthRequired { status: 401 }.is_auth_failure());
    assert!(ClassifiedOutcome::HtmlLoginPage { status: 200 }.is_auth_failure());
    assert!(!ClassifiedOutcome::ServerError {
        status: 500,
        message: String::new()
    }
    .is_auth_failure());
    assert!(!ClassifiedOutcome::Success(json!(null)).is_auth_failure());
}
