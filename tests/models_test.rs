// ABOUTME: Unit tests for core request, credential, and error models
// ABOUTME: Request builder semantics, blank credential handling, and error attribution helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use pierre_client_core::{
    ClientError, Credentials, FormField, HttpMethod, RequestBody, RequestSpec, TransportError,
    TransportErrorKind, TransportSide,
};
use serde_json::{json, Value};

#[test]
fn test_request_builder_collects_parts() {
    let request = RequestSpec::post("/api/goals")
        .query("draft", "true")
        .header("X-Client-Version", "2.4.0")
        .json(json!({"title": "Ultra"}));

    assert_eq!(request.method(), HttpMethod::Post);
    assert_eq!(request.path(), "/api/goals");
    assert_eq!(request.query_params()["draft"], "true");
    assert_eq!(request.headers()["X-Client-Version"], "2.4.0");
    assert_eq!(
        request.payload(),
        Some(&RequestBody::Json(json!({"title": "Ultra"})))
    );
}

#[test]
fn test_empty_bodies_are_not_payloads() {
    assert!(!RequestSpec::post("/x").json(Value::Null).has_body());
    assert!(!RequestSpec::post("/x").form(Vec::new()).has_body());
    assert!(RequestSpec::post("/x").json(json!({})).has_body());
}

#[test]
fn test_get_with_body_detection() {
    assert!(RequestSpec::get("/x").json(json!({"q": 1})).is_get_with_body());
    assert!(!RequestSpec::get("/x").is_get_with_body());
    assert!(!RequestSpec::delete("/x").json(json!({"q": 1})).is_get_with_body());
}

#[test]
fn test_form_field_names() {
    assert_eq!(FormField::text("note", "hi").name(), "note");
    assert_eq!(FormField::file("file", "a.gpx", None, Vec::new()).name(), "file");
    assert!(RequestBody::Form(vec![FormField::text("a", "b")]).is_form());
}

#[test]
fn test_http_method_wire_names() {
    assert_eq!(HttpMethod::Patch.as_str(), "PATCH");
    assert_eq!(serde_json::to_value(HttpMethod::Delete).unwrap(), "DELETE");
    assert_eq!(HttpMethod::Get.to_string(), "GET");
}

#[test]
fn test_blank_credentials_are_absent() {
    let credentials = Credentials {
        bearer_token: Some("  ".to_owned()),
        session_cookie_value: Some(" abc ".to_owned()),
        refresh_token: Some(String::new()),
    };
    assert_eq!(credentials.bearer_token(), None);
    assert_eq!(credentials.session_cookie_value(), Some("abc"));
    assert_eq!(credentials.refresh_token(), None);
    assert!(!credentials.is_empty());
}

#[test]
fn test_transport_error_kinds() {
    assert!(TransportError::network("refused").is_network_class());
    assert!(TransportError::timeout("slow").is_network_class());
    assert!(!TransportError::malformed("bad").is_network_class());
    assert_eq!(
        TransportError::timeout("slow").to_string(),
        "timeout error: slow"
    );
}

#[test]
fn test_client_error_attribution() {
    let error = ClientError::transport(TransportSide::Primary, TransportError::network("refused"));
    assert_eq!(error.side(), Some(TransportSide::Primary));
    assert_eq!(error.status(), None);
    assert!(error.is_retryable_via_fallback());
    assert!(!error.is_auth_failure());

    let rejected = ClientError::AuthRequired {
        side: TransportSide::Fallback,
        status: 401,
    };
    assert_eq!(rejected.status(), Some(401));
    assert!(rejected.is_auth_failure());
    assert!(!rejected.is_retryable_via_fallback());

    let server = ClientError::server(TransportSide::Primary, 500, "boom");
    assert!(!server.is_retryable_via_fallback());
    assert!(!server.is_auth_failure());

    assert!(matches!(
        ClientError::transport(TransportSide::Fallback, TransportError::malformed("x")),
        ClientError::Transport {
            kind: TransportErrorKind::Malformed,
            ..
        }
    ));
}
