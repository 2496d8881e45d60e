// ABOUTME: Unit tests for response envelope normalization
// ABOUTME: Backend value envelope, proxy data wrapper, pass-through, and typed decoding
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use pierre_mobile_client::envelope::{decode, normalize, normalize_into, ENVELOPE_MATCHERS};
use pierre_mobile_client::errors::ClientError;
use serde::Deserialize;
use serde_json::json;

#[derive(Debug, Deserialize, PartialEq)]
struct Goal {
    id: u32,
    title: String,
}

#[test]
fn test_backend_envelope_is_unwrapped() {
    let payload = json!({
        "errorCode": 200,
        "description": "OK",
        "value": {"id": 7, "title": "Sub-3 marathon"}
    });
    assert_eq!(
        normalize(payload),
        json!({"id": 7, "title": "Sub-3 marathon"})
    );
}

#[test]
fn test_proxy_wrapper_is_unwrapped() {
    let payload = json!({"data": [1, 2, 3]});
    assert_eq!(normalize(payload), json!([1, 2, 3]));
}

#[test]
fn test_backend_envelope_wins_over_proxy_wrapper() {
    let payload = json!({"value": "inner", "data": "other"});
    assert_eq!(normalize(payload), json!("inner"));
}

#[test]
fn test_null_value_stays_null() {
    let payload = json!({"errorCode": 200, "value": null});
    assert!(normalize(payload).is_null());
}

#[test]
fn test_unwrapped_payload_passes_through() {
    let payload = json!({"id": 1, "title": "Long run"});
    assert_eq!(normalize(payload.clone()), payload);
    assert_eq!(normalize(json!("plain text")), json!("plain text"));
    assert_eq!(normalize(json!([{"value": 1}])), json!([{"value": 1}]));
}

#[test]
fn test_only_one_layer_is_unwrapped() {
    let payload = json!({"data": {"value": 42}});
    assert_eq!(normalize(payload), json!({"value": 42}));
}

#[test]
fn test_matchers_are_ordered_backend_first() {
    let names: Vec<&str> = ENVELOPE_MATCHERS.iter().map(|m| m.name).collect();
    assert_eq!(names, vec!["backend", "proxy"]);
}

#[test]
fn test_normalize_into_typed_payload() {
    let goal: Goal = normalize_into(json!({"value": {"id": 3, "title": "10k PR"}})).unwrap();
    assert_eq!(
        goal,
        Goal {
            id: 3,
            title: "10k PR".to_owned()
        }
    );
}

#[test]
fn test_decode_shape_mismatch_is_invalid_payload() {
    let result: Result<Goal, _> = decode(json!({"id": "not-a-number"}));
    assert!(matches!(result, Err(ClientError::InvalidPayload { .. })));
}
