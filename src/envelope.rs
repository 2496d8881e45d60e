// ABOUTME: Envelope normalizer unwrapping backend and proxy response wrappers to one payload
// ABOUTME: Ordered table of predicate/extractor matchers tried in fixed priority
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Response envelope normalization
//!
//! Payloads reach callers in one of three shapes:
//!
//! - the backend envelope `{ "errorCode": 200, "description": ..., "value": T }`
//! - the fallback proxy wrapper `{ "data": T }`
//! - `T` itself (including plain strings)
//!
//! Each recognized wrapper is an [`EnvelopeMatcher`] in [`ENVELOPE_MATCHERS`].
//! Supporting a new backend wrapper means adding one entry to that table.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::constants::envelope;
use crate::errors::{ClientError, ClientResult};

/// A recognized response wrapper
#[derive(Debug, Clone, Copy)]
pub struct EnvelopeMatcher {
    /// Name used in trace output
    pub name: &'static str,
    /// Whether the payload is wrapped in this envelope
    pub matches: fn(&Value) -> bool,
    /// Pull the inner payload out of the envelope
    pub extract: fn(Value) -> Value,
}

/// Wrappers in the order they are tried
pub const ENVELOPE_MATCHERS: &[EnvelopeMatcher] = &[
    EnvelopeMatcher {
        name: "backend",
        matches: has_value_key,
        extract: take_value_key,
    },
    EnvelopeMatcher {
        name: "proxy",
        matches: has_data_key,
        extract: take_data_key,
    },
];

/// Unwrap the payload from whichever envelope it arrived in
///
/// Returns the payload unchanged when no envelope matches. Performs no
/// validation of the payload's shape.
#[must_use]
pub fn normalize(payload: Value) -> Value {
    let Some(matcher) = ENVELOPE_MATCHERS
        .iter()
        .find(|matcher| (matcher.matches)(&payload))
    else {
        return payload;
    };
    tracing::trace!(envelope = matcher.name, "Unwrapping response envelope");
    (matcher.extract)(payload)
}

/// Unwrap the payload and deserialize it into the caller's type
///
/// # Errors
///
/// Returns `ClientError::InvalidPayload` if the unwrapped payload does not
/// deserialize into `T`.
pub fn normalize_into<T: DeserializeOwned>(payload: Value) -> ClientResult<T> {
    decode(normalize(payload))
}

/// Deserialize an already-unwrapped payload into the caller's type
///
/// # Errors
///
/// Returns `ClientError::InvalidPayload` if the payload does not deserialize
/// into `T`.
pub fn decode<T: DeserializeOwned>(payload: Value) -> ClientResult<T> {
    serde_json::from_value(payload).map_err(|e| ClientError::InvalidPayload {
        message: e.to_string(),
    })
}

fn has_value_key(payload: &Value) -> bool {
    has_key(payload, envelope::VALUE_KEY)
}

fn take_value_key(payload: Value) -> Value {
    take_key(payload, envelope::VALUE_KEY)
}

fn has_data_key(payload: &Value) -> bool {
    has_key(payload, envelope::DATA_KEY)
}

fn take_data_key(payload: Value) -> Value {
    take_key(payload, envelope::DATA_KEY)
}

fn has_key(payload: &Value, key: &str) -> bool {
    payload
        .as_object()
        .is_some_and(|object| object.contains_key(key))
}

fn take_key(payload: Value, key: &str) -> Value {
    match payload {
        Value::Object(mut object) => object.remove(key).unwrap_or(Value::Null),
        other => other,
    }
}
