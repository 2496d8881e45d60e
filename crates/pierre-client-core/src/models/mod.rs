// ABOUTME: Data models for one orchestrated API request and the credentials it carries
// ABOUTME: Request specification, raw and classified responses, and stored credentials
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Request-scoped models
//!
//! `RequestSpec`, `RawResponse` and `ClassifiedOutcome` are created and
//! discarded within a single orchestration call. `Credentials` is the only
//! value that outlives a request, and it is owned by the credential store.

/// Stored authentication material
pub mod credentials;
/// Request specification and body types
pub mod request;
/// Raw and classified responses
pub mod response;

pub use credentials::Credentials;
pub use request::{FormField, HttpMethod, RequestBody, RequestSpec};
pub use response::{ClassifiedOutcome, RawResponse};
