// ABOUTME: Core types and constants for the Pierre mobile API client
// ABOUTME: Foundation crate with the client error taxonomy, request/response models, and wire constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Pierre Client Core
//!
//! Foundation types shared by every layer of the mobile API client:
//!
//! - **errors**: `ClientError` taxonomy and the structured transport error kinds
//! - **models**: `RequestSpec`, `RawResponse`, `ClassifiedOutcome`, `Credentials`
//! - **constants**: header names, envelope keys, login-page signatures, timeouts
//!
//! This crate performs no I/O. Transports, classification and orchestration
//! live in the `pierre_mobile_client` crate.

/// Wire and configuration constants organized by domain
pub mod constants;
/// Error types for client operations
pub mod errors;
/// Request, response and credential models
pub mod models;

pub use errors::{
    ClientError, ClientResult, CredentialStoreError, TransportError, TransportErrorKind,
    TransportSide,
};
pub use models::{
    ClassifiedOutcome, Credentials, FormField, HttpMethod, RawResponse, RequestBody, RequestSpec,
};
