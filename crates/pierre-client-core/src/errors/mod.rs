// ABOUTME: Error types for the mobile API client organized by failure domain
// ABOUTME: Re-exports the client taxonomy, transport error kinds, and credential store errors

//! Client error types
//!
//! - `transport`: failures of a round trip, classified at the point of failure
//! - `client`: the taxonomy surfaced to callers of the orchestrator
//! - `credentials`: failures of the credential store collaborator

/// Caller-facing error taxonomy
pub mod client;
/// Credential store errors
pub mod credentials;
/// Transport-level errors with structured kinds
pub mod transport;

pub use client::{ClientError, ClientResult};
pub use credentials::CredentialStoreError;
pub use transport::{TransportError, TransportErrorKind, TransportSide};
