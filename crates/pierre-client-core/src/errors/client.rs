// ABOUTME: Caller-facing error taxonomy for orchestrated API requests
// ABOUTME: Carries status, message, and the transport that failed so callers can choose messaging
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::credentials::CredentialStoreError;
use super::transport::{TransportError, TransportErrorKind, TransportSide};

/// Result alias for client operations
pub type ClientResult<T> = Result<T, ClientError>;

/// Typed failure of one logical API request
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The round trip itself failed
    #[error("{side} transport {kind} error: {message}")]
    Transport {
        /// Transport that failed
        side: TransportSide,
        /// Failure class
        kind: TransportErrorKind,
        /// Underlying error text
        message: String,
    },

    /// The backend rejected the credentials (401/403)
    #[error("Authentication required ({side} transport returned HTTP {status})")]
    AuthRequired {
        /// Transport that received the rejection
        side: TransportSide,
        /// HTTP status received
        status: u16,
    },

    /// The backend answered with its sign-in page instead of JSON
    #[error("Session expired: {side} transport received a login page (HTTP {status})")]
    HtmlLoginPage {
        /// Transport that received the page
        side: TransportSide,
        /// HTTP status received
        status: u16,
    },

    /// The backend reported an error for an authenticated call
    #[error("Server error {status} via {side} transport: {message}")]
    ServerError {
        /// Transport that received the error
        side: TransportSide,
        /// HTTP status received
        status: u16,
        /// Message extracted from the response body
        message: String,
    },

    /// The session was rejected and no session surface is attached to retry through
    #[error("Fallback transport unavailable: {message}")]
    FallbackUnavailable {
        /// Instruction for the caller
        message: String,
    },

    /// The request cannot be routed by any available transport
    #[error("Unsupported request: {message}")]
    Unsupported {
        /// Why the request cannot be routed
        message: String,
    },

    /// The normalized payload did not match the type the caller asked for
    #[error("Invalid payload: {message}")]
    InvalidPayload {
        /// Deserialization error text
        message: String,
    },

    /// The credential store failed
    #[error("Credential store error")]
    CredentialStore(#[from] CredentialStoreError),
}

impl ClientError {
    /// Attribute a transport error to the transport that produced it
    #[must_use]
    pub fn transport(side: TransportSide, error: TransportError) -> Self {
        Self::Transport {
            side,
            kind: error.kind,
            message: error.message,
        }
    }

    /// Create a server error
    #[must_use]
    pub fn server(side: TransportSide, status: u16, message: impl Into<String>) -> Self {
        Self::ServerError {
            side,
            status,
            message: message.into(),
        }
    }

    /// Create an unsupported-request error
    #[must_use]
    pub fn unsupported(message: impl Into<String>) -> Self {
        Self::Unsupported {
            message: message.into(),
        }
    }

    /// Create a fallback-unavailable error
    #[must_use]
    pub fn fallback_unavailable(message: impl Into<String>) -> Self {
        Self::FallbackUnavailable {
            message: message.into(),
        }
    }

    /// HTTP status associated with this error, if a response was received
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::AuthRequired { status, .. }
            | Self::HtmlLoginPage { status, .. }
            | Self::ServerError { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Transport that failed, when the failure is attributable to one
    #[must_use]
    pub const fn side(&self) -> Option<TransportSide> {
        match self {
            Self::Transport { side, .. }
            | Self::AuthRequired { side, .. }
            | Self::HtmlLoginPage { side, .. }
            | Self::ServerError { side, .. } => Some(*side),
            _ => None,
        }
    }

    /// Whether the stored credentials are known to be stale
    #[must_use]
    pub const fn is_auth_failure(&self) -> bool {
        matches!(
            self,
            Self::AuthRequired { .. } | Self::HtmlLoginPage { .. } | Self::FallbackUnavailable { .. }
        )
    }

    /// Whether the orchestrator may switch to the fallback transport after this error
    #[must_use]
    pub const fn is_retryable_via_fallback(&self) -> bool {
        match self {
            Self::Transport { side, kind, .. } => {
                matches!(side, TransportSide::Primary) && kind.is_network_class()
            }
            Self::AuthRequired { side, .. } | Self::HtmlLoginPage { side, .. } => {
                matches!(side, TransportSide::Primary)
            }
            _ => false,
        }
    }
}
