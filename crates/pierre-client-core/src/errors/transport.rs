// ABOUTME: Transport error types carrying a structured failure kind set where the failure happens
// ABOUTME: Distinguishes network, timeout, and malformed-request failures without message matching
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which transport produced a response or an error
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportSide {
    /// The app's native HTTP stack
    Primary,
    /// The session-bearing sandbox proxy
    Fallback,
}

impl fmt::Display for TransportSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primary => write!(f, "primary"),
            Self::Fallback => write!(f, "fallback"),
        }
    }
}

/// Class of a failed round trip
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportErrorKind {
    /// Connection refused, DNS failure, reset connection
    Network,
    /// The request did not complete within the configured bound
    Timeout,
    /// The request could not be built (bad URL, invalid header, GET with body)
    Malformed,
}

impl TransportErrorKind {
    /// Whether this failure may be recovered by switching transports
    #[must_use]
    pub const fn is_network_class(self) -> bool {
        matches!(self, Self::Network | Self::Timeout)
    }
}

impl fmt::Display for TransportErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Network => write!(f, "network"),
            Self::Timeout => write!(f, "timeout"),
            Self::Malformed => write!(f, "malformed"),
        }
    }
}

/// A round trip that could not complete
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} error: {message}")]
pub struct TransportError {
    /// Failure class
    pub kind: TransportErrorKind,
    /// Underlying error text, for diagnostics only
    pub message: String,
}

impl TransportError {
    /// Create a transport error of the given kind
    #[must_use]
    pub fn new(kind: TransportErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Connection-level failure
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(TransportErrorKind::Network, message)
    }

    /// Timeout
    #[must_use]
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(TransportErrorKind::Timeout, message)
    }

    /// Request could not be built
    #[must_use]
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::new(TransportErrorKind::Malformed, message)
    }

    /// Whether the orchestrator may try the fallback transport after this error
    #[must_use]
    pub const fn is_network_class(&self) -> bool {
        self.kind.is_network_class()
    }
}
