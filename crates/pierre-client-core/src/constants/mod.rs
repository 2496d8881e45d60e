// ABOUTME: Constants module with domain-separated organization for the mobile API client
// ABOUTME: Header names, envelope keys, login-page signatures, network defaults, and env var names
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! Constants are grouped by the layer that consumes them rather than kept in a
//! single flat list.

/// HTTP header names and values used on both transports
pub mod headers {
    /// Media type requested on every call
    pub const ACCEPT_JSON: &str = "application/json";

    /// Content type sent with JSON request bodies
    pub const CONTENT_TYPE_JSON: &str = "application/json;charset=utf-8";

    /// Prefix of a bearer `Authorization` header value
    pub const BEARER_PREFIX: &str = "Bearer ";

    /// Name of the backend session cookie
    pub const SESSION_COOKIE_NAME: &str = "JSESSIONID";

    /// Response header carrying a refreshed refresh token (lower-cased)
    pub const REFRESH_TOKEN: &str = "x-refresh-token";

    /// Response header carrying a refreshed bearer token (lower-cased)
    pub const AUTHORIZATION: &str = "authorization";

    /// Response header that may carry a new session cookie (lower-cased)
    pub const SET_COOKIE: &str = "set-cookie";

    /// Request header carrying the session cookie (lower-cased)
    pub const COOKIE: &str = "cookie";
}

/// Keys of the backend response envelope
pub mod envelope {
    /// Payload field of the backend's `{ errorCode, description, value }` envelope
    pub const VALUE_KEY: &str = "value";

    /// Payload field used by the fallback proxy's wrapper
    pub const DATA_KEY: &str = "data";

    /// Business error code field
    pub const ERROR_CODE_KEY: &str = "errorCode";

    /// `errorCode` value the backend uses for success
    pub const SUCCESS_ERROR_CODE: i64 = 200;

    /// Fields searched, in order, for a human-readable error message
    pub const MESSAGE_FIELDS: [&str; 3] = ["message", "error", "description"];

    /// Status field the fallback proxy uses to report failures
    pub const STATUS_KEY: &str = "status";

    /// Error field the fallback proxy uses to report failures
    pub const ERROR_KEY: &str = "error";
}

/// Response classification constants
pub mod classifier {
    /// Content-type marker of an HTML document
    pub const HTML_CONTENT_TYPE: &str = "text/html";

    /// Lower-cased body fragments identifying the backend's sign-in page
    pub const LOGIN_PAGE_SIGNATURES: &[&str] = &[
        "<!doctype html",
        "<html",
        "please sign in",
        "sign in with",
        "/oauth2/authorization",
        "/login?",
    ];

    /// Maximum characters of a raw body kept in an error message
    pub const ERROR_SNIPPET_MAX_CHARS: usize = 200;
}

/// Network defaults for the primary transport
pub mod network {
    /// Default request timeout in seconds
    pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

    /// Default connection timeout in seconds
    pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

    /// Upper bound accepted for either timeout
    pub const MAX_TIMEOUT_SECS: u64 = 60;

    /// Default backend origin
    pub const DEFAULT_BASE_URL: &str = "http://localhost:8081";

    /// User agent sent by the primary transport
    pub const DEFAULT_USER_AGENT: &str = "PierreMobile/1.0";
}

/// Environment variable names read by client configuration
pub mod env_config {
    /// Backend origin
    pub const BASE_URL: &str = "PIERRE_API_BASE_URL";

    /// Request timeout in seconds
    pub const TIMEOUT_SECS: &str = "PIERRE_HTTP_TIMEOUT_SECS";

    /// Connection timeout in seconds
    pub const CONNECT_TIMEOUT_SECS: &str = "PIERRE_HTTP_CONNECT_TIMEOUT_SECS";

    /// User agent override
    pub const USER_AGENT: &str = "PIERRE_USER_AGENT";

    /// Override for the credential file location
    pub const CREDENTIALS_PATH: &str = "PIERRE_CREDENTIALS_PATH";
}

/// Service identity used in structured logs
pub mod service_names {
    /// Name reported by the logging layer
    pub const PIERRE_MOBILE_CLIENT: &str = "pierre-mobile-client";
}
