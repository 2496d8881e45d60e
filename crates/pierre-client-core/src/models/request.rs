// ABOUTME: Immutable request specification shared by the primary and fallback transports
// ABOUTME: Method, relative path, query, headers, and an optional JSON or multipart body
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// HTTP methods the backend exposes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    /// GET
    Get,
    /// POST
    Post,
    /// PUT
    Put,
    /// PATCH
    Patch,
    /// DELETE
    Delete,
}

impl HttpMethod {
    /// Upper-case wire name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One field of a multipart form submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FormField {
    /// Plain text field
    Text {
        /// Field name
        name: String,
        /// Field value
        value: String,
    },
    /// File attachment, base64 encoded when sent to the fallback proxy
    #[serde(rename_all = "camelCase")]
    File {
        /// Field name
        name: String,
        /// File name reported to the backend
        file_name: String,
        /// Media type of the attachment
        #[serde(default, skip_serializing_if = "Option::is_none")]
        content_type: Option<String>,
        /// File contents
        #[serde(with = "base64_bytes")]
        data: Vec<u8>,
    },
}

impl FormField {
    /// Text field
    #[must_use]
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Text {
            name: name.into(),
            value: value.into(),
        }
    }

    /// File field
    #[must_use]
    pub fn file(
        name: impl Into<String>,
        file_name: impl Into<String>,
        content_type: Option<String>,
        data: Vec<u8>,
    ) -> Self {
        Self::File {
            name: name.into(),
            file_name: file_name.into(),
            content_type,
            data,
        }
    }

    /// Field name
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Text { name, .. } | Self::File { name, .. } => name,
        }
    }
}

/// Request body
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    /// JSON document, serialized to text by the primary transport
    Json(Value),
    /// Multipart form; the transport derives the boundary header itself
    Form(Vec<FormField>),
}

impl RequestBody {
    /// Whether the body carries nothing to send
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Json(value) => value.is_null(),
            Self::Form(fields) => fields.is_empty(),
        }
    }

    /// Whether this is a multipart body
    #[must_use]
    pub const fn is_form(&self) -> bool {
        matches!(self, Self::Form(_))
    }
}

/// Immutable description of one logical API call
///
/// Built with consuming builder methods and never mutated once handed to the
/// orchestrator. `path` is relative to the configured backend origin.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestSpec {
    method: HttpMethod,
    path: String,
    query: BTreeMap<String, String>,
    headers: BTreeMap<String, String>,
    body: Option<RequestBody>,
}

impl RequestSpec {
    /// Create a request without query, headers or body
    #[must_use]
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: BTreeMap::new(),
            headers: BTreeMap::new(),
            body: None,
        }
    }

    /// GET request
    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, path)
    }

    /// POST request
    #[must_use]
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, path)
    }

    /// PUT request
    #[must_use]
    pub fn put(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Put, path)
    }

    /// PATCH request
    #[must_use]
    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Patch, path)
    }

    /// DELETE request
    #[must_use]
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Delete, path)
    }

    /// Add a query parameter
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    /// Add a request header
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Attach a JSON body
    #[must_use]
    pub fn json(self, body: Value) -> Self {
        self.body(RequestBody::Json(body))
    }

    /// Attach a multipart form body
    #[must_use]
    pub fn form(self, fields: Vec<FormField>) -> Self {
        self.body(RequestBody::Form(fields))
    }

    /// Attach a body
    #[must_use]
    pub fn body(mut self, body: RequestBody) -> Self {
        self.body = Some(body);
        self
    }

    /// HTTP method
    #[must_use]
    pub const fn method(&self) -> HttpMethod {
        self.method
    }

    /// Relative path
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Query parameters
    #[must_use]
    pub const fn query_params(&self) -> &BTreeMap<String, String> {
        &self.query
    }

    /// Caller-supplied headers
    #[must_use]
    pub const fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    /// Body, if one is attached and non-empty
    #[must_use]
    pub fn payload(&self) -> Option<&RequestBody> {
        self.body.as_ref().filter(|body| !body.is_empty())
    }

    /// Whether a non-empty body is attached
    #[must_use]
    pub fn has_body(&self) -> bool {
        self.payload().is_some()
    }

    /// GET with a body can only be routed through the fallback transport
    #[must_use]
    pub fn is_get_with_body(&self) -> bool {
        self.method == HttpMethod::Get && self.has_body()
    }
}

mod base64_bytes {
    use base64::{engine::general_purpose::STANDARD, Engine as _};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(data: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(data))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        STANDARD.decode(encoded).map_err(de::Error::custom)
    }
}
