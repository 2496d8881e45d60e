// ABOUTME: reqwest-backed primary transport with fixed timeouts and native failure classification
// ABOUTME: Builds URLs from the configured origin, encodes JSON or multipart bodies, unifies responses
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::BTreeMap;

use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, SET_COOKIE};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, ClientBuilder, Method, Response};
use tracing::debug;
use url::Url;

use super::headers::build_headers;
use super::PrimaryTransport;
use crate::config::ClientConfig;
use crate::constants::headers;
use crate::errors::TransportError;
use crate::models::{Credentials, FormField, HttpMethod, RawResponse, RequestBody, RequestSpec};

/// Primary transport using the process's own HTTP stack
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: Url,
}

impl HttpTransport {
    /// Create a transport with the configured origin, timeouts and user agent
    ///
    /// # Errors
    ///
    /// Returns a `Malformed` transport error if the configuration fails
    /// validation or the HTTP client cannot be built
    pub fn new(config: &ClientConfig) -> Result<Self, TransportError> {
        config
            .validate()
            .map_err(|e| TransportError::malformed(format!("invalid client configuration: {e}")))?;

        let client = ClientBuilder::new()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| TransportError::malformed(format!("failed to build HTTP client: {e}")))?;

        Ok(Self::with_client(client, config.base_url.clone()))
    }

    /// Create a transport around an existing client
    #[must_use]
    pub const fn with_client(client: Client, base_url: Url) -> Self {
        Self { client, base_url }
    }

    /// Backend origin
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }
}

#[async_trait]
impl PrimaryTransport for HttpTransport {
    async fn invoke(
        &self,
        request: &RequestSpec,
        credentials: &Credentials,
    ) -> Result<RawResponse, TransportError> {
        if request.is_get_with_body() {
            return Err(TransportError::malformed(
                "GET requests with a body cannot be sent on the primary transport",
            ));
        }

        let url = build_url(&self.base_url, request.path(), request.query_params())?;
        let header_map = build_headers(request, credentials)?;

        debug!(
            method = %request.method(),
            path = %url.path(),
            "Sending request on primary transport"
        );

        let mut builder = self
            .client
            .request(to_reqwest_method(request.method()), url)
            .headers(header_map);

        builder = match request.payload() {
            Some(RequestBody::Json(value)) => {
                let text = serde_json::to_vec(value).map_err(|e| {
                    TransportError::malformed(format!("failed to serialize JSON body: {e}"))
                })?;
                builder.body(text)
            }
            Some(RequestBody::Form(fields)) => builder.multipart(build_form(fields)?),
            None => builder,
        };

        let response = builder.send().await.map_err(classify_reqwest_error)?;
        read_response(response).await
    }
}

/// Join a relative path and query onto the backend origin
///
/// # Errors
///
/// Returns a `Malformed` transport error for absolute or protocol-relative
/// URLs, unparseable paths, and any path that resolves outside the origin
pub fn build_url(
    base: &Url,
    path: &str,
    query: &BTreeMap<String, String>,
) -> Result<Url, TransportError> {
    if path.starts_with("//") || path.contains("://") {
        return Err(TransportError::malformed(format!(
            "request path must be relative, got '{path}'"
        )));
    }

    let mut url = base
        .join(path)
        .map_err(|e| TransportError::malformed(format!("invalid request path '{path}': {e}")))?;

    // Credentials are attached to every request; they never leave the origin
    if url.origin() != base.origin() {
        return Err(TransportError::malformed(format!(
            "request path '{path}' resolves outside the backend origin"
        )));
    }

    if !query.is_empty() {
        url.query_pairs_mut()
            .extend_pairs(query.iter().map(|(k, v)| (k.as_str(), v.as_str())));
    }

    Ok(url)
}

fn to_reqwest_method(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Put => Method::PUT,
        HttpMethod::Patch => Method::PATCH,
        HttpMethod::Delete => Method::DELETE,
    }
}

fn build_form(fields: &[FormField]) -> Result<Form, TransportError> {
    fields.iter().try_fold(Form::new(), |form, field| match field {
        FormField::Text { name, value } => Ok(form.text(name.clone(), value.clone())),
        FormField::File {
            name,
            file_name,
            content_type,
            data,
        } => {
            let mut part = Part::bytes(data.clone()).file_name(file_name.clone());
            if let Some(mime) = content_type {
                part = part.mime_str(mime).map_err(|e| {
                    TransportError::malformed(format!("invalid content type '{mime}': {e}"))
                })?;
            }
            Ok(form.part(name.clone(), part))
        }
    })
}

/// Map a reqwest failure to a transport error kind at the point of failure
///
/// Timeouts and builder failures are recognized explicitly. Every other
/// failure (connect, request, redirect, body, decode) means the round trip
/// did not complete, and is reported as `Network`.
fn classify_reqwest_error(error: reqwest::Error) -> TransportError {
    if error.is_timeout() {
        TransportError::timeout(error.to_string())
    } else if error.is_builder() {
        TransportError::malformed(error.to_string())
    } else {
        TransportError::network(error.to_string())
    }
}

async fn read_response(response: Response) -> Result<RawResponse, TransportError> {
    let status = response.status().as_u16();
    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);

    let mut captured = BTreeMap::new();
    for (name, value) in response.headers() {
        let Ok(value) = value.to_str() else {
            continue;
        };
        // Several Set-Cookie headers may arrive; keep the session cookie one
        if *name == SET_COOKIE
            && captured.contains_key(name.as_str())
            && !value.contains(headers::SESSION_COOKIE_NAME)
        {
            continue;
        }
        captured.insert(name.as_str().to_owned(), value.to_owned());
    }

    let body = response.text().await.map_err(classify_reqwest_error)?;

    Ok(RawResponse {
        status,
        content_type,
        body,
        headers: captured,
    })
}
