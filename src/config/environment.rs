// ABOUTME: Environment configuration for the mobile API client transports
// ABOUTME: Backend origin, fixed primary-transport timeouts, and user agent with validation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based client configuration

use std::env;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use tracing::info;
use url::Url;

use crate::constants::{env_config, network};

/// Configuration fixed for the lifetime of an `ApiClient`
///
/// Timeouts apply to the primary transport only and are set once here, never
/// per call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Backend origin every relative request path is joined onto
    pub base_url: Url,
    /// Total request timeout of the primary transport
    pub timeout: Duration,
    /// Connection timeout of the primary transport
    pub connect_timeout: Duration,
    /// User agent sent by the primary transport
    pub user_agent: String,
}

impl ClientConfig {
    /// Configuration for a parsed backend origin with default timeouts
    #[must_use]
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            timeout: Duration::from_secs(network::DEFAULT_TIMEOUT_SECS),
            connect_timeout: Duration::from_secs(network::DEFAULT_CONNECT_TIMEOUT_SECS),
            user_agent: network::DEFAULT_USER_AGENT.to_owned(),
        }
    }

    /// Configuration for the given backend origin with default timeouts
    ///
    /// # Errors
    ///
    /// Returns an error if `base_url` is not a valid http(s) URL
    pub fn for_base_url(base_url: &str) -> Result<Self> {
        let config = Self::new(parse_base_url(base_url)?);
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from environment variables
    ///
    /// Reads `PIERRE_API_BASE_URL`, `PIERRE_HTTP_TIMEOUT_SECS`,
    /// `PIERRE_HTTP_CONNECT_TIMEOUT_SECS` and `PIERRE_USER_AGENT`, falling
    /// back to defaults for unset variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set to an unparseable value or the
    /// resulting configuration fails validation
    pub fn from_env() -> Result<Self> {
        let base_url = env::var(env_config::BASE_URL)
            .unwrap_or_else(|_| network::DEFAULT_BASE_URL.to_owned());
        let defaults = Self::new(parse_base_url(&base_url)?);

        let config = Self {
            timeout: secs_from_env(env_config::TIMEOUT_SECS)?.unwrap_or(defaults.timeout),
            connect_timeout: secs_from_env(env_config::CONNECT_TIMEOUT_SECS)?
                .unwrap_or(defaults.connect_timeout),
            user_agent: env::var(env_config::USER_AGENT).unwrap_or(defaults.user_agent),
            ..defaults
        };

        config.validate()?;

        info!(
            base_url = %config.base_url,
            timeout_secs = config.timeout.as_secs(),
            connect_timeout_secs = config.connect_timeout.as_secs(),
            "Loaded API client configuration"
        );

        Ok(config)
    }

    /// Override the request timeout
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Override the connection timeout
    #[must_use]
    pub const fn with_connect_timeout(mut self, connect_timeout: Duration) -> Self {
        self.connect_timeout = connect_timeout;
        self
    }

    /// Override the user agent
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns an error if the origin is not http(s), a timeout is zero, or a
    /// timeout exceeds the supported maximum
    pub fn validate(&self) -> Result<()> {
        if !matches!(self.base_url.scheme(), "http" | "https") {
            return Err(anyhow!(
                "Base URL must use http or https, got '{}'",
                self.base_url.scheme()
            ));
        }

        let max = Duration::from_secs(network::MAX_TIMEOUT_SECS);
        for (name, value) in [
            ("timeout", self.timeout),
            ("connect timeout", self.connect_timeout),
        ] {
            if value.is_zero() {
                return Err(anyhow!("HTTP {name} must be greater than zero"));
            }
            if value > max {
                return Err(anyhow!(
                    "HTTP {name} of {}s exceeds the {}s maximum",
                    value.as_secs(),
                    network::MAX_TIMEOUT_SECS
                ));
            }
        }

        Ok(())
    }
}

fn parse_base_url(raw: &str) -> Result<Url> {
    Url::parse(raw.trim()).with_context(|| format!("Invalid base URL '{raw}'"))
}

fn secs_from_env(name: &str) -> Result<Option<Duration>> {
    match env::var(name) {
        Ok(raw) => {
            let secs: u64 = raw
                .trim()
                .parse()
                .with_context(|| format!("{name} must be a whole number of seconds"))?;
            Ok(Some(Duration::from_secs(secs)))
        }
        Err(_) => Ok(None),
    }
}
