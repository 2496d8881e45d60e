// ABOUTME: Tests for client configuration loading and validation
// ABOUTME: Environment overrides, defaults, and rejection of invalid origins and timeouts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use std::env;
use std::time::Duration;

use pierre_mobile_client::config::ClientConfig;
use pierre_mobile_client::logging::{LogFormat, LoggingConfig};
use serial_test::serial;

const CLIENT_VARS: [&str; 4] = [
    "PIERRE_API_BASE_URL",
    "PIERRE_HTTP_TIMEOUT_SECS",
    "PIERRE_HTTP_CONNECT_TIMEOUT_SECS",
    "PIERRE_USER_AGENT",
];

fn clear_client_vars() {
    for var in CLIENT_VARS {
        env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_defaults_without_environment() {
    clear_client_vars();

    let config = ClientConfig::from_env().unwrap();

    assert_eq!(config.base_url.as_str(), "http://localhost:8081/");
    assert_eq!(config.timeout, Duration::from_secs(15));
    assert_eq!(config.connect_timeout, Duration::from_secs(10));
    assert_eq!(config.user_agent, "PierreMobile/1.0");
}

#[test]
#[serial]
fn test_environment_overrides() {
    clear_client_vars();
    env::set_var("PIERRE_API_BASE_URL", "https://api.pierre.example");
    env::set_var("PIERRE_HTTP_TIMEOUT_SECS", "30");
    env::set_var("PIERRE_HTTP_CONNECT_TIMEOUT_SECS", "5");
    env::set_var("PIERRE_USER_AGENT", "PierreMobile/2.0 (test)");

    let config = ClientConfig::from_env().unwrap();

    assert_eq!(config.base_url.host_str(), Some("api.pierre.example"));
    assert_eq!(config.timeout, Duration::from_secs(30));
    assert_eq!(config.connect_timeout, Duration::from_secs(5));
    assert_eq!(config.user_agent, "PierreMobile/2.0 (test)");

    clear_client_vars();
}

#[test]
#[serial]
fn test_unparseable_timeout_is_rejected() {
    clear_client_vars();
    env::set_var("PIERRE_HTTP_TIMEOUT_SECS", "fifteen");

    assert!(ClientConfig::from_env().is_err());

    clear_client_vars();
}

#[test]
#[serial]
fn test_timeout_over_maximum_is_rejected() {
    clear_client_vars();
    env::set_var("PIERRE_HTTP_TIMEOUT_SECS", "120");

    let error = ClientConfig::from_env().unwrap_err();
    assert!(error.to_string().contains("maximum"));

    clear_client_vars();
}

#[test]
fn test_non_http_origin_is_rejected() {
    assert!(ClientConfig::for_base_url("ftp://files.example.com").is_err());
    assert!(ClientConfig::for_base_url("not a url").is_err());
}

#[test]
fn test_zero_timeout_fails_validation() {
    let config = ClientConfig::for_base_url("https://api.example.com")
        .unwrap()
        .with_connect_timeout(Duration::ZERO);
    assert!(config.validate().is_err());
}

#[test]
fn test_builder_overrides() {
    let config = ClientConfig::for_base_url("https://api.example.com")
        .unwrap()
        .with_timeout(Duration::from_secs(20))
        .with_user_agent("Custom/1.0");

    assert_eq!(config.timeout, Duration::from_secs(20));
    assert_eq!(config.user_agent, "Custom/1.0");
    assert!(config.validate().is_ok());
}

#[test]
fn test_log_format_parsing() {
    assert_eq!(LogFormat::parse("json"), LogFormat::Json);
    assert_eq!(LogFormat::parse("COMPACT"), LogFormat::Compact);
    assert_eq!(LogFormat::parse("anything"), LogFormat::Pretty);
}

#[test]
fn test_logging_filter_builds_for_default_level() {
    let config = LoggingConfig::default();
    assert_eq!(config.service_name, "pierre-mobile-client");
    assert!(config.env_filter().is_ok());
}

#[test]
fn test_logging_filter_rejects_garbage_level() {
    let config = LoggingConfig {
        level: "pierre=notalevel".to_owned(),
        ..LoggingConfig::default()
    };
    assert!(config.env_filter().is_err());
}
