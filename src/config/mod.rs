// ABOUTME: Configuration module for the mobile API client
// ABOUTME: Environment-driven transport settings fixed per client instance
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Environment and transport configuration
pub mod environment;

pub use environment::ClientConfig;
