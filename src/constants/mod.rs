// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Re-exports core limits and names the environment variables the config layer reads
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! Pure data constants live in `planner-core`. This module re-exports them and
//! adds the environment variable names read by the config layer.

pub use planner_core::constants::*;

/// Environment variable names
pub mod env_vars {
    /// HTTP bind address
    pub const HOST: &str = "HOST";
    /// HTTP port
    pub const HTTP_PORT: &str = "HTTP_PORT";
    /// Deployment environment
    pub const ENVIRONMENT: &str = "ENVIRONMENT";
    /// Log level
    pub const RUST_LOG: &str = "RUST_LOG";
    /// Provider API key (required)
    pub const OPENAI_API_KEY: &str = "OPENAI_API_KEY";
    /// Provider base URL
    pub const OPENAI_BASE_URL: &str = "OPENAI_BASE_URL";
    /// Model identifier
    pub const OPENAI_MODEL: &str = "OPENAI_MODEL";
    /// Toggle for provider-side JSON-schema constrained output
    pub const LLM_STRUCTURED_OUTPUT: &str = "LLM_STRUCTURED_OUTPUT";
    /// Provider connect timeout
    pub const LLM_CONNECT_TIMEOUT_SECS: &str = "LLM_CONNECT_TIMEOUT_SECS";
    /// Provider request timeout
    pub const LLM_REQUEST_TIMEOUT_SECS: &str = "LLM_REQUEST_TIMEOUT_SECS";
    /// Allowed CORS origins, comma separated
    pub const CORS_ALLOWED_ORIGINS: &str = "CORS_ALLOWED_ORIGINS";
    /// Inbound request timeout
    pub const REQUEST_TIMEOUT_SECS: &str = "REQUEST_TIMEOUT_SECS";
}
