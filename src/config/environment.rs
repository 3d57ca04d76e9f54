// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Parses server, model provider, and CORS settings from environment variables
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based configuration management
//!
//! All configuration comes from environment variables (optionally seeded from
//! a `.env` file). [`ServerConfig::from_lookup`] takes the variable source as a
//! closure so tests can exercise parsing without touching the process env.

use crate::constants::{env_vars, limits, llm_defaults, ports};
use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::str::FromStr;
use tracing::{info, warn};

/// Strongly typed log level configuration
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Errors only
    Error,
    /// Warnings and errors
    Warn,
    /// Default operational logging
    #[default]
    Info,
    /// Verbose diagnostics, including rendered prompts
    Debug,
    /// Everything
    Trace,
}

impl LogLevel {
    /// Convert to `tracing::Level`
    #[must_use]
    pub const fn to_tracing_level(&self) -> tracing::Level {
        match self {
            Self::Error => tracing::Level::ERROR,
            Self::Warn => tracing::Level::WARN,
            Self::Info => tracing::Level::INFO,
            Self::Debug => tracing::Level::DEBUG,
            Self::Trace => tracing::Level::TRACE,
        }
    }

    /// Parse from string with fallback
    ///
    /// Accepts plain levels as well as `RUST_LOG`-style directives, in which
    /// case the first bare level found wins.
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        s.split(',')
            .map(|directive| directive.rsplit('=').next().unwrap_or(directive))
            .find_map(|level| match level.trim().to_lowercase().as_str() {
                "error" => Some(Self::Error),
                "warn" => Some(Self::Warn),
                "info" => Some(Self::Info),
                "debug" => Some(Self::Debug),
                "trace" => Some(Self::Trace),
                _ => None,
            })
            .unwrap_or_default()
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warn => write!(f, "warn"),
            Self::Info => write!(f, "info"),
            Self::Debug => write!(f, "debug"),
            Self::Trace => write!(f, "trace"),
        }
    }
}

/// Environment type
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Deployed service
    Production,
    /// Test runs
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Model provider configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Base URL of the OpenAI-compatible API
    pub base_url: String,
    /// Bearer token for the provider
    #[serde(skip_serializing)]
    pub api_key: String,
    /// Model identifier sent with every completion
    pub model: String,
    /// Request provider-side JSON-schema constrained output
    pub structured_output: bool,
    /// TCP connect timeout
    pub connect_timeout_secs: u64,
    /// Whole-request timeout
    pub request_timeout_secs: u64,
}

impl fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LlmConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .field("model", &self.model)
            .field("structured_output", &self.structured_output)
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

/// CORS configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Comma-separated origin list, or `*`
    pub allowed_origins: String,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: "*".to_owned(),
        }
    }
}

/// Top-level server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address
    pub host: String,
    /// HTTP API port
    pub http_port: u16,
    /// Deployment environment
    pub environment: Environment,
    /// Log level
    pub log_level: LogLevel,
    /// Model provider settings
    pub llm: LlmConfig,
    /// CORS settings
    pub cors: CorsConfig,
    /// Inbound request timeout, covering the provider round trip
    pub request_timeout_secs: u64,
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns `CONFIG_MISSING` when `OPENAI_API_KEY` is not set and
    /// `CONFIG_INVALID` when a numeric or boolean variable cannot be parsed.
    pub fn from_env() -> AppResult<Self> {
        info!("Loading configuration from environment variables");

        if let Err(e) = dotenvy::dotenv() {
            warn!("No .env file found or failed to load: {}", e);
        }

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source
    ///
    /// # Errors
    ///
    /// Same as [`ServerConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_key = var(env_vars::OPENAI_API_KEY)
            .ok_or_else(|| AppError::config_missing(env_vars::OPENAI_API_KEY))?;

        let config = Self {
            host: var(env_vars::HOST).unwrap_or_else(|| ports::DEFAULT_HOST.to_owned()),
            http_port: parse_or(&var, env_vars::HTTP_PORT, ports::DEFAULT_HTTP_PORT)?,
            environment: var(env_vars::ENVIRONMENT)
                .map(|v| Environment::from_str_or_default(&v))
                .unwrap_or_default(),
            log_level: var(env_vars::RUST_LOG)
                .map(|v| LogLevel::from_str_or_default(&v))
                .unwrap_or_default(),
            llm: LlmConfig {
                base_url: var(env_vars::OPENAI_BASE_URL)
                    .unwrap_or_else(|| llm_defaults::DEFAULT_BASE_URL.to_owned()),
                api_key,
                model: var(env_vars::OPENAI_MODEL)
                    .unwrap_or_else(|| llm_defaults::DEFAULT_MODEL.to_owned()),
                structured_output: parse_bool_or(&var, env_vars::LLM_STRUCTURED_OUTPUT, true)?,
                connect_timeout_secs: parse_or(
                    &var,
                    env_vars::LLM_CONNECT_TIMEOUT_SECS,
                    llm_defaults::CONNECT_TIMEOUT_SECS,
                )?,
                request_timeout_secs: parse_or(
                    &var,
                    env_vars::LLM_REQUEST_TIMEOUT_SECS,
                    llm_defaults::REQUEST_TIMEOUT_SECS,
                )?,
            },
            cors: CorsConfig {
                allowed_origins: var(env_vars::CORS_ALLOWED_ORIGINS)
                    .unwrap_or_else(|| "*".to_owned()),
            },
            request_timeout_secs: parse_or(
                &var,
                env_vars::REQUEST_TIMEOUT_SECS,
                limits::DEFAULT_REQUEST_TIMEOUT_SECS,
            )?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate cross-field constraints
    ///
    /// # Errors
    ///
    /// Returns `CONFIG_INVALID` for a zero port, a blank model, a non-http(s)
    /// base URL, or a zero timeout.
    pub fn validate(&self) -> AppResult<()> {
        if self.http_port == 0 {
            return Err(AppError::config_invalid("HTTP_PORT must be non-zero"));
        }

        if self.llm.model.trim().is_empty() {
            return Err(AppError::config_invalid("OPENAI_MODEL must not be blank"));
        }

        if !(self.llm.base_url.starts_with("http://") || self.llm.base_url.starts_with("https://"))
        {
            return Err(AppError::config_invalid(format!(
                "OPENAI_BASE_URL must be an http(s) URL, got '{}'",
                self.llm.base_url
            )));
        }

        if self.llm.request_timeout_secs == 0 || self.request_timeout_secs == 0 {
            return Err(AppError::config_invalid("timeouts must be non-zero"));
        }

        if self.request_timeout_secs < self.llm.request_timeout_secs {
            warn!(
                "REQUEST_TIMEOUT_SECS ({}) is shorter than LLM_REQUEST_TIMEOUT_SECS ({}); slow generations will be cut off",
                self.request_timeout_secs, self.llm.request_timeout_secs
            );
        }

        Ok(())
    }

    /// Human-readable configuration summary (API key redacted)
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Workout Planner Configuration:\n\
             - Bind: {}:{}\n\
             - Environment: {}\n\
             - Log Level: {}\n\
             - Model Provider: {}\n\
             - Model: {}\n\
             - Structured Output: {}\n\
             - API Key: [REDACTED]\n\
             - CORS Origins: {}\n\
             - Request Timeout: {}s",
            self.host,
            self.http_port,
            self.environment,
            self.log_level,
            self.llm.base_url,
            self.llm.model,
            if self.llm.structured_output {
                "Enabled"
            } else {
                "Disabled"
            },
            self.cors.allowed_origins,
            self.request_timeout_secs,
        )
    }
}

/// Parse an optional variable, falling back to `default` when unset
fn parse_or<T, V>(var: &V, key: &str, default: T) -> AppResult<T>
where
    T: FromStr,
    V: Fn(&str) -> Option<String>,
{
    var(key).map_or(Ok(default), |raw| {
        raw.trim()
            .parse()
            .map_err(|_| AppError::config_invalid(format!("Invalid {key} value: '{raw}'")))
    })
}

/// Parse an optional boolean variable (`true/false/1/0/yes/no`)
fn parse_bool_or<V>(var: &V, key: &str, default: bool) -> AppResult<bool>
where
    V: Fn(&str) -> Option<String>,
{
    var(key).map_or(Ok(default), |raw| match raw.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(AppError::config_invalid(format!(
            "Invalid {key} value: '{raw}'"
        ))),
    })
}
