// ABOUTME: Logging configuration and structured logging setup for observability and debugging
// ABOUTME: Configures log levels and formatters, plus structured events for plan generation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Structured logging configuration

use crate::constants::service_names;
use crate::errors::AppError;
use anyhow::Result;
use serde_json::json;
use std::env;
use std::io;
use tracing::{debug, info, warn};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Output format (json, pretty, compact)
    pub format: LogFormat,
    /// Include source file and line numbers
    pub include_location: bool,
    /// Include span open/close events
    pub include_spans: bool,
    /// Service name for structured logging
    pub service_name: String,
    /// Service version
    pub service_version: String,
    /// Environment (development, testing, production)
    pub environment: String,
}

/// Log output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// `JSON` format for production logging
    Json,
    /// Pretty format for development
    Pretty,
    /// Compact format for space-constrained environments
    Compact,
}

impl LogFormat {
    fn parse(value: Option<&str>) -> Self {
        match value {
            Some("json") => Self::Json,
            Some("compact") => Self::Compact,
            _ => Self::Pretty,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: LogFormat::Pretty,
            include_location: false,
            include_spans: false,
            service_name: service_names::WORKOUT_PLANNER_SERVER.into(),
            service_version: env!("CARGO_PKG_VERSION").to_owned(),
            environment: "development".into(),
        }
    }
}

impl LoggingConfig {
    /// Create logging configuration from environment variables
    #[must_use]
    pub fn from_env() -> Self {
        let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());
        let is_production = environment == "production";

        Self {
            level: env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
            format: LogFormat::parse(env::var("LOG_FORMAT").ok().as_deref()),
            include_location: is_production || env::var("LOG_INCLUDE_LOCATION").is_ok(),
            include_spans: env::var("LOG_INCLUDE_SPANS").is_ok(),
            service_name: env::var("SERVICE_NAME")
                .unwrap_or_else(|_| service_names::WORKOUT_PLANNER_SERVER.into()),
            service_version: env!("CARGO_PKG_VERSION").to_owned(),
            environment,
        }
    }

    /// Build the filter, keeping HTTP client and server internals quiet
    fn env_filter(&self) -> EnvFilter {
        let noisy = [
            ("hyper", tracing::Level::WARN),
            ("hyper_util", tracing::Level::WARN),
            ("reqwest", tracing::Level::WARN),
            ("tower_http", tracing::Level::INFO),
        ];

        let mut filter = EnvFilter::new(&self.level);
        for (target, level) in noisy {
            filter = filter.add_directive(
                format!("{target}={level}")
                    .parse()
                    .unwrap_or_else(|_| level.into()),
            );
        }

        // Only applies when the level is a bare level name
        if let Ok(directive) = format!("workout_planner={}", self.level).parse() {
            filter = filter.add_directive(directive);
        }

        filter
    }

    /// Initialize the global tracing subscriber
    ///
    /// # Errors
    ///
    /// Returns an error if a global subscriber is already installed
    pub fn init(&self) -> Result<()> {
        let registry = tracing_subscriber::registry().with(self.env_filter());
        let span_events = if self.include_spans {
            FmtSpan::NEW | FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        };

        match self.format {
            LogFormat::Json => {
                let json_layer = fmt::layer()
                    .with_file(self.include_location)
                    .with_line_number(self.include_location)
                    .with_target(true)
                    .with_writer(io::stdout)
                    .with_span_events(span_events)
                    .json();

                registry.with(json_layer).try_init()?;
            }
            LogFormat::Pretty => {
                let pretty_layer = fmt::layer()
                    .with_file(self.include_location)
                    .with_line_number(self.include_location)
                    .with_target(true)
                    .with_writer(io::stdout)
                    .with_span_events(span_events);

                registry.with(pretty_layer).try_init()?;
            }
            LogFormat::Compact => {
                let compact_layer = fmt::layer()
                    .compact()
                    .with_target(false)
                    .with_writer(io::stdout)
                    .with_span_events(FmtSpan::NONE);

                registry.with(compact_layer).try_init()?;
            }
        }

        self.log_startup_info();
        Ok(())
    }

    fn log_startup_info(&self) {
        info!(
            service.name = %self.service_name,
            service.version = %self.service_version,
            environment = %self.environment,
            log.level = %self.level,
            log.format = ?self.format,
            "Workout Planner starting up"
        );

        let config_summary = json!({
            "service": {
                "name": self.service_name,
                "version": self.service_version,
                "environment": self.environment
            },
            "logging": {
                "level": self.level,
                "format": format!("{:?}", self.format),
                "location": self.include_location,
                "spans": self.include_spans
            }
        });

        info!("Logging configured: {}", config_summary);
    }
}

/// Initialize logging from environment
///
/// # Errors
///
/// Returns an error if logging initialization fails
pub fn init_from_env() -> Result<()> {
    LoggingConfig::from_env().init()
}

/// Structured events emitted around each plan generation
pub struct PlanLogger;

impl PlanLogger {
    /// Log an accepted generation request and its rendered prompt
    pub fn log_generation_request(plan: &str, model: &str, structured: bool, prompt: &str) {
        info!(
            plan.kind = %plan,
            llm.model = %model,
            llm.structured = structured,
            prompt.chars = prompt.chars().count(),
            event_type = "plan_generation_request",
            "Generating plan"
        );
        debug!(plan.kind = %plan, prompt = %prompt, "Rendered prompt");
    }

    /// Log the outcome of a generation
    pub fn log_generation_result(
        plan: &str,
        success: bool,
        duration_ms: u64,
        total_tokens: Option<u32>,
    ) {
        if success {
            info!(
                plan.kind = %plan,
                duration_ms = duration_ms,
                llm.total_tokens = ?total_tokens,
                event_type = "plan_generation_result",
                "Plan generated"
            );
        } else {
            warn!(
                plan.kind = %plan,
                duration_ms = duration_ms,
                event_type = "plan_generation_result",
                "Plan generation failed"
            );
        }
    }

    /// Log an upstream provider failure with its mapped error code
    pub fn log_provider_failure(plan: &str, provider: &str, error: &AppError) {
        warn!(
            plan.kind = %plan,
            llm.provider = %provider,
            error.code = ?error.code,
            error.message = %error.message,
            event_type = "provider_failure",
            "Model provider call failed"
        );
    }
}
