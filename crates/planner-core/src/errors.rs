// ABOUTME: Unified error type, error codes, and HTTP error body for the planner
// ABOUTME: Every layer (config, provider, plan decoding, routes) reports failures as AppError
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Unified Error Handling System
//!
//! This module provides the single error type used across the planner service.
//! It defines standard error codes, their HTTP status mapping, and the JSON
//! body returned to clients so that every endpoint fails the same way.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Standard error codes used throughout the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    // Validation (3000-3999)
    /// Request body is malformed or semantically invalid
    #[serde(rename = "INVALID_INPUT")]
    InvalidInput = 3000,
    /// A required request field is absent or blank
    #[serde(rename = "MISSING_REQUIRED_FIELD")]
    MissingRequiredField = 3001,
    /// A numeric or length constraint was violated
    #[serde(rename = "VALUE_OUT_OF_RANGE")]
    ValueOutOfRange = 3003,

    // Resource Management (4000-4999)
    /// Unknown route or resource
    #[serde(rename = "RESOURCE_NOT_FOUND")]
    ResourceNotFound = 4000,

    // External Services (5000-5999)
    /// Model provider returned an error status
    #[serde(rename = "EXTERNAL_SERVICE_ERROR")]
    ExternalServiceError = 5000,
    /// Model provider could not be reached
    #[serde(rename = "EXTERNAL_SERVICE_UNAVAILABLE")]
    ExternalServiceUnavailable = 5001,
    /// Model provider rejected our credentials
    #[serde(rename = "EXTERNAL_AUTH_FAILED")]
    ExternalAuthFailed = 5002,
    /// Model provider rate limit hit
    #[serde(rename = "EXTERNAL_RATE_LIMITED")]
    ExternalRateLimited = 5003,
    /// Model provider answered, but the payload is empty, refused, truncated or mis-shaped
    #[serde(rename = "EXTERNAL_INVALID_RESPONSE")]
    ExternalInvalidResponse = 5004,

    // Configuration (6000-6999)
    /// Generic configuration failure
    #[serde(rename = "CONFIG_ERROR")]
    ConfigError = 6000,
    /// Required configuration value is not set
    #[serde(rename = "CONFIG_MISSING")]
    ConfigMissing = 6001,
    /// Configuration value is present but unusable
    #[serde(rename = "CONFIG_INVALID")]
    ConfigInvalid = 6002,

    // Internal Errors (9000-9999)
    /// Unexpected internal failure
    #[serde(rename = "INTERNAL_ERROR")]
    InternalError = 9000,
    /// JSON encoding or decoding failed
    #[serde(rename = "SERIALIZATION_ERROR")]
    SerializationError = 9003,
}

impl ErrorCode {
    /// Get the HTTP status code for this error
    #[must_use]
    pub const fn http_status(&self) -> u16 {
        match self {
            // 400 Bad Request
            Self::InvalidInput | Self::MissingRequiredField | Self::ValueOutOfRange => 400,

            // 404 Not Found
            Self::ResourceNotFound => 404,

            // 502 Bad Gateway
            Self::ExternalServiceError
            | Self::ExternalServiceUnavailable
            | Self::ExternalInvalidResponse => 502,

            // 503 Service Unavailable
            Self::ExternalAuthFailed | Self::ExternalRateLimited => 503,

            // 500 Internal Server Error
            Self::ConfigError
            | Self::ConfigMissing
            | Self::ConfigInvalid
            | Self::InternalError
            | Self::SerializationError => 500,
        }
    }

    /// Get a user-friendly description of this error
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::InvalidInput => "The provided input is invalid",
            Self::MissingRequiredField => "A required field is missing from the request",
            Self::ValueOutOfRange => "The provided value is outside the acceptable range",
            Self::ResourceNotFound => "The requested resource was not found",
            Self::ExternalServiceError => "The model provider encountered an error",
            Self::ExternalServiceUnavailable => "The model provider is currently unavailable",
            Self::ExternalAuthFailed => "Authentication with the model provider failed",
            Self::ExternalRateLimited => "Model provider rate limit exceeded",
            Self::ExternalInvalidResponse => "The model provider returned an unusable plan",
            Self::ConfigError => "Configuration error encountered",
            Self::ConfigMissing => "Required configuration is missing",
            Self::ConfigInvalid => "Configuration is invalid",
            Self::InternalError => "An internal server error occurred",
            Self::SerializationError => "Data serialization/deserialization failed",
        }
    }

    /// Whether this failure originated at the model provider
    #[must_use]
    pub const fn is_external(&self) -> bool {
        matches!(
            self,
            Self::ExternalServiceError
                | Self::ExternalServiceUnavailable
                | Self::ExternalAuthFailed
                | Self::ExternalRateLimited
                | Self::ExternalInvalidResponse
        )
    }
}

/// Additional context that can be attached to errors
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorContext {
    /// Request ID for tracing
    pub request_id: Option<String>,
    /// Additional key-value context
    pub details: serde_json::Value,
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self {
            request_id: None,
            details: serde_json::Value::Null,
        }
    }
}

/// Unified error type for the application
#[derive(Debug, Error)]
pub struct AppError {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Additional context
    pub context: ErrorContext,
    /// Source error for error chaining
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new `AppError` with the given code and message
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            context: ErrorContext::default(),
            source: None,
        }
    }

    /// Add a request ID to the error context
    #[must_use]
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.context.request_id = Some(request_id.into());
        self
    }

    /// Add details to the error context
    #[must_use]
    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.context.details = details;
        self
    }

    /// Add a source error for error chaining
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Get the HTTP status code for this error
    #[must_use]
    pub const fn http_status(&self) -> u16 {
        self.code.http_status()
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.description(), self.message)
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

/// HTTP error response format
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error payload
    pub error: ErrorResponseDetails,
}

/// Body of an [`ErrorResponse`]
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponseDetails {
    /// Machine-readable code
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Correlation ID when the request carried one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    /// Extra structured context
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub details: serde_json::Value,
}

impl From<AppError> for ErrorResponse {
    fn from(error: AppError) -> Self {
        Self {
            error: ErrorResponseDetails {
                code: error.code,
                message: error.message,
                request_id: error.context.request_id,
                details: error.context.details,
            },
        }
    }
}

/// Convenience functions for creating common errors
impl AppError {
    /// Invalid input
    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Required field missing or blank
    #[must_use]
    pub fn missing_field(field: &str) -> Self {
        Self::new(
            ErrorCode::MissingRequiredField,
            format!("{field} is required"),
        )
        .with_details(serde_json::json!({ "field": field }))
    }

    /// Numeric or length constraint violated
    #[must_use]
    pub fn value_out_of_range(field: &str, message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValueOutOfRange, message)
            .with_details(serde_json::json!({ "field": field }))
    }

    /// Resource not found
    #[must_use]
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ResourceNotFound,
            format!("{} not found", resource.into()),
        )
    }

    /// Internal server error
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// Required configuration value missing
    #[must_use]
    pub fn config_missing(variable: &str) -> Self {
        Self::new(
            ErrorCode::ConfigMissing,
            format!("{variable} environment variable is not set"),
        )
    }

    /// Configuration value present but unusable
    #[must_use]
    pub fn config_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigInvalid, message)
    }

    /// External service error
    #[must_use]
    pub fn external_service(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ExternalServiceError,
            format!("{}: {}", service.into(), message.into()),
        )
    }

    /// External service could not be reached
    #[must_use]
    pub fn external_unavailable(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ExternalServiceUnavailable,
            format!("{}: {}", service.into(), message.into()),
        )
    }

    /// External service rejected our credentials
    #[must_use]
    pub fn external_auth_failed(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ExternalAuthFailed,
            format!("{}: {}", service.into(), message.into()),
        )
    }

    /// External service rate limited us
    #[must_use]
    pub fn external_rate_limited(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ExternalRateLimited, message)
    }

    /// Provider answered with something we cannot use as a plan
    #[must_use]
    pub fn invalid_provider_response(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ExternalInvalidResponse, message)
    }
}

/// Conversion from `anyhow::Error` to `AppError`
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        match error.source() {
            Some(source) => Self::new(ErrorCode::InternalError, error.to_string())
                .with_details(serde_json::json!({
                    "source": source.to_string()
                })),
            None => Self::new(ErrorCode::InternalError, error.to_string()),
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::new(ErrorCode::SerializationError, error.to_string())
    }
}

#[cfg(feature = "http-response")]
mod http_response {
    use super::{AppError, ErrorResponse};
    use axum::response::{IntoResponse, Response};
    use axum::Json;
    use http::StatusCode;

    impl IntoResponse for AppError {
        fn into_response(self) -> Response {
            let status = StatusCode::from_u16(self.http_status())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            if status.is_server_error() {
                tracing::error!(code = ?self.code, status = %status, "{}", self.message);
            } else {
                tracing::debug!(code = ?self.code, status = %status, "{}", self.message);
            }
            (status, Json(ErrorResponse::from(self))).into_response()
        }
    }
}
