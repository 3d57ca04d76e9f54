// ABOUTME: OpenAI chat-completions provider with JSON-schema structured output
// ABOUTME: Maps transport, auth, rate-limit, and envelope failures onto uniform application errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # `OpenAI` Provider
//!
//! Implementation of [`LlmProvider`] for the `OpenAI` chat completions API and
//! any endpoint that speaks the same wire format.
//!
//! ## Configuration
//!
//! - `OPENAI_API_KEY`: bearer token (required)
//! - `OPENAI_BASE_URL`: base URL (default: <https://api.openai.com/v1>)
//! - `OPENAI_MODEL`: model to use (default: `gpt-4o-mini`)
//!
//! ## Example
//!
//! ```rust,no_run
//! use workout_planner::config::ServerConfig;
//! use workout_planner::llm::{ChatMessage, ChatRequest, LlmProvider, OpenAiConfig, OpenAiProvider};
//! use workout_planner::errors::AppError;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), AppError> {
//!     let config = ServerConfig::from_env()?;
//!     let provider = OpenAiProvider::new(OpenAiConfig::from_llm_config(&config.llm))?;
//!     let request = ChatRequest::new(vec![ChatMessage::user("Suggest a warm-up.")]);
//!     let response = provider.complete(&request).await?;
//!     println!("{}", response.content);
//!     Ok(())
//! }
//! ```

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, instrument, warn};

use super::{
    ChatMessage, ChatRequest, ChatResponse, LlmCapabilities, LlmProvider, ResponseFormat,
    TokenUsage,
};
use crate::config::LlmConfig;
use crate::constants::llm_defaults;
use crate::errors::AppError;

// ============================================================================
// API Request/Response Types
// ============================================================================

/// Chat completions request body
#[derive(Debug, Serialize)]
struct OpenAiRequest<'a> {
    model: &'a str,
    messages: Vec<OpenAiMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<&'a ResponseFormat>,
}

#[derive(Debug, Serialize)]
struct OpenAiMessage<'a> {
    role: &'static str,
    content: &'a str,
}

impl<'a> From<&'a ChatMessage> for OpenAiMessage<'a> {
    fn from(msg: &'a ChatMessage) -> Self {
        Self {
            role: msg.role.as_str(),
            content: &msg.content,
        }
    }
}

#[derive(Debug, Deserialize)]
struct OpenAiResponse {
    choices: Vec<OpenAiChoice>,
    #[serde(default)]
    usage: Option<OpenAiUsage>,
    model: String,
}

#[derive(Debug, Deserialize)]
struct OpenAiChoice {
    message: OpenAiResponseMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAiResponseMessage {
    content: Option<String>,
    #[serde(default)]
    refusal: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAiUsage {
    #[serde(rename = "prompt_tokens")]
    prompt: u32,
    #[serde(rename = "completion_tokens")]
    completion: u32,
    #[serde(rename = "total_tokens")]
    total: u32,
}

#[derive(Debug, Deserialize)]
struct OpenAiErrorResponse {
    error: OpenAiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct OpenAiErrorDetail {
    message: String,
    #[serde(rename = "type")]
    error_type: Option<String>,
}

// ============================================================================
// Provider Configuration
// ============================================================================

/// Configuration for the `OpenAI` provider
#[derive(Clone)]
pub struct OpenAiConfig {
    /// Base URL for the API
    pub base_url: String,
    /// Bearer token
    pub api_key: String,
    /// Default model to use
    pub default_model: String,
    /// Capabilities of this endpoint
    pub capabilities: LlmCapabilities,
    /// TCP connect timeout
    pub connect_timeout: Duration,
    /// Whole-request timeout
    pub request_timeout: Duration,
}

impl OpenAiConfig {
    /// Build provider configuration from the server's model settings
    ///
    /// When structured output is switched off the endpoint is treated as
    /// JSON-mode only, so callers fall back to prompt-described schemas.
    #[must_use]
    pub fn from_llm_config(config: &LlmConfig) -> Self {
        let capabilities = if config.structured_output {
            LlmCapabilities::full_featured()
        } else {
            LlmCapabilities::SYSTEM_MESSAGES | LlmCapabilities::JSON_MODE
        };

        Self {
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
            default_model: config.model.clone(),
            capabilities,
            connect_timeout: Duration::from_secs(config.connect_timeout_secs),
            request_timeout: Duration::from_secs(config.request_timeout_secs),
        }
    }
}

impl std::fmt::Debug for OpenAiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .field("default_model", &self.default_model)
            .field("capabilities", &self.capabilities)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Provider Implementation
// ============================================================================

/// `OpenAI` chat completions provider
pub struct OpenAiProvider {
    client: Client,
    config: OpenAiConfig,
}

impl OpenAiProvider {
    /// Create a new provider with the given configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: OpenAiConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| AppError::internal(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    fn api_url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            endpoint
        )
    }

    fn add_auth_header(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request.bearer_auth(&self.config.api_key)
    }

    fn transport_error(&self, e: &reqwest::Error) -> AppError {
        error!("Failed to reach {}: {}", self.config.base_url, e);
        let message = if e.is_timeout() {
            "request timed out".to_owned()
        } else if e.is_connect() {
            format!("cannot connect to {}", self.config.base_url)
        } else {
            format!("request failed: {e}")
        };
        AppError::external_unavailable(llm_defaults::PROVIDER_LABEL, message)
    }

    /// Map a non-success status and body onto an application error
    fn parse_error_response(status: StatusCode, body: &str) -> AppError {
        let detail = serde_json::from_str::<OpenAiErrorResponse>(body).map_or_else(
            |_| body.chars().take(200).collect::<String>(),
            |parsed| match parsed.error.error_type {
                Some(kind) => format!("{kind} - {}", parsed.error.message),
                None => parsed.error.message,
            },
        );

        match status.as_u16() {
            401 | 403 => AppError::external_auth_failed(
                llm_defaults::PROVIDER_LABEL,
                format!("authentication failed: {detail}"),
            ),
            429 => AppError::external_rate_limited(Self::extract_rate_limit_message(&detail)),
            400 => AppError::external_service(
                llm_defaults::PROVIDER_LABEL,
                format!("request rejected: {detail}"),
            ),
            404 => AppError::external_service(
                llm_defaults::PROVIDER_LABEL,
                format!("model or endpoint not found: {detail}"),
            ),
            _ => AppError::external_service(
                llm_defaults::PROVIDER_LABEL,
                format!("API error ({status}): {detail}"),
            ),
        }
    }

    /// Turn a provider rate-limit message into a user-facing hint
    fn extract_rate_limit_message(message: &str) -> String {
        const MARKER: &str = "try again in ";

        let lowered = message.to_lowercase();
        if let Some(retry_pos) = lowered.find(MARKER) {
            let after_prefix = &lowered[retry_pos + MARKER.len()..];
            let end_pos = after_prefix
                .find(|c: char| !c.is_ascii_digit() && c != '.')
                .unwrap_or(after_prefix.len());
            if let Ok(seconds) = after_prefix[..end_pos].parse::<f64>() {
                let seconds_int = seconds.ceil() as u64;
                return format!(
                    "LLM rate limit reached. Please try again in {seconds_int} seconds."
                );
            }
        }
        "LLM rate limit reached. Please wait a moment and try again.".to_owned()
    }
}

#[async_trait]
impl LlmProvider for OpenAiProvider {
    fn name(&self) -> &'static str {
        "openai"
    }

    fn display_name(&self) -> &'static str {
        llm_defaults::PROVIDER_LABEL
    }

    fn capabilities(&self) -> LlmCapabilities {
        self.config.capabilities
    }

    fn default_model(&self) -> &str {
        &self.config.default_model
    }

    #[instrument(
        skip(self, request),
        fields(model = %request.model.as_deref().unwrap_or(&self.config.default_model))
    )]
    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, AppError> {
        let model = request
            .model
            .as_deref()
            .unwrap_or(&self.config.default_model);

        let body = OpenAiRequest {
            model,
            messages: request.messages.iter().map(OpenAiMessage::from).collect(),
            max_tokens: request.max_tokens,
            response_format: request.response_format.as_ref(),
        };

        debug!(
            "Sending chat completion with {} messages, json={}",
            body.messages.len(),
            request
                .response_format
                .as_ref()
                .is_some_and(ResponseFormat::is_json)
        );

        let response = self
            .add_auth_header(self.client.post(self.api_url("chat/completions")))
            .json(&body)
            .send()
            .await
            .map_err(|e| self.transport_error(&e))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| self.transport_error(&e))?;

        if !status.is_success() {
            warn!("{} returned status {}", llm_defaults::PROVIDER_LABEL, status);
            return Err(Self::parse_error_response(status, &text));
        }

        let envelope: OpenAiResponse = serde_json::from_str(&text).map_err(|e| {
            error!("Failed to parse API response: {}", e);
            AppError::invalid_provider_response(format!("Malformed completion envelope: {e}"))
        })?;

        let choice = envelope
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| AppError::invalid_provider_response("API returned no choices"))?;

        let content = choice.message.content.unwrap_or_default();

        debug!(
            "Received response: {} chars, finish_reason: {:?}",
            content.len(),
            choice.finish_reason
        );

        Ok(ChatResponse {
            content,
            model: envelope.model,
            usage: envelope.usage.map(|u| TokenUsage {
                prompt_tokens: u.prompt,
                completion_tokens: u.completion,
                total_tokens: u.total,
            }),
            finish_reason: choice.finish_reason,
            refusal: choice.message.refusal,
        })
    }

    #[instrument(skip(self))]
    async fn health_check(&self) -> Result<bool, AppError> {
        let response = self
            .add_auth_header(self.client.get(self.api_url("models")))
            .send()
            .await
            .map_err(|e| self.transport_error(&e))?;

        let status = response.status();
        if status.is_success() {
            debug!("{} health check passed", llm_defaults::PROVIDER_LABEL);
            return Ok(true);
        }

        warn!(
            "{} health check failed with status: {}",
            llm_defaults::PROVIDER_LABEL,
            status
        );
        if matches!(status.as_u16(), 401 | 403) {
            let body = response.text().await.unwrap_or_default();
            return Err(Self::parse_error_response(status, &body));
        }
        Ok(false)
    }
}
