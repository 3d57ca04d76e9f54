// ABOUTME: LLM provider abstraction layer for schema-constrained chat completion
// ABOUTME: Defines the contract for chat-completion providers plus request, response, and format types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # LLM Provider Service Provider Interface
//!
//! This module defines the contract that LLM providers must implement to serve
//! plan generation and the chat relay.
//!
//! ## Key Concepts
//!
//! - **`LlmCapabilities`**: Bitflags describing provider features (structured output, JSON mode)
//! - **`LlmProvider`**: Async trait for a single, non-streaming chat completion
//! - **`ResponseFormat`**: Free text, JSON mode, or a strict JSON schema the reply must follow
//! - **`ChatRequest`**: Request configuration including model, token budget, and format
//!
//! ## Example: Requesting a schema-constrained reply
//!
//! ```rust,no_run
//! use workout_planner::llm::{ChatMessage, ChatRequest, LlmProvider, ResponseFormat};
//! use serde_json::json;
//!
//! async fn example(provider: &dyn LlmProvider) {
//!     let schema = json!({
//!         "type": "object",
//!         "properties": { "answer": { "type": "string" } },
//!         "required": ["answer"],
//!         "additionalProperties": false
//!     });
//!
//!     let request = ChatRequest::new(vec![
//!         ChatMessage::system("You are a helpful fitness assistant."),
//!         ChatMessage::user("Name one warm-up drill."),
//!     ])
//!     .with_response_format(ResponseFormat::json_schema("answer", schema));
//!
//!     let response = provider.complete(&request).await;
//! }
//! ```

/// Fenced and embedded JSON payload extraction
pub mod json_extract;
mod openai;
/// System prompts per activity
pub mod prompts;

pub use json_extract::extract_json_payload;
pub use openai::{OpenAiConfig, OpenAiProvider};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::AppError;

// ============================================================================
// Capability Flags
// ============================================================================

bitflags::bitflags! {
    /// LLM provider capability flags
    ///
    /// Used by the plan generator to decide whether a JSON schema can be
    /// enforced by the provider or has to be described in the prompt instead.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
    pub struct LlmCapabilities: u8 {
        /// Provider supports system messages
        const SYSTEM_MESSAGES = 0b0000_0001;
        /// Provider supports JSON mode output
        const JSON_MODE = 0b0000_0010;
        /// Provider enforces a caller-supplied JSON schema on the reply
        const STRUCTURED_OUTPUT = 0b0000_0100;
    }
}

impl LlmCapabilities {
    /// Capabilities of a plain text provider
    #[must_use]
    pub const fn text_only() -> Self {
        Self::SYSTEM_MESSAGES
    }

    /// Capabilities of a provider with schema-constrained output
    #[must_use]
    pub const fn full_featured() -> Self {
        Self::SYSTEM_MESSAGES
            .union(Self::JSON_MODE)
            .union(Self::STRUCTURED_OUTPUT)
    }

    /// Check if JSON mode is supported
    #[must_use]
    pub const fn supports_json_mode(&self) -> bool {
        self.contains(Self::JSON_MODE)
    }

    /// Check if strict JSON schemas are supported
    #[must_use]
    pub const fn supports_structured_output(&self) -> bool {
        self.contains(Self::STRUCTURED_OUTPUT)
    }
}

// ============================================================================
// Message Types
// ============================================================================

/// Role of a message in the conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// System instruction message
    System,
    /// User input message
    User,
    /// Assistant response message
    Assistant,
}

impl MessageRole {
    /// Convert to string representation for API calls
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

/// A single message in a chat conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Role of the message sender
    pub role: MessageRole,
    /// Content of the message
    pub content: String,
}

impl ChatMessage {
    /// Create a new chat message
    #[must_use]
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    /// Create a system message
    #[must_use]
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(MessageRole::System, content)
    }

    /// Create a user message
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageRole::User, content)
    }
}

// ============================================================================
// Response Format
// ============================================================================

/// Named JSON schema the reply must conform to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonSchemaFormat {
    /// Schema name reported to the provider
    pub name: String,
    /// JSON Schema document
    pub schema: Value,
    /// Reject replies that deviate from the schema
    pub strict: bool,
}

/// Output format requested from the provider
///
/// Serializes to the chat-completions `response_format` object.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResponseFormat {
    /// Free text
    #[default]
    Text,
    /// Any syntactically valid JSON object
    JsonObject,
    /// JSON matching a specific schema
    JsonSchema {
        /// Schema definition
        json_schema: JsonSchemaFormat,
    },
}

impl ResponseFormat {
    /// Strict JSON schema format
    #[must_use]
    pub fn json_schema(name: impl Into<String>, schema: Value) -> Self {
        Self::JsonSchema {
            json_schema: JsonSchemaFormat {
                name: name.into(),
                schema,
                strict: true,
            },
        }
    }

    /// Whether this format constrains the reply to JSON
    #[must_use]
    pub const fn is_json(&self) -> bool {
        !matches!(self, Self::Text)
    }
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Configuration for a chat completion request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Conversation messages
    pub messages: Vec<ChatMessage>,
    /// Model identifier (provider-specific)
    pub model: Option<String>,
    /// Maximum tokens to generate
    pub max_tokens: Option<u32>,
    /// Requested output format; `None` leaves the provider default
    pub response_format: Option<ResponseFormat>,
}

impl ChatRequest {
    /// Create a new chat request with messages
    #[must_use]
    pub const fn new(messages: Vec<ChatMessage>) -> Self {
        Self {
            messages,
            model: None,
            max_tokens: None,
            response_format: None,
        }
    }

    /// Set the model to use
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set the maximum tokens
    #[must_use]
    pub const fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Set the output format
    #[must_use]
    pub fn with_response_format(mut self, format: ResponseFormat) -> Self {
        self.response_format = Some(format);
        self
    }
}

/// Response from a chat completion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    /// Generated message content
    pub content: String,
    /// Model used for generation
    pub model: String,
    /// Token usage statistics
    pub usage: Option<TokenUsage>,
    /// Finish reason (stop, length, etc.)
    pub finish_reason: Option<String>,
    /// Refusal text when the model declined a structured request
    pub refusal: Option<String>,
}

impl ChatResponse {
    /// Whether generation stopped at the token limit
    #[must_use]
    pub fn is_truncated(&self) -> bool {
        self.finish_reason.as_deref() == Some("length")
    }
}

/// Token usage statistics
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Number of tokens in the prompt
    pub prompt_tokens: u32,
    /// Number of tokens in the completion
    pub completion_tokens: u32,
    /// Total tokens used
    pub total_tokens: u32,
}

// ============================================================================
// Provider Trait
// ============================================================================

/// LLM provider trait for chat completion
///
/// Implementations perform exactly one upstream call per `complete`; retry
/// policy, if any, belongs to the caller.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Unique provider identifier (e.g., "openai")
    fn name(&self) -> &'static str;

    /// Human-readable display name for the provider
    fn display_name(&self) -> &'static str;

    /// Provider capabilities
    fn capabilities(&self) -> LlmCapabilities;

    /// Default model to use if not specified in request
    fn default_model(&self) -> &str;

    /// Perform a chat completion
    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, AppError>;

    /// Check if the provider is reachable and the API key is valid
    async fn health_check(&self) -> Result<bool, AppError>;
}
