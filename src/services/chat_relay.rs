// ABOUTME: Free-form chat relay that forwards a single user message to the model provider
// ABOUTME: Returns the assistant's plain-text reply with no schema constraint
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::limits;
use crate::errors::{AppError, AppResult};
use crate::llm::{prompts, ChatMessage, ChatRequest, LlmProvider};

/// Send one message and return the assistant text.
///
/// Business rules:
/// - The message must be non-blank and at most `MAX_CHAT_MESSAGE_CHARS` long
/// - No token cap and no response format are applied
///
/// # Errors
///
/// Returns `INVALID_INPUT` / `VALUE_OUT_OF_RANGE` for unusable messages,
/// the provider's error when the call fails, and `EXTERNAL_INVALID_RESPONSE`
/// when the provider answers with nothing.
pub async fn relay_chat(
    provider: &dyn LlmProvider,
    model: &str,
    message: &str,
) -> AppResult<String> {
    let message = message.trim();
    if message.is_empty() {
        return Err(AppError::invalid_input("message must not be empty"));
    }
    if message.chars().count() > limits::MAX_CHAT_MESSAGE_CHARS {
        return Err(AppError::value_out_of_range(
            "message",
            format!(
                "message must be at most {} characters",
                limits::MAX_CHAT_MESSAGE_CHARS
            ),
        ));
    }

    let request = ChatRequest::new(vec![
        ChatMessage::system(prompts::CHAT_SYSTEM_PROMPT),
        ChatMessage::user(message),
    ])
    .with_model(model);

    let response = provider.complete(&request).await?;

    if let Some(refusal) = response.refusal.filter(|r| !r.trim().is_empty()) {
        return Ok(refusal);
    }
    if response.content.trim().is_empty() {
        return Err(AppError::invalid_provider_response("model returned no content"));
    }
    Ok(response.content)
}
