// ABOUTME: In-process LlmProvider that replays scripted completions for tests
// ABOUTME: Records every request so tests can assert on prompts, models, and response formats
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use workout_planner::errors::AppError;
use workout_planner::llm::{ChatRequest, ChatResponse, LlmCapabilities, LlmProvider, TokenUsage};

/// Provider that answers from a queue of prepared outcomes
///
/// An empty queue answers with an internal error so a test that makes an
/// unexpected call fails loudly instead of hanging.
pub struct ScriptedProvider {
    capabilities: LlmCapabilities,
    replies: Mutex<VecDeque<Result<ChatResponse, AppError>>>,
    requests: Mutex<Vec<ChatRequest>>,
    healthy: Mutex<Option<Result<bool, AppError>>>,
}

impl ScriptedProvider {
    /// Provider advertising structured output
    pub fn new() -> Self {
        Self::with_capabilities(LlmCapabilities::full_featured())
    }

    /// Provider advertising the given capabilities
    pub fn with_capabilities(capabilities: LlmCapabilities) -> Self {
        Self {
            capabilities,
            replies: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
            healthy: Mutex::new(None),
        }
    }

    /// Queue a successful completion with the given content
    pub fn reply(self, content: &str) -> Self {
        self.push(Ok(completion(content)));
        self
    }

    /// Queue a prepared completion
    pub fn reply_with(self, response: ChatResponse) -> Self {
        self.push(Ok(response));
        self
    }

    /// Queue a provider failure
    pub fn fail(self, error: AppError) -> Self {
        self.push(Err(error));
        self
    }

    /// Set the readiness outcome
    pub fn health(self, outcome: Result<bool, AppError>) -> Self {
        *self.healthy.lock().unwrap() = Some(outcome);
        self
    }

    /// Requests received so far
    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Number of completions requested
    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    fn push(&self, outcome: Result<ChatResponse, AppError>) {
        self.replies.lock().unwrap().push_back(outcome);
    }
}

/// A finished completion carrying `content`
pub fn completion(content: &str) -> ChatResponse {
    ChatResponse {
        content: content.to_owned(),
        model: "gpt-4o-mini".to_owned(),
        usage: Some(TokenUsage {
            prompt_tokens: 120,
            completion_tokens: 80,
            total_tokens: 200,
        }),
        finish_reason: Some("stop".to_owned()),
        refusal: None,
    }
}

#[async_trait]
impl LlmProvider for ScriptedProvider {
    fn name(&self) -> &'static str {
        "scripted"
    }

    fn display_name(&self) -> &'static str {
        "Scripted"
    }

    fn capabilities(&self) -> LlmCapabilities {
        self.capabilities
    }

    fn default_model(&self) -> &str {
        "gpt-4o-mini"
    }

    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, AppError> {
        self.requests.lock().unwrap().push(request.clone());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(AppError::internal("no scripted reply left")))
    }

    async fn health_check(&self) -> Result<bool, AppError> {
        self.healthy.lock().unwrap().take().unwrap_or(Ok(true))
    }
}
