// ABOUTME: Plan generation pipeline shared by every activity endpoint
// ABOUTME: Validates the request, prompts the provider once, then decodes and shape-checks the reply
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;
use std::time::Instant;

use tracing::debug;

use crate::errors::{AppError, AppResult};
use crate::llm::{extract_json_payload, ChatMessage, ChatRequest, ChatResponse, LlmProvider};
use crate::logging::PlanLogger;
use crate::plans::{schema, ActivityPlan};

/// Generates plans of any [`ActivityPlan`] kind through one provider
#[derive(Clone)]
pub struct PlanGenerator {
    provider: Arc<dyn LlmProvider>,
    model: String,
    structured_output: bool,
}

impl PlanGenerator {
    /// Create a generator
    ///
    /// `structured_output` requests provider-side schema enforcement; it only
    /// takes effect when the provider advertises `STRUCTURED_OUTPUT`.
    #[must_use]
    pub fn new(
        provider: Arc<dyn LlmProvider>,
        model: impl Into<String>,
        structured_output: bool,
    ) -> Self {
        Self {
            provider,
            model: model.into(),
            structured_output,
        }
    }

    /// Model sent with every completion
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Whether replies are constrained by a provider-enforced JSON schema
    #[must_use]
    pub fn uses_structured_output(&self) -> bool {
        self.structured_output && self.provider.capabilities().supports_structured_output()
    }

    /// Assemble the completion request for a plan
    ///
    /// In free-form mode the schema travels inside the prompt and the reply
    /// is expected as a fenced JSON block.
    #[must_use]
    pub fn build_chat_request<P: ActivityPlan>(&self, request: &P::Request) -> ChatRequest {
        let mut prompt = P::build_prompt(request);
        let structured = self.uses_structured_output();

        if !structured {
            prompt.push_str(&free_form_instructions::<P>());
        }

        PlanLogger::log_generation_request(P::KIND.as_str(), &self.model, structured, &prompt);

        let chat = ChatRequest::new(vec![
            ChatMessage::system(P::KIND.system_prompt()),
            ChatMessage::user(prompt),
        ])
        .with_model(self.model.clone())
        .with_max_tokens(P::KIND.max_tokens());

        if structured {
            chat.with_response_format(schema::response_format(P::KIND, P::response_schema()))
        } else {
            chat
        }
    }

    /// Generate one plan
    ///
    /// Exactly one provider call is made per invocation; failures are never
    /// retried and never turned into an empty success.
    ///
    /// # Errors
    ///
    /// - `VALUE_OUT_OF_RANGE` / `MISSING_REQUIRED_FIELD` when the request is
    ///   rejected (the provider is not called)
    /// - the provider's own error when the call fails
    /// - `EXTERNAL_INVALID_RESPONSE` when the reply is refused, truncated,
    ///   empty, or does not match the plan's shape
    pub async fn generate<P: ActivityPlan>(&self, request: &P::Request) -> AppResult<P::Response> {
        if let Err(e) = P::validate_request(request) {
            debug!(plan.kind = %P::KIND, "Rejected request: {}", e.message);
            return Err(e);
        }

        let chat = self.build_chat_request::<P>(request);
        let started = Instant::now();

        let outcome = match self.provider.complete(&chat).await {
            Ok(response) => decode_plan::<P>(&response).map(|plan| (plan, response)),
            Err(e) => Err(e),
        };
        let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

        match outcome {
            Ok((plan, response)) => {
                PlanLogger::log_generation_result(
                    P::KIND.as_str(),
                    true,
                    elapsed_ms,
                    response.usage.map(|u| u.total_tokens),
                );
                Ok(plan)
            }
            Err(e) => {
                PlanLogger::log_provider_failure(P::KIND.as_str(), self.provider.name(), &e);
                PlanLogger::log_generation_result(P::KIND.as_str(), false, elapsed_ms, None);
                Err(e)
            }
        }
    }
}

/// Turn a completion into a validated plan
///
/// # Errors
///
/// Returns `EXTERNAL_INVALID_RESPONSE` for refusals, truncated or empty
/// replies, content without a JSON object, JSON that does not deserialize
/// into the plan's shape, and plans failing [`ActivityPlan::validate_response`].
pub fn decode_plan<P: ActivityPlan>(response: &ChatResponse) -> AppResult<P::Response> {
    if let Some(refusal) = response.refusal.as_deref().filter(|r| !r.trim().is_empty()) {
        return Err(AppError::invalid_provider_response(format!(
            "model refused: {refusal}"
        )));
    }

    if response.is_truncated() {
        return Err(AppError::invalid_provider_response(format!(
            "{} plan was truncated at the token limit",
            P::KIND
        )));
    }

    if response.content.trim().is_empty() {
        return Err(AppError::invalid_provider_response(
            "model returned no content",
        ));
    }

    let payload = extract_json_payload(&response.content).ok_or_else(|| {
        AppError::invalid_provider_response("no JSON object found in model reply")
    })?;

    let plan: P::Response = serde_json::from_str(payload).map_err(|e| {
        AppError::invalid_provider_response(format!(
            "{} does not match the {} shape: {e}",
            P::KIND.schema_name(),
            P::KIND
        ))
        .with_source(e)
    })?;

    P::validate_response(&plan)?;
    Ok(plan)
}

fn free_form_instructions<P: ActivityPlan>() -> String {
    let schema = serde_json::to_string_pretty(&P::response_schema()).unwrap_or_default();
    format!(
        "\n\nThe response should be a JSON object inside a ```json code block matching this JSON schema:\n{schema}"
    )
}
