// ABOUTME: Wire-level tests for the OpenAI provider against a mock chat-completions server
// ABOUTME: Verifies request shape, envelope decoding, and status-to-error mapping
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use std::sync::Arc;
use std::time::Duration;

use serde_json::{json, Value};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};
use workout_planner::errors::ErrorCode;
use workout_planner::llm::{
    ChatMessage, ChatRequest, LlmCapabilities, LlmProvider, OpenAiConfig, OpenAiProvider,
};
use workout_planner::plans::{WorkoutPlan, WorkoutRequest};
use workout_planner::services::PlanGenerator;

// ============================================================================
// Test Helpers
// ============================================================================

fn provider_for(base_url: &str) -> OpenAiProvider {
    common::init_test_logging();
    OpenAiProvider::new(OpenAiConfig {
        base_url: base_url.to_owned(),
        api_key: "sk-test".to_owned(),
        default_model: "gpt-4o-mini".to_owned(),
        capabilities: LlmCapabilities::full_featured(),
        connect_timeout: Duration::from_secs(2),
        request_timeout: Duration::from_secs(5),
    })
    .unwrap()
}

fn envelope(content: Value) -> Value {
    json!({
        "id": "chatcmpl-123",
        "object": "chat.completion",
        "model": "gpt-4o-mini-2024-07-18",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content, "refusal": null},
            "finish_reason": "stop"
        }],
        "usage": {"prompt_tokens": 210, "completion_tokens": 95, "total_tokens": 305}
    })
}

fn simple_request() -> ChatRequest {
    ChatRequest::new(vec![
        ChatMessage::system("You are a coach."),
        ChatMessage::user("Plan a warm-up."),
    ])
}

async fn mount_error(server: &MockServer, status: u16, body: Value) {
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .mount(server)
        .await;
}

// ============================================================================
// Completions
// ============================================================================

#[tokio::test]
async fn test_complete_decodes_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer sk-test"))
        .and(body_partial_json(json!({
            "model": "gpt-4o-mini",
            "messages": [
                {"role": "system", "content": "You are a coach."},
                {"role": "user", "content": "Plan a warm-up."}
            ]
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(envelope(json!("Jog for 5 minutes."))),
        )
        .expect(1)
        .mount(&server)
        .await;

    let response = provider_for(&server.uri())
        .complete(&simple_request())
        .await
        .unwrap();

    assert_eq!(response.content, "Jog for 5 minutes.");
    assert_eq!(response.model, "gpt-4o-mini-2024-07-18");
    assert_eq!(response.finish_reason.as_deref(), Some("stop"));
    assert_eq!(response.usage.unwrap().total_tokens, 305);
    assert!(response.refusal.is_none());
}

#[tokio::test]
async fn test_complete_passes_refusal_through() {
    let server = MockServer::start().await;
    let mut body = envelope(Value::Null);
    body["choices"][0]["message"]["refusal"] = json!("I can't assist with that.");
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;

    let response = provider_for(&server.uri())
        .complete(&simple_request())
        .await
        .unwrap();

    assert!(response.content.is_empty());
    assert_eq!(response.refusal.as_deref(), Some("I can't assist with that."));
}

#[tokio::test]
async fn test_plan_generation_sends_strict_schema() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_partial_json(json!({
            "max_tokens": 500,
            "response_format": {
                "type": "json_schema",
                "json_schema": {"name": "workout_routine", "strict": true}
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!(
            r#"{"circuit":[{"exercise":"Mountain climbers","reps":30}],"restAmount":null}"#
        ))))
        .expect(1)
        .mount(&server)
        .await;

    let generator = PlanGenerator::new(Arc::new(provider_for(&server.uri())), "gpt-4o-mini", true);
    let request: WorkoutRequest =
        serde_json::from_value(json!({"intensity": 8, "duration": 20})).unwrap();

    let plan = generator.generate::<WorkoutPlan>(&request).await.unwrap();

    assert_eq!(plan.circuit[0].exercise, "Mountain climbers");
    assert_eq!(plan.rest_amount, None);
}

// ============================================================================
// Error Mapping
// ============================================================================

#[tokio::test]
async fn test_unauthorized_maps_to_auth_failed() {
    let server = MockServer::start().await;
    mount_error(
        &server,
        401,
        json!({"error": {"message": "Incorrect API key provided", "type": "invalid_request_error"}}),
    )
    .await;

    let err = provider_for(&server.uri())
        .complete(&simple_request())
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::ExternalAuthFailed);
    assert!(err.message.contains("Incorrect API key provided"));
}

#[tokio::test]
async fn test_rate_limit_maps_to_retry_hint() {
    let server = MockServer::start().await;
    mount_error(
        &server,
        429,
        json!({"error": {"message": "Rate limit reached for gpt-4o-mini. Please try again in 1.5s.", "type": "requests"}}),
    )
    .await;

    let err = provider_for(&server.uri())
        .complete(&simple_request())
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::ExternalRateLimited);
    assert_eq!(
        err.message,
        "LLM rate limit reached. Please try again in 2 seconds."
    );
}

#[tokio::test]
async fn test_server_error_maps_to_external_service_error() {
    let server = MockServer::start().await;
    mount_error(&server, 500, json!({"error": {"message": "The server had an error"}})).await;

    let err = provider_for(&server.uri())
        .complete(&simple_request())
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::ExternalServiceError);
    assert_eq!(err.http_status(), 502);
}

#[tokio::test]
async fn test_unknown_model_maps_to_not_found_message() {
    let server = MockServer::start().await;
    mount_error(
        &server,
        404,
        json!({"error": {"message": "The model `gpt-x` does not exist"}}),
    )
    .await;

    let err = provider_for(&server.uri())
        .complete(&simple_request())
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::ExternalServiceError);
    assert!(err.message.contains("model or endpoint not found"));
}

#[tokio::test]
async fn test_malformed_envelope_is_invalid_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
        .mount(&server)
        .await;

    let err = provider_for(&server.uri())
        .complete(&simple_request())
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::ExternalInvalidResponse);
}

#[tokio::test]
async fn test_empty_choices_is_invalid_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"model": "gpt-4o-mini", "choices": []})),
        )
        .mount(&server)
        .await;

    let err = provider_for(&server.uri())
        .complete(&simple_request())
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::ExternalInvalidResponse);
}

#[tokio::test]
async fn test_unreachable_endpoint_is_unavailable() {
    let err = provider_for("http://127.0.0.1:1")
        .complete(&simple_request())
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::ExternalServiceUnavailable);
}

// ============================================================================
// Health Check
// ============================================================================

#[tokio::test]
async fn test_health_check_outcomes() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/models"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/models"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/models"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(json!({"error": {"message": "Invalid API key"}})),
        )
        .mount(&server)
        .await;

    let provider = provider_for(&server.uri());

    assert!(provider.health_check().await.unwrap());
    assert!(!provider.health_check().await.unwrap());
    let err = provider.health_check().await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ExternalAuthFailed);
}
