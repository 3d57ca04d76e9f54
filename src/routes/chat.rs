// ABOUTME: Chat route handler relaying a single message to the model provider
// ABOUTME: Accepts {message} and answers {response} with the assistant's plain text
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::ApiJson;
use crate::constants::endpoints;
use crate::errors::AppError;
use crate::middleware::RequestId;
use crate::resources::ServerResources;
use crate::services::relay_chat;

/// Body of `POST /chat`
#[derive(Debug, Deserialize)]
pub struct ChatMessageRequest {
    /// User message
    pub message: String,
}

/// Reply of `POST /chat`
#[derive(Debug, Serialize, Deserialize)]
pub struct ChatMessageResponse {
    /// Assistant text
    pub response: String,
}

/// Chat routes
pub struct ChatRoutes;

impl ChatRoutes {
    /// Create the chat route
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(endpoints::CHAT, post(Self::send_message))
            .with_state(resources)
    }

    async fn send_message(
        State(resources): State<Arc<ServerResources>>,
        request_id: RequestId,
        ApiJson(request): ApiJson<ChatMessageRequest>,
    ) -> Result<Json<ChatMessageResponse>, AppError> {
        info!(
            message_chars = request.message.chars().count(),
            "Relaying chat message"
        );

        let response = relay_chat(
            resources.provider.as_ref(),
            resources.model(),
            &request.message,
        )
        .await
        .map_err(|e| request_id.attach(e))?;

        Ok(Json(ChatMessageResponse { response }))
    }
}
