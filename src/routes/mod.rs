// ABOUTME: Route module organization for the Workout Planner HTTP endpoints
// ABOUTME: Groups plan generation, chat, and health routes plus the shared JSON body extractor
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Route module for the Workout Planner API
//!
//! Each domain module contains only route definitions and thin handlers that
//! delegate to the service layer.

/// Free-form chat relay route
pub mod chat;
/// Health check and readiness routes
pub mod health;
/// Plan generation and catalog routes
pub mod plans;

pub use chat::ChatRoutes;
pub use health::HealthRoutes;
pub use plans::PlanRoutes;

use axum::{
    async_trait,
    extract::{FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;

use crate::errors::AppError;
use crate::middleware::REQUEST_ID_HEADER;

/// JSON body extractor whose rejections use the uniform error body
///
/// axum's own [`Json`] rejects with plain text; this wraps it so a malformed
/// or mistyped body becomes `INVALID_INPUT` like every other failure.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let request_id = req
            .headers()
            .get(&REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);

        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => {
                let error = AppError::invalid_input(rejection.body_text());
                Err(match request_id {
                    Some(id) => error.with_request_id(id),
                    None => error,
                })
            }
        }
    }
}
