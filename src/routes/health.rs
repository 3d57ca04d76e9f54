// ABOUTME: Health check route handlers for service monitoring and status endpoints
// ABOUTME: Liveness needs nothing; readiness asks the model provider whether it is reachable
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Health check routes for service monitoring
//!
//! `/health` answers as long as the process is serving. `/ready` also checks
//! that the configured provider accepts our credentials and is reachable.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use tracing::warn;

use crate::constants::{endpoints, service_names};
use crate::resources::ServerResources;

/// Health routes implementation
pub struct HealthRoutes;

impl HealthRoutes {
    /// Create all health check routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(endpoints::HEALTH, get(Self::health))
            .route(endpoints::READY, get(Self::ready))
            .with_state(resources)
    }

    async fn health() -> Json<serde_json::Value> {
        Json(json!({
            "status": "healthy",
            "service": service_names::WORKOUT_PLANNER_SERVER,
            "version": env!("CARGO_PKG_VERSION"),
            "timestamp": chrono::Utc::now().to_rfc3339()
        }))
    }

    async fn ready(State(resources): State<Arc<ServerResources>>) -> Response {
        let provider = resources.provider.display_name();

        let reason = match resources.provider.health_check().await {
            Ok(true) => None,
            Ok(false) => Some(format!("{provider} is not reachable")),
            Err(e) => Some(e.message),
        };

        match reason {
            None => (
                StatusCode::OK,
                Json(json!({
                    "status": "ready",
                    "provider": provider,
                    "model": resources.model(),
                    "timestamp": chrono::Utc::now().to_rfc3339()
                })),
            )
                .into_response(),
            Some(reason) => {
                warn!(provider = %provider, "Readiness check failed: {}", reason);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    Json(json!({
                        "status": "not_ready",
                        "provider": provider,
                        "reason": reason,
                        "timestamp": chrono::Utc::now().to_rfc3339()
                    })),
                )
                    .into_response()
            }
        }
    }
}
