// ABOUTME: HTTP server assembly: route groups, middleware stack, and the serve loop
// ABOUTME: Applies request ids, tracing, CORS, timeouts, and body limits to every route
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! HTTP server
//!
//! Layer order, outermost first: request-id assignment, tracing, request-id
//! propagation, CORS, timeout. The body limit is a router layer beneath
//! that stack.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use axum::{
    http::{Response, StatusCode},
    Router,
};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    classify::ServerErrorsFailureClass,
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::{error, info, warn, Span};

use crate::constants::limits;
use crate::errors::AppError;
use crate::middleware::{make_request_span, setup_cors};
use crate::resources::ServerResources;
use crate::routes::{ChatRoutes, HealthRoutes, PlanRoutes};

/// Build the application router with every route group and middleware layer
pub fn build_router(resources: Arc<ServerResources>) -> Router {
    let request_timeout = Duration::from_secs(resources.config.request_timeout_secs);
    let cors = setup_cors(&resources.config.cors);

    Router::new()
        .merge(PlanRoutes::routes(Arc::clone(&resources)))
        .merge(ChatRoutes::routes(Arc::clone(&resources)))
        .merge(HealthRoutes::routes(resources))
        .fallback(route_not_found)
        .layer(RequestBodyLimitLayer::new(limits::MAX_REQUEST_BODY_BYTES))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(make_request_span)
                        .on_response(
                            |response: &Response<_>, latency: Duration, _span: &Span| {
                                let status = response.status();
                                if status.is_server_error() {
                                    error!(
                                        status = %status.as_u16(),
                                        latency_ms = %latency.as_millis(),
                                        "request failed with server error"
                                    );
                                } else {
                                    info!(
                                        status = %status.as_u16(),
                                        latency_ms = %latency.as_millis(),
                                        "request completed"
                                    );
                                }
                            },
                        )
                        .on_failure(
                            |failure: ServerErrorsFailureClass, latency: Duration, _span: &Span| {
                                warn!(
                                    failure = %failure,
                                    latency_ms = %latency.as_millis(),
                                    "request classified as failure"
                                );
                            },
                        ),
                )
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(cors)
                .layer(TimeoutLayer::with_status_code(
                    StatusCode::REQUEST_TIMEOUT,
                    request_timeout,
                )),
        )
}

async fn route_not_found() -> AppError {
    AppError::not_found("Route")
}

/// Bind `host:http_port` and serve until Ctrl-C
///
/// # Errors
///
/// Returns an error if the address cannot be bound or the server fails
pub async fn run(resources: Arc<ServerResources>) -> anyhow::Result<()> {
    let addr = format!(
        "{}:{}",
        resources.config.host, resources.config.http_port
    );
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind HTTP listener on {addr}"))?;

    info!("HTTP server listening on http://{}", addr);

    axum::serve(listener, build_router(resources))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server terminated unexpectedly")?;

    info!("HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to install Ctrl-C handler: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received, draining connections");
}
