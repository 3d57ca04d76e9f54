// ABOUTME: Request tracing helpers for correlation and structured logging
// ABOUTME: Builds per-request spans and exposes the x-request-id value to handlers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::convert::Infallible;

use axum::{
    async_trait,
    body::Body,
    extract::{FromRequestParts, MatchedPath},
    http::{request::Parts, HeaderName, Request},
};
use tracing::Span;

use crate::errors::AppError;

/// Correlation header set on every request and echoed on every response
pub static REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// Span for one HTTP request, keyed by route and request id
pub fn make_request_span(request: &Request<Body>) -> Span {
    let path = request
        .extensions()
        .get::<MatchedPath>()
        .map_or_else(|| request.uri().path(), MatchedPath::as_str);

    let request_id = request
        .headers()
        .get(&REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-");

    tracing::info_span!(
        "http_request",
        method = %request.method(),
        path = %path,
        request_id = %request_id,
    )
}

/// Request id assigned by the request-id layer, if any
#[derive(Debug, Clone, Default)]
pub struct RequestId(pub Option<String>);

impl RequestId {
    /// Stamp this id onto an error so it reaches the response body
    #[must_use]
    pub fn attach(&self, error: AppError) -> AppError {
        match &self.0 {
            Some(id) => error.with_request_id(id.clone()),
            None => error,
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for RequestId
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(
            parts
                .headers
                .get(&REQUEST_ID_HEADER)
                .and_then(|v| v.to_str().ok())
                .map(str::to_owned),
        ))
    }
}
