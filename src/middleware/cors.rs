// ABOUTME: CORS middleware configuration for HTTP API endpoints
// ABOUTME: Provides Cross-Origin Resource Sharing setup for browser front-ends
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use http::{header::HeaderName, HeaderValue, Method};
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::config::CorsConfig;

/// Configure CORS settings for the plan API
///
/// Origins come from `CORS_ALLOWED_ORIGINS`: `*` (or empty) allows any
/// origin, otherwise a comma-separated list is matched exactly.
///
/// # Examples
///
/// ```bash
/// # Allow all origins (development)
/// export CORS_ALLOWED_ORIGINS="*"
///
/// # Allow the deployed front-end only
/// export CORS_ALLOWED_ORIGINS="https://planner.example.com"
/// ```
#[must_use]
pub fn setup_cors(config: &CorsConfig) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(allow_origin(&config.allowed_origins))
        .allow_headers([
            HeaderName::from_static("content-type"),
            HeaderName::from_static("accept"),
            HeaderName::from_static("origin"),
            HeaderName::from_static("x-requested-with"),
            HeaderName::from_static("x-request-id"),
        ])
        .expose_headers([HeaderName::from_static("x-request-id")])
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
}

fn allow_origin(allowed_origins: &str) -> AllowOrigin {
    if allowed_origins.trim().is_empty() || allowed_origins.trim() == "*" {
        return AllowOrigin::any();
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .filter_map(|origin| HeaderValue::from_str(origin).ok())
        .collect();

    if origins.is_empty() {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(origins)
    }
}
