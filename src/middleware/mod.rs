// ABOUTME: HTTP middleware for CORS and request tracing
// ABOUTME: Provides request ID extraction and span creation for structured logging
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// CORS configuration
pub mod cors;
/// Request spans and request id extraction
pub mod tracing;

pub use cors::setup_cors;
pub use self::tracing::{make_request_span, RequestId, REQUEST_ID_HEADER};
