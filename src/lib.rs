// ABOUTME: Main library entry point for the Workout Planner API
// ABOUTME: Turns typed activity requests into LLM-generated, schema-checked training plans
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Workout Planner
//!
//! An HTTP service that generates circuit workouts, swim sessions, stretching
//! routines, and multi-day strength programs with a large language model.
//!
//! ## Request flow
//!
//! 1. A route deserializes the typed request body for one plan kind
//! 2. The plan validates ranges and text limits
//! 3. The plan renders its prompt and strict response schema
//! 4. The provider is called once, schema-constrained when it supports it
//! 5. The reply is decoded into the plan's typed response and shape-checked
//!
//! Every failure along the way is returned as a uniform JSON error body.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use workout_planner::config::ServerConfig;
//! use workout_planner::resources::ServerResources;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::from_env()?;
//!     let resources = Arc::new(ServerResources::from_config(config)?);
//!     workout_planner::server::run(resources).await
//! }
//! ```

/// Environment-driven server configuration
pub mod config;

/// Limits, endpoints, and provider defaults
pub mod constants;

/// Unified error handling
pub mod errors;

/// LLM provider abstraction and the `OpenAI` implementation
pub mod llm;

/// Structured logging setup
pub mod logging;

/// CORS and request tracing middleware
pub mod middleware;

/// Activity plan definitions
pub mod plans;

/// Shared server state
pub mod resources;

/// HTTP route handlers
pub mod routes;

/// Router assembly and serve loop
pub mod server;

/// Plan generation and chat relay services
pub mod services;
