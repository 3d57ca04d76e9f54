// ABOUTME: Configuration management module for centralized server settings
// ABOUTME: Exposes the environment-driven server, model provider, and CORS configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration module for the Workout Planner server
//!
//! - **Environment**: server configuration from environment variables

/// Environment and server configuration
pub mod environment;

pub use environment::{CorsConfig, Environment, LlmConfig, LogLevel, ServerConfig};
