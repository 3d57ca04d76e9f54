// ABOUTME: Shared test setup for integration tests
// ABOUTME: Provides quiet logging, test configuration, and router construction around a scripted provider
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::missing_panics_doc,
    clippy::must_use_candidate
)]
//! Shared test utilities for `workout_planner`

use std::sync::{Arc, Once};

use workout_planner::config::ServerConfig;
use workout_planner::llm::LlmProvider;
use workout_planner::resources::ServerResources;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            Ok("WARN" | "ERROR") | _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Configuration with only the API key set, plus optional overrides
pub fn test_config(overrides: &[(&str, &str)]) -> ServerConfig {
    let mut vars = vec![("OPENAI_API_KEY".to_owned(), "sk-test".to_owned())];
    vars.extend(
        overrides
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned())),
    );

    ServerConfig::from_lookup(|key| {
        vars.iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    })
    .expect("test configuration should be valid")
}

/// Server resources around a provider
pub fn create_test_resources(provider: Arc<dyn LlmProvider>) -> Arc<ServerResources> {
    init_test_logging();
    Arc::new(ServerResources::new(test_config(&[]), provider))
}
