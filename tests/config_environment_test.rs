// ABOUTME: Tests for environment-driven server configuration
// ABOUTME: Mutates process environment, so every test runs serially
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use std::env;
use std::io;
use std::sync::{Arc, Mutex};

use serial_test::serial;
use tracing_subscriber::fmt::MakeWriter;
use workout_planner::config::{Environment, LogLevel, ServerConfig};
use workout_planner::errors::ErrorCode;

const VARS: [&str; 9] = [
    "OPENAI_API_KEY",
    "OPENAI_MODEL",
    "OPENAI_BASE_URL",
    "LLM_STRUCTURED_OUTPUT",
    "HTTP_PORT",
    "HOST",
    "ENVIRONMENT",
    "RUST_LOG",
    "CORS_ALLOWED_ORIGINS",
];

fn clear_env() {
    for var in VARS {
        env::remove_var(var);
    }
}

/// Collects formatted log output in memory
#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = Self;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

#[test]
#[serial]
fn test_from_env_reads_variables() {
    clear_env();
    env::set_var("OPENAI_API_KEY", "sk-env");
    env::set_var("OPENAI_MODEL", "gpt-4o");
    env::set_var("LLM_STRUCTURED_OUTPUT", "false");
    env::set_var("HTTP_PORT", "8088");
    env::set_var("ENVIRONMENT", "production");
    env::set_var("RUST_LOG", "debug");
    env::set_var("CORS_ALLOWED_ORIGINS", "https://planner.example.com");

    let config = ServerConfig::from_env().unwrap();

    assert_eq!(config.llm.api_key, "sk-env");
    assert_eq!(config.llm.model, "gpt-4o");
    assert!(!config.llm.structured_output);
    assert_eq!(config.http_port, 8088);
    assert_eq!(config.environment, Environment::Production);
    assert_eq!(config.log_level, LogLevel::Debug);
    assert_eq!(config.cors.allowed_origins, "https://planner.example.com");

    clear_env();
}

#[test]
#[serial]
fn test_from_env_requires_api_key() {
    clear_env();

    let err = ServerConfig::from_env().unwrap_err();
    assert_eq!(err.code, ErrorCode::ConfigMissing);
    assert!(err.message.contains("OPENAI_API_KEY"));
}

#[test]
#[serial]
fn test_from_env_rejects_bad_port() {
    clear_env();
    env::set_var("OPENAI_API_KEY", "sk-env");
    env::set_var("HTTP_PORT", "eighty");

    let err = ServerConfig::from_env().unwrap_err();
    assert_eq!(err.code, ErrorCode::ConfigInvalid);

    clear_env();
}

#[test]
#[serial]
fn test_debug_output_redacts_api_key() {
    clear_env();
    env::set_var("OPENAI_API_KEY", "sk-very-secret");

    let config = ServerConfig::from_env().unwrap();
    assert!(!format!("{config:?}").contains("sk-very-secret"));
    assert!(!config.summary().contains("sk-very-secret"));

    clear_env();
}

#[test]
#[serial]
fn test_config_loading_is_logged_once_subscriber_is_installed() {
    clear_env();
    env::set_var("OPENAI_API_KEY", "sk-env");

    let logs = CapturedLogs::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(logs.clone())
        .with_max_level(tracing::Level::INFO)
        .finish();
    let config = tracing::subscriber::with_default(subscriber, ServerConfig::from_env).unwrap();

    assert_eq!(config.llm.api_key, "sk-env");
    assert!(logs
        .contents()
        .contains("Loading configuration from environment variables"));

    clear_env();
}
