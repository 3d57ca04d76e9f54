// ABOUTME: Shared server state handed to every route group
// ABOUTME: Owns the configuration, the LLM provider, and the plan generator built on it
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use crate::config::ServerConfig;
use crate::errors::AppResult;
use crate::llm::{LlmProvider, OpenAiConfig, OpenAiProvider};
use crate::services::PlanGenerator;

/// Dependencies shared by all handlers
///
/// Built once at startup and wrapped in an `Arc` for axum state.
#[derive(Clone)]
pub struct ServerResources {
    /// Loaded configuration
    pub config: Arc<ServerConfig>,
    /// Completion provider
    pub provider: Arc<dyn LlmProvider>,
    /// Plan generation pipeline
    pub plans: PlanGenerator,
}

impl ServerResources {
    /// Wire resources around an existing provider
    #[must_use]
    pub fn new(config: ServerConfig, provider: Arc<dyn LlmProvider>) -> Self {
        let plans = PlanGenerator::new(
            Arc::clone(&provider),
            config.llm.model.clone(),
            config.llm.structured_output,
        );

        Self {
            config: Arc::new(config),
            provider,
            plans,
        }
    }

    /// Build the `OpenAI` provider from configuration and wire resources around it
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created
    pub fn from_config(config: ServerConfig) -> AppResult<Self> {
        let provider = OpenAiProvider::new(OpenAiConfig::from_llm_config(&config.llm))?;
        Ok(Self::new(config, Arc::new(provider)))
    }

    /// Model used for every completion
    #[must_use]
    pub fn model(&self) -> &str {
        self.plans.model()
    }
}
