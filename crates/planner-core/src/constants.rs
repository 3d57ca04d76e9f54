// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Request limits, per-activity token budgets, and model provider defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! Constants are grouped into logical domains rather than being in a single
//! flat namespace.

/// Service identification for structured logging
pub mod service_names {
    /// Name reported by the HTTP server
    pub const WORKOUT_PLANNER_SERVER: &str = "workout-planner-server";
}

/// Network defaults
pub mod ports {
    /// Default HTTP port
    pub const DEFAULT_HTTP_PORT: u16 = 3000;
    /// Default bind address
    pub const DEFAULT_HOST: &str = "127.0.0.1";
}

/// Model provider defaults
pub mod llm_defaults {
    /// `OpenAI` API base URL
    pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
    /// Model used for every generation endpoint
    pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
    /// TCP connect timeout towards the provider
    pub const CONNECT_TIMEOUT_SECS: u64 = 10;
    /// Whole-request timeout towards the provider
    pub const REQUEST_TIMEOUT_SECS: u64 = 120;
    /// Provider name used in error messages
    pub const PROVIDER_LABEL: &str = "OpenAI";
}

/// Output token budgets per activity
pub mod max_tokens {
    /// Circuit workout
    pub const WORKOUT: u32 = 500;
    /// Swim session
    pub const SWIM: u32 = 500;
    /// Stretching routine
    pub const STRETCH: u32 = 2000;
    /// Multi-day strength program
    pub const STRENGTH: u32 = 2000;
}

/// Request validation limits, mirroring the ranges the input forms offer
pub mod limits {
    use std::ops::RangeInclusive;

    /// Intensity slider
    pub const INTENSITY: RangeInclusive<u32> = 1..=10;
    /// Circuit workout length in minutes
    pub const WORKOUT_DURATION_MINUTES: RangeInclusive<u32> = 1..=90;
    /// Swim session length in minutes
    pub const SWIM_DURATION_MINUTES: RangeInclusive<u32> = 1..=180;
    /// Stretch routine length in minutes
    pub const STRETCH_DURATION_MINUTES: RangeInclusive<u32> = 1..=60;
    /// Strength session length in minutes
    pub const STRENGTH_DURATION_MINUTES: RangeInclusive<u32> = 1..=60;
    /// Training days in a strength week
    pub const DAYS_PER_WEEK: RangeInclusive<u32> = 1..=7;
    /// Free-text fields (additional info, injuries, style names)
    pub const MAX_TEXT_CHARS: usize = 250;
    /// Selected list entries (muscle groups, strokes, areas)
    pub const MAX_LIST_ITEMS: usize = 16;
    /// Exercises per circuit, stated to the model in the workout prompt
    pub const MAX_EXERCISES_PER_CIRCUIT: usize = 8;
    /// Free-form chat message length
    pub const MAX_CHAT_MESSAGE_CHARS: usize = 4000;
    /// HTTP request body size
    pub const MAX_REQUEST_BODY_BYTES: usize = 64 * 1024;
    /// HTTP request timeout in seconds (covers the provider round trip)
    pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 150;
}

/// Route paths for the generation endpoints
pub mod endpoints {
    /// Circuit workout generation
    pub const GENERATE_WORKOUT: &str = "/api/generateWorkout";
    /// Swim session generation
    pub const GENERATE_SWIM: &str = "/api/generateSwim";
    /// Stretch routine generation
    pub const GENERATE_STRETCH: &str = "/api/generateStretch";
    /// Strength program generation
    pub const GENERATE_STRENGTH: &str = "/api/generateWeightLifting";
    /// Plan catalog
    pub const PLAN_CATALOG: &str = "/api/plans";
    /// Free-form chat relay
    pub const CHAT: &str = "/chat";
    /// Liveness
    pub const HEALTH: &str = "/health";
    /// Readiness
    pub const READY: &str = "/ready";
}
