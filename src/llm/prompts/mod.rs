// ABOUTME: System prompts for LLM interactions loaded at compile time
// ABOUTME: One coaching persona per activity plus the free-form chat assistant
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # System Prompts
//!
//! Prompts are loaded at compile time from markdown files for easy maintenance.

/// Circuit workout trainer persona
pub const WORKOUT_SYSTEM_PROMPT: &str = include_str!("workout_system.md");

/// Swim coach persona
pub const SWIM_SYSTEM_PROMPT: &str = include_str!("swim_system.md");

/// Stretching trainer persona
pub const STRETCH_SYSTEM_PROMPT: &str = include_str!("stretch_system.md");

/// Strength coach persona
pub const STRENGTH_SYSTEM_PROMPT: &str = include_str!("strength_system.md");

/// General assistant used by the chat relay
pub const CHAT_SYSTEM_PROMPT: &str = include_str!("chat_system.md");
