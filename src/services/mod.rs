// ABOUTME: Domain service layer for business logic extracted from route handlers
// ABOUTME: Hosts the plan generation pipeline and the free-form chat relay
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Domain service layer
//!
//! Route handlers stay thin: they deserialize the body and hand it to a
//! service, which owns the provider interaction and error mapping.

/// Free-form chat relay
pub mod chat_relay;

/// Generic validate, prompt, complete, decode pipeline for activity plans
pub mod plan_generation;

pub use chat_relay::relay_chat;
pub use plan_generation::{decode_plan, PlanGenerator};
