// ABOUTME: Re-export of the unified error system from planner-core
// ABOUTME: Lets the rest of the crate write crate::errors::{AppError, AppResult}
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Unified error handling for the planner service
//!
//! The definitions live in the `planner-core` crate so they can be shared
//! without pulling in the HTTP client or server stacks.

pub use planner_core::errors::*;
