// ABOUTME: Core types and constants for the Workout Planner API
// ABOUTME: Foundation crate with error handling, request limits, and LLM defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Planner Core
//!
//! Foundation crate providing shared types and constants for the workout
//! planner service. This crate is designed to change infrequently, enabling
//! incremental compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError` and `ErrorCode`
//! - **constants**: Request limits, token budgets, and LLM defaults

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Application constants organized by domain
pub mod constants;
