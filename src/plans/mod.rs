// ABOUTME: Activity plan definitions: typed requests, prompt templates, and response shapes
// ABOUTME: One ActivityPlan implementation per plan kind plus shared text and range helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Activity Plans
//!
//! Each plan kind (workout, swim, stretch, strength) is described by an
//! [`ActivityPlan`] implementation that owns:
//!
//! - the request body accepted by its generation endpoint,
//! - the natural-language prompt built from that request,
//! - the strict JSON Schema the model's reply must follow,
//! - the typed response returned to the caller.
//!
//! The generation pipeline in [`crate::services::plan_generation`] is generic
//! over this trait, so adding a plan kind never touches the pipeline.

/// Strict JSON Schema builder
pub mod schema;
/// Multi-day strength program
pub mod strength;
/// Stretching routine
pub mod stretch;
/// Swim session
pub mod swim;
/// Circuit workout
pub mod workout;

pub use strength::{Lift, LiftDay, StrengthPlan, StrengthRequest, StrengthRoutine};
pub use stretch::{Stretch, StretchPlan, StretchRequest, StretchRoutine};
pub use swim::{SwimPlan, SwimRequest, SwimRoutine, SwimSegment};
pub use workout::{CircuitExercise, WorkoutPlan, WorkoutRequest, WorkoutRoutine};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::ops::RangeInclusive;

use crate::constants::{endpoints, limits, max_tokens};
use crate::errors::{AppError, AppResult};
use crate::llm::prompts;

/// Rendering for optional free text that was not supplied
pub const NONE_TEXT: &str = "none";

/// The kinds of plan the service can generate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanKind {
    /// Circuit workout
    Workout,
    /// Swim session
    Swim,
    /// Stretching routine
    Stretch,
    /// Multi-day strength program
    Strength,
}

impl PlanKind {
    /// Every plan kind, in catalog order
    pub const ALL: [Self; 4] = [Self::Workout, Self::Swim, Self::Stretch, Self::Strength];

    /// Short identifier used in logs and the catalog
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Workout => "workout",
            Self::Swim => "swim",
            Self::Stretch => "stretch",
            Self::Strength => "strength",
        }
    }

    /// Name attached to the response schema sent to the provider
    #[must_use]
    pub const fn schema_name(&self) -> &'static str {
        match self {
            Self::Workout => "workout_routine",
            Self::Swim => "swim_routine",
            Self::Stretch => "stretch_routine",
            Self::Strength => "strength_routine",
        }
    }

    /// Coaching persona for this plan kind
    #[must_use]
    pub const fn system_prompt(&self) -> &'static str {
        match self {
            Self::Workout => prompts::WORKOUT_SYSTEM_PROMPT,
            Self::Swim => prompts::SWIM_SYSTEM_PROMPT,
            Self::Stretch => prompts::STRETCH_SYSTEM_PROMPT,
            Self::Strength => prompts::STRENGTH_SYSTEM_PROMPT,
        }
    }

    /// Output token budget
    #[must_use]
    pub const fn max_tokens(&self) -> u32 {
        match self {
            Self::Workout => max_tokens::WORKOUT,
            Self::Swim => max_tokens::SWIM,
            Self::Stretch => max_tokens::STRETCH,
            Self::Strength => max_tokens::STRENGTH,
        }
    }

    /// Generation route
    #[must_use]
    pub const fn path(&self) -> &'static str {
        match self {
            Self::Workout => endpoints::GENERATE_WORKOUT,
            Self::Swim => endpoints::GENERATE_SWIM,
            Self::Stretch => endpoints::GENERATE_STRETCH,
            Self::Strength => endpoints::GENERATE_STRENGTH,
        }
    }

    /// Response schema for this plan kind
    #[must_use]
    pub fn response_schema(&self) -> Value {
        match self {
            Self::Workout => WorkoutPlan::response_schema(),
            Self::Swim => SwimPlan::response_schema(),
            Self::Stretch => StretchPlan::response_schema(),
            Self::Strength => StrengthPlan::response_schema(),
        }
    }
}

impl fmt::Display for PlanKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Contract implemented by every plan kind
///
/// Implementations are stateless; all methods are associated functions.
pub trait ActivityPlan: Send + Sync + 'static {
    /// Which plan kind this is
    const KIND: PlanKind;

    /// Request body accepted by the generation endpoint
    type Request: DeserializeOwned + Send + Sync + fmt::Debug + 'static;

    /// Typed plan returned to the caller
    type Response: DeserializeOwned + Serialize + Send + fmt::Debug + 'static;

    /// Check ranges and text limits before any provider call
    ///
    /// # Errors
    ///
    /// Returns `VALUE_OUT_OF_RANGE` or `MISSING_REQUIRED_FIELD`.
    fn validate_request(request: &Self::Request) -> AppResult<()>;

    /// Render the user prompt
    fn build_prompt(request: &Self::Request) -> String;

    /// Strict JSON Schema of [`Self::Response`]
    fn response_schema() -> Value;

    /// Shape checks that the schema alone cannot express
    ///
    /// # Errors
    ///
    /// Returns `EXTERNAL_INVALID_RESPONSE` when the plan is unusable.
    fn validate_response(response: &Self::Response) -> AppResult<()>;
}

// ============================================================================
// Shared helpers
// ============================================================================

/// Trimmed text, or `none` when missing or blank
#[must_use]
pub fn text_or_none(text: Option<&str>) -> &str {
    text.map(str::trim)
        .filter(|t| !t.is_empty())
        .unwrap_or(NONE_TEXT)
}

/// Comma-joined list, or `fallback` when there is nothing to join
#[must_use]
pub fn join_or(items: &[String], fallback: &str) -> String {
    let joined = items
        .iter()
        .map(String::as_str)
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .collect::<Vec<_>>()
        .join(", ");

    if joined.is_empty() {
        fallback.to_owned()
    } else {
        joined
    }
}

/// Reject numbers outside `range`
///
/// # Errors
///
/// Returns `VALUE_OUT_OF_RANGE` naming `field`.
pub fn check_range(field: &str, value: u32, range: &RangeInclusive<u32>) -> AppResult<()> {
    if range.contains(&value) {
        return Ok(());
    }
    Err(AppError::value_out_of_range(
        field,
        format!(
            "{field} must be between {} and {}, got {value}",
            range.start(),
            range.end()
        ),
    ))
}

/// Reject optional free text over the length limit
///
/// # Errors
///
/// Returns `VALUE_OUT_OF_RANGE` naming `field`.
pub fn check_text(field: &str, text: Option<&str>) -> AppResult<()> {
    match text {
        Some(t) if t.chars().count() > limits::MAX_TEXT_CHARS => {
            Err(AppError::value_out_of_range(
                field,
                format!(
                    "{field} must be at most {} characters",
                    limits::MAX_TEXT_CHARS
                ),
            ))
        }
        _ => Ok(()),
    }
}

/// Require non-blank text within the length limit
///
/// # Errors
///
/// Returns `MISSING_REQUIRED_FIELD` when blank, `VALUE_OUT_OF_RANGE` when too long.
pub fn require_text(field: &str, text: &str) -> AppResult<()> {
    if text.trim().is_empty() {
        return Err(AppError::missing_field(field));
    }
    check_text(field, Some(text))
}

/// Reject selection lists that are too long or hold oversized entries
///
/// # Errors
///
/// Returns `VALUE_OUT_OF_RANGE` naming `field`.
pub fn check_list(field: &str, items: &[String]) -> AppResult<()> {
    if items.len() > limits::MAX_LIST_ITEMS {
        return Err(AppError::value_out_of_range(
            field,
            format!(
                "{field} must have at most {} entries",
                limits::MAX_LIST_ITEMS
            ),
        ));
    }
    items
        .iter()
        .try_for_each(|item| check_text(field, Some(item)))
}

/// Reject plans whose primary list came back empty
///
/// # Errors
///
/// Returns `EXTERNAL_INVALID_RESPONSE` naming the list.
pub fn require_items<T>(kind: PlanKind, field: &str, items: &[T]) -> AppResult<()> {
    if items.is_empty() {
        return Err(AppError::invalid_provider_response(format!(
            "{} plan has an empty {field} list",
            kind.as_str()
        )));
    }
    Ok(())
}
