// ABOUTME: Stretching routine plan: stretch type and body areas in, timed stretches out
// ABOUTME: Durations stay as model-provided text since routines mix seconds, reps, and ranges
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

use super::{
    check_list, check_range, check_text, join_or, require_items, require_text, schema,
    text_or_none, ActivityPlan, PlanKind,
};
use crate::constants::limits;
use crate::errors::AppResult;

const FULL_BODY: &str = "full body";

/// Body of `POST /api/generateStretch`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StretchRequest {
    /// Static, dynamic, active, passive, ...
    pub stretch_type: String,
    /// Body areas to cover; empty means full body
    #[serde(default)]
    pub stretch_areas: Vec<String>,
    /// Minutes
    pub duration: u32,
    /// Free-text notes
    #[serde(default)]
    pub additional_info: Option<String>,
    /// Injuries to work around
    #[serde(default)]
    pub injuries: Option<String>,
}

/// One stretch in the routine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Stretch {
    /// Stretch name
    pub stretch_name: String,
    /// How to perform it
    pub description: String,
    /// Repetitions, for stretches counted in reps
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_reps: Option<Number>,
    /// Hold time
    pub duration_in_seconds: String,
}

/// `stretch_routine` reply
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct StretchRoutine {
    /// Summary of the routine
    pub description: String,
    /// Estimated length
    pub total_estimated_duration_minutes: String,
    /// Stretches in order
    pub stretches: Vec<Stretch>,
}

/// Stretching routine plan
pub struct StretchPlan;

impl ActivityPlan for StretchPlan {
    const KIND: PlanKind = PlanKind::Stretch;
    type Request = StretchRequest;
    type Response = StretchRoutine;

    fn validate_request(request: &StretchRequest) -> AppResult<()> {
        require_text("stretchType", &request.stretch_type)?;
        check_range(
            "duration",
            request.duration,
            &limits::STRETCH_DURATION_MINUTES,
        )?;
        check_list("stretchAreas", &request.stretch_areas)?;
        check_text("additionalInfo", request.additional_info.as_deref())?;
        check_text("injuries", request.injuries.as_deref())
    }

    fn build_prompt(request: &StretchRequest) -> String {
        let stretch_type = request.stretch_type.trim();

        [
            format!(
                "Generate a stretching routine based on {stretch_type} for the following parameters:"
            ),
            format!("- Stretch Type: {stretch_type}"),
            format!(
                "- Stretch Areas: {}",
                join_or(&request.stretch_areas, FULL_BODY)
            ),
            "- Include number of reps if applicable in description for each stretch".to_owned(),
            format!("- Duration: {} minutes", request.duration),
            format!(
                "- Additional Info: {}",
                text_or_none(request.additional_info.as_deref())
            ),
            "- do not exceed 100 chars for description or 50 chars for stretch description"
                .to_owned(),
            format!(
                "- Injuries: {}",
                text_or_none(request.injuries.as_deref())
            ),
        ]
        .join("\n")
    }

    fn response_schema() -> Value {
        schema::object(&[
            ("description", schema::string()),
            ("totalEstimatedDurationMinutes", schema::string()),
            (
                "stretches",
                schema::array(schema::object(&[
                    ("stretchName", schema::string()),
                    ("description", schema::string()),
                    ("numReps", schema::nullable(schema::number())),
                    ("durationInSeconds", schema::string()),
                ])),
            ),
        ])
    }

    fn validate_response(response: &StretchRoutine) -> AppResult<()> {
        require_items(Self::KIND, "stretches", &response.stretches)
    }
}
