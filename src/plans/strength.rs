// ABOUTME: Strength program plan: training style and days per week in, labelled lift days out
// ABOUTME: Each day lists lifts with sets, reps, and rest
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

use super::{
    check_range, check_text, require_items, require_text, schema, text_or_none, ActivityPlan,
    PlanKind,
};
use crate::constants::limits;
use crate::errors::AppResult;

/// Body of `POST /api/generateWeightLifting`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrengthRequest {
    /// Powerlifting, bodybuilding, calisthenics, ...
    pub training_style: String,
    /// Training days in the week
    pub days_per_week: u32,
    /// Minutes per session
    pub duration: u32,
    /// Free-text notes
    #[serde(default)]
    pub additional_info: Option<String>,
    /// Injuries to work around
    #[serde(default)]
    pub injuries: Option<String>,
}

/// One lift on a training day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Lift {
    /// Exercise name
    pub lift_name: String,
    /// Cues
    pub lift_description: String,
    /// Repetitions per set
    pub num_reps: Number,
    /// Sets
    pub num_sets: Number,
    /// Rest between sets, as the model phrased it
    pub rest_duration: String,
}

/// One labelled training day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LiftDay {
    /// "Day 1", "Day 2", ...
    pub day_name: String,
    /// Focus of the day
    pub description: String,
    /// Lifts in order
    pub lifts: Vec<Lift>,
}

/// `strength_routine` reply
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct StrengthRoutine {
    /// Summary of the program
    pub description: String,
    /// Estimated session length
    pub total_estimated_duration_minutes: String,
    /// Training days
    pub lift_days: Vec<LiftDay>,
}

/// Multi-day strength program plan
pub struct StrengthPlan;

impl ActivityPlan for StrengthPlan {
    const KIND: PlanKind = PlanKind::Strength;
    type Request = StrengthRequest;
    type Response = StrengthRoutine;

    fn validate_request(request: &StrengthRequest) -> AppResult<()> {
        require_text("trainingStyle", &request.training_style)?;
        check_range("daysPerWeek", request.days_per_week, &limits::DAYS_PER_WEEK)?;
        check_range(
            "duration",
            request.duration,
            &limits::STRENGTH_DURATION_MINUTES,
        )?;
        check_text("additionalInfo", request.additional_info.as_deref())?;
        check_text("injuries", request.injuries.as_deref())
    }

    fn build_prompt(request: &StrengthRequest) -> String {
        [
            "Generate a strength training routine based on the following parameters:".to_owned(),
            format!("- Training Styles: {}", request.training_style.trim()),
            format!("- Days Per Week: {} days", request.days_per_week),
            "- Include number of sets and reps for each exercise".to_owned(),
            format!("- Duration: {} minutes", request.duration),
            "- Should have label for each day. Day 1, 2, etc.".to_owned(),
            format!(
                "- Additional Info: {}",
                text_or_none(request.additional_info.as_deref())
            ),
            "- Do not exceed 100 characters for exercise description or 50 characters for exercise name"
                .to_owned(),
            format!(
                "- Injuries: {}",
                text_or_none(request.injuries.as_deref())
            ),
        ]
        .join("\n")
    }

    fn response_schema() -> Value {
        let lift = schema::object(&[
            ("liftName", schema::string()),
            ("liftDescription", schema::string()),
            ("numReps", schema::number()),
            ("numSets", schema::number()),
            ("restDuration", schema::string()),
        ]);

        schema::object(&[
            ("description", schema::string()),
            ("totalEstimatedDurationMinutes", schema::string()),
            (
                "liftDays",
                schema::array(schema::object(&[
                    ("dayName", schema::string()),
                    ("description", schema::string()),
                    ("lifts", schema::array(lift)),
                ])),
            ),
        ])
    }

    fn validate_response(response: &StrengthRoutine) -> AppResult<()> {
        require_items(Self::KIND, "liftDays", &response.lift_days)
    }
}
