// ABOUTME: Swim session plan: strokes and styles in, warmup/main/cooldown segments out
// ABOUTME: Prompt carries the rest and pool-length conventions plus an easy-swim example
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

use super::{
    check_list, check_range, check_text, join_or, require_items, schema, text_or_none,
    ActivityPlan, PlanKind,
};
use crate::constants::limits;
use crate::errors::AppResult;

const ANY: &str = "any";

const SWIM_CONVENTIONS: &str = "Rest in 30-second increments.
Length in meters, increments of 25 or 100.

Example for easy swim but do not use as final:

6×50 swim to warm-up 20-30 seconds rest between sets.
100 kick with a board
6×25 swim freestyle. Take 20-30 seconds rest between repetitions.
100 pull with a buoy
6×25 swim – alternate 25 fast and 25 smooth. 20-30 seconds rest between sets.
100 double arm backstroke easy to warm-down";

/// Body of `POST /api/generateSwim`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwimRequest {
    /// Strokes to include; empty means any
    #[serde(default)]
    pub swim_strokes: Vec<String>,
    /// Session styles (sprint, distance, interval); empty means any
    #[serde(default)]
    pub swim_styles: Vec<String>,
    /// 1 (easy) to 10 (maximal)
    pub intensity: u32,
    /// Minutes
    pub duration: u32,
    /// Free-text notes
    #[serde(default)]
    pub additional_info: Option<String>,
    /// Injuries to work around
    #[serde(default)]
    pub injuries: Option<String>,
}

/// One block of repeats
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SwimSegment {
    /// Stroke or drill, e.g. "Freestyle" or "Kick with board"
    pub swim_option: String,
    /// What to do in this block
    pub description: String,
    /// Metres per repeat
    pub length: Number,
    /// Number of repeats
    pub sets: Number,
    /// Seconds of rest between repeats
    pub rest_duration: Number,
}

/// `swim_routine` reply
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SwimRoutine {
    /// Warm-up blocks
    pub warmup: Vec<SwimSegment>,
    /// Main set blocks
    pub main: Vec<SwimSegment>,
    /// Cool-down blocks
    pub cooldown: Vec<SwimSegment>,
    /// Summary of the session
    pub workout_description: String,
    /// Metres
    pub total_distance: Number,
    /// Minutes
    pub estimated_time_minutes: Number,
}

/// Swim session plan
pub struct SwimPlan;

impl ActivityPlan for SwimPlan {
    const KIND: PlanKind = PlanKind::Swim;
    type Request = SwimRequest;
    type Response = SwimRoutine;

    fn validate_request(request: &SwimRequest) -> AppResult<()> {
        check_range("intensity", request.intensity, &limits::INTENSITY)?;
        check_range("duration", request.duration, &limits::SWIM_DURATION_MINUTES)?;
        check_list("swimStrokes", &request.swim_strokes)?;
        check_list("swimStyles", &request.swim_styles)?;
        check_text("additionalInfo", request.additional_info.as_deref())?;
        check_text("injuries", request.injuries.as_deref())
    }

    fn build_prompt(request: &SwimRequest) -> String {
        format!(
            "Generate a swim workout plan with the following parameters:
Swim strokes: {strokes}
Swim styles: {styles}
Intensity: {intensity}
Duration: {duration} minutes
Additional info: {info}
Injuries: {injuries}
{SWIM_CONVENTIONS}",
            strokes = join_or(&request.swim_strokes, ANY),
            styles = join_or(&request.swim_styles, ANY),
            intensity = request.intensity,
            duration = request.duration,
            info = text_or_none(request.additional_info.as_deref()),
            injuries = text_or_none(request.injuries.as_deref()),
        )
    }

    fn response_schema() -> Value {
        let segment = schema::object(&[
            ("swimOption", schema::string()),
            ("description", schema::string()),
            ("length", schema::number()),
            ("sets", schema::number()),
            ("restDuration", schema::number()),
        ]);

        schema::object(&[
            ("warmup", schema::array(segment.clone())),
            ("main", schema::array(segment.clone())),
            ("cooldown", schema::array(segment)),
            ("workoutDescription", schema::string()),
            ("totalDistance", schema::number()),
            ("estimatedTimeMinutes", schema::number()),
        ])
    }

    fn validate_response(response: &SwimRoutine) -> AppResult<()> {
        require_items(Self::KIND, "main", &response.main)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::errors::ErrorCode;
    use serde_json::json;

    fn segment(option: &str) -> Value {
        json!({
            "swimOption": option,
            "description": "steady",
            "length": 50,
            "sets": 4,
            "restDuration": 30
        })
    }

    #[test]
    fn test_prompt_with_empty_lists() {
        let request: SwimRequest =
            serde_json::from_value(json!({"intensity": 4, "duration": 45})).unwrap();
        let prompt = SwimPlan::build_prompt(&request);

        assert!(prompt.starts_with("Generate a swim workout plan with the following parameters:\n"));
        assert!(prompt.contains("\nSwim strokes: any\n"));
        assert!(prompt.contains("\nSwim styles: any\n"));
        assert!(prompt.contains("\nDuration: 45 minutes\n"));
        assert!(prompt.contains("\nInjuries: none\n"));
        assert!(prompt.contains("Rest in 30-second increments."));
        assert!(prompt.contains("increments of 25 or 100"));
        assert!(prompt.ends_with("100 double arm backstroke easy to warm-down"));
    }

    #[test]
    fn test_prompt_lists_selections() {
        let request: SwimRequest = serde_json::from_value(json!({
            "swimStrokes": ["Freestyle", "Butterfly"],
            "swimStyles": ["Interval"],
            "intensity": 8,
            "duration": 60,
            "additionalInfo": "25m pool"
        }))
        .unwrap();
        let prompt = SwimPlan::build_prompt(&request);

        assert!(prompt.contains("Swim strokes: Freestyle, Butterfly"));
        assert!(prompt.contains("Swim styles: Interval"));
        assert!(prompt.contains("Additional info: 25m pool"));
    }

    #[test]
    fn test_response_requires_main_set() {
        let routine: SwimRoutine = serde_json::from_value(json!({
            "warmup": [segment("Freestyle")],
            "main": [],
            "cooldown": [segment("Backstroke")],
            "workoutDescription": "Easy aerobic swim",
            "totalDistance": 400,
            "estimatedTimeMinutes": 20
        }))
        .unwrap();

        let err = SwimPlan::validate_response(&routine).unwrap_err();
        assert_eq!(err.code, ErrorCode::ExternalInvalidResponse);
        assert!(err.message.contains("main"));
    }

    #[test]
    fn test_response_rejects_missing_fields() {
        let result = serde_json::from_value::<SwimRoutine>(json!({
            "warmup": [],
            "main": [segment("Freestyle")],
            "cooldown": []
        }));
        assert!(result.is_err());
    }
}
