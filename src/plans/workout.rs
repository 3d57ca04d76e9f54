// ABOUTME: Circuit workout plan: request fields, prompt template, and workout_routine schema
// ABOUTME: Targets muscle groups at a given intensity, duration, and rest preference
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

const DEFAULT_STYLE: &str = "crossfit";
const FULL_BODY: &str = "none so focus on full body";
const TIMED_REST: &str = "in 15 second increments based on the intensity level";
const NO_REST: &str = "none it is a circuit";

/// Body of `POST /api/generateWorkout`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutRequest {
    /// Muscle groups to target; empty means full body
    #[serde(default)]
    pub muscle_groups: Vec<String>,
    /// 1 (easy) to 10 (maximal)
    pub intensity: u32,
    /// Bodyweight exercises only
    #[serde(default)]
    pub bodyweight: bool,
    /// Minutes
    pub duration: u32,
    /// Free-text notes
    #[serde(default)]
    pub additional_info: Option<String>,
    /// Rest between sets, or run as a continuous circuit
    #[serde(default)]
    pub rest: Option<bool>,
    /// Training style, e.g. crossfit or HIIT
    #[serde(default)]
    pub workout_style: Option<String>,
    /// Injuries to work around
    #[serde(default)]
    pub injuries: Option<String>,
}

impl WorkoutRequest {
    fn style(&self) -> &str {
        self.workout_style
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_STYLE)
    }
}

/// One exercise in the circuit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CircuitExercise {
    /// Exercise name
    pub exercise: String,
    /// Repetitions
    pub reps: Number,
}

/// `workout_routine` reply
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct WorkoutRoutine {
    /// Exercises performed in order
    pub circuit: Vec<CircuitExercise>,
    /// Rest between sets in seconds, when the circuit has rest
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rest_amount: Option<f64>,
}

/// Circuit workout plan
pub struct WorkoutPlan;

impl ActivityPlan for WorkoutPlan {
    const KIND: PlanKind = PlanKind::Workout;
    type Request = WorkoutRequest;
    type Response = WorkoutRoutine;

    fn validate_request(request: &WorkoutRequest) -> AppResult<()> {
        check_range("intensity", request.intensity, &limits::INTENSITY)?;
        check_range(
            "duration",
            request.duration,
            &limits::WORKOUT_DURATION_MINUTES,
        )?;
        check_list("muscleGroups", &request.muscle_groups)?;
        check_text("additionalInfo", request.additional_info.as_deref())?;
        check_text("workoutStyle", request.workout_style.as_deref())?;
        check_text("injuries", request.injuries.as_deref())
    }

    fn build_prompt(request: &WorkoutRequest) -> String {
        let rest = if request.rest.unwrap_or(false) {
            TIMED_REST
        } else {
            NO_REST
        };

        [
            format!(
                "Generate a {} style of workout plan for the following parameters:",
                request.style()
            ),
            format!(
                "List of muscle groups to target: {}",
                join_or(&request.muscle_groups, FULL_BODY)
            ),
            format!("Intensity level of the workout: {}", request.intensity),
            format!(
                "Whether the workout is bodyweight only: {}",
                if request.bodyweight { "Yes" } else { "No" }
            ),
            format!(
                "Duration of the workout in minutes: {} minutes",
                request.duration
            ),
            format!("Rest time between sets in seconds: {rest}"),
            format!(
                "Additional information for the workout plan: {}",
                text_or_none(request.additional_info.as_deref())
            ),
            format!(
                "Any injuries to consider: {}",
                text_or_none(request.injuries.as_deref())
            ),
            format!(
                "maximum of {} exercises per circuit but can be less",
                limits::MAX_EXERCISES_PER_CIRCUIT
            ),
        ]
        .join("\n")
    }

    fn response_schema() -> Value {
        schema::object(&[
            (
                "circuit",
                schema::array(schema::object(&[
                    ("exercise", schema::string()),
                    ("reps", schema::number()),
                ])),
            ),
            ("restAmount", schema::nullable(schema::number())),
        ])
    }

    fn validate_response(response: &WorkoutRoutine) -> AppResult<()> {
        require_items(Self::KIND, "circuit", &response.circuit)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::errors::ErrorCode;
    use serde_json::json;

    fn request() -> WorkoutRequest {
        serde_json::from_value(json!({
            "muscleGroups": ["Back", "Chest"],
            "intensity": 7,
            "bodyweight": true,
            "duration": 30,
            "rest": true,
            "workoutStyle": "HIIT"
        }))
        .unwrap()
    }

    #[test]
    fn test_prompt_lines() {
        let prompt = WorkoutPlan::build_prompt(&request());
        let lines: Vec<&str> = prompt.lines().collect();

        assert_eq!(
            lines[0],
            "Generate a HIIT style of workout plan for the following parameters:"
        );
        assert_eq!(lines[1], "List of muscle groups to target: Back, Chest");
        assert_eq!(lines[2], "Intensity level of the workout: 7");
        assert_eq!(lines[3], "Whether the workout is bodyweight only: Yes");
        assert_eq!(lines[4], "Duration of the workout in minutes: 30 minutes");
        assert_eq!(
            lines[5],
            "Rest time between sets in seconds: in 15 second increments based on the intensity level"
        );
        assert_eq!(lines[6], "Additional information for the workout plan: none");
        assert_eq!(lines[7], "Any injuries to consider: none");
        assert_eq!(lines[8], "maximum of 8 exercises per circuit but can be less");
    }

    #[test]
    fn test_prompt_defaults() {
        let request: WorkoutRequest =
            serde_json::from_value(json!({"intensity": 3, "duration": 20})).unwrap();
        let prompt = WorkoutPlan::build_prompt(&request);

        assert!(prompt.starts_with("Generate a crossfit style"));
        assert!(prompt.contains("to target: none so focus on full body"));
        assert!(prompt.contains("in seconds: none it is a circuit"));
        assert!(prompt.contains("bodyweight only: No"));
        assert!(!prompt.contains("undefined"));
    }

    #[test]
    fn test_request_ranges() {
        let mut req = request();
        req.intensity = 0;
        let err = WorkoutPlan::validate_request(&req).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValueOutOfRange);

        let mut req = request();
        req.duration = 91;
        assert!(WorkoutPlan::validate_request(&req).is_err());

        assert!(WorkoutPlan::validate_request(&request()).is_ok());
    }

    #[test]
    fn test_response_shape() {
        let routine: WorkoutRoutine = serde_json::from_value(json!({
            "circuit": [{"exercise": "Push-ups", "reps": 15}],
            "restAmount": null
        }))
        .unwrap();
        assert!(WorkoutPlan::validate_response(&routine).is_ok());
        assert_eq!(serde_json::to_value(&routine).unwrap(), json!({
            "circuit": [{"exercise": "Push-ups", "reps": 15}]
        }));

        let unknown = serde_json::from_value::<WorkoutRoutine>(json!({
            "circuit": [{"exercise": "Push-ups", "reps": 15, "rest": 30}]
        }));
        assert!(unknown.is_err());

        let empty: WorkoutRoutine = serde_json::from_value(json!({"circuit": []})).unwrap();
        let err = WorkoutPlan::validate_response(&empty).unwrap_err();
        assert_eq!(err.code, ErrorCode::ExternalInvalidResponse);
    }
}
