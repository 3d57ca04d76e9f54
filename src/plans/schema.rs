// ABOUTME: Builder for strict JSON Schemas accepted by provider-side structured output
// ABOUTME: Objects require every property and forbid extras; optional fields become nullable
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Strict-mode JSON Schema helpers
//!
//! Structured output only accepts schemas where every declared property is
//! listed in `required` and `additionalProperties` is `false`. Optional values
//! are expressed by allowing `null` instead of omitting the key.

use serde_json::{json, Map, Value};

use super::PlanKind;
use crate::llm::ResponseFormat;

/// Object with every property required and no extra keys
#[must_use]
pub fn object(properties: &[(&str, Value)]) -> Value {
    let required: Vec<&str> = properties.iter().map(|(name, _)| *name).collect();
    let properties: Map<String, Value> = properties
        .iter()
        .map(|(name, schema)| ((*name).to_owned(), schema.clone()))
        .collect();

    json!({
        "type": "object",
        "properties": properties,
        "required": required,
        "additionalProperties": false
    })
}

/// Array of `items`
#[must_use]
pub fn array(items: Value) -> Value {
    json!({ "type": "array", "items": items })
}

/// String
#[must_use]
pub fn string() -> Value {
    json!({ "type": "string" })
}

/// Any JSON number
#[must_use]
pub fn number() -> Value {
    json!({ "type": "number" })
}

/// Allow `null` in place of `schema`
#[must_use]
pub fn nullable(mut schema: Value) -> Value {
    if let Some(Value::String(kind)) = schema.get("type").cloned() {
        schema["type"] = json!([kind, "null"]);
        return schema;
    }
    json!({ "anyOf": [schema, { "type": "null" }] })
}

/// Wrap a schema as a strict structured-output format named after the plan
#[must_use]
pub fn response_format(kind: PlanKind, schema: Value) -> ResponseFormat {
    ResponseFormat::json_schema(kind.schema_name(), schema)
}
