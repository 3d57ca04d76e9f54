// ABOUTME: Plan generation route handlers for workout, swim, stretch, and strength endpoints
// ABOUTME: One generic handler per ActivityPlan plus a catalog of plan kinds and their schemas
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Plan generation routes
//!
//! Every generation endpoint shares one handler, instantiated per plan kind.
//! The body is validated, turned into a prompt, sent to the provider once,
//! and the decoded plan is returned as-is.

use std::sync::Arc;

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use serde_json::Value;

use super::ApiJson;
use crate::constants::endpoints;
use crate::errors::AppError;
use crate::middleware::RequestId;
use crate::plans::{ActivityPlan, PlanKind, StrengthPlan, StretchPlan, SwimPlan, WorkoutPlan};
use crate::resources::ServerResources;

/// One entry of `GET /api/plans`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanCatalogEntry {
    /// Plan kind
    pub kind: PlanKind,
    /// Generation route
    pub path: &'static str,
    /// Name of the response schema
    pub schema_name: &'static str,
    /// Output token budget
    pub max_tokens: u32,
    /// Strict JSON Schema of the plan
    pub schema: Value,
}

impl From<PlanKind> for PlanCatalogEntry {
    fn from(kind: PlanKind) -> Self {
        Self {
            kind,
            path: kind.path(),
            schema_name: kind.schema_name(),
            max_tokens: kind.max_tokens(),
            schema: kind.response_schema(),
        }
    }
}

/// Body of `GET /api/plans`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanCatalog {
    /// Model plans are generated with
    pub model: String,
    /// Whether replies are provider-constrained to the schema
    pub structured_output: bool,
    /// Available plan kinds
    pub plans: Vec<PlanCatalogEntry>,
}

/// Plan routes
pub struct PlanRoutes;

impl PlanRoutes {
    /// Create all plan routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(endpoints::GENERATE_WORKOUT, post(Self::generate::<WorkoutPlan>))
            .route(endpoints::GENERATE_SWIM, post(Self::generate::<SwimPlan>))
            .route(endpoints::GENERATE_STRETCH, post(Self::generate::<StretchPlan>))
            .route(endpoints::GENERATE_STRENGTH, post(Self::generate::<StrengthPlan>))
            .route(endpoints::PLAN_CATALOG, get(Self::catalog))
            .with_state(resources)
    }

    async fn generate<P: ActivityPlan>(
        State(resources): State<Arc<ServerResources>>,
        request_id: RequestId,
        ApiJson(request): ApiJson<P::Request>,
    ) -> Result<Json<P::Response>, AppError> {
        let plan = resources
            .plans
            .generate::<P>(&request)
            .await
            .map_err(|e| request_id.attach(e))?;

        Ok(Json(plan))
    }

    async fn catalog(State(resources): State<Arc<ServerResources>>) -> Json<PlanCatalog> {
        Json(PlanCatalog {
            model: resources.model().to_owned(),
            structured_output: resources.plans.uses_structured_output(),
            plans: PlanKind::ALL.into_iter().map(PlanCatalogEntry::from).collect(),
        })
    }
}
