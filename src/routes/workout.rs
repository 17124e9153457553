// ABOUTME: Workout plan generation route
// ABOUTME: Accepts a profile with optional feedback and returns the generated plan and PDF name
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use tracing::warn;

use crate::errors::{AppError, AppResult};
use crate::models::{WorkoutPlanResponse, WorkoutRequest};
use crate::resources::ServerResources;
use crate::services::WorkoutPlanService;

/// Workout routes handler
pub struct WorkoutRoutes;

impl WorkoutRoutes {
    /// Create all workout routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/generate-workout-plan", post(Self::generate_workout_plan))
            .with_state(resources)
    }

    /// Generate a plan; malformed bodies are rejected before the pipeline runs
    async fn generate_workout_plan(
        State(resources): State<Arc<ServerResources>>,
        payload: Result<Json<WorkoutRequest>, JsonRejection>,
    ) -> AppResult<Json<WorkoutPlanResponse>> {
        let Json(request) = payload.map_err(|rejection| {
            warn!("Rejected workout plan request: {}", rejection.body_text());
            AppError::invalid_input(rejection.body_text())
        })?;

        let response = WorkoutPlanService::new(resources).generate(request).await?;
        Ok(Json(response))
    }
}
