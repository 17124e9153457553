// ABOUTME: Route module organization for the workout planner HTTP endpoints
// ABOUTME: Assembles domain routers with CORS, tracing and panic handling layers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Route module
//!
//! Each domain module contains only route definitions and thin handlers that
//! delegate to the service layer.

/// Health check and readiness routes
pub mod health;
/// Workout plan generation routes
pub mod workout;

pub use health::HealthRoutes;
pub use workout::WorkoutRoutes;

use std::sync::Arc;

use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

use crate::middleware::{handle_panic, setup_cors};
use crate::resources::ServerResources;

/// Build the application router with all middleware applied
pub fn build_router(resources: Arc<ServerResources>) -> Router {
    let cors = setup_cors(&resources.config.cors);

    Router::new()
        .merge(WorkoutRoutes::routes(Arc::clone(&resources)))
        .merge(HealthRoutes::routes(resources))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
