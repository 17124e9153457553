// ABOUTME: Service layer orchestrating I/O collaborators around the pure workout pipeline
// ABOUTME: Hosts the end-to-end workout plan generation service
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// End-to-end plan generation
pub mod workout_plan;

pub use workout_plan::WorkoutPlanService;
