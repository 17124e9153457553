// ABOUTME: Main library entry point for the Pierre workout planner
// ABOUTME: LLM-generated, feedback-adapted workout plans with history and PDF export
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Pierre Workout Planner
//!
//! Generates personalized workout plans: a user profile and optional
//! feedback become an LLM prompt, the free-text answer is parsed into
//! exercises, structured into warm-up, main and cool-down sections, adjusted
//! for the feedback, stored in the user's history and rendered as a PDF.
//!
//! ## Architecture
//!
//! - **`workout`**: the pure pipeline (prompt, parser, composer, adjuster)
//! - **`llm`**: completion provider contract and `OpenAI` client
//! - **`database`**: append-only `SQLite` history store
//! - **`rendering`**: page layout and PDF output
//! - **`services`**: request orchestration over the collaborators
//! - **`routes`**: `axum` HTTP surface
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use pierre_workout_planner::workout::{compose_main_workout, parse_exercises};
//!
//! let parsed = parse_exercises("Squats - Legs, 3 sets x 12 reps\nPlank - Core, 30 sec");
//! let (layout, main) = compose_main_workout(parsed, false, false);
//! println!("{layout}: {} exercises", main.len());
//! ```

/// Environment-driven configuration
pub mod config;

/// Application constants and defaults
pub mod constants;

/// Workout history persistence
pub mod database;

/// LLM provider abstraction and `OpenAI` client
pub mod llm;

/// Structured logging setup
pub mod logging;

/// HTTP middleware
pub mod middleware;

/// Plan layout and PDF output
pub mod rendering;

/// Shared server state
pub mod resources;

/// HTTP routes
pub mod routes;

/// Request orchestration
pub mod services;

/// Prompt building, parsing, composition and feedback adjustment
pub mod workout;

pub use pierre_workout_core::{errors, models};
