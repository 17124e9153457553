// ABOUTME: Workout plan pipeline turning model output into a structured, adapted plan
// ABOUTME: Hosts the exercise parser, plan composer, feedback adjuster and prompt builder
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Workout Pipeline
//!
//! The pure half of plan generation. Each stage is a total function:
//!
//! 1. [`prompt::build_prompt`] renders the profile, prior sessions and feedback
//!    into the LLM request text.
//! 2. [`parser::parse_exercises`] turns the free-text completion into
//!    [`ExerciseLeaf`](crate::models::ExerciseLeaf) records.
//! 3. [`composer::compose_main_workout`] truncates or groups them into the
//!    main section, and [`composer::assemble_plan`] wraps that with the static
//!    warm-up and cool-down tables.
//! 4. [`adjuster::adjust_for_feedback`] scales sets, reps and durations of the
//!    main section from the user's feedback.
//!
//! None of these stages perform I/O or return errors; degraded input yields
//! fewer exercises, never a failure.

/// Deterministic feedback-driven adjustment of exercise prescriptions
pub mod adjuster;
/// Main-section layout and full plan assembly
pub mod composer;
/// Line-oriented parser for LLM exercise lists
pub mod parser;
/// LLM prompt rendering
pub mod prompt;

pub use adjuster::{adjust_for_feedback, adjust_leaf, shorten_duration};
pub use composer::{assemble_plan, compose_main_workout, MainLayout};
pub use parser::{parse_exercise_line, parse_exercises};
pub use prompt::build_prompt;
