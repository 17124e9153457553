// ABOUTME: System prompts for LLM interactions loaded at compile time
// ABOUTME: Provides the fitness coach system prompt used for workout plan generation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # System Prompts
//!
//! Prompts are loaded at compile time from markdown files for easy maintenance.

/// Fitness coach system prompt sent ahead of every plan request
pub const WORKOUT_COACH_SYSTEM_PROMPT: &str = include_str!("workout_coach.md");

/// Get the system prompt for workout plan generation, without trailing whitespace
#[must_use]
pub fn get_workout_coach_system_prompt() -> &'static str {
    WORKOUT_COACH_SYSTEM_PROMPT.trim_end()
}
