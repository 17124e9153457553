// ABOUTME: System-wide constants and configuration defaults for the workout planner
// ABOUTME: Groups environment variable names, LLM defaults, pipeline limits and messages
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Constants Module
//!
//! Hardcoded defaults and the names of the environment variables that
//! override them. Values are read once by [`crate::config`] at startup.

/// Service identity used in logs
pub mod service_names {
    /// Service name for structured logging
    pub const PIERRE_WORKOUT_PLANNER: &str = "pierre-workout-planner";
}

/// Environment variable names
pub mod env_vars {
    /// Bind address
    pub const HTTP_HOST: &str = "HTTP_HOST";
    /// Bind port
    pub const HTTP_PORT: &str = "HTTP_PORT";
    /// History store connection string
    pub const DATABASE_URL: &str = "DATABASE_URL";
    /// Directory receiving rendered PDFs
    pub const PDF_OUTPUT_DIR: &str = "PDF_OUTPUT_DIR";
    /// LLM credential
    pub const OPENAI_API_KEY: &str = "OPENAI_API_KEY";
    /// OpenAI-compatible endpoint
    pub const OPENAI_BASE_URL: &str = "OPENAI_BASE_URL";
    /// Model identifier
    pub const OPENAI_MODEL: &str = "OPENAI_MODEL";
    /// Sampling temperature
    pub const OPENAI_TEMPERATURE: &str = "OPENAI_TEMPERATURE";
    /// Response length cap
    pub const OPENAI_MAX_TOKENS: &str = "OPENAI_MAX_TOKENS";
    /// Comma-separated CORS origins
    pub const CORS_ALLOWED_ORIGINS: &str = "CORS_ALLOWED_ORIGINS";
}

/// Server defaults
pub mod defaults {
    /// Default bind address
    pub const HTTP_HOST: &str = "0.0.0.0";
    /// Default bind port
    pub const HTTP_PORT: u16 = 8000;
    /// Default history store
    pub const DATABASE_URL: &str = "sqlite:./workout.db";
    /// Default PDF directory
    pub const PDF_OUTPUT_DIR: &str = "static";
    /// Allow any origin by default
    pub const CORS_ALLOWED_ORIGINS: &str = "*";
}

/// LLM collaborator defaults
pub mod llm {
    /// `OpenAI` API base URL
    pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
    /// Model used when none is configured
    pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
    /// Sampling temperature
    pub const DEFAULT_TEMPERATURE: f32 = 0.7;
    /// Response length cap in tokens
    pub const DEFAULT_MAX_TOKENS: u32 = 800;
    /// Connection timeout
    pub const CONNECT_TIMEOUT_SECS: u64 = 30;
    /// Whole-request timeout
    pub const REQUEST_TIMEOUT_SECS: u64 = 120;
    /// Required prefix of an `OpenAI` secret key
    pub const API_KEY_PREFIX: &str = "sk-";
    /// Minimum plausible key length
    pub const MIN_API_KEY_LEN: usize = 40;
    /// Characters of prompts and completions written to the log
    pub const LOG_PREVIEW_CHARS: usize = 200;
}

/// Plan generation limits
pub mod workout {
    /// Exercises requested from the model and kept for an ungrouped main section
    pub const TARGET_EXERCISE_COUNT: usize = 5;
    /// Parsed exercises needed before circuit or superset grouping applies
    pub const MIN_EXERCISES_FOR_GROUPING: usize = GROUP_COUNT * GROUP_SIZE;
    /// Circuit rounds or supersets built from the parsed exercises
    pub const GROUP_COUNT: usize = 2;
    /// Leaves per circuit round or superset
    pub const GROUP_SIZE: usize = 2;
    /// Floor applied when easy feedback lowers sets
    pub const MIN_SETS: u32 = 1;
    /// Floor applied when easy feedback lowers reps
    pub const MIN_REPS: u32 = 5;
    /// Reps added or removed per difficulty step
    pub const REP_STEP: u32 = 3;
    /// Multiplier applied to durations under severe soreness
    pub const SORENESS_DURATION_FACTOR: f64 = 0.75;
    /// Floor for shortened durations, in the duration's own unit
    pub const MIN_DURATION_VALUE: i64 = 10;
    /// Prior sessions included in the prompt
    pub const PROMPT_HISTORY_LIMIT: usize = 3;
}

/// Response messages
pub mod messages {
    /// Success message of the generation endpoint
    pub const PLAN_GENERATED: &str = "Workout plan generated successfully";
}
