// ABOUTME: Core types for the Pierre workout plan generator
// ABOUTME: Foundation crate with error handling and workout domain models
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Pierre Workout Core
//!
//! Foundation crate providing shared types for the Pierre workout planner.
//! It is designed to change infrequently, so the service crate can iterate on
//! pipeline logic without recompiling the models.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode` and the JSON error body
//! - **models**: User profile, feedback, exercise, section, plan and history types

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Workout domain models shared by the pipeline, the store and the HTTP layer
pub mod models;
