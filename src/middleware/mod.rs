// ABOUTME: HTTP middleware for the workout planner router
// ABOUTME: CORS policy construction and panic-to-error conversion
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// CORS configuration
pub mod cors;
/// Converts handler panics into the uniform error response
pub mod panic;

pub use cors::setup_cors;
pub use panic::handle_panic;
