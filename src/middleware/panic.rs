// ABOUTME: Panic handler for the catch-panic layer
// ABOUTME: Wraps unexpected handler panics as internal errors with the uniform JSON body
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::any::Any;

use axum::response::{IntoResponse, Response};

use crate::errors::AppError;

/// Turn a panic payload into an `INTERNAL_ERROR` response
#[must_use]
pub fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    let message = payload
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| payload.downcast_ref::<&str>().copied())
        .unwrap_or("unexpected failure");

    AppError::internal(message).into_response()
}
