// ABOUTME: Unified error type and error codes for the workout planner
// ABOUTME: Maps every failure to an HTTP status and a uniform JSON detail body
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Unified Error Handling
//!
//! Every failure that can reach a caller is an [`AppError`] carrying an
//! [`ErrorCode`]. The code decides the HTTP status; the message is the
//! human-readable detail string returned to the client.
//!
//! Only the LLM call, the history store and the PDF renderer produce errors
//! during plan generation. Parsing, composition and feedback adjustment are
//! total functions and never fail.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Standard error codes used throughout the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Validation
    /// Request payload failed validation
    InvalidInput,

    // External services
    /// The LLM service returned an error
    ExternalServiceError,
    /// The LLM service could not be reached
    ExternalServiceUnavailable,
    /// The LLM service rate limited the request
    ExternalRateLimited,
    /// The LLM account has no remaining quota
    QuotaExceeded,

    // Configuration
    /// A required configuration value is missing
    ConfigMissing,
    /// A configuration value is present but malformed
    ConfigInvalid,

    // Output
    /// The PDF document could not be produced or written
    RenderError,

    // Internal
    /// Unexpected failure caught at the request boundary
    InternalError,
    /// History store operation failed
    DatabaseError,
    /// Data serialization/deserialization failed
    SerializationError,
}

impl ErrorCode {
    /// Get the HTTP status code for this error
    #[must_use]
    pub const fn http_status(&self) -> u16 {
        match self {
            // 400 Bad Request
            Self::InvalidInput => 400,

            // 429 Too Many Requests
            Self::ExternalRateLimited | Self::QuotaExceeded => 429,

            // 502 Bad Gateway
            Self::ExternalServiceError => 502,

            // 503 Service Unavailable
            Self::ExternalServiceUnavailable => 503,

            // 500 Internal Server Error
            Self::ConfigMissing
            | Self::ConfigInvalid
            | Self::RenderError
            | Self::InternalError
            | Self::DatabaseError
            | Self::SerializationError => 500,
        }
    }

    /// Get a user-friendly description of this error
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::InvalidInput => "The provided input is invalid",
            Self::ExternalServiceError => "The AI service encountered an error",
            Self::ExternalServiceUnavailable => "The AI service is currently unavailable",
            Self::ExternalRateLimited => "AI service rate limit exceeded",
            Self::QuotaExceeded => "AI service quota exhausted",
            Self::ConfigMissing => "Required configuration is missing",
            Self::ConfigInvalid => "Configuration is invalid",
            Self::RenderError => "PDF generation failed",
            Self::InternalError => "An internal server error occurred",
            Self::DatabaseError => "Database operation failed",
            Self::SerializationError => "Data serialization/deserialization failed",
        }
    }

    /// Whether this code belongs to the configuration family
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(self, Self::ConfigMissing | Self::ConfigInvalid)
    }

    /// Whether this code belongs to the upstream (LLM) family
    #[must_use]
    pub const fn is_upstream(&self) -> bool {
        matches!(
            self,
            Self::ExternalServiceError
                | Self::ExternalServiceUnavailable
                | Self::ExternalRateLimited
                | Self::QuotaExceeded
        )
    }
}

/// Unified error type for the application
#[derive(Debug, Error)]
pub struct AppError {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable error message, returned to clients as `detail`
    pub message: String,
    /// Source error for error chaining
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new `AppError` with the given code and message
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Add a source error for error chaining
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Get the HTTP status code for this error
    #[must_use]
    pub const fn http_status(&self) -> u16 {
        self.code.http_status()
    }

    /// Detail string returned to the client
    #[must_use]
    pub fn detail(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.description(), self.message)
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

/// Convenience functions for creating common errors
impl AppError {
    /// Invalid input
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Unexpected failure; the detail is prefixed the way the request boundary reports it
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::InternalError,
            format!("Internal server error: {}", message.into()),
        )
    }

    /// Database error
    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::DatabaseError, message)
    }

    /// Required configuration value is missing
    pub fn config_missing(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigMissing, message)
    }

    /// Configuration value is malformed
    pub fn config_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigInvalid, message)
    }

    /// External service error
    pub fn external_service(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ExternalServiceError,
            format!("{}: {}", service.into(), message.into()),
        )
    }

    /// External service could not be reached
    pub fn external_unavailable(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ExternalServiceUnavailable,
            format!("{}: {}", service.into(), message.into()),
        )
    }

    /// PDF rendering failed
    pub fn render(message: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::RenderError,
            format!("PDF generation failed: {}", message.into()),
        )
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::new(
            ErrorCode::SerializationError,
            format!("JSON serialization failed: {error}"),
        )
        .with_source(error)
    }
}

#[cfg(feature = "database-errors")]
impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> Self {
        Self::database(format!("Database operation failed: {error}")).with_source(error)
    }
}

/// HTTP error response format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable detail string
    pub detail: String,
    /// Machine-readable error code
    pub code: ErrorCode,
}

impl From<AppError> for ErrorResponse {
    fn from(error: AppError) -> Self {
        Self {
            detail: error.message,
            code: error.code,
        }
    }
}

#[cfg(feature = "http-response")]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = http::StatusCode::from_u16(self.http_status())
            .unwrap_or(http::StatusCode::INTERNAL_SERVER_ERROR);

        tracing::error!(code = ?self.code, status = status.as_u16(), "{}", self.message);

        (status, axum::Json(ErrorResponse::from(self))).into_response()
    }
}
