// ABOUTME: Logging configuration and structured logging setup for the workout planner
// ABOUTME: Configures log levels, output formats and noise reduction for dependency crates
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Structured logging built on `tracing-subscriber`
//!
//! | variable               | effect                                   |
//! |------------------------|------------------------------------------|
//! | `RUST_LOG`             | filter directives, default `info`        |
//! | `LOG_FORMAT`           | `pretty` (default), `compact` or `json`  |
//! | `LOG_INCLUDE_LOCATION` | add file and line (always on in production) |
//! | `LOG_INCLUDE_SPANS`    | emit span open/close events              |
//! | `SERVICE_NAME`         | name reported in the startup event       |

use std::env;
use std::io;

use anyhow::{Context, Result};
use tracing::{info, Subscriber};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    registry::LookupSpan,
    util::SubscriberInitExt,
    EnvFilter, Layer,
};

use crate::constants::service_names;

/// Dependency crates that are too chatty at `info`
const QUIET_TARGETS: [&str; 6] = [
    "hyper=warn",
    "hyper_util=warn",
    "reqwest=warn",
    "rustls=warn",
    "sqlx=warn",
    "tower_http=info",
];

/// Log output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// One JSON object per event
    Json,
    /// Multi-line human output
    #[default]
    Pretty,
    /// Single-line human output
    Compact,
}

impl LogFormat {
    /// Parse the `LOG_FORMAT` value, defaulting to pretty
    #[must_use]
    pub fn from_str_or_default(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "json" => Self::Json,
            "compact" => Self::Compact,
            _ => Self::Pretty,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is unset
    pub level: String,
    /// Output format
    pub format: LogFormat,
    /// Include source file and line numbers
    pub include_location: bool,
    /// Include span open/close events
    pub include_spans: bool,
    /// Service name reported at startup
    pub service_name: String,
    /// Deployment environment label
    pub environment: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            format: LogFormat::default(),
            include_location: false,
            include_spans: false,
            service_name: service_names::PIERRE_WORKOUT_PLANNER.to_owned(),
            environment: "development".to_owned(),
        }
    }
}

impl LoggingConfig {
    /// Create logging configuration from environment variables
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let environment = env::var("ENVIRONMENT").unwrap_or(defaults.environment);

        Self {
            level: env::var("RUST_LOG").unwrap_or(defaults.level),
            format: env::var("LOG_FORMAT")
                .map_or(defaults.format, |value| LogFormat::from_str_or_default(&value)),
            include_location: environment == "production"
                || env::var("LOG_INCLUDE_LOCATION").is_ok(),
            include_spans: env::var("LOG_INCLUDE_SPANS").is_ok(),
            service_name: env::var("SERVICE_NAME").unwrap_or(defaults.service_name),
            environment,
        }
    }

    fn env_filter(&self) -> EnvFilter {
        let own = format!("pierre_workout_planner={}", self.level);
        QUIET_TARGETS
            .iter()
            .copied()
            .chain(std::iter::once(own.as_str()))
            .filter_map(|directive| directive.parse().ok())
            .fold(EnvFilter::new(&self.level), EnvFilter::add_directive)
    }

    fn output_layer<S>(&self) -> Box<dyn Layer<S> + Send + Sync>
    where
        S: Subscriber + for<'a> LookupSpan<'a>,
    {
        let span_events = if self.include_spans {
            FmtSpan::NEW | FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        };

        let layer = fmt::layer()
            .with_writer(io::stdout)
            .with_file(self.include_location)
            .with_line_number(self.include_location)
            .with_span_events(span_events);

        match self.format {
            LogFormat::Json => layer.json().boxed(),
            LogFormat::Pretty => layer.with_target(true).boxed(),
            LogFormat::Compact => layer.compact().with_target(false).boxed(),
        }
    }

    /// Initialize the global tracing subscriber
    ///
    /// # Errors
    ///
    /// Returns an error if a global subscriber is already installed
    pub fn init(&self) -> Result<()> {
        tracing_subscriber::registry()
            .with(self.env_filter())
            .with(self.output_layer())
            .try_init()
            .context("Failed to install tracing subscriber")?;

        info!(
            service.name = %self.service_name,
            service.version = env!("CARGO_PKG_VERSION"),
            environment = %self.environment,
            log.level = %self.level,
            log.format = ?self.format,
            log.spans = self.include_spans,
            "Logging initialized"
        );
        Ok(())
    }
}

/// Initialize logging from environment
///
/// # Errors
///
/// Returns an error if logging initialization fails
pub fn init_from_env() -> Result<()> {
    LoggingConfig::from_env().init()
}

/// Application-specific structured log events
pub struct AppLogger;

impl AppLogger {
    /// A plan was generated, persisted and rendered
    pub fn log_plan_generated(user: &str, layout: &str, main_exercises: usize, duration_ms: u64) {
        info!(
            user.name = %user,
            plan.layout = %layout,
            plan.main_exercises = main_exercises,
            plan.duration_ms = duration_ms,
            "Workout plan generated"
        );
    }

    /// A history store statement completed
    pub fn log_database_operation(operation: &str, table: &str, success: bool, duration_ms: u64) {
        info!(
            db.operation = %operation,
            db.table = %table,
            db.success = success,
            db.duration_ms = duration_ms,
            "Database operation"
        );
    }
}
