// ABOUTME: Database connection management and schema migration for the workout history store
// ABOUTME: Opens the SQLite pool and exposes the history manager
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Database Management
//!
//! A single SQLite pool backs the append-only workout history. File URLs are
//! opened in read-write-create mode; `sqlite::memory:` URLs use one
//! long-lived connection so the in-memory schema survives between queries.

mod history;

pub use history::{HistoryManager, HistoryStore};

use std::time::Instant;

use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use tracing::info;

use crate::errors::{AppError, AppResult};
use crate::logging::AppLogger;

const FILE_POOL_SIZE: u32 = 5;

/// Database manager owning the connection pool
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Connect and run migrations
    ///
    /// # Errors
    ///
    /// Returns an error if the connection or a migration fails
    pub async fn new(database_url: &str) -> AppResult<Self> {
        let in_memory = database_url.contains(":memory:");

        // Ensure SQLite creates the database file if it doesn't exist
        let connection_url = if database_url.starts_with("sqlite:")
            && !in_memory
            && !database_url.contains('?')
        {
            format!("{database_url}?mode=rwc")
        } else {
            database_url.to_owned()
        };

        let options = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(FILE_POOL_SIZE)
        };

        let pool = options
            .connect(&connection_url)
            .await
            .map_err(|e| AppError::database(format!("Failed to connect to {database_url}: {e}")))?;

        let db = Self { pool };
        db.migrate().await?;

        info!("Database ready at {}", database_url);
        Ok(db)
    }

    /// Get a reference to the database pool
    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// History manager sharing this pool
    #[must_use]
    pub fn history(&self) -> HistoryManager {
        HistoryManager::new(self.pool.clone())
    }

    /// Run database migrations
    ///
    /// # Errors
    ///
    /// Returns an error if a schema statement fails
    pub async fn migrate(&self) -> AppResult<()> {
        let started = Instant::now();

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS user_workout_history (
                id TEXT PRIMARY KEY,
                user_name TEXT NOT NULL,
                created_at TEXT NOT NULL,
                workout_plan TEXT NOT NULL,
                feedback TEXT
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create user_workout_history: {e}")))?;

        sqlx::query(
            r"
            CREATE INDEX IF NOT EXISTS idx_user_workout_history_user_date
            ON user_workout_history (user_name, created_at)
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create history index: {e}")))?;

        AppLogger::log_database_operation(
            "migrate",
            "user_workout_history",
            true,
            u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
        );
        Ok(())
    }
}
