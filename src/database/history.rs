// ABOUTME: Append-only per-user workout history backed by SQLite
// ABOUTME: Stores generated plans with the feedback that preceded them, newest first on read
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::time::Instant;

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use uuid::Uuid;

use crate::errors::{AppError, AppResult};
use crate::logging::AppLogger;
use crate::models::{Feedback, HistoryEntry, WorkoutPlan};

const TABLE: &str = "user_workout_history";

/// Storage contract for workout history
///
/// No update or delete operations exist; entries are written once.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Most recent entries for `user_name`, newest first, at most `limit`
    async fn recent_entries(&self, user_name: &str, limit: usize) -> AppResult<Vec<HistoryEntry>>;

    /// Persist a new entry
    async fn append(&self, entry: &HistoryEntry) -> AppResult<()>;
}

/// `SQLite` implementation of [`HistoryStore`]
#[derive(Clone)]
pub struct HistoryManager {
    pool: SqlitePool,
}

impl HistoryManager {
    /// Create a new history manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HistoryStore for HistoryManager {
    async fn recent_entries(&self, user_name: &str, limit: usize) -> AppResult<Vec<HistoryEntry>> {
        let started = Instant::now();
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);

        // created_at uses a fixed-width UTC format, so text order is time order
        let rows = sqlx::query(
            r"
            SELECT id, user_name, created_at, workout_plan, feedback
            FROM user_workout_history
            WHERE user_name = $1
            ORDER BY created_at DESC, rowid DESC
            LIMIT $2
            ",
        )
        .bind(user_name)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to query workout history: {e}")))?;

        AppLogger::log_database_operation("select", TABLE, true, elapsed_ms(started));
        rows.iter().map(row_to_history_entry).collect()
    }

    async fn append(&self, entry: &HistoryEntry) -> AppResult<()> {
        let started = Instant::now();
        let plan_json = serde_json::to_string(&entry.workout_plan)?;
        let feedback_json = entry
            .feedback
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;

        sqlx::query(
            r"
            INSERT INTO user_workout_history (id, user_name, created_at, workout_plan, feedback)
            VALUES ($1, $2, $3, $4, $5)
            ",
        )
        .bind(entry.id.to_string())
        .bind(&entry.user_name)
        .bind(format_timestamp(entry.created_at))
        .bind(plan_json)
        .bind(feedback_json)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to save workout history: {e}")))?;

        AppLogger::log_database_operation("insert", TABLE, true, elapsed_ms(started));
        Ok(())
    }
}

fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}

fn row_to_history_entry(row: &SqliteRow) -> AppResult<HistoryEntry> {
    let id: String = row.get("id");
    let created_at: String = row.get("created_at");
    let plan_json: String = row.get("workout_plan");
    let feedback_json: Option<String> = row.get("feedback");

    let workout_plan: WorkoutPlan = serde_json::from_str(&plan_json)?;
    let feedback: Option<Feedback> = feedback_json
        .as_deref()
        .map(serde_json::from_str)
        .transpose()?;

    Ok(HistoryEntry {
        id: Uuid::parse_str(&id)
            .map_err(|e| AppError::database(format!("Invalid history id {id}: {e}")))?,
        user_name: row.get("user_name"),
        created_at: DateTime::parse_from_rfc3339(&created_at)
            .map_err(|e| AppError::database(format!("Invalid created_at {created_at}: {e}")))?
            .with_timezone(&Utc),
        workout_plan,
        feedback,
    })
}
