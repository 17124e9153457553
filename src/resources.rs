// ABOUTME: Shared server state handed to every route handler
// ABOUTME: Bundles configuration, the history store and the LLM provider behind Arc
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Server resources
//!
//! Built once at startup and shared through `Arc<ServerResources>` so handlers
//! never reach for globals. Tests build it directly with substitute
//! collaborators.

use std::sync::Arc;

use crate::config::ServerConfig;
use crate::database::{Database, HistoryStore};
use crate::errors::AppResult;
use crate::llm::{LlmProvider, OpenAiCompatibleProvider};

/// Long-lived collaborators of the plan pipeline
pub struct ServerResources {
    /// Configuration loaded at startup
    pub config: Arc<ServerConfig>,
    /// Workout history store
    pub history: Arc<dyn HistoryStore>,
    /// Completion provider
    pub llm: Arc<dyn LlmProvider>,
}

impl ServerResources {
    /// Assemble resources from already-built collaborators
    #[must_use]
    pub fn new(
        config: ServerConfig,
        history: Arc<dyn HistoryStore>,
        llm: Arc<dyn LlmProvider>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            history,
            llm,
        }
    }

    /// Open the database and create the `OpenAI` provider described by `config`
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or migrated, or the
    /// HTTP client cannot be built
    pub async fn from_config(config: ServerConfig) -> AppResult<Self> {
        let database = Database::new(&config.database.url).await?;
        let llm = OpenAiCompatibleProvider::new(config.llm.clone())?;
        Ok(Self::new(config, Arc::new(database.history()), Arc::new(llm)))
    }
}
