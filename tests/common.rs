// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides quiet logging, a scripted LLM provider, sample profiles and test resources
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate
)]
//! Shared test utilities for `pierre_workout_planner`

use std::path::Path;
use std::sync::{Arc, Mutex, Once};

use async_trait::async_trait;
use pierre_workout_planner::{
    config::ServerConfig,
    database::Database,
    errors::AppError,
    llm::{ChatRequest, ChatResponse, LlmProvider},
    models::{ExperienceLevel, UserProfile},
    resources::ServerResources,
};

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        let _ = tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .try_init();
    });
}

/// A well-formed fake `OpenAI` key
pub fn valid_api_key() -> String {
    format!("sk-{}", "x".repeat(45))
}

/// Five exercise lines in the format the prompt asks for
pub const FIVE_EXERCISES: &str = "\
Squats - Quads and glutes, 3 sets x 12 reps
Push-ups \u{2013} Chest and triceps, 3 sets x 10 reps
Plank - Core, 3 sets, 45 sec hold
Lunges - Legs, 2 sets x 10 reps
Burpees - Full body, 3 sets x 8 reps
";

/// What the scripted provider answers with
pub enum Script {
    Reply(String),
    Fail(fn() -> AppError),
}

/// LLM provider returning a fixed answer and recording every request
pub struct ScriptedLlmProvider {
    script: Script,
    requests: Mutex<Vec<ChatRequest>>,
}

impl ScriptedLlmProvider {
    pub fn replying(content: &str) -> Arc<Self> {
        Arc::new(Self {
            script: Script::Reply(content.to_owned()),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn failing(error: fn() -> AppError) -> Arc<Self> {
        Arc::new(Self {
            script: Script::Fail(error),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// User message of the most recent request
    pub fn last_prompt(&self) -> String {
        let requests = self.requests();
        let last = requests.last().expect("no LLM request recorded");
        last.user_prompt().expect("no user message").to_owned()
    }
}

#[async_trait]
impl LlmProvider for ScriptedLlmProvider {
    fn name(&self) -> &'static str {
        "scripted"
    }

    fn default_model(&self) -> &str {
        "scripted-model"
    }

    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, AppError> {
        self.requests.lock().unwrap().push(request.clone());
        match &self.script {
            Script::Reply(content) => Ok(ChatResponse {
                content: content.clone(),
                model: "scripted-model".to_owned(),
                usage: None,
                finish_reason: Some("stop".to_owned()),
            }),
            Script::Fail(error) => Err(error()),
        }
    }

    async fn health_check(&self) -> Result<bool, AppError> {
        Ok(matches!(self.script, Script::Reply(_)))
    }
}

/// Beginner profile without grouping flags
pub fn sample_profile(name: &str) -> UserProfile {
    UserProfile {
        name: name.to_owned(),
        age: 30,
        gender: "female".to_owned(),
        goal: "build strength".to_owned(),
        experience: ExperienceLevel::Beginner,
        equipment: vec!["dumbbells".to_owned(), "mat".to_owned()],
        days_per_week: 3,
        include_circuit: None,
        include_superset: None,
    }
}

/// In-memory database with the schema applied
pub async fn create_test_database() -> Database {
    init_test_logging();
    Database::new("sqlite::memory:")
        .await
        .expect("in-memory database")
}

/// Server resources over an in-memory database, `llm` and `pdf_dir`
pub async fn create_test_resources(
    llm: Arc<dyn LlmProvider>,
    pdf_dir: &Path,
) -> (Arc<ServerResources>, Database) {
    let database = create_test_database().await;

    let mut config = ServerConfig::default();
    config.database.url = "sqlite::memory:".to_owned();
    config.output.pdf_dir = pdf_dir.to_path_buf();
    config.llm.api_key = Some(valid_api_key());

    let resources = ServerResources::new(config, Arc::new(database.history()), llm);
    (Arc::new(resources), database)
}
