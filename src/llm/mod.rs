// ABOUTME: LLM provider abstraction layer for the plan generation completion call
// ABOUTME: Defines chat message, request and response types and the provider contract
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # LLM Provider Interface
//!
//! The plan pipeline only needs a single non-streaming completion, so the
//! contract is one async method. Production uses
//! [`OpenAiCompatibleProvider`]; tests substitute a scripted implementation.
//!
//! ## Example
//!
//! ```rust,no_run
//! use pierre_workout_planner::llm::{ChatRequest, LlmProvider};
//!
//! async fn example(provider: &dyn LlmProvider) {
//!     let request = ChatRequest::prompt(
//!         "You are a fitness coach that generates personalized workout plans.",
//!         "Create a workout plan with exactly 5 exercises...",
//!     )
//!     .with_temperature(0.7);
//!     let response = provider.complete(&request).await;
//! }
//! ```

mod openai_compatible;
pub mod prompts;

pub use openai_compatible::{classify_upstream_failure, OpenAiCompatibleProvider};
pub use prompts::get_workout_coach_system_prompt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

// ============================================================================
// Messages
// ============================================================================

/// Author of a chat message; plan generation only sends these two
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// Coaching instructions
    System,
    /// The rendered plan prompt
    User,
}

impl MessageRole {
    /// Wire name
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
        }
    }
}

/// One message of a completion request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Author
    pub role: MessageRole,
    /// Text
    pub content: String,
}

impl ChatMessage {
    /// System message
    #[must_use]
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    /// User message
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }
}

// ============================================================================
// Requests and responses
// ============================================================================

/// A single non-streaming completion request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Messages in order
    pub messages: Vec<ChatMessage>,
    /// Model override; `None` uses [`LlmProvider::default_model`]
    pub model: Option<String>,
    /// Sampling temperature
    pub temperature: Option<f32>,
    /// Response length cap
    pub max_tokens: Option<u32>,
}

impl ChatRequest {
    /// Request with provider defaults for every option
    #[must_use]
    pub const fn new(messages: Vec<ChatMessage>) -> Self {
        Self {
            messages,
            model: None,
            temperature: None,
            max_tokens: None,
        }
    }

    /// System instructions followed by one user prompt
    #[must_use]
    pub fn prompt(system: impl Into<String>, user: impl Into<String>) -> Self {
        Self::new(vec![ChatMessage::system(system), ChatMessage::user(user)])
    }

    /// Text of the first user message, if any
    #[must_use]
    pub fn user_prompt(&self) -> Option<&str> {
        self.messages
            .iter()
            .find(|message| message.role == MessageRole::User)
            .map(|message| message.content.as_str())
    }

    /// Override the provider's model
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set the sampling temperature
    #[must_use]
    pub const fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Cap the completion length
    #[must_use]
    pub const fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }
}

/// Completion text plus bookkeeping from the provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    /// Trimmed completion text
    pub content: String,
    /// Model that answered
    pub model: String,
    /// Token accounting, when reported
    pub usage: Option<TokenUsage>,
    /// Why generation stopped (`stop`, `length`, ...)
    pub finish_reason: Option<String>,
}

/// Token accounting in the `OpenAI` `usage` shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Prompt tokens
    pub prompt_tokens: u32,
    /// Completion tokens
    pub completion_tokens: u32,
    /// Sum of both
    pub total_tokens: u32,
}

// ============================================================================
// Provider contract
// ============================================================================

/// Completion backend used by the plan service
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Identifier for logs and `/ready`
    fn name(&self) -> &'static str;

    /// Model used when a request does not name one
    fn default_model(&self) -> &str;

    /// Run one completion; no retries
    ///
    /// Credential problems surface as configuration errors on every call, so
    /// a server started without a key still answers health checks.
    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, AppError>;

    /// Whether completions can currently be attempted
    async fn health_check(&self) -> Result<bool, AppError>;
}
