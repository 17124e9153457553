// ABOUTME: OpenAI-compatible chat completion provider used for workout plan generation
// ABOUTME: Validates the API key per call and maps upstream failures to client-facing errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # `OpenAI`-Compatible Provider
//!
//! Talks to `POST {base_url}/chat/completions`. The base URL is configurable
//! through `OPENAI_BASE_URL`, so any endpoint speaking the same protocol works.
//!
//! ## Error mapping
//!
//! | upstream condition                 | error code                  |
//! |------------------------------------|-----------------------------|
//! | missing / malformed API key        | `CONFIG_MISSING` / `CONFIG_INVALID` |
//! | `insufficient_quota`               | `QUOTA_EXCEEDED`            |
//! | `model_not_found`                  | `EXTERNAL_SERVICE_ERROR`    |
//! | HTTP 429                           | `EXTERNAL_RATE_LIMITED`     |
//! | HTTP 502-504, connect or timeout   | `EXTERNAL_SERVICE_UNAVAILABLE` |
//! | anything else                      | `EXTERNAL_SERVICE_ERROR`    |

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, info, instrument};

use super::{ChatMessage, ChatRequest, ChatResponse, LlmProvider, TokenUsage};
use crate::config::LlmConfig;
use crate::constants::llm::{CONNECT_TIMEOUT_SECS, LOG_PREVIEW_CHARS, REQUEST_TIMEOUT_SECS};
use crate::errors::{AppError, ErrorCode};

const SERVICE: &str = "OpenAI API error";
const QUOTA_MARKER: &str = "insufficient_quota";
const MODEL_NOT_FOUND_MARKER: &str = "model_not_found";
const QUOTA_MESSAGE: &str =
    "Your OpenAI account has no remaining credits. Please add payment method to your OpenAI account.";

// ============================================================================
// Wire format
// ============================================================================

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Debug, Serialize)]
struct WireMessage<'a> {
    role: &'static str,
    content: &'a str,
}

impl<'a> From<&'a ChatMessage> for WireMessage<'a> {
    fn from(message: &'a ChatMessage) -> Self {
        Self {
            role: message.role.as_str(),
            content: &message.content,
        }
    }
}

#[derive(Debug, Deserialize)]
struct CompletionBody {
    #[serde(default)]
    model: String,
    choices: Vec<CompletionChoice>,
    #[serde(default)]
    usage: Option<TokenUsage>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    message: ChoiceMessage,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// `{"error": {...}}` envelope returned on failures
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: UpstreamError,
}

#[derive(Debug, Deserialize)]
struct UpstreamError {
    message: String,
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default)]
    code: Option<String>,
}

impl UpstreamError {
    fn mentions(&self, marker: &str) -> bool {
        self.code.as_deref() == Some(marker)
            || self.kind.as_deref() == Some(marker)
            || self.message.contains(marker)
    }
}

fn preview(text: &str) -> String {
    text.chars().take(LOG_PREVIEW_CHARS).collect()
}

// ============================================================================
// Error classification
// ============================================================================

/// Map a non-success upstream response to a client-facing error
///
/// Quota exhaustion and unknown models get friendlier messages; everything
/// else carries the upstream text after an `OpenAI API error:` prefix.
#[must_use]
pub fn classify_upstream_failure(status: u16, body: &str, model: &str) -> AppError {
    let message = match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(ErrorEnvelope { error }) if error.mentions(QUOTA_MARKER) => {
            return AppError::new(ErrorCode::QuotaExceeded, QUOTA_MESSAGE);
        }
        Ok(ErrorEnvelope { error }) if error.mentions(MODEL_NOT_FOUND_MARKER) => {
            return AppError::new(
                ErrorCode::ExternalServiceError,
                format!("The requested AI model is not available: {model}"),
            );
        }
        Ok(ErrorEnvelope { error }) => format!("{SERVICE}: {}", error.message),
        Err(_) => format!("{SERVICE} ({status}): {}", preview(body)),
    };

    let code = match status {
        429 => ErrorCode::ExternalRateLimited,
        502..=504 => ErrorCode::ExternalServiceUnavailable,
        _ => ErrorCode::ExternalServiceError,
    };
    AppError::new(code, message)
}

// ============================================================================
// Provider
// ============================================================================

/// `OpenAI` chat completions client
pub struct OpenAiCompatibleProvider {
    http: Client,
    config: LlmConfig,
}

impl OpenAiCompatibleProvider {
    /// Create a new provider with the given configuration
    ///
    /// The API key is not checked here; see [`LlmConfig::require_api_key`].
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: LlmConfig) -> Result<Self, AppError> {
        let http = Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| AppError::internal(format!("Failed to create HTTP client: {e}")))?;

        info!(
            base_url = %config.base_url,
            model = %config.model,
            api_key = %config.masked_api_key(),
            "OpenAI provider ready"
        );

        Ok(Self { http, config })
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'))
    }

    fn transport_error(&self, e: &reqwest::Error) -> AppError {
        error!("Failed to send request to OpenAI: {}", e);
        if e.is_connect() {
            AppError::external_unavailable(
                SERVICE,
                format!("Cannot connect to {}", self.config.base_url),
            )
        } else if e.is_timeout() {
            AppError::external_unavailable(SERVICE, "Request timed out")
        } else {
            AppError::external_service(SERVICE, e.to_string())
        }
    }

    fn decode(body: &str) -> Result<ChatResponse, AppError> {
        let completion: CompletionBody = serde_json::from_str(body).map_err(|e| {
            error!("Unparseable completion body: {}", e);
            AppError::external_service(SERVICE, format!("Failed to parse response: {e}"))
        })?;

        let Some(choice) = completion.choices.into_iter().next() else {
            return Err(AppError::external_service(SERVICE, "API returned no choices"));
        };
        let content = choice
            .message
            .content
            .as_deref()
            .map(str::trim)
            .unwrap_or_default()
            .to_owned();

        debug!(
            chars = content.len(),
            finish_reason = ?choice.finish_reason,
            "Completion preview: {}",
            preview(&content)
        );

        Ok(ChatResponse {
            content,
            model: completion.model,
            usage: completion.usage,
            finish_reason: choice.finish_reason,
        })
    }
}

#[async_trait]
impl LlmProvider for OpenAiCompatibleProvider {
    fn name(&self) -> &'static str {
        "openai"
    }

    fn default_model(&self) -> &str {
        &self.config.model
    }

    #[instrument(skip(self, request), fields(model = %request.model.as_deref().unwrap_or(&self.config.model)))]
    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, AppError> {
        let api_key = self.config.require_api_key()?;
        let model = request.model.as_deref().unwrap_or(&self.config.model);

        let payload = CompletionRequest {
            model,
            messages: request.messages.iter().map(WireMessage::from).collect(),
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        };
        for (index, message) in payload.messages.iter().enumerate() {
            debug!(index, role = message.role, chars = message.content.len(), "Outgoing message");
        }

        info!("Requesting completion");
        let response = self
            .http
            .post(self.completions_url())
            .bearer_auth(api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| self.transport_error(&e))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            error!("Failed to read completion body: {}", e);
            AppError::external_service(SERVICE, format!("Failed to read response: {e}"))
        })?;

        if status.is_success() {
            Self::decode(&body)
        } else {
            let failure = classify_upstream_failure(status.as_u16(), &body, model);
            error!(status = status.as_u16(), code = ?failure.code, "Completion failed: {}", failure.message);
            Err(failure)
        }
    }

    /// Reports whether a well-formed API key is configured; makes no network call
    async fn health_check(&self) -> Result<bool, AppError> {
        Ok(self.config.require_api_key().is_ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quota_error_gets_friendly_message() {
        let body = r#"{"error":{"message":"You exceeded your current quota","type":"insufficient_quota","code":"insufficient_quota"}}"#;
        let err = classify_upstream_failure(429, body, "gpt-3.5-turbo");
        assert_eq!(err.code, ErrorCode::QuotaExceeded);
        assert_eq!(err.message, QUOTA_MESSAGE);
    }

    #[test]
    fn test_model_not_found_names_the_model() {
        let body = r#"{"error":{"message":"The model `gpt-9` does not exist","type":"invalid_request_error","code":"model_not_found"}}"#;
        let err = classify_upstream_failure(404, body, "gpt-9");
        assert_eq!(err.code, ErrorCode::ExternalServiceError);
        assert_eq!(err.message, "The requested AI model is not available: gpt-9");
    }

    #[test]
    fn test_other_errors_keep_upstream_text() {
        let body = r#"{"error":{"message":"Rate limit reached","type":"requests"}}"#;
        let err = classify_upstream_failure(429, body, "gpt-3.5-turbo");
        assert_eq!(err.code, ErrorCode::ExternalRateLimited);
        assert_eq!(err.message, "OpenAI API error: Rate limit reached");

        let err = classify_upstream_failure(503, "upstream down", "gpt-3.5-turbo");
        assert_eq!(err.code, ErrorCode::ExternalServiceUnavailable);
        assert!(err.message.contains("upstream down"));
    }

    #[test]
    fn test_decode_trims_content_and_keeps_usage() {
        let body = r#"{"model":"m","choices":[{"message":{"content":"  Squats - 3 sets x 12 reps \n"},"finish_reason":"stop"}],"usage":{"prompt_tokens":1,"completion_tokens":2,"total_tokens":3}}"#;
        let response = OpenAiCompatibleProvider::decode(body).unwrap();
        assert_eq!(response.content, "Squats - 3 sets x 12 reps");
        assert_eq!(response.usage.map(|u| u.total_tokens), Some(3));
    }
}
