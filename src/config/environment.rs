// ABOUTME: Environment-based server configuration loaded once at startup
// ABOUTME: Covers bind address, history store, PDF output, CORS and LLM settings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based configuration
//!
//! Every value has a default except `OPENAI_API_KEY`. A missing or malformed
//! key does not stop the server from starting; it is checked per request so
//! that `/health` stays available and the client gets a precise detail string.

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::constants::{defaults, env_vars, llm};
use crate::errors::{AppError, AppResult};

/// Environment type for logging and diagnostics
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Production deployment
    Production,
    /// Automated tests
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

/// History store settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// `SQLx` connection URL, e.g. `sqlite:./workout.db` or `sqlite::memory:`
    pub url: String,
}

/// Rendered document settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory receiving generated PDFs
    pub pdf_dir: PathBuf,
}

/// CORS settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Allowed origins; a single `*` allows any origin
    pub allowed_origins: Vec<String>,
}

/// Settings for the OpenAI-compatible completion endpoint
#[derive(Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Secret key; validated per request
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    /// API base URL without trailing slash
    pub base_url: String,
    /// Model identifier
    pub model: String,
    /// Sampling temperature
    pub temperature: f32,
    /// Response length cap
    pub max_tokens: u32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: llm::DEFAULT_BASE_URL.to_owned(),
            model: llm::DEFAULT_MODEL.to_owned(),
            temperature: llm::DEFAULT_TEMPERATURE,
            max_tokens: llm::DEFAULT_MAX_TOKENS,
        }
    }
}

impl std::fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmConfig")
            .field("api_key", &self.masked_api_key())
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .finish()
    }
}

impl LlmConfig {
    /// Return the API key if present and well-formed
    ///
    /// # Errors
    ///
    /// Returns `ConfigMissing` when no key is configured and `ConfigInvalid`
    /// when the key lacks the `sk-` prefix or is shorter than 40 characters.
    pub fn require_api_key(&self) -> AppResult<&str> {
        let Some(key) = self.api_key.as_deref().filter(|k| !k.is_empty()) else {
            warn!("{} environment variable not set", env_vars::OPENAI_API_KEY);
            return Err(AppError::config_missing(
                "OPENAI_API_KEY environment variable not set. Please set your OpenAI API key.",
            ));
        };

        if !key.starts_with(llm::API_KEY_PREFIX) || key.chars().count() < llm::MIN_API_KEY_LEN {
            warn!(key = %mask_secret(key), "OPENAI_API_KEY appears invalid");
            return Err(AppError::config_invalid(
                "OPENAI_API_KEY appears invalid. Should start with 'sk-' and be at least 40 characters",
            ));
        }

        Ok(key)
    }

    /// Key rendered safe for logs
    #[must_use]
    pub fn masked_api_key(&self) -> String {
        self.api_key
            .as_deref()
            .map_or_else(|| "<not set>".to_owned(), mask_secret)
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address
    pub http_host: String,
    /// Bind port
    pub http_port: u16,
    /// Deployment environment
    pub environment: Environment,
    /// History store
    pub database: DatabaseConfig,
    /// Rendered document output
    pub output: OutputConfig,
    /// CORS policy
    pub cors: CorsConfig,
    /// LLM endpoint
    pub llm: LlmConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_host: defaults::HTTP_HOST.to_owned(),
            http_port: defaults::HTTP_PORT,
            environment: Environment::Development,
            database: DatabaseConfig {
                url: defaults::DATABASE_URL.to_owned(),
            },
            output: OutputConfig {
                pdf_dir: PathBuf::from(defaults::PDF_OUTPUT_DIR),
            },
            cors: CorsConfig {
                allowed_origins: parse_origins(defaults::CORS_ALLOWED_ORIGINS),
            },
            llm: LlmConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables, reading `.env` first if present
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric variable cannot be parsed
    pub fn from_env() -> Result<Self> {
        if let Err(e) = dotenvy::dotenv() {
            info!("No .env file loaded: {}", e);
        }
        Self::from_current_env()
    }

    /// Load configuration from the current process environment only
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric variable cannot be parsed
    pub fn from_current_env() -> Result<Self> {
        let config = Self {
            http_host: env_var_or(env_vars::HTTP_HOST, defaults::HTTP_HOST),
            http_port: env_var_or(env_vars::HTTP_PORT, &defaults::HTTP_PORT.to_string())
                .parse()
                .context("Invalid HTTP_PORT value")?,
            environment: Environment::from_str_or_default(&env_var_or("ENVIRONMENT", "development")),
            database: DatabaseConfig {
                url: env_var_or(env_vars::DATABASE_URL, defaults::DATABASE_URL),
            },
            output: OutputConfig {
                pdf_dir: PathBuf::from(env_var_or(
                    env_vars::PDF_OUTPUT_DIR,
                    defaults::PDF_OUTPUT_DIR,
                )),
            },
            cors: CorsConfig {
                allowed_origins: parse_origins(&env_var_or(
                    env_vars::CORS_ALLOWED_ORIGINS,
                    defaults::CORS_ALLOWED_ORIGINS,
                )),
            },
            llm: LlmConfig {
                api_key: env::var(env_vars::OPENAI_API_KEY).ok(),
                base_url: env_var_or(env_vars::OPENAI_BASE_URL, llm::DEFAULT_BASE_URL)
                    .trim_end_matches('/')
                    .to_owned(),
                model: env_var_or(env_vars::OPENAI_MODEL, llm::DEFAULT_MODEL),
                temperature: env_var_or(
                    env_vars::OPENAI_TEMPERATURE,
                    &llm::DEFAULT_TEMPERATURE.to_string(),
                )
                .parse()
                .context("Invalid OPENAI_TEMPERATURE value")?,
                max_tokens: env_var_or(
                    env_vars::OPENAI_MAX_TOKENS,
                    &llm::DEFAULT_MAX_TOKENS.to_string(),
                )
                .parse()
                .context("Invalid OPENAI_MAX_TOKENS value")?,
            },
        };

        Ok(config)
    }

    /// `host:port` string for binding the listener
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.http_host, self.http_port)
    }

    /// One-line configuration summary safe for logs
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "environment={:?} bind={} database={} pdf_dir={} llm_base_url={} llm_model={} api_key={}",
            self.environment,
            self.bind_address(),
            self.database.url,
            self.output.pdf_dir.display(),
            self.llm.base_url,
            self.llm.model,
            self.llm.masked_api_key(),
        )
    }
}

/// Mask a secret, keeping the first and last four characters of long values
#[must_use]
pub fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 8 {
        return "****".to_owned();
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}...{tail}")
}

/// Get environment variable or default value
fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

/// Parse comma-separated CORS origins
fn parse_origins(origins_str: &str) -> Vec<String> {
    if origins_str.trim() == "*" {
        vec!["*".to_owned()]
    } else {
        origins_str
            .split(',')
            .map(|s| s.trim().to_owned())
            .filter(|s| !s.is_empty())
            .collect()
    }
}
