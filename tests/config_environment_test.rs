// ABOUTME: Integration tests for environment-driven server configuration
// ABOUTME: Runs serially because every test mutates process environment variables
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(clippy::float_cmp)]
#![allow(missing_docs)]

use std::env;
use std::path::PathBuf;

use pierre_workout_planner::config::{mask_secret, Environment, LlmConfig, ServerConfig};
use pierre_workout_planner::errors::ErrorCode;
use serial_test::serial;

const MANAGED_VARS: &[&str] = &[
    "HTTP_HOST",
    "HTTP_PORT",
    "ENVIRONMENT",
    "DATABASE_URL",
    "PDF_OUTPUT_DIR",
    "OPENAI_API_KEY",
    "OPENAI_BASE_URL",
    "OPENAI_MODEL",
    "OPENAI_TEMPERATURE",
    "OPENAI_MAX_TOKENS",
    "CORS_ALLOWED_ORIGINS",
];

fn clear_env() {
    for var in MANAGED_VARS {
        env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_defaults_without_environment() {
    clear_env();
    let config = ServerConfig::from_current_env().unwrap();

    assert_eq!(config.http_host, "0.0.0.0");
    assert_eq!(config.http_port, 8000);
    assert_eq!(config.environment, Environment::Development);
    assert_eq!(config.database.url, "sqlite:./workout.db");
    assert_eq!(config.output.pdf_dir, PathBuf::from("static"));
    assert_eq!(config.cors.allowed_origins, vec!["*"]);
    assert_eq!(config.llm.api_key, None);
    assert_eq!(config.llm.model, "gpt-3.5-turbo");
    assert_eq!(config.llm.temperature, 0.7);
    assert_eq!(config.llm.max_tokens, 800);
    assert_eq!(config.bind_address(), "0.0.0.0:8000");
}

#[test]
#[serial]
fn test_overrides_from_environment() {
    clear_env();
    env::set_var("HTTP_HOST", "127.0.0.1");
    env::set_var("HTTP_PORT", "9100");
    env::set_var("ENVIRONMENT", "prod");
    env::set_var("PDF_OUTPUT_DIR", "/tmp/plans");
    env::set_var("OPENAI_BASE_URL", "http://localhost:9999/v1/");
    env::set_var("OPENAI_MODEL", "gpt-4o-mini");
    env::set_var("OPENAI_MAX_TOKENS", "400");
    env::set_var("CORS_ALLOWED_ORIGINS", "http://a.test, http://b.test");

    let config = ServerConfig::from_current_env().unwrap();
    clear_env();

    assert_eq!(config.bind_address(), "127.0.0.1:9100");
    assert!(config.environment.is_production());
    assert_eq!(config.output.pdf_dir, PathBuf::from("/tmp/plans"));
    assert_eq!(config.llm.base_url, "http://localhost:9999/v1");
    assert_eq!(config.llm.model, "gpt-4o-mini");
    assert_eq!(config.llm.max_tokens, 400);
    assert_eq!(
        config.cors.allowed_origins,
        vec!["http://a.test", "http://b.test"]
    );
}

#[test]
#[serial]
fn test_invalid_numbers_are_rejected() {
    clear_env();
    env::set_var("HTTP_PORT", "not-a-port");
    let port_error = ServerConfig::from_current_env().unwrap_err();
    clear_env();
    assert!(port_error.to_string().contains("HTTP_PORT"));

    env::set_var("OPENAI_TEMPERATURE", "warm");
    let temperature_error = ServerConfig::from_current_env().unwrap_err();
    clear_env();
    assert!(temperature_error.to_string().contains("OPENAI_TEMPERATURE"));
}

#[test]
#[serial]
fn test_api_key_is_read_but_not_validated_at_load() {
    clear_env();
    env::set_var("OPENAI_API_KEY", "not-a-key");
    let config = ServerConfig::from_current_env().unwrap();
    clear_env();

    assert_eq!(config.llm.api_key.as_deref(), Some("not-a-key"));
    let error = config.llm.require_api_key().unwrap_err();
    assert_eq!(error.code, ErrorCode::ConfigInvalid);
    assert_eq!(
        error.detail(),
        "OPENAI_API_KEY appears invalid. Should start with 'sk-' and be at least 40 characters"
    );
}

#[test]
fn test_api_key_checks() {
    let mut llm = LlmConfig::default();
    let missing = llm.require_api_key().unwrap_err();
    assert_eq!(missing.code, ErrorCode::ConfigMissing);
    assert_eq!(
        missing.detail(),
        "OPENAI_API_KEY environment variable not set. Please set your OpenAI API key."
    );

    llm.api_key = Some(String::new());
    assert_eq!(llm.require_api_key().unwrap_err().code, ErrorCode::ConfigMissing);

    // right prefix, one character short
    llm.api_key = Some(format!("sk-{}", "x".repeat(36)));
    assert_eq!(llm.require_api_key().unwrap_err().code, ErrorCode::ConfigInvalid);

    llm.api_key = Some(format!("sk-{}", "x".repeat(37)));
    assert!(llm.require_api_key().is_ok());
}

#[test]
fn test_secrets_never_appear_in_debug_or_summary() {
    let mut config = ServerConfig::default();
    let key = format!("sk-{}", "s".repeat(40));
    config.llm.api_key = Some(key.clone());

    assert!(!format!("{:?}", config.llm).contains(&key));
    assert!(!config.summary().contains(&key));
    assert!(config.summary().contains(&mask_secret(&key)));
    assert_eq!(LlmConfig::default().masked_api_key(), "<not set>");
}
