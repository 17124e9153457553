// ABOUTME: Configuration management module for centralized server settings
// ABOUTME: Re-exports the environment-driven server and LLM configuration types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration module for the workout planner
//!
//! All settings come from environment variables (optionally via a `.env`
//! file) and are read once at startup. See [`environment::ServerConfig`].

/// Environment and server configuration
pub mod environment;

pub use environment::{
    mask_secret, CorsConfig, DatabaseConfig, Environment, LlmConfig, OutputConfig, ServerConfig,
};
