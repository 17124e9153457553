// ABOUTME: HTTP server binary for the workout planner
// ABOUTME: Loads configuration, opens the history store and serves the plan API until Ctrl-C
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Pierre Workout Server Binary
//!
//! Starts the plan generation API with the SQLite history store and the
//! `OpenAI` provider configured from the environment.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use pierre_workout_planner::{
    config::ServerConfig, logging, resources::ServerResources, routes::build_router,
};
use tokio::net::TcpListener;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "pierre-workout-server")]
#[command(about = "Pierre Workout Planner - personalized workout plans with PDF export")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,

    /// Override bind address
    #[arg(long)]
    http_host: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }
    if let Some(http_host) = args.http_host {
        config.http_host = http_host;
    }

    logging::init_from_env()?;
    info!("{}", config.summary());

    if let Err(e) = config.llm.require_api_key() {
        warn!("Plan generation will fail until the key is fixed: {}", e.message);
    }

    tokio::fs::create_dir_all(&config.output.pdf_dir)
        .await
        .with_context(|| format!("Failed to create {}", config.output.pdf_dir.display()))?;

    let bind_address = config.bind_address();
    let resources = Arc::new(ServerResources::from_config(config).await?);
    let router = build_router(resources);

    let listener = TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {bind_address}"))?;
    info!("Pierre Workout Planner listening on http://{}", bind_address);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl-C, running until killed: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
