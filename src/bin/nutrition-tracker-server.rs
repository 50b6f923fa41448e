// ABOUTME: Server binary for the nutrition tracker HTTP API
// ABOUTME: Loads configuration, initializes logging and storage, then serves until shutdown
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Nutrition Tracker Server Binary
//!
//! Starts the HTTP API with token authentication and `SQLite` storage.

use anyhow::{Context, Result};
use clap::Parser;
use nutrition_tracker::{
    auth::AuthManager,
    config::environment::ServerConfig,
    database::Database,
    logging,
    resources::ServerResources,
    server,
};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

#[derive(Parser)]
#[command(name = "nutrition-tracker-server")]
#[command(about = "Nutrition Tracker API - per-user meal logging against a daily calorie target")]
pub struct Args {
    /// Override HTTP port
    #[arg(long, env = "HTTP_PORT")]
    http_port: Option<u16>,

    /// Override the database URL
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    logging::init_from_env()?;

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }
    if let Some(database_url) = args.database_url {
        config.database_url = database_url;
    }

    info!("Starting Nutrition Tracker API");

    ensure_database_directory(&config.database_url)?;
    let database = Database::new(&config.database_url).await?;

    let auth_manager = AuthManager::new(&config.auth.jwt_secret, config.auth.jwt_expiry_hours);
    info!(
        token_expiry_hours = config.auth.jwt_expiry_hours,
        "Authentication manager initialized"
    );

    let resources = Arc::new(ServerResources::new(
        database,
        auth_manager,
        config.auth.bcrypt_cost,
    ));

    server::serve(resources, &config).await?;
    Ok(())
}

/// Create the parent directory of a file-backed `SQLite` database
fn ensure_database_directory(database_url: &str) -> Result<()> {
    let Some(path) = database_url.strip_prefix("sqlite:") else {
        return Ok(());
    };
    let path = path.trim_start_matches("//");
    if path.contains(":memory:") {
        return Ok(());
    }
    let file = path.split('?').next().unwrap_or(path);
    if let Some(parent) = Path::new(file).parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create database directory {}", parent.display()))?;
    }
    Ok(())
}
