// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Handles environment variables, deployment modes, and runtime configuration parsing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based configuration management

use super::security::AuthConfig;
use nutrition_core::constants::ports::DEFAULT_HTTP_PORT;
use nutrition_core::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::env;
use tracing::info;

/// Default SQLite database location
pub const DEFAULT_DATABASE_URL: &str = "sqlite:./data/nutrition.db";

/// Deployment environment
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Development environment (default)
    #[default]
    Development,
    /// Production environment with stricter security
    Production,
    /// Testing environment for automated tests
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

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Deployment environment
    pub environment: Environment,
    /// HTTP listen port
    pub http_port: u16,
    /// sqlx connection URL
    pub database_url: String,
    /// Token and password settings
    pub auth: AuthConfig,
    /// Allowed CORS origins, `*` for any
    pub cors_origins: Vec<String>,
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is present but invalid, or if required
    /// production settings are missing
    pub fn from_env() -> AppResult<Self> {
        info!("Loading configuration from environment variables");

        let environment = Environment::from_str_or_default(&env_var_or("ENVIRONMENT", "development"));
        let http_port = env_var_or("HTTP_PORT", &DEFAULT_HTTP_PORT.to_string())
            .parse()
            .map_err(|e| AppError::config(format!("Invalid HTTP_PORT value: {e}")))?;

        let config = Self {
            environment,
            http_port,
            database_url: env_var_or("DATABASE_URL", DEFAULT_DATABASE_URL),
            auth: AuthConfig::from_env(environment)?,
            cors_origins: parse_origins(&env_var_or("CORS_ALLOWED_ORIGINS", "*")),
        };

        info!(
            environment = ?config.environment,
            http_port = config.http_port,
            database_url = %config.database_url,
            token_expiry_hours = config.auth.jwt_expiry_hours,
            "Configuration loaded"
        );
        Ok(config)
    }
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
