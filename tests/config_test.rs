// ABOUTME: Integration tests for environment-driven server configuration
// ABOUTME: Defaults, overrides and rejection of weak or malformed settings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(clippy::unwrap_used)]

use nutrition_tracker::config::environment::{Environment, ServerConfig, DEFAULT_DATABASE_URL};
use nutrition_tracker::errors::ErrorCode;
use serial_test::serial;
use std::env;

const VARS: &[&str] = &[
    "ENVIRONMENT",
    "HTTP_PORT",
    "DATABASE_URL",
    "JWT_SECRET",
    "JWT_EXPIRY_HOURS",
    "BCRYPT_COST",
    "CORS_ALLOWED_ORIGINS",
];

fn clear_env() {
    for var in VARS {
        env::remove_var(var);
    }
}

const STRONG_SECRET: &str = "0123456789abcdef0123456789abcdef";

#[test]
#[serial]
fn test_defaults_without_environment() {
    clear_env();

    let config = ServerConfig::from_env().unwrap();
    assert_eq!(config.environment, Environment::Development);
    assert_eq!(config.http_port, 8081);
    assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
    assert_eq!(config.auth.jwt_expiry_hours, 24);
    assert_eq!(config.auth.jwt_secret.len(), 64);
    assert_eq!(config.cors_origins, ["*"]);
}

#[test]
#[serial]
fn test_overrides_from_environment() {
    clear_env();
    env::set_var("HTTP_PORT", "9090");
    env::set_var("DATABASE_URL", "sqlite::memory:");
    env::set_var("JWT_SECRET", STRONG_SECRET);
    env::set_var("JWT_EXPIRY_HOURS", "2");
    env::set_var("BCRYPT_COST", "6");
    env::set_var("CORS_ALLOWED_ORIGINS", "http://localhost:3000, http://app.test");

    let config = ServerConfig::from_env().unwrap();
    assert_eq!(config.http_port, 9090);
    assert_eq!(config.database_url, "sqlite::memory:");
    assert_eq!(config.auth.jwt_secret, STRONG_SECRET.as_bytes());
    assert_eq!(config.auth.jwt_expiry_hours, 2);
    assert_eq!(config.auth.bcrypt_cost, 6);
    assert_eq!(
        config.cors_origins,
        ["http://localhost:3000", "http://app.test"]
    );
    clear_env();
}

#[test]
#[serial]
fn test_rejects_short_secret() {
    clear_env();
    env::set_var("JWT_SECRET", "too-short");

    let err = ServerConfig::from_env().unwrap_err();
    assert_eq!(err.code, ErrorCode::ConfigError);
    clear_env();
}

#[test]
#[serial]
fn test_production_requires_secret() {
    clear_env();
    env::set_var("ENVIRONMENT", "production");

    assert!(ServerConfig::from_env().is_err());

    env::set_var("JWT_SECRET", STRONG_SECRET);
    let config = ServerConfig::from_env().unwrap();
    assert!(config.environment.is_production());
    clear_env();
}

#[test]
#[serial]
fn test_rejects_malformed_numbers() {
    clear_env();
    env::set_var("HTTP_PORT", "eighty");
    assert!(ServerConfig::from_env().is_err());

    clear_env();
    env::set_var("JWT_EXPIRY_HOURS", "0");
    assert!(ServerConfig::from_env().is_err());
    clear_env();
}
