// ABOUTME: Main library entry point for the nutrition tracking backend
// ABOUTME: Token service, access guard, nutrition calculations, meal ledger and HTTP surface
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Nutrition Tracker
//!
//! A per-user nutrition tracking service. Users register, keep a body
//! profile from which a daily calorie target is derived, and log meals
//! against a shared food catalog. Every meal entry stores its own nutrient
//! snapshot, so later catalog edits never rewrite history.
//!
//! ## Architecture
//!
//! - **`auth`**: signed, expiring identity tokens
//! - **`middleware`**: access guard deciding which requests need a token
//! - **`intelligence`**: calorie target and nutrient scaling math
//! - **`services`**: owner-scoped business operations over store traits
//! - **`database`**: `SQLite` persistence implementing the store traits
//! - **`routes`** / **`server`**: thin axum handlers and the middleware stack
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use nutrition_tracker::config::environment::ServerConfig;
//! use nutrition_tracker::errors::AppResult;
//!
//! fn main() -> AppResult<()> {
//!     let config = ServerConfig::from_env()?;
//!     println!("Nutrition tracker configured with port: HTTP={}", config.http_port);
//!     Ok(())
//! }
//! ```

/// Token service: issue and verify identity tokens
pub mod auth;

/// Environment-driven configuration
pub mod config;

/// `SQLite` persistence and store traits
pub mod database;

/// Calorie target calculation and nutrient scaling
pub mod intelligence;

/// Structured logging setup
pub mod logging;

/// Access guard and CORS
pub mod middleware;

/// Shared service container
pub mod resources;

/// HTTP route groups
pub mod routes;

/// Router assembly and listener lifecycle
pub mod server;

/// Business services
pub mod services;

/// Error types, re-exported from the core crate
pub mod errors {
    pub use nutrition_core::errors::*;
}

/// Domain models, re-exported from the core crate
pub mod models {
    pub use nutrition_core::models::*;
}

/// Domain constants, re-exported from the core crate
pub mod constants {
    pub use nutrition_core::constants::*;
}
