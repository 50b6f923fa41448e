// ABOUTME: Configuration management module for centralized server settings
// ABOUTME: Loads server, storage, authentication and CORS settings from the environment
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration module for the nutrition tracker
//!
//! - **Environment**: Server configuration from environment variables
//! - **Security**: Token signing secret, token lifetime and password hashing cost

/// Environment and server configuration
pub mod environment;
/// Authentication and password hashing configuration
pub mod security;
