// ABOUTME: HTTP middleware for authentication and cross-origin access
// ABOUTME: Access guard over the bearer token and CORS layer configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Access guard and authenticated identity extractor
pub mod auth;
/// CORS layer
pub mod cors;

pub use auth::{is_public_path, require_auth, AccessGuard, AuthenticatedUser};
pub use cors::setup_cors;
