// ABOUTME: Security configuration types for token signing and password hashing
// ABOUTME: Loads the signing secret once at startup so it stays immutable for the process lifetime
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::environment::Environment;
use crate::auth::generate_jwt_secret;
use nutrition_core::constants::auth::{DEFAULT_TOKEN_EXPIRY_HOURS, MIN_PASSWORD_LENGTH};
use nutrition_core::errors::{AppError, AppResult};
use std::env;
use std::fmt;
use tracing::warn;

/// Minimum accepted length of a configured signing secret in bytes
const MIN_SECRET_BYTES: usize = 32;

/// Authentication configuration for session tokens
#[derive(Clone)]
pub struct AuthConfig {
    /// HMAC signing secret
    pub jwt_secret: Vec<u8>,
    /// Token lifetime in hours
    pub jwt_expiry_hours: i64,
    /// bcrypt work factor
    pub bcrypt_cost: u32,
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"[REDACTED]")
            .field("jwt_expiry_hours", &self.jwt_expiry_hours)
            .field("bcrypt_cost", &self.bcrypt_cost)
            .finish()
    }
}

impl AuthConfig {
    /// Load authentication configuration from environment
    ///
    /// `JWT_SECRET` is mandatory in production. Elsewhere a random secret is
    /// generated when it is absent, which invalidates tokens on restart.
    ///
    /// # Errors
    ///
    /// Returns an error if the secret is missing in production, too short,
    /// or a numeric variable does not parse
    pub fn from_env(environment: Environment) -> AppResult<Self> {
        let jwt_secret = match env::var("JWT_SECRET") {
            Ok(secret) if secret.len() >= MIN_SECRET_BYTES => secret.into_bytes(),
            Ok(_) => {
                return Err(AppError::config(format!(
                    "JWT_SECRET must be at least {MIN_SECRET_BYTES} bytes"
                )))
            }
            Err(_) if environment.is_production() => {
                return Err(AppError::config("JWT_SECRET is required in production"))
            }
            Err(_) => {
                warn!("JWT_SECRET not set, generating an ephemeral signing secret");
                generate_jwt_secret()?.to_vec()
            }
        };

        let jwt_expiry_hours = match env::var("JWT_EXPIRY_HOURS") {
            Ok(raw) => raw
                .parse::<i64>()
                .ok()
                .filter(|hours| *hours > 0)
                .ok_or_else(|| {
                    AppError::config(format!("Invalid JWT_EXPIRY_HOURS value: {raw}"))
                })?,
            Err(_) => DEFAULT_TOKEN_EXPIRY_HOURS,
        };

        let bcrypt_cost = match env::var("BCRYPT_COST") {
            Ok(raw) => raw
                .parse::<u32>()
                .map_err(|e| AppError::config(format!("Invalid BCRYPT_COST value: {e}")))?,
            Err(_) => bcrypt::DEFAULT_COST,
        };

        Ok(Self {
            jwt_secret,
            jwt_expiry_hours,
            bcrypt_cost,
        })
    }

    /// Minimum password length enforced at registration
    #[must_use]
    pub const fn min_password_length(&self) -> usize {
        MIN_PASSWORD_LENGTH
    }
}
